//! Crate-level convenience error.
//!
//! A thin wrapper over the capability errors; callers that care match on
//! the specific variant.

use thiserror::Error;

use crate::core::CoreError;
use crate::image::ImageError;
use crate::store::StoreError;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Image(#[from] ImageError),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Store(StoreError::Serialize(e))
    }
}

impl Error {
    /// Whether the failure leaves entered values and stored data intact,
    /// so the user can simply retry.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Image(_) => true,
            Error::Core(_) => true,
            Error::Store(_) => false,
        }
    }
}
