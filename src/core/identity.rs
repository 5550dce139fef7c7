//! Project identity.
//!
//! ProjectId: opaque unique key, minted once at creation, stable across
//! edits.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{CoreError, InvalidId};

/// Alphabet for generated ids - lowercase base-36, matching the legacy
/// identity scheme so old stores keep parsing.
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generated id length.
const ID_LEN: usize = 7;

/// Project identifier - non-empty lowercase alphanumeric string.
///
/// New ids are minted via [`ProjectId::generate`]; `parse` accepts any
/// id that a prior version of the store could have written.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId(String);

impl ProjectId {
    /// Parse and validate an id string. Uppercase input is canonicalized.
    pub fn parse(s: impl Into<String>) -> Result<Self, CoreError> {
        let s = s.into().trim().to_lowercase();
        if s.is_empty() {
            return Err(InvalidId {
                raw: s,
                reason: "empty".into(),
            }
            .into());
        }
        for c in s.bytes() {
            if !ID_ALPHABET.contains(&c) {
                return Err(InvalidId {
                    raw: s,
                    reason: "contains non-alphanumeric character".into(),
                }
                .into());
            }
        }
        Ok(Self(s))
    }

    /// Mint a fresh id.
    pub fn generate() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        let suffix: String = (0..ID_LEN)
            .map(|_| {
                let idx = rng.random_range(0..ID_ALPHABET.len());
                ID_ALPHABET[idx] as char
            })
            .collect();
        Self(suffix)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProjectId({:?})", self.0)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ProjectId {
    type Error = CoreError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        ProjectId::parse(s)
    }
}

impl From<ProjectId> for String {
    fn from(id: ProjectId) -> String {
        id.0
    }
}
