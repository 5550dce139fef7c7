//! Core domain types and pure operations.
//!
//! Layering, leaf-first:
//! - identity: ProjectId
//! - project: the record + numeric coercion
//! - collection: identity-keyed upsert/delete/find
//! - sort: display ordering
//! - stats: aggregation

mod collection;
mod error;
mod identity;
mod project;
mod sort;
mod stats;

pub use collection::Collection;
pub use error::{CoreError, InvalidId};
pub use identity::ProjectId;
pub use project::{Project, UNNAMED, coerce_non_negative};
pub use sort::{SortKey, sorted};
pub use stats::{Totals, aggregate};
