//! Display ordering.
//!
//! Sorting operates on a display-only copy; the persisted collection is
//! never reordered. All comparators are stable-sort friendly: equal keys
//! keep their prior relative order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::collection::Collection;
use super::error::CoreError;
use super::project::Project;

/// One of the eight keyed orderings. Absence of a key means identity
/// order (the persisted insertion order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    DateAsc,
    DateDesc,
    CharacterAsc,
    CharacterDesc,
    HoursAsc,
    HoursDesc,
    CostAsc,
    CostDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::DateAsc,
        SortKey::DateDesc,
        SortKey::CharacterAsc,
        SortKey::CharacterDesc,
        SortKey::HoursAsc,
        SortKey::HoursDesc,
        SortKey::CostAsc,
        SortKey::CostDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateAsc => "date-asc",
            SortKey::DateDesc => "date-desc",
            SortKey::CharacterAsc => "character-asc",
            SortKey::CharacterDesc => "character-desc",
            SortKey::HoursAsc => "hours-asc",
            SortKey::HoursDesc => "hours-desc",
            SortKey::CostAsc => "cost-asc",
            SortKey::CostDesc => "cost-desc",
        }
    }

    /// Parse a key, tolerant of case.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let lowered = raw.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == lowered)
            .ok_or(CoreError::InvalidSortKey {
                raw: raw.to_string(),
            })
    }

    fn compare(&self, a: &Project, b: &Project) -> Ordering {
        match self {
            SortKey::DateAsc => cmp_date(a, b),
            SortKey::DateDesc => cmp_date(b, a),
            SortKey::CharacterAsc => cmp_character(a, b),
            SortKey::CharacterDesc => cmp_character(b, a),
            SortKey::HoursAsc => cmp_f64(a.hours, b.hours),
            SortKey::HoursDesc => cmp_f64(b.hours, a.hours),
            SortKey::CostAsc => cmp_f64(a.cost, b.cost),
            SortKey::CostDesc => cmp_f64(b.cost, a.cost),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::parse(s)
    }
}

/// Missing dates compare as the empty string.
fn cmp_date(a: &Project, b: &Project) -> Ordering {
    a.date.as_deref().unwrap_or("").cmp(b.date.as_deref().unwrap_or(""))
}

/// Case-folded character comparison - collation-style rather than raw
/// code-point order, so "aloy" and "Aloy" sort together. Empty names
/// compare as the empty string.
fn cmp_character(a: &Project, b: &Project) -> Ordering {
    let fold = |p: &Project| p.character.trim().to_lowercase();
    fold(a).cmp(&fold(b)).then_with(|| a.character.cmp(&b.character))
}

/// Persisted numbers have passed coercion and are finite, so a total
/// order exists; NaN is unrepresentable but handled anyway.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Sorted display copy of the collection. `None` preserves identity order.
pub fn sorted(collection: &Collection, key: Option<SortKey>) -> Vec<Project> {
    let mut view: Vec<Project> = collection.iter().cloned().collect();
    if let Some(key) = key {
        // Vec::sort_by is stable: ties keep insertion order.
        view.sort_by(|a, b| key.compare(a, b));
    }
    view
}
