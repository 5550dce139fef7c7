//! The persisted collection and its identity-keyed operations.
//!
//! Operations are pure: each returns a new collection and leaves the
//! input untouched, so callers decide when to persist. Insertion order is
//! the persisted order; upsert replaces in place, never reorders.

use serde::{Deserialize, Serialize};

use super::identity::ProjectId;
use super::project::Project;

/// Ordered sequence of projects, unique by id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection(Vec<Project>);

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert-or-replace by identity. An existing id keeps its position;
    /// a fresh id appends.
    #[must_use]
    pub fn upsert(&self, record: Project) -> Self {
        let mut next = self.0.clone();
        match next.iter().position(|p| p.id == record.id) {
            Some(i) => next[i] = record,
            None => next.push(record),
        }
        Self(next)
    }

    /// Remove by identity. Idempotent: an absent id returns an equivalent
    /// collection.
    #[must_use]
    pub fn delete_by_id(&self, id: &ProjectId) -> Self {
        Self(self.0.iter().filter(|p| &p.id != id).cloned().collect())
    }

    /// Identity lookup, used for edit-preload and the retain-image path.
    pub fn find_by_id(&self, id: &ProjectId) -> Option<&Project> {
        self.0.iter().find(|p| &p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Project] {
        &self.0
    }
}

impl FromIterator<Project> for Collection {
    fn from_iter<T: IntoIterator<Item = Project>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Project>> for Collection {
    fn from(v: Vec<Project>) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(character: &str) -> Project {
        Project::new(character)
    }

    #[test]
    fn upsert_appends_fresh_id() {
        let c = Collection::new();
        let p = named("Aloy");
        let c = c.upsert(p.clone());
        assert_eq!(c.len(), 1);
        assert_eq!(c.find_by_id(&p.id), Some(&p));
    }

    #[test]
    fn upsert_replaces_in_place() {
        let a = named("Aloy");
        let b = named("2B");
        let c: Collection = vec![a.clone(), b.clone()].into();

        let mut edited = a.clone();
        edited.hours = 40.0;
        let c = c.upsert(edited.clone());

        assert_eq!(c.len(), 2);
        // Position preserved: the edited record is still first.
        assert_eq!(c.as_slice()[0], edited);
        assert_eq!(c.as_slice()[1], b);
    }

    #[test]
    fn upsert_never_duplicates_ids() {
        let a = named("Aloy");
        let mut c = Collection::new();
        for hours in [1.0, 2.0, 3.0] {
            let mut next = a.clone();
            next.hours = hours;
            c = c.upsert(next);
        }
        assert_eq!(c.len(), 1);
        assert_eq!(c.find_by_id(&a.id).unwrap().hours, 3.0);
    }

    #[test]
    fn upsert_does_not_mutate_input() {
        let c: Collection = vec![named("Aloy")].into();
        let _ = c.upsert(named("2B"));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn delete_is_idempotent() {
        let a = named("Aloy");
        let b = named("2B");
        let c: Collection = vec![a.clone(), b].into();
        let once = c.delete_by_id(&a.id);
        let twice = once.delete_by_id(&a.id);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 1);
    }

    #[test]
    fn delete_of_absent_id_is_a_noop() {
        let c: Collection = vec![named("Aloy")].into();
        let ghost = ProjectId::generate();
        assert_eq!(c.delete_by_id(&ghost), c);
    }

    #[test]
    fn find_by_id_misses_cleanly() {
        let c = Collection::new();
        assert!(c.find_by_id(&ProjectId::generate()).is_none());
    }
}
