//! Summary statistics over a collection.

use serde::{Deserialize, Serialize};

use super::collection::Collection;

/// Count plus summed hours/cost. Sums follow the same coercion rule as
/// the record fields themselves: anything that loaded as 0 contributes 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub count: usize,
    pub total_hours: f64,
    pub total_cost: f64,
}

/// Single left-to-right reduction. Addition commutes, so the result is
/// independent of any display ordering.
pub fn aggregate(collection: &Collection) -> Totals {
    collection.iter().fold(Totals::default(), |acc, p| Totals {
        count: acc.count + 1,
        total_hours: acc.total_hours + p.hours,
        total_cost: acc.total_cost + p.cost,
    })
}
