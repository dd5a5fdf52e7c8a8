use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::ticket::{Category, Priority};

/// Aggregate counters computed by the helpdesk. Read-only on this side.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub total_tickets: u64,
    #[serde(default)]
    pub open_tickets: u64,
    #[serde(default)]
    pub avg_tickets_per_day: f64,
    #[serde(default)]
    pub priority_breakdown: BTreeMap<String, u64>,
    #[serde(default)]
    pub category_breakdown: BTreeMap<String, u64>,
}

impl StatsSnapshot {
    pub fn priority_count(&self, priority: Priority) -> u64 {
        self.priority_breakdown
            .get(priority.as_str())
            .copied()
            .unwrap_or(0)
    }

    pub fn category_count(&self, category: Category) -> u64 {
        self.category_breakdown
            .get(category.as_str())
            .copied()
            .unwrap_or(0)
    }
}
