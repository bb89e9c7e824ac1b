//! Workload scoring
//!
//! Combines item count, SLA-weighted load and estimated effort into a
//! bounded 0-100 score, then maps the score onto a discrete level.

use serde::{Deserialize, Serialize};

use crate::load::WeightedLoad;
use crate::metrics::{TaskMetrics, TicketMetrics};
use crate::policy::WorkloadPolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadLevel {
    Low,
    Medium,
    High,
    Overloaded,
}

impl WorkloadLevel {
    /// Level bands are inclusive on their lower bound.
    pub fn from_score(score: u8, policy: &WorkloadPolicy) -> Self {
        if score >= policy.levels.overloaded {
            Self::Overloaded
        } else if score >= policy.levels.high {
            Self::High
        } else if score >= policy.levels.medium {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Capped three-component score: items up to 50, SLA weight up to 30,
/// estimated hours up to 20.
pub fn workload_score(
    tickets: &TicketMetrics,
    tasks: &TaskMetrics,
    load: &WeightedLoad,
    total_estimated_hours: f64,
    policy: &WorkloadPolicy,
) -> u8 {
    let factors = &policy.score;

    let items = (tickets.total + tasks.total) as f64;
    let item_score = (items * factors.item_factor).min(factors.item_cap);
    let sla_score = (load.total_weight as f64 * factors.sla_factor).min(factors.sla_cap);
    let hours_score = (total_estimated_hours * factors.hours_factor).min(factors.hours_cap);

    (item_score + sla_score + hours_score).round().min(100.0) as u8
}
