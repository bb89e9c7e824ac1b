//! Workload policy
//!
//! Every SLA window, urgency weight, score factor and level threshold the
//! engine uses, as one injectable configuration value. The defaults are the
//! platform policy; tests and tenants can tune them without touching the
//! aggregation logic.

use chrono::Duration;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkloadPolicy {
    /// Window before the due date in which a ticket counts as at risk.
    pub sla_at_risk_hours: i64,
    /// "Due soon" window for weighting and the 24h metric band.
    pub due_soon_hours: i64,
    /// Near-term weighting window.
    pub near_term_hours: i64,
    /// Outer bound of the 7-day metric band.
    pub week_hours: i64,
    pub ticket_weights: TicketWeights,
    pub task_weights: TaskWeights,
    pub score: ScoreFactors,
    pub levels: LevelThresholds,
}

/// Per-ticket urgency weights by remaining time to due date.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TicketWeights {
    pub breached: u32,
    pub at_risk: u32,
    pub due_soon: u32,
    pub near_term: u32,
    pub base: u32,
}

/// Per-task urgency weights by remaining time to deadline. Coarser than the
/// ticket table: tasks carry no SLA of their own.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TaskWeights {
    pub overdue: u32,
    pub due_soon: u32,
    pub near_term: u32,
    pub base: u32,
}

/// Score component factors and caps. The three caps sum to 100.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoreFactors {
    pub item_factor: f64,
    pub item_cap: f64,
    pub sla_factor: f64,
    pub sla_cap: f64,
    pub hours_factor: f64,
    pub hours_cap: f64,
}

/// Inclusive lower bounds of the workload level bands.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LevelThresholds {
    pub overloaded: u8,
    pub high: u8,
    pub medium: u8,
}

impl Default for WorkloadPolicy {
    fn default() -> Self {
        Self {
            sla_at_risk_hours: 4,
            due_soon_hours: 24,
            near_term_hours: 72,
            week_hours: 168,
            ticket_weights: TicketWeights {
                breached: 10,
                at_risk: 7,
                due_soon: 5,
                near_term: 3,
                base: 1,
            },
            task_weights: TaskWeights {
                overdue: 8,
                due_soon: 5,
                near_term: 3,
                base: 1,
            },
            score: ScoreFactors {
                item_factor: 2.0,
                item_cap: 50.0,
                sla_factor: 1.5,
                sla_cap: 30.0,
                hours_factor: 0.5,
                hours_cap: 20.0,
            },
            levels: LevelThresholds {
                overloaded: 80,
                high: 60,
                medium: 30,
            },
        }
    }
}

impl WorkloadPolicy {
    pub fn at_risk_window(&self) -> Duration {
        Duration::hours(self.sla_at_risk_hours)
    }

    pub fn due_soon_window(&self) -> Duration {
        Duration::hours(self.due_soon_hours)
    }

    pub fn near_term_window(&self) -> Duration {
        Duration::hours(self.near_term_hours)
    }

    pub fn week_window(&self) -> Duration {
        Duration::hours(self.week_hours)
    }
}
