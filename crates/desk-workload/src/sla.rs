//! SLA classification
//!
//! Derived at read time from `(status, due_date, now)`; never persisted, so a
//! ticket's SLA state is always consistent with "now" but is not a stable
//! historical fact.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use desk_support::{Ticket, TicketStatus};

use crate::policy::WorkloadPolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaState {
    Breached,
    AtRisk,
    OnTrack,
    Unknown,
    Met,
}

impl SlaState {
    /// Classify a ticket against the deadline policy. Total function:
    /// resolved and closed tickets are always `Met`, whatever their due date.
    pub fn classify(ticket: &Ticket, now: DateTime<Utc>, policy: &WorkloadPolicy) -> Self {
        if matches!(ticket.status, TicketStatus::Resolved | TicketStatus::Closed) {
            return Self::Met;
        }
        match ticket.due_date {
            None => Self::Unknown,
            Some(due) => {
                let remaining = due - now;
                if remaining < Duration::zero() {
                    Self::Breached
                } else if remaining < policy.at_risk_window() {
                    Self::AtRisk
                } else {
                    Self::OnTrack
                }
            }
        }
    }
}

/// Signed hours until `due`, negative once past.
pub fn hours_remaining(due: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (due - now).num_milliseconds() as f64 / 3_600_000.0
}
