//! Assignment recommendations
//!
//! Advisories derived from the score and metrics. The rules are evaluated
//! independently in a fixed order; zero or more may fire.

use serde::Serialize;

use crate::metrics::{TaskMetrics, TicketMetrics};
use crate::policy::WorkloadPolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Critical,
    Urgent,
    Warning,
    Info,
}

#[derive(Clone, Debug, Serialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub message: String,
    pub action: String,
}

impl Recommendation {
    fn new(kind: RecommendationKind, message: impl Into<String>, action: &str) -> Self {
        Self {
            kind,
            message: message.into(),
            action: action.to_string(),
        }
    }
}

/// Derive advisories from a computed score and the metric breakdowns.
pub fn recommend(
    score: u8,
    tickets: &TicketMetrics,
    tasks: &TaskMetrics,
    policy: &WorkloadPolicy,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if score >= policy.levels.overloaded {
        recommendations.push(Recommendation::new(
            RecommendationKind::Critical,
            "User is overloaded. Consider reassigning some tickets or tasks.",
            "reassign_items",
        ));
    }

    if tickets.by_sla.breached > 0 {
        recommendations.push(Recommendation::new(
            RecommendationKind::Urgent,
            format!(
                "{} ticket(s) have breached SLA. Immediate action required.",
                tickets.by_sla.breached
            ),
            "resolve_breached_tickets",
        ));
    }

    if tickets.by_sla.at_risk > 0 {
        recommendations.push(Recommendation::new(
            RecommendationKind::Warning,
            format!(
                "{} ticket(s) at risk of breaching SLA within {} hours.",
                tickets.by_sla.at_risk, policy.sla_at_risk_hours
            ),
            "prioritize_at_risk_tickets",
        ));
    }

    if tasks.overdue > 0 {
        recommendations.push(Recommendation::new(
            RecommendationKind::Warning,
            format!("{} task(s) are overdue.", tasks.overdue),
            "complete_overdue_tasks",
        ));
    }

    if score < policy.levels.medium {
        recommendations.push(Recommendation::new(
            RecommendationKind::Info,
            "User has capacity for additional work.",
            "assign_more_items",
        ));
    }

    recommendations
}
