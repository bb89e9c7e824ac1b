//! Workload report shapes
//!
//! Assembled fresh on every request; never cached or persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;

use desk_support::{Priority, Ticket, TicketId, UserId};

use crate::load::WeightedLoad;
use crate::metrics::{PriorityCounts, TaskMetrics, TaskStatusCounts, TicketMetrics, TicketStatusCounts};
use crate::policy::WorkloadPolicy;
use crate::recommend::Recommendation;
use crate::score::WorkloadLevel;
use crate::sla::{hours_remaining, SlaState};

#[derive(Clone, Debug, Serialize)]
pub struct WorkloadSummary {
    pub total_tickets: u32,
    pub total_tasks: u32,
    pub total_items: u32,
    /// Combined estimate across tickets and tasks, one decimal.
    pub estimated_hours: f64,
    pub workload_score: u8,
    pub workload_level: WorkloadLevel,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct PrioritySplit {
    pub tickets: u32,
    pub tasks: u32,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct PriorityBreakdown {
    pub urgent: PrioritySplit,
    pub high: PrioritySplit,
    pub medium: PrioritySplit,
    pub low: PrioritySplit,
}

impl PriorityBreakdown {
    pub fn from_counts(tickets: &PriorityCounts, tasks: &PriorityCounts) -> Self {
        Self {
            urgent: PrioritySplit { tickets: tickets.urgent, tasks: tasks.urgent },
            high: PrioritySplit { tickets: tickets.high, tasks: tasks.high },
            medium: PrioritySplit { tickets: tickets.medium, tasks: tasks.medium },
            low: PrioritySplit { tickets: tickets.low, tasks: tasks.low },
        }
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct StatusBreakdown {
    pub tickets: TicketStatusCounts,
    pub tasks: TaskStatusCounts,
}

/// A ticket as listed in an SLA bucket. `due_date` and `hours_remaining`
/// are omitted for tickets without a due date.
#[derive(Clone, Debug, Serialize)]
pub struct SlaTicketRef {
    pub id: TicketId,
    pub number: u64,
    pub subject: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_remaining: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct SlaBreakdown {
    pub breached: Vec<SlaTicketRef>,
    pub at_risk: Vec<SlaTicketRef>,
    pub on_track: Vec<SlaTicketRef>,
    pub unknown: Vec<SlaTicketRef>,
}

impl SlaBreakdown {
    /// Bucket every ticket by SLA state, carrying the signed hours remaining
    /// (one decimal) where a due date exists.
    pub fn collect(tickets: &[Ticket], now: DateTime<Utc>, policy: &WorkloadPolicy) -> Self {
        let mut breakdown = Self::default();

        for ticket in tickets {
            let entry = SlaTicketRef {
                id: ticket.id,
                number: ticket.number,
                subject: ticket.subject.clone(),
                priority: ticket.priority,
                due_date: ticket.due_date,
                hours_remaining: ticket
                    .due_date
                    .map(|due| round1(hours_remaining(due, now))),
            };

            match SlaState::classify(ticket, now, policy) {
                SlaState::Breached => breakdown.breached.push(entry),
                SlaState::AtRisk => breakdown.at_risk.push(entry),
                SlaState::OnTrack => breakdown.on_track.push(entry),
                SlaState::Unknown => breakdown.unknown.push(entry),
                SlaState::Met => {}
            }
        }

        breakdown
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct WorkloadBreakdown {
    pub by_priority: PriorityBreakdown,
    pub by_status: StatusBreakdown,
    pub by_sla: SlaBreakdown,
}

/// Per-user workload report.
#[derive(Clone, Debug, Serialize)]
pub struct WorkloadReport {
    pub user_id: UserId,
    pub generated_at: DateTime<Utc>,
    pub summary: WorkloadSummary,
    pub tickets: TicketMetrics,
    pub tasks: TaskMetrics,
    pub sla: WeightedLoad,
    pub breakdown: WorkloadBreakdown,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Clone, Debug, Serialize)]
pub struct TeamStats {
    pub total_members: u32,
    pub total_tickets: u32,
    pub total_tasks: u32,
    pub average_workload_score: u8,
    pub overloaded_members: u32,
    pub capacity_members: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct TeamMemberSummary {
    pub user_id: UserId,
    pub workload_score: u8,
    pub workload_level: WorkloadLevel,
    pub total_items: u32,
    pub critical_items: u32,
    pub urgent_items: u32,
}

impl TeamMemberSummary {
    pub fn from_report(report: &WorkloadReport) -> Self {
        Self {
            user_id: report.user_id,
            workload_score: report.summary.workload_score,
            workload_level: report.summary.workload_level,
            total_items: report.summary.total_items,
            critical_items: report.sla.critical_items,
            urgent_items: report.sla.urgent_items,
        }
    }
}

/// Team workload overview.
#[derive(Clone, Debug, Serialize)]
pub struct TeamWorkloadReport {
    pub stats: TeamStats,
    pub members: Vec<TeamMemberSummary>,
}

pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
