//! Metric aggregation
//!
//! Reduces a user's active tickets and tasks into zero-filled count
//! structures. Every field is declared and defaulted; there are no dynamic
//! maps to leave holes in.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use desk_support::{Priority, Task, TaskStatus, Ticket, TicketStatus};

use crate::policy::WorkloadPolicy;
use crate::sla::SlaState;

#[derive(Clone, Debug, Default, Serialize)]
pub struct TicketStatusCounts {
    pub open: u32,
    pub assigned: u32,
    pub in_progress: u32,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct TaskStatusCounts {
    pub todo: u32,
    pub in_progress: u32,
    pub review: u32,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct PriorityCounts {
    pub urgent: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl PriorityCounts {
    fn record(&mut self, priority: Priority) {
        match priority {
            Priority::Urgent => self.urgent += 1,
            Priority::High => self.high += 1,
            Priority::Medium => self.medium += 1,
            Priority::Low => self.low += 1,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct SlaCounts {
    pub breached: u32,
    pub at_risk: u32,
    pub on_track: u32,
    pub unknown: u32,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct TicketMetrics {
    pub total: u32,
    pub by_status: TicketStatusCounts,
    pub by_priority: PriorityCounts,
    pub by_sla: SlaCounts,
    pub overdue: u32,
    pub due_within_24h: u32,
    pub due_within_7d: u32,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct TaskMetrics {
    pub total: u32,
    pub by_status: TaskStatusCounts,
    pub by_priority: PriorityCounts,
    pub overdue: u32,
    pub due_within_24h: u32,
    pub due_within_7d: u32,
    pub total_estimated_hours: f64,
}

/// Reduce active tickets into per-status, per-priority and per-SLA counts.
/// Callers pre-filter to active status; resolved/closed tickets that slip
/// through are tolerated and simply skipped in the status breakdown.
pub fn aggregate_ticket_metrics(
    tickets: &[Ticket],
    now: DateTime<Utc>,
    policy: &WorkloadPolicy,
) -> TicketMetrics {
    let mut metrics = TicketMetrics {
        total: tickets.len() as u32,
        ..TicketMetrics::default()
    };

    for ticket in tickets {
        match ticket.status {
            TicketStatus::Open => metrics.by_status.open += 1,
            TicketStatus::Assigned => metrics.by_status.assigned += 1,
            TicketStatus::InProgress => metrics.by_status.in_progress += 1,
            TicketStatus::Resolved | TicketStatus::Closed => {}
        }

        metrics.by_priority.record(ticket.priority);

        match SlaState::classify(ticket, now, policy) {
            SlaState::Breached => metrics.by_sla.breached += 1,
            SlaState::AtRisk => metrics.by_sla.at_risk += 1,
            SlaState::OnTrack => metrics.by_sla.on_track += 1,
            SlaState::Unknown => metrics.by_sla.unknown += 1,
            SlaState::Met => {}
        }

        if let Some(due) = ticket.due_date {
            let remaining = due - now;
            if remaining >= Duration::zero() && remaining < policy.due_soon_window() {
                metrics.due_within_24h += 1;
            } else if remaining >= policy.due_soon_window() && remaining < policy.week_window() {
                metrics.due_within_7d += 1;
            }
        }
    }

    metrics.overdue = metrics.by_sla.breached;
    metrics
}

/// Reduce active tasks into the mirror metrics, keyed on `deadline`, and sum
/// estimated hours. Done/cancelled tasks never block aggregation; they are
/// skipped in the status breakdown.
pub fn aggregate_task_metrics(
    tasks: &[Task],
    now: DateTime<Utc>,
    policy: &WorkloadPolicy,
) -> TaskMetrics {
    let mut metrics = TaskMetrics {
        total: tasks.len() as u32,
        ..TaskMetrics::default()
    };

    for task in tasks {
        match task.status {
            TaskStatus::Todo => metrics.by_status.todo += 1,
            TaskStatus::InProgress => metrics.by_status.in_progress += 1,
            TaskStatus::Review => metrics.by_status.review += 1,
            TaskStatus::Done | TaskStatus::Cancelled => {}
        }

        metrics.by_priority.record(task.priority);

        if let Some(hours) = task.estimated_hours {
            metrics.total_estimated_hours += hours;
        }

        if let Some(deadline) = task.deadline {
            let remaining = deadline - now;
            if remaining < Duration::zero() {
                metrics.overdue += 1;
            } else if remaining < policy.due_soon_window() {
                metrics.due_within_24h += 1;
            } else if remaining < policy.week_window() {
                metrics.due_within_7d += 1;
            }
        }
    }

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_support::UserId;

    fn ticket(priority: Priority, due_in: Option<Duration>, now: DateTime<Utc>) -> Ticket {
        let mut t = Ticket::create(1, "t", "");
        t.priority = priority;
        t.due_date = due_in.map(|d| now + d);
        t
    }

    fn task(due_in: Option<Duration>, hours: Option<f64>, now: DateTime<Utc>) -> Task {
        let mut t = Task::create("t");
        t.deadline = due_in.map(|d| now + d);
        t.estimated_hours = hours;
        t
    }

    #[test]
    fn empty_input_yields_zero_filled_metrics() {
        let now = Utc::now();
        let policy = WorkloadPolicy::default();
        let metrics = aggregate_ticket_metrics(&[], now, &policy);

        assert_eq!(metrics.total, 0);
        assert_eq!(metrics.by_priority.urgent, 0);
        assert_eq!(metrics.by_sla.unknown, 0);
        assert_eq!(metrics.overdue, 0);
    }

    #[test]
    fn ticket_counts_by_status_priority_and_sla() {
        let now = Utc::now();
        let policy = WorkloadPolicy::default();
        let agent = UserId::new();

        let mut assigned = ticket(Priority::High, Some(Duration::hours(2)), now);
        assigned.assign(agent);
        let mut in_progress = ticket(Priority::Urgent, Some(Duration::hours(-1)), now);
        in_progress.assign(agent);
        in_progress.start_progress();
        let open = ticket(Priority::Low, None, now);

        let metrics =
            aggregate_ticket_metrics(&[assigned, in_progress, open], now, &policy);

        assert_eq!(metrics.total, 3);
        assert_eq!(metrics.by_status.open, 1);
        assert_eq!(metrics.by_status.assigned, 1);
        assert_eq!(metrics.by_status.in_progress, 1);
        assert_eq!(metrics.by_priority.urgent, 1);
        assert_eq!(metrics.by_priority.high, 1);
        assert_eq!(metrics.by_priority.low, 1);
        assert_eq!(metrics.by_sla.breached, 1);
        assert_eq!(metrics.by_sla.at_risk, 1);
        assert_eq!(metrics.by_sla.unknown, 1);
        assert_eq!(metrics.overdue, 1);
    }

    #[test]
    fn due_window_bands_are_disjoint() {
        let now = Utc::now();
        let policy = WorkloadPolicy::default();

        let tickets = vec![
            ticket(Priority::Medium, Some(Duration::hours(-2)), now),
            ticket(Priority::Medium, Some(Duration::hours(2)), now),
            ticket(Priority::Medium, Some(Duration::hours(23)), now),
            ticket(Priority::Medium, Some(Duration::hours(24)), now),
            ticket(Priority::Medium, Some(Duration::hours(167)), now),
            ticket(Priority::Medium, Some(Duration::hours(168)), now),
        ];

        let metrics = aggregate_ticket_metrics(&tickets, now, &policy);
        assert_eq!(metrics.due_within_24h, 2);
        assert_eq!(metrics.due_within_7d, 2);
        assert_eq!(metrics.overdue, 1);
    }

    #[test]
    fn task_metrics_sum_estimated_hours_and_track_deadlines() {
        let now = Utc::now();
        let policy = WorkloadPolicy::default();

        let tasks = vec![
            task(Some(Duration::hours(-1)), Some(2.0), now),
            task(Some(Duration::hours(12)), Some(3.5), now),
            task(Some(Duration::hours(100)), None, now),
            task(None, Some(4.0), now),
        ];

        let metrics = aggregate_task_metrics(&tasks, now, &policy);
        assert_eq!(metrics.total, 4);
        assert_eq!(metrics.overdue, 1);
        assert_eq!(metrics.due_within_24h, 1);
        assert_eq!(metrics.due_within_7d, 1);
        assert!((metrics.total_estimated_hours - 9.5).abs() < f64::EPSILON);
    }

    #[test]
    fn non_active_statuses_are_tolerated_in_breakdowns() {
        let now = Utc::now();
        let policy = WorkloadPolicy::default();

        let mut done = Task::create("done");
        done.complete();
        let metrics = aggregate_task_metrics(&[done], now, &policy);

        assert_eq!(metrics.total, 1);
        assert_eq!(metrics.by_status.todo, 0);
        assert_eq!(metrics.by_status.in_progress, 0);
        assert_eq!(metrics.by_status.review, 0);

        let mut resolved = Ticket::create(9, "resolved", "");
        resolved.resolve();
        let metrics = aggregate_ticket_metrics(&[resolved], now, &policy);
        assert_eq!(metrics.total, 1);
        assert_eq!(metrics.by_status.open, 0);
        assert_eq!(metrics.by_sla.breached, 0);
    }
}
