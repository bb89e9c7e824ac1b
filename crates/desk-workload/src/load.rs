//! SLA-weighted load
//!
//! Assigns each item an urgency weight by remaining time to its deadline and
//! folds the weights into an aggregate. A heuristic priority signal, not an
//! SLA predictor.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use desk_support::{Task, Ticket};

use crate::policy::WorkloadPolicy;

#[derive(Clone, Debug, Default, Serialize)]
pub struct WeightedLoad {
    pub total_weight: u32,
    /// Items past their deadline.
    pub critical_items: u32,
    /// Items inside the near-deadline windows.
    pub urgent_items: u32,
    /// Mean weight per item, two decimals, 0 when there are no items.
    pub average_weight: f64,
}

/// Fold all tickets and tasks into the weighted load aggregate.
pub fn calculate_weighted_load(
    tickets: &[Ticket],
    tasks: &[Task],
    now: DateTime<Utc>,
    policy: &WorkloadPolicy,
) -> WeightedLoad {
    let mut load = WeightedLoad::default();

    for ticket in tickets {
        match ticket.due_date {
            None => load.total_weight += policy.ticket_weights.base,
            Some(due) => {
                let remaining = due - now;
                if remaining < Duration::zero() {
                    load.total_weight += policy.ticket_weights.breached;
                    load.critical_items += 1;
                } else if remaining < policy.at_risk_window() {
                    load.total_weight += policy.ticket_weights.at_risk;
                    load.urgent_items += 1;
                } else if remaining < policy.due_soon_window() {
                    load.total_weight += policy.ticket_weights.due_soon;
                    load.urgent_items += 1;
                } else if remaining < policy.near_term_window() {
                    load.total_weight += policy.ticket_weights.near_term;
                } else {
                    load.total_weight += policy.ticket_weights.base;
                }
            }
        }
    }

    for task in tasks {
        match task.deadline {
            None => load.total_weight += policy.task_weights.base,
            Some(deadline) => {
                let remaining = deadline - now;
                if remaining < Duration::zero() {
                    load.total_weight += policy.task_weights.overdue;
                    load.critical_items += 1;
                } else if remaining < policy.due_soon_window() {
                    load.total_weight += policy.task_weights.due_soon;
                    load.urgent_items += 1;
                } else if remaining < policy.near_term_window() {
                    load.total_weight += policy.task_weights.near_term;
                } else {
                    load.total_weight += policy.task_weights.base;
                }
            }
        }
    }

    let items = tickets.len() + tasks.len();
    if items > 0 {
        load.average_weight =
            (load.total_weight as f64 / items as f64 * 100.0).round() / 100.0;
    }
    load
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket_due(due_in: Option<Duration>, now: DateTime<Utc>) -> Ticket {
        let mut t = Ticket::create(1, "t", "");
        t.due_date = due_in.map(|d| now + d);
        t
    }

    fn task_due(due_in: Option<Duration>, now: DateTime<Utc>) -> Task {
        let mut t = Task::create("t");
        t.deadline = due_in.map(|d| now + d);
        t
    }

    #[test]
    fn ticket_weight_table() {
        let now = Utc::now();
        let policy = WorkloadPolicy::default();

        let cases = [
            (Some(Duration::hours(-1)), 10),
            (Some(Duration::hours(2)), 7),
            (Some(Duration::hours(12)), 5),
            (Some(Duration::hours(48)), 3),
            (Some(Duration::hours(100)), 1),
            (None, 1),
        ];
        for (due_in, expected) in cases {
            let load = calculate_weighted_load(&[ticket_due(due_in, now)], &[], now, &policy);
            assert_eq!(load.total_weight, expected, "due_in {:?}", due_in);
        }
    }

    #[test]
    fn task_weight_table() {
        let now = Utc::now();
        let policy = WorkloadPolicy::default();

        let cases = [
            (Some(Duration::hours(-1)), 8),
            (Some(Duration::hours(2)), 5),
            (Some(Duration::hours(12)), 5),
            (Some(Duration::hours(48)), 3),
            (Some(Duration::hours(100)), 1),
            (None, 1),
        ];
        for (due_in, expected) in cases {
            let load = calculate_weighted_load(&[], &[task_due(due_in, now)], now, &policy);
            assert_eq!(load.total_weight, expected, "due_in {:?}", due_in);
        }
    }

    #[test]
    fn critical_and_urgent_counters() {
        let now = Utc::now();
        let policy = WorkloadPolicy::default();

        let tickets = vec![
            ticket_due(Some(Duration::hours(-5)), now),
            ticket_due(Some(Duration::hours(1)), now),
            ticket_due(Some(Duration::hours(10)), now),
            ticket_due(Some(Duration::hours(50)), now),
        ];
        let tasks = vec![
            task_due(Some(Duration::hours(-1)), now),
            task_due(Some(Duration::hours(3)), now),
        ];

        let load = calculate_weighted_load(&tickets, &tasks, now, &policy);
        assert_eq!(load.critical_items, 2);
        assert_eq!(load.urgent_items, 3);
        assert_eq!(load.total_weight, 10 + 7 + 5 + 3 + 8 + 5);
    }

    #[test]
    fn average_weight_rounds_to_two_decimals() {
        let now = Utc::now();
        let policy = WorkloadPolicy::default();

        let tickets = vec![
            ticket_due(Some(Duration::hours(-1)), now),
            ticket_due(None, now),
            ticket_due(None, now),
        ];
        // 12 / 3 items
        let load = calculate_weighted_load(&tickets, &[], now, &policy);
        assert_eq!(load.average_weight, 4.0);

        let tickets = vec![ticket_due(Some(Duration::hours(-1)), now), ticket_due(None, now)];
        let tasks = vec![task_due(Some(Duration::hours(12)), now)];
        // (10 + 1 + 5) / 3 = 5.333...
        let load = calculate_weighted_load(&tickets, &tasks, now, &policy);
        assert_eq!(load.average_weight, 5.33);
    }

    #[test]
    fn no_items_means_zero_average() {
        let now = Utc::now();
        let load = calculate_weighted_load(&[], &[], now, &WorkloadPolicy::default());
        assert_eq!(load.total_weight, 0);
        assert_eq!(load.average_weight, 0.0);
    }
}
