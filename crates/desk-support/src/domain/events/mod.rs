//! Domain events raised by aggregate state transitions.
//!
//! Event names follow the `entity:action` convention used on the broadcast
//! channel, e.g. `ticket:assigned`.

use serde::Serialize;

use crate::domain::value_objects::{TaskId, TicketId, UserId};

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum DomainEvent {
    Ticket(TicketEvent),
    Task(TaskEvent),
}

impl DomainEvent {
    /// Broadcast event name for this event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ticket(e) => e.name(),
            Self::Task(e) => e.name(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketEvent {
    Created { ticket_id: TicketId, number: u64 },
    Assigned { ticket_id: TicketId, assignee_id: UserId },
    Resolved { ticket_id: TicketId },
    Reopened { ticket_id: TicketId },
}

impl TicketEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Created { .. } => "ticket:created",
            Self::Assigned { .. } => "ticket:assigned",
            Self::Resolved { .. } => "ticket:resolved",
            Self::Reopened { .. } => "ticket:reopened",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskEvent {
    Created { task_id: TaskId },
    Assigned { task_id: TaskId, assignee_id: UserId },
    Completed { task_id: TaskId },
    Cancelled { task_id: TaskId },
}

impl TaskEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Created { .. } => "task:created",
            Self::Assigned { .. } => "task:assigned",
            Self::Completed { .. } => "task:completed",
            Self::Cancelled { .. } => "task:cancelled",
        }
    }
}
