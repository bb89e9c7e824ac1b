//! Task Aggregate
//!
//! Tasks are lightweight work items, optionally linked to a ticket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::events::{DomainEvent, TaskEvent};
use crate::domain::value_objects::{Priority, TaskId, TicketId, UserId};

/// Canonical task vocabulary. `pending` and `completed` are accepted on the
/// wire as legacy aliases for `todo` and `done`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    #[serde(alias = "pending")]
    Todo,
    InProgress,
    Review,
    #[serde(alias = "completed")]
    Done,
    Cancelled,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assigned_to: Option<UserId>,
    pub ticket_id: Option<TicketId>,
    pub deadline: Option<DateTime<Utc>>,
    pub estimated_hours: Option<f64>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl Task {
    pub fn create(title: impl Into<String>) -> Self {
        let now = Utc::now();
        let id = TaskId::new();
        let mut task = Self {
            id,
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            assigned_to: None,
            ticket_id: None,
            deadline: None,
            estimated_hours: None,
            tags: vec![],
            created_at: now,
            updated_at: now,
            is_deleted: false,
            events: vec![],
        };
        task.raise(DomainEvent::Task(TaskEvent::Created { task_id: id }));
        task
    }

    /// Active tasks count toward a user's workload.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
            && matches!(
                self.status,
                TaskStatus::Todo | TaskStatus::InProgress | TaskStatus::Review
            )
    }

    pub fn assign(&mut self, assignee: UserId) {
        self.assigned_to = Some(assignee);
        self.touch();
        self.raise(DomainEvent::Task(TaskEvent::Assigned {
            task_id: self.id,
            assignee_id: assignee,
        }));
    }

    pub fn start(&mut self) {
        if self.status == TaskStatus::Todo {
            self.status = TaskStatus::InProgress;
            self.touch();
        }
    }

    pub fn move_to_review(&mut self) {
        if self.status == TaskStatus::InProgress {
            self.status = TaskStatus::Review;
            self.touch();
        }
    }

    pub fn complete(&mut self) {
        self.status = TaskStatus::Done;
        self.touch();
        self.raise(DomainEvent::Task(TaskEvent::Completed { task_id: self.id }));
    }

    pub fn cancel(&mut self) {
        self.status = TaskStatus::Cancelled;
        self.touch();
        self.raise(DomainEvent::Task(TaskEvent::Cancelled { task_id: self.id }));
    }

    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
        self.touch();
    }

    pub fn link_ticket(&mut self, ticket_id: TicketId) {
        self.ticket_id = Some(ticket_id);
        self.touch();
    }

    /// Drain events raised since the last call, for broadcast.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise(&mut self, event: DomainEvent) {
        self.events.push(event);
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_workflow() {
        let mut task = Task::create("Replace toner");
        task.start();
        assert_eq!(task.status, TaskStatus::InProgress);
        task.move_to_review();
        assert_eq!(task.status, TaskStatus::Review);
        assert!(task.is_active());

        task.complete();
        assert_eq!(task.status, TaskStatus::Done);
        assert!(!task.is_active());
    }

    #[test]
    fn cancelled_and_deleted_tasks_are_inactive() {
        let mut cancelled = Task::create("Obsolete migration");
        cancelled.cancel();
        assert!(!cancelled.is_active());

        let mut deleted = Task::create("Duplicate entry");
        deleted.soft_delete();
        assert!(!deleted.is_active());
    }

    #[test]
    fn tasks_link_to_their_ticket() {
        let mut task = Task::create("Investigate alert");
        let ticket_id = TicketId::new();
        task.link_ticket(ticket_id);
        assert_eq!(task.ticket_id, Some(ticket_id));
    }

    #[test]
    fn legacy_status_aliases_deserialize() {
        let status: TaskStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, TaskStatus::Todo);
        let status: TaskStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, TaskStatus::Done);
    }

    #[test]
    fn completion_raises_event() {
        let mut task = Task::create("Write runbook");
        task.complete();
        let names: Vec<_> = task.take_events().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["task:created", "task:completed"]);
    }
}
