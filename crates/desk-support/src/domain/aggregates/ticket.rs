//! Ticket Aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::events::{DomainEvent, TicketEvent};
use crate::domain::value_objects::{Category, Priority, Source, TicketId, UserId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    Assigned,
    InProgress,
    Resolved,
    Closed,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub number: u64,
    pub subject: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: Priority,
    pub category: Category,
    pub source: Source,
    pub assigned_to: Option<UserId>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    /// Estimated effort to resolution, in hours.
    pub estimated_resolution_hours: Option<f64>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl Ticket {
    pub fn create(number: u64, subject: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        let id = TicketId::new();
        let mut ticket = Self {
            id,
            number,
            subject: subject.into(),
            description: description.into(),
            status: TicketStatus::Open,
            priority: Priority::Medium,
            category: Category::Other,
            source: Source::Web,
            assigned_to: None,
            assigned_at: None,
            due_date: None,
            estimated_resolution_hours: None,
            resolved_at: None,
            created_at: now,
            updated_at: now,
            is_deleted: false,
            events: vec![],
        };
        ticket.raise(DomainEvent::Ticket(TicketEvent::Created { ticket_id: id, number }));
        ticket
    }

    /// Active tickets count toward a user's workload.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
            && matches!(
                self.status,
                TicketStatus::Open | TicketStatus::Assigned | TicketStatus::InProgress
            )
    }

    pub fn assign(&mut self, assignee: UserId) {
        self.assigned_to = Some(assignee);
        self.assigned_at = Some(Utc::now());
        if self.status == TicketStatus::Open {
            self.status = TicketStatus::Assigned;
        }
        self.touch();
        self.raise(DomainEvent::Ticket(TicketEvent::Assigned {
            ticket_id: self.id,
            assignee_id: assignee,
        }));
    }

    pub fn start_progress(&mut self) {
        if matches!(self.status, TicketStatus::Open | TicketStatus::Assigned) {
            self.status = TicketStatus::InProgress;
            self.touch();
        }
    }

    pub fn resolve(&mut self) {
        self.status = TicketStatus::Resolved;
        self.resolved_at = Some(Utc::now());
        self.touch();
        self.raise(DomainEvent::Ticket(TicketEvent::Resolved { ticket_id: self.id }));
    }

    pub fn close(&mut self) {
        self.status = TicketStatus::Closed;
        self.touch();
    }

    pub fn reopen(&mut self) {
        if matches!(self.status, TicketStatus::Resolved | TicketStatus::Closed) {
            self.status = TicketStatus::Open;
            self.resolved_at = None;
            self.touch();
            self.raise(DomainEvent::Ticket(TicketEvent::Reopened { ticket_id: self.id }));
        }
    }

    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
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
    fn assignment_moves_open_ticket_to_assigned() {
        let mut ticket = Ticket::create(1001, "VPN down", "Cannot connect since 9am");
        let agent = UserId::new();
        ticket.assign(agent);

        assert_eq!(ticket.status, TicketStatus::Assigned);
        assert_eq!(ticket.assigned_to, Some(agent));
        assert!(ticket.assigned_at.is_some());
    }

    #[test]
    fn resolve_and_reopen_cycle() {
        let mut ticket = Ticket::create(1002, "Printer jam", "");
        ticket.resolve();
        assert_eq!(ticket.status, TicketStatus::Resolved);
        assert!(ticket.resolved_at.is_some());
        assert!(!ticket.is_active());

        ticket.reopen();
        assert_eq!(ticket.status, TicketStatus::Open);
        assert!(ticket.resolved_at.is_none());
        assert!(ticket.is_active());
    }

    #[test]
    fn soft_deleted_ticket_is_not_active() {
        let mut ticket = Ticket::create(1003, "Laptop request", "");
        assert!(ticket.is_active());
        ticket.soft_delete();
        assert!(!ticket.is_active());
    }

    #[test]
    fn transitions_raise_events_in_order() {
        let mut ticket = Ticket::create(1004, "Access request", "");
        let agent = UserId::new();
        ticket.assign(agent);
        ticket.resolve();

        let names: Vec<_> = ticket.take_events().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["ticket:created", "ticket:assigned", "ticket:resolved"]);
        assert!(ticket.take_events().is_empty());
    }
}
