//! OpenDesk Ticket & Task Platform
//!
//! Self-hosted ticket and task tracking core shared by the OpenDesk services.
//!
//! ## Features
//! - Ticket lifecycle with assignment, resolution and SLA due dates
//! - Lightweight task tracking linked to tickets
//! - Domain events for real-time fan-out
//! - Repository ports with embedded in-memory implementations

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::aggregates::{Task, TaskStatus, Ticket, TicketStatus};
pub use domain::events::{DomainEvent, TaskEvent, TicketEvent};
pub use domain::value_objects::{Category, Priority, Source, TaskId, TicketId, UserId};
pub use infrastructure::persistence::{
    InMemoryTaskRepository, InMemoryTicketRepository, NoOpEventPublisher,
};
pub use ports::{EventPublisher, RepositoryError, TaskRepository, TicketRepository};
