//! Outbound ports
//!
//! Interfaces the surrounding infrastructure must implement: persistence
//! queries and the broadcast channel.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::aggregates::{Task, Ticket};
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::{TaskId, TicketId, UserId};

/// Ticket repository port
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Find ticket by ID
    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, RepositoryError>;

    /// Active tickets assigned to a user: status open/assigned/in_progress,
    /// soft-deleted records excluded.
    async fn find_active_by_assignee(&self, user_id: &UserId)
        -> Result<Vec<Ticket>, RepositoryError>;

    /// Save ticket (insert or update)
    async fn save(&self, ticket: &Ticket) -> Result<(), RepositoryError>;
}

/// Task repository port
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Find task by ID
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, RepositoryError>;

    /// Active tasks assigned to a user: status todo/in_progress/review,
    /// soft-deleted records excluded.
    async fn find_active_by_assignee(&self, user_id: &UserId)
        -> Result<Vec<Task>, RepositoryError>;

    /// Save task (insert or update)
    async fn save(&self, task: &Task) -> Result<(), RepositoryError>;
}

/// Broadcast port for domain events.
///
/// Best-effort fan-out: callers log publish failures and never let them
/// propagate into request handling.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), RepositoryError>;
}

/// Upstream persistence failure
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,

    #[error("query error: {0}")]
    Query(String),

    #[error("connection error: {0}")]
    Connection(String),
}
