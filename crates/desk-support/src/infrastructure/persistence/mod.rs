//! In-memory repository implementations
//!
//! Embedded stores for tests and single-node deployments.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::aggregates::{Task, Ticket};
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::{TaskId, TicketId, UserId};
use crate::ports::{EventPublisher, RepositoryError, TaskRepository, TicketRepository};

/// In-memory ticket repository
#[derive(Default)]
pub struct InMemoryTicketRepository {
    tickets: DashMap<TicketId, Ticket>,
}

impl InMemoryTicketRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, RepositoryError> {
        Ok(self.tickets.get(id).map(|t| t.value().clone()))
    }

    async fn find_active_by_assignee(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Ticket>, RepositoryError> {
        Ok(self
            .tickets
            .iter()
            .filter(|t| t.is_active() && t.assigned_to == Some(*user_id))
            .map(|t| t.value().clone())
            .collect())
    }

    async fn save(&self, ticket: &Ticket) -> Result<(), RepositoryError> {
        debug!(ticket = %ticket.id, number = ticket.number, "saving ticket");
        self.tickets.insert(ticket.id, ticket.clone());
        Ok(())
    }
}

/// In-memory task repository
#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: DashMap<TaskId, Task>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, RepositoryError> {
        Ok(self.tasks.get(id).map(|t| t.value().clone()))
    }

    async fn find_active_by_assignee(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Task>, RepositoryError> {
        Ok(self
            .tasks
            .iter()
            .filter(|t| t.is_active() && t.assigned_to == Some(*user_id))
            .map(|t| t.value().clone())
            .collect())
    }

    async fn save(&self, task: &Task) -> Result<(), RepositoryError> {
        debug!(task = %task.id, "saving task");
        self.tasks.insert(task.id, task.clone());
        Ok(())
    }
}

/// Event publisher that drops events, for tests and embedded use.
#[derive(Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), RepositoryError> {
        for event in &events {
            debug!(event = event.name(), "dropping event (no-op publisher)");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_and_find_ticket() {
        let repo = InMemoryTicketRepository::new();
        let ticket = Ticket::create(2001, "Broken badge reader", "");
        repo.save(&ticket).await.unwrap();

        let found = repo.find_by_id(&ticket.id).await.unwrap();
        assert_eq!(found.map(|t| t.number), Some(2001));
    }

    #[tokio::test]
    async fn active_filter_excludes_resolved_and_deleted() {
        let repo = InMemoryTicketRepository::new();
        let agent = UserId::new();

        let mut open = Ticket::create(1, "Open", "");
        open.assign(agent);
        repo.save(&open).await.unwrap();

        let mut resolved = Ticket::create(2, "Resolved", "");
        resolved.assign(agent);
        resolved.resolve();
        repo.save(&resolved).await.unwrap();

        let mut deleted = Ticket::create(3, "Deleted", "");
        deleted.assign(agent);
        deleted.soft_delete();
        repo.save(&deleted).await.unwrap();

        let mut other = Ticket::create(4, "Someone else's", "");
        other.assign(UserId::new());
        repo.save(&other).await.unwrap();

        let active = repo.find_active_by_assignee(&agent).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].number, 1);
    }

    #[tokio::test]
    async fn active_filter_excludes_done_tasks() {
        let repo = InMemoryTaskRepository::new();
        let agent = UserId::new();

        let mut todo = Task::create("Todo");
        todo.assign(agent);
        repo.save(&todo).await.unwrap();

        let mut done = Task::create("Done");
        done.assign(agent);
        done.complete();
        repo.save(&done).await.unwrap();

        let mut cancelled = Task::create("Cancelled");
        cancelled.assign(agent);
        cancelled.cancel();
        repo.save(&cancelled).await.unwrap();

        let active = repo.find_active_by_assignee(&agent).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "Todo");
    }

    #[tokio::test]
    async fn no_op_publisher_accepts_events() {
        let publisher = NoOpEventPublisher;
        let mut ticket = Ticket::create(5, "Event source", "");
        ticket.resolve();
        publisher.publish(ticket.take_events()).await.unwrap();
    }
}
