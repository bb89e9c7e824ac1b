//! Workload service
//!
//! Orchestrates the engine: fetches a user's active items through the
//! repository ports, drives the pure computation stages, and assembles the
//! report. Holds no state of its own beyond the injected ports and policy.

use std::sync::Arc;

use chrono::Utc;
use futures_util::future::try_join_all;
use tracing::{debug, instrument};

use desk_support::{Task, TaskRepository, Ticket, TicketRepository, UserId};

use crate::load::calculate_weighted_load;
use crate::metrics::{aggregate_task_metrics, aggregate_ticket_metrics};
use crate::policy::WorkloadPolicy;
use crate::recommend::recommend;
use crate::report::{
    round1, PriorityBreakdown, SlaBreakdown, StatusBreakdown, TeamMemberSummary, TeamStats,
    TeamWorkloadReport, WorkloadBreakdown, WorkloadReport, WorkloadSummary,
};
use crate::score::{workload_score, WorkloadLevel};
use crate::{Result, WorkloadError};

pub struct WorkloadService {
    tickets: Arc<dyn TicketRepository>,
    tasks: Arc<dyn TaskRepository>,
    policy: WorkloadPolicy,
}

impl WorkloadService {
    pub fn new(tickets: Arc<dyn TicketRepository>, tasks: Arc<dyn TaskRepository>) -> Self {
        Self::with_policy(tickets, tasks, WorkloadPolicy::default())
    }

    pub fn with_policy(
        tickets: Arc<dyn TicketRepository>,
        tasks: Arc<dyn TaskRepository>,
        policy: WorkloadPolicy,
    ) -> Self {
        Self { tickets, tasks, policy }
    }

    /// Compute a user's workload report from a fresh snapshot of their
    /// active tickets and tasks. Fails whole if either fetch fails; there is
    /// no partial report.
    #[instrument(skip(self))]
    pub async fn calculate_user_workload(&self, user_id: UserId) -> Result<WorkloadReport> {
        let (tickets, tasks) = tokio::join!(
            self.tickets.find_active_by_assignee(&user_id),
            self.tasks.find_active_by_assignee(&user_id),
        );
        let tickets = tickets.map_err(WorkloadError::Fetch)?;
        let tasks = tasks.map_err(WorkloadError::Fetch)?;

        // One snapshot of the clock for every derived figure in the report.
        let now = Utc::now();

        let ticket_metrics = aggregate_ticket_metrics(&tickets, now, &self.policy);
        let task_metrics = aggregate_task_metrics(&tasks, now, &self.policy);
        let load = calculate_weighted_load(&tickets, &tasks, now, &self.policy);
        let estimated_hours = total_estimated_hours(&tickets, &tasks);

        let score = workload_score(
            &ticket_metrics,
            &task_metrics,
            &load,
            estimated_hours,
            &self.policy,
        );
        let level = WorkloadLevel::from_score(score, &self.policy);
        let recommendations = recommend(score, &ticket_metrics, &task_metrics, &self.policy);

        debug!(
            %user_id,
            score,
            level = ?level,
            tickets = tickets.len(),
            tasks = tasks.len(),
            "workload computed"
        );

        Ok(WorkloadReport {
            user_id,
            generated_at: now,
            summary: WorkloadSummary {
                total_tickets: ticket_metrics.total,
                total_tasks: task_metrics.total,
                total_items: ticket_metrics.total + task_metrics.total,
                estimated_hours,
                workload_score: score,
                workload_level: level,
            },
            breakdown: WorkloadBreakdown {
                by_priority: PriorityBreakdown::from_counts(
                    &ticket_metrics.by_priority,
                    &task_metrics.by_priority,
                ),
                by_status: StatusBreakdown {
                    tickets: ticket_metrics.by_status.clone(),
                    tasks: task_metrics.by_status.clone(),
                },
                by_sla: SlaBreakdown::collect(&tickets, now, &self.policy),
            },
            tickets: ticket_metrics,
            tasks: task_metrics,
            sla: load,
            recommendations,
        })
    }

    /// Team overview: one report per member, computed concurrently, joined
    /// all-or-nothing. One failing member fails the whole call; there is no
    /// partial aggregation.
    #[instrument(skip(self))]
    pub async fn get_team_workload(&self, user_ids: &[UserId]) -> Result<TeamWorkloadReport> {
        if user_ids.is_empty() {
            return Err(WorkloadError::EmptyTeam);
        }

        let reports = try_join_all(
            user_ids
                .iter()
                .map(|user_id| self.calculate_user_workload(*user_id)),
        )
        .await?;

        let total_score: u32 = reports
            .iter()
            .map(|r| u32::from(r.summary.workload_score))
            .sum();
        let stats = TeamStats {
            total_members: reports.len() as u32,
            total_tickets: reports.iter().map(|r| r.summary.total_tickets).sum(),
            total_tasks: reports.iter().map(|r| r.summary.total_tasks).sum(),
            average_workload_score: (total_score as f64 / reports.len() as f64).round() as u8,
            overloaded_members: reports
                .iter()
                .filter(|r| r.summary.workload_level == WorkloadLevel::Overloaded)
                .count() as u32,
            capacity_members: reports
                .iter()
                .filter(|r| r.summary.workload_level == WorkloadLevel::Low)
                .count() as u32,
        };

        let members = reports.iter().map(TeamMemberSummary::from_report).collect();
        Ok(TeamWorkloadReport { stats, members })
    }
}

fn total_estimated_hours(tickets: &[Ticket], tasks: &[Task]) -> f64 {
    let ticket_hours: f64 = tickets
        .iter()
        .filter_map(|t| t.estimated_resolution_hours)
        .sum();
    let task_hours: f64 = tasks.iter().filter_map(|t| t.estimated_hours).sum();
    round1(ticket_hours + task_hours)
}
