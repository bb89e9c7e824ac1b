//! OpenDesk Workload Engine
//!
//! Derives per-user and per-team workload reports from the ticket and task
//! stores: SLA classification against due dates, metric aggregation,
//! deadline-weighted load, a bounded 0-100 workload score, and assignment
//! recommendations.
//!
//! Reports are ephemeral: each one is a pure function of the current
//! ticket/task snapshot and the wall clock at computation time. Nothing here
//! is cached or persisted, so a report can be stale the moment it returns;
//! that best-effort snapshot is the contract.

use thiserror::Error;

use desk_support::RepositoryError;

pub mod load;
pub mod metrics;
pub mod policy;
pub mod recommend;
pub mod report;
pub mod score;
pub mod service;
pub mod sla;

pub use load::{calculate_weighted_load, WeightedLoad};
pub use metrics::{
    aggregate_task_metrics, aggregate_ticket_metrics, PriorityCounts, SlaCounts, TaskMetrics,
    TaskStatusCounts, TicketMetrics, TicketStatusCounts,
};
pub use policy::WorkloadPolicy;
pub use recommend::{recommend, Recommendation, RecommendationKind};
pub use report::{
    SlaBreakdown, SlaTicketRef, TeamMemberSummary, TeamStats, TeamWorkloadReport,
    WorkloadBreakdown, WorkloadReport, WorkloadSummary,
};
pub use score::{workload_score, WorkloadLevel};
pub use service::WorkloadService;
pub use sla::SlaState;

/// Engine-level failures. Component computations are total functions; only
/// the orchestrator's I/O boundary can fail.
#[derive(Error, Debug)]
pub enum WorkloadError {
    /// Team workload was requested for an empty member list.
    #[error("team workload requires at least one user id")]
    EmptyTeam,

    /// The ticket/task fetch failed upstream. No retry is attempted here;
    /// retry policy belongs to the repository or its caller.
    #[error("workload calculation failed")]
    Fetch(#[from] RepositoryError),
}

pub type Result<T> = std::result::Result<T, WorkloadError>;
