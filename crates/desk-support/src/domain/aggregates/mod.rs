pub mod task;
pub mod ticket;

pub use task::{Task, TaskStatus};
pub use ticket::{Ticket, TicketStatus};
