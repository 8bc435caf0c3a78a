//! Business logic services
//!
//! Services borrow a `ServiceContext` and orchestrate the repository traits.

pub mod context;
pub mod error;
pub mod history;
pub mod send_rate;

#[cfg(test)]
mod in_memory;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use history::{MessageHistoryService, MessagePage};
pub use send_rate::{SendRateCounts, SendRateService};
