pub mod claimer;
pub mod http;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod fake;

pub use claimer::{AccountClaimer, AccountSummary, ClaimConfig};
pub use http::{DEFAULT_BASE_URL, DEFAULT_ORIGIN, HttpClient, RewardApi};
pub use scheduler::{CycleReport, ScheduleConfig, Scheduler, Shutdown, StopReason};
