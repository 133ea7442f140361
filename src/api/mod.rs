mod types;
mod client;
mod error;
pub mod time;

pub use types::*;
pub use client::PlannerClient;
pub use error::{is_offline, is_unauthorized, ApiError};
