use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum OptimizationError {
    #[error("Invalid calendar for provider {provider_id}: {reason}")]
    Configuration { provider_id: Uuid, reason: String },

    #[error("No bookings found for {date}")]
    EmptyInput { date: NaiveDate },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Optimization {0} has already been applied")]
    AlreadyApplied(Uuid),

    #[error("Store error: {0}")]
    Store(String),
}
