use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::OptimizationError;
use crate::models::{Booking, OptimizationRecord, ProviderCalendar};

/// Persistence boundary. The engine never talks to a database directly; the
/// surrounding application supplies an implementation of this trait.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Bookings scheduled on `date`, optionally narrowed to one provider.
    async fn bookings_for_date(
        &self,
        practice_id: Uuid,
        date: NaiveDate,
        provider_id: Option<Uuid>,
    ) -> Result<Vec<Booking>, OptimizationError>;

    /// Working calendars for the practice's providers, in a stable order the
    /// store must preserve across calls for the same date.
    async fn provider_calendars(
        &self,
        practice_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<(Uuid, ProviderCalendar)>, OptimizationError>;

    async fn booking_by_id(&self, id: Uuid) -> Result<Option<Booking>, OptimizationError>;

    /// Whether the provider already has a booking at exactly `time`.
    async fn has_booking_at(
        &self,
        provider_id: Uuid,
        time: DateTime<Utc>,
    ) -> Result<bool, OptimizationError>;

    async fn save_optimization(
        &self,
        record: &OptimizationRecord,
    ) -> Result<(), OptimizationError>;

    async fn load_optimization(
        &self,
        id: Uuid,
    ) -> Result<Option<OptimizationRecord>, OptimizationError>;

    async fn mark_applied(
        &self,
        id: Uuid,
        applied_by: &str,
        applied_at: DateTime<Utc>,
    ) -> Result<(), OptimizationError>;
}
