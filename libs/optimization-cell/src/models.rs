// libs/optimization-cell/src/models.rs
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use risk_cell::BookingAttributes;

// ==============================================================================
// CORE SCHEDULING MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub patient_id: Uuid,
    pub scheduled_time: DateTime<Utc>,
    pub duration_minutes: i32,
    pub booking_type: String,
    pub booked_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reminder_sent: bool,
}

impl Booking {
    /// Feature payload handed to the risk boundary. Patient history fields
    /// keep their typed defaults since the booking record does not carry them.
    pub fn risk_attributes(&self) -> BookingAttributes {
        BookingAttributes {
            booking_id: self.id,
            scheduled_time: self.scheduled_time,
            booked_at: self.booked_at,
            duration_minutes: self.duration_minutes,
            booking_type: self.booking_type.clone(),
            patient_no_show_rate: 0.1,
            patient_total_bookings: 0,
            patient_cancellation_rate: 0.0,
            reminder_sent: self.reminder_sent,
        }
    }
}

/// One provider's working hours for a day, walked in fixed steps by the slot
/// builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderCalendar {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub slot_duration_minutes: i32,
}

/// A contiguous `[start, end)` interval of one provider's calendar, the unit
/// of capacity decisions. Immutable once built; the optimizer produces a new
/// sequence rather than mutating in place so original and optimized schedules
/// stay independently inspectable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub provider_id: Uuid,
    pub bookings: Vec<Booking>,
    pub capacity: i32,
    pub buffer_minutes: i32,
}

impl TimeSlot {
    pub fn occupancy(&self) -> f64 {
        if self.capacity <= 0 {
            return 1.0;
        }
        self.bookings.len() as f64 / self.capacity as f64
    }

    pub fn has_open_capacity(&self) -> bool {
        (self.bookings.len() as i32) < self.capacity
    }

    /// Copy of this slot with a new capacity; everything else carries over.
    pub fn with_capacity(&self, capacity: i32) -> Self {
        Self {
            capacity,
            ..self.clone()
        }
    }
}

// ==============================================================================
// OPTIMIZER CONFIGURATION
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationStrategy {
    Conservative,
    Balanced,
    Aggressive,
}

impl OptimizationStrategy {
    pub fn overbook_factor(&self) -> f64 {
        match self {
            OptimizationStrategy::Aggressive => 1.2,
            OptimizationStrategy::Conservative => 0.8,
            OptimizationStrategy::Balanced => 1.0,
        }
    }
}

impl std::str::FromStr for OptimizationStrategy {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "conservative" => Ok(OptimizationStrategy::Conservative),
            "balanced" => Ok(OptimizationStrategy::Balanced),
            "aggressive" => Ok(OptimizationStrategy::Aggressive),
            other => Err(format!("unknown optimization strategy '{}'", other)),
        }
    }
}

impl fmt::Display for OptimizationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizationStrategy::Conservative => write!(f, "conservative"),
            OptimizationStrategy::Balanced => write!(f, "balanced"),
            OptimizationStrategy::Aggressive => write!(f, "aggressive"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    pub max_overbook_pct: f64,
    pub min_no_show_threshold: f64,
    pub buffer_minutes: i32,
    pub strategy: OptimizationStrategy,
    /// Revenue model: currency value of one filled slot and the fraction of
    /// added capacity expected to fill.
    pub avg_booking_value: f64,
    pub fill_rate: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_overbook_pct: 0.15,
            min_no_show_threshold: 0.10,
            buffer_minutes: 5,
            strategy: OptimizationStrategy::Balanced,
            avg_booking_value: 150.0,
            fill_rate: 0.7,
        }
    }
}

impl OptimizerConfig {
    /// Service-level defaults from the environment; an unparsable strategy
    /// name falls back to balanced.
    pub fn from_app_config(config: &shared_config::AppConfig) -> Self {
        Self {
            max_overbook_pct: config.max_overbook_pct,
            min_no_show_threshold: config.min_no_show_threshold,
            buffer_minutes: config.buffer_minutes,
            strategy: config
                .strategy
                .parse()
                .unwrap_or(OptimizationStrategy::Balanced),
            avg_booking_value: config.avg_booking_value,
            fill_rate: config.fill_rate,
        }
    }
}

// ==============================================================================
// OPTIMIZATION OUTPUT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Change {
    OverbookAdded {
        time_slot: DateTime<Utc>,
        provider_id: Uuid,
        additional_capacity: i32,
        reason: String,
    },
    BufferAdjusted {
        time_slot: DateTime<Utc>,
        provider_id: Uuid,
        new_buffer: i32,
        old_buffer: i32,
    },
}

/// Slot as persisted downstream: the interval, its bookings, and the decided
/// capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotSummary {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub bookings: Vec<Booking>,
    pub capacity: i32,
    pub buffer_minutes: i32,
}

impl From<&TimeSlot> for SlotSummary {
    fn from(slot: &TimeSlot) -> Self {
        Self {
            start: slot.start,
            end: slot.end,
            bookings: slot.bookings.clone(),
            capacity: slot.capacity,
            buffer_minutes: slot.buffer_minutes,
        }
    }
}

/// Ordered list of one provider's slots. A vector of these rather than a map
/// keeps provider iteration order deterministic for diffing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSchedule {
    pub provider_id: Uuid,
    pub slots: Vec<SlotSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub original_schedule: Vec<ProviderSchedule>,
    pub optimized_schedule: Vec<ProviderSchedule>,
    pub changes: Vec<Change>,
    pub predicted_revenue_gain: f64,
    pub optimization_score: f64,
    pub recommendations: Vec<String>,
}

/// A stored optimization run, persisted by the caller and later marked as
/// applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRecord {
    pub id: Uuid,
    pub practice_id: Uuid,
    pub provider_id: Option<Uuid>,
    pub optimization_date: NaiveDate,
    pub result: OptimizationResult,
    pub is_applied: bool,
    pub applied_at: Option<DateTime<Utc>>,
    pub applied_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub practice_id: Uuid,
    pub date: NaiveDate,
    pub provider_id: Option<Uuid>,
    pub config: OptimizerConfig,
}

// ==============================================================================
// RESCHEDULING MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReschedulePreferences {
    /// Hours of day (0-23) the patient prefers.
    pub preferred_hours: Vec<u32>,
    /// Days of week the patient prefers, 0 = Monday.
    pub preferred_days: Vec<u32>,
}

impl Default for ReschedulePreferences {
    fn default() -> Self {
        Self {
            preferred_hours: vec![9, 10, 11, 14, 15],
            preferred_days: vec![1, 2, 3, 4, 5],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleSuggestion {
    pub time: DateTime<Utc>,
    pub provider_id: Uuid,
    pub confidence: f64,
}

/// Knobs for the multi-day availability scan. The scan budget is a separate
/// parameter from the ranked advisor's top-N; the two are never one constant.
#[derive(Debug, Clone)]
pub struct DayScanOptions {
    pub days_ahead: u32,
    pub scan_budget: usize,
}

impl Default for DayScanOptions {
    fn default() -> Self {
        Self {
            days_ahead: 7,
            scan_budget: 5,
        }
    }
}

// ==============================================================================
// REAL-TIME RECOMMENDATION MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    HighRiskAlert,
    OptimizationOpportunity,
    CapacityAlert,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRecommendation {
    pub kind: RecommendationKind,
    pub priority: RecommendationPriority,
    pub message: String,
    pub action: String,
}
