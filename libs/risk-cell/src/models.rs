// libs/risk-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==============================================================================
// RISK CLASSIFICATION
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Threshold table shared with downstream consumers; any predictor sitting
    /// behind the [`NoShowPredictor`](crate::services::NoShowPredictor) trait
    /// must classify with exactly these boundaries.
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.15 {
            RiskLevel::Low
        } else if probability < 0.35 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// A named contribution to a prediction, for explainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    pub impact: f64,
}

/// Output contract of the prediction boundary: a probability in [0, 1] plus
/// an explanation payload with at most [`MAX_TOP_FACTORS`] factors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub probability: f64,
    pub risk_level: RiskLevel,
    pub top_factors: Vec<RiskFactor>,
}

pub const MAX_TOP_FACTORS: usize = 5;

// ==============================================================================
// PREDICTION INPUT
// ==============================================================================

/// The booking attributes a predictor may draw on. History fields carry typed
/// defaults so callers that lack patient history still get a usable input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingAttributes {
    pub booking_id: Uuid,
    pub scheduled_time: DateTime<Utc>,
    pub booked_at: Option<DateTime<Utc>>,
    pub duration_minutes: i32,
    pub booking_type: String,
    #[serde(default = "default_no_show_rate")]
    pub patient_no_show_rate: f64,
    #[serde(default)]
    pub patient_total_bookings: i32,
    #[serde(default)]
    pub patient_cancellation_rate: f64,
    #[serde(default)]
    pub reminder_sent: bool,
}

fn default_no_show_rate() -> f64 {
    0.1
}

impl BookingAttributes {
    /// Days between booking creation and the scheduled time; zero when the
    /// booking timestamp is unknown.
    pub fn lead_time_days(&self) -> i64 {
        self.booked_at
            .map(|booked| (self.scheduled_time - booked).num_days().max(0))
            .unwrap_or(0)
    }
}
