use async_trait::async_trait;
use chrono::{Datelike, Timelike, Weekday};
use tracing::debug;

use crate::error::PredictionError;
use crate::models::{BookingAttributes, RiskAssessment, RiskFactor, RiskLevel, MAX_TOP_FACTORS};

/// Boundary to whatever model produces no-show probabilities. The optimizer
/// depends only on this trait and the [`RiskAssessment`] it returns, never on
/// how the probability is produced.
#[async_trait]
pub trait NoShowPredictor: Send + Sync {
    async fn predict(
        &self,
        attributes: &BookingAttributes,
    ) -> Result<RiskAssessment, PredictionError>;
}

/// Deterministic rule-based predictor. Stands in for the external model so the
/// engine runs end to end without one; each rule mirrors a feature the trained
/// model weights in the same direction.
#[derive(Debug, Clone, Default)]
pub struct HeuristicPredictor;

impl HeuristicPredictor {
    pub fn new() -> Self {
        Self
    }

    fn contributions(attributes: &BookingAttributes) -> Vec<RiskFactor> {
        let mut factors = vec![RiskFactor {
            name: "patient_no_show_rate".to_string(),
            impact: attributes.patient_no_show_rate,
        }];

        let hour = attributes.scheduled_time.hour();
        if hour >= 17 {
            factors.push(RiskFactor {
                name: "evening_slot".to_string(),
                impact: 0.04,
            });
        } else if hour < 9 {
            factors.push(RiskFactor {
                name: "early_morning_slot".to_string(),
                impact: 0.02,
            });
        }

        match attributes.scheduled_time.weekday() {
            Weekday::Mon => factors.push(RiskFactor {
                name: "monday_booking".to_string(),
                impact: 0.02,
            }),
            Weekday::Fri => factors.push(RiskFactor {
                name: "friday_booking".to_string(),
                impact: 0.01,
            }),
            _ => {}
        }

        let lead_days = attributes.lead_time_days();
        if lead_days == 0 && attributes.booked_at.is_some() {
            factors.push(RiskFactor {
                name: "same_day_booking".to_string(),
                impact: -0.03,
            });
        } else if lead_days > 7 {
            factors.push(RiskFactor {
                name: "long_lead_time".to_string(),
                impact: 0.05,
            });
        }

        if attributes.reminder_sent {
            factors.push(RiskFactor {
                name: "reminder_sent".to_string(),
                impact: -0.05,
            });
        }

        if attributes.patient_cancellation_rate > 0.0 {
            factors.push(RiskFactor {
                name: "cancellation_history".to_string(),
                impact: attributes.patient_cancellation_rate * 0.3,
            });
        }

        if attributes.patient_total_bookings == 0 {
            factors.push(RiskFactor {
                name: "new_patient".to_string(),
                impact: 0.03,
            });
        }

        factors
    }
}

#[async_trait]
impl NoShowPredictor for HeuristicPredictor {
    async fn predict(
        &self,
        attributes: &BookingAttributes,
    ) -> Result<RiskAssessment, PredictionError> {
        if !(0.0..=1.0).contains(&attributes.patient_no_show_rate) {
            return Err(PredictionError::InvalidAttributes(format!(
                "patient_no_show_rate {} outside [0, 1]",
                attributes.patient_no_show_rate
            )));
        }

        let mut factors = Self::contributions(attributes);
        let probability = factors
            .iter()
            .map(|factor| factor.impact)
            .sum::<f64>()
            .clamp(0.01, 0.95);

        factors.sort_by(|a, b| {
            b.impact
                .abs()
                .partial_cmp(&a.impact.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        factors.truncate(MAX_TOP_FACTORS);

        debug!(
            booking_id = %attributes.booking_id,
            probability,
            "Heuristic no-show prediction"
        );

        Ok(RiskAssessment {
            probability,
            risk_level: RiskLevel::from_probability(probability),
            top_factors: factors,
        })
    }
}
