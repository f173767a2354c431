use chrono::{Datelike, NaiveDate, Utc};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use risk_cell::NoShowPredictor;

use crate::error::OptimizationError;
use crate::models::{
    Booking, DayScanOptions, OptimizationRecord, OptimizationRequest, ReschedulePreferences,
    RescheduleSuggestion, ScheduleRecommendation, TimeSlot,
};
use crate::services::capacity::DEFAULT_NO_SHOW_PROBABILITY;
use crate::services::optimizer::ScheduleOptimizer;
use crate::services::recommendations;
use crate::services::reschedule::{scan_confidence, RescheduleAdvisor, SCAN_HOURS};
use crate::services::store::ScheduleStore;

/// Orchestrates one optimization run: fetch inputs, fan out predictions, run
/// the pure pipeline, persist the result. Store and predictor are injected so
/// the service itself holds no state and runs safely concurrently.
pub struct DailyOptimizationService {
    store: Arc<dyn ScheduleStore>,
    predictor: Arc<dyn NoShowPredictor>,
}

impl DailyOptimizationService {
    pub fn new(store: Arc<dyn ScheduleStore>, predictor: Arc<dyn NoShowPredictor>) -> Self {
        Self { store, predictor }
    }

    #[instrument(skip(self), fields(practice_id = %request.practice_id, date = %request.date))]
    pub async fn optimize_daily(
        &self,
        request: OptimizationRequest,
    ) -> Result<OptimizationRecord, OptimizationError> {
        let bookings = self
            .store
            .bookings_for_date(request.practice_id, request.date, request.provider_id)
            .await?;
        if bookings.is_empty() {
            return Err(OptimizationError::EmptyInput { date: request.date });
        }

        let mut calendars = self
            .store
            .provider_calendars(request.practice_id, request.date)
            .await?;
        if let Some(provider_id) = request.provider_id {
            calendars.retain(|(id, _)| *id == provider_id);
        }

        let probabilities = self.predict_no_shows(&bookings).await;

        let optimizer = ScheduleOptimizer::new(request.config.clone());
        let result =
            optimizer.optimize_daily_schedule(request.date, &bookings, &probabilities, &calendars);

        let record = OptimizationRecord {
            id: Uuid::new_v4(),
            practice_id: request.practice_id,
            provider_id: request.provider_id,
            optimization_date: request.date,
            result,
            is_applied: false,
            applied_at: None,
            applied_by: None,
            created_at: Utc::now(),
        };
        self.store.save_optimization(&record).await?;

        info!(optimization_id = %record.id, "Stored optimization result");
        Ok(record)
    }

    /// Mark a stored optimization as applied. Returns the number of changes
    /// the caller should enact.
    #[instrument(skip(self))]
    pub async fn apply_optimization(
        &self,
        id: Uuid,
        applied_by: &str,
    ) -> Result<usize, OptimizationError> {
        let record = self
            .store
            .load_optimization(id)
            .await?
            .ok_or_else(|| OptimizationError::NotFound(format!("optimization {}", id)))?;

        if record.is_applied {
            return Err(OptimizationError::AlreadyApplied(id));
        }

        self.store.mark_applied(id, applied_by, Utc::now()).await?;
        info!(optimization_id = %id, applied_by, "Optimization applied");
        Ok(record.result.changes.len())
    }

    /// Day-of structured recommendations for the live schedule.
    #[instrument(skip(self))]
    pub async fn realtime_recommendations(
        &self,
        practice_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<ScheduleRecommendation>, OptimizationError> {
        let bookings = self
            .store
            .bookings_for_date(practice_id, date, None)
            .await?;
        let probabilities = self.predict_no_shows(&bookings).await;
        Ok(recommendations::realtime_recommendations(
            &bookings,
            &probabilities,
        ))
    }

    /// Rank open slots for a cancelled booking against patient preferences.
    pub fn rank_reschedule_slots(
        &self,
        available_slots: &[TimeSlot],
        preferences: &ReschedulePreferences,
    ) -> Vec<RescheduleSuggestion> {
        RescheduleAdvisor::default().suggest(available_slots, preferences)
    }

    /// Scan upcoming weekdays for free standard hours on the cancelled
    /// booking's provider. The scan stops once the budget is met; weekends
    /// are skipped entirely.
    #[instrument(skip(self, options))]
    pub async fn suggest_reschedule(
        &self,
        booking_id: Uuid,
        from_date: NaiveDate,
        options: &DayScanOptions,
    ) -> Result<Vec<RescheduleSuggestion>, OptimizationError> {
        let booking = self
            .store
            .booking_by_id(booking_id)
            .await?
            .ok_or_else(|| OptimizationError::NotFound(format!("booking {}", booking_id)))?;

        let mut suggestions = Vec::new();

        for days_ahead in 1..=options.days_ahead {
            let target = from_date + chrono::Duration::days(days_ahead as i64);
            if target.weekday().num_days_from_monday() >= 5 {
                continue;
            }

            for hour in SCAN_HOURS {
                let candidate = target.and_hms_opt(hour, 0, 0).unwrap().and_utc();
                if !self
                    .store
                    .has_booking_at(booking.provider_id, candidate)
                    .await?
                {
                    suggestions.push(RescheduleSuggestion {
                        time: candidate,
                        provider_id: booking.provider_id,
                        confidence: scan_confidence(days_ahead),
                    });
                }
            }

            if suggestions.len() >= options.scan_budget {
                break;
            }
        }

        suggestions.truncate(options.scan_budget);
        debug!(
            booking_id = %booking_id,
            suggestion_count = suggestions.len(),
            "Day scan complete"
        );
        Ok(suggestions)
    }

    /// Fan out one prediction per booking. A failed prediction degrades to
    /// the default probability rather than aborting the run.
    async fn predict_no_shows(&self, bookings: &[Booking]) -> HashMap<Uuid, f64> {
        let futures = bookings.iter().map(|booking| {
            let attributes = booking.risk_attributes();
            let predictor = Arc::clone(&self.predictor);
            async move {
                let probability = match predictor.predict(&attributes).await {
                    Ok(assessment) => assessment.probability,
                    Err(error) => {
                        warn!(booking_id = %attributes.booking_id, %error,
                              "Prediction failed, using default probability");
                        DEFAULT_NO_SHOW_PROBABILITY
                    }
                };
                (attributes.booking_id, probability)
            }
        });

        join_all(futures).await.into_iter().collect()
    }
}
