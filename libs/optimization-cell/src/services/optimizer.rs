use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use crate::models::{
    Booking, OptimizationResult, OptimizerConfig, ProviderCalendar, ProviderSchedule, TimeSlot,
};
use crate::services::capacity::CapacityPlanner;
use crate::services::impact::ImpactCalculator;
use crate::services::recommendations;
use crate::services::slots::SlotBuilder;

/// The pure optimization pipeline: slot construction, capacity planning,
/// diffing, scoring, and advisory generation over in-memory inputs. No I/O,
/// no shared state; concurrent runs are independent.
pub struct ScheduleOptimizer {
    slot_builder: SlotBuilder,
    planner: CapacityPlanner,
    impact: ImpactCalculator,
}

impl ScheduleOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            slot_builder: SlotBuilder::new(config.buffer_minutes),
            impact: ImpactCalculator::new(config.avg_booking_value, config.fill_rate),
            planner: CapacityPlanner::new(config),
        }
    }

    /// Run the whole pipeline for one day. Providers with malformed calendars
    /// are skipped (logged by the slot builder) without failing the run.
    pub fn optimize_daily_schedule(
        &self,
        date: NaiveDate,
        bookings: &[Booking],
        probabilities: &HashMap<Uuid, f64>,
        calendars: &[(Uuid, ProviderCalendar)],
    ) -> OptimizationResult {
        info!(
            booking_count = bookings.len(),
            provider_count = calendars.len(),
            %date,
            "Optimizing daily schedule"
        );

        let outcome = self.slot_builder.build(date, bookings, calendars);
        let original = outcome.slots;
        let optimized = self.planner.plan(&original, probabilities);

        let changes = self.impact.changes(&original, &optimized);
        let predicted_revenue_gain = self.impact.revenue_gain(&original, &optimized);
        let optimization_score = self.impact.optimization_score(&optimized);
        let recommendations = recommendations::advisory_lines(&optimized, probabilities);

        info!(
            change_count = changes.len(),
            predicted_revenue_gain,
            optimization_score,
            "Optimization complete"
        );

        OptimizationResult {
            original_schedule: provider_schedules(&original),
            optimized_schedule: provider_schedules(&optimized),
            changes,
            predicted_revenue_gain,
            optimization_score,
            recommendations,
        }
    }
}

/// Group a slot sequence per provider, preserving first-seen provider order
/// and chronological slot order within each provider.
pub fn provider_schedules(slots: &[TimeSlot]) -> Vec<ProviderSchedule> {
    let mut schedules: Vec<ProviderSchedule> = Vec::new();

    for slot in slots {
        match schedules
            .iter_mut()
            .find(|schedule| schedule.provider_id == slot.provider_id)
        {
            Some(schedule) => schedule.slots.push(slot.into()),
            None => schedules.push(ProviderSchedule {
                provider_id: slot.provider_id,
                slots: vec![slot.into()],
            }),
        }
    }

    schedules
}
