use chrono::Timelike;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::models::{OptimizerConfig, TimeSlot};

/// Probability assumed for a booking the risk boundary returned nothing for.
pub const DEFAULT_NO_SHOW_PROBABILITY: f64 = 0.1;

/// Decides, per slot, how much extra capacity to allow on top of the base
/// capacity of 1. Slots are planned independently: the overbook cap uses each
/// slot's own booking count, never a practice-wide budget.
pub struct CapacityPlanner {
    config: OptimizerConfig,
}

impl CapacityPlanner {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Produce a new slot sequence with the same ordering and count as the
    /// input; each slot is either identical to its source or has increased
    /// capacity.
    pub fn plan(
        &self,
        slots: &[TimeSlot],
        probabilities: &HashMap<Uuid, f64>,
    ) -> Vec<TimeSlot> {
        slots
            .iter()
            .map(|slot| {
                let expected_no_shows = Self::expected_no_shows(slot, probabilities);
                if expected_no_shows < self.config.min_no_show_threshold {
                    return slot.clone();
                }

                let overbook = self.overbook_count(slot, expected_no_shows);
                if overbook > 0 {
                    debug!(
                        provider_id = %slot.provider_id,
                        start = %slot.start,
                        expected_no_shows,
                        overbook,
                        "Overbooking slot"
                    );
                }
                slot.with_capacity(slot.capacity + overbook)
            })
            .collect()
    }

    pub fn expected_no_shows(slot: &TimeSlot, probabilities: &HashMap<Uuid, f64>) -> f64 {
        slot.bookings
            .iter()
            .map(|booking| {
                probabilities
                    .get(&booking.id)
                    .copied()
                    .unwrap_or(DEFAULT_NO_SHOW_PROBABILITY)
            })
            .sum()
    }

    fn overbook_count(&self, slot: &TimeSlot, expected_no_shows: f64) -> i32 {
        let mut base = (expected_no_shows * self.config.strategy.overbook_factor()) as i32;

        // Edge-of-day slots are overbooked more conservatively.
        let hour = slot.start.hour();
        if hour < 10 || hour > 16 {
            base = (base as f64 * 0.7) as i32;
        }

        let max = (slot.bookings.len() as f64 * self.config.max_overbook_pct) as i32;
        base.min(max).max(0)
    }
}
