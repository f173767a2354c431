use tracing::debug;

use crate::models::{Change, TimeSlot};

pub const OVERBOOK_REASON: &str = "High no-show probability detected";

/// Derives the change list, predicted revenue gain, and optimization quality
/// score from an (original, optimized) slot pair. Both sequences are
/// positionally aligned by construction.
pub struct ImpactCalculator {
    avg_booking_value: f64,
    fill_rate: f64,
}

impl Default for ImpactCalculator {
    fn default() -> Self {
        Self {
            avg_booking_value: 150.0,
            fill_rate: 0.7,
        }
    }
}

impl ImpactCalculator {
    pub fn new(avg_booking_value: f64, fill_rate: f64) -> Self {
        Self {
            avg_booking_value,
            fill_rate,
        }
    }

    /// Positional diff of the two sequences, emitted in slot order.
    pub fn changes(&self, original: &[TimeSlot], optimized: &[TimeSlot]) -> Vec<Change> {
        let mut changes = Vec::new();

        for (orig, opt) in original.iter().zip(optimized.iter()) {
            if opt.capacity > orig.capacity {
                changes.push(Change::OverbookAdded {
                    time_slot: orig.start,
                    provider_id: orig.provider_id,
                    additional_capacity: opt.capacity - orig.capacity,
                    reason: OVERBOOK_REASON.to_string(),
                });
            }

            // Dormant today: the capacity pass never touches buffers, but the
            // buffer adjustment is part of the output contract.
            if opt.buffer_minutes != orig.buffer_minutes {
                changes.push(Change::BufferAdjusted {
                    time_slot: orig.start,
                    provider_id: orig.provider_id,
                    new_buffer: opt.buffer_minutes,
                    old_buffer: orig.buffer_minutes,
                });
            }
        }

        changes
    }

    /// Additional capacity converted to currency at the assumed fill rate.
    pub fn revenue_gain(&self, original: &[TimeSlot], optimized: &[TimeSlot]) -> f64 {
        let original_capacity: i32 = original.iter().map(|slot| slot.capacity).sum();
        let optimized_capacity: i32 = optimized.iter().map(|slot| slot.capacity).sum();
        let additional_slots = optimized_capacity - original_capacity;

        let gain = additional_slots as f64 * self.avg_booking_value * self.fill_rate;
        debug!(additional_slots, gain, "Calculated revenue impact");
        gain.max(0.0)
    }

    /// Mean per-slot quality in [0, 1]: utilization weighted against
    /// overbooking aggressiveness. Empty input scores 0.0.
    pub fn optimization_score(&self, optimized: &[TimeSlot]) -> f64 {
        if optimized.is_empty() {
            return 0.0;
        }

        let total: f64 = optimized
            .iter()
            .map(|slot| {
                let utilization =
                    (slot.bookings.len() as f64 / slot.capacity.max(1) as f64).min(1.0);
                let overbook_ratio =
                    (slot.capacity - 1) as f64 / slot.bookings.len().max(1) as f64;
                let balance = 1.0 - overbook_ratio.min(1.0);
                utilization * 0.6 + balance * 0.4
            })
            .sum();

        total / optimized.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Booking;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn slot(capacity: i32, booking_count: usize, buffer_minutes: i32) -> TimeSlot {
        let provider_id = Uuid::new_v4();
        TimeSlot {
            start: Utc.with_ymd_and_hms(2025, 6, 18, 9, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 6, 18, 9, 30, 0).unwrap(),
            provider_id,
            bookings: (0..booking_count)
                .map(|_| Booking {
                    id: Uuid::new_v4(),
                    provider_id,
                    patient_id: Uuid::new_v4(),
                    scheduled_time: Utc.with_ymd_and_hms(2025, 6, 18, 9, 5, 0).unwrap(),
                    duration_minutes: 30,
                    booking_type: "consultation".to_string(),
                    booked_at: None,
                    reminder_sent: false,
                })
                .collect(),
            capacity,
            buffer_minutes,
        }
    }

    #[test]
    fn capacity_increase_emits_overbook_change() {
        let calculator = ImpactCalculator::default();
        let original = vec![slot(1, 2, 5)];
        let mut optimized = original.clone();
        optimized[0].capacity = 3;

        let changes = calculator.changes(&original, &optimized);
        assert_eq!(changes.len(), 1);
        assert_eq!(
            changes[0],
            Change::OverbookAdded {
                time_slot: original[0].start,
                provider_id: original[0].provider_id,
                additional_capacity: 2,
                reason: OVERBOOK_REASON.to_string(),
            }
        );
    }

    #[test]
    fn buffer_difference_emits_adjustment_change() {
        let calculator = ImpactCalculator::default();
        let original = vec![slot(1, 1, 5)];
        let mut optimized = original.clone();
        optimized[0].buffer_minutes = 10;

        let changes = calculator.changes(&original, &optimized);
        assert_eq!(
            changes,
            vec![Change::BufferAdjusted {
                time_slot: original[0].start,
                provider_id: original[0].provider_id,
                new_buffer: 10,
                old_buffer: 5,
            }]
        );
    }

    #[test]
    fn diff_is_idempotent() {
        let calculator = ImpactCalculator::default();
        let original = vec![slot(1, 2, 5), slot(1, 0, 5)];
        let mut optimized = original.clone();
        optimized[0].capacity = 2;

        let first = calculator.changes(&original, &optimized);
        let second = calculator.changes(&original, &optimized);
        assert_eq!(first, second);
    }

    #[test]
    fn identical_schedules_produce_no_changes_and_no_gain() {
        let calculator = ImpactCalculator::default();
        let slots = vec![slot(1, 1, 5)];

        assert!(calculator.changes(&slots, &slots).is_empty());
        assert_eq!(calculator.revenue_gain(&slots, &slots), 0.0);
    }

    #[test]
    fn revenue_gain_uses_value_and_fill_rate() {
        let calculator = ImpactCalculator::default();
        let original = vec![slot(1, 3, 5), slot(1, 2, 5)];
        let mut optimized = original.clone();
        optimized[0].capacity = 2;
        optimized[1].capacity = 2;

        // 2 additional slots * 150.0 * 0.7
        assert!((calculator.revenue_gain(&original, &optimized) - 210.0).abs() < 1e-9);
    }

    #[test]
    fn score_is_zero_for_empty_schedule() {
        let calculator = ImpactCalculator::default();
        assert_eq!(calculator.optimization_score(&[]), 0.0);
    }

    #[test]
    fn fully_utilized_unoverbooked_slot_scores_one() {
        let calculator = ImpactCalculator::default();
        let slots = vec![slot(1, 1, 5)];
        assert!((calculator.optimization_score(&slots) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn score_stays_within_unit_interval() {
        let calculator = ImpactCalculator::default();
        for capacity in 1..5 {
            for count in 0..6 {
                let score = calculator.optimization_score(&[slot(capacity, count, 5)]);
                assert!((0.0..=1.0).contains(&score), "score {} out of bounds", score);
            }
        }
    }
}
