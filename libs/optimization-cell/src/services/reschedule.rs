use chrono::{Datelike, Timelike};
use tracing::debug;

use crate::models::{ReschedulePreferences, RescheduleSuggestion, TimeSlot};

/// Hours of day probed by the multi-day availability scan.
pub const SCAN_HOURS: [u32; 6] = [9, 10, 11, 14, 15, 16];

/// Scan confidence decays with distance from today so sooner openings rank
/// first.
pub fn scan_confidence(days_ahead: u32) -> f64 {
    0.9 - days_ahead as f64 * 0.02
}

/// Ranks open slots for a cancelled booking against the patient's time and
/// day preferences.
pub struct RescheduleAdvisor {
    top_n: usize,
}

impl Default for RescheduleAdvisor {
    fn default() -> Self {
        Self { top_n: 3 }
    }
}

impl RescheduleAdvisor {
    pub fn with_top_n(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Score each slot that still has open capacity, sort descending (stable,
    /// so equal scores keep their original slot order), and return the top N.
    ///
    /// The theoretical maximum score is 4.5; dividing by 5.0 keeps confidence
    /// below 1.0 in practice, and the clamp guards the boundary anyway.
    pub fn suggest(
        &self,
        available_slots: &[TimeSlot],
        preferences: &ReschedulePreferences,
    ) -> Vec<RescheduleSuggestion> {
        let mut scored: Vec<(f64, &TimeSlot)> = available_slots
            .iter()
            .filter(|slot| slot.has_open_capacity())
            .map(|slot| (Self::preference_score(slot, preferences), slot))
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        debug!(
            candidates = scored.len(),
            returned = scored.len().min(self.top_n),
            "Ranked reschedule candidates"
        );

        scored
            .into_iter()
            .take(self.top_n)
            .map(|(score, slot)| RescheduleSuggestion {
                time: slot.start,
                provider_id: slot.provider_id,
                confidence: (score / 5.0).clamp(0.0, 1.0),
            })
            .collect()
    }

    fn preference_score(slot: &TimeSlot, preferences: &ReschedulePreferences) -> f64 {
        let mut score = 0.0;

        if preferences.preferred_hours.contains(&slot.start.hour()) {
            score += 2.0;
        }
        if preferences
            .preferred_days
            .contains(&slot.start.weekday().num_days_from_monday())
        {
            score += 1.0;
        }

        // Reward less-crowded slots.
        score + (1.0 - slot.occupancy()) * 1.5
    }
}
