use chrono::Timelike;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{
    Booking, RecommendationKind, RecommendationPriority, ScheduleRecommendation, TimeSlot,
};

/// Bookings per day below which the capacity alert fires.
const TYPICAL_DAILY_CAPACITY: usize = 20;

/// Probability above which a booking counts as high-risk.
const HIGH_RISK_THRESHOLD: f64 = 0.4;

/// Advisory strings attached to an optimization result. Conditions are gated
/// independently and emitted in a fixed order.
pub fn advisory_lines(
    optimized: &[TimeSlot],
    probabilities: &HashMap<Uuid, f64>,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    let high_risk = probabilities
        .values()
        .filter(|probability| **probability > HIGH_RISK_THRESHOLD)
        .count();
    if high_risk > 0 {
        recommendations.push(format!(
            "Send additional reminders to {} high-risk patients",
            high_risk
        ));
    }

    let empty_slots = optimized
        .iter()
        .filter(|slot| slot.bookings.is_empty())
        .count();
    if empty_slots > 0 {
        recommendations.push(format!(
            "Consider opening {} empty slots for same-day bookings",
            empty_slots
        ));
    }

    // One timing tip regardless of how many morning slots exist.
    if optimized.iter().any(|slot| slot.start.hour() < 12) {
        recommendations
            .push("Send morning appointment reminders by 6 PM the day before".to_string());
    }

    recommendations
}

/// Structured day-of recommendations for the live schedule, independent of an
/// optimization run.
pub fn realtime_recommendations(
    bookings: &[Booking],
    probabilities: &HashMap<Uuid, f64>,
) -> Vec<ScheduleRecommendation> {
    let mut recommendations = Vec::new();

    let high_risk = bookings
        .iter()
        .filter(|booking| {
            probabilities
                .get(&booking.id)
                .is_some_and(|probability| *probability > HIGH_RISK_THRESHOLD)
        })
        .count();
    if high_risk > 0 {
        recommendations.push(ScheduleRecommendation {
            kind: RecommendationKind::HighRiskAlert,
            priority: RecommendationPriority::High,
            message: format!("{} bookings have high no-show risk", high_risk),
            action: "Send additional reminders or consider overbooking".to_string(),
        });
    }

    if !bookings.is_empty() {
        let mean_probability = bookings
            .iter()
            .map(|booking| probabilities.get(&booking.id).copied().unwrap_or(0.0))
            .sum::<f64>()
            / bookings.len() as f64;
        if mean_probability > 0.15 {
            recommendations.push(ScheduleRecommendation {
                kind: RecommendationKind::OptimizationOpportunity,
                priority: RecommendationPriority::Medium,
                message: format!(
                    "Average no-show probability is {:.1}%",
                    mean_probability * 100.0
                ),
                action: "Consider running schedule optimization".to_string(),
            });
        }
    }

    if bookings.len() < TYPICAL_DAILY_CAPACITY {
        recommendations.push(ScheduleRecommendation {
            kind: RecommendationKind::CapacityAlert,
            priority: RecommendationPriority::Low,
            message: format!("Only {} bookings scheduled", bookings.len()),
            action: "Open slots for same-day bookings or promote availability".to_string(),
        });
    }

    recommendations
}
