use chrono::{Duration, NaiveDate};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::OptimizationError;
use crate::models::{Booking, ProviderCalendar, TimeSlot};

/// Partitions provider calendars into fixed-duration slots and assigns each
/// booking to the slot its scheduled time falls in. Pure function of its
/// inputs; slot capacity always starts at 1.
pub struct SlotBuilder {
    buffer_minutes: i32,
}

/// A provider whose calendar could not be turned into slots. Faults are
/// collected per provider so one bad calendar never aborts the batch.
#[derive(Debug)]
pub struct CalendarFault {
    pub provider_id: Uuid,
    pub error: OptimizationError,
}

#[derive(Debug, Default)]
pub struct SlotBuildOutcome {
    pub slots: Vec<TimeSlot>,
    pub faults: Vec<CalendarFault>,
}

impl SlotBuilder {
    pub fn new(buffer_minutes: i32) -> Self {
        Self { buffer_minutes }
    }

    /// Build slots for every provider, preserving the supplied provider order.
    pub fn build(
        &self,
        date: NaiveDate,
        bookings: &[Booking],
        calendars: &[(Uuid, ProviderCalendar)],
    ) -> SlotBuildOutcome {
        let mut outcome = SlotBuildOutcome::default();

        for (provider_id, calendar) in calendars {
            match self.build_provider_day(date, *provider_id, calendar, bookings) {
                Ok(mut slots) => outcome.slots.append(&mut slots),
                Err(error) => {
                    warn!(provider_id = %provider_id, %error, "Skipping provider with invalid calendar");
                    outcome.faults.push(CalendarFault {
                        provider_id: *provider_id,
                        error,
                    });
                }
            }
        }

        debug!(
            slot_count = outcome.slots.len(),
            fault_count = outcome.faults.len(),
            "Built time slots"
        );
        outcome
    }

    /// Walk one provider's calendar from start to end in slot-duration steps.
    /// The loop terminates strictly before the calendar end, so a slot never
    /// starts at or after it and no trailing partial slot is created.
    pub fn build_provider_day(
        &self,
        date: NaiveDate,
        provider_id: Uuid,
        calendar: &ProviderCalendar,
        bookings: &[Booking],
    ) -> Result<Vec<TimeSlot>, OptimizationError> {
        if calendar.start >= calendar.end {
            return Err(OptimizationError::Configuration {
                provider_id,
                reason: format!(
                    "calendar start {} is not before end {}",
                    calendar.start, calendar.end
                ),
            });
        }
        if calendar.slot_duration_minutes <= 0 {
            return Err(OptimizationError::Configuration {
                provider_id,
                reason: format!(
                    "slot duration must be positive, got {}",
                    calendar.slot_duration_minutes
                ),
            });
        }

        let day_start = date.and_time(calendar.start).and_utc();
        let day_end = date.and_time(calendar.end).and_utc();
        let step = Duration::minutes(calendar.slot_duration_minutes as i64);

        let mut slots = Vec::new();
        let mut current = day_start;
        while current < day_end {
            let slot_end = current + step;
            let slot_bookings: Vec<Booking> = bookings
                .iter()
                .filter(|booking| {
                    booking.provider_id == provider_id
                        && booking.scheduled_time >= current
                        && booking.scheduled_time < slot_end
                })
                .cloned()
                .collect();

            slots.push(TimeSlot {
                start: current,
                end: slot_end,
                provider_id,
                bookings: slot_bookings,
                capacity: 1,
                buffer_minutes: self.buffer_minutes,
            });

            current = slot_end;
        }

        Ok(slots)
    }
}
