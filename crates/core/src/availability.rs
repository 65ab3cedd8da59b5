//! # Doctor Availability
//!
//! Computes the open appointment slots for a doctor on a given day.
//!
//! A day is divided into a fixed grid by a [`WorkingWindow`]: starting at the
//! window start, stepping by the slot length, and stopping before the window
//! end. A slot is open when no appointment is booked at exactly that time of
//! day. Appointments carry no duration, so a booking occupies exactly one grid
//! position and booked times that fall off the grid have no effect.
//!
//! The calculation is pure: it reads its inputs and the window it was built
//! with, and allocates its own output.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::errors::{ClinicError, ClinicResult};
use crate::models::availability::DoctorAvailabilityResponse;

/// Wire format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for slots in availability responses
pub const SLOT_FORMAT: &str = "%H:%M";

/// Default first slot of the day (09:00)
pub const DEFAULT_DAY_START_HOUR: u32 = 9;

/// Default end of the working day (17:00, exclusive)
pub const DEFAULT_DAY_END_HOUR: u32 = 17;

/// Default slot length in minutes
pub const DEFAULT_SLOT_MINUTES: i64 = 30;

/// Daily interval during which appointment slots are offered
///
/// `end` is exclusive: a window of 09:00-17:00 with a 30 minute step yields
/// 16 slots, the last one at 16:30.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingWindow {
    start: NaiveTime,
    end: NaiveTime,
    step: Duration,
}

impl WorkingWindow {
    /// Builds a window, rejecting empty ranges and non-positive steps
    pub fn new(start: NaiveTime, end: NaiveTime, step_minutes: i64) -> ClinicResult<Self> {
        if start >= end {
            return Err(ClinicError::Validation(format!(
                "Working window start {} must be before end {}",
                start.format(SLOT_FORMAT),
                end.format(SLOT_FORMAT)
            )));
        }

        if step_minutes <= 0 || step_minutes >= 24 * 60 {
            return Err(ClinicError::Validation(format!(
                "Slot length must be between 1 and 1439 minutes (got {})",
                step_minutes
            )));
        }

        Ok(Self {
            start,
            end,
            step: Duration::minutes(step_minutes),
        })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Enumerates the grid: `start, start + step, ...` while `< end`
    pub fn grid(&self) -> Vec<NaiveTime> {
        let mut slots = Vec::new();
        let mut current = self.start;

        while current < self.end {
            slots.push(current);

            // NaiveTime arithmetic wraps at midnight; a wrap means we ran off the day
            let (next, wrapped_secs) = current.overflowing_add_signed(self.step);
            if wrapped_secs != 0 {
                break;
            }
            current = next;
        }

        slots
    }
}

impl Default for WorkingWindow {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(DEFAULT_DAY_START_HOUR, 0, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(DEFAULT_DAY_END_HOUR, 0, 0).unwrap_or_default(),
            step: Duration::minutes(DEFAULT_SLOT_MINUTES),
        }
    }
}

/// Computes open slots for a doctor against a configured [`WorkingWindow`]
///
/// # Example
///
/// ```
/// use chrono::NaiveTime;
/// use clinicare_core::availability::{AvailabilityCalculator, WorkingWindow};
/// use uuid::Uuid;
///
/// let calculator = AvailabilityCalculator::new(WorkingWindow::default());
/// let booked = [NaiveTime::from_hms_opt(9, 0, 0).unwrap()];
///
/// let availability = calculator
///     .compute(Uuid::new_v4(), "2025-03-10", booked)
///     .unwrap();
///
/// assert_eq!(availability.available_slots.len(), 15);
/// assert_eq!(availability.available_slots[0], "09:30");
/// ```
#[derive(Debug, Clone, Default)]
pub struct AvailabilityCalculator {
    window: WorkingWindow,
}

impl AvailabilityCalculator {
    pub fn new(window: WorkingWindow) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &WorkingWindow {
        &self.window
    }

    /// Returns the grid minus the booked times, in ascending order
    pub fn open_slots<I>(&self, booked: I) -> Vec<NaiveTime>
    where
        I: IntoIterator<Item = NaiveTime>,
    {
        let booked: HashSet<NaiveTime> = booked.into_iter().collect();

        self.window
            .grid()
            .into_iter()
            .filter(|slot| !booked.contains(slot))
            .collect()
    }

    /// Validates `date` and builds the availability response for `doctor_id`
    ///
    /// The doctor is not looked up; callers supply the booked times for that
    /// exact doctor and date.
    ///
    /// # Errors
    ///
    /// * `ClinicError::InvalidDateFormat` - `date` is not a valid `YYYY-MM-DD` date
    pub fn compute<I>(
        &self,
        doctor_id: Uuid,
        date: &str,
        booked: I,
    ) -> ClinicResult<DoctorAvailabilityResponse>
    where
        I: IntoIterator<Item = NaiveTime>,
    {
        parse_date(date)?;

        let available_slots = self
            .open_slots(booked)
            .into_iter()
            .map(|slot| slot.format(SLOT_FORMAT).to_string())
            .collect();

        Ok(DoctorAvailabilityResponse {
            doctor_id,
            date: date.to_string(),
            available_slots,
        })
    }
}

/// Parses a `YYYY-MM-DD` calendar date
pub fn parse_date(date: &str) -> ClinicResult<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| ClinicError::InvalidDateFormat(date.to_string()))
}

/// Parses a time of day given as `HH:MM` or `HH:MM:SS`
pub fn parse_time_of_day(value: &str) -> ClinicResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, SLOT_FORMAT))
        .map_err(|_| {
            ClinicError::Validation(format!(
                "Invalid time {:?}. Use HH:MM or HH:MM:SS",
                value
            ))
        })
}
