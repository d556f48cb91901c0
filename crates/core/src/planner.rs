//! # Slot Planner
//!
//! Splits a working day into fixed-duration appointment slots.
//!
//! ## Algorithm
//!
//! Starting at `date + work_start`, a cursor walks towards `date + work_end`
//! in steps of one slot duration:
//!
//! 1. If a break window is set and the cursor lies in `[break_start, break_end)`,
//!    the cursor moves one step and nothing is emitted.
//! 2. Otherwise the slot `[cursor, cursor + duration)` is emitted if it ends
//!    no later than `work_end`. A final slot that would overhang is dropped,
//!    never truncated.
//!
//! The break test only looks at the slot start, and the cursor always moves by
//! exactly one step. A break that is not aligned to the slot grid therefore
//! does not shift the grid: with 30 minute slots and a 10:15-10:45 break,
//! 10:00-10:30 is kept (it starts before the break) and 10:30-11:00 is skipped.
//!
//! Generation is lazy and stateless: [`SlotPlanner::generate`] returns a fresh
//! iterator every time, and the number of steps is bounded by
//! `(work_end - work_start) / duration`.

use std::iter::FusedIterator;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    errors::{CabinetError, CabinetResult},
    models::slot::{DailySlotsRequest, PlannedSlot},
};

/// Start of the working day used when the "all day" flag is set, or when no
/// start time was submitted.
pub const DEFAULT_WORK_START: &str = "09:00";
/// End of the working day used when the "all day" flag is set, or when no end
/// time was submitted.
pub const DEFAULT_WORK_END: &str = "18:00";
pub const DEFAULT_SLOT_MINUTES: i64 = 30;

/// A sub-interval of the working day excluded from slot generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Validated planning input for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingDay {
    pub date: NaiveDate,
    pub work_start: NaiveTime,
    pub work_end: NaiveTime,
    pub break_window: Option<BreakWindow>,
}

impl WorkingDay {
    pub fn new(date: NaiveDate, work_start: NaiveTime, work_end: NaiveTime) -> Self {
        Self {
            date,
            work_start,
            work_end,
            break_window: None,
        }
    }

    pub fn with_break(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.break_window = Some(BreakWindow { start, end });
        self
    }

    /// Builds a working day from a submitted request.
    ///
    /// Blank fields count as missing. The date is required. With `all_day`
    /// set, the submitted times are ignored and the day runs from
    /// [`DEFAULT_WORK_START`] to [`DEFAULT_WORK_END`]. A break is applied only
    /// when both of its bounds are present.
    ///
    /// # Errors
    ///
    /// * `CabinetError::Validation` - missing date, or a date or time that
    ///   does not parse
    pub fn from_request(request: &DailySlotsRequest) -> CabinetResult<Self> {
        let date = non_blank(&request.date)
            .ok_or_else(|| CabinetError::Validation("Date is required".to_string()))?;
        let date = parse_date(date)?;

        let (work_start, work_end) = if request.all_day {
            (DEFAULT_WORK_START, DEFAULT_WORK_END)
        } else {
            (
                non_blank(&request.start_time).unwrap_or(DEFAULT_WORK_START),
                non_blank(&request.end_time).unwrap_or(DEFAULT_WORK_END),
            )
        };

        let mut day = WorkingDay::new(date, parse_time(work_start)?, parse_time(work_end)?);

        if let (Some(start), Some(end)) = (
            non_blank(&request.break_start),
            non_blank(&request.break_end),
        ) {
            day = day.with_break(parse_time(start)?, parse_time(end)?);
        }

        Ok(day)
    }

    fn at(&self, time: NaiveTime) -> NaiveDateTime {
        self.date.and_time(time)
    }
}

/// Produces appointment slots for a working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPlanner {
    slot_duration: Duration,
}

impl Default for SlotPlanner {
    fn default() -> Self {
        Self {
            slot_duration: Duration::minutes(DEFAULT_SLOT_MINUTES),
        }
    }
}

impl SlotPlanner {
    /// Creates a planner producing slots of `slot_minutes` minutes.
    ///
    /// # Errors
    ///
    /// * `CabinetError::Validation` - the duration is zero, negative or longer
    ///   than a day
    pub fn new(slot_minutes: i64) -> CabinetResult<Self> {
        if slot_minutes <= 0 || slot_minutes > 24 * 60 {
            return Err(CabinetError::Validation(format!(
                "Slot duration must be between 1 and 1440 minutes, got {}",
                slot_minutes
            )));
        }

        Ok(Self {
            slot_duration: Duration::minutes(slot_minutes),
        })
    }

    pub fn slot_duration(&self) -> Duration {
        self.slot_duration
    }

    /// Returns the slots of `day` in chronological order.
    pub fn generate(&self, day: &WorkingDay) -> Slots {
        Slots {
            cursor: day.at(day.work_start),
            end: day.at(day.work_end),
            break_window: day
                .break_window
                .map(|window| (day.at(window.start), day.at(window.end))),
            step: self.slot_duration,
        }
    }
}

/// Lazy iterator over the slots of one working day.
#[derive(Debug, Clone)]
pub struct Slots {
    cursor: NaiveDateTime,
    end: NaiveDateTime,
    break_window: Option<(NaiveDateTime, NaiveDateTime)>,
    step: Duration,
}

impl Slots {
    fn in_break(&self, start: NaiveDateTime) -> bool {
        matches!(self.break_window, Some((from, to)) if start >= from && start < to)
    }
}

impl Iterator for Slots {
    type Item = PlannedSlot;

    fn next(&mut self) -> Option<PlannedSlot> {
        while self.cursor < self.end {
            let start = self.cursor;
            // At the edge of the calendar there is no room for another slot.
            let Some(slot_end) = start.checked_add_signed(self.step) else {
                self.cursor = self.end;
                return None;
            };
            self.cursor = slot_end;

            if self.in_break(start) {
                continue;
            }

            if slot_end <= self.end {
                return Some(PlannedSlot {
                    start,
                    end: slot_end,
                });
            }
        }

        None
    }
}

impl FusedIterator for Slots {}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(value: &str) -> CabinetResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CabinetError::Validation(format!("Invalid date: {}", value)))
}

fn parse_time(value: &str) -> CabinetResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| CabinetError::Validation(format!("Invalid time: {}", value)))
}
