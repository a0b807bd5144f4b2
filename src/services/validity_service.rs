//! Rules a candidate shift must pass before it is submitted.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::ShiftViolation;
use crate::models::shift::{ExistingShift, ShiftDraft};
use crate::utils::time;

/// The time window of a shift being created or moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftWindow {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl ShiftWindow {
    pub fn new(start_time: NaiveDateTime, end_time: NaiveDateTime) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }
}

impl From<&ShiftDraft> for ShiftWindow {
    fn from(shift: &ShiftDraft) -> Self {
        Self::new(shift.start_time, shift.end_time)
    }
}

/// Runs every rule against today's local date.
pub fn check_validity(
    candidate: ShiftWindow,
    existing: &[ExistingShift],
) -> Result<(), ShiftViolation> {
    check_validity_on(candidate, existing, time::today())
}

pub fn check_validity_on(
    candidate: ShiftWindow,
    existing: &[ExistingShift],
    today: NaiveDate,
) -> Result<(), ShiftViolation> {
    if candidate.end_time <= candidate.start_time {
        return Err(ShiftViolation::InvalidTimeRange);
    }

    // Whole days only: a shift later today is fine whatever the clock says.
    if candidate.date() < today {
        return Err(ShiftViolation::ShiftInPast);
    }

    check_overlap(candidate, existing)
}

/// The no-overlap rule on its own, for windows already known to be ordered and current.
pub fn check_overlap(
    candidate: ShiftWindow,
    existing: &[ExistingShift],
) -> Result<(), ShiftViolation> {
    match existing.iter().find(|shift| overlaps(candidate, shift)) {
        Some(shift) => Err(ShiftViolation::ShiftConflict {
            conflicting_shift_id: shift.id,
        }),
        None => Ok(()),
    }
}

/// Half-open interval overlap; touching end-to-start does not count.
pub fn overlaps(candidate: ShiftWindow, existing: &ExistingShift) -> bool {
    let starts_inside =
        candidate.start_time >= existing.start_time && candidate.start_time < existing.end_time;
    let ends_inside =
        candidate.end_time > existing.start_time && candidate.end_time <= existing.end_time;
    let contains =
        candidate.start_time <= existing.start_time && candidate.end_time >= existing.end_time;

    starts_inside || ends_inside || contains
}
