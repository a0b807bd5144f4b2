use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ShiftViolation;
use crate::models::recurrence::{AssigneeOption, Frequency, RecurrenceConfig, RecurrenceEnd};
use crate::models::shift::{ExistingShift, ShiftDraft};
use crate::services::validity_service::{check_overlap, ShiftWindow};

/// An instance of a freshly expanded series that collides with the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesConflict {
    pub recurring_index: u32,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub conflicting_shift_id: Uuid,
}

pub fn expand_recurrence(base: &ShiftDraft, config: &RecurrenceConfig) -> Vec<ShiftDraft> {
    expand_recurrence_with_series_id(base, config, Uuid::new_v4())
}

/// Expands `base` into its series. The end condition is trusted as given:
/// an end date before the base date yields the base alone.
pub fn expand_recurrence_with_series_id(
    base: &ShiftDraft,
    config: &RecurrenceConfig,
    series_id: Uuid,
) -> Vec<ShiftDraft> {
    let step = match config.frequency {
        Frequency::Weekly => Duration::weeks(1),
    };

    let mut instances = Vec::new();
    let mut start_time = base.start_time;
    let mut end_time = base.end_time;
    let mut index: u32 = 0;

    loop {
        let within_bound = match config.end {
            RecurrenceEnd::EndDate(end_date) => start_time.date() <= end_date,
            RecurrenceEnd::Occurrences(count) => index < count.max(1),
        };
        if !within_bound && index > 0 {
            break;
        }

        let assignee = match (config.assignee_option, index) {
            (AssigneeOption::Keep, _) | (AssigneeOption::OpenSlot, 0) => base.assignee.clone(),
            (AssigneeOption::OpenSlot, _) => None,
        };

        instances.push(ShiftDraft {
            start_time,
            end_time,
            assignee,
            recurring_series_id: Some(series_id),
            recurring_index: Some(index),
            ..base.clone()
        });

        match (
            start_time.checked_add_signed(step),
            end_time.checked_add_signed(step),
        ) {
            (Some(next_start), Some(next_end)) => {
                start_time = next_start;
                end_time = next_end;
            }
            _ => break,
        }
        index += 1;
    }

    tracing::debug!(
        series_id = %series_id,
        instances = instances.len(),
        "expanded recurring shift"
    );

    instances
}

/// Re-runs the overlap rule for every instance, returning one entry per collision.
pub fn find_series_conflicts(
    instances: &[ShiftDraft],
    existing: &[ExistingShift],
) -> Vec<SeriesConflict> {
    instances
        .iter()
        .enumerate()
        .filter_map(|(position, instance)| {
            match check_overlap(ShiftWindow::from(instance), existing) {
                Err(ShiftViolation::ShiftConflict {
                    conflicting_shift_id,
                }) => Some(SeriesConflict {
                    recurring_index: instance.recurring_index.unwrap_or(position as u32),
                    start_time: instance.start_time,
                    end_time: instance.end_time,
                    conflicting_shift_id,
                }),
                _ => None,
            }
        })
        .collect()
}
