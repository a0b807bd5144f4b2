use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{Error, Result};
use crate::models::recurrence::{AssigneeOption, Frequency, RecurrenceConfig, RecurrenceEnd};
use crate::models::shift::{ExistingShift, Location, ShiftDraft, ShiftStatus, WorkerRef};
use crate::models::smart_match::{CalendarView, SmartMatch};
use crate::services::recurrence_service::SeriesConflict;
use crate::utils::validation::{
    failure, non_negative_rate, not_blank, supported_date, supported_datetime,
};

pub const MIN_OCCURRENCES: u32 = 2;
pub const MAX_OCCURRENCES: u32 = 52;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShiftPayload {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(custom(function = "supported_datetime"))]
    pub start_time: NaiveDateTime,
    #[validate(custom(function = "supported_datetime"))]
    pub end_time: NaiveDateTime,
    #[validate(custom(function = "non_negative_rate"))]
    pub hourly_rate: Decimal,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<ShiftStatus>,
    #[serde(default)]
    pub assignee: Option<WorkerRef>,
}

impl From<ShiftPayload> for ShiftDraft {
    fn from(value: ShiftPayload) -> Self {
        Self {
            id: value.id,
            title: value.title.trim().to_string(),
            description: value.description,
            start_time: value.start_time,
            end_time: value.end_time,
            hourly_rate: value.hourly_rate,
            location: value.location,
            role: value.role,
            status: value.status.unwrap_or_default(),
            assignee: value.assignee,
            recurring_series_id: None,
            recurring_index: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftWindowPayload {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateShiftPayload {
    pub shift: ShiftWindowPayload,
    #[serde(default)]
    pub venue_id: Option<Uuid>,
    #[serde(default)]
    pub existing_shifts: Option<Vec<ExistingShift>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateShiftResponse {
    pub valid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_end_condition"))]
pub struct RecurrencePayload {
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 2, max = 52))]
    #[serde(default)]
    pub number_of_occurrences: Option<u32>,
    #[serde(default)]
    pub assignee_option: AssigneeOption,
}

fn validate_end_condition(payload: &RecurrencePayload) -> std::result::Result<(), ValidationError> {
    match (payload.end_date, payload.number_of_occurrences) {
        (Some(_), Some(_)) => Err(failure(
            "end_condition",
            "Specify either an end date or a number of occurrences, not both",
        )),
        (None, None) => Err(failure(
            "end_condition",
            "Specify an end date or a number of occurrences",
        )),
        _ => Ok(()),
    }
}

impl RecurrencePayload {
    pub fn to_config(&self) -> Result<RecurrenceConfig> {
        let end = match (self.end_date, self.number_of_occurrences) {
            (Some(date), None) => RecurrenceEnd::EndDate(date),
            (None, Some(count)) if (MIN_OCCURRENCES..=MAX_OCCURRENCES).contains(&count) => {
                RecurrenceEnd::Occurrences(count)
            }
            _ => {
                return Err(Error::BadRequest(
                    "Recurrence needs exactly one valid end condition".to_string(),
                ))
            }
        };
        Ok(RecurrenceConfig {
            frequency: self.frequency,
            end,
            assignee_option: self.assignee_option,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_end_date_window"))]
pub struct ExpandRecurrencePayload {
    #[validate(nested)]
    pub shift: ShiftPayload,
    #[validate(nested)]
    pub recurrence: RecurrencePayload,
    #[serde(default)]
    pub venue_id: Option<Uuid>,
    #[serde(default)]
    pub existing_shifts: Option<Vec<ExistingShift>>,
}

fn validate_end_date_window(
    payload: &ExpandRecurrencePayload,
) -> std::result::Result<(), ValidationError> {
    let Some(end_date) = payload.recurrence.end_date else {
        return Ok(());
    };
    let base_date = payload.shift.start_time.date();
    if end_date < base_date {
        return Err(failure(
            "end_date",
            "End date must be on or after the first shift",
        ));
    }
    if end_date - base_date > Duration::weeks(i64::from(MAX_OCCURRENCES - 1)) {
        return Err(failure(
            "end_date",
            "Recurring shifts can span at most 52 weeks",
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpandRecurrenceResponse {
    pub series_id: Uuid,
    pub instances: Vec<ShiftDraft>,
    pub conflicts: Vec<SeriesConflict>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SmartMatchPayload {
    #[serde(default)]
    pub view: CalendarView,
    #[validate(custom(function = "supported_date"))]
    pub anchor_date: NaiveDate,
    #[validate(nested)]
    pub shifts: Vec<ShiftPayload>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SmartMatchListResponse {
    pub items: Vec<SmartMatch>,
}
