use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::shift::{ShiftDraft, WorkerRef};
use crate::utils::time;

/// What makes two shifts in different weeks "the same slot".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ShiftFingerprint {
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: u32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub role: Option<String>,
}

impl ShiftFingerprint {
    pub fn of(shift: &ShiftDraft) -> Self {
        Self {
            day_of_week: shift.start_time.weekday().num_days_from_sunday(),
            start_time: shift.start_time.time(),
            end_time: shift.end_time.time(),
            role: shift
                .role
                .as_ref()
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CalendarView {
    Day,
    #[default]
    Week,
    Month,
}

/// Visible calendar window. Whole days from `start` to `end` are inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ViewRange {
    pub fn new(view: CalendarView, anchor: NaiveDate) -> Self {
        let (first, last) = match view {
            CalendarView::Day => (anchor, anchor),
            CalendarView::Week => time::week_bounds(anchor),
            CalendarView::Month => time::month_bounds(anchor),
        };
        Self {
            start: time::start_of_day(first),
            end: time::end_of_day(last),
        }
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        let day = instant.date();
        day >= self.start.date() && day <= self.end.date()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmartMatch {
    pub shift_id: Option<Uuid>,
    pub shift_title: String,
    pub day_of_week: String,
    pub time: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub role: Option<String>,
    pub suggested_candidate: Option<WorkerRef>,
    pub previous_shift_date: Option<NaiveDateTime>,
}

impl SmartMatch {
    pub fn unmatched(shift: &ShiftDraft) -> Self {
        Self {
            shift_id: shift.id,
            shift_title: shift.title.clone(),
            day_of_week: weekday_name(shift.start_time.weekday()).to_string(),
            time: time::format_time_window(shift.start_time, shift.end_time),
            start_time: shift.start_time,
            end_time: shift.end_time,
            role: shift.role.clone(),
            suggested_candidate: None,
            previous_shift_date: None,
        }
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}
