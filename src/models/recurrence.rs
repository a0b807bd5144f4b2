use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    #[default]
    Weekly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AssigneeOption {
    /// Every instance keeps the base shift's worker.
    #[default]
    Keep,
    /// Only the first instance keeps the worker; the rest are filled one by one.
    OpenSlot,
}

/// When a series stops. A config always carries exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceEnd {
    /// Last calendar date an instance may fall on, inclusive.
    EndDate(NaiveDate),
    /// Total instances, the base shift included.
    Occurrences(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecurrenceConfig {
    pub frequency: Frequency,
    pub end: RecurrenceEnd,
    pub assignee_option: AssigneeOption,
}

impl RecurrenceConfig {
    pub fn weekly_until(end_date: NaiveDate, assignee_option: AssigneeOption) -> Self {
        Self {
            frequency: Frequency::Weekly,
            end: RecurrenceEnd::EndDate(end_date),
            assignee_option,
        }
    }

    pub fn weekly_count(occurrences: u32, assignee_option: AssigneeOption) -> Self {
        Self {
            frequency: Frequency::Weekly,
            end: RecurrenceEnd::Occurrences(occurrences),
            assignee_option,
        }
    }
}
