use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    #[default]
    Open,
    Filled,
    Completed,
    Draft,
    Invited,
    Confirmed,
    Cancelled,
}

impl ShiftStatus {
    /// Statuses that mean a worker actually took the shift.
    pub const FILLED: [ShiftStatus; 2] = [ShiftStatus::Filled, ShiftStatus::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftStatus::Open => "open",
            ShiftStatus::Filled => "filled",
            ShiftStatus::Completed => "completed",
            ShiftStatus::Draft => "draft",
            ShiftStatus::Invited => "invited",
            ShiftStatus::Confirmed => "confirmed",
            ShiftStatus::Cancelled => "cancelled",
        }
    }

    pub fn was_filled(&self) -> bool {
        Self::FILLED.contains(self)
    }
}

impl std::str::FromStr for ShiftStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(ShiftStatus::Open),
            "filled" => Ok(ShiftStatus::Filled),
            "completed" => Ok(ShiftStatus::Completed),
            "draft" => Ok(ShiftStatus::Draft),
            "invited" => Ok(ShiftStatus::Invited),
            "confirmed" => Ok(ShiftStatus::Confirmed),
            "cancelled" => Ok(ShiftStatus::Cancelled),
            other => Err(format!("unknown shift status '{}'", other)),
        }
    }
}

/// The worker bound to a shift.
///
/// Incoming payloads carry this as a bare id, an object, or a list of either;
/// all of them collapse to a single reference here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WorkerRefInput")]
pub struct WorkerRef {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl WorkerRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WorkerRefInput {
    Id(String),
    Object {
        id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        email: Option<String>,
    },
    Many(Vec<WorkerRefInput>),
}

impl TryFrom<WorkerRefInput> for WorkerRef {
    type Error = String;

    fn try_from(value: WorkerRefInput) -> Result<Self, Self::Error> {
        match value {
            WorkerRefInput::Id(id) => Ok(WorkerRef::new(id)),
            WorkerRefInput::Object { id, name, email } => Ok(WorkerRef { id, name, email }),
            WorkerRefInput::Many(items) => items
                .into_iter()
                .next()
                .ok_or_else(|| "assignee list is empty".to_string())
                .and_then(WorkerRef::try_from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(from = "LocationInput")]
pub struct Location {
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LocationInput {
    Address(String),
    Resolved {
        #[serde(default, alias = "formatted_address")]
        address: Option<String>,
        #[serde(default, alias = "latitude")]
        lat: Option<f64>,
        #[serde(default, alias = "longitude", alias = "lon")]
        lng: Option<f64>,
    },
    Many(Vec<LocationInput>),
}

impl From<LocationInput> for Location {
    fn from(value: LocationInput) -> Self {
        match value {
            LocationInput::Address(address) => Location {
                address: Some(address),
                lat: None,
                lng: None,
            },
            LocationInput::Resolved { address, lat, lng } => Location { address, lat, lng },
            LocationInput::Many(items) => items.into_iter().next().map(Into::into).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftDraft {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub hourly_rate: Decimal,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: ShiftStatus,
    #[serde(default)]
    pub assignee: Option<WorkerRef>,
    #[serde(default)]
    pub recurring_series_id: Option<Uuid>,
    #[serde(default)]
    pub recurring_index: Option<u32>,
}

/// A shift already on the calendar, reduced to what the overlap rule needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingShift {
    pub id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub struct ShiftRecord {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub role: Option<String>,
    pub status: String,
    pub assignee_id: Option<String>,
    pub assignee_name: Option<String>,
    pub assignee_email: Option<String>,
}

impl From<&ShiftRecord> for ExistingShift {
    fn from(value: &ShiftRecord) -> Self {
        Self {
            id: value.id,
            start_time: value.start_time,
            end_time: value.end_time,
        }
    }
}

/// A previously worked shift returned by the history lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalShift {
    pub id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: ShiftStatus,
    pub assignee: Option<WorkerRef>,
}

impl TryFrom<ShiftRecord> for HistoricalShift {
    type Error = String;

    fn try_from(value: ShiftRecord) -> Result<Self, Self::Error> {
        let status = value.status.parse()?;
        let assignee = value.assignee_id.map(|id| WorkerRef {
            id,
            name: value.assignee_name,
            email: value.assignee_email,
        });
        Ok(Self {
            id: value.id,
            start_time: value.start_time,
            end_time: value.end_time,
            status,
            assignee,
        })
    }
}
