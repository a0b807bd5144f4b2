use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

use crate::models::shift::{ExistingShift, HistoricalShift, ShiftRecord, ShiftStatus};
use crate::models::smart_match::ShiftFingerprint;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("history query failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("history lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("history unavailable: {0}")]
    Unavailable(String),
}

/// Read access to previously worked shifts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryLookup: Send + Sync {
    /// Most recent filled or completed shift at the venue with the same
    /// fingerprint that still has a worker attached.
    async fn find_most_recent_match(
        &self,
        venue_id: Uuid,
        fingerprint: ShiftFingerprint,
    ) -> Result<Option<HistoricalShift>, LookupError>;
}

#[derive(Clone)]
pub struct ShiftStore {
    pool: PgPool,
}

impl ShiftStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Calendar shifts at the venue that intersect `[from, to)`, cancelled ones excluded.
    pub async fn list_overlapping(
        &self,
        venue_id: Uuid,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> crate::error::Result<Vec<ExistingShift>> {
        let rows = sqlx::query_as::<_, ShiftRecord>(
            r#"
            SELECT s.id, s.venue_id, s.start_time, s.end_time, s.role, s.status,
                   s.assignee_id, w.name AS assignee_name, w.email AS assignee_email
            FROM shifts s
            LEFT JOIN workers w ON w.id = s.assignee_id
            WHERE s.venue_id = $1
              AND s.status <> $4
              AND s.start_time < $3
              AND s.end_time > $2
            ORDER BY s.start_time ASC
            "#,
        )
        .bind(venue_id)
        .bind(from)
        .bind(to)
        .bind(ShiftStatus::Cancelled.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(ExistingShift::from).collect())
    }
}

#[async_trait]
impl HistoryLookup for ShiftStore {
    async fn find_most_recent_match(
        &self,
        venue_id: Uuid,
        fingerprint: ShiftFingerprint,
    ) -> Result<Option<HistoricalShift>, LookupError> {
        let row = sqlx::query_as::<_, ShiftRecord>(
            r#"
            SELECT s.id, s.venue_id, s.start_time, s.end_time, s.role, s.status,
                   s.assignee_id, w.name AS assignee_name, w.email AS assignee_email
            FROM shifts s
            LEFT JOIN workers w ON w.id = s.assignee_id
            WHERE s.venue_id = $1
              AND EXTRACT(DOW FROM s.start_time)::int = $2
              AND s.start_time::time = $3
              AND s.end_time::time = $4
              AND s.role IS NOT DISTINCT FROM $5
              AND s.status = ANY($6)
              AND s.assignee_id IS NOT NULL
            ORDER BY s.start_time DESC
            LIMIT 1
            "#,
        )
        .bind(venue_id)
        .bind(fingerprint.day_of_week as i32)
        .bind(fingerprint.start_time)
        .bind(fingerprint.end_time)
        .bind(fingerprint.role)
        .bind(
            ShiftStatus::FILLED
                .iter()
                .map(ShiftStatus::as_str)
                .collect::<Vec<_>>(),
        )
        .fetch_optional(&self.pool)
        .await?;

        row.map(HistoricalShift::try_from)
            .transpose()
            .map_err(LookupError::Unavailable)
    }
}
