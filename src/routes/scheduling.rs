use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use chrono::NaiveDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::scheduling_dto::{
        ExpandRecurrencePayload, ExpandRecurrenceResponse, SmartMatchListResponse,
        SmartMatchPayload, ValidateShiftPayload, ValidateShiftResponse,
    },
    error::Result,
    models::{
        shift::{ExistingShift, ShiftDraft},
        smart_match::ViewRange,
    },
    services::{
        recurrence_service::{expand_recurrence, find_series_conflicts},
        validity_service::{check_overlap, check_validity, ShiftWindow},
    },
    AppState,
};

/// Inline shifts win; otherwise the venue's calendar is read for the window.
async fn load_existing(
    state: &AppState,
    inline: Option<Vec<ExistingShift>>,
    venue_id: Option<Uuid>,
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> Result<Vec<ExistingShift>> {
    match (inline, venue_id) {
        (Some(shifts), _) => Ok(shifts),
        (None, Some(venue_id)) => state.shift_store.list_overlapping(venue_id, from, to).await,
        (None, None) => Ok(Vec::new()),
    }
}

#[utoipa::path(
    post,
    path = "/api/shifts/validate",
    request_body = ValidateShiftPayload,
    responses(
        (status = 200, description = "Shift can be created", body = Json<ValidateShiftResponse>),
        (status = 409, description = "Time slot already booked"),
        (status = 422, description = "Invalid time range or shift in the past")
    )
)]
#[axum::debug_handler]
pub async fn validate_shift(
    State(state): State<AppState>,
    Json(payload): Json<ValidateShiftPayload>,
) -> Result<impl IntoResponse> {
    let window = ShiftWindow::new(payload.shift.start_time, payload.shift.end_time);
    check_validity(window, &[])?;

    let existing = load_existing(
        &state,
        payload.existing_shifts,
        payload.venue_id,
        window.start_time,
        window.end_time,
    )
    .await?;

    check_overlap(window, &existing)?;
    Ok(Json(ValidateShiftResponse { valid: true }))
}

#[utoipa::path(
    post,
    path = "/api/shifts/recurrence/expand",
    request_body = ExpandRecurrencePayload,
    responses(
        (status = 200, description = "Expanded series with per-instance conflicts", body = Json<ExpandRecurrenceResponse>),
        (status = 400, description = "Invalid payload or recurrence settings"),
        (status = 409, description = "First shift overlaps an existing one"),
        (status = 422, description = "First shift has an invalid time range or is in the past")
    )
)]
#[axum::debug_handler]
pub async fn expand_recurring_shift(
    State(state): State<AppState>,
    Json(payload): Json<ExpandRecurrencePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let config = payload.recurrence.to_config()?;
    let base = ShiftDraft::from(payload.shift);
    let window = ShiftWindow::from(&base);

    // Ordering and past-day rules need no calendar, so they fail before any query.
    check_validity(window, &[])?;

    let instances = expand_recurrence(&base, &config);
    let (from, to) = match (instances.first(), instances.last()) {
        (Some(first), Some(last)) => (first.start_time, last.end_time),
        _ => (base.start_time, base.end_time),
    };
    let existing = load_existing(&state, payload.existing_shifts, payload.venue_id, from, to).await?;

    check_overlap(window, &existing)?;
    let conflicts = find_series_conflicts(instances.get(1..).unwrap_or_default(), &existing);

    let series_id = instances
        .first()
        .and_then(|shift| shift.recurring_series_id)
        .unwrap_or_else(Uuid::new_v4);

    if !conflicts.is_empty() {
        tracing::info!(
            series_id = %series_id,
            conflicts = conflicts.len(),
            "recurring series overlaps existing shifts"
        );
    }

    Ok(Json(ExpandRecurrenceResponse {
        series_id,
        instances,
        conflicts,
    }))
}

#[utoipa::path(
    post,
    path = "/api/venues/{venue_id}/smart-matches",
    params(
        ("venue_id" = Uuid, Path, description = "Venue ID")
    ),
    request_body = SmartMatchPayload,
    responses(
        (status = 200, description = "One suggestion entry per visible draft shift", body = Json<SmartMatchListResponse>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn smart_matches(
    State(state): State<AppState>,
    Path(venue_id): Path<Uuid>,
    Json(payload): Json<SmartMatchPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let view_range = ViewRange::new(payload.view, payload.anchor_date);
    let drafts: Vec<ShiftDraft> = payload.shifts.into_iter().map(Into::into).collect();

    let items = state
        .smart_match_service
        .compute_smart_matches(&drafts, venue_id, view_range)
        .await;

    Ok(Json(SmartMatchListResponse { items }))
}
