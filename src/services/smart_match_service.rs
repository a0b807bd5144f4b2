use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::models::shift::{HistoricalShift, ShiftDraft};
use crate::models::smart_match::{ShiftFingerprint, SmartMatch, ViewRange};
use crate::services::history_service::{HistoryLookup, LookupError};

pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Suggests workers for unfilled shifts from who worked the same slot before.
#[derive(Clone)]
pub struct SmartMatchService {
    history: Arc<dyn HistoryLookup>,
    lookup_timeout: Duration,
}

impl SmartMatchService {
    pub fn new(history: Arc<dyn HistoryLookup>, lookup_timeout: Duration) -> Self {
        Self {
            history,
            lookup_timeout,
        }
    }

    /// One match per draft starting inside `view_range`, in input order.
    /// Failed or slow lookups leave that draft without a suggestion.
    pub async fn compute_smart_matches(
        &self,
        drafts: &[ShiftDraft],
        venue_id: Uuid,
        view_range: ViewRange,
    ) -> Vec<SmartMatch> {
        let visible: Vec<&ShiftDraft> = drafts
            .iter()
            .filter(|shift| view_range.contains(shift.start_time))
            .collect();

        let mut lookups = JoinSet::new();
        for (index, shift) in visible.iter().enumerate() {
            let history = Arc::clone(&self.history);
            let fingerprint = ShiftFingerprint::of(shift);
            let timeout = self.lookup_timeout;
            lookups.spawn(async move {
                let outcome = match tokio::time::timeout(
                    timeout,
                    history.find_most_recent_match(venue_id, fingerprint),
                )
                .await
                {
                    Ok(result) => result,
                    Err(_) => Err(LookupError::Timeout(timeout)),
                };
                (index, outcome)
            });
        }

        let mut found: Vec<Option<HistoricalShift>> = vec![None; visible.len()];
        while let Some(joined) = lookups.join_next().await {
            match joined {
                Ok((index, Ok(history))) => found[index] = history,
                Ok((index, Err(error))) => {
                    tracing::warn!(
                        venue_id = %venue_id,
                        shift_index = index,
                        error = %error,
                        "smart match lookup failed, leaving shift without suggestion"
                    );
                }
                Err(error) => {
                    tracing::warn!(venue_id = %venue_id, error = %error, "smart match lookup task aborted");
                }
            }
        }

        let matches: Vec<SmartMatch> = visible
            .into_iter()
            .zip(found)
            .map(|(shift, history)| to_smart_match(shift, history))
            .collect();

        tracing::debug!(
            venue_id = %venue_id,
            considered = matches.len(),
            suggested = matches.iter().filter(|m| m.suggested_candidate.is_some()).count(),
            "computed smart matches"
        );

        matches
    }

    /// Same as [`compute_smart_matches`](Self::compute_smart_matches) but gives up once
    /// `cancel` fires, e.g. when the visible range has moved on. Outstanding lookups are
    /// aborted and `None` is returned so stale suggestions are never applied.
    pub async fn compute_smart_matches_until(
        &self,
        drafts: &[ShiftDraft],
        venue_id: Uuid,
        view_range: ViewRange,
        cancel: &CancellationToken,
    ) -> Option<Vec<SmartMatch>> {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(venue_id = %venue_id, "smart match batch discarded after view change");
                None
            }
            matches = self.compute_smart_matches(drafts, venue_id, view_range) => Some(matches),
        }
    }
}

fn to_smart_match(shift: &ShiftDraft, history: Option<HistoricalShift>) -> SmartMatch {
    let mut smart_match = SmartMatch::unmatched(shift);
    if let Some(previous) = history {
        if let Some(worker) = previous.assignee {
            smart_match.suggested_candidate = Some(worker);
            smart_match.previous_shift_date = Some(previous.start_time);
        }
    }
    smart_match
}
