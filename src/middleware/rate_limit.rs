use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

const WINDOW: Duration = Duration::from_secs(1);

#[derive(Debug)]
struct Window {
    start: Instant,
    used: u32,
}

/// Fixed one-second request budget shared by every route it wraps.
#[derive(Clone, Debug)]
pub struct RequestBudget {
    per_second: u32,
    window: Arc<Mutex<Window>>,
}

impl RequestBudget {
    pub fn per_second(per_second: u32) -> Self {
        Self {
            per_second: per_second.max(1),
            window: Arc::new(Mutex::new(Window {
                start: Instant::now(),
                used: 0,
            })),
        }
    }

    /// Takes one request from the budget, or returns how long until it refills.
    fn try_acquire(&self, now: Instant) -> Result<(), Duration> {
        let mut window = match self.window.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let elapsed = now.saturating_duration_since(window.start);
        if elapsed >= WINDOW {
            window.start = now;
            window.used = 0;
        }
        if window.used < self.per_second {
            window.used += 1;
            Ok(())
        } else {
            Err(WINDOW.saturating_sub(now.saturating_duration_since(window.start)))
        }
    }
}

pub async fn request_budget_middleware(
    State(budget): State<RequestBudget>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Err(retry_in) = budget.try_acquire(Instant::now()) {
        tracing::warn!(path = %req.uri().path(), "request budget exhausted");
        let retry_after = retry_in.as_secs().max(1).to_string();
        return (
            StatusCode::TOO_MANY_REQUESTS,
            [(header::RETRY_AFTER, retry_after)],
            Json(json!({ "error": "Too many requests", "code": "RATE_LIMITED" })),
        )
            .into_response();
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_refills_after_window() {
        let budget = RequestBudget::per_second(2);
        let start = Instant::now();

        assert!(budget.try_acquire(start).is_ok());
        assert!(budget.try_acquire(start).is_ok());
        assert!(budget.try_acquire(start).is_err());
        assert!(budget.try_acquire(start + WINDOW).is_ok());
    }

    #[test]
    fn zero_budget_still_admits_one_request() {
        let budget = RequestBudget::per_second(0);
        let now = Instant::now();
        assert!(budget.try_acquire(now).is_ok());
        assert!(budget.try_acquire(now).is_err());
    }
}
