//! Per-client-IP fixed-window rate limiting.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;

use agentforge_types::config::RateLimitConfig;

use crate::http::error::AppError;
use crate::state::AppState;

/// Entries are pruned once the map grows past this many clients.
const PRUNE_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window counter keyed by client address.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<DashMap<String, Window>>,
    enabled: bool,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            enabled: config.enabled,
            max_requests: config.max_requests,
            window: Duration::from_secs(config.window_secs),
        }
    }

    /// Count one request from `client`. Returns the seconds until the window
    /// resets when the limit is exceeded.
    pub fn check(&self, client: &str, now: Instant) -> Result<(), u64> {
        if !self.enabled {
            return Ok(());
        }
        if self.windows.len() > PRUNE_THRESHOLD {
            let window = self.window;
            self.windows
                .retain(|_, w| now.saturating_duration_since(w.started) < window);
        }

        let mut entry = self.windows.entry(client.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });
        let elapsed = now.saturating_duration_since(entry.started);
        if elapsed >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }
        if entry.count >= self.max_requests {
            let remaining = self.window.saturating_sub(now.saturating_duration_since(entry.started));
            return Err(remaining.as_secs().max(1));
        }
        entry.count += 1;
        Ok(())
    }
}

/// Middleware applying [`RateLimiter`] to every request it wraps.
pub async fn limit_by_ip(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    if let Err(retry_after_secs) = state.rate_limiter.check(&client, Instant::now()) {
        tracing::warn!(client = %client, "rate limit exceeded");
        return AppError::RateLimited { retry_after_secs }.into_response();
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: u32) -> RateLimiter {
        RateLimiter::new(&RateLimitConfig {
            enabled: true,
            max_requests,
            window_secs: 60,
        })
    }

    #[test]
    fn test_limit_per_client() {
        let limiter = limiter(2);
        let now = Instant::now();
        assert!(limiter.check("10.0.0.1", now).is_ok());
        assert!(limiter.check("10.0.0.1", now).is_ok());
        let retry = limiter.check("10.0.0.1", now).unwrap_err();
        assert_eq!(retry, 60);
        assert!(limiter.check("10.0.0.2", now).is_ok());
    }

    #[test]
    fn test_window_resets() {
        let limiter = limiter(1);
        let start = Instant::now();
        assert!(limiter.check("c", start).is_ok());
        assert!(limiter.check("c", start + Duration::from_secs(30)).is_err());
        assert!(limiter.check("c", start + Duration::from_secs(61)).is_ok());
    }

    #[test]
    fn test_disabled_never_limits() {
        let limiter = RateLimiter::new(&RateLimitConfig {
            enabled: false,
            max_requests: 0,
            window_secs: 60,
        });
        assert!(limiter.check("c", Instant::now()).is_ok());
    }
}
