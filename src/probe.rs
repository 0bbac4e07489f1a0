//! Station liveness probing
//!
//! Cached stations are re-checked on every read so the cache self-heals
//! as dead streams are detected. The probe is pluggable; the default
//! implementation reports every station alive.

use crate::models::Station;
use async_trait::async_trait;
use std::fmt::Debug;

/// Predicate deciding whether a station's stream is still reachable
///
/// Implementations must be cheap to call repeatedly: the orchestrator
/// memoizes results per stream URL within one maintenance pass, but a
/// fresh pass runs on every search.
#[async_trait]
pub trait StationProbe: Debug + Send + Sync {
    /// Whether the station's stream is currently reachable
    async fn is_alive(&self, station: &Station) -> bool;
}

/// Probe that reports every station alive
///
/// Placeholder for a real network health check.
// TODO: probe the stream URL with a HEAD request and a short timeout,
// treating 2xx/3xx as alive.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysAlive;

#[async_trait]
impl StationProbe for AlwaysAlive {
    async fn is_alive(&self, _station: &Station) -> bool {
        true
    }
}
