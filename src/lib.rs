//! Voice-assistant media-search skill for internet radio stations
//!
//! This crate implements a "skill" plugin a voice-assistant host loads
//! to answer spoken or typed requests for internet radio. It queries the
//! community Radio Browser directory, caches station lookups in a local
//! SQLite database, scores results by name similarity to the request,
//! and yields playable candidates to the host as a lazy stream.
//!
//! # Pipeline
//!
//! - **Query normalization** ([`QueryPlan`]): the utterance is scored
//!   against the radio/trigger vocabulary and expanded into an ordered
//!   set of query variants.
//! - **Result cache** ([`StationCache`]): station lookups are persisted
//!   per query string with fuzzy key matching, and swept for dead
//!   stations on every read.
//! - **Directory search** ([`RadioBrowserClient`]): cache misses fall
//!   through to the directory's search-by-name endpoint.
//! - **Scoring** ([`score`]): candidates carry a confidence of base
//!   score plus scaled Damerau–Levenshtein name similarity, clamped to
//!   at most 100.
//!
//! # Example
//!
//! ```no_run
//! use futures::StreamExt;
//! use radiobrowser_skill::{MediaType, RadioSkill, SkillConfig};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let skill = RadioSkill::new(SkillConfig::default(), Path::new("/data/skill")).await?;
//!
//!     let mut candidates = std::pin::pin!(skill.search_radio("radio NPR", MediaType::Radio));
//!     while let Some(candidate) = candidates.next().await {
//!         println!("{:>4}  {}  {}", candidate.match_confidence, candidate.title, candidate.uri);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Error handling
//!
//! The search stream itself never fails: a query variant whose cache or
//! network lookup errors contributes zero candidates and logs a warning,
//! so a flaky directory or a corrupt cache can never take the host down.
//! The lower-level building blocks ([`RadioBrowserClient`],
//! [`StationCache`]) return structured [`Error`] values, with cache
//! open failures kept distinct ([`Error::CacheUnavailable`]) so callers
//! can degrade to a cache-less search.
//!
//! # Non-goals
//!
//! The skill does not probe stream health (see [`probe::AlwaysAlive`]),
//! does not rank by audio quality, and does not play anything itself;
//! it only returns ranked candidate URIs for the host to play.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod probe;
pub mod query;
pub mod score;
pub mod skill;
pub mod vocab;

// Re-exports
pub use cache::StationCache;
pub use client::{ClientBuilder, RadioBrowserClient};
pub use config::SkillConfig;
pub use error::{Error, Result};
pub use models::{MediaCandidate, MediaType, PlaybackType, Station};
pub use probe::{AlwaysAlive, StationProbe};
pub use query::QueryPlan;
pub use skill::{MediaSkill, RadioSkill, SKILL_ID, SKILL_NAME};
pub use vocab::{Vocabulary, KEYWORD_SAMPLES};
