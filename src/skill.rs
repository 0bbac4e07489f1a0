//! Search orchestrator
//!
//! [`RadioSkill`] is the per-utterance entry point the host invokes. It
//! composes the query normalizer, the result cache, the directory client
//! and the similarity scorer into a finite, lazily-produced stream of
//! [`MediaCandidate`] records. Each call re-runs the whole pipeline; no
//! state is shared between calls beyond the on-disk cache.
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
//!     let mut candidates = std::pin::pin!(skill.search_radio("radio NPR", MediaType::Radio));
//!     while let Some(candidate) = candidates.next().await {
//!         println!("{:>4}  {}", candidate.match_confidence, candidate.title);
//!     }
//!     Ok(())
//! }
//! ```

use crate::cache::StationCache;
use crate::client::RadioBrowserClient;
use crate::config::SkillConfig;
use crate::error::Result;
use crate::models::{MediaCandidate, MediaType, PlaybackType, Station};
use crate::probe::{AlwaysAlive, StationProbe};
use crate::query::QueryPlan;
use crate::score;
use crate::vocab::Vocabulary;
use futures::stream::{BoxStream, Stream, StreamExt};
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Display name stamped on candidates as `author`
pub const SKILL_NAME: &str = "Radio Browser";

/// Identifier of this skill within the host
pub const SKILL_ID: &str = "radiobrowser-skill";

/// Host-facing interface of a media-search skill
///
/// The host calls [`MediaSkill::search`] once per user utterance and
/// consumes the stream to completion, or abandons it early; either way
/// no resources are leaked. Overall ranking across skills is the host's
/// job: candidates carry a match confidence but are not sorted here.
pub trait MediaSkill: Debug + Send + Sync {
    /// Human-readable skill name
    fn name(&self) -> &str;

    /// Unique skill identifier
    fn skill_id(&self) -> &str;

    /// Media types this skill can answer for
    fn supported_media(&self) -> &[MediaType];

    /// Search for playable candidates matching the phrase
    fn search<'a>(
        &'a self,
        phrase: &'a str,
        media_type: MediaType,
    ) -> BoxStream<'a, MediaCandidate>;
}

/// Internet-radio search skill backed by the Radio Browser directory
#[derive(Debug)]
pub struct RadioSkill {
    config: SkillConfig,
    vocab: Vocabulary,
    client: RadioBrowserClient,
    probe: Arc<dyn StationProbe>,
    cache_db: PathBuf,
}

impl RadioSkill {
    /// Create a skill instance
    ///
    /// `data_root` is the host-provided per-installation directory; the
    /// cache database lives under it (see [`SkillConfig::cache_db_path`]).
    pub async fn new(config: SkillConfig, data_root: &Path) -> Result<Self> {
        let mut builder = RadioBrowserClient::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs));
        if let Some(api_base) = &config.api_base {
            builder = builder.api_base(api_base);
        }
        let client = builder.build().await?;

        let mut vocab = Vocabulary::for_locale(&config.locale);
        for term in &config.trigger_vocabulary {
            vocab.register_trigger(term);
        }

        let cache_db = config.cache_db_path(data_root);
        tracing::info!("Station cache located at {}", cache_db.display());

        Ok(Self {
            config,
            vocab,
            client,
            probe: Arc::new(AlwaysAlive),
            cache_db,
        })
    }

    /// Replace the liveness probe (default: every station alive)
    pub fn with_probe(mut self, probe: Arc<dyn StationProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// The active configuration
    pub fn config(&self) -> &SkillConfig {
        &self.config
    }

    /// The active vocabulary
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Search for radio stations matching an utterance
    ///
    /// Runs the full pipeline: normalize the phrase into query variants,
    /// resolve each variant through the cache and/or the directory, and
    /// yield one scored candidate per station, lazily. The stream is
    /// finite, restartable per call, and safe to abandon early: the
    /// cache handle is scoped to each query and released on drop.
    ///
    /// Failures never surface to the host as errors: a failed query
    /// variant contributes zero candidates and is logged.
    pub fn search_radio<'a>(
        &'a self,
        phrase: &'a str,
        media_type: MediaType,
    ) -> impl Stream<Item = MediaCandidate> + Send + 'a {
        async_stream::stream! {
            if !self.config.enabled {
                tracing::debug!("Skill disabled, skipping search");
                return;
            }

            let plan = QueryPlan::build(phrase, media_type, &self.vocab);
            tracing::debug!(
                "Searching for '{}': base score {}, {} query variants",
                phrase,
                plan.base_score,
                plan.queries.len()
            );

            for query in &plan.queries {
                for station in self.stations_for(query).await {
                    yield self.candidate_from(&station, query, plan.base_score);
                }
            }
        }
    }

    /// Resolve one query variant to a station list, degrading on failure
    async fn stations_for(&self, query: &str) -> Vec<Station> {
        if self.config.cache_enabled {
            match StationCache::open(&self.cache_db) {
                Ok(mut cache) => match self.search_with_cache(&mut cache, query).await {
                    Ok(stations) => return stations,
                    Err(err) => {
                        tracing::warn!(
                            "Cached search for '{}' failed: {}; querying directory directly",
                            query,
                            err
                        );
                        // Drop the entry so a bad row cannot wedge this
                        // query on every subsequent search
                        if let Err(err) = cache.delete(query) {
                            tracing::debug!(
                                "Could not drop cache entry '{}': {}",
                                query,
                                err
                            );
                        }
                    }
                },
                // Degrade to a cache-less search rather than failing
                Err(err) => tracing::warn!("{}; searching without cache", err),
            }
        }

        match self.client.search_by_name(query, true).await {
            Ok(stations) => stations,
            Err(err) => {
                tracing::warn!("Directory search for '{}' failed: {}", query, err);
                Vec::new()
            }
        }
    }

    /// Cached lookup with post-fetch maintenance, falling back to the
    /// directory on a miss
    // The cache handle is taken by `&mut` so the future stays `Send`:
    // the underlying connection is `Send` but not `Sync`.
    async fn search_with_cache(
        &self,
        cache: &mut StationCache,
        query: &str,
    ) -> Result<Vec<Station>> {
        let entries = cache.get(query, true)?;
        let cached = self.sweep_dead_stations(cache, entries).await?;
        if !cached.is_empty() {
            tracing::debug!("Found {} cached stations for '{}'", cached.len(), query);
            return Ok(cached);
        }

        tracing::debug!("Cache miss, querying directory for '{}'", query);
        let stations = self.client.search_by_name(query, true).await?;
        for station in stations.iter().filter(|s| !s.name.is_empty()) {
            cache.add(query, station)?;
        }
        Ok(stations)
    }

    /// Drop stations whose stream the probe reports dead
    ///
    /// Emptied keys are deleted, surviving lists written back, so the
    /// cache self-heals on every read. The probe is asked once per
    /// distinct stream URL within the pass.
    async fn sweep_dead_stations(
        &self,
        cache: &mut StationCache,
        entries: Vec<(String, Vec<Station>)>,
    ) -> Result<Vec<Station>> {
        let mut alive_by_url: HashMap<String, bool> = HashMap::new();
        let mut survivors = Vec::new();

        for (key, stations) in entries {
            let mut kept = Vec::with_capacity(stations.len());
            for station in stations {
                let alive = match alive_by_url.get(&station.url) {
                    Some(alive) => *alive,
                    None => {
                        let alive = self.probe.is_alive(&station).await;
                        alive_by_url.insert(station.url.clone(), alive);
                        alive
                    }
                };
                if alive {
                    kept.push(station);
                } else {
                    tracing::debug!("Dropping dead station '{}' from '{}'", station.name, key);
                }
            }
            if kept.is_empty() {
                cache.delete(&key)?;
            } else {
                cache.replace(&key, &kept)?;
            }
            survivors.extend(kept);
        }

        Ok(survivors)
    }

    fn candidate_from(&self, station: &Station, query: &str, base_score: i32) -> MediaCandidate {
        MediaCandidate {
            match_confidence: score::match_confidence(
                base_score,
                &station.name,
                query,
                self.config.similarity_scale,
            ),
            media_type: MediaType::Radio,
            uri: station.url_resolved.clone(),
            playback: PlaybackType::Audio,
            image: station.favicon.clone(),
            bg_image: String::new(),
            skill_icon: self.config.skill_icon.clone(),
            title: station.name.clone(),
            artist: station.name.clone(),
            author: SKILL_NAME.to_string(),
            length: 0,
        }
    }
}

impl MediaSkill for RadioSkill {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    fn skill_id(&self) -> &str {
        SKILL_ID
    }

    fn supported_media(&self) -> &[MediaType] {
        &[MediaType::Radio]
    }

    fn search<'a>(
        &'a self,
        phrase: &'a str,
        media_type: MediaType,
    ) -> BoxStream<'a, MediaCandidate> {
        self.search_radio(phrase, media_type).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn skill_with(config: SkillConfig) -> RadioSkill {
        let dir = tempfile::tempdir().unwrap();
        RadioSkill::new(config, dir.path()).await.unwrap()
    }

    #[tokio::test]
    async fn test_candidate_fields() {
        let skill = skill_with(SkillConfig::default()).await;
        let station = Station {
            name: "NPR News".to_string(),
            url: "http://stream.example/npr".to_string(),
            url_resolved: "http://stream.example/npr.mp3".to_string(),
            favicon: "http://img.example/npr.png".to_string(),
            stationuuid: "abc".to_string(),
        };

        let candidate = skill.candidate_from(&station, "NPR News", 30);

        assert_eq!(candidate.match_confidence, 100); // 30 + 100, clamped
        assert_eq!(candidate.media_type, MediaType::Radio);
        assert_eq!(candidate.playback, PlaybackType::Audio);
        assert_eq!(candidate.uri, "http://stream.example/npr.mp3");
        assert_eq!(candidate.image, "http://img.example/npr.png");
        assert_eq!(candidate.title, "NPR News");
        assert_eq!(candidate.artist, "NPR News");
        assert_eq!(candidate.author, SKILL_NAME);
        assert_eq!(candidate.length, 0);
    }

    #[tokio::test]
    async fn test_candidate_confidence_scale() {
        let skill = skill_with(SkillConfig {
            similarity_scale: 80,
            ..Default::default()
        })
        .await;
        let station = Station::new("jazz", "http://stream.example/jazz");
        let candidate = skill.candidate_from(&station, "jazz", 0);
        assert_eq!(candidate.match_confidence, 80);
    }

    #[tokio::test]
    async fn test_disabled_skill_yields_nothing() {
        let skill = skill_with(SkillConfig {
            enabled: false,
            ..Default::default()
        })
        .await;
        let candidates: Vec<_> = skill
            .search_radio("radio NPR", MediaType::Radio)
            .collect()
            .await;
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_search_runs_on_a_spawned_task() {
        // tokio::spawn requires the future to be Send, so this also
        // pins down that the search stream can cross threads.
        let skill = Arc::new(
            skill_with(SkillConfig {
                enabled: false,
                ..Default::default()
            })
            .await,
        );
        let handle = tokio::spawn(async move {
            skill
                .search_radio("radio NPR", MediaType::Radio)
                .collect::<Vec<_>>()
                .await
        });
        assert!(handle.await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_supported_media() {
        let skill = skill_with(SkillConfig::default()).await;
        assert_eq!(skill.supported_media(), &[MediaType::Radio]);
        assert_eq!(skill.skill_id(), SKILL_ID);
    }
}
