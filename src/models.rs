//! Data models for the Radio Browser directory API and the host interface
//!
//! This module contains the structures needed to deserialize directory
//! API responses and the candidate records handed back to the host.

use serde::{Deserialize, Serialize};

// ============================================================================
// Directory API Models
// ============================================================================

/// A station record from the Radio Browser directory
///
/// Only the fields the skill actually consumes are declared; the API
/// returns many more, which serde ignores.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Station {
    /// Station display name (may be empty for junk directory entries)
    #[serde(default)]
    pub name: String,
    /// Registered stream URL, as submitted to the directory
    #[serde(default)]
    pub url: String,
    /// Stream URL after the directory resolved playlists/redirects
    #[serde(default)]
    pub url_resolved: String,
    /// Station artwork URL (may be empty)
    #[serde(default)]
    pub favicon: String,
    /// Directory UUID for the station
    #[serde(default)]
    pub stationuuid: String,
}

impl Station {
    /// Create a station from its name and stream URL (tests, fixtures)
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            name: name.into(),
            url_resolved: url.clone(),
            url,
            favicon: String::new(),
            stationuuid: String::new(),
        }
    }
}

// ============================================================================
// Host Interface Models
// ============================================================================

/// Media type hint supplied by the host, and the type stamped on candidates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Unclassified request
    #[default]
    Generic,
    /// Generic audio
    Audio,
    /// Music request
    Music,
    /// Internet radio request
    Radio,
    /// Podcast request
    Podcast,
    /// Video request
    Video,
}

/// How the host should play a candidate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackType {
    /// Audio-only playback
    #[default]
    Audio,
    /// Video playback
    Video,
}

/// A ranked, playable result yielded to the host for one station
///
/// `length` is always 0: live streams have no known duration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaCandidate {
    /// Match confidence; clamped to at most 100, may be negative
    pub match_confidence: i32,
    /// Always [`MediaType::Radio`] for this skill
    pub media_type: MediaType,
    /// Stream URI to play
    pub uri: String,
    /// Always [`PlaybackType::Audio`] for this skill
    pub playback: PlaybackType,
    /// Station artwork URI (may be empty)
    pub image: String,
    /// Background artwork URI (unused, empty)
    pub bg_image: String,
    /// Path or URI of the skill's icon
    pub skill_icon: String,
    /// Station name
    pub title: String,
    /// Station name (stations have no separate artist)
    pub artist: String,
    /// Skill display name
    pub author: String,
    /// Stream duration in seconds; 0 means live/unknown
    pub length: u64,
}
