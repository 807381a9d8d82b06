#![forbid(unsafe_code)]

//! Persisted guide configuration.
//!
//! The configuration is a small versioned JSON blob owned by an external
//! key-value store. Parsing is total: any structural anomaly — missing
//! blob, unparseable JSON, wrong version, count outside `{2, 3}`, unknown
//! mode, or `custom` mode without rectangles — silently degrades to the
//! default configuration. A broken guide setup must never block the camera
//! flow, so there is no error surface here at all; validation happens on
//! read and writes are unconditional.

use serde::{Deserialize, Serialize};

use crate::{GuideCount, NormRect};

/// Schema version this build reads and writes. Blobs with any other
/// version fall back to defaults (no migration).
pub const CONFIG_VERSION: u32 = 1;

/// Suggested storage key for embedders with a shared key-value namespace.
pub const CONFIG_KEY: &str = "cardframe:guide-config:v1";

/// Whether guides are computed live or replayed from saved rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideMode {
    /// Rectangles are derived from the count and current container size.
    Auto,
    /// Rectangles are the user's saved normalized rectangles.
    Custom,
}

/// The persisted guide setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideConfig {
    /// Schema version tag; must equal [`CONFIG_VERSION`].
    pub version: u32,
    /// How many guides to show.
    pub count: GuideCount,
    /// Auto layout or saved custom rectangles.
    pub mode: GuideMode,
    /// Present and non-empty only in custom mode.
    #[serde(
        rename = "customRects",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_rects: Option<Vec<NormRect>>,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            count: GuideCount::Two,
            mode: GuideMode::Auto,
            custom_rects: None,
        }
    }
}

impl GuideConfig {
    /// A custom configuration from saved rectangles.
    #[must_use]
    pub fn custom(count: GuideCount, rects: Vec<NormRect>) -> Self {
        Self {
            version: CONFIG_VERSION,
            count,
            mode: GuideMode::Custom,
            custom_rects: Some(rects),
        }
    }

    /// An auto configuration for the given count.
    #[must_use]
    pub fn auto(count: GuideCount) -> Self {
        Self {
            version: CONFIG_VERSION,
            count,
            mode: GuideMode::Auto,
            custom_rects: None,
        }
    }
}

/// Parse a raw configuration blob, falling back to the default on any
/// structural anomaly.
#[must_use]
pub fn parse_config(raw: &str) -> GuideConfig {
    let config = match serde_json::from_str::<GuideConfig>(raw) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(%err, "unreadable guide config, using defaults");
            return GuideConfig::default();
        }
    };

    if config.version != CONFIG_VERSION {
        tracing::warn!(
            version = config.version,
            "unknown guide config version, using defaults"
        );
        return GuideConfig::default();
    }

    if config.mode == GuideMode::Custom
        && config
            .custom_rects
            .as_ref()
            .is_none_or(|rects| rects.is_empty())
    {
        tracing::warn!("custom guide config without rects, using defaults");
        return GuideConfig::default();
    }

    config
}

// ---------------------------------------------------------------------------
// Persistence seam
// ---------------------------------------------------------------------------

/// The external key-value blob store holding the serialized configuration.
///
/// The engine defines the schema; the embedder defines the storage
/// mechanism (browser localStorage, a file, a settings service).
pub trait ConfigStore {
    /// The stored blob, if any.
    fn read(&self) -> Option<String>;
    /// Replace the stored blob.
    fn write(&mut self, raw: &str);
    /// Remove the stored blob.
    fn clear(&mut self);
}

/// Read and validate the stored configuration; absent or broken blobs
/// yield the default.
#[must_use]
pub fn load_config(store: &dyn ConfigStore) -> GuideConfig {
    match store.read() {
        Some(raw) => parse_config(&raw),
        None => GuideConfig::default(),
    }
}

/// Serialize and write unconditionally; validation happens on read.
pub fn save_config(store: &mut dyn ConfigStore, config: &GuideConfig) {
    match serde_json::to_string(config) {
        Ok(raw) => store.write(&raw),
        Err(err) => tracing::error!(%err, "failed to serialize guide config"),
    }
}

/// Remove the stored blob, reverting future reads to defaults.
pub fn clear_config(store: &mut dyn ConfigStore) {
    store.clear();
}

/// In-memory store for tests and embedders without platform storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a raw blob.
    #[must_use]
    pub fn with_blob(raw: impl Into<String>) -> Self {
        Self {
            blob: Some(raw.into()),
        }
    }
}

impl ConfigStore for MemoryStore {
    fn read(&self) -> Option<String> {
        self.blob.clone()
    }

    fn write(&mut self, raw: &str) {
        self.blob = Some(raw.to_owned());
    }

    fn clear(&mut self) {
        self.blob = None;
    }
}
