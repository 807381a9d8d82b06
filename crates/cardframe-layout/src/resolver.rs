#![forbid(unsafe_code)]

//! Guide resolution: from configuration and container size to normalized
//! rectangles, with memoization.
//!
//! Layout recomputation is driven off a container-size signal plus the
//! configuration: whenever `(count, mode, customRects, w, h)` changes the
//! embedder resolves again. Resize storms during rotation re-query the
//! same inputs repeatedly, so [`ResolverCache`] memoizes results behind a
//! key that fingerprints all inputs affecting the output.
//!
//! # Invalidation
//!
//! The container size and the configuration are both part of the cache
//! key, so ordinary changes need no explicit invalidation. Call
//! [`ResolverCache::invalidate_all`] only when something outside the key
//! changes (e.g. layout tuning constants in a dev build).

use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};

use crate::config::{GuideConfig, GuideMode};
use crate::{NormRect, compute_guides_auto};

/// Resolve the guide rectangles for a configuration and container size.
///
/// Custom mode with saved rectangles replays them (re-clamped, since the
/// blob is external input); anything else computes the auto layout for the
/// configured count. Degenerate containers resolve to an empty sequence.
#[must_use]
pub fn resolve_guides(config: &GuideConfig, w: f32, h: f32) -> Vec<NormRect> {
    if w <= 0.0 || h <= 0.0 {
        return Vec::new();
    }

    if config.mode == GuideMode::Custom
        && let Some(rects) = &config.custom_rects
        && !rects.is_empty()
    {
        return rects.iter().map(NormRect::clamped).collect();
    }

    compute_guides_auto(config.count, w, h)
}

/// Key for resolver cache lookups.
///
/// Includes every parameter that affects resolution: the count, the mode,
/// a fingerprint of the custom rectangles, and the container dimensions
/// (as bit patterns, for `Hash`/`Eq`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolveKey {
    count: u8,
    mode: GuideMode,
    custom_hash: Option<u64>,
    w_bits: u32,
    h_bits: u32,
}

impl ResolveKey {
    /// Build the key for a configuration and container size.
    #[must_use]
    pub fn new(config: &GuideConfig, w: f32, h: f32) -> Self {
        Self {
            count: config.count.count() as u8,
            mode: config.mode,
            custom_hash: config.custom_rects.as_deref().map(Self::hash_rects),
            w_bits: w.to_bits(),
            h_bits: h.to_bits(),
        }
    }

    fn hash_rects(rects: &[NormRect]) -> u64 {
        let mut hasher = FxHasher::default();
        rects.len().hash(&mut hasher);
        for r in rects {
            r.x.to_bits().hash(&mut hasher);
            r.y.to_bits().hash(&mut hasher);
            r.w.to_bits().hash(&mut hasher);
            r.h.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }
}

/// Bounded memoization cache for [`resolve_guides`].
///
/// Eviction is oldest-insertion-first; the working set during a resize is
/// tiny, so anything beyond a handful of entries exists only to bound
/// memory on pathological resize storms.
#[derive(Debug)]
pub struct ResolverCache {
    entries: FxHashMap<ResolveKey, Vec<NormRect>>,
    order: VecDeque<ResolveKey>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl ResolverCache {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: FxHashMap::default(),
            order: VecDeque::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Number of cached entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups served from the cache.
    #[inline]
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to compute.
    #[inline]
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drop every cached entry. Statistics are kept.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn insert(&mut self, key: ResolveKey, rects: Vec<NormRect>) {
        if self.entries.len() >= self.capacity
            && let Some(oldest) = self.order.pop_front()
        {
            self.entries.remove(&oldest);
        }
        self.order.push_back(key);
        self.entries.insert(key, rects);
    }
}

impl Default for ResolverCache {
    fn default() -> Self {
        Self::new(32)
    }
}

/// Memoized [`resolve_guides`].
#[must_use]
pub fn resolve_guides_cached(
    config: &GuideConfig,
    w: f32,
    h: f32,
    cache: &mut ResolverCache,
) -> Vec<NormRect> {
    let key = ResolveKey::new(config, w, h);

    if let Some(rects) = cache.entries.get(&key) {
        cache.hits += 1;
        return rects.clone();
    }

    cache.misses += 1;
    let rects = resolve_guides(config, w, h);
    cache.insert(key, rects.clone());
    rects
}
