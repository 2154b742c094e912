//! Cache for generated conversation practice situations.
//!
//! Generating situations is slow (it asks a chat model), so the list is
//! produced once and reused until [`SituationCache::clear`] is called. The
//! cache is an ordinary value owned by the caller and can be shared between
//! threads behind an `Arc`.

use parking_lot::{ReentrantMutex, RwLock};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Situation {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "imageUrl", alias = "image_url", default)]
    pub image_url: String,
    pub level: Level,
}

/// A situation as the chat model writes it, before it gets an id and image.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedSituation {
    pub title: String,
    pub description: String,
    pub level: Level,
}

#[derive(Deserialize)]
struct GeneratedSituations {
    situations: Vec<GeneratedSituation>,
}

/// Portrait shown next to the situation at `index`. Even positions use the
/// women set, odd positions the men set.
pub fn portrait_url(index: usize) -> String {
    let set = if index % 2 == 0 { "women" } else { "men" };
    format!("https://randomuser.me/api/portraits/{set}/{}.jpg", 20 + index * 4)
}

/// Numbers generated situations from `"1"` and attaches a portrait to each.
pub fn format_situations(generated: Vec<GeneratedSituation>) -> Vec<Situation> {
    generated
        .into_iter()
        .enumerate()
        .map(|(index, g)| Situation {
            id: (index + 1).to_string(),
            title: g.title,
            description: g.description,
            image_url: portrait_url(index),
            level: g.level,
        })
        .collect()
}

/// Parses the model's `{"situations": [...]}` reply into cacheable situations.
pub fn parse_situations(json: &str) -> Result<Vec<Situation>> {
    let reply: GeneratedSituations = serde_json::from_str(json)?;
    Ok(format_situations(reply.situations))
}

#[derive(Debug, Default)]
pub struct SituationCache {
    situations: RwLock<Option<Arc<[Situation]>>>,
    /// Serializes loaders. The situation lock is never held while a loader
    /// runs, so readers are not blocked and a loader may use the cache.
    loading: ReentrantMutex<()>,
}

impl SituationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached situations, or runs `loader` and caches its result.
    /// Loader errors and empty lists are returned without caching anything.
    pub fn get_or_try_load<F>(&self, loader: F) -> Result<Arc<[Situation]>>
    where
        F: FnOnce() -> Result<Vec<Situation>>,
    {
        if let Some(cached) = self.cached() {
            trace!(count = cached.len(), "situation cache hit");
            return Ok(cached);
        }

        let _loading = self.loading.lock();
        // another thread may have loaded while we waited
        if let Some(cached) = self.cached() {
            return Ok(cached);
        }

        let loaded = loader()?;
        if loaded.is_empty() {
            return Err(Error::EmptySituations);
        }
        debug!(count = loaded.len(), "caching situations");
        let loaded: Arc<[Situation]> = loaded.into();
        *self.situations.write() = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    pub fn cached(&self) -> Option<Arc<[Situation]>> {
        self.situations.read().clone()
    }

    /// Looks up a cached situation without loading.
    pub fn get(&self, id: &str) -> Result<Situation> {
        self.cached()
            .and_then(|situations| situations.iter().find(|s| s.id == id).cloned())
            .ok_or_else(|| Error::SituationNotFound(id.to_string()))
    }

    pub fn clear(&self) {
        if self.situations.write().take().is_some() {
            debug!("cleared situation cache");
        }
    }
}
