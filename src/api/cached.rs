//! Bracket API with an in-memory read cache.

use crate::api::cache::{BracketCache, CacheStats};
use crate::api::client::{BracketApi, MatchUpdate};
use crate::api::error::ApiResult;
use crate::models::{Bracket, Match};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Clone, Debug)]
enum Cached {
    Bracket(Bracket),
    Standings(Value),
}

/// Caches bracket and standings reads; match updates invalidate both.
#[derive(Debug)]
pub struct CachedBracketApi {
    api: BracketApi,
    cache: Mutex<BracketCache<Cached>>,
}

impl CachedBracketApi {
    /// Wrap `api`; cache size and TTL come from its config.
    pub fn new(api: BracketApi) -> Self {
        let cache = BracketCache::new(api.config().cache_max_size, api.config().cache_ttl);
        Self {
            api,
            cache: Mutex::new(cache),
        }
    }

    /// The uncached client, for calls that are never cached.
    pub fn api(&self) -> &BracketApi {
        &self.api
    }

    pub async fn get_bracket(&self, event_id: impl Display) -> ApiResult<Bracket> {
        let key = format!("bracket_{}", event_id);
        let cached = self.cache().get(&key);
        if let Some(Cached::Bracket(bracket)) = cached {
            log::debug!("Cache hit: {}", key);
            return Ok(bracket);
        }
        let bracket = self.api.get_bracket(&event_id).await?;
        self.cache().set(key, Cached::Bracket(bracket.clone()));
        Ok(bracket)
    }

    pub async fn get_standings(
        &self,
        event_id: impl Display,
        options: &BTreeMap<String, String>,
    ) -> ApiResult<Value> {
        let key = format!("standings_{}_{}", event_id, serde_json::to_string(options)?);
        let cached = self.cache().get(&key);
        if let Some(Cached::Standings(standings)) = cached {
            log::debug!("Cache hit: {}", key);
            return Ok(standings);
        }
        let standings = self.api.get_standings(&event_id, options).await?;
        self.cache().set(key, Cached::Standings(standings.clone()));
        Ok(standings)
    }

    /// Update a match, then drop every cached bracket and standings entry.
    pub async fn update_match(&self, match_id: impl Display, update: &MatchUpdate) -> ApiResult<Match> {
        let updated = self.api.update_match(match_id, update).await?;
        self.invalidate();
        Ok(updated)
    }

    /// Drop every cached bracket and standings entry.
    pub fn invalidate(&self) {
        self.cache()
            .retain_keys(|key| !key.contains("bracket_") && !key.contains("standings_"));
    }

    pub fn clear_cache(&self) {
        self.cache().clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache().stats()
    }

    fn cache(&self) -> MutexGuard<'_, BracketCache<Cached>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
