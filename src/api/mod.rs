//! REST access to the bracket backend: client, cache, configuration, errors.

mod cache;
mod cached;
mod client;
mod config;
mod error;

pub use cache::{BracketCache, CacheStats, DEFAULT_MAX_SIZE, DEFAULT_TTL};
pub use cached::CachedBracketApi;
pub use client::{BracketApi, BulkMatchUpdate, CreateBracketRequest, MatchUpdate, ScheduleRequest};
pub use config::{ApiConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiResult};
