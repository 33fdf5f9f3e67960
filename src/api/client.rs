//! HTTP client for the bracket backend.

use crate::api::config::ApiConfig;
use crate::api::error::{ApiError, ApiResult};
use crate::models::{Bracket, MapResult, Match, Opponent, OpponentId, Slot, SwissStanding};
use chrono::{DateTime, Utc};
use log::{debug, error, warn};
use reqwest::header::ACCEPT;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Body of `POST /events/{id}/bracket`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateBracketRequest {
    /// Backend format name, e.g. `single_elimination`.
    pub format: String,
    pub teams: Vec<OpponentId>,
    #[serde(default)]
    pub settings: serde_json::Map<String, Value>,
}

/// Partial match update; unset fields are left alone by the backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Slot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score1: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score2: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maps: Vec<MapResult>,
}

/// One entry of `POST /matches/bulk-update`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BulkMatchUpdate {
    pub match_id: String,
    #[serde(flatten)]
    pub update: MatchUpdate,
}

#[derive(Serialize)]
struct BulkUpdateBody<'a> {
    updates: &'a [BulkMatchUpdate],
}

/// Body of `POST /matches/{id}/schedule`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub scheduled_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,
}

/// REST client with timeout, bounded retry and linear backoff.
#[derive(Clone, Debug)]
pub struct BracketApi {
    config: ApiConfig,
    client: reqwest::Client,
}

impl BracketApi {
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self { config, client })
    }

    /// Client configured from `BRACKET_*` environment variables.
    pub fn from_env() -> ApiResult<Self> {
        Self::new(ApiConfig::from_env())
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn get_bracket(&self, event_id: impl Display) -> ApiResult<Bracket> {
        self.request(Method::GET, &format!("/events/{}/bracket", event_id), &[], None)
            .await
            .inspect_err(|e| error!("Failed to fetch bracket for event {}: {}", event_id, e))
    }

    /// Brackets of several events in one call. No request is made for an empty list.
    pub async fn get_brackets<I: Display>(&self, event_ids: &[I]) -> ApiResult<Vec<Bracket>> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query: Vec<(&str, String)> = event_ids
            .iter()
            .map(|id| ("event_ids[]", id.to_string()))
            .collect();
        self.request(Method::GET, "/brackets", &query, None)
            .await
            .inspect_err(|e| error!("Failed to fetch multiple brackets: {}", e))
    }

    pub async fn create_bracket(
        &self,
        event_id: impl Display,
        request: &CreateBracketRequest,
    ) -> ApiResult<Bracket> {
        let body = serde_json::to_value(request)?;
        self.request(Method::POST, &format!("/events/{}/bracket", event_id), &[], Some(body))
            .await
            .inspect_err(|e| error!("Failed to create bracket for event {}: {}", event_id, e))
    }

    pub async fn update_bracket(&self, event_id: impl Display, updates: &Value) -> ApiResult<Bracket> {
        self.request(
            Method::PATCH,
            &format!("/events/{}/bracket", event_id),
            &[],
            Some(updates.clone()),
        )
        .await
        .inspect_err(|e| error!("Failed to update bracket for event {}: {}", event_id, e))
    }

    pub async fn delete_bracket(&self, event_id: impl Display) -> ApiResult<Value> {
        self.request(Method::DELETE, &format!("/events/{}/bracket", event_id), &[], None)
            .await
            .inspect_err(|e| error!("Failed to delete bracket for event {}: {}", event_id, e))
    }

    /// Standings; `options` become query parameters.
    pub async fn get_standings(
        &self,
        event_id: impl Display,
        options: &BTreeMap<String, String>,
    ) -> ApiResult<Value> {
        let query: Vec<(&str, String)> = options
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect();
        self.request(Method::GET, &format!("/events/{}/standings", event_id), &query, None)
            .await
            .inspect_err(|e| error!("Failed to fetch standings for event {}: {}", event_id, e))
    }

    pub async fn get_swiss_standings(&self, event_id: impl Display) -> ApiResult<Vec<SwissStanding>> {
        self.request(Method::GET, &format!("/events/{}/swiss-standings", event_id), &[], None)
            .await
            .inspect_err(|e| error!("Failed to fetch Swiss standings for event {}: {}", event_id, e))
    }

    pub async fn get_match(&self, match_id: impl Display) -> ApiResult<Match> {
        self.request(Method::GET, &format!("/matches/{}", match_id), &[], None)
            .await
            .inspect_err(|e| error!("Failed to fetch match {}: {}", match_id, e))
    }

    pub async fn update_match(&self, match_id: impl Display, update: &MatchUpdate) -> ApiResult<Match> {
        let body = serde_json::to_value(update)?;
        self.request(Method::PATCH, &format!("/matches/{}", match_id), &[], Some(body))
            .await
            .inspect_err(|e| error!("Failed to update match {}: {}", match_id, e))
    }

    pub async fn get_live_matches(&self) -> ApiResult<Vec<Match>> {
        self.request(Method::GET, "/live-matches", &[], None)
            .await
            .inspect_err(|e| error!("Failed to fetch live matches: {}", e))
    }

    pub async fn schedule_match(
        &self,
        match_id: impl Display,
        schedule: &ScheduleRequest,
    ) -> ApiResult<Match> {
        let body = serde_json::to_value(schedule)?;
        self.request(Method::POST, &format!("/matches/{}/schedule", match_id), &[], Some(body))
            .await
            .inspect_err(|e| error!("Failed to schedule match {}: {}", match_id, e))
    }

    pub async fn bulk_update_matches(&self, updates: &[BulkMatchUpdate]) -> ApiResult<Value> {
        let body = serde_json::to_value(BulkUpdateBody { updates })?;
        self.request(Method::POST, "/matches/bulk-update", &[], Some(body))
            .await
            .inspect_err(|e| error!("Failed to bulk update matches: {}", e))
    }

    /// Team rosters for the given ids. No request is made for an empty list.
    pub async fn get_team_details(&self, team_ids: &[OpponentId]) -> ApiResult<Vec<Opponent>> {
        if team_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query: Vec<(&str, String)> = team_ids
            .iter()
            .map(|id| ("ids[]", id.to_string()))
            .collect();
        self.request(Method::GET, "/teams", &query, None)
            .await
            .inspect_err(|e| error!("Failed to fetch team details: {}", e))
    }

    pub async fn get_available_teams(&self, event_id: impl Display) -> ApiResult<Vec<Opponent>> {
        self.request(Method::GET, &format!("/events/{}/available-teams", event_id), &[], None)
            .await
            .inspect_err(|e| error!("Failed to fetch available teams for event {}: {}", event_id, e))
    }

    pub async fn reset_bracket(&self, event_id: impl Display, options: &Value) -> ApiResult<Bracket> {
        self.request(
            Method::POST,
            &format!("/events/{}/bracket/reset", event_id),
            &[],
            Some(options.clone()),
        )
        .await
        .inspect_err(|e| error!("Failed to reset bracket for event {}: {}", event_id, e))
    }

    /// Send a request, making up to `retries` extra attempts with backoff `retry_delay * attempt`.
    ///
    /// Only network failures, 429 and 5xx are retried (see [`ApiError::is_retryable`]). A
    /// timeout or any other 4xx fails on the first attempt.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.config.base_url, endpoint);
        let mut attempt = 0;
        loop {
            match self.send_once(&method, &url, query, body.as_ref()).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.config.retries => {
                    attempt += 1;
                    let delay = self.config.retry_delay * attempt;
                    warn!(
                        "{} {} failed ({}), retrying in {:?} ({}/{})",
                        method, endpoint, err, delay, attempt, self.config.retries
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn send_once<T: DeserializeOwned>(
        &self,
        method: &Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> ApiResult<T> {
        let timeout = self.config.timeout;
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            if [Method::POST, Method::PUT, Method::PATCH].contains(method) {
                request = request.json(body);
            }
        }

        debug!("{} {}", method, url);
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, timeout))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_reqwest(e, timeout))?;

        if !status.is_success() {
            let body: Value =
                serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::Object(Default::default()));
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP Error: {}", status.as_u16()));
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
                body,
            });
        }

        if bytes.is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
