use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::config::Config;
use crate::types::MonitorError;

use super::api_types::{ConnectionsResponse, SyncthingEvent};
use super::helpers::find_api_key;

/// Client-side cap on any single request. Must stay above the long-poll
/// window so the server gets to answer an empty poll before we give up.
const REQUEST_TIMEOUT_SECS: u64 = 65;

/// How long the events endpoint may hold a poll open before returning
/// an empty batch.
const LONG_POLL_SECS: u64 = 60;

/// Outcome of the one-shot API key lookup. Once the candidate files have
/// been scanned the result sticks, hit or miss.
enum KeyState {
    Unresolved,
    Missing,
    Found(String),
}

pub struct SyncthingClient {
    http: Client,
    base_url: String,
    key_paths: Vec<PathBuf>,
    key: KeyState,
}

impl SyncthingClient {
    /// Prepare an HTTP client for the configured Syncthing instance.
    /// The API key is not read until the first request needs it.
    pub fn new(config: &Config) -> Result<Self, MonitorError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            key_paths: config.api_key_paths.clone(),
            key: KeyState::Unresolved,
        })
    }

    /// Fetch the current device connection table, or `None` if the
    /// daemon is unreachable or refused the request.
    pub async fn connections(&mut self) -> Option<ConnectionsResponse> {
        match self.get_json_with_query("/system/connections", &()).await {
            Ok(response) => Some(response),
            Err(err) => {
                warn!(error = %err, "Failed to fetch device connections");
                None
            }
        }
    }

    /// Long-poll for events newer than `since`. The server holds the
    /// request open for up to `LONG_POLL_SECS` and answers an empty
    /// batch when nothing happened. `None` means the poll itself failed
    /// and the caller should back off before retrying.
    pub async fn events(&mut self, since: u64) -> Option<Vec<SyncthingEvent>> {
        let query = EventsQuery {
            since,
            timeout: LONG_POLL_SECS,
        };
        match self.get_json_with_query("/events", &query).await {
            Ok(events) => Some(events),
            Err(err) => {
                warn!(error = %err, since, "Event poll failed");
                None
            }
        }
    }

    /// Scan the candidate config files for an API key, once. Later calls
    /// reuse whatever the first scan produced.
    async fn resolve_key(&mut self) {
        if !matches!(self.key, KeyState::Unresolved) {
            return;
        }
        self.key = match find_api_key(&self.key_paths).await {
            Some(key) => KeyState::Found(key),
            None => {
                warn!("No API key found in any Syncthing config file");
                KeyState::Missing
            }
        };
    }

    async fn get_json_with_query<T, Q>(&mut self, path: &str, query: &Q) -> Result<T, MonitorError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.resolve_key().await;
        let KeyState::Found(key) = &self.key else {
            return Err(MonitorError::MissingApiKey);
        };

        let url = format!("{}/rest{}", self.base_url, path);
        let response = self
            .http
            .get(url)
            .header("X-API-Key", key)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MonitorError::Syncthing(format!(
                "{} returned {}",
                path,
                response.status()
            )));
        }

        Ok(response.json::<T>().await?)
    }
}

#[derive(Serialize)]
struct EventsQuery {
    since: u64,
    timeout: u64,
}
