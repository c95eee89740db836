use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize, Default)]
pub struct ConnectionsResponse {
    #[serde(default)]
    pub connections: HashMap<String, ConnectionState>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConnectionState {
    #[serde(default)]
    pub connected: bool,
}

/// One entry from the `/rest/events` stream. The `data` payload's shape
/// depends on the event type, so it stays a raw value with typed accessors.
#[derive(Debug, Deserialize)]
pub struct SyncthingEvent {
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: Value,
}

impl SyncthingEvent {
    /// Folder identifier as carried by folder-scoped events.
    pub fn folder_id(&self) -> Option<&str> {
        self.data.get("folder").and_then(|v| v.as_str())
    }

    /// Folder identifier for change-detected events, which carry it under
    /// `folderID`; falls back to `folder`.
    pub fn change_folder_id(&self) -> Option<&str> {
        self.data
            .get("folderID")
            .or_else(|| self.data.get("folder"))
            .and_then(|v| v.as_str())
    }

    /// Device identifier for connect/disconnect events.
    pub fn device_id(&self) -> Option<&str> {
        self.data.get("id").and_then(|v| v.as_str())
    }

    /// Completion percentage reported by `FolderCompletion`.
    pub fn completion(&self) -> Option<f64> {
        self.data.get("completion").and_then(|v| v.as_f64())
    }

    /// Error descriptions carried by `FolderErrors`. Entries are either bare
    /// strings or `{error, path}` objects depending on the daemon version.
    pub fn error_descriptions(&self) -> Vec<String> {
        let Some(entries) = self.data.get("errors").and_then(|v| v.as_array()) else {
            return Vec::new();
        };
        let mut descriptions = Vec::new();
        for entry in entries {
            if let Some(text) = entry.as_str() {
                descriptions.push(text.to_string());
                continue;
            }
            if let Some(text) = entry.get("error").and_then(|v| v.as_str()) {
                match entry.get("path").and_then(|v| v.as_str()) {
                    Some(path) if !path.is_empty() => {
                        descriptions.push(format!("{path}: {text}"));
                    }
                    _ => descriptions.push(text.to_string()),
                }
            }
        }
        descriptions
    }
}
