use std::collections::HashMap;

use tracing::debug;

use crate::syncthing_client::{ConnectionsResponse, SyncthingEvent};

/// How many error descriptions we keep; older ones fall off the front.
const MAX_TRACKED_ERRORS: usize = 10;

/// What a folder is doing, as far as the event stream has told us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderActivity {
    Syncing,
    Idle,
}

#[derive(Debug, Clone)]
pub struct FolderState {
    pub completion: Option<f64>,
    pub activity: FolderActivity,
}

/// Everything the status derivation reads, folded from the event
/// stream. Folder entries are overwritten in place and never removed.
#[derive(Debug, Default)]
pub struct MonitorState {
    folders: HashMap<String, FolderState>,
    devices: HashMap<String, bool>,
    errors: Vec<String>,
}

impl MonitorState {
    /// Fill the device table from a connections snapshot, typically the
    /// one taken at startup before any events have arrived.
    pub fn seed_devices(&mut self, connections: &ConnectionsResponse) {
        for (device_id, state) in &connections.connections {
            self.devices.insert(device_id.clone(), state.connected);
        }
    }

    /// Fold one event into the tracked state. Unrecognized event types
    /// are ignored.
    pub fn apply(&mut self, event: &SyncthingEvent) {
        match event.event_type.as_str() {
            "FolderCompletion" => {
                let Some(folder_id) = event.folder_id() else {
                    return;
                };
                let completion = event.completion().unwrap_or(0.0);
                let activity = if completion < 100.0 {
                    FolderActivity::Syncing
                } else {
                    FolderActivity::Idle
                };
                self.folders.insert(
                    folder_id.to_string(),
                    FolderState {
                        completion: Some(completion),
                        activity,
                    },
                );
            }
            // Scanning carries nothing the bar surfaces.
            "FolderScanProgress" => {}
            "FolderErrors" => {
                self.push_errors(event.error_descriptions());
            }
            "DeviceConnected" => {
                if let Some(device_id) = event.device_id() {
                    self.devices.insert(device_id.to_string(), true);
                }
            }
            "DeviceDisconnected" => {
                if let Some(device_id) = event.device_id() {
                    self.devices.insert(device_id.to_string(), false);
                }
            }
            "LocalChangeDetected" | "RemoteChangeDetected" => {
                if let Some(folder_id) = event.change_folder_id() {
                    let entry = self
                        .folders
                        .entry(folder_id.to_string())
                        .or_insert(FolderState {
                            completion: None,
                            activity: FolderActivity::Syncing,
                        });
                    entry.activity = FolderActivity::Syncing;
                    debug!(
                        folder = folder_id,
                        completion = ?entry.completion,
                        "Change detected, folder is syncing"
                    );
                }
            }
            _ => {}
        }
    }

    fn push_errors(&mut self, descriptions: Vec<String>) {
        self.errors.extend(descriptions);
        if self.errors.len() > MAX_TRACKED_ERRORS {
            let excess = self.errors.len() - MAX_TRACKED_ERRORS;
            self.errors.drain(..excess);
        }
    }

    pub fn syncing_folders(&self) -> usize {
        self.folders
            .values()
            .filter(|folder| folder.activity == FolderActivity::Syncing)
            .count()
    }

    pub fn connected_devices(&self) -> usize {
        self.devices.values().filter(|connected| **connected).count()
    }

    pub fn total_devices(&self) -> usize {
        self.devices.len()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}
