use chrono::Local;
use serde::Serialize;

use super::state::MonitorState;

/// CSS class picked up by the bar's stylesheet. Serialized lowercase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    #[default]
    Unknown,
    Error,
    Syncing,
    Disconnected,
    Partial,
    Idle,
}

/// The record the bar renders. Recomputed wholesale on every update,
/// never patched in place.
#[derive(Debug, Clone, Serialize)]
pub struct StatusRecord {
    pub text: String,
    pub tooltip: String,
    pub class: StatusClass,
}

impl Default for StatusRecord {
    fn default() -> Self {
        Self {
            text: "Syncthing".to_string(),
            tooltip: "Syncthing status unknown".to_string(),
            class: StatusClass::Unknown,
        }
    }
}

impl StatusRecord {
    /// Derive what the bar should show from the folded state. Errors
    /// outrank active syncing, which outranks connectivity trouble.
    pub fn derive(state: &MonitorState) -> Self {
        let errors = state.errors();
        let syncing = state.syncing_folders();
        let connected = state.connected_devices();
        let total = state.total_devices();

        let (text, class) = if !errors.is_empty() {
            (format!("{} errors ⚠", errors.len()), StatusClass::Error)
        } else if syncing > 0 {
            (format!("{syncing} syncing ↕"), StatusClass::Syncing)
        } else if connected == 0 && total > 0 {
            ("Disconnected ⚪".to_string(), StatusClass::Disconnected)
        } else if connected < total {
            (
                format!("{connected}/{total} devices 🔶"),
                StatusClass::Partial,
            )
        } else {
            ("Synced ✓".to_string(), StatusClass::Idle)
        };

        let mut lines = Vec::new();
        if !errors.is_empty() {
            lines.push(format!("Errors: {}", errors.len()));
            for error in &errors[errors.len().saturating_sub(3)..] {
                lines.push(error.clone());
            }
        }
        if syncing > 0 {
            lines.push(format!("Syncing folders: {syncing}"));
        }
        if total > 0 {
            lines.push(format!("Devices: {connected}/{total} connected"));
        }
        lines.push(format!("Last updated: {}", Local::now().format("%H:%M:%S")));

        Self {
            text,
            tooltip: lines.join("\n"),
            class,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syncthing_client::SyncthingEvent;
    use serde_json::json;

    fn event(event_type: &str, data: serde_json::Value) -> SyncthingEvent {
        SyncthingEvent {
            id: 1,
            event_type: event_type.to_string(),
            data,
        }
    }

    #[test]
    fn empty_state_reads_as_synced() {
        let status = StatusRecord::derive(&MonitorState::default());

        assert_eq!(status.class, StatusClass::Idle);
        assert_eq!(status.text, "Synced ✓");
        let lines: Vec<&str> = status.tooltip.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Last updated: "));
    }

    #[test]
    fn errors_outrank_everything_else() {
        let mut state = MonitorState::default();
        state.apply(&event("FolderErrors", json!({"errors": ["disk full"]})));
        state.apply(&event(
            "FolderCompletion",
            json!({"folder": "docs", "completion": 10.0}),
        ));
        state.apply(&event("DeviceDisconnected", json!({"id": "AAAA"})));

        let status = StatusRecord::derive(&state);
        assert_eq!(status.class, StatusClass::Error);
        assert_eq!(status.text, "1 errors ⚠");
        assert!(status.tooltip.contains("Errors: 1"));
        assert!(status.tooltip.contains("disk full"));
    }

    #[test]
    fn syncing_outranks_connectivity() {
        let mut state = MonitorState::default();
        state.apply(&event(
            "FolderCompletion",
            json!({"folder": "f1", "completion": 45.0}),
        ));
        state.apply(&event("DeviceDisconnected", json!({"id": "AAAA"})));

        let status = StatusRecord::derive(&state);
        assert_eq!(status.class, StatusClass::Syncing);
        assert_eq!(status.text, "1 syncing ↕");
        assert!(status.tooltip.contains("Syncing folders: 1"));
    }

    #[test]
    fn all_devices_down_reads_as_disconnected() {
        let mut state = MonitorState::default();
        state.apply(&event("DeviceDisconnected", json!({"id": "AAAA"})));
        state.apply(&event("DeviceDisconnected", json!({"id": "BBBB"})));

        let status = StatusRecord::derive(&state);
        assert_eq!(status.class, StatusClass::Disconnected);
        assert_eq!(status.text, "Disconnected ⚪");
    }

    #[test]
    fn one_of_two_devices_reads_as_partial() {
        let mut state = MonitorState::default();
        state.apply(&event("DeviceConnected", json!({"id": "AAAA"})));
        state.apply(&event("DeviceDisconnected", json!({"id": "BBBB"})));

        let status = StatusRecord::derive(&state);
        assert_eq!(status.class, StatusClass::Partial);
        assert_eq!(status.text, "1/2 devices 🔶");
        assert!(status.tooltip.contains("Devices: 1/2 connected"));
    }

    #[test]
    fn everything_connected_reads_as_synced() {
        let mut state = MonitorState::default();
        state.apply(&event("DeviceConnected", json!({"id": "AAAA"})));
        state.apply(&event(
            "FolderCompletion",
            json!({"folder": "docs", "completion": 100.0}),
        ));

        let status = StatusRecord::derive(&state);
        assert_eq!(status.class, StatusClass::Idle);
        assert_eq!(status.text, "Synced ✓");
        assert!(status.tooltip.contains("Devices: 1/1 connected"));
    }

    #[test]
    fn tooltip_lists_only_the_last_three_errors() {
        let mut state = MonitorState::default();
        let errors: Vec<String> = (0..5).map(|i| format!("error {i}")).collect();
        state.apply(&event("FolderErrors", json!({"errors": errors})));

        let status = StatusRecord::derive(&state);
        assert!(status.tooltip.contains("Errors: 5"));
        assert!(!status.tooltip.contains("error 0"));
        assert!(!status.tooltip.contains("error 1"));
        assert!(status.tooltip.contains("error 2"));
        assert!(status.tooltip.contains("error 3"));
        assert!(status.tooltip.contains("error 4"));
    }

    #[test]
    fn derivation_is_stable_for_identical_state() {
        let mut state = MonitorState::default();
        state.apply(&event("DeviceConnected", json!({"id": "AAAA"})));

        let first = StatusRecord::derive(&state);
        let second = StatusRecord::derive(&state);
        assert_eq!(first.text, second.text);
        assert_eq!(first.class, second.class);
    }

    #[test]
    fn default_record_serializes_with_unknown_class() {
        let json = serde_json::to_string(&StatusRecord::default()).unwrap();
        assert_eq!(
            json,
            r#"{"text":"Syncthing","tooltip":"Syncthing status unknown","class":"unknown"}"#
        );
    }
}
