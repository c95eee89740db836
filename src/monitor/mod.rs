mod state;
mod status;
mod writer;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::Config;
use crate::syncthing_client::{SyncthingClient, SyncthingEvent};
use crate::types::MonitorError;

use state::MonitorState;
use status::StatusRecord;
use writer::StatusWriter;

/// Pause before the next poll after a failed request.
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Drives the poll, fold, publish cycle for one Syncthing instance.
pub struct Monitor {
    client: SyncthingClient,
    state: MonitorState,
    writer: StatusWriter,
    last_event_id: u64,
    shutdown: Arc<AtomicBool>,
}

impl Monitor {
    pub fn new(config: &Config, shutdown: Arc<AtomicBool>) -> Result<Self, MonitorError> {
        Ok(Self {
            client: SyncthingClient::new(config)?,
            state: MonitorState::default(),
            writer: StatusWriter::new(&config.status_path),
            last_event_id: 0,
            shutdown,
        })
    }

    /// Run until the shutdown flag is raised. Failures inside an
    /// iteration are logged and retried, never propagated.
    pub async fn run(&mut self) {
        info!(
            path = %self.writer.path().display(),
            "Starting Syncthing monitor"
        );

        if let Some(connections) = self.client.connections().await {
            self.state.seed_devices(&connections);
        }
        // Publish right away so the bar has something to read even
        // before the first event arrives.
        self.publish().await;

        while !self.shutdown.load(Ordering::SeqCst) {
            let Some(events) = self.client.events(self.last_event_id).await else {
                tokio::time::sleep(RETRY_DELAY).await;
                continue;
            };

            if self.ingest(&events) {
                self.publish().await;
            }
        }

        info!("Syncthing monitor stopped");
    }

    /// Fold a batch of events into the state and advance the cursor.
    /// Returns whether the batch contained anything worth publishing.
    fn ingest(&mut self, events: &[SyncthingEvent]) -> bool {
        for event in events {
            self.state.apply(event);
            if event.id > self.last_event_id {
                self.last_event_id = event.id;
            }
        }
        !events.is_empty()
    }

    async fn publish(&self) {
        let status = StatusRecord::derive(&self.state);
        if let Err(err) = self.writer.publish(&status).await {
            warn!(error = %err, "Failed to write status file");
        }
    }
}
