mod config;
mod monitor;
mod syncthing_client;
mod types;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use config::Config;
use monitor::Monitor;
use types::MonitorError;

#[tokio::main]
async fn main() -> Result<(), MonitorError> {
    init_tracing();

    let config = Config::default();
    let shutdown = Arc::new(AtomicBool::new(false));

    {
        let shutdown = Arc::clone(&shutdown);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received ctrl-c, shutting down");
                    shutdown.store(true, Ordering::SeqCst);
                }
                Err(err) => {
                    warn!(error = %err, "Failed to listen for ctrl-c");
                }
            }
        });
    }

    let mut monitor = Monitor::new(&config, shutdown)?;
    monitor.run().await;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
