use std::path::PathBuf;

/// Runtime settings for the status monitor.
///
/// There is no external configuration surface (no flags, no environment
/// overrides, no config file of our own); the defaults below are the
/// contract. `RUST_LOG` only affects log verbosity.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the local Syncthing instance.
    pub api_url: String,

    /// Where the derived status record is published for the bar to read.
    pub status_path: PathBuf,

    /// Syncthing config files probed for an API key, in order.
    pub api_key_paths: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            status_path: default_status_path(),
            api_key_paths: default_api_key_paths(),
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:8384".to_string()
}

fn default_status_path() -> PathBuf {
    PathBuf::from("/tmp/syncthing_status.json")
}

/// Candidate Syncthing config locations, most likely first. Unreadable or
/// missing entries are skipped during key resolution.
fn default_api_key_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".local/state/syncthing/config.xml"));
        paths.push(home.join(".config/syncthing/config.xml"));
        paths.push(home.join(".local/share/syncthing/config.xml"));
    }
    paths.push(PathBuf::from("/etc/syncthing/config.xml"));
    paths
}
