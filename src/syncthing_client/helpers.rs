use std::path::PathBuf;

use tokio::fs;
use tracing::debug;

/// Scan the candidate config files in order and return the first API key
/// found. Unreadable candidates count as absent and are skipped.
pub async fn find_api_key(candidates: &[PathBuf]) -> Option<String> {
    for path in candidates {
        let Ok(contents) = fs::read_to_string(path).await else {
            continue;
        };
        if let Some(key) = extract_api_key(&contents) {
            debug!(path = %path.display(), "API key loaded");
            return Some(key);
        }
    }
    None
}

fn extract_api_key(contents: &str) -> Option<String> {
    let start_tag = "<apikey>";
    let end_tag = "</apikey>";
    let start = contents.find(start_tag)? + start_tag.len();
    let rest = &contents[start..];
    let end = rest.find(end_tag)?;
    Some(rest[..end].trim().to_string())
}
