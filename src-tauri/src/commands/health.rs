use serde::Serialize;
use tracing::info;

use super::keychain::{load_api_key, read_stored_key};
use crate::worksheet::default_output_dir;

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub gemini_api_key_set: bool,
    /// "keychain", "environment" or none
    pub gemini_api_key_source: Option<String>,
    pub download_dir_writable: bool,
    pub download_dir_path: String,
}

#[tauri::command]
pub fn run_health_check() -> Result<HealthReport, String> {
    info!("Running health check");

    let in_keychain = read_stored_key()
        .ok()
        .flatten()
        .is_some_and(|k| !k.trim().is_empty());
    let key_set = in_keychain || load_api_key().is_some();
    let source = match (in_keychain, key_set) {
        (true, _) => Some("keychain".to_string()),
        (false, true) => Some("environment".to_string()),
        _ => None,
    };
    info!("Gemini API key set: {} ({:?})", key_set, source);

    let dir = default_output_dir();
    let writable = dir.is_dir() && tempfile::tempfile_in(&dir).is_ok();
    info!("Download directory writable: {} at {:?}", writable, dir);

    Ok(HealthReport {
        gemini_api_key_set: key_set,
        gemini_api_key_source: source,
        download_dir_writable: writable,
        download_dir_path: dir.to_string_lossy().to_string(),
    })
}
