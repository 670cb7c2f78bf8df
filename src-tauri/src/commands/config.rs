use tauri::AppHandle;
use tauri_plugin_store::StoreExt;
use tracing::{info, warn};

use crate::audit::AuditSettings;

pub const PREFERENCES_STORE: &str = "preferences.json";
pub const PREF_AI_MODEL: &str = "ai_model";
pub const PREF_SEARCH_GROUNDING: &str = "search_grounding";

fn read_string(app: &AppHandle, key: &str) -> Result<Option<String>, String> {
    let store = app.store(PREFERENCES_STORE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        e.to_string()
    })?;
    Ok(store.get(key).and_then(|v| v.as_str().map(|s| s.to_string())))
}

/// Audit settings from stored preferences, defaults for anything unset.
pub fn settings_from_preferences(model: Option<String>, search_grounding: Option<String>) -> AuditSettings {
    let mut settings = AuditSettings::default();
    if let Some(model) = model.map(|m| m.trim().to_string()).filter(|m| !m.is_empty()) {
        settings.model = model;
    }
    if let Some(flag) = search_grounding {
        settings.search_grounding = !flag.trim().eq_ignore_ascii_case("false");
    }
    settings
}

pub fn load_audit_settings(app: &AppHandle) -> Result<AuditSettings, String> {
    let settings = settings_from_preferences(
        read_string(app, PREF_AI_MODEL)?,
        read_string(app, PREF_SEARCH_GROUNDING)?,
    );
    info!(
        "Audit settings: model={}, search_grounding={}",
        settings.model, settings.search_grounding
    );
    Ok(settings)
}

#[tauri::command]
pub fn get_preference(app: AppHandle, key: &str) -> Result<Option<String>, String> {
    info!("Getting preference: {}", key);
    read_string(&app, key)
}

#[tauri::command]
pub fn set_preference(app: AppHandle, key: &str, value: &str) -> Result<(), String> {
    info!("Setting preference: {} = {}", key, value);
    let store = app.store(PREFERENCES_STORE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        e.to_string()
    })?;
    store.set(key, serde_json::json!(value));
    store.save().map_err(|e| {
        warn!("Failed to save store: {}", e);
        e.to_string()
    })
}
