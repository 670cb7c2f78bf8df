use tauri::AppHandle;
use tracing::{info, warn};

use super::config::load_audit_settings;
use super::keychain::load_api_key;
use crate::audit::{AuditClient, AuditRequest, AuditResponse};

/// Run one audit for the request. Errors arrive as the user-facing message.
#[tauri::command]
pub async fn generate_audit(app: AppHandle, request: AuditRequest) -> Result<AuditResponse, String> {
    info!("generate_audit called for: {}", request.url);

    let settings = load_audit_settings(&app)?;
    let client = AuditClient::new(load_api_key(), settings)?;

    client.generate(&request).await.map_err(|e| {
        warn!("Audit for {} failed: {}", request.url, e);
        e.into()
    })
}
