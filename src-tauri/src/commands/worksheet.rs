use chrono::Local;
use tracing::{info, warn};

use crate::audit::AuditData;
use crate::worksheet::{default_output_dir, export_worksheet as export, WorksheetExport};

/// Export the worksheet PDF for a finished audit into the download directory.
#[tauri::command]
pub async fn export_worksheet(
    data: AuditData,
    screenshot_url: Option<String>,
) -> Result<WorksheetExport, String> {
    info!("export_worksheet called for: {}", data.domain);

    let output_dir = default_output_dir();
    let today = Local::now().date_naive();

    export(&data, screenshot_url.as_deref(), &output_dir, today)
        .await
        .map_err(|e| {
            warn!("Worksheet export for {} failed: {}", data.domain, e);
            e.into()
        })
}
