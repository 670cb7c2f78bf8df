//! Printable PDF worksheet export of a finished audit.

pub mod builder;
pub mod layout;
pub mod output;
pub mod render;

use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::audit::{fetch_preview_image, AuditData};
use crate::error::AuditError;

pub use builder::{build_worksheet, worksheet_file_name, Worksheet};
pub use output::default_output_dir;

const IMAGE_FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Result of a successful export.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetExport {
    pub path: PathBuf,
    pub file_name: String,
    pub page_count: usize,
    pub image_embedded: bool,
}

/// Fetch the preview (if any), lay out, render and write the worksheet into
/// `output_dir`.
///
/// The preview image is optional: any failure fetching or decoding it only
/// drops the image from the cover, and the cover is laid out without the
/// preview box.
pub async fn export_worksheet(
    data: &AuditData,
    screenshot_url: Option<&str>,
    output_dir: &Path,
    generated_on: NaiveDate,
) -> Result<WorksheetExport, AuditError> {
    let preview = match screenshot_url.filter(|u| !u.trim().is_empty()) {
        Some(url) => {
            let http = reqwest::Client::builder()
                .timeout(IMAGE_FETCH_TIMEOUT)
                .build()
                .map_err(|e| AuditError::Export(format!("Failed to build HTTP client: {}", e)))?;
            fetch_preview_image(&http, url).await
        }
        None => None,
    };

    let document = render::WorksheetDocument::new(
        &format!("SEO Worksheet {}", data.domain),
        preview.as_ref(),
    )?;
    let worksheet = build_worksheet(data, document.has_image(), generated_on);
    let rendered = document.render(&worksheet.pages);

    let path = output_dir.join(&worksheet.file_name);
    output::write_pdf_atomic(&rendered.bytes, &path).map_err(|e| AuditError::Export(e.to_string()))?;

    info!(
        "Exported worksheet for {} ({} pages) to {:?}",
        data.domain,
        worksheet.pages.len(),
        path
    );

    Ok(WorksheetExport {
        path,
        file_name: worksheet.file_name,
        page_count: worksheet.pages.len(),
        image_embedded: rendered.image_embedded,
    })
}
