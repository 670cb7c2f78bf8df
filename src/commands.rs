use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

// -- Audit types matching backend structs --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRequest {
    pub url: String,
    pub industry: Option<String>,
    pub goal: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "Hoch")]
    High,
    #[serde(rename = "Mittel")]
    Medium,
    #[serde(rename = "Niedrig")]
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "Hoch",
            Priority::Medium => "Mittel",
            Priority::Low => "Niedrig",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "Leicht")]
    Easy,
    #[serde(rename = "Mittel")]
    Medium,
    #[serde(rename = "Schwer")]
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Leicht",
            Difficulty::Medium => "Mittel",
            Difficulty::Hard => "Schwer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Gut")]
    Good,
    #[serde(rename = "Warnung")]
    Warning,
    #[serde(rename = "Kritisch")]
    Critical,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Good => "Gut",
            Status::Warning => "Warnung",
            Status::Critical => "Kritisch",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub task: String,
    pub description: String,
    pub priority: Priority,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSection {
    pub id: String,
    pub title: String,
    pub score: u8,
    pub status: Status,
    pub findings: String,
    pub checklist: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditData {
    pub domain: String,
    pub overall_score: u8,
    pub executive_summary: Vec<String>,
    pub sections: Vec<AuditSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResponse {
    pub data: AuditData,
    pub screenshot_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetExport {
    pub path: String,
    pub file_name: String,
    pub page_count: usize,
    pub image_embedded: bool,
}

// -- Health report matching backend struct --

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthReport {
    pub gemini_api_key_set: bool,
    pub gemini_api_key_source: Option<String>,
    pub download_dir_writable: bool,
    pub download_dir_path: String,
}

// -- Arg structs for serialization --

#[derive(Serialize)]
struct GenerateAuditArgs<'a> {
    request: &'a AuditRequest,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportWorksheetArgs<'a> {
    data: &'a AuditData,
    screenshot_url: Option<&'a str>,
}

#[derive(Serialize)]
struct SetApiKeyArgs<'a> {
    key: &'a str,
}

#[derive(Serialize)]
struct GetPreferenceArgs<'a> {
    key: &'a str,
}

#[derive(Serialize)]
struct SetPreferenceArgs<'a> {
    key: &'a str,
    value: &'a str,
}

fn error_text(e: JsValue) -> String {
    e.as_string()
        .unwrap_or_else(|| "Ein unbekannter Fehler ist aufgetreten.".to_string())
}

async fn call<A, R>(cmd: &str, args: &A) -> Result<R, String>
where
    A: Serialize + ?Sized,
    R: for<'de> Deserialize<'de>,
{
    let args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    let result = invoke(cmd, args).await.map_err(error_text)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

async fn call_unit<A>(cmd: &str, args: &A) -> Result<(), String>
where
    A: Serialize + ?Sized,
{
    let args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    invoke(cmd, args).await.map(|_| ()).map_err(error_text)
}

// -- Typed invoke helpers --

pub async fn generate_audit(request: &AuditRequest) -> Result<AuditResponse, String> {
    call("generate_audit", &GenerateAuditArgs { request }).await
}

pub async fn export_worksheet(
    data: &AuditData,
    screenshot_url: Option<&str>,
) -> Result<WorksheetExport, String> {
    call("export_worksheet", &ExportWorksheetArgs { data, screenshot_url }).await
}

pub async fn set_api_key(key: &str) -> Result<(), String> {
    call_unit("set_api_key", &SetApiKeyArgs { key }).await
}

pub async fn get_api_key() -> Result<Option<String>, String> {
    call("get_api_key", &serde_json::json!({})).await
}

pub async fn delete_api_key() -> Result<(), String> {
    call_unit("delete_api_key", &serde_json::json!({})).await
}

pub async fn run_health_check() -> Result<HealthReport, String> {
    call("run_health_check", &serde_json::json!({})).await
}

pub async fn get_preference(key: &str) -> Result<Option<String>, String> {
    call("get_preference", &GetPreferenceArgs { key }).await
}

pub async fn set_preference(key: &str, value: &str) -> Result<(), String> {
    call_unit("set_preference", &SetPreferenceArgs { key, value }).await
}
