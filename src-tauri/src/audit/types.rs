//! Type definitions for SEO audits.
//!
//! Field names follow the camelCase JSON contract the model is asked to
//! produce. Enum values travel in German on the wire (`Hoch`, `Gut`, ...)
//! and map onto English variants here.

use serde::{Deserialize, Deserializer, Serialize};

/// Audit request collected from the form or a shared link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRequest {
    /// Target website, as typed by the user
    pub url: String,
    /// Optional industry / offering hint
    #[serde(default)]
    pub industry: Option<String>,
    /// Optional primary goal hint
    #[serde(default)]
    pub goal: Option<String>,
}

impl AuditRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            industry: None,
            goal: None,
        }
    }

    /// Industry hint, treating blank input as absent.
    pub fn industry(&self) -> Option<&str> {
        non_blank(self.industry.as_deref())
    }

    /// Goal hint, treating blank input as absent.
    pub fn goal(&self) -> Option<&str> {
        non_blank(self.goal.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "Hoch", alias = "High")]
    High,
    #[serde(rename = "Mittel", alias = "Medium")]
    Medium,
    #[serde(rename = "Niedrig", alias = "Low")]
    Low,
}

impl Priority {
    /// German label as shown on the worksheet.
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
    #[serde(rename = "Leicht", alias = "Easy")]
    Easy,
    #[serde(rename = "Mittel", alias = "Medium")]
    Medium,
    #[serde(rename = "Schwer", alias = "Hard")]
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Gut", alias = "Good")]
    Good,
    #[serde(rename = "Warnung", alias = "Warning")]
    Warning,
    #[serde(rename = "Kritisch", alias = "Critical")]
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

/// One actionable task inside a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Short imperative task title
    pub task: String,
    /// Why and how to do it
    pub description: String,
    pub priority: Priority,
    pub difficulty: Difficulty,
}

/// One analysis category (tech, onpage, offpage, local, ux).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSection {
    /// Category key, stable across re-renders ("tech", "onpage", ...)
    pub id: String,
    pub title: String,
    #[serde(deserialize_with = "deserialize_score")]
    pub score: u8,
    pub status: Status,
    /// Short prose summary of what was found
    pub findings: String,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
}

/// The parsed audit. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditData {
    pub domain: String,
    #[serde(deserialize_with = "deserialize_score")]
    pub overall_score: u8,
    #[serde(default)]
    pub executive_summary: Vec<String>,
    #[serde(default)]
    pub sections: Vec<AuditSection>,
}

impl AuditData {
    /// Total number of checklist items across all sections.
    pub fn total_tasks(&self) -> usize {
        self.sections.iter().map(|s| s.checklist.len()).sum()
    }
}

/// Audit plus the derived preview image URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResponse {
    pub data: AuditData,
    pub screenshot_url: String,
}

/// Accept any JSON number for a score and clamp it into 0..=100.
///
/// Models occasionally answer with `87.5` or `"87"`; both are read as
/// scores rather than failing the whole audit.
fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawScore {
        Number(f64),
        Text(String),
    }

    let value = match RawScore::deserialize(deserializer)? {
        RawScore::Number(n) => n,
        RawScore::Text(s) => s
            .trim()
            .trim_end_matches('%')
            .parse::<f64>()
            .map_err(serde::de::Error::custom)?,
    };

    if !value.is_finite() {
        return Err(serde::de::Error::custom("score is not a finite number"));
    }

    Ok(value.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section_json(score: &str) -> String {
        format!(
            r#"{{
                "id": "tech",
                "title": "Technisches SEO",
                "score": {score},
                "status": "Warnung",
                "findings": "HTTPS aktiv, LCP zu hoch.",
                "checklist": [
                    {{
                        "task": "Bilder in WebP ausliefern",
                        "description": "Reduziert die Ladezeit der Startseite.",
                        "priority": "Hoch",
                        "difficulty": "Leicht"
                    }}
                ]
            }}"#
        )
    }

    #[test]
    fn test_section_deserialize_german_values() {
        let section: AuditSection = serde_json::from_str(&section_json("72")).unwrap();
        assert_eq!(section.id, "tech");
        assert_eq!(section.score, 72);
        assert_eq!(section.status, Status::Warning);
        assert_eq!(section.checklist[0].priority, Priority::High);
        assert_eq!(section.checklist[0].difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_score_is_rounded_and_clamped() {
        let fractional: AuditSection = serde_json::from_str(&section_json("61.6")).unwrap();
        assert_eq!(fractional.score, 62);

        let too_high: AuditSection = serde_json::from_str(&section_json("140")).unwrap();
        assert_eq!(too_high.score, 100);

        let negative: AuditSection = serde_json::from_str(&section_json("-3")).unwrap();
        assert_eq!(negative.score, 0);

        let text: AuditSection = serde_json::from_str(&section_json("\"45%\"")).unwrap();
        assert_eq!(text.score, 45);
    }

    #[test]
    fn test_score_rejects_non_numeric_text() {
        let result: Result<AuditSection, _> = serde_json::from_str(&section_json("\"gut\""));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_priority_is_rejected() {
        let json = r#"{"task": "t", "description": "d", "priority": "Dringend", "difficulty": "Leicht"}"#;
        let result: Result<ChecklistItem, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_english_aliases_accepted() {
        let json = r#"{"task": "t", "description": "d", "priority": "Low", "difficulty": "Hard"}"#;
        let item: ChecklistItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.priority, Priority::Low);
        assert_eq!(item.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_audit_data_serializes_camel_case_with_german_values() {
        let data = AuditData {
            domain: "example.com".to_string(),
            overall_score: 62,
            executive_summary: vec!["Punkt".to_string()],
            sections: vec![serde_json::from_str(&section_json("50")).unwrap()],
        };
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"overallScore\":62"));
        assert!(json.contains("\"executiveSummary\""));
        assert!(json.contains("\"Warnung\""));
        assert!(json.contains("\"Hoch\""));
        assert_eq!(data.total_tasks(), 1);
    }

    #[test]
    fn test_request_blank_hints_are_absent() {
        let request = AuditRequest {
            url: "example.com".to_string(),
            industry: Some("   ".to_string()),
            goal: Some(" Leads ".to_string()),
        };
        assert_eq!(request.industry(), None);
        assert_eq!(request.goal(), Some("Leads"));
    }

    #[test]
    fn test_response_field_names() {
        let response = AuditResponse {
            data: AuditData {
                domain: "example.com".to_string(),
                overall_score: 10,
                executive_summary: vec![],
                sections: vec![],
            },
            screenshot_url: "https://s0.wp.com/mshots/v1/example.com".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"screenshotUrl\""));
    }
}
