//! Audit session state: the four screens of the audit page and the
//! transitions between them.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::commands::{AuditRequest, AuditResponse};

impl AuditRequest {
    /// Build a request from raw form input. An empty URL yields `None`, so
    /// submitting it does nothing. Blank hints are dropped.
    pub fn from_form(url: &str, industry: &str, goal: &str) -> Option<Self> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }
        let hint = |v: &str| Some(v.trim().to_string()).filter(|v| !v.is_empty());
        Some(Self {
            url: url.to_string(),
            industry: hint(industry),
            goal: hint(goal),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppStatus {
    Idle,
    /// Request in flight for the given target.
    Loading { target: String },
    Success(AuditResponse),
    /// User-facing error message.
    Error(String),
}

impl AppStatus {
    /// Start a request from `Idle` or `Error`. Returns whether the caller
    /// should issue the call; a second submit while loading is ignored.
    pub fn submit(&mut self, request: &AuditRequest) -> bool {
        match self {
            AppStatus::Idle | AppStatus::Error(_) => {
                *self = AppStatus::Loading {
                    target: request.url.clone(),
                };
                true
            }
            AppStatus::Loading { .. } | AppStatus::Success(_) => false,
        }
    }

    /// Apply the outcome of the in-flight request. Whatever lands last wins.
    pub fn resolve(&mut self, result: Result<AuditResponse, String>) {
        *self = match result {
            Ok(response) => AppStatus::Success(response),
            Err(message) => AppStatus::Error(message),
        };
    }

    /// "Erneut versuchen": back to the form after an error.
    pub fn retry(&mut self) {
        if matches!(self, AppStatus::Error(_)) {
            *self = AppStatus::Idle;
        }
    }

    /// "Neue Analyse starten": drop the report.
    pub fn reset(&mut self) {
        if matches!(self, AppStatus::Success(_)) {
            *self = AppStatus::Idle;
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AppStatus::Loading { .. })
    }

    /// The form is shown while idle or after an error.
    pub fn shows_form(&self) -> bool {
        matches!(self, AppStatus::Idle | AppStatus::Error(_))
    }
}

/// One-shot latch for the shared-link auto submit.
#[derive(Debug, Default)]
pub struct AutoSubmitGuard {
    fired: AtomicBool,
}

impl AutoSubmitGuard {
    pub const fn new() -> Self {
        Self {
            fired: AtomicBool::new(false),
        }
    }

    /// True exactly once, on the first call.
    pub fn try_fire(&self) -> bool {
        !self.fired.swap(true, Ordering::SeqCst)
    }
}

/// Guard for the current page load.
pub static SHARED_LINK_AUTO_SUBMIT: AutoSubmitGuard = AutoSubmitGuard::new();
