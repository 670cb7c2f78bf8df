//! The audit screen: form, loading, error and report states.

use leptos::prelude::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, AuditRequest};
use crate::components::audit_form::AuditForm;
use crate::components::audit_result::AuditResult;
use crate::session::{AppStatus, SHARED_LINK_AUTO_SUBMIT};
use crate::share::parse_shared_request;

/// Drop `?url=...` from the address bar without reloading.
fn clear_query_params() {
    let Some(window) = web_sys::window() else { return };
    let Ok(path) = window.location().pathname() else { return };
    if let Ok(history) = window.history() {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&path));
    }
}

#[component]
pub fn AuditPage() -> impl IntoView {
    let status = RwSignal::new(AppStatus::Idle);

    let run_audit = move |request: AuditRequest| {
        if !status.try_update(|s| s.submit(&request)).unwrap_or(false) {
            return;
        }
        spawn_local(async move {
            let result = commands::generate_audit(&request).await;
            if let Err(e) = &result {
                web_sys::console::error_1(&JsValue::from_str(&format!("Audit failed: {}", e)));
            }
            status.update(|s| s.resolve(result));
        });
    };
    let on_submit = Callback::new(run_audit);

    // Shared links auto-submit once per page load.
    Effect::new(move |_| {
        if !SHARED_LINK_AUTO_SUBMIT.try_fire() {
            return;
        }
        let query = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Some(request) = parse_shared_request(&query) {
            run_audit(request);
        }
    });

    let loading = Signal::derive(move || status.with(|s| s.is_loading()));

    let new_analysis = move |_| {
        status.update(|s| s.reset());
        clear_query_params();
    };

    view! {
        <div class="page audit-page">
            {move || match status.get() {
                AppStatus::Idle => view! {
                    <AuditForm on_submit=on_submit loading=loading />
                    <ExplainerCards />
                }.into_any(),
                AppStatus::Error(message) => view! {
                    <AuditForm on_submit=on_submit loading=loading />
                    <div class="error-panel">
                        <span class="error-icon">"!"</span>
                        <div>
                            <p class="error-title">"Fehler bei der Analyse"</p>
                            <p>{message}</p>
                            <button class="btn btn-danger" on:click=move |_| status.update(|s| s.retry())>
                                "Erneut versuchen"
                            </button>
                        </div>
                    </div>
                }.into_any(),
                AppStatus::Loading { target } => view! {
                    <div class="loading-panel">
                        <div class="spinner"></div>
                        <h2>{format!("Analysiere {}...", if target.is_empty() { "Webseite" } else { target.as_str() })}</h2>
                        <p>"Unsere KI prüft Technik, Content und UX. Dies kann bis zu 30 Sekunden dauern."</p>
                    </div>
                }.into_any(),
                AppStatus::Success(response) => view! {
                    <button class="btn-link back-link" on:click=new_analysis>
                        "\u{2190} Neue Analyse starten"
                    </button>
                    <AuditResult response=response />
                }.into_any(),
            }}
        </div>
    }
}

#[component]
fn ExplainerCards() -> impl IntoView {
    let steps = [
        ("1", "step-blue", "URL Eingeben", "Geben Sie die Adresse der Website ein, die Sie prüfen möchten."),
        ("2", "step-purple", "KI-Analyse", "Unsere KI scannt die Sichtbarkeit und Technik der Seite live."),
        ("3", "step-green", "PDF Report", "Erhalten Sie einen abhakbaren Maßnahmen-Plan als PDF."),
    ];

    view! {
        <div class="explainer-grid">
            {steps
                .into_iter()
                .map(|(number, class, title, text)| view! {
                    <div class="card explainer-card">
                        <div class=format!("step-number {}", class)>{number}</div>
                        <h3>{title}</h3>
                        <p>{text}</p>
                    </div>
                })
                .collect::<Vec<_>>()}
        </div>
    }
}
