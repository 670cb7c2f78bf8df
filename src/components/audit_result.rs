//! Finished audit: score header, progress, summary, actions, preview and
//! the section checklists.

use leptos::prelude::*;
use std::time::Duration;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};

use crate::checklist::{ChecklistState, SectionExpansion};
use crate::commands::{self, AuditResponse};
use crate::components::preview_panel::PreviewPanel;
use crate::components::score_circle::ScoreBand;
use crate::components::section_card::SectionCard;
use crate::share::build_share_link;

const COPIED_FEEDBACK: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq)]
enum ExportState {
    Idle,
    Running,
    Done(String),
    Failed(String),
}

async fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| format!("{:?}", e))
}

#[component]
pub fn AuditResult(response: AuditResponse) -> impl IntoView {
    let AuditResponse {
        data,
        screenshot_url,
    } = response;

    // Fresh state per report: nothing checked, every section expanded.
    let checklist = RwSignal::new(ChecklistState::default());
    let expansion = RwSignal::new(SectionExpansion::default());
    let (copied, set_copied) = signal(false);
    let (export_state, set_export_state) = signal(ExportState::Idle);

    let progress_data = data.clone();
    let progress = Memo::new(move |_| checklist.with(|c| c.progress(&progress_data)));

    let share_domain = data.domain.clone();
    let copy_share_link = move |_| {
        let Some(base) = web_sys::window().and_then(|w| w.location().href().ok()) else {
            return;
        };
        let link = match build_share_link(&base, &share_domain, js_sys::Date::now() as u64) {
            Ok(link) => link,
            Err(e) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!("Share link failed: {}", e)));
                return;
            }
        };
        spawn_local(async move {
            match copy_to_clipboard(&link).await {
                Ok(()) => {
                    set_copied.set(true);
                    set_timeout(move || set_copied.set(false), COPIED_FEEDBACK);
                }
                Err(e) => {
                    web_sys::console::warn_1(&JsValue::from_str(&format!("Clipboard write failed: {}", e)));
                }
            }
        });
    };

    let export_data = data.clone();
    let export_url = screenshot_url.clone();
    let download_worksheet = move |_| {
        let data = export_data.clone();
        let url = export_url.clone();
        set_export_state.set(ExportState::Running);
        spawn_local(async move {
            match commands::export_worksheet(&data, Some(&url)).await {
                Ok(export) => set_export_state.set(ExportState::Done(export.path)),
                Err(e) => set_export_state.set(ExportState::Failed(e)),
            }
        });
    };

    let today = String::from(js_sys::Date::new_0().to_locale_date_string("de-DE", &JsValue::UNDEFINED));
    let score_class = format!("header-score {}", ScoreBand::of(data.overall_score).class());

    let summary = data
        .executive_summary
        .iter()
        .map(|point| view! { <li><span class="summary-check">"\u{2713}"</span><span>{point.clone()}</span></li> })
        .collect::<Vec<_>>();

    let sections = data
        .sections
        .iter()
        .map(|section| {
            view! { <SectionCard section=section.clone() checklist=checklist expansion=expansion /> }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="audit-result">
            <style>{include_str!("audit_result.css")}</style>

            <div class="card result-card">
                <div class="result-header">
                    <div>
                        <h1>{data.domain.clone()}</h1>
                        <div class="result-subtitle">
                            <span>"SEO Audit Report"</span>
                            <span>"\u{2022}"</span>
                            <span>{today}</span>
                        </div>
                    </div>
                    <div class="header-stats">
                        <div class="header-stat">
                            <div class="stat-label">"Gesamtscore"</div>
                            <div class=score_class>{format!("{}/100", data.overall_score)}</div>
                        </div>
                        <div class="stat-divider"></div>
                        <div class="header-stat">
                            <div class="stat-label">"Offene Tasks"</div>
                            <div class="header-open">{move || progress.get().open()}</div>
                        </div>
                    </div>
                </div>

                <div class="progress-block">
                    <div class="progress-labels">
                        <span>"Optimierungs-Fortschritt"</span>
                        <span>{move || format!("{}% erledigt", progress.get().percentage)}</span>
                    </div>
                    <div class="progress-track">
                        <div
                            class="progress-fill"
                            style:width=move || format!("{}%", progress.get().percentage)
                        ></div>
                    </div>
                </div>

                <div class="result-body">
                    <div class="result-summary">
                        <h3 class="eyebrow">"Executive Summary"</h3>
                        <ul class="summary-list">{summary}</ul>

                        <div class="result-actions">
                            <button
                                class="btn btn-primary btn-block"
                                on:click=download_worksheet
                                disabled=move || export_state.get() == ExportState::Running
                            >
                                {move || if export_state.get() == ExportState::Running {
                                    "Erstelle Worksheet..."
                                } else {
                                    "PDF-Worksheet herunterladen"
                                }}
                            </button>
                            {move || match export_state.get() {
                                ExportState::Done(path) => Some(view! {
                                    <span class="status-text status-saved">{format!("Gespeichert unter {}", path)}</span>
                                }.into_any()),
                                ExportState::Failed(e) => Some(view! {
                                    <span class="status-text status-error">{e}</span>
                                }.into_any()),
                                _ => None,
                            }}
                            <button class="btn btn-secondary btn-block" on:click=copy_share_link>
                                {move || if copied.get() {
                                    "Link kopiert!"
                                } else {
                                    "Link zur Analyse teilen (7 Tage gültig)"
                                }}
                            </button>
                        </div>
                    </div>

                    <PreviewPanel screenshot_url=screenshot_url />
                </div>
            </div>

            <div class="sections">
                <h2>"Detaillierte Analyse & Maßnahmen"</h2>
                {sections}
            </div>
        </div>
    }
}
