use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, HealthReport};
use crate::components::status_badge::{CheckStatus, StatusBadge};

#[component]
pub fn HealthPage() -> impl IntoView {
    let (checking, set_checking) = signal(false);
    let (report, set_report) = signal::<Option<HealthReport>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    let do_health_check = move || {
        set_checking.set(true);
        set_error.set(None);
        spawn_local(async move {
            match commands::run_health_check().await {
                Ok(r) => set_report.set(Some(r)),
                Err(e) => set_error.set(Some(format!("Prüfung fehlgeschlagen: {}", e))),
            }
            set_checking.set(false);
        });
    };

    // Run once on mount
    Effect::new(move |_| do_health_check());

    view! {
        <div class="page health-page">
            <h2>"Systemstatus"</h2>
            <p class="page-description">
                "Prüft, ob ein API-Key hinterlegt ist und Worksheets gespeichert werden können."
            </p>

            <button class="btn btn-primary" on:click=move |_| do_health_check() disabled=move || checking.get()>
                {move || if checking.get() { "Prüfe..." } else { "Erneut prüfen" }}
            </button>

            {move || error.get().map(|e| view! {
                <div class="health-error">
                    <span class="status-text status-error">{e}</span>
                </div>
            })}

            {move || report.get().map(|r| {
                let passed = [r.gemini_api_key_set, r.download_dir_writable].iter().filter(|&&v| v).count();
                let key_detail = match r.gemini_api_key_source.as_deref() {
                    Some("keychain") => "Im Schlüsselbund".to_string(),
                    Some("environment") => "Aus Umgebungsvariable".to_string(),
                    _ => "Nicht konfiguriert".to_string(),
                };
                let summary_class = match passed {
                    2 => "summary-all-pass",
                    0 => "summary-all-fail",
                    _ => "summary-partial",
                };

                view! {
                    <div class="health-results">
                        <StatusBadge
                            label="Gemini API Key"
                            status=CheckStatus::from(r.gemini_api_key_set)
                            detail=key_detail
                        />
                        <StatusBadge
                            label="Download-Ordner beschreibbar"
                            status=CheckStatus::from(r.download_dir_writable)
                            detail=r.download_dir_path.clone()
                        />
                        <div class=format!("health-summary {}", summary_class)>
                            {format!("{} von 2 Prüfungen bestanden", passed)}
                        </div>
                    </div>
                }
            })}
        </div>
    }
}
