use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands;
use crate::components::api_key_form::ApiKeyForm;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const MODELS: [&str; 3] = ["gemini-2.5-flash", "gemini-2.5-pro", "gemini-2.0-flash"];

#[component]
pub fn SettingsPage() -> impl IntoView {
    let (model, set_model) = signal(DEFAULT_MODEL.to_string());
    let (grounding, set_grounding) = signal(true);
    let (status, set_status) = signal::<Option<String>>(None);

    // Load saved preferences on mount
    Effect::new(move |_| {
        spawn_local(async move {
            match commands::get_preference("ai_model").await {
                Ok(Some(saved)) if !saved.is_empty() => set_model.set(saved),
                Ok(_) => {}
                Err(e) => set_status.set(Some(format!("Einstellungen nicht lesbar: {}", e))),
            }
            if let Ok(Some(saved)) = commands::get_preference("search_grounding").await {
                set_grounding.set(saved != "false");
            }
        });
    });

    let save = move |_| {
        let model = model.get();
        let grounding = if grounding.get() { "true" } else { "false" };
        spawn_local(async move {
            let result = async {
                commands::set_preference("ai_model", &model).await?;
                commands::set_preference("search_grounding", grounding).await
            }
            .await;
            match result {
                Ok(()) => set_status.set(Some("Gespeichert".to_string())),
                Err(e) => set_status.set(Some(format!("Speichern fehlgeschlagen: {}", e))),
            }
        });
    };

    view! {
        <div class="page settings-page">
            <h2>"Einstellungen"</h2>

            <section class="settings-section">
                <h3>"API-Zugang"</h3>
                <p class="section-description">
                    "Der Gemini API-Key wird im Schlüsselbund des Betriebssystems gespeichert. "
                    "Ohne gespeicherten Key werden GEMINI_API_KEY bzw. API_KEY aus der Umgebung verwendet."
                </p>
                <ApiKeyForm />
            </section>

            <section class="settings-section">
                <h3>"Analyse"</h3>
                <div class="form-group">
                    <label for="model">"Modell"</label>
                    <select
                        id="model"
                        class="input"
                        prop:value=move || model.get()
                        on:change=move |ev| set_model.set(event_target_value(&ev))
                    >
                        {MODELS
                            .iter()
                            .map(|m| view! { <option value=*m>{*m}</option> })
                            .collect::<Vec<_>>()}
                    </select>
                </div>
                <div class="form-group checkbox-row">
                    <input
                        id="grounding"
                        type="checkbox"
                        prop:checked=move || grounding.get()
                        on:change=move |ev| set_grounding.set(event_target_checked(&ev))
                    />
                    <label for="grounding">"Google-Suche als Quelle erlauben"</label>
                </div>
                <button class="btn btn-save" on:click=save>"Speichern"</button>
                <Show when=move || status.get().is_some()>
                    <span class="status-text">{move || status.get().unwrap_or_default()}</span>
                </Show>
            </section>
        </div>
    }
}
