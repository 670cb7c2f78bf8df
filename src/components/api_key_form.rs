use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands;

/// Gemini API key stored in the OS keychain.
#[component]
pub fn ApiKeyForm() -> impl IntoView {
    let (key_value, set_key_value) = signal(String::new());
    let (is_saved, set_is_saved) = signal(false);
    let (is_loading, set_is_loading) = signal(false);
    let (error_message, set_error_message) = signal::<Option<String>>(None);

    // Check for an existing key on mount
    Effect::new(move |_| {
        spawn_local(async move {
            match commands::get_api_key().await {
                Ok(key) => set_is_saved.set(key.is_some()),
                Err(e) => set_error_message.set(Some(format!("Schlüsselbund nicht lesbar: {}", e))),
            }
        });
    });

    let save_key = move |_| {
        let key = key_value.get();
        if key.trim().is_empty() {
            set_error_message.set(Some("Bitte einen API-Key eingeben".to_string()));
            return;
        }
        set_is_loading.set(true);
        set_error_message.set(None);
        spawn_local(async move {
            match commands::set_api_key(&key).await {
                Ok(()) => {
                    set_is_saved.set(true);
                    set_key_value.set(String::new());
                }
                Err(e) => set_error_message.set(Some(format!("Speichern fehlgeschlagen: {}", e))),
            }
            set_is_loading.set(false);
        });
    };

    let delete_key = move |_| {
        set_is_loading.set(true);
        set_error_message.set(None);
        spawn_local(async move {
            match commands::delete_api_key().await {
                Ok(()) => set_is_saved.set(false),
                Err(e) => set_error_message.set(Some(format!("Löschen fehlgeschlagen: {}", e))),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="form-group api-key-form">
            <label>"Gemini API Key"</label>
            <div class="input-row">
                <input
                    type="password"
                    placeholder="AIza..."
                    class="input input-password"
                    prop:value=move || key_value.get()
                    on:input=move |ev| set_key_value.set(event_target_value(&ev))
                    disabled=move || is_loading.get()
                />
                <button class="btn btn-save" on:click=save_key disabled=move || is_loading.get()>
                    {move || if is_loading.get() { "Speichere..." } else { "Speichern" }}
                </button>
                <button
                    class="btn btn-delete"
                    on:click=delete_key
                    disabled=move || is_loading.get()
                    style:display=move || if is_saved.get() { "inline-block" } else { "none" }
                >
                    "Löschen"
                </button>
            </div>
            <div class="key-status-row">
                {move || {
                    if let Some(err) = error_message.get() {
                        view! { <span class="status-text status-error">{err}</span> }.into_any()
                    } else if is_saved.get() {
                        view! { <span class="status-text status-saved">"Im Schlüsselbund gespeichert"</span> }.into_any()
                    } else {
                        view! { <span class="status-text status-not-set">"Nicht konfiguriert"</span> }.into_any()
                    }
                }}
            </div>
        </div>
    }
}
