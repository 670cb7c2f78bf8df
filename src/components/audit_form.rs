use leptos::prelude::*;

use crate::commands::AuditRequest;

#[component]
pub fn AuditForm(
    /// Called with a complete request; never with an empty URL
    on_submit: Callback<AuditRequest>,
    #[prop(into)] loading: Signal<bool>,
) -> impl IntoView {
    let (url, set_url) = signal(String::new());
    let (industry, set_industry) = signal(String::new());
    let (goal, set_goal) = signal(String::new());

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if let Some(request) = AuditRequest::from_form(&url.get(), &industry.get(), &goal.get()) {
            on_submit.run(request);
        }
    };

    view! {
        <div class="card audit-form">
            <div class="audit-form-header">
                <h1>"Website Analyse starten"</h1>
                <p>
                    "Erhalten Sie in wenigen Sekunden einen professionellen SEO-Audit mit konkreten Handlungsempfehlungen."
                </p>
            </div>

            <form class="audit-form-body" on:submit=submit>
                <div class="form-group">
                    <label for="url">"Website URL " <span class="required">"*"</span></label>
                    <input
                        id="url"
                        type="url"
                        class="input"
                        required
                        placeholder="https://beispiel.de"
                        prop:value=move || url.get()
                        on:input=move |ev| set_url.set(event_target_value(&ev))
                        disabled=move || loading.get()
                    />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="industry">
                            "Branche / Angebot " <span class="optional">"(Optional)"</span>
                        </label>
                        <input
                            id="industry"
                            type="text"
                            class="input"
                            placeholder="z.B. Zahnarzt, Online-Shop..."
                            prop:value=move || industry.get()
                            on:input=move |ev| set_industry.set(event_target_value(&ev))
                            disabled=move || loading.get()
                        />
                    </div>
                    <div class="form-group">
                        <label for="goal">"Hauptziel " <span class="optional">"(Optional)"</span></label>
                        <input
                            id="goal"
                            type="text"
                            class="input"
                            placeholder="z.B. Leads, Verkäufe..."
                            prop:value=move || goal.get()
                            on:input=move |ev| set_goal.set(event_target_value(&ev))
                            disabled=move || loading.get()
                        />
                    </div>
                </div>

                <button
                    type="submit"
                    class="btn btn-primary btn-block"
                    disabled=move || loading.get() || url.get().trim().is_empty()
                >
                    {move || if loading.get() { "Analysiere Website..." } else { "Audit erstellen \u{2192}" }}
                </button>
                <p class="form-hint">
                    "Durch Klick auf \"Audit erstellen\" wird die URL von unserer KI analysiert."
                </p>
            </form>
        </div>
    }
}
