use leptos::prelude::*;

/// Shown when the screenshot service does not deliver an image.
const PLACEHOLDER_IMAGE: &str = "https://placehold.co/800x600/f1f5f9/94a3b8?text=Vorschau";

/// Live screenshot of the audited site with an optional simulated
/// attention heatmap on top. The heatmap is decorative, not measured data.
#[component]
pub fn PreviewPanel(#[prop(into)] screenshot_url: String) -> impl IntoView {
    let (src, set_src) = signal(screenshot_url);
    let (show_heatmap, set_show_heatmap) = signal(false);

    view! {
        <div class="preview-panel">
            <div class="preview-header">
                <h3 class="eyebrow">"Live Vorschau"</h3>
                <button
                    class=move || if show_heatmap.get() { "btn btn-small btn-toggle active" } else { "btn btn-small btn-toggle" }
                    on:click=move |_| set_show_heatmap.update(|v| *v = !*v)
                >
                    {move || if show_heatmap.get() { "Heatmap ausblenden" } else { "UX-Heatmap anzeigen" }}
                </button>
            </div>

            <div class="preview-frame">
                <div class="browser-bar">
                    <span class="browser-dot"></span>
                    <span class="browser-dot"></span>
                </div>
                <div class="preview-image">
                    <img
                        src=move || src.get()
                        alt="Website Preview"
                        on:error=move |_| {
                            if src.get_untracked() != PLACEHOLDER_IMAGE {
                                set_src.set(PLACEHOLDER_IMAGE.to_string());
                            }
                        }
                    />
                    <Show when=move || show_heatmap.get()>
                        <div class="heatmap-overlay"></div>
                        <div class="heatmap-legend">
                            <span><i class="legend-dot legend-high"></i>"Hoch"</span>
                            <span><i class="legend-dot legend-medium"></i>"Mittel"</span>
                            <span><i class="legend-dot legend-low"></i>"Niedrig"</span>
                        </div>
                    </Show>
                </div>
            </div>

            <Show when=move || show_heatmap.get()>
                <p class="heatmap-note">
                    "Simulierte Darstellung der Nutzer-Aufmerksamkeit (F-Pattern & Fokus-Zonen)."
                </p>
            </Show>
        </div>
    }
}
