use leptos::prelude::*;

/// Page frame: header with navigation, content column, footer.
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let year = js_sys::Date::new_0().get_full_year();

    view! {
        <div class="app-layout">
            <header class="app-header">
                <div class="header-inner">
                    <a href="/" class="brand">
                        <span class="brand-icon">"\u{1F50D}"</span>
                        <span class="brand-title">"SEO Audit Pro"</span>
                    </a>
                    <nav class="nav-list">
                        <a href="/" class="nav-link">"Analyse"</a>
                        <a href="/settings" class="nav-link">"Einstellungen"</a>
                        <a href="/health" class="nav-link">"Systemstatus"</a>
                    </nav>
                </div>
            </header>

            <main class="content">{children()}</main>

            <footer class="app-footer">
                <p>{format!("\u{00A9} {} SEO Audit Pro. Powered by Google Gemini.", year)}</p>
            </footer>
        </div>
    }
}
