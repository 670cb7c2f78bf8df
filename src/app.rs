use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::components::layout::Layout;
use crate::pages::audit::AuditPage;
use crate::pages::health::HealthPage;
use crate::pages::settings::SettingsPage;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <Layout>
                <Routes fallback=|| view! { <p>"Seite nicht gefunden"</p> }>
                    <Route path=path!("/") view=AuditPage />
                    <Route path=path!("/settings") view=SettingsPage />
                    <Route path=path!("/health") view=HealthPage />
                </Routes>
            </Layout>
        </Router>
    }
}
