use crate::pages::BoardPage;
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-slate-400">"Nicht gefunden"</div> }>
                <Route path=path!("") view=BoardPage />
            </Routes>
        </Router>
    }
}
