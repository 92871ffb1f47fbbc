use crate::config::SessionContext;
use crate::pages::{MenuPage, NotFound};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    SessionContext::provide();

    view! {
        <Router>
            <Routes fallback=NotFound>
                <Route path=path!("menus") view=MenuPage />
                <Route path=path!("") view=MenuPage />
            </Routes>
        </Router>
    }
}
