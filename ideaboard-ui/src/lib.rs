pub mod components;
pub mod pages;
mod state;

pub use state::{AuthState, NoticeState};

use ideaboard_app::ClientContext;
use ideaboard_errors::AppError;
use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;

use components::{AuthSection, ErrorDisplay, NoticeBar};
use pages::{AdminUsersPage, HomePage, IdeaReportPage, MyVotesPage};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let ctx = match client_context() {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("Could not set up the client: {}", e);
            return view! { <ErrorDisplay message=e.user_message().to_string()/> }.into_any();
        }
    };
    provide_context(ctx);
    provide_context(NoticeState::new());
    let auth = AuthState::new();
    provide_context(auth);

    view! {
        <Title text="Idea Board"/>
        <Meta name="description" content="Share ideas and vote for the best ones"/>

        <Router>
            <header class="topbar">
                <nav class="topbar__nav">
                    <A href="/">"Ideas"</A>
                    <A href="/my-votes">"My votes"</A>
                    <Show when=move || auth.is_admin()>
                        <A href="/admin/users">"Users"</A>
                    </Show>
                </nav>
                <AuthSection/>
            </header>
            <NoticeBar/>
            <main class="container">
                <Routes fallback=|| "Page not found">
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/my-votes") view=MyVotesPage/>
                    <Route path=path!("/ideas/:id") view=IdeaReportPage/>
                    <Route path=path!("/admin/users") view=AdminUsersPage/>
                </Routes>
            </main>
        </Router>
    }
    .into_any()
}

#[cfg(feature = "hydrate")]
fn client_context() -> Result<ClientContext, AppError> {
    ClientContext::browser()
}

// Server-side rendering never sees the browser's storage.
#[cfg(not(feature = "hydrate"))]
fn client_context() -> Result<ClientContext, AppError> {
    ClientContext::in_memory(&ideaboard_app::ClientConfig::from_env())
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
