//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{ErrorToast, Loading, Nav, UpdateAlert};
use crate::pages::{Dashboard, Demographics};
use crate::state::{init_updates, listen_for_content_updates, provide_global_state, provide_theme, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state and theme to all components
    let state = provide_global_state();
    provide_theme();

    // State-wise first, then stats
    state.load();

    // Update alert wiring; the listener is removed when the app unmounts
    listen_for_content_updates(state);
    init_updates(state, api::updates_url(&api::get_api_base()));

    let loading = move || state.dashboard.with(|d| d.is_loading());

    view! {
        <Router>
            <div class="min-h-screen flex flex-col">
                // Navigation header
                <Nav />

                <UpdateAlert />

                // Main content area
                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Show when=move || !loading() fallback=|| view! { <Loading /> }>
                        <Routes>
                            <Route path="/" view=Dashboard />
                            <Route path="/demographics" view=Demographics />
                            <Route path="/*any" view=NotFound />
                        </Routes>
                    </Show>
                </main>

                // Footer with connection status
                <Footer />

                <ErrorToast />
            </div>
        </Router>
    }
}

/// Footer component showing update stream status
#[component]
fn Footer() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <footer class="fixed bottom-0 left-0 right-0 border-t py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                <div class="flex items-center space-x-2">
                    {move || {
                        if state.ws_connected.get() {
                            view! { <span class="status-live">"Live updates on"</span> }.into_view()
                        } else {
                            view! { <span class="status-off">"Live updates off"</span> }.into_view()
                        }
                    }}
                </div>

                // Last content change
                <div>
                    {move || {
                        state.last_update.get()
                            .and_then(chrono::DateTime::from_timestamp_millis)
                            .map(|dt| format!("Updated: {}", dt.format("%H:%M:%S")))
                            .unwrap_or_default()
                    }}
                </div>
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="mb-6">"The page you're looking for doesn't exist."</p>
            <A href="/" class="px-6 py-3 rounded-lg font-medium transition-colors">
                "Go to Dashboard"
            </A>
        </div>
    }
}
