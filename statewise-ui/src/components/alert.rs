//! Alert Components
//!
//! The "new content" banner and error toasts.

use leptos::*;

use crate::state::global::GlobalState;

/// Banner offering to pull content the server has updated
#[component]
pub fn UpdateAlert() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let visible = move || state.dashboard.with(|d| d.show_update_alert());

    view! {
        <Show when=visible>
            <div class="update-alert flex items-center justify-between px-4 py-3" role="alert">
                <span class="text-sm font-medium">"New data is available."</span>
                <div class="flex items-center space-x-2">
                    <button
                        class="px-3 py-1 rounded font-medium"
                        on:click=move |_| state.reload()
                    >
                        "Refresh"
                    </button>
                    <button
                        class="px-3 py-1 rounded"
                        on:click=move |_| state.dashboard.update(|d| d.dismiss_update_alert())
                    >
                        "Dismiss"
                    </button>
                </div>
            </div>
        </Show>
    }
}

/// Error toast
#[component]
pub fn ErrorToast() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <div class="fixed bottom-20 right-4 z-50 space-y-2">
            {move || {
                state.error.get().map(|notice| view! {
                    <div class="toast-error flex items-center space-x-3 px-4 py-3 rounded-lg shadow-lg">
                        <span class="text-lg">"✕"</span>
                        <span class="text-sm font-medium">{notice.message}</span>
                        <button class="text-sm" on:click=move |_| state.clear_error()>"Close"</button>
                    </div>
                })
            }}
        </div>
    }
}
