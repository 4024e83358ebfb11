//! Navigation Component
//!
//! Header toolbar with brand, page links and the theme toggle.

use leptos::*;
use leptos_router::*;

use crate::state::theme::ThemeContext;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="toolbar border-b">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-xl font-bold">"Statewise"</span>
                    </A>

                    // Navigation links
                    <div class="flex items-center space-x-1">
                        <NavLink href="/" label="Dashboard" />
                        <NavLink href="/demographics" label="Demographics" />
                        <ThemeToggle />
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A href=href class="px-4 py-2 rounded-lg transition-colors" active_class="active">
            {label}
        </A>
    }
}

/// Light/dark switch
#[component]
fn ThemeToggle() -> impl IntoView {
    let context = expect_context::<ThemeContext>();

    let label = move || {
        if context.theme.get().is_dark() {
            "Light mode"
        } else {
            "Dark mode"
        }
    };

    view! {
        <button
            class="theme-toggle px-4 py-2 rounded-lg"
            aria-label=label
            on:click=move |_| context.toggle()
        >
            {move || if context.theme.get().is_dark() { "☀" } else { "☾" }}
        </button>
    }
}
