//! Dashboard Page
//!
//! Headline figures and the state table with district breakdowns.

use leptos::*;

use crate::components::{StateTable, SummaryCards};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    view! {
        <div class="space-y-8">
            // Page header
            <div>
                <h1 class="text-3xl font-bold">"Dashboard"</h1>
                <p class="mt-1">"Cases by state. Select a state to see its districts."</p>
            </div>

            <section>
                <SummaryCards />
            </section>

            <section class="rounded-xl p-6">
                <StateTable />
            </section>
        </div>
    }
}
