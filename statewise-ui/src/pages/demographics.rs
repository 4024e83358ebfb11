//! Demographics Page

use leptos::*;

use crate::components::DemographicBreakdown;

#[component]
pub fn Demographics() -> impl IntoView {
    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Demographics"</h1>
                <p class="mt-1">"Patient breakdowns from the latest stats."</p>
            </div>

            <DemographicBreakdown />
        </div>
    }
}
