//! Summary Cards Component
//!
//! Country totals with the day's change, plus testing figures.

use leptos::*;
use statewise_core::{CaseSummary, Count};

use crate::state::global::GlobalState;

/// Row of headline figures
#[component]
pub fn SummaryCards() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let figures = create_memo(move |_| {
        state.dashboard.with(|d| {
            d.statewise()
                .map(|s| (s.total.clone(), s.day_change.clone(), s.tested.clone()))
                .unwrap_or_default()
        })
    });

    let total = move |f: fn(&CaseSummary) -> Count| {
        Signal::derive(move || figures.with(|(t, _, _)| f(t).get()))
    };
    let change = move |f: fn(&CaseSummary) -> Count| {
        Signal::derive(move || figures.with(|(_, day, _)| Some(f(day).get()).filter(|v| *v > 0)))
    };
    let tested = Signal::derive(move || {
        figures.with(|(_, _, t)| t.total_samples_tested.get())
    });
    let tested_at = move || figures.with(|(_, _, t)| t.updated_at.clone());

    view! {
        <div class="grid grid-cols-2 md:grid-cols-5 gap-4">
            <SummaryCard label="Confirmed" value=total(|c| c.confirmed) delta=change(|c| c.confirmed) />
            <SummaryCard label="Active" value=total(|c| c.active) delta=change(|c| c.active) />
            <SummaryCard label="Recovered" value=total(|c| c.recovered) delta=change(|c| c.recovered) />
            <SummaryCard label="Deceased" value=total(|c| c.deaths) delta=change(|c| c.deaths) />
            <div class="summary-card rounded-lg p-4">
                <span class="text-sm">"Samples Tested"</span>
                <div class="text-3xl font-bold mt-2">{move || tested.get().to_string()}</div>
                {move || tested_at().map(|at| view! {
                    <div class="text-xs mt-2">{format!("As of {}", at)}</div>
                })}
            </div>
        </div>
    }
}

/// One headline figure
#[component]
fn SummaryCard(
    label: &'static str,
    #[prop(into)]
    value: Signal<u64>,
    /// Increase since the previous day, when positive
    #[prop(into)]
    delta: Signal<Option<u64>>,
) -> impl IntoView {
    view! {
        <div class="summary-card rounded-lg p-4">
            <span class="text-sm">{label}</span>
            <div class="text-3xl font-bold mt-2">{move || value.get().to_string()}</div>
            {move || delta.get().map(|d| view! {
                <div class="text-sm mt-2">{format!("+{}", d)}</div>
            })}
        </div>
    }
}
