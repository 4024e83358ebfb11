//! Demographic Breakdown Component
//!
//! Each breakdown (age group, nationality, gender, hospitalization) as a
//! ranked list with bars scaled to its largest entry.

use leptos::*;
use statewise_core::{Count, DemographicStats};

use crate::state::global::GlobalState;

#[component]
pub fn DemographicBreakdown() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let sections = create_memo(move |_| {
        state.dashboard.with(|d| {
            d.stats()
                .map(|stats| {
                    stats
                        .sections()
                        .into_iter()
                        .map(|(title, section)| {
                            let entries = DemographicStats::ranked(section)
                                .into_iter()
                                .map(|(label, count)| (label.to_string(), count))
                                .collect::<Vec<_>>();
                            (title, entries)
                        })
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    });

    view! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
            {move || {
                sections
                    .get()
                    .into_iter()
                    .map(|(title, entries)| view! { <BreakdownSection title=title entries=entries /> })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn BreakdownSection(title: &'static str, entries: Vec<(String, Count)>) -> impl IntoView {
    let max = entries.iter().map(|(_, c)| c.get()).max().unwrap_or(0);

    view! {
        <section class="breakdown rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">{title}</h2>
            {if entries.is_empty() {
                view! { <p class="text-sm">"No data"</p> }.into_view()
            } else {
                entries
                    .into_iter()
                    .map(|(label, count)| {
                        let width = bar_width(count.get(), max);
                        view! {
                            <div class="breakdown-row flex items-center gap-3 mb-2">
                                <span class="w-1/3 text-sm">{label}</span>
                                <div class="flex-1">
                                    <div class="bar h-3 rounded" style=format!("width: {}%", width) />
                                </div>
                                <span class="w-16 text-right text-sm">{count.to_string()}</span>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </section>
    }
}

/// Bar width as a percentage of the largest entry
fn bar_width(value: u64, max: u64) -> u64 {
    if max == 0 {
        0
    } else {
        value.saturating_mul(100) / max
    }
}
