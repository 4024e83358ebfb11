//! State Table Component
//!
//! One row per state, largest first. Clicking a row opens its district
//! accordion.

use leptos::*;
use statewise_core::{Count, StateSummary};
use std::collections::BTreeSet;

use super::district_table::DistrictAccordion;
use crate::state::global::GlobalState;

/// Table of states with expandable district breakdowns
#[component]
pub fn StateTable() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let expanded = create_rw_signal(BTreeSet::<String>::new());

    let states = create_memo(move |_| {
        state.dashboard.with(|d| {
            d.statewise()
                .map(|data| data.states_by_confirmed().into_iter().cloned().collect::<Vec<_>>())
                .unwrap_or_default()
        })
    });

    view! {
        <table class="state-table w-full">
            <thead>
                <tr>
                    <th class="text-left">"State"</th>
                    <th class="text-right">"Confirmed"</th>
                    <th class="text-right">"Active"</th>
                    <th class="text-right">"Recovered"</th>
                    <th class="text-right">"Deaths"</th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || states.get()
                    key=|s| s.state.clone()
                    children=move |s| view! { <StateRow name=s.state states=states expanded=expanded /> }
                />
            </tbody>
        </table>
    }
}

/// A state row followed by its accordion
#[component]
fn StateRow(
    name: String,
    states: Memo<Vec<StateSummary>>,
    expanded: RwSignal<BTreeSet<String>>,
) -> impl IntoView {
    // Looked up by name so a refreshed payload flows into the same row
    let summary = {
        let name = name.clone();
        create_memo(move |_| {
            states.with(|list| list.iter().find(|s| s.state == name).cloned().unwrap_or_default())
        })
    };
    let districts = Signal::derive(move || summary.with(|s| s.districts.clone()));
    let is_hidden = {
        let name = name.clone();
        Signal::derive(move || !expanded.with(|open| open.contains(&name)))
    };

    let toggle = move |_| {
        expanded.update(|open| {
            if !open.remove(&name) {
                open.insert(name.clone());
            }
        })
    };

    let cell = move |count: fn(&StateSummary) -> Count| {
        move || summary.with(|s| count(s).to_string())
    };

    view! {
        <tr class="state-row cursor-pointer" on:click=toggle>
            <td>{move || summary.with(|s| s.state.clone())}</td>
            <td class="text-right">{cell(|s| s.cases.confirmed)}</td>
            <td class="text-right">{cell(|s| s.cases.active)}</td>
            <td class="text-right">{cell(|s| s.cases.recovered)}</td>
            <td class="text-right">{cell(|s| s.cases.deaths)}</td>
        </tr>
        <DistrictAccordion districts=districts is_hidden=is_hidden />
    }
}
