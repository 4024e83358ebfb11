//! District Accordion Component
//!
//! Expanded content of a state row: the state's districts as a table whose
//! metric headers toggle the sort. `Unknown` always renders last.

use leptos::*;
use statewise_core::{Column, DistrictMap, SortState, TableView};

use super::sort_icon::SortIndicator;

/// Sortable district table inside a state row
#[component]
pub fn DistrictAccordion(
    /// Districts of the owning state
    #[prop(into)]
    districts: Signal<DistrictMap>,
    /// Whether the accordion is collapsed
    #[prop(into)]
    is_hidden: Signal<bool>,
    /// Metric columns; defaults to confirmed only
    #[prop(optional)]
    columns: Option<Vec<Column>>,
) -> impl IntoView {
    let columns = store_value(columns.unwrap_or_else(|| vec![Column::confirmed()]));
    let sort_state = create_rw_signal(districts.with_untracked(SortState::new));

    // Fresh payloads keep the active key and direction
    create_effect(move |previous: Option<()>| {
        districts.with(|_| ());
        if previous.is_some() {
            districts.with_untracked(|d| sort_state.update(|s| s.replace_data(d)));
        }
    });

    let table = create_memo(move |_| {
        let hidden = is_hidden.get();
        districts.with(|d| {
            sort_state.with(|s| columns.with_value(|cols| TableView::build(d, s, cols, hidden)))
        })
    });

    let on_header_click = move |key: String| {
        districts.with_untracked(|d| sort_state.update(|s| s.on_header_click(&key, d)));
    };

    view! {
        <tr class=move || table.with(|t| t.row_class.clone())>
            <td colspan="5">
                <table class="district-table w-full text-sm">
                    <thead>
                        <tr>
                            {move || {
                                table.with(|t| t.headers.clone())
                                    .into_iter()
                                    .map(|cell| match cell.sort_key {
                                        Some(key) => view! {
                                            <th
                                                class="sortable cursor-pointer select-none text-right"
                                                on:click=move |_| on_header_click(key.clone())
                                            >
                                                {cell.title}
                                                {cell.sort_icon.map(|icon| view! { <SortIndicator icon=icon /> })}
                                            </th>
                                        }.into_view(),
                                        None => view! { <th class="text-left">{cell.title}</th> }.into_view(),
                                    })
                                    .collect_view()
                            }}
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            table.with(|t| t.rows.clone())
                                .into_iter()
                                .map(|row| view! {
                                    <tr>
                                        <td>{row.name}</td>
                                        {row.values
                                            .into_iter()
                                            .map(|value| view! { <td class="text-right">{value}</td> })
                                            .collect_view()}
                                    </tr>
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </td>
        </tr>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn district_names(container: &web_sys::Element) -> Vec<String> {
        let cells = container
            .query_selector_all("table.district-table tbody td:first-child")
            .unwrap();
        (0..cells.length())
            .filter_map(|i| cells.item(i))
            .filter_map(|cell| cell.text_content())
            .collect()
    }

    // Headers re-render on every sort change, so look the cell up each time
    fn click_sortable_header(container: &web_sys::Element) {
        container
            .query_selector("th.sortable")
            .unwrap()
            .unwrap()
            .dyn_into::<web_sys::HtmlElement>()
            .unwrap()
            .click();
    }

    #[wasm_bindgen_test]
    fn test_header_click_reverses_rows_with_unknown_last() {
        let document = web_sys::window().unwrap().document().unwrap();
        let container = document
            .create_element("table")
            .unwrap()
            .dyn_into::<web_sys::HtmlElement>()
            .unwrap();
        document.body().unwrap().append_child(&container).unwrap();

        let districts: DistrictMap = serde_json::from_str(
            r#"{"A": {"confirmed": 10}, "Unknown": {"confirmed": 999}, "B": {"confirmed": 30}}"#,
        )
        .unwrap();

        mount_to(container.clone(), move || {
            view! { <DistrictAccordion districts=create_rw_signal(districts) is_hidden=false /> }
        });

        assert_eq!(district_names(&container), vec!["B", "A", "Unknown"]);

        click_sortable_header(&container);
        assert_eq!(district_names(&container), vec!["A", "B", "Unknown"]);

        click_sortable_header(&container);
        assert_eq!(district_names(&container), vec!["B", "A", "Unknown"]);

        container.remove();
    }
}
