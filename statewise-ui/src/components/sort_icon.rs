//! Sort Icon Component

use leptos::*;
use statewise_core::SortIcon;

/// Direction glyph next to the active column header
#[component]
pub fn SortIndicator(icon: SortIcon) -> impl IntoView {
    view! {
        <span class=icon.css_class() aria-hidden="true">{icon.glyph()}</span>
    }
}
