//! District Table View Model
//!
//! Turns a district map plus its [`SortState`] into header cells and body
//! rows. The web dashboard renders this directly; the data service returns it
//! as JSON and CSV.

use serde::{Deserialize, Serialize};

use crate::metrics::DistrictMap;
use crate::sort::{SortDirection, SortState};

/// A sortable metric column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Field name on the district record
    pub key: String,
    /// Header text
    pub title: String,
}

impl Column {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
        }
    }

    /// The `confirmed` column shown by default
    pub fn confirmed() -> Self {
        Self::new("confirmed", "Confirmed")
    }

    /// Column for an arbitrary key with a title derived from it
    /// (`"active_cases"` → `"Active Cases"`)
    pub fn for_key(key: &str) -> Self {
        let title = key
            .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        Self::new(key, title)
    }
}

/// Glyph shown next to the active column header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortIcon {
    Descending,
    Ascending,
}

impl SortIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            SortIcon::Descending => "▼",
            SortIcon::Ascending => "▲",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            SortIcon::Descending => "sort-icon sort-desc",
            SortIcon::Ascending => "sort-icon sort-asc",
        }
    }
}

/// Icon for a sort direction. Pure function of the direction.
pub fn render_sort_icon(direction: SortDirection) -> SortIcon {
    match direction {
        SortDirection::Descending => SortIcon::Descending,
        SortDirection::Ascending => SortIcon::Ascending,
    }
}

/// CSS classes of the enclosing accordion row
pub fn fold_class(is_hidden: bool) -> &'static str {
    if is_hidden {
        "fold close"
    } else {
        "fold"
    }
}

/// One header cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderCell {
    pub title: String,
    /// Sort key for clickable headers; `None` for the name column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<String>,
    /// Present only on the active sort column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_icon: Option<SortIcon>,
}

/// One district row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyRow {
    pub name: String,
    /// Cell text, one per metric column
    pub values: Vec<String>,
}

/// Renderable district table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub row_class: String,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<BodyRow>,
}

impl TableView {
    /// Build the table for `districts` in the order held by `state`.
    ///
    /// Names in `state` that no longer exist in `districts` are skipped.
    pub fn build(
        districts: &DistrictMap,
        state: &SortState,
        columns: &[Column],
        is_hidden: bool,
    ) -> Self {
        let mut headers = Vec::with_capacity(columns.len() + 1);
        headers.push(HeaderCell {
            title: "District".to_string(),
            sort_key: None,
            sort_icon: None,
        });
        headers.extend(columns.iter().map(|column| HeaderCell {
            title: column.title.clone(),
            sort_key: Some(column.key.clone()),
            sort_icon: state
                .is_active(&column.key)
                .then(|| render_sort_icon(state.direction())),
        }));

        let rows = state
            .ordered_names()
            .iter()
            .filter_map(|name| {
                let metrics = districts.get(name)?;
                Some(BodyRow {
                    name: name.clone(),
                    values: columns.iter().map(|c| metrics.display(&c.key)).collect(),
                })
            })
            .collect();

        Self {
            row_class: fold_class(is_hidden).to_string(),
            headers,
            rows,
        }
    }

    /// Header titles in order
    pub fn header_titles(&self) -> Vec<&str> {
        self.headers.iter().map(|h| h.title.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::DistrictMetrics;

    fn sample() -> DistrictMap {
        let mut m = DistrictMap::new();
        m.insert("A".to_string(), DistrictMetrics::new().with("confirmed", 10));
        m.insert("B".to_string(), DistrictMetrics::new().with("confirmed", "30"));
        m.insert("Unknown".to_string(), DistrictMetrics::new().with("confirmed", 999));
        m
    }

    #[test]
    fn test_build_rows_follow_sort_state() {
        let m = sample();
        let state = SortState::new(&m);
        let view = TableView::build(&m, &state, &[Column::confirmed()], false);

        assert_eq!(view.row_class, "fold");
        assert_eq!(view.header_titles(), vec!["District", "Confirmed"]);
        assert_eq!(view.headers[1].sort_icon, Some(SortIcon::Descending));
        assert_eq!(view.headers[0].sort_icon, None);

        let names: Vec<_> = view.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "Unknown"]);
        assert_eq!(view.rows[0].values, vec!["30"]);
        assert_eq!(view.rows[1].values, vec!["10"]);
    }

    #[test]
    fn test_empty_map_renders_header_only() {
        let m = DistrictMap::new();
        let state = SortState::new(&m);
        let view = TableView::build(&m, &state, &[Column::confirmed()], true);

        assert!(view.is_empty());
        assert_eq!(view.headers.len(), 2);
        assert_eq!(view.row_class, "fold close");
    }

    #[test]
    fn test_icon_tracks_direction_and_active_column() {
        let m = sample();
        let mut state = SortState::new(&m);
        state.on_header_click("confirmed", &m);

        let columns = [Column::confirmed(), Column::for_key("recovered")];
        let view = TableView::build(&m, &state, &columns, false);
        assert_eq!(view.headers[1].sort_icon, Some(SortIcon::Ascending));
        assert_eq!(view.headers[2].sort_icon, None);
        assert_eq!(view.rows[0].values, vec!["10", "-"]);
    }

    #[test]
    fn test_hidden_flag_does_not_touch_rows() {
        let m = sample();
        let state = SortState::new(&m);
        let shown = TableView::build(&m, &state, &[Column::confirmed()], false);
        let hidden = TableView::build(&m, &state, &[Column::confirmed()], true);

        assert_eq!(shown.rows, hidden.rows);
        assert_eq!(shown.headers, hidden.headers);
        assert_ne!(shown.row_class, hidden.row_class);
    }

    #[test]
    fn test_column_title_from_key() {
        assert_eq!(Column::for_key("active_cases").title, "Active Cases");
        assert_eq!(Column::for_key("deaths").title, "Deaths");
    }

    #[test]
    fn test_sort_icon_glyphs() {
        assert_eq!(render_sort_icon(SortDirection::Descending).glyph(), "▼");
        assert_eq!(render_sort_icon(SortDirection::Ascending).glyph(), "▲");
    }
}
