//! District Sorting
//!
//! Orders the districts of a region by one metric and tracks the
//! sort-toggle state of a table header.
//!
//! Ordering rules:
//! - `"Unknown"` is always last, whatever the key or direction
//! - everything else compares the integer value at the sort key; a missing
//!   or unparseable value counts as the lowest possible value
//! - ties keep the map's enumeration order (the sort is stable)

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::metrics::{DistrictMap, UNKNOWN_DISTRICT};

/// Sort key used when a table is first shown
pub const DEFAULT_SORT_KEY: &str = "confirmed";

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    /// Largest first (multiplier +1)
    #[default]
    #[serde(rename = "desc")]
    Descending,
    /// Smallest first (multiplier -1)
    #[serde(rename = "asc")]
    Ascending,
}

impl SortDirection {
    /// The +1/-1 multiplier applied to `b - a`
    pub fn multiplier(self) -> i32 {
        match self {
            SortDirection::Descending => 1,
            SortDirection::Ascending => -1,
        }
    }

    /// Direction for a +1/-1 multiplier
    pub fn from_multiplier(multiplier: i32) -> Option<Self> {
        match multiplier {
            1 => Some(SortDirection::Descending),
            -1 => Some(SortDirection::Ascending),
            _ => None,
        }
    }

    /// The opposite direction
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Descending => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
        }
    }

    /// Short name used in query strings
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Descending => "desc",
            SortDirection::Ascending => "asc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "desc" | "descending" | "1" | "+1" => Ok(SortDirection::Descending),
            "asc" | "ascending" | "-1" => Ok(SortDirection::Ascending),
            _ => Err(CoreError::InvalidDirection(s.to_string())),
        }
    }
}

/// Order district names by `sort_key` in `direction`.
///
/// Returns every key of `districts` exactly once.
pub fn sort_districts(
    districts: &DistrictMap,
    direction: SortDirection,
    sort_key: &str,
) -> Vec<String> {
    let mut names: Vec<&String> = districts.keys().collect();

    names.sort_by(|a, b| compare_districts(districts, a, b, direction, sort_key));

    names.into_iter().cloned().collect()
}

fn compare_districts(
    districts: &DistrictMap,
    a: &str,
    b: &str,
    direction: SortDirection,
    sort_key: &str,
) -> Ordering {
    match (a == UNKNOWN_DISTRICT, b == UNKNOWN_DISTRICT) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            // None < Some(_), so missing values are the lowest
            let va = districts.get(a).and_then(|m| m.metric(sort_key));
            let vb = districts.get(b).and_then(|m| m.metric(sort_key));

            match direction {
                SortDirection::Descending => vb.cmp(&va),
                SortDirection::Ascending => va.cmp(&vb),
            }
        }
    }
}

/// Sort state of one district table
///
/// Owned by a single table instance. Parents may only swap the whole
/// district map through [`SortState::replace_data`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortState {
    active_key: String,
    direction: SortDirection,
    ordered_names: Vec<String>,
}

impl SortState {
    /// Initial state: `confirmed`, descending, ordering already computed
    pub fn new(districts: &DistrictMap) -> Self {
        Self::with_key(districts, DEFAULT_SORT_KEY, SortDirection::Descending)
    }

    /// State sorted by an explicit key and direction
    pub fn with_key(
        districts: &DistrictMap,
        key: impl Into<String>,
        direction: SortDirection,
    ) -> Self {
        let active_key = key.into();
        let ordered_names = sort_districts(districts, direction, &active_key);

        Self {
            active_key,
            direction,
            ordered_names,
        }
    }

    /// Like [`SortState::with_key`] but rejects an empty key
    pub fn try_with_key(
        districts: &DistrictMap,
        key: &str,
        direction: SortDirection,
    ) -> CoreResult<Self> {
        if key.trim().is_empty() {
            return Err(CoreError::EmptySortKey);
        }
        Ok(Self::with_key(districts, key.trim(), direction))
    }

    /// Column header clicked.
    ///
    /// Same column flips the direction, another column becomes active in
    /// descending order. The ordering is recomputed with the new state.
    pub fn on_header_click(&mut self, key: &str, districts: &DistrictMap) {
        let direction = if key == self.active_key {
            self.direction.flipped()
        } else {
            SortDirection::Descending
        };

        tracing::trace!(
            from_key = %self.active_key,
            from_direction = %self.direction,
            to_key = %key,
            to_direction = %direction,
            "District sort changed"
        );

        self.active_key = key.to_string();
        self.direction = direction;
        self.ordered_names = sort_districts(districts, direction, key);
    }

    /// Parent replaced the district map; keep key and direction
    pub fn replace_data(&mut self, districts: &DistrictMap) {
        self.ordered_names = sort_districts(districts, self.direction, &self.active_key);
    }

    /// Metric currently used for ordering
    pub fn active_key(&self) -> &str {
        &self.active_key
    }

    /// Current direction
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Whether `key` is the active sort column
    pub fn is_active(&self, key: &str) -> bool {
        self.active_key == key
    }

    /// District names in display order
    pub fn ordered_names(&self) -> &[String] {
        &self.ordered_names
    }
}
