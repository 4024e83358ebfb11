//! Dashboard Payloads
//!
//! The two documents the dashboard loads on start:
//! - state-wise data (per-state totals with their districts, national
//!   totals, day change and testing figures)
//! - demographic stats (age group, nationality, gender, hospitalization)
//!
//! Upstream counts are sometimes strings, so every count is a lenient
//! [`Count`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::metrics::{coerce_integer, DistrictMap};

/// Non-negative count that accepts numbers or numeric strings.
///
/// Unparseable or negative input becomes 0 so a partially malformed
/// payload still renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Count(pub u64);

impl Count {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for Count {
    fn from(value: u64) -> Self {
        Count(value)
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Count {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let count = match coerce_integer(&value) {
            Some(n) if n >= 0 => n as u64,
            Some(n) => {
                tracing::debug!(value = n, "Negative count clamped to 0");
                0
            }
            None => {
                if !value.is_null() {
                    tracing::debug!(value = %value, "Unparseable count treated as 0");
                }
                0
            }
        };
        Ok(Count(count))
    }
}

/// Confirmed / active / recovered / deaths
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseSummary {
    #[serde(default)]
    pub confirmed: Count,
    #[serde(default)]
    pub active: Count,
    #[serde(default)]
    pub recovered: Count,
    #[serde(default)]
    pub deaths: Count,
}

/// Testing figures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestedSummary {
    #[serde(default, alias = "total_samples_tested")]
    pub total_samples_tested: Count,
    #[serde(default, alias = "total_individuals_tested", skip_serializing_if = "Option::is_none")]
    pub total_individuals_tested: Option<Count>,
    #[serde(default, alias = "positive_cases_from_samples", skip_serializing_if = "Option::is_none")]
    pub positive_cases_from_samples: Option<Count>,
    #[serde(default, alias = "updated_at", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// One state with its districts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateSummary {
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(flatten)]
    pub cases: CaseSummary,
    #[serde(default)]
    pub districts: DistrictMap,
}

impl StateSummary {
    /// Whether `query` names this state (case-insensitive name or code)
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        self.state.eq_ignore_ascii_case(query)
            || self
                .code
                .as_deref()
                .is_some_and(|code| code.eq_ignore_ascii_case(query))
    }
}

/// State-wise document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateWiseData {
    #[serde(default)]
    pub statewise: Vec<StateSummary>,
    #[serde(default)]
    pub total: CaseSummary,
    #[serde(default)]
    pub tested: TestedSummary,
    #[serde(default, alias = "day_change")]
    pub day_change: CaseSummary,
}

impl StateWiseData {
    /// Look up a state by name or code
    pub fn find_state(&self, query: &str) -> Option<&StateSummary> {
        self.statewise.iter().find(|s| s.matches(query))
    }

    /// States ordered by confirmed count, largest first; ties by name
    pub fn states_by_confirmed(&self) -> Vec<&StateSummary> {
        let mut states: Vec<&StateSummary> = self.statewise.iter().collect();
        states.sort_by(|a, b| {
            b.cases
                .confirmed
                .cmp(&a.cases.confirmed)
                .then_with(|| a.state.cmp(&b.state))
        });
        states
    }

    /// Total number of districts across all states
    pub fn district_count(&self) -> usize {
        self.statewise.iter().map(|s| s.districts.len()).sum()
    }
}

/// Demographic breakdowns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicStats {
    #[serde(default, alias = "age_group")]
    pub age_group: BTreeMap<String, Count>,
    #[serde(default)]
    pub nationality: BTreeMap<String, Count>,
    #[serde(default)]
    pub gender: BTreeMap<String, Count>,
    #[serde(default, alias = "hospitalization_status")]
    pub hospitalization_status: BTreeMap<String, Count>,
}

impl DemographicStats {
    /// Named breakdowns in display order
    pub fn sections(&self) -> [(&'static str, &BTreeMap<String, Count>); 4] {
        [
            ("Age Group", &self.age_group),
            ("Nationality", &self.nationality),
            ("Gender", &self.gender),
            ("Hospitalization Status", &self.hospitalization_status),
        ]
    }

    /// Entries of one breakdown, largest first; ties by label
    pub fn ranked(section: &BTreeMap<String, Count>) -> Vec<(&str, Count)> {
        let mut entries: Vec<(&str, Count)> =
            section.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn statewise_json() -> Value {
        json!({
            "statewise": [
                {
                    "state": "Maharashtra",
                    "code": "MH",
                    "confirmed": "215",
                    "active": 180,
                    "recovered": "30",
                    "deaths": 5,
                    "districts": {
                        "Mumbai": {"confirmed": 120},
                        "Pune": {"confirmed": "60"},
                        "Unknown": {"confirmed": 35}
                    }
                },
                {
                    "state": "Kerala",
                    "code": "KL",
                    "confirmed": 240,
                    "districts": {}
                }
            ],
            "total": {"confirmed": 455, "active": 400, "recovered": 45, "deaths": 10},
            "tested": {"totalSamplesTested": "38442", "updatedAt": "2020-03-29T20:00:00Z"},
            "dayChange": {"confirmed": 12}
        })
    }

    #[test]
    fn test_count_lenient() {
        let c: Count = serde_json::from_value(json!("42")).unwrap();
        assert_eq!(c, Count(42));
        let c: Count = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(c, Count(7));
        let c: Count = serde_json::from_value(json!("n/a")).unwrap();
        assert_eq!(c, Count(0));
        let c: Count = serde_json::from_value(json!(-3)).unwrap();
        assert_eq!(c, Count(0));
        assert_eq!(serde_json::to_value(Count(9)).unwrap(), json!(9));
    }

    #[test]
    fn test_statewise_deserialize() {
        let data: StateWiseData = serde_json::from_value(statewise_json()).unwrap();

        assert_eq!(data.statewise.len(), 2);
        let mh = &data.statewise[0];
        assert_eq!(mh.cases.confirmed, Count(215));
        assert_eq!(mh.cases.recovered, Count(30));
        assert_eq!(mh.districts.len(), 3);
        assert_eq!(data.tested.total_samples_tested, Count(38442));
        assert_eq!(data.day_change.confirmed, Count(12));
        assert_eq!(data.day_change.deaths, Count(0));
        assert_eq!(data.district_count(), 3);
    }

    #[test]
    fn test_find_state_by_name_or_code() {
        let data: StateWiseData = serde_json::from_value(statewise_json()).unwrap();

        assert_eq!(data.find_state("kerala").map(|s| s.state.as_str()), Some("Kerala"));
        assert_eq!(data.find_state("mh").map(|s| s.state.as_str()), Some("Maharashtra"));
        assert!(data.find_state("Goa").is_none());
    }

    #[test]
    fn test_states_by_confirmed() {
        let data: StateWiseData = serde_json::from_value(statewise_json()).unwrap();
        let names: Vec<_> = data
            .states_by_confirmed()
            .into_iter()
            .map(|s| s.state.as_str())
            .collect();
        assert_eq!(names, vec!["Kerala", "Maharashtra"]);
    }

    #[test]
    fn test_demographics_ranked() {
        let stats: DemographicStats = serde_json::from_value(json!({
            "ageGroup": {"0-20": 5, "21-40": "17", "41-60": 17},
            "gender": {"male": 30, "female": 22}
        }))
        .unwrap();

        let ranked = DemographicStats::ranked(&stats.age_group);
        assert_eq!(
            ranked,
            vec![("21-40", Count(17)), ("41-60", Count(17)), ("0-20", Count(5))]
        );
        assert!(stats.nationality.is_empty());
        assert_eq!(stats.sections()[2].0, "Gender");
    }
}
