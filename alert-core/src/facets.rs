//! Facet filter state. An absent or empty value list for a facet means
//! "all values selected"; rows only ever propose a `FacetSelection`,
//! the owner of the `FacetFilters` applies it.

use crate::types::AlertRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-facet selected values, keyed by facet key ("source", "severity",
/// "status", ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetFilters {
    filters: BTreeMap<String, Vec<String>>,
}

/// Selection intent emitted by a facet value row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FacetSelection {
    /// Flip one value's membership.
    Toggle(String),
    /// Filter the facet down to exactly this value.
    Only(String),
    /// Clear the facet back to "all values selected".
    All,
}

impl FacetFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self, facet_key: &str) -> &[String] {
        self.filters
            .get(facet_key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_unfiltered(&self, facet_key: &str) -> bool {
        self.values(facet_key).is_empty()
    }

    /// Selected means: no filter on the facet, or the value is listed.
    pub fn is_selected(&self, facet_key: &str, value: &str) -> bool {
        let current = self.values(facet_key);
        current.is_empty() || current.iter().any(|v| v == value)
    }

    /// Exclusive means the facet is filtered to exactly this value.
    pub fn is_exclusive(&self, facet_key: &str, value: &str) -> bool {
        matches!(self.values(facet_key), [only] if only == value)
    }

    /// What the row's action button would do for this value.
    pub fn action_for(&self, facet_key: &str, value: &str) -> FacetSelection {
        if self.is_exclusive(facet_key, value) {
            FacetSelection::All
        } else {
            FacetSelection::Only(value.to_string())
        }
    }

    /// Apply a selection intent. `universe` is the facet's full value
    /// list, needed to express "everything except v" when toggling off
    /// a value while unfiltered.
    pub fn apply(&mut self, facet_key: &str, selection: FacetSelection, universe: &[String]) {
        match selection {
            FacetSelection::All => {
                self.filters.remove(facet_key);
            }
            FacetSelection::Only(value) => {
                self.filters.insert(facet_key.to_string(), vec![value]);
            }
            FacetSelection::Toggle(value) => {
                let mut current = self.values(facet_key).to_vec();
                if current.is_empty() {
                    current = universe.iter().filter(|v| **v != value).cloned().collect();
                } else if let Some(pos) = current.iter().position(|v| *v == value) {
                    current.remove(pos);
                } else {
                    current.push(value);
                }

                // Empty and full-universe filters both mean "all";
                // keep the unfiltered form canonical.
                if current.is_empty() || universe.iter().all(|v| current.contains(v)) {
                    self.filters.remove(facet_key);
                } else {
                    self.filters.insert(facet_key.to_string(), current);
                }
            }
        }
    }

    /// Whether a record passes every facet filter it has a value for.
    pub fn matches(&self, record: &AlertRecord, facet_keys: &[&str]) -> bool {
        facet_keys.iter().all(|key| {
            record
                .facet_value(key)
                .map(|value| self.is_selected(key, &value))
                .unwrap_or(true)
        })
    }
}

/// Value -> occurrence count for one facet, ordered by value.
pub fn facet_counts(records: &[AlertRecord], facet_key: &str) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        if let Some(value) = record.facet_value(facet_key) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }
    counts.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AlertStatus, Severity};

    fn universe() -> Vec<String> {
        vec!["high".into(), "low".into(), "warning".into()]
    }

    #[test]
    fn unfiltered_selects_everything() {
        let filters = FacetFilters::new();
        assert!(filters.is_selected("severity", "high"));
        assert!(filters.is_selected("status", "open"));
        assert!(filters.is_unfiltered("severity"));
    }

    #[test]
    fn sole_value_is_exclusive_and_action_is_all() {
        let mut filters = FacetFilters::new();
        filters.apply("status", FacetSelection::Only("open".into()), &[]);

        assert!(filters.is_exclusive("status", "open"));
        assert_eq!(filters.action_for("status", "open"), FacetSelection::All);

        filters.apply("status", FacetSelection::All, &[]);
        assert!(filters.is_unfiltered("status"));
    }

    #[test]
    fn multi_value_filter_is_not_exclusive() {
        let mut filters = FacetFilters::new();
        filters.apply("severity", FacetSelection::Only("high".into()), &universe());
        filters.apply("severity", FacetSelection::Toggle("low".into()), &universe());

        assert!(!filters.is_exclusive("severity", "high"));
        assert_eq!(
            filters.action_for("severity", "high"),
            FacetSelection::Only("high".into())
        );
    }

    #[test]
    fn toggle_from_unfiltered_deselects_one() {
        let mut filters = FacetFilters::new();
        filters.apply("severity", FacetSelection::Toggle("low".into()), &universe());

        assert!(!filters.is_selected("severity", "low"));
        assert!(filters.is_selected("severity", "high"));
        assert!(filters.is_selected("severity", "warning"));
    }

    #[test]
    fn toggling_last_selected_value_returns_to_unfiltered() {
        let mut filters = FacetFilters::new();
        filters.apply("severity", FacetSelection::Only("high".into()), &universe());
        filters.apply("severity", FacetSelection::Toggle("high".into()), &universe());
        assert!(filters.is_unfiltered("severity"));
    }

    #[test]
    fn re_covering_the_universe_collapses_to_unfiltered() {
        let mut filters = FacetFilters::new();
        filters.apply("severity", FacetSelection::Toggle("low".into()), &universe());
        filters.apply("severity", FacetSelection::Toggle("low".into()), &universe());
        assert!(filters.is_unfiltered("severity"));
    }

    fn record(id: u64, severity: Severity, source: &str) -> AlertRecord {
        AlertRecord {
            id,
            preset: "feed".into(),
            source_type: source.into(),
            severity,
            status: AlertStatus::Firing,
            title: "t".into(),
            dismissed: false,
            assignee: None,
            received_at: "0".into(),
            payload: serde_json::Value::Null,
        }
    }

    #[test]
    fn counts_group_by_value() {
        let records = vec![
            record(1, Severity::High, "datadog"),
            record(2, Severity::High, "sentry"),
            record(3, Severity::Low, "datadog"),
        ];
        assert_eq!(
            facet_counts(&records, "severity"),
            vec![("high".to_string(), 2), ("low".to_string(), 1)]
        );
        assert_eq!(
            facet_counts(&records, "source"),
            vec![("datadog".to_string(), 2), ("sentry".to_string(), 1)]
        );
    }

    #[test]
    fn matches_applies_every_facet() {
        let mut filters = FacetFilters::new();
        filters.apply("severity", FacetSelection::Only("high".into()), &[]);

        let keys = ["source", "severity", "status"];
        assert!(filters.matches(&record(1, Severity::High, "datadog"), &keys));
        assert!(!filters.matches(&record(2, Severity::Low, "datadog"), &keys));
    }
}
