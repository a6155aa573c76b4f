//! Optimal/acceptable intervals for the numeric property vocabulary.

use std::collections::HashMap;

/// Interval pair for one property.
///
/// Directionality is baked into how the intervals are authored; the
/// `lower_is_better` flag is informational for renderers and does not
/// participate in classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyRange {
    pub optimal: (f64, f64),
    pub acceptable: (f64, f64),
    pub lower_is_better: bool,
}

/// Immutable mapping from property keys to their interval pairs.
///
/// Injected configuration, like [`crate::terms::TermDictionary`].
#[derive(Debug, Clone)]
pub struct RangeTable {
    ranges: HashMap<String, PropertyRange>,
    keys: Vec<String>,
}

impl RangeTable {
    pub fn new(entries: Vec<(&str, PropertyRange)>) -> Self {
        let keys: Vec<String> = entries.iter().map(|(k, _)| k.to_string()).collect();
        let ranges = entries
            .into_iter()
            .map(|(k, r)| (k.to_string(), r))
            .collect();
        Self { ranges, keys }
    }

    /// Production interval table for the six chart properties.
    pub fn builtin() -> Self {
        Self::new(vec![
            ("LogP", PropertyRange {
                optimal: (1.0, 3.0),
                acceptable: (-0.4, 5.0),
                lower_is_better: true,
            }),
            ("TPSA", PropertyRange {
                optimal: (20.0, 90.0),
                acceptable: (0.0, 140.0),
                lower_is_better: false,
            }),
            ("QED", PropertyRange {
                optimal: (0.67, 1.0),
                acceptable: (0.4, 1.0),
                lower_is_better: false,
            }),
            ("MW", PropertyRange {
                optimal: (200.0, 500.0),
                acceptable: (100.0, 800.0),
                lower_is_better: true,
            }),
            ("SA Score", PropertyRange {
                optimal: (1.0, 3.0),
                acceptable: (1.0, 6.0),
                lower_is_better: true,
            }),
            ("Tanimoto", PropertyRange {
                optimal: (0.8, 1.0),
                acceptable: (0.7, 1.0),
                lower_is_better: false,
            }),
        ])
    }

    pub fn get(&self, key: &str) -> Option<&PropertyRange> {
        self.ranges.get(key)
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Resolve a key ignoring ASCII case, returning the canonical spelling.
    pub fn canonical_key(&self, key: &str) -> Option<&str> {
        self.keys
            .iter()
            .find(|k| k.eq_ignore_ascii_case(key))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_six_properties() {
        let table = RangeTable::builtin();
        assert_eq!(table.keys().len(), 6);
        assert!(table.get("LogP").is_some());
        assert!(table.get("pKa").is_none());
    }

    #[test]
    fn test_canonical_key_is_case_insensitive() {
        let table = RangeTable::builtin();
        assert_eq!(table.canonical_key("logp"), Some("LogP"));
        assert_eq!(table.canonical_key("sa score"), Some("SA Score"));
        assert_eq!(table.canonical_key("unknown"), None);
    }

    #[test]
    fn test_optimal_inside_acceptable() {
        // Interval authoring sanity: the optimal band must sit inside the
        // acceptable band for every builtin property.
        let table = RangeTable::builtin();
        for key in table.keys() {
            let r = table.get(key).unwrap();
            assert!(r.acceptable.0 <= r.optimal.0, "{}", key);
            assert!(r.optimal.1 <= r.acceptable.1, "{}", key);
        }
    }
}
