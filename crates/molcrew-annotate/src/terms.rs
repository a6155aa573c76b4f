//! Dictionary of domain vocabulary shown with inline definitions.

use std::collections::HashMap;

/// Definition shown when a decorated term has no dictionary entry.
pub const FALLBACK_DEFINITION: &str = "No definition available for this term.";

/// Immutable mapping from domain vocabulary to human-readable definitions.
///
/// Injected into the annotator rather than read from a global, so tests can
/// substitute fixture tables.
#[derive(Debug, Clone)]
pub struct TermDictionary {
    entries: HashMap<String, String>,
    /// Canonical keys in insertion order, used to build the match automaton.
    keys: Vec<String>,
}

impl TermDictionary {
    pub fn new(entries: Vec<(&str, &str)>) -> Self {
        let keys: Vec<String> = entries.iter().map(|(k, _)| k.to_string()).collect();
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { entries, keys }
    }

    /// The production vocabulary: chart properties plus the recurring
    /// medicinal-chemistry terms from the agent scripts.
    pub fn builtin() -> Self {
        Self::new(vec![
            ("LogP", "Octanol-water partition coefficient, a measure of lipophilicity. Lower values favor aqueous solubility."),
            ("TPSA", "Topological polar surface area. Affects membrane permeability and oral absorption."),
            ("QED", "Quantitative estimate of drug-likeness on a 0 to 1 scale. Higher is better."),
            ("MW", "Molecular weight in daltons."),
            ("SA Score", "Synthetic accessibility score from 1 (easy) to 10 (hard)."),
            ("Tanimoto", "Structural similarity to the reference molecule on a 0 to 1 scale."),
            ("Lipinski", "Rule-of-five heuristic for oral bioavailability based on MW, LogP, and hydrogen bond counts."),
            ("ADME", "Absorption, distribution, metabolism, and excretion profile."),
            ("pharmacophore", "The substructure responsible for a molecule's biological activity."),
            ("bioavailability", "Fraction of an administered dose that reaches systemic circulation."),
            ("lipophilicity", "Affinity for lipid environments; correlates with LogP."),
            ("solubility", "How readily the compound dissolves in aqueous media."),
            ("permeability", "Ability to cross biological membranes."),
            ("hydroxyl", "An -OH substituent; increases polarity and hydrogen bonding."),
            ("carboxylic acid", "A -COOH substituent; strongly polar and ionizable."),
            ("toxicity", "Predicted adverse biological effects."),
            ("selectivity", "Preference for the intended target over off-targets."),
        ])
    }

    /// Look up a definition by canonical key.
    pub fn definition(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Definition for display: dictionary entry or the permissive fallback.
    pub fn definition_or_fallback(&self, key: &str) -> &str {
        self.definition(key).unwrap_or(FALLBACK_DEFINITION)
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_chart_properties() {
        let dict = TermDictionary::builtin();
        for key in ["LogP", "TPSA", "QED", "MW", "SA Score", "Tanimoto"] {
            assert!(dict.definition(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_unknown_key_falls_back() {
        let dict = TermDictionary::builtin();
        assert_eq!(dict.definition_or_fallback("pKa"), FALLBACK_DEFINITION);
    }
}
