//! Heuristic extraction of structure notations from message text.
//!
//! This is a text filter, not a parser: anything that looks like SMILES
//! line notation is surfaced for molecule rendering, with no chemical
//! validation.

use regex::Regex;

/// Minimum candidate length; shorter tokens are too noisy to render.
const MIN_LEN: usize = 6;

/// Scans free text for plausible SMILES strings using three independent
/// patterns: backtick-delimited tokens, `SMILES:`-labelled tokens, and
/// `molecule:`-labelled tokens.
#[derive(Debug)]
pub struct SmilesExtractor {
    patterns: Vec<Regex>,
}

impl Default for SmilesExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SmilesExtractor {
    pub fn new() -> Self {
        // The charset covers organic-subset SMILES plus ring/branch/charge
        // punctuation. Compiled once; the extractor is shared per process.
        let patterns = vec![
            Regex::new(r"`([A-Za-z0-9@+\-\[\]()=#$/\\%]+)`").expect("backtick pattern"),
            Regex::new(r"(?i)SMILES[:\s]+([A-Za-z0-9@+\-\[\]()=#$/\\%]+)").expect("smiles pattern"),
            Regex::new(r"(?i)molecule[:\s]+([A-Za-z0-9@+\-\[\]()=#$/\\%]+)")
                .expect("molecule pattern"),
        ];
        Self { patterns }
    }

    /// Return the distinct plausible structure strings in `text`.
    ///
    /// A candidate is kept only if it is longer than five characters and
    /// contains at least one upper-case letter. Exact duplicates are removed;
    /// ordering across pattern types is not meaningful.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for pattern in &self.patterns {
            for caps in pattern.captures_iter(text) {
                let candidate = &caps[1];
                if candidate.len() >= MIN_LEN
                    && candidate.chars().any(|c| c.is_ascii_uppercase())
                    && !found.iter().any(|f| f == candidate)
                {
                    found.push(candidate.to_string());
                }
            }
        }
        found
    }
}
