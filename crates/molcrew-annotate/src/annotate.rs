//! Two-pass tokenizer turning message text into displayable segments.
//!
//! Pass one collects candidate spans from two matchers into one interval
//! list: a regex for "property key followed by a numeric value" built from
//! the range table's vocabulary, and an Aho-Corasick automaton over the term
//! dictionary. Pass two resolves overlaps with a declared precedence (start
//! offset ascending, then longest match, then property-value over bare term)
//! and emits segments covering the whole input.

use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{classify, PropertyStatus};
use crate::ranges::RangeTable;
use crate::terms::TermDictionary;

/// One unit of rendered output. Concatenating the `text` fields of an
/// annotation reproduces the input exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Plain {
        text: String,
    },
    Term {
        key: String,
        text: String,
    },
    Property {
        key: String,
        text: String,
        value: f64,
        status: PropertyStatus,
    },
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain { text } => text,
            Segment::Term { text, .. } => text,
            Segment::Property { text, .. } => text,
        }
    }
}

enum CandidateKind {
    Property { key: String, value: f64 },
    Term { key: String },
}

struct Candidate {
    start: usize,
    end: usize,
    kind: CandidateKind,
}

impl Candidate {
    fn priority(&self) -> u8 {
        match self.kind {
            CandidateKind::Property { .. } => 1,
            CandidateKind::Term { .. } => 0,
        }
    }
}

/// Annotates free text against an injected term dictionary and range table.
pub struct Annotator {
    dictionary: TermDictionary,
    ranges: RangeTable,
    term_automaton: AhoCorasick,
    /// Pattern index to canonical dictionary key.
    term_keys: Vec<String>,
    value_pattern: Regex,
}

impl Annotator {
    pub fn new(dictionary: TermDictionary, ranges: RangeTable) -> anyhow::Result<Self> {
        let term_keys: Vec<String> = dictionary.keys().to_vec();
        let term_automaton = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .ascii_case_insensitive(true)
            .build(&term_keys)?;

        // Longest keys first so the alternation cannot shadow them.
        let mut value_keys: Vec<&String> = ranges.keys().iter().collect();
        value_keys.sort_by_key(|k| std::cmp::Reverse(k.len()));
        let alternation = value_keys
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let value_pattern = Regex::new(&format!(
            r"(?i)\b({})\b\s*[:=]?\s*(-?\d+(?:\.\d+)?)",
            alternation
        ))?;

        debug!(
            "Annotator ready: {} terms, {} ranged properties",
            term_keys.len(),
            ranges.keys().len()
        );

        Ok(Self {
            dictionary,
            ranges,
            term_automaton,
            term_keys,
            value_pattern,
        })
    }

    /// Annotator over the builtin production tables.
    pub fn builtin() -> Self {
        Self::new(TermDictionary::builtin(), RangeTable::builtin())
            .expect("builtin tables always build")
    }

    pub fn dictionary(&self) -> &TermDictionary {
        &self.dictionary
    }

    pub fn ranges(&self) -> &RangeTable {
        &self.ranges
    }

    /// Produce an ordered segment list covering `text` with no gaps and no
    /// overlaps.
    pub fn annotate(&self, text: &str) -> Vec<Segment> {
        let mut candidates = self.collect_candidates(text);

        // Declared precedence: start ascending, then longest span, then
        // property-value over bare term.
        candidates.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then_with(|| (b.end - b.start).cmp(&(a.end - a.start)))
                .then_with(|| b.priority().cmp(&a.priority()))
        });

        let mut segments = Vec::new();
        let mut cursor = 0;
        for c in candidates {
            if c.start < cursor {
                // Overlaps a span already accepted by the sweep.
                continue;
            }
            if c.start > cursor {
                segments.push(Segment::Plain {
                    text: text[cursor..c.start].to_string(),
                });
            }
            let span = text[c.start..c.end].to_string();
            match c.kind {
                CandidateKind::Property { key, value } => segments.push(Segment::Property {
                    status: classify(&self.ranges, &key, value),
                    key,
                    text: span,
                    value,
                }),
                CandidateKind::Term { key } => segments.push(Segment::Term { key, text: span }),
            }
            cursor = c.end;
        }
        if cursor < text.len() {
            segments.push(Segment::Plain {
                text: text[cursor..].to_string(),
            });
        }
        segments
    }

    fn collect_candidates(&self, text: &str) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for caps in self.value_pattern.captures_iter(text) {
            let whole = caps.get(0).expect("group 0 always present");
            let key_match = caps.get(1).expect("key group always present");
            let Ok(value) = caps[2].parse::<f64>() else {
                continue;
            };
            let key = self
                .ranges
                .canonical_key(key_match.as_str())
                .unwrap_or(key_match.as_str())
                .to_string();
            candidates.push(Candidate {
                start: whole.start(),
                end: whole.end(),
                kind: CandidateKind::Property { key, value },
            });
        }

        for mat in self.term_automaton.find_iter(text) {
            if !is_word_bounded(text, mat.start(), mat.end()) {
                continue;
            }
            let key = self.term_keys[mat.pattern().as_usize()].clone();
            candidates.push(Candidate {
                start: mat.start(),
                end: mat.end(),
                kind: CandidateKind::Term { key },
            });
        }

        candidates
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start].chars().next_back().map_or(true, |c| !is_word_char(c));
    let after_ok = text[end..].chars().next().map_or(true, |c| !is_word_char(c));
    before_ok && after_ok
}
