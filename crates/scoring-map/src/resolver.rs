//! Free-text country resolution.
//!
//! An exact alias hit wins outright. Otherwise every alias key is scored with
//! [`token_sort_ratio`](crate::token_sort_ratio) and the best candidate is
//! accepted when it reaches the fuzzy threshold. Keys shorter than
//! [`MIN_FUZZY_ALIAS_CHARS`] (codes and abbreviations such as "drc") only
//! ever match exactly.

use std::cmp::Ordering;

use scoring_model::ScoringOptions;
use scoring_model::options::DEFAULT_FUZZY_THRESHOLD;
use scoring_standards::{CountryAliasEntry, CountryTable, normalize_key};
use serde::Serialize;

use crate::fuzzy::{sorted_ratio, token_sort_key};

/// Alias keys shorter than this are excluded from fuzzy matching.
pub const MIN_FUZZY_ALIAS_CHARS: usize = 4;

/// How a [`Resolution`] was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Fuzzy,
    Unresolved,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
            Self::Unresolved => "unresolved",
        }
    }
}

/// Outcome of resolving one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub code: Option<String>,
    /// 1.0 for exact hits, similarity / 100 for fuzzy hits, 0.0 when unresolved.
    pub confidence: f64,
    /// The alias key that produced the match.
    pub matched_alias: Option<String>,
    pub is_african: bool,
    pub kind: MatchKind,
}

impl Resolution {
    pub fn unresolved() -> Self {
        Self {
            code: None,
            confidence: 0.0,
            matched_alias: None,
            is_african: false,
            kind: MatchKind::Unresolved,
        }
    }

    fn matched(entry: &CountryAliasEntry, confidence: f64, kind: MatchKind) -> Self {
        Self {
            code: Some(entry.code.clone()),
            confidence,
            matched_alias: Some(entry.variant.clone()),
            is_african: entry.is_african,
            kind,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.code.is_some()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

#[derive(Debug, Clone)]
struct Candidate<'a> {
    entry: &'a CountryAliasEntry,
    sorted_key: String,
}

/// Resolves free text to canonical codes against a shared [`CountryTable`].
///
/// Holds no mutable state: the same text always yields the same result.
#[derive(Debug, Clone)]
pub struct CountryResolver<'a> {
    table: &'a CountryTable,
    candidates: Vec<Candidate<'a>>,
    threshold: f64,
}

impl<'a> CountryResolver<'a> {
    pub fn new(table: &'a CountryTable) -> Self {
        let candidates = table
            .entries()
            .filter(|entry| entry.variant.chars().count() >= MIN_FUZZY_ALIAS_CHARS)
            .map(|entry| Candidate {
                entry,
                sorted_key: token_sort_key(&entry.variant),
            })
            .collect();
        Self {
            table,
            candidates,
            threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }

    pub fn from_options(table: &'a CountryTable, options: &ScoringOptions) -> Self {
        Self::new(table).with_threshold(options.fuzzy_threshold)
    }

    /// Sets the minimum fuzzy similarity (0-100) for accepting a candidate.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn table(&self) -> &'a CountryTable {
        self.table
    }

    pub fn resolve(&self, text: &str) -> Resolution {
        let key = normalize_key(text);
        if key.is_empty() {
            return Resolution::unresolved();
        }
        if let Some(entry) = self.table.lookup(&key) {
            return Resolution::matched(entry, 1.0, MatchKind::Exact);
        }

        let query = token_sort_key(&key);
        let best = self
            .candidates
            .iter()
            .map(|candidate| (candidate, sorted_ratio(&query, &candidate.sorted_key)))
            .max_by(|left, right| compare_candidates(*left, *right));

        match best {
            Some((candidate, score)) if score >= self.threshold => {
                Resolution::matched(candidate.entry, score / 100.0, MatchKind::Fuzzy)
            }
            _ => Resolution::unresolved(),
        }
    }

    /// Resolves each input in order.
    pub fn resolve_many<I, S>(&self, texts: I) -> Vec<Resolution>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts
            .into_iter()
            .map(|text| self.resolve(text.as_ref()))
            .collect()
    }
}

/// Orders candidates so that the preferred one compares greatest: higher
/// score, then an African code, then the shorter alias, then the
/// lexicographically smaller alias.
fn compare_candidates(left: (&Candidate<'_>, f64), right: (&Candidate<'_>, f64)) -> Ordering {
    let (left, left_score) = left;
    let (right, right_score) = right;
    left_score
        .total_cmp(&right_score)
        .then_with(|| left.entry.is_african.cmp(&right.entry.is_african))
        .then_with(|| right.entry.variant.len().cmp(&left.entry.variant.len()))
        .then_with(|| right.entry.variant.cmp(&left.entry.variant))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(contents: &str) -> CountryTable {
        CountryTable::from_reader(contents.as_bytes(), "test").unwrap()
    }

    #[test]
    fn exact_hits_have_full_confidence() {
        let table = table("code,african,names\nNGA,true,Nigeria\n");
        let resolver = CountryResolver::new(&table);
        let resolution = resolver.resolve("  NIGERIA ");
        assert_eq!(resolution.code(), Some("NGA"));
        assert_eq!(resolution.confidence, 1.0);
        assert_eq!(resolution.kind, MatchKind::Exact);
        assert!(resolution.is_african);
    }

    #[test]
    fn blank_text_is_unresolved() {
        let table = table("code,african,names\nNGA,true,Nigeria\n");
        let resolver = CountryResolver::new(&table);
        assert_eq!(resolver.resolve("   "), Resolution::unresolved());
        assert_eq!(resolver.resolve("..."), Resolution::unresolved());
    }

    #[test]
    fn fuzzy_hits_scale_confidence() {
        let table = table("code,african,names\nNGA,true,Nigeria\n");
        let resolver = CountryResolver::new(&table);
        let resolution = resolver.resolve("Nigerya");
        assert_eq!(resolution.code(), Some("NGA"));
        assert_eq!(resolution.kind, MatchKind::Fuzzy);
        assert!(resolution.confidence >= 0.8 && resolution.confidence < 1.0);
    }

    #[test]
    fn below_threshold_is_unresolved() {
        let table = table("code,african,names\nNGA,true,Nigeria\n");
        let resolver = CountryResolver::new(&table);
        assert!(!resolver.resolve("Norway").is_resolved());
        assert!(!resolver.with_threshold(99.0).resolve("Nigerya").is_resolved());
    }

    #[test]
    fn short_keys_match_exactly_only() {
        let table = table("code,african,names\nNAM,true,Namibia\n");
        let resolver = CountryResolver::new(&table);
        assert_eq!(resolver.resolve("nam").kind, MatchKind::Exact);
        assert!(!resolver.resolve("Name").is_resolved());
    }

    #[test]
    fn ties_prefer_african_codes() {
        // "gabonx" is equally close to "gabonz" and "gabony".
        let table = table("code,african,names\nZZZ,false,Gabonz\nGAB,true,Gabony\n");
        let resolver = CountryResolver::new(&table);
        let resolution = resolver.resolve("Gabonx");
        assert_eq!(resolution.code(), Some("GAB"));
    }

    #[test]
    fn ties_prefer_shorter_then_smaller_alias() {
        let table1 = table("code,african,names\nBBB,false,abcdefxyz\nAAA,false,abcd\n");
        let resolver = CountryResolver::new(&table1).with_threshold(50.0);
        // "abcdef" scores 8/10 against "abcd" and 12/15 against "abcdefxyz".
        assert_eq!(resolver.resolve("abcdef").code(), Some("AAA"));

        let table = table("code,african,names\nBBB,false,abcf\nAAA,false,abce\n");
        let resolver = CountryResolver::new(&table).with_threshold(50.0);
        // Equal length, equal score: the smaller alias key wins.
        assert_eq!(resolver.resolve("abcx").code(), Some("AAA"));
    }
}
