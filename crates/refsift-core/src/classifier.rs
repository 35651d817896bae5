use std::collections::HashSet;

use tracing::debug;

use crate::config::{DedupConfig, TitleMatch};
use crate::corpus::TextUnit;
use crate::similarity::{CandidatePair, cosine};
use crate::vectorizer::DocumentTermMatrix;

/// A classified pair with the three similarity signals and the verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPair {
    pub i: usize,
    pub j: usize,
    pub doc_similarity: f64,
    pub title_similarity: f64,
    pub mean_similarity: f64,
    pub duplicate: bool,
}

/// Title-comparison policy, selected once from configuration so the
/// classifier itself never branches on mode.
pub trait TitleComparator {
    /// Title similarity in [0, 1] for one candidate pair.
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Whether two titles are byte-identical after normalization. Only the
    /// exact policy answers true; token similarity never short-circuits.
    fn exact_match(&self, _a: &str, _b: &str) -> bool {
        false
    }

    /// Whether the exact-match rule must be checked over every record pair,
    /// not just candidates above the similarity floor.
    fn scans_all_pairs(&self) -> bool {
        false
    }
}

/// Builds a fresh two-document term matrix from just the pair's titles and
/// takes their cosine. The vocabulary is local to the two titles.
pub struct TokenSimilarity;

impl TitleComparator for TokenSimilarity {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let matrix = DocumentTermMatrix::build([a, b]);
        cosine(&matrix, 0, 1)
    }
}

/// Treats two titles as duplicates iff their punctuation-stripped,
/// lowercased strings are identical, independent of the similarity engine.
pub struct ExactNormalized;

impl TitleComparator for ExactNormalized {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        if self.exact_match(a, b) { 1.0 } else { 0.0 }
    }

    fn exact_match(&self, a: &str, b: &str) -> bool {
        let left = normalize_title(a);
        !left.is_empty() && left == normalize_title(b)
    }

    fn scans_all_pairs(&self) -> bool {
        true
    }
}

pub fn comparator_for(mode: TitleMatch) -> Box<dyn TitleComparator> {
    match mode {
        TitleMatch::Exact => Box::new(ExactNormalized),
        TitleMatch::TokenSimilarity => Box::new(TokenSimilarity),
    }
}

/// Lowercase a title and collapse punctuation to single spaces.
pub fn normalize_title(title: &str) -> String {
    let lowercase = title.to_lowercase();
    let cleaned: String = lowercase
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub struct DuplicateClassifier<'a> {
    config: &'a DedupConfig,
    comparator: Box<dyn TitleComparator>,
}

impl<'a> DuplicateClassifier<'a> {
    pub fn new(config: &'a DedupConfig) -> Self {
        Self {
            config,
            comparator: comparator_for(config.title_match),
        }
    }

    /// Score every candidate pair against the three rules:
    /// (a) document similarity above its threshold,
    /// (b) mean of document and title similarity above its threshold,
    /// (c) exact-policy title match, checked over all record pairs.
    pub fn classify(
        &self,
        matrix: &DocumentTermMatrix,
        titles: &[TextUnit],
        candidates: &[CandidatePair],
    ) -> Vec<ScoredPair> {
        let mut scored = Vec::with_capacity(candidates.len());
        let mut seen: HashSet<(usize, usize)> = HashSet::with_capacity(candidates.len());

        for pair in candidates {
            let title_a = &titles[pair.i].content;
            let title_b = &titles[pair.j].content;
            let title_similarity = self.comparator.similarity(title_a, title_b);
            let mean_similarity = (pair.doc_similarity + title_similarity) / 2.0;

            let duplicate = pair.doc_similarity > self.config.doc_sim_threshold
                || mean_similarity > self.config.mean_sim_threshold
                || self.comparator.exact_match(title_a, title_b);

            seen.insert((pair.i, pair.j));
            scored.push(ScoredPair {
                i: pair.i,
                j: pair.j,
                doc_similarity: pair.doc_similarity,
                title_similarity,
                mean_similarity,
                duplicate,
            });
        }

        if self.comparator.scans_all_pairs() {
            self.scan_remaining_pairs(matrix, titles, &seen, &mut scored);
            scored.sort_by_key(|pair| (pair.i, pair.j));
        }

        let duplicates = scored.iter().filter(|pair| pair.duplicate).count();
        debug!(
            candidates = candidates.len(),
            duplicates, "classified candidate pairs"
        );
        scored
    }

    /// The exact-match rule is a cheap string comparison, so it covers pairs
    /// the candidate floor pruned away. Normalized titles are precomputed
    /// once to keep the full quadratic sweep to equality checks.
    fn scan_remaining_pairs(
        &self,
        matrix: &DocumentTermMatrix,
        titles: &[TextUnit],
        seen: &HashSet<(usize, usize)>,
        scored: &mut Vec<ScoredPair>,
    ) {
        let normalized: Vec<String> = titles
            .iter()
            .map(|unit| normalize_title(&unit.content))
            .collect();

        for i in 0..normalized.len() {
            if normalized[i].is_empty() {
                continue;
            }
            for j in (i + 1)..normalized.len() {
                if seen.contains(&(i, j)) || normalized[i] != normalized[j] {
                    continue;
                }
                let doc_similarity = cosine(matrix, i, j);
                scored.push(ScoredPair {
                    i,
                    j,
                    doc_similarity,
                    title_similarity: 1.0,
                    mean_similarity: (doc_similarity + 1.0) / 2.0,
                    duplicate: true,
                });
            }
        }
    }
}
