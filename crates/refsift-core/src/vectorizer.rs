use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::stopwords::is_stopword;

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:https?://|www\.)\S+").expect("valid URL regex"));

pub type TermId = usize;

/// Normalize one document into a bag of terms.
///
/// Pipeline, applied identically to every document: lowercase, strip URLs,
/// replace punctuation/symbols (hyphens included) with spaces, split on
/// whitespace, drop purely numeric tokens and stopwords. Terms that
/// normalize to empty are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let without_urls = URL_REGEX.replace_all(&lowered, " ");

    let cleaned: String = without_urls
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| token.chars().any(|c| c.is_alphabetic()))
        .filter(|token| !is_stopword(token))
        .map(ToOwned::to_owned)
        .collect()
}

/// Term-frequency matrix over one vocabulary shared by every document, so
/// rows are directly comparable. Rows are sparse (term id -> count); the
/// Euclidean norm of each row is precomputed for cosine similarity.
#[derive(Debug, Clone)]
pub struct DocumentTermMatrix {
    vocabulary: HashMap<String, TermId>,
    rows: Vec<HashMap<TermId, f64>>,
    norms: Vec<f64>,
}

impl DocumentTermMatrix {
    pub fn build<'a, I>(texts: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut vocabulary: HashMap<String, TermId> = HashMap::new();
        let mut rows: Vec<HashMap<TermId, f64>> = Vec::new();

        for text in texts {
            let mut row: HashMap<TermId, f64> = HashMap::new();
            for term in tokenize(text) {
                let next_id = vocabulary.len();
                let id = *vocabulary.entry(term).or_insert(next_id);
                *row.entry(id).or_insert(0.0) += 1.0;
            }
            rows.push(row);
        }

        let norms = rows
            .iter()
            .map(|row| row.values().map(|count| count * count).sum::<f64>().sqrt())
            .collect();

        Self {
            vocabulary,
            rows,
            norms,
        }
    }

    pub fn n_docs(&self) -> usize {
        self.rows.len()
    }

    pub fn n_terms(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn row(&self, doc: usize) -> &HashMap<TermId, f64> {
        &self.rows[doc]
    }

    pub fn norm(&self, doc: usize) -> f64 {
        self.norms[doc]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_drops_noise() {
        let terms = tokenize("Quantum Entanglement, 2023: see https://example.org/x for 42 details");
        assert_eq!(terms, vec!["quantum", "entanglement", "see", "details"]);
    }

    #[test]
    fn tokenize_splits_hyphenated_terms() {
        let terms = tokenize("state-of-the-art meta-analysis");
        assert_eq!(terms, vec!["state", "art", "meta", "analysis"]);
    }

    #[test]
    fn tokenize_strips_bare_www_urls() {
        let terms = tokenize("published at www.journal.example/abc today");
        assert_eq!(terms, vec!["published", "today"]);
    }

    #[test]
    fn matrix_shares_vocabulary_across_documents() {
        let matrix = DocumentTermMatrix::build(["alpha beta", "beta gamma beta"]);
        assert_eq!(matrix.n_docs(), 2);
        assert_eq!(matrix.n_terms(), 3);

        // "beta" maps to the same column in both rows.
        let shared: Vec<&TermId> = matrix
            .row(0)
            .keys()
            .filter(|id| matrix.row(1).contains_key(id))
            .collect();
        assert_eq!(shared.len(), 1);
        assert_eq!(matrix.row(1)[shared[0]], 2.0);
    }

    #[test]
    fn empty_document_yields_zero_row() {
        let matrix = DocumentTermMatrix::build(["", "something real"]);
        assert!(matrix.row(0).is_empty());
        assert_eq!(matrix.norm(0), 0.0);
    }
}
