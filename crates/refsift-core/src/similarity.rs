use crate::vectorizer::DocumentTermMatrix;

/// Candidate pre-filter on document similarity. Pairs at or below the floor
/// are never materialized; `DedupConfig::validate` guarantees the decision
/// thresholds sit above it, so the pruning cannot change any verdict.
pub const CANDIDATE_FLOOR: f64 = 0.5;

/// A record pair whose document similarity exceeded the candidate floor.
/// Always `i < j`; `i` is the earlier-appearing record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidatePair {
    pub i: usize,
    pub j: usize,
    pub doc_similarity: f64,
}

/// Cosine similarity between two rows of the matrix. Zero when either row
/// has no terms.
pub fn cosine(matrix: &DocumentTermMatrix, a: usize, b: usize) -> f64 {
    let norm_a = matrix.norm(a);
    let norm_b = matrix.norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let (small, large) = if matrix.row(a).len() <= matrix.row(b).len() {
        (matrix.row(a), matrix.row(b))
    } else {
        (matrix.row(b), matrix.row(a))
    };

    let dot: f64 = small
        .iter()
        .filter_map(|(term, count)| large.get(term).map(|other| count * other))
        .sum();

    dot / (norm_a * norm_b)
}

/// Materialize the upper triangle of the pairwise similarity matrix,
/// diagonal excluded, keeping only pairs above the candidate floor. Each
/// unordered pair is computed exactly once.
pub fn candidate_pairs(matrix: &DocumentTermMatrix) -> Vec<CandidatePair> {
    let n = matrix.n_docs();
    let mut pairs = Vec::new();

    for i in 0..n {
        if matrix.norm(i) == 0.0 {
            continue;
        }
        for j in (i + 1)..n {
            let doc_similarity = cosine(matrix, i, j);
            if doc_similarity > CANDIDATE_FLOOR {
                pairs.push(CandidatePair {
                    i,
                    j,
                    doc_similarity,
                });
            }
        }
    }

    pairs
}
