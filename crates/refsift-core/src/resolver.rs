use std::collections::BTreeSet;

use crate::classifier::ScoredPair;
use crate::record::Record;

/// Indices to drop: the second member `j` of every flagged pair.
///
/// Pairs are only ever generated with `i < j`, so the earliest-appearing
/// record of a pair always survives. Chains (A≈B, B≈C) collapse to the
/// earliest record without cluster logic: B falls as the `j` of (A, B) and C
/// as the `j` of (B, C). This keep-first policy is an invariant of the
/// resolver, not a side effect of iteration order.
pub fn removal_set(pairs: &[ScoredPair]) -> BTreeSet<usize> {
    pairs
        .iter()
        .filter(|pair| pair.duplicate)
        .map(|pair| pair.j)
        .collect()
}

/// Return the records with the removal set excluded, relative order of
/// survivors preserved.
pub fn filter_records(records: Vec<Record>, removal: &BTreeSet<usize>) -> Vec<Record> {
    records
        .into_iter()
        .enumerate()
        .filter(|(index, _)| !removal.contains(index))
        .map(|(_, record)| record)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(i: usize, j: usize, duplicate: bool) -> ScoredPair {
        ScoredPair {
            i,
            j,
            doc_similarity: 0.9,
            title_similarity: 0.9,
            mean_similarity: 0.9,
            duplicate,
        }
    }

    #[test]
    fn removal_set_keeps_the_first_member() {
        let removal = removal_set(&[pair(0, 2, true), pair(1, 3, false)]);
        assert_eq!(removal.into_iter().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn chain_collapses_to_the_earliest_record() {
        // A≈B and B≈C with no A–C pair: only A survives.
        let removal = removal_set(&[pair(0, 1, true), pair(1, 2, true)]);
        assert_eq!(removal.into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn shared_j_is_removed_once() {
        let removal = removal_set(&[pair(0, 2, true), pair(1, 2, true)]);
        assert_eq!(removal.len(), 1);
    }

    #[test]
    fn filtering_preserves_survivor_order() {
        let records = vec![
            Record::new("a", "A"),
            Record::new("b", "B"),
            Record::new("c", "C"),
            Record::new("d", "D"),
        ];
        let removal: BTreeSet<usize> = [1].into_iter().collect();
        let kept = filter_records(records, &removal);
        let ids: Vec<&str> = kept.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
    }
}
