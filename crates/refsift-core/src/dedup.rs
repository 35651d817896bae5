use tracing::info;

use crate::classifier::{DuplicateClassifier, ScoredPair};
use crate::config::DedupConfig;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::record::Record;
use crate::resolver::{filter_records, removal_set};
use crate::similarity::candidate_pairs;
use crate::vectorizer::DocumentTermMatrix;

/// Result of one dedup run: the surviving records, the dropped ones (in
/// their original relative order) and every scored pair.
#[derive(Debug, Clone)]
pub struct DedupOutcome {
    pub records: Vec<Record>,
    pub removed: Vec<Record>,
    pub pairs: Vec<ScoredPair>,
}

/// The full duplicate-detection pipeline behind one entry point. Stateless
/// apart from configuration; every invocation recomputes the corpus, the
/// term matrix and all pair similarities from scratch.
#[derive(Debug, Clone, Default)]
pub struct Deduplicator {
    config: DedupConfig,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DedupConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    /// Score every candidate pair and attach duplicate verdicts. Does not
    /// touch the input records.
    pub fn find_duplicates(&self, records: &[Record]) -> Result<Vec<ScoredPair>> {
        self.config.validate()?;
        if records.len() < 2 {
            return Ok(Vec::new());
        }

        let corpus = Corpus::from_records(records);
        let matrix =
            DocumentTermMatrix::build(corpus.documents.iter().map(|unit| unit.content.as_str()));
        let candidates = candidate_pairs(&matrix);

        let classifier = DuplicateClassifier::new(&self.config);
        Ok(classifier.classify(&matrix, &corpus.titles, &candidates))
    }

    /// Run the pipeline and return the filtered table. The caller's input is
    /// consumed and a new table returned; nothing is mutated in place.
    pub fn deduplicate(&self, records: Vec<Record>) -> Result<DedupOutcome> {
        let pairs = self.find_duplicates(&records)?;
        let removal = removal_set(&pairs);

        let (removed, kept): (Vec<_>, Vec<_>) = records
            .into_iter()
            .enumerate()
            .partition(|(index, _)| removal.contains(index));
        let removed: Vec<Record> = removed.into_iter().map(|(_, record)| record).collect();
        let records: Vec<Record> = kept.into_iter().map(|(_, record)| record).collect();

        info!(
            kept = records.len(),
            removed = removed.len(),
            pairs = pairs.len(),
            "deduplication finished"
        );
        Ok(DedupOutcome {
            records,
            removed,
            pairs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str, text: &str) -> Record {
        let mut record = Record::new(id, title);
        record.abstract_text = text.to_string();
        record
    }

    #[test]
    fn empty_table_returns_empty_table() {
        let outcome = Deduplicator::new().deduplicate(Vec::new()).expect("dedup");
        assert!(outcome.records.is_empty());
        assert!(outcome.pairs.is_empty());
    }

    #[test]
    fn single_record_is_returned_unchanged() {
        let input = vec![record("1", "Only One", "some abstract text")];
        let outcome = Deduplicator::new().deduplicate(input.clone()).expect("dedup");
        assert_eq!(outcome.records, input);
    }

    #[test]
    fn exact_duplicate_pair_keeps_exactly_one() {
        let input = vec![
            record("a", "A Study of X", "abstract about X keywords X, Y"),
            record("b", "A Study of X", "abstract about X keywords X, Y"),
        ];
        let outcome = Deduplicator::new().deduplicate(input).expect("dedup");
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].id, "a");
        assert_eq!(outcome.removed[0].id, "b");
    }

    #[test]
    fn disjoint_topics_are_never_flagged() {
        let input = vec![
            record("a", "Quantum Physics", "quantum physics particles"),
            record("b", "Medieval Poetry", "medieval poetry analysis"),
        ];
        let outcome = Deduplicator::new().deduplicate(input).expect("dedup");
        assert_eq!(outcome.records.len(), 2);
        assert!(outcome.pairs.is_empty());
    }

    #[test]
    fn invalid_config_is_rejected_before_any_work() {
        let deduplicator =
            Deduplicator::with_config(DedupConfig::new().with_doc_threshold(0.1));
        assert!(deduplicator.find_duplicates(&[]).is_err());
    }
}
