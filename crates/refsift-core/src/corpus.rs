use crate::record::Record;

/// One comparable unit of text, tagged with the index of the record it came
/// from so similarity results can be mapped back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUnit {
    pub index: usize,
    pub content: String,
}

/// Per-record text extracted for comparison: the document body (abstract +
/// keywords) and the title, one unit of each per record, in record order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub documents: Vec<TextUnit>,
    pub titles: Vec<TextUnit>,
}

impl Corpus {
    pub fn from_records(records: &[Record]) -> Self {
        let documents = records
            .iter()
            .enumerate()
            .map(|(index, record)| TextUnit {
                index,
                content: record.text(),
            })
            .collect();
        let titles = records
            .iter()
            .enumerate()
            .map(|(index, record)| TextUnit {
                index,
                content: record.title.clone(),
            })
            .collect();
        Self { documents, titles }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_keep_record_indices() {
        let mut a = Record::new("1", "First");
        a.abstract_text = "first abstract".to_string();
        let b = Record::new("2", "Second");

        let corpus = Corpus::from_records(&[a, b]);
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.documents[0].index, 0);
        assert_eq!(corpus.documents[0].content, "first abstract");
        assert_eq!(corpus.documents[1].content, "");
        assert_eq!(corpus.titles[1].content, "Second");
    }

    #[test]
    fn empty_record_set_builds_empty_corpus() {
        let corpus = Corpus::from_records(&[]);
        assert!(corpus.is_empty());
    }
}
