use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::record::Record;
use crate::sources::{CanonicalField, SourceDatabase, normalize_keywords};

/// One parsed export file: the database it came from and its records in
/// file order.
#[derive(Debug, Clone)]
pub struct ImportedFile {
    pub source: SourceDatabase,
    pub records: Vec<Record>,
}

/// Read one CSV export, detect its source database from the header row and
/// map its columns onto the canonical schema. Missing fields become empty
/// strings; columns with no mapping ride along in `Record::extra`.
pub fn import_csv(path: &Path) -> Result<ImportedFile> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = reader.headers()?.iter().map(ToOwned::to_owned).collect();
    let source = SourceDatabase::detect(&headers);
    debug!(path = %path.display(), source = source.name(), "detected source database");

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut record = Record::default();
        for (column, value) in headers.iter().zip(row.iter()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match source.field_for(column) {
                Some(CanonicalField::Id) => record.id = value.to_string(),
                Some(CanonicalField::Title) => record.title = value.to_string(),
                Some(CanonicalField::Abstract) => record.abstract_text = value.to_string(),
                Some(CanonicalField::Keywords) => record.keywords = normalize_keywords(value),
                Some(CanonicalField::Authors) => record.authors = value.to_string(),
                Some(CanonicalField::Year) => record.year = Some(value.to_string()),
                Some(CanonicalField::Source) => record.source = Some(value.to_string()),
                Some(CanonicalField::Doi) => record.doi = Some(value.to_string()),
                Some(CanonicalField::Journal) => record.journal = Some(value.to_string()),
                Some(CanonicalField::Url) => record.url = Some(value.to_string()),
                None => {
                    record.extra.insert(column.clone(), value.to_string());
                }
            }
        }
        if record.source.is_none() {
            record.source = Some(source.name().to_string());
        }
        records.push(record);
    }

    info!(
        path = %path.display(),
        source = source.name(),
        records = records.len(),
        "imported export file"
    );
    Ok(ImportedFile { source, records })
}

/// Import several export files and concatenate them in argument order. The
/// merged order defines record indices, and therefore which member of a
/// duplicate pair survives dedup (the earlier one).
pub fn merge_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Record>> {
    let mut merged = Vec::new();
    for path in paths {
        merged.extend(import_csv(path.as_ref())?.records);
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write csv");
        file
    }

    #[test]
    fn imports_scopus_export() {
        let file = write_csv(
            "Authors,Title,Year,Source title,Abstract,Author Keywords,DOI,EID,Cited by\n\
             \"Doe J.\",A Study of X,2021,Journal of X,About X.,x; methods,10.1/x,2-s2.0-1,14\n",
        );
        let imported = import_csv(file.path()).expect("import");

        assert_eq!(imported.source, SourceDatabase::Scopus);
        assert_eq!(imported.records.len(), 1);
        let record = &imported.records[0];
        assert_eq!(record.id, "2-s2.0-1");
        assert_eq!(record.title, "A Study of X");
        assert_eq!(record.keywords, "x; methods");
        assert_eq!(record.journal.as_deref(), Some("Journal of X"));
        assert_eq!(record.source.as_deref(), Some("Scopus"));
        assert_eq!(record.extra.get("Cited by").map(String::as_str), Some("14"));
    }

    #[test]
    fn missing_columns_become_empty_strings() {
        let file = write_csv("PMID,Title\n123,Short Record\n");
        let imported = import_csv(file.path()).expect("import");
        let record = &imported.records[0];
        assert_eq!(record.abstract_text, "");
        assert_eq!(record.authors, "");
        assert_eq!(record.text(), "");
    }

    #[test]
    fn merge_preserves_argument_order() {
        let scopus = write_csv("EID,Title\ns1,First\n");
        let pubmed = write_csv("PMID,Title\np1,Second\n");
        let merged = merge_files(&[scopus.path(), pubmed.path()]).expect("merge");

        let ids: Vec<&str> = merged.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "p1"]);
        assert_eq!(merged[1].source.as_deref(), Some("PubMed"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = import_csv(Path::new("/nonexistent/export.csv"));
        assert!(matches!(result, Err(crate::RefsiftError::Io(_))));
    }
}
