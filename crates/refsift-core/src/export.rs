use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::Result;
use crate::record::Record;

const CANONICAL_COLUMNS: [&str; 10] = [
    "id", "title", "abstract", "keywords", "authors", "year", "source", "doi", "journal", "url",
];

/// Write records as CSV: the canonical columns first, then the sorted union
/// of passthrough columns seen in `extra`.
pub fn export_csv(path: &Path, records: &[Record]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    let extra_columns: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.extra.keys().map(String::as_str))
        .collect();

    let mut header: Vec<&str> = CANONICAL_COLUMNS.to_vec();
    header.extend(extra_columns.iter().copied());
    writer.write_record(&header)?;

    for record in records {
        let mut row: Vec<&str> = vec![
            &record.id,
            &record.title,
            &record.abstract_text,
            &record.keywords,
            &record.authors,
            record.year.as_deref().unwrap_or(""),
            record.source.as_deref().unwrap_or(""),
            record.doi.as_deref().unwrap_or(""),
            record.journal.as_deref().unwrap_or(""),
            record.url.as_deref().unwrap_or(""),
        ];
        for column in &extra_columns {
            row.push(record.extra.get(*column).map(String::as_str).unwrap_or(""));
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
