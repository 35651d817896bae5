use serde::{Deserialize, Serialize};

/// Canonical record fields a source column can map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalField {
    Id,
    Title,
    Abstract,
    Keywords,
    Authors,
    Year,
    Source,
    Doi,
    Journal,
    Url,
}

/// Literature databases whose CSV exports refsift understands. Detection
/// looks at column headers only, never file names or contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceDatabase {
    Scopus,
    WebOfScience,
    PubMed,
    Ebsco,
    ProQuest,
    Generic,
}

impl SourceDatabase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scopus => "Scopus",
            Self::WebOfScience => "Web of Science",
            Self::PubMed => "PubMed",
            Self::Ebsco => "EBSCO",
            Self::ProQuest => "ProQuest",
            Self::Generic => "generic",
        }
    }

    /// Detect the source database from a header row. Signature columns are
    /// checked from most to least distinctive; anything unrecognized is
    /// treated as a generic canonical-schema export.
    pub fn detect(headers: &[String]) -> Self {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        let has = |name: &str| normalized.iter().any(|h| h == name);

        if has("eid") {
            Self::Scopus
        } else if has("ut (unique wos id)") || has("article title") && has("source title") {
            Self::WebOfScience
        } else if has("pmid") {
            Self::PubMed
        } else if has("accession number") {
            Self::Ebsco
        } else if has("storeid") || has("pubtitle") {
            Self::ProQuest
        } else {
            Self::Generic
        }
    }

    /// Map one of this database's column headers onto a canonical field.
    /// Unmapped headers pass through into `Record::extra`.
    pub fn field_for(&self, header: &str) -> Option<CanonicalField> {
        use CanonicalField::*;

        let header = normalize_header(header);
        let mapped = match self {
            Self::Scopus => match header.as_str() {
                "eid" => Id,
                "title" => Title,
                "abstract" => Abstract,
                "author keywords" | "index keywords" => Keywords,
                "authors" => Authors,
                "year" => Year,
                "doi" => Doi,
                "source title" => Journal,
                "link" => Url,
                _ => return None,
            },
            Self::WebOfScience => match header.as_str() {
                "ut (unique wos id)" => Id,
                "article title" => Title,
                "abstract" => Abstract,
                "author keywords" | "keywords plus" => Keywords,
                "authors" => Authors,
                "publication year" => Year,
                "doi" => Doi,
                "source title" => Journal,
                _ => return None,
            },
            Self::PubMed => match header.as_str() {
                "pmid" => Id,
                "title" => Title,
                "abstract" => Abstract,
                "mesh terms" => Keywords,
                "authors" => Authors,
                "publication year" => Year,
                "doi" => Doi,
                "journal/book" => Journal,
                _ => return None,
            },
            Self::Ebsco => match header.as_str() {
                "accession number" => Id,
                "article title" | "title" => Title,
                "abstract" => Abstract,
                "keywords" | "subject terms" => Keywords,
                "author" | "authors" => Authors,
                "publication date" | "year" => Year,
                "doi" => Doi,
                "journal title" => Journal,
                "url" => Url,
                _ => return None,
            },
            Self::ProQuest => match header.as_str() {
                "storeid" => Id,
                "title" => Title,
                "abstract" => Abstract,
                "subjectterms" | "subjects" => Keywords,
                "authors" => Authors,
                "year" => Year,
                "digitalobjectidentifier" => Doi,
                "pubtitle" => Journal,
                "documenturl" => Url,
                _ => return None,
            },
            Self::Generic => match header.as_str() {
                "id" => Id,
                "title" => Title,
                "abstract" | "text" => Abstract,
                "keywords" => Keywords,
                "authors" => Authors,
                "year" => Year,
                "source" => Source,
                "doi" => Doi,
                "journal" => Journal,
                "url" => Url,
                _ => return None,
            },
        };
        Some(mapped)
    }
}

fn normalize_header(header: &str) -> String {
    header.trim().trim_start_matches('\u{feff}').to_lowercase()
}

/// Cosmetic cleanup of keyword strings: databases disagree on separators, so
/// variants are unified to `"; "` with one keyword per segment.
pub fn normalize_keywords(raw: &str) -> String {
    raw.split([';', '|', '\n'])
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn detects_scopus_by_eid() {
        let detected = SourceDatabase::detect(&headers(&[
            "Authors",
            "Title",
            "Year",
            "Source title",
            "EID",
        ]));
        assert_eq!(detected, SourceDatabase::Scopus);
    }

    #[test]
    fn detects_web_of_science_by_ut_column() {
        let detected = SourceDatabase::detect(&headers(&[
            "Authors",
            "Article Title",
            "Source Title",
            "UT (Unique WOS ID)",
        ]));
        assert_eq!(detected, SourceDatabase::WebOfScience);
    }

    #[test]
    fn detects_pubmed_by_pmid() {
        let detected = SourceDatabase::detect(&headers(&["PMID", "Title", "Authors"]));
        assert_eq!(detected, SourceDatabase::PubMed);
    }

    #[test]
    fn unknown_headers_fall_back_to_generic() {
        let detected = SourceDatabase::detect(&headers(&["id", "title", "abstract"]));
        assert_eq!(detected, SourceDatabase::Generic);
    }

    #[test]
    fn detection_ignores_case_and_bom() {
        let detected = SourceDatabase::detect(&headers(&["\u{feff}Pmid", "Title"]));
        assert_eq!(detected, SourceDatabase::PubMed);
    }

    #[test]
    fn scopus_maps_author_keywords() {
        assert_eq!(
            SourceDatabase::Scopus.field_for("Author Keywords"),
            Some(CanonicalField::Keywords)
        );
        assert_eq!(SourceDatabase::Scopus.field_for("Cited by"), None);
    }

    #[test]
    fn generic_accepts_text_as_abstract() {
        assert_eq!(
            SourceDatabase::Generic.field_for("text"),
            Some(CanonicalField::Abstract)
        );
    }

    #[test]
    fn keyword_separators_are_unified() {
        assert_eq!(
            normalize_keywords("alpha;beta |  gamma;;"),
            "alpha; beta; gamma"
        );
        assert_eq!(normalize_keywords(""), "");
    }
}
