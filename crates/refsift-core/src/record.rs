use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One bibliographic entry in the canonical schema.
///
/// `id` is the identifier assigned by the source database and may collide
/// across sources before deduplication. Fields the core does not consume
/// (`year`, `source`, `doi`, ...) ride through filtering untouched; columns
/// with no canonical mapping land in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub keywords: String,
    pub authors: String,
    pub year: Option<String>,
    pub source: Option<String>,
    pub doi: Option<String>,
    pub journal: Option<String>,
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Record {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Document body used for similarity: abstract and keyword string joined.
    pub fn text(&self) -> String {
        match (
            self.abstract_text.trim().is_empty(),
            self.keywords.trim().is_empty(),
        ) {
            (false, false) => format!("{} {}", self.abstract_text.trim(), self.keywords.trim()),
            (false, true) => self.abstract_text.trim().to_string(),
            (true, false) => self.keywords.trim().to_string(),
            (true, true) => String::new(),
        }
    }
}
