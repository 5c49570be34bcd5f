use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One article as supplied by the corpus source.
///
/// Deserializes from a JSON object with these field names or from the
/// positional form `[title, author, timestamp, length, keywords]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub author: String,
    /// Unix epoch seconds.
    pub timestamp: i64,
    pub length: u64,
    pub keywords: Vec<String>,
}

impl ArticleRecord {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        timestamp: i64,
        length: u64,
        keywords: &[&str],
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            timestamp,
            length,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn info(&self) -> ArticleInfo {
        ArticleInfo { author: self.author.clone(), timestamp: self.timestamp, length: self.length }
    }
}

/// Attributes stored per title in the title info index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleInfo {
    pub author: String,
    pub timestamp: i64,
    pub length: u64,
}

impl ArticleInfo {
    /// UTC calendar year of the timestamp, `None` if it is out of range.
    pub fn year(&self) -> Option<i64> {
        OffsetDateTime::from_unix_timestamp(self.timestamp).ok().map(|dt| i64::from(dt.year()))
    }
}
