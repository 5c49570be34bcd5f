use crate::index::KeywordIndex;

/// Titles listed under exactly `keyword`, or nothing.
///
/// Matching is exact and case-sensitive. An empty query only matches if
/// the index holds an empty-string keyword.
pub fn search(keyword: &str, index: &KeywordIndex) -> Vec<String> {
    index.get(keyword).map(<[String]>::to_vec).unwrap_or_default()
}
