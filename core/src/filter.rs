//! Filter stages applied to a search result.
//!
//! Every stage except [`exclude_keyword`] walks the title info index in
//! its iteration order and keeps the titles that are in the input list,
//! so the output comes back in corpus order without duplicates.

use crate::article::ArticleInfo;
use crate::engine::SearchIndexes;
use crate::index::{KeywordIndex, TitleInfoIndex};
use crate::result::{AuthorGroups, ResultSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

fn retain_by<'a, F>(titles: &[String], info: &'a TitleInfoIndex, mut keep: F) -> Vec<(&'a str, &'a ArticleInfo)>
where
    F: FnMut(&ArticleInfo) -> bool,
{
    let wanted: HashSet<&str> = titles.iter().map(String::as_str).collect();
    info.iter().filter(|&(title, meta)| wanted.contains(title) && keep(meta)).collect()
}

/// Titles whose recorded length is at most `max_length`.
pub fn max_length(max_length: i64, titles: &[String], info: &TitleInfoIndex) -> Vec<String> {
    let Ok(max) = u64::try_from(max_length) else {
        return Vec::new();
    };
    retain_by(titles, info, |meta| meta.length <= max).into_iter().map(|(t, _)| t.to_string()).collect()
}

/// Titles keyed by author, authors in order of first occurrence.
pub fn group_by_author(titles: &[String], info: &TitleInfoIndex) -> AuthorGroups {
    retain_by(titles, info, |_| true).into_iter().map(|(t, meta)| (meta.author.as_str(), t)).collect()
}

/// Titles whose author equals `author` exactly.
pub fn filter_to_author(author: &str, titles: &[String], info: &TitleInfoIndex) -> Vec<String> {
    retain_by(titles, info, |meta| meta.author == author).into_iter().map(|(t, _)| t.to_string()).collect()
}

/// The input titles minus every title listed under `keyword`.
///
/// Input order is kept. An unknown keyword removes nothing. A title that
/// appears more than once in the input is dropped entirely, however many
/// times it is listed under `keyword`.
pub fn exclude_keyword(keyword: &str, titles: &[String], index: &KeywordIndex) -> Vec<String> {
    let Some(excluded) = index.get(keyword) else {
        return titles.to_vec();
    };
    let excluded: HashSet<&str> = excluded.iter().map(String::as_str).collect();
    titles.iter().filter(|t| !excluded.contains(t.as_str())).cloned().collect()
}

/// Titles published in the given UTC calendar year.
pub fn from_year(year: i64, titles: &[String], info: &TitleInfoIndex) -> Vec<String> {
    retain_by(titles, info, |meta| meta.year() == Some(year)).into_iter().map(|(t, _)| t.to_string()).collect()
}

/// One filter stage with its parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Filter {
    MaxLength(i64),
    GroupByAuthor,
    ToAuthor(String),
    ExcludeKeyword(String),
    Year(i64),
}

impl Filter {
    pub fn apply(&self, titles: &[String], indexes: &SearchIndexes) -> ResultSet {
        match self {
            Filter::MaxLength(max) => max_length(*max, titles, &indexes.titles).into(),
            Filter::GroupByAuthor => group_by_author(titles, &indexes.titles).into(),
            Filter::ToAuthor(author) => filter_to_author(author, titles, &indexes.titles).into(),
            Filter::ExcludeKeyword(keyword) => exclude_keyword(keyword, titles, &indexes.keywords).into(),
            Filter::Year(year) => from_year(*year, titles, &indexes.titles).into(),
        }
    }

    /// The external option code selecting this filter.
    pub fn option(&self) -> i64 {
        match self {
            Filter::MaxLength(_) => 1,
            Filter::GroupByAuthor => 2,
            Filter::ToAuthor(_) => 3,
            Filter::ExcludeKeyword(_) => 4,
            Filter::Year(_) => 5,
        }
    }
}

/// Raw parameter of an advanced option, as entered by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Int(i64),
    Text(String),
}

impl FilterValue {
    fn as_int(&self) -> Option<i64> {
        match self {
            FilterValue::Int(n) => Some(*n),
            FilterValue::Text(s) => s.trim().parse().ok(),
        }
    }

    fn into_text(self) -> String {
        match self {
            FilterValue::Int(n) => n.to_string(),
            FilterValue::Text(s) => s,
        }
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self { FilterValue::Int(n) }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self { FilterValue::Text(s.to_string()) }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self { FilterValue::Text(s) }
}

/// What the advanced option asks for after resolving its code and value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AdvancedSearch {
    #[default]
    Unfiltered,
    Filter(Filter),
    /// A numeric filter got a value that cannot match anything.
    NoMatch,
}

impl AdvancedSearch {
    /// Resolve the external `(option, value)` pair. Codes 1 to 5 select a
    /// filter; anything else leaves the search result as is.
    pub fn from_option(option: i64, value: impl Into<FilterValue>) -> Self {
        let value = value.into();
        match option {
            1 | 5 => match value.as_int() {
                Some(n) if option == 1 => Filter::MaxLength(n).into(),
                Some(n) => Filter::Year(n).into(),
                None => AdvancedSearch::NoMatch,
            },
            2 => Filter::GroupByAuthor.into(),
            3 => Filter::ToAuthor(value.into_text()).into(),
            4 => Filter::ExcludeKeyword(value.into_text()).into(),
            _ => AdvancedSearch::Unfiltered,
        }
    }

    /// Whether the option code uses a value at all.
    pub fn takes_value(option: i64) -> bool {
        matches!(option, 1 | 3 | 4 | 5)
    }

    pub fn apply(&self, titles: Vec<String>, indexes: &SearchIndexes) -> ResultSet {
        match self {
            AdvancedSearch::Unfiltered => ResultSet::Titles(titles),
            AdvancedSearch::Filter(filter) => filter.apply(&titles, indexes),
            AdvancedSearch::NoMatch => ResultSet::Titles(Vec::new()),
        }
    }
}

impl From<Filter> for AdvancedSearch {
    fn from(filter: Filter) -> Self { AdvancedSearch::Filter(filter) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_codes_resolve() {
        assert_eq!(AdvancedSearch::from_option(1, 5100_i64), AdvancedSearch::Filter(Filter::MaxLength(5100)));
        assert_eq!(AdvancedSearch::from_option(2, ""), AdvancedSearch::Filter(Filter::GroupByAuthor));
        assert_eq!(AdvancedSearch::from_option(3, "Mack Johnson"), AdvancedSearch::Filter(Filter::ToAuthor("Mack Johnson".into())));
        assert_eq!(AdvancedSearch::from_option(4, "pop"), AdvancedSearch::Filter(Filter::ExcludeKeyword("pop".into())));
        assert_eq!(AdvancedSearch::from_option(5, " 2009 "), AdvancedSearch::Filter(Filter::Year(2009)));
        assert_eq!(AdvancedSearch::from_option(6, ""), AdvancedSearch::Unfiltered);
        assert_eq!(AdvancedSearch::from_option(42, "x"), AdvancedSearch::Unfiltered);
    }

    #[test]
    fn non_integer_numeric_value_matches_nothing() {
        assert_eq!(AdvancedSearch::from_option(5, ""), AdvancedSearch::NoMatch);
        assert_eq!(AdvancedSearch::from_option(1, "long"), AdvancedSearch::NoMatch);
    }

    #[test]
    fn integer_text_value_for_text_filters() {
        assert_eq!(AdvancedSearch::from_option(4, 1922_i64), AdvancedSearch::Filter(Filter::ExcludeKeyword("1922".into())));
    }

    #[test]
    fn exclude_drops_every_copy_of_a_title() {
        use crate::article::ArticleRecord;
        let index = KeywordIndex::build(&[
            ArticleRecord::new("A", "X", 0, 1, &["cat", "cat", "dog"]),
            ArticleRecord::new("B", "X", 0, 1, &["cat"]),
        ]);
        let hits = crate::search::search("cat", &index);
        assert_eq!(hits, vec!["A", "A", "B"]);
        assert_eq!(exclude_keyword("dog", &hits, &index), vec!["B"]);
        assert_eq!(exclude_keyword("bird", &hits, &index), hits);
    }

    #[test]
    fn option_round_trips_code() {
        for code in 1..=5 {
            if let AdvancedSearch::Filter(f) = AdvancedSearch::from_option(code, 1_i64) {
                assert_eq!(f.option(), code);
            } else {
                panic!("code {code} did not select a filter");
            }
        }
    }
}
