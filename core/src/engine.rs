use crate::article::ArticleRecord;
use crate::filter::AdvancedSearch;
use crate::index::{KeywordIndex, TitleInfoIndex};
use crate::result::ResultSet;
use crate::search::search;

/// Both lookup structures built from one corpus.
///
/// Nothing is cached behind the caller's back: build once and hold on to
/// the value to reuse it across queries, or rebuild when the corpus changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndexes {
    pub keywords: KeywordIndex,
    pub titles: TitleInfoIndex,
}

impl SearchIndexes {
    pub fn build(corpus: &[ArticleRecord]) -> Self {
        Self { keywords: KeywordIndex::build(corpus), titles: TitleInfoIndex::build(corpus) }
    }

    pub fn search(&self, keyword: &str) -> Vec<String> {
        search(keyword, &self.keywords)
    }

    /// Search for `keyword`, then run at most one filter stage.
    pub fn query(&self, keyword: &str, advanced: &AdvancedSearch) -> ResultSet {
        let titles = self.search(keyword);
        tracing::debug!(keyword, hits = titles.len(), ?advanced, "keyword search");
        advanced.apply(titles, self)
    }
}
