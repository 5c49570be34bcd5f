use crate::article::{ArticleInfo, ArticleRecord};
use std::collections::HashMap;

pub type TermId = u32;
pub type TitleId = u32;

/// Keyword to the titles that list it, in corpus order.
///
/// Keys are exact strings: no case folding or trimming. A title appears
/// once per occurrence of the keyword in the upstream data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordIndex {
    dictionary: HashMap<String, TermId>,
    postings: Vec<Vec<String>>,
}

impl KeywordIndex {
    pub fn new() -> Self { Self::default() }

    pub fn build(corpus: &[ArticleRecord]) -> Self {
        let mut index = Self::new();
        for article in corpus {
            for keyword in &article.keywords {
                index.push(keyword, &article.title);
            }
        }
        tracing::debug!(articles = corpus.len(), keywords = index.len(), "built keyword index");
        index
    }

    fn push(&mut self, keyword: &str, title: &str) {
        let tid = match self.dictionary.get(keyword) {
            Some(&tid) => tid,
            None => {
                let tid = self.postings.len() as TermId;
                self.dictionary.insert(keyword.to_string(), tid);
                self.postings.push(Vec::new());
                tid
            }
        };
        self.postings[tid as usize].push(title.to_string());
    }

    pub fn get(&self, keyword: &str) -> Option<&[String]> {
        self.dictionary.get(keyword).map(|&tid| self.postings[tid as usize].as_slice())
    }

    pub fn contains(&self, keyword: &str) -> bool { self.dictionary.contains_key(keyword) }

    pub fn len(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    /// Keywords with their titles, in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        let mut terms: Vec<(&str, TermId)> = self.dictionary.iter().map(|(k, &tid)| (k.as_str(), tid)).collect();
        terms.sort_by_key(|&(_, tid)| tid);
        terms.into_iter().map(move |(k, tid)| (k, self.postings[tid as usize].as_slice()))
    }
}

/// Title to its `{author, timestamp, length}` attributes.
///
/// Iterates in first-insertion order. A repeated title overwrites the
/// stored attributes but keeps the position of its first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleInfoIndex {
    positions: HashMap<String, TitleId>,
    entries: Vec<(String, ArticleInfo)>,
}

impl TitleInfoIndex {
    pub fn new() -> Self { Self::default() }

    pub fn build(corpus: &[ArticleRecord]) -> Self {
        let mut index = Self::new();
        for article in corpus {
            index.insert(&article.title, article.info());
        }
        if index.len() < corpus.len() {
            tracing::debug!(duplicates = corpus.len() - index.len(), "later records overwrote repeated titles");
        }
        tracing::debug!(titles = index.len(), "built title info index");
        index
    }

    fn insert(&mut self, title: &str, info: ArticleInfo) {
        match self.positions.get(title) {
            Some(&id) => self.entries[id as usize].1 = info,
            None => {
                self.positions.insert(title.to_string(), self.entries.len() as TitleId);
                self.entries.push((title.to_string(), info));
            }
        }
    }

    pub fn get(&self, title: &str) -> Option<&ArticleInfo> {
        self.positions.get(title).map(|&id| &self.entries[id as usize].1)
    }

    pub fn contains(&self, title: &str) -> bool { self.positions.contains_key(title) }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArticleInfo)> + '_ {
        self.entries.iter().map(|(title, info)| (title.as_str(), info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_title_keeps_first_position() {
        let corpus = vec![
            ArticleRecord::new("A", "X", 0, 1, &[]),
            ArticleRecord::new("B", "Y", 0, 2, &[]),
            ArticleRecord::new("A", "Z", 0, 3, &[]),
        ];
        let index = TitleInfoIndex::build(&corpus);
        let order: Vec<&str> = index.iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec!["A", "B"]);
        assert_eq!(index.get("A").map(|i| i.author.as_str()), Some("Z"));
        assert_eq!(index.get("A").map(|i| i.length), Some(3));
    }

    #[test]
    fn repeated_keyword_repeats_title() {
        let corpus = vec![ArticleRecord::new("A", "X", 0, 1, &["cat", "cat"])];
        let index = KeywordIndex::build(&corpus);
        assert_eq!(index.get("cat"), Some(&["A".to_string(), "A".to_string()][..]));
    }

    #[test]
    fn keywords_iterate_in_first_appearance_order() {
        let corpus = vec![
            ArticleRecord::new("A", "X", 0, 1, &["zebra", "apple"]),
            ArticleRecord::new("B", "X", 0, 1, &["mango", "zebra"]),
        ];
        let index = KeywordIndex::build(&corpus);
        let keys: Vec<&str> = index.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }
}
