use proptest::prelude::*;
use search_core::filter::{exclude_keyword, filter_to_author, from_year, group_by_author, max_length};
use search_core::{search, ArticleRecord, KeywordIndex, TitleInfoIndex};
use std::collections::HashSet;

fn record() -> impl Strategy<Value = ArticleRecord> {
    (
        "[A-E]{1,2}",
        prop::sample::select(vec!["X", "Y", "Z", ""]),
        0i64..2_000_000_000,
        0u64..20_000,
        prop::collection::vec(prop::sample::select(vec!["cat", "dog", "Cat", "bird", ""]), 0..4),
    )
        .prop_map(|(title, author, timestamp, length, keywords)| ArticleRecord {
            title,
            author: author.to_string(),
            timestamp,
            length,
            keywords: keywords.into_iter().map(String::from).collect(),
        })
}

fn corpus() -> impl Strategy<Value = Vec<ArticleRecord>> {
    prop::collection::vec(record(), 0..12)
}

proptest! {
    #[test]
    fn keyword_index_refers_to_known_titles(corpus in corpus()) {
        let keywords = KeywordIndex::build(&corpus);
        let titles = TitleInfoIndex::build(&corpus);
        let seen: HashSet<&str> = corpus.iter().flat_map(|r| r.keywords.iter().map(String::as_str)).collect();
        for (keyword, listed) in keywords.iter() {
            prop_assert!(seen.contains(keyword));
            for title in listed {
                prop_assert!(titles.contains(title));
            }
        }
    }

    #[test]
    fn title_info_build_is_idempotent(corpus in corpus()) {
        prop_assert_eq!(TitleInfoIndex::build(&corpus), TitleInfoIndex::build(&corpus));
    }

    #[test]
    fn absent_keyword_finds_nothing(corpus in corpus(), keyword in "[a-zA-Z]{0,4}") {
        let index = KeywordIndex::build(&corpus);
        if !index.contains(&keyword) {
            prop_assert!(search(&keyword, &index).is_empty());
        }
    }

    #[test]
    fn max_length_keeps_short_subset(corpus in corpus(), keyword in "cat|dog|bird", limit in -100i64..20_000) {
        let info = TitleInfoIndex::build(&corpus);
        let hits = search(&keyword, &KeywordIndex::build(&corpus));
        let kept = max_length(limit, &hits, &info);
        if limit < 0 {
            prop_assert!(kept.is_empty());
        }
        for title in &kept {
            prop_assert!(hits.contains(title));
            prop_assert!((info.get(title).unwrap().length as i64) <= limit);
        }
    }

    #[test]
    fn exclude_keyword_never_adds(corpus in corpus(), keyword in "cat|dog", exclude in "[a-z]{0,4}") {
        let index = KeywordIndex::build(&corpus);
        let hits = search(&keyword, &index);
        let kept = exclude_keyword(&exclude, &hits, &index);
        if !index.contains(&exclude) {
            prop_assert_eq!(&kept, &hits);
        }
        for title in &kept {
            prop_assert!(hits.contains(title));
        }
    }

    #[test]
    fn from_year_matches_utc_year(corpus in corpus(), year in 1970i64..2035) {
        let info = TitleInfoIndex::build(&corpus);
        let hits = search("cat", &KeywordIndex::build(&corpus));
        for title in from_year(year, &hits, &info) {
            prop_assert_eq!(info.get(&title).unwrap().year(), Some(year));
        }
    }

    #[test]
    fn grouping_nothing_is_empty(corpus in corpus()) {
        prop_assert!(group_by_author(&[], &TitleInfoIndex::build(&corpus)).is_empty());
    }

    #[test]
    fn empty_author_matches_nothing_without_anonymous_articles(corpus in corpus()) {
        let corpus: Vec<ArticleRecord> = corpus.into_iter().filter(|r| !r.author.is_empty()).collect();
        let info = TitleInfoIndex::build(&corpus);
        let all: Vec<String> = corpus.iter().map(|r| r.title.clone()).collect();
        prop_assert!(filter_to_author("", &all, &info).is_empty());
    }
}
