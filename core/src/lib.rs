//! Keyword search over an in-memory article corpus.
//!
//! Build a [`SearchIndexes`] from the corpus, look a keyword up, then
//! narrow or reshape the hits with at most one [`Filter`].

pub mod article;
pub mod corpus;
pub mod engine;
pub mod filter;
pub mod index;
pub mod result;
pub mod search;

pub use article::{ArticleInfo, ArticleRecord};
pub use engine::SearchIndexes;
pub use filter::{AdvancedSearch, Filter, FilterValue};
pub use index::{KeywordIndex, TermId, TitleId, TitleInfoIndex};
pub use result::{render, AuthorGroups, ResultSet};
pub use search::search;
