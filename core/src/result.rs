use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt::{self, Write};

/// Author to their titles, ordered by each author's first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorGroups {
    positions: HashMap<String, usize>,
    groups: Vec<(String, Vec<String>)>,
}

impl AuthorGroups {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, author: &str, title: &str) {
        let pos = match self.positions.get(author) {
            Some(&pos) => pos,
            None => {
                self.positions.insert(author.to_string(), self.groups.len());
                self.groups.push((author.to_string(), Vec::new()));
                self.groups.len() - 1
            }
        };
        self.groups[pos].1.push(title.to_string());
    }

    pub fn get(&self, author: &str) -> Option<&[String]> {
        self.positions.get(author).map(|&pos| self.groups[pos].1.as_slice())
    }

    pub fn authors(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.iter().map(|(author, _)| author.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.groups.iter().map(|(author, titles)| (author.as_str(), titles.as_slice()))
    }

    pub fn len(&self) -> usize { self.groups.len() }

    pub fn is_empty(&self) -> bool { self.groups.is_empty() }
}

impl<'a> FromIterator<(&'a str, &'a str)> for AuthorGroups {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut groups = Self::new();
        for (author, title) in iter {
            groups.push(author, title);
        }
        groups
    }
}

impl Serialize for AuthorGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (author, titles) in &self.groups {
            map.serialize_entry(author, titles)?;
        }
        map.end()
    }
}

/// The value threaded from search through at most one filter stage.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum ResultSet {
    Titles(Vec<String>),
    ByAuthor(AuthorGroups),
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        match self {
            ResultSet::Titles(titles) => titles.is_empty(),
            ResultSet::ByAuthor(groups) => groups.is_empty(),
        }
    }

    /// Number of titles, summed across authors for grouped results.
    pub fn total_hits(&self) -> usize {
        match self {
            ResultSet::Titles(titles) => titles.len(),
            ResultSet::ByAuthor(groups) => groups.iter().map(|(_, titles)| titles.len()).sum(),
        }
    }

    pub fn as_titles(&self) -> Option<&[String]> {
        match self {
            ResultSet::Titles(titles) => Some(titles),
            ResultSet::ByAuthor(_) => None,
        }
    }

    pub fn as_groups(&self) -> Option<&AuthorGroups> {
        match self {
            ResultSet::ByAuthor(groups) => Some(groups),
            ResultSet::Titles(_) => None,
        }
    }
}

impl From<Vec<String>> for ResultSet {
    fn from(titles: Vec<String>) -> Self { ResultSet::Titles(titles) }
}

impl From<AuthorGroups> for ResultSet {
    fn from(groups: AuthorGroups) -> Self { ResultSet::ByAuthor(groups) }
}

/// Literal list/mapping rendering: `['A', 'B']` or `{'X': ['A']}`.
impl fmt::Display for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultSet::Titles(titles) => write_list(f, titles),
            ResultSet::ByAuthor(groups) => {
                f.write_char('{')?;
                for (i, (author, titles)) in groups.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_quoted(f, author)?;
                    f.write_str(": ")?;
                    write_list(f, titles)?;
                }
                f.write_char('}')
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[String]) -> fmt::Result {
    f.write_char('[')?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_quoted(f, item)?;
    }
    f.write_char(']')
}

// Single quotes unless the text has a single quote and no double quote.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    f.write_char(quote)?;
    for ch in s.chars() {
        match ch {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c if !is_printable(c) => match c as u32 {
                n @ 0..=0xff => write!(f, "\\x{n:02x}")?,
                n @ 0x100..=0xffff => write!(f, "\\u{n:04x}")?,
                n => write!(f, "\\U{n:08x}")?,
            },
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}

// Controls, separators other than the plain space, and invisible format
// characters are escaped.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !(c.is_control()
        || c.is_whitespace()
        || matches!(c, '\u{ad}' | '\u{200b}'..='\u{200f}' | '\u{202a}'..='\u{202e}' | '\u{2060}'..='\u{2064}' | '\u{feff}'))
}

/// Presenter text for a final result.
pub fn render(result: &ResultSet) -> String {
    if result.is_empty() {
        "No articles found".to_string()
    } else {
        format!("Here are your articles: {result}")
    }
}
