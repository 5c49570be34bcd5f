use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use search_core::corpus::load_corpus;
use search_core::{render, AdvancedSearch, SearchIndexes};
use tracing_subscriber::{fmt, EnvFilter};

use std::io::{self, BufRead, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "wiki-search")]
#[command(about = "Keyword search over an article corpus with one advanced filter", long_about = None)]
struct Cli {
    /// Corpus file (.json / .jsonl) or directory of them
    #[arg(long, global = true, default_value = "data/articles.json")]
    corpus: String,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a keyword; anything not given on the command line is prompted for
    Search {
        #[arg(long)]
        keyword: Option<String>,
        /// Advanced option: 1 max length, 2 group by author, 3 author, 4 exclude keyword, 5 year, 6 none
        #[arg(long)]
        option: Option<i64>,
        /// Value for the advanced option
        #[arg(long)]
        value: Option<String>,
    },
    /// Print corpus and index sizes as JSON
    Stats,
}

const OPTIONS_MENU: &str = "\
Advanced search options:
1. Maximum article length
2. Group results by author
3. Only articles by an author
4. Exclude articles containing a keyword
5. Only articles from a year
6. None of the above
";

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Search { keyword: None, option: None, value: None });
    let start = Instant::now();
    let corpus = load_corpus(&cli.corpus)?;
    let indexes = SearchIndexes::build(&corpus);
    tracing::info!(elapsed_ms = start.elapsed().as_millis() as u64, "indexes ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    match command {
        Commands::Search { keyword, option, value } => {
            let mut prompter = Prompter::new(stdin.lock(), stdout.lock());
            run_search(&indexes, &mut prompter, keyword, option, value)
        }
        Commands::Stats => {
            let stats = serde_json::json!({
                "articles": corpus.len(),
                "titles": indexes.titles.len(),
                "keywords": indexes.keywords.len(),
            });
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(())
        }
    }
}

fn run_search<R: BufRead, W: Write>(
    indexes: &SearchIndexes,
    prompter: &mut Prompter<R, W>,
    keyword: Option<String>,
    option: Option<i64>,
    value: Option<String>,
) -> Result<()> {
    let keyword = match keyword {
        Some(k) => k,
        None => prompter.ask("Enter a keyword to search for: ")?,
    };
    let option = match option {
        Some(o) => o,
        None => {
            prompter.show(OPTIONS_MENU)?;
            let raw = prompter.ask("Choose an option (1-6): ")?;
            // Anything that is not a number means no filter.
            raw.trim().parse().unwrap_or(6)
        }
    };
    let value = match value {
        Some(v) => v,
        None => match value_prompt(option) {
            Some(question) => prompter.ask(question)?,
            None => String::new(),
        },
    };

    let advanced = AdvancedSearch::from_option(option, value);
    let result = indexes.query(&keyword, &advanced);
    tracing::debug!(%keyword, option, hits = result.total_hits(), "query finished");
    prompter.show(&format!("\n{}\n", render(&result)))?;
    Ok(())
}

fn value_prompt(option: i64) -> Option<&'static str> {
    if !AdvancedSearch::takes_value(option) {
        return None;
    }
    Some(match option {
        1 => "Maximum article length: ",
        3 => "Author name: ",
        4 => "Keyword to exclude: ",
        _ => "Year: ",
    })
}

struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    fn new(input: R, output: W) -> Self { Self { input, output } }

    fn show(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        self.show(question)?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed while waiting for an answer");
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_core::ArticleRecord;
    use std::io::Cursor;

    fn indexes() -> SearchIndexes {
        SearchIndexes::build(&[
            ArticleRecord::new("French pop music", "Mack Johnson", 1172208041, 5569, &["pop", "music"]),
            ArticleRecord::new("Rock music", "Mack Johnson", 1258069053, 119498, &["pop", "music"]),
            ArticleRecord::new("2009 in music", "RussBot", 1235133583, 69451, &["pop", "dance"]),
        ])
    }

    fn interactive(answers: &str) -> String {
        let mut out = Vec::new();
        let mut prompter = Prompter::new(Cursor::new(answers.as_bytes().to_vec()), &mut out);
        run_search(&indexes(), &mut prompter, None, None, None).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn prompts_for_keyword_option_and_value() {
        let out = interactive("pop\n3\nMack Johnson\n");
        assert!(out.starts_with("Enter a keyword to search for: "));
        assert!(out.contains(OPTIONS_MENU));
        assert!(out.contains("Author name: "));
        assert!(out.ends_with("\nHere are your articles: ['French pop music', 'Rock music']\n"));
    }

    #[test]
    fn option_without_value_skips_value_prompt() {
        let out = interactive("pop\n2\n");
        assert!(!out.contains("Year: "));
        assert!(out.ends_with(
            "\nHere are your articles: {'Mack Johnson': ['French pop music', 'Rock music'], 'RussBot': ['2009 in music']}\n"
        ));
    }

    #[test]
    fn unknown_keyword_reports_nothing_found() {
        let out = interactive("Pop\n6\n");
        assert!(out.ends_with("\nNo articles found\n"));
    }

    #[test]
    fn non_numeric_option_means_no_filter() {
        let out = interactive("dance\nnone\n");
        assert!(out.ends_with("\nHere are your articles: ['2009 in music']\n"));
    }

    #[test]
    fn value_prompts_follow_option_table() {
        for option in 0..=7 {
            assert_eq!(value_prompt(option).is_some(), AdvancedSearch::takes_value(option), "option {option}");
        }
        assert_eq!(value_prompt(5), Some("Year: "));
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut out = Vec::new();
        let mut prompter = Prompter::new(Cursor::new(Vec::new()), &mut out);
        assert!(run_search(&indexes(), &mut prompter, None, None, None).is_err());
    }

    #[test]
    fn flags_skip_prompts() {
        let mut out = Vec::new();
        let mut prompter = Prompter::new(Cursor::new(Vec::new()), &mut out);
        run_search(&indexes(), &mut prompter, Some("music".into()), Some(5), Some("2009".into())).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\nHere are your articles: ['Rock music']\n");
    }
}
