//! Loading the article corpus from JSON files.

use crate::article::ArticleRecord;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Load every record under `path`.
///
/// A `.jsonl` file holds one record per line. Any other file is parsed as
/// JSON: an array of records or a single record. A directory is walked for
/// `.json` and `.jsonl` files, read in sorted path order.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<ArticleRecord>> {
    let path = path.as_ref();
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else {
        files.push(path.to_path_buf());
    }

    let mut corpus = Vec::new();
    for file in &files {
        if extension(file) == Some("jsonl") {
            load_jsonl(file, &mut corpus)?;
        } else {
            load_json(file, &mut corpus)?;
        }
    }
    tracing::info!(files = files.len(), articles = corpus.len(), "loaded corpus");
    Ok(corpus)
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}

fn load_jsonl(file: &Path, corpus: &mut Vec<ArticleRecord>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let record: ArticleRecord = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid article record", file.display(), lineno + 1))?;
        corpus.push(record);
    }
    Ok(())
}

fn load_json(file: &Path, corpus: &mut Vec<ArticleRecord>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let json: serde_json::Value = serde_json::from_reader(reader).with_context(|| format!("parsing {}", file.display()))?;
    // A bare record in positional form is also an array, so try it first.
    if let Ok(record) = serde_json::from_value::<ArticleRecord>(json.clone()) {
        corpus.push(record);
        return Ok(());
    }
    let records: Vec<ArticleRecord> =
        serde_json::from_value(json).with_context(|| format!("{}: expected an article record or a list of them", file.display()))?;
    corpus.extend(records);
    Ok(())
}
