//! Flat-file high-score table
//!
//! One record per line, `USERNAME,SCORE`. The file is only ever appended to;
//! sorting happens when the table is viewed.

use anyhow::{Context, Result};
use log::warn;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// How many entries the high-score screen shows
pub const TOP_SCORES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub username: String,
    pub score: u32,
}

impl ScoreEntry {
    pub fn new(username: impl Into<String>, score: u32) -> Self {
        Self {
            username: username.into(),
            score,
        }
    }

    /// Parse one `USERNAME,SCORE` line
    pub fn parse(line: &str) -> Option<Self> {
        let (username, score) = line.split_once(',')?;
        let score = score.trim().parse().ok()?;
        Some(Self::new(username.trim(), score))
    }

    pub fn to_line(&self) -> String {
        format!("{},{}", self.username, self.score)
    }
}

pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, creating the file on first save
    pub fn append(&self, entry: &ScoreEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {} for appending", self.path.display()))?;

        writeln!(file, "{}", entry.to_line())
            .with_context(|| format!("Failed to write score to {}", self.path.display()))
    }

    /// Every entry in file order. A missing file is an empty table.
    pub fn load(&self) -> Result<Vec<ScoreEntry>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to open {}", self.path.display()));
            }
        };

        let mut entries = Vec::new();
        for (number, line) in BufReader::new(file).lines().enumerate() {
            let line =
                line.with_context(|| format!("Failed to read {}", self.path.display()))?;
            if line.trim().is_empty() {
                continue;
            }

            match ScoreEntry::parse(&line) {
                Some(entry) => entries.push(entry),
                None => warn!(
                    "skipping malformed line {} in {}: {:?}",
                    number + 1,
                    self.path.display(),
                    line
                ),
            }
        }

        Ok(entries)
    }

    /// Highest scores first, at most `n`. Ties keep file order.
    pub fn top(&self, n: usize) -> Result<Vec<ScoreEntry>> {
        let mut entries = self.load()?;
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(n);
        Ok(entries)
    }

    pub fn best(&self) -> Result<Option<u32>> {
        Ok(self.load()?.iter().map(|e| e.score).max())
    }
}
