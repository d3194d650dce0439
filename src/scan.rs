//! Post discovery and parsing.
//!
//! Stage 1 of the build. Finds every post file directly inside the source
//! directory and turns each one into a [`Document`].
//!
//! ## Source Layout
//!
//! ```text
//! _posts/
//! ├── 2024-03-10-allocators.md
//! ├── 2024-01-02-example.md
//! └── 2023-11-20-first.md
//! ```
//!
//! Subdirectories and hidden files (`.draft.md`) are ignored.
//!
//! ## Post Format
//!
//! ```markdown
//! # Example Post
//! <!-- date={2024-01-02} -->
//! <!-- life-viewer -->
//! Hello **world**.
//! ```
//!
//! - **Title**: the first line, leading `#` markers and whitespace stripped.
//! - **Date**: the first `<!-- date={...} -->` marker anywhere in the text.
//! - **Viewer**: the viewer marker anywhere in the text.
//!
//! The whole text, markers included, is then rendered as Markdown.
//!
//! ## Ordering
//!
//! Documents are returned in strictly descending order of their path. With
//! date-prefixed filenames this puts the newest post first.

use crate::config::SiteConfig;
use crate::markdown::{self, MarkdownError};
use crate::naming;
use crate::types::Document;
use log::{debug, info};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Source directory not found: {0}")]
    MissingSourceDir(PathBuf),
    #[error("Cannot derive an identifier from path: {0}")]
    InvalidPath(PathBuf),
    #[error("First line has no title text: {0}")]
    MissingTitle(PathBuf),
    #[error("Markdown error in {path}: {source}")]
    Markdown {
        path: PathBuf,
        #[source]
        source: MarkdownError,
    },
}

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#*\s*(.*?)\s*$").expect("title pattern"));

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!-- date=\{(.*)\} -->").expect("date pattern"));

/// Discover, read and parse every post under `source_dir`.
pub fn scan(source_dir: &Path, config: &SiteConfig) -> Result<Vec<Document>, ScanError> {
    let paths = discover(source_dir, &config.extension)?;
    let mut documents = Vec::with_capacity(paths.len());
    for path in &paths {
        info!("{}", path.display());
        let text = fs::read_to_string(path)?;
        documents.push(parse(path, source_dir, &text, config)?);
    }
    Ok(documents)
}

/// List post files directly inside `source_dir`, sorted descending by path.
///
/// A missing directory is an error; an empty one yields an empty list.
pub fn discover(source_dir: &Path, extension: &str) -> Result<Vec<PathBuf>, ScanError> {
    if !source_dir.is_dir() {
        return Err(ScanError::MissingSourceDir(source_dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        let matches = entry.path().extension().is_some_and(|e| e == extension);
        if matches && !hidden {
            paths.push(entry.into_path());
        }
    }

    paths.sort_by(|a, b| b.as_os_str().cmp(a.as_os_str()));
    Ok(paths)
}

/// Parse one post's text into a [`Document`].
pub fn parse(
    path: &Path,
    source_dir: &Path,
    text: &str,
    config: &SiteConfig,
) -> Result<Document, ScanError> {
    let identifier = naming::identifier_for(path, source_dir)
        .ok_or_else(|| ScanError::InvalidPath(path.to_path_buf()))?;
    let title = extract_title(text).ok_or_else(|| ScanError::MissingTitle(path.to_path_buf()))?;
    let date = extract_date(text);
    let has_special_viewer = text.contains(config.viewer.marker.as_str());

    debug!(
        "{identifier}: date={} viewer={has_special_viewer}",
        date.as_deref().unwrap_or("-")
    );

    let body_html =
        markdown::render(text, &config.highlight).map_err(|source| ScanError::Markdown {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(Document {
        identifier,
        title,
        date,
        body_html,
        has_special_viewer,
    })
}

/// Title from the first line: leading `#` run and surrounding whitespace
/// stripped. `None` when nothing is left.
pub fn extract_title(text: &str) -> Option<String> {
    let first_line = text.split('\n').next().unwrap_or_default();
    let title = TITLE_RE.captures(first_line)?.get(1)?.as_str();
    (!title.is_empty()).then(|| title.to_string())
}

/// Value of the first `<!-- date={...} -->` marker.
///
/// The value is matched greedily up to the last `} -->` on the same line.
pub fn extract_date(text: &str) -> Option<String> {
    DATE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
