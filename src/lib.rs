//! # lowbits
//!
//! A tiny static blog generator. A directory of Markdown posts goes in; an
//! index page and one HTML page per post come out.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      _posts/*.md  →  Vec<Document>          (files → parsed posts)
//! 2. Generate  Vec<Document> →  index.html, posts/    (final HTML site)
//! ```
//!
//! Every run is a full rebuild: all posts are re-read, re-rendered and
//! rewritten. Output is deterministic, so running twice on unchanged input
//! produces byte-identical files.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — discovers post files and parses title, date marker and viewer marker |
//! | [`generate`] | Stage 2 — renders the index and post pages with Maud and writes them |
//! | [`markdown`] | Markdown → HTML with tables, footnotes, definition lists and class-based code highlighting |
//! | [`config`] | Optional `site.toml` loading, merging over stock defaults, validation |
//! | [`types`] | The [`types::Document`] passed between stages |
//! | [`naming`] | Identifier derivation from post paths |
//! | [`output`] | CLI summary formatting |
//! | [`logging`] | `env_logger` setup for progress diagnostics |
//!
//! # Post Metadata
//!
//! Posts carry no front matter. Metadata is read out of the text itself:
//!
//! - the first line is the title (`# Example Post` → `Example Post`);
//! - `<!-- date={2024-01-02} -->` anywhere sets the date;
//! - `<!-- life-viewer -->` anywhere pulls the viewer script into the page head.
//!
//! Both markers are HTML comments, so they stay invisible in the rendered page.
//!
//! # Trusted Input
//!
//! Titles and dates are inserted into the HTML unescaped, the same way the
//! rendered Markdown body is. Posts are written by the site author.

pub mod config;
pub mod generate;
pub mod logging;
pub mod markdown;
pub mod naming;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
