//! Shared test utilities for the lowbits test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_posts(&[("2024-01-02-example.md", "# Example Post\nHello")]);
//! let docs = scan(&tmp.path().join("_posts"), &SiteConfig::default()).unwrap();
//!
//! let doc = find_document(&docs, "2024-01-02-example");
//! assert_eq!(doc.title, "Example Post");
//! ```

use std::fs;
use tempfile::TempDir;

use crate::types::Document;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp directory holding `_posts/` with the given files.
///
/// The temp directory doubles as the output root in generate tests.
pub fn setup_posts(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let posts = tmp.path().join("_posts");
    fs::create_dir_all(&posts).unwrap();
    for (name, content) in files {
        fs::write(posts.join(name), content).unwrap();
    }
    tmp
}

/// A parsed document built by hand, for render tests that skip parsing.
pub fn document(identifier: &str, title: &str, date: Option<&str>) -> Document {
    Document {
        identifier: identifier.to_string(),
        title: title.to_string(),
        date: date.map(str::to_string),
        body_html: format!("<h1>{title}</h1>\n<p>Body of {identifier}.</p>\n"),
        has_special_viewer: false,
    }
}

// =========================================================================
// Lookups and extractors
// =========================================================================

/// Find a document by identifier. Panics if not found.
pub fn find_document<'a>(documents: &'a [Document], identifier: &str) -> &'a Document {
    documents
        .iter()
        .find(|d| d.identifier == identifier)
        .unwrap_or_else(|| {
            let ids = identifiers(documents);
            panic!("document '{identifier}' not found. Available: {ids:?}")
        })
}

/// All identifiers in list order.
pub fn identifiers(documents: &[Document]) -> Vec<&str> {
    documents.iter().map(|d| d.identifier.as_str()).collect()
}

/// Extract the `<head>...</head>` section of a rendered page. Panics if absent.
pub fn head_section(html: &str) -> &str {
    let start = html.find("<head>").expect("page has no <head>");
    let end = html.find("</head>").expect("page has no </head>");
    &html[start..end + "</head>".len()]
}
