//! CLI output formatting for the build stages.
//!
//! Output is information-first: each post is shown by its position and
//! title, with the source file and metadata as indented context lines.
//!
//! ## Scan / Check
//!
//! ```text
//! Posts
//! 001 Example Post
//!     Source: 2024-01-02-example.md
//!     Date: 2024-01-02
//! 002 Viewer Demo
//!     Source: 2023-11-20-viewer.md
//!     Date: (none)
//!     Viewer: yes
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! 001 Example Post → posts/2024-01-02-example.html
//! 002 Viewer Demo → posts/2023-11-20-viewer.html
//!
//! Generated index and 2 post pages
//! ```
//!
//! Each `format_*` function is pure and returns lines; the `print_*` wrappers
//! write them to stdout.

use crate::config::SiteConfig;
use crate::types::Document;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, singular: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {singular}s")
    }
}

/// Format the discovered posts.
pub fn format_scan_output(documents: &[Document], config: &SiteConfig) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];
    if documents.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
        return lines;
    }

    for (i, document) in documents.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), document.title));
        lines.push(format!(
            "{}Source: {}.{}",
            indent(1),
            document.identifier,
            config.extension
        ));
        lines.push(format!(
            "{}Date: {}",
            indent(1),
            document.date.as_deref().unwrap_or("(none)")
        ));
        if document.has_special_viewer {
            lines.push(format!("{}Viewer: yes", indent(1)));
        }
    }
    lines
}

/// Format the pages written by a build.
pub fn format_generate_output(documents: &[Document], config: &SiteConfig) -> Vec<String> {
    let mut lines = vec!["Home → index.html".to_string()];
    for (i, document) in documents.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            document.title,
            document.page_path(&config.posts_dir)
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated index and {}",
        plural(documents.len(), "post page")
    ));
    lines
}

pub fn print_scan_output(documents: &[Document], config: &SiteConfig) {
    for line in format_scan_output(documents, config) {
        println!("{}", line);
    }
}

pub fn print_generate_output(documents: &[Document], config: &SiteConfig) {
    for line in format_generate_output(documents, config) {
        println!("{}", line);
    }
}
