//! Identifier derivation for post files.
//!
//! A post's identifier is its path relative to the source directory, with the
//! extension dropped and separators normalized to `/`:
//!
//! - `_posts/2024-01-02-example.md` → `2024-01-02-example`
//! - `_posts\2024-01-02-example.md` → `2024-01-02-example` (Windows separators)
//!
//! The identifier doubles as the output file stem and is never checked for
//! uniqueness.

use std::path::{Component, Path};

/// Derive the identifier of `path` relative to `source_dir`.
///
/// Returns `None` when `path` is not below `source_dir` or has a component
/// that is not valid UTF-8.
pub fn identifier_for(path: &Path, source_dir: &Path) -> Option<String> {
    let relative = path.strip_prefix(source_dir).ok()?;
    let without_ext = relative.with_extension("");

    let mut parts = Vec::new();
    for component in without_ext.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if parts.is_empty() {
        return None;
    }
    Some(normalize_separators(&parts.join("/")))
}

/// Replace backslashes with forward slashes.
///
/// Path components on Unix may legitimately contain `\`; they are normalized
/// too so the same source tree yields the same identifiers everywhere.
pub fn normalize_separators(raw: &str) -> String {
    raw.replace('\\', "/")
}
