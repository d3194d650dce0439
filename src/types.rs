//! Shared types passed from the scan stage to the generate stage.

use serde::Serialize;

/// One parsed post.
///
/// Built once per source file during the scan pass and never mutated after.
/// Serializes (without the rendered body) for the `scan` command.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Source path relative to the source directory, extension stripped,
    /// `/`-separated. Also the output file stem: `posts/{identifier}.html`.
    pub identifier: String,
    /// First line of the source with leading `#` markers and whitespace removed.
    pub title: String,
    /// Value of the first `<!-- date={...} -->` marker, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Rendered HTML of the whole source text.
    #[serde(skip)]
    pub body_html: String,
    /// Whether the interactive viewer marker appears in the source.
    pub has_special_viewer: bool,
}

impl Document {
    /// Output path of this document's page, relative to the output root.
    pub fn page_path(&self, posts_dir: &str) -> String {
        format!("{}/{}.html", posts_dir, self.identifier)
    }
}
