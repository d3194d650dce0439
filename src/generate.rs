//! HTML site generation.
//!
//! Stage 2 of the build. Takes the parsed documents and writes the final
//! static site.
//!
//! ## Generated Pages
//!
//! - **Index page** (`/index.html`): one list entry per post, in the order
//!   the documents were given (newest path first).
//! - **Post pages** (`/posts/{identifier}.html`): the rendered post body.
//!
//! ## Output Structure
//!
//! ```text
//! ./
//! ├── index.html
//! └── posts/
//!     ├── 2024-01-02-example.html
//!     └── 2023-11-20-first.html
//! ```
//!
//! Stylesheets, the favicon and the viewer script are linked but never
//! written; they are expected to already live under `/assets/`.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for the page shell. Post titles,
//! dates and the configured site title are trusted author input and are
//! inserted unescaped, like the rendered post bodies.

use crate::config::SiteConfig;
use crate::types::Document;
use log::info;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write `index.html` and one page per document under `output_dir`.
///
/// Existing files are overwritten; nothing else in `output_dir` is touched.
pub fn generate(
    documents: &[Document],
    output_dir: &Path,
    config: &SiteConfig,
) -> Result<(), GenerateError> {
    fs::create_dir_all(output_dir.join(&config.posts_dir))?;

    let index_html = render_index(documents, config);
    write(&output_dir.join("index.html"), &index_html.into_string())?;

    for document in documents {
        info!(
            "{} {}",
            document.identifier,
            document.date.as_deref().unwrap_or("(no date)")
        );
        let page_path = output_dir.join(document.page_path(&config.posts_dir));
        // Nested identifiers (`2023/intro`) need their own subdirectory.
        if let Some(parent) = page_path.parent() {
            fs::create_dir_all(parent)?;
        }
        write(&page_path, &render_page(document, config).into_string())?;
    }

    Ok(())
}

/// Create or overwrite `path` with UTF-8 `content`.
pub fn write(path: &Path, content: &str) -> Result<(), GenerateError> {
    fs::write(path, content)?;
    Ok(())
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the shell shared by every page: head, site header, footer.
fn base_document(
    title: &str,
    config: &SiteConfig,
    head_extra: Option<Markup>,
    content: Markup,
    footer: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(config.lang) {
            head {
                meta charset="utf-8";
                title { (PreEscaped(title)) }
                link rel="icon" href=(config.assets.favicon) sizes="16x16" type="image/vnd.microsoft.icon";
                @for stylesheet in &config.assets.stylesheets {
                    link href=(stylesheet) rel="stylesheet" type="text/css";
                }
                @if let Some(extra) = head_extra {
                    (extra)
                }
            }
            body {
                a name="top" {}
                header #header {
                    div.column {
                        a #site-title href="/" { (PreEscaped(&config.title)) }
                    }
                }
                div.column {
                    main {
                        (content)
                    }
                    footer {
                        (footer)
                    }
                }
            }
        }
    }
}

/// Head fragment for posts that embed the interactive viewer.
fn viewer_head(config: &SiteConfig) -> Markup {
    html! {
        meta name="LifeViewer" content=(config.viewer.meta_content);
        script src=(config.viewer.script) {}
    }
}

fn copyright_line(config: &SiteConfig) -> Markup {
    html! {
        "Copyright " (PreEscaped("&copy;")) " " (config.copyright)
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the index page listing every document in the given order.
pub fn render_index(documents: &[Document], config: &SiteConfig) -> Markup {
    let content = html! {
        list.post-list {
            @for document in documents {
                li {
                    span.post-meta {
                        @if let Some(date) = &document.date {
                            (PreEscaped(date))
                        }
                    }
                    h3 {
                        a href=(document.page_path(&config.posts_dir)) {
                            (PreEscaped(&document.title))
                        }
                    }
                }
            }
        }
    };

    base_document(&config.title, config, None, content, copyright_line(config))
}

/// Renders one post page.
///
/// The viewer head fragment is present only when the post carries the viewer
/// marker. A post without a date gets no "Posted on" line.
pub fn render_page(document: &Document, config: &SiteConfig) -> Markup {
    let head_extra = document.has_special_viewer.then(|| viewer_head(config));

    let footer = html! {
        @if let Some(date) = &document.date {
            "Posted on " (PreEscaped(date))
            br;
        }
        (copyright_line(config))
    };

    base_document(
        &document.title,
        config,
        head_extra,
        PreEscaped(document.body_html.clone()),
        footer,
    )
}

// ============================================================================
// Tests
// ============================================================================
