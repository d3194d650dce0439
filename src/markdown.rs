//! Markdown to HTML conversion.
//!
//! Posts are rendered with pulldown-cmark using the "extra" family of
//! extensions (tables, footnotes, definition lists, strikethrough, heading
//! attributes) plus fenced code blocks. Code blocks are replaced with
//! syntect's class-based output:
//!
//! ```html
//! <div class="codehilite"><pre><code class="language-rust"><span class="source rust">...</span></code></pre></div>
//! ```
//!
//! Only CSS classes are emitted, never inline styles: colors come from
//! `/assets/highlight.css`. [`highlight_css`] produces a matching stylesheet
//! from one of syntect's bundled themes, with every rule scoped under
//! `.codehilite` (`lowbits gen-highlight-css`). Raw HTML in the source
//! (including the `<!-- date={...} -->` and viewer markers) passes through
//! unchanged.

use crate::config::HighlightConfig;
use maud::html;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html as md_html};
use std::sync::OnceLock;
use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarkdownError {
    #[error("highlighting failed: {0}")]
    Highlight(#[from] syntect::Error),
    #[error("unknown highlight theme '{name}' (available: {available})")]
    UnknownTheme { name: String, available: String },
}

/// Class of the element wrapping every code block.
const WRAPPER_CLASS: &str = "codehilite";

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_DEFINITION_LIST
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// A code block being collected from parser events.
struct CodeBlock {
    language: Option<String>,
    source: String,
}

impl CodeBlock {
    fn new(kind: &CodeBlockKind) -> Self {
        let language = match kind {
            CodeBlockKind::Fenced(info) => fence_language(info),
            CodeBlockKind::Indented => None,
        };
        Self {
            language,
            source: String::new(),
        }
    }

    fn to_html(&self, highlight: &HighlightConfig) -> Result<String, MarkdownError> {
        let code = if highlight.enabled {
            highlight_classed(&self.source, self.language.as_deref())?
        } else {
            html! { (self.source) }.into_string()
        };
        let class = self.language.as_ref().map(|lang| format!("language-{lang}"));

        let opening = match class {
            Some(class) => {
                format!("<div class=\"{WRAPPER_CLASS}\"><pre><code class=\"{class}\">")
            }
            None => format!("<div class=\"{WRAPPER_CLASS}\"><pre><code>"),
        };
        Ok(format!("{opening}{code}</code></pre></div>\n"))
    }
}

/// Extract the language token from a fence info string.
///
/// Accepts `rust`, `rust ignore`, `{.rust}` and `.rust`. Characters outside
/// `[A-Za-z0-9_+#-]` end the token so the result is safe inside an attribute.
fn fence_language(info: &str) -> Option<String> {
    let first = info.split_whitespace().next()?;
    let token: String = first
        .trim_start_matches(['{', '.'])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '#' | '-'))
        .collect();
    (!token.is_empty()).then_some(token)
}

/// Highlight `code` into class-annotated spans. Unknown languages fall back
/// to plain text, which is still HTML-escaped.
fn highlight_classed(code: &str, language: Option<&str>) -> Result<String, MarkdownError> {
    let ss = syntax_set();
    let syntax = language
        .and_then(|lang| {
            ss.find_syntax_by_token(lang)
                .or_else(|| ss.find_syntax_by_name(lang))
        })
        .unwrap_or_else(|| ss.find_syntax_plain_text());

    let mut generator = ClassedHTMLGenerator::new_with_class_style(syntax, ss, ClassStyle::Spaced);
    for line in LinesWithEndings::from(code) {
        generator.parse_html_for_line_which_includes_newline(line)?;
    }
    Ok(generator.finalize())
}

/// Stylesheet for the classes [`render`] emits, built from the configured
/// syntect theme.
///
/// syntect targets a bare `.code` root; here the root rule is rewritten to the
/// `.codehilite` wrapper and every scope selector is nested under it, so the
/// theme cannot leak into the rest of the page.
pub fn highlight_css(highlight: &HighlightConfig) -> Result<String, MarkdownError> {
    let themes = theme_set();
    let theme = themes
        .themes
        .get(&highlight.theme)
        .ok_or_else(|| MarkdownError::UnknownTheme {
            name: highlight.theme.clone(),
            available: themes.themes.keys().cloned().collect::<Vec<_>>().join(", "),
        })?;
    let css = css_for_theme_with_class_style(theme, ClassStyle::Spaced)?;
    Ok(scope_css(&css))
}

/// Rewrite rule headers (lines ending in `{`) of syntect's stylesheet so they
/// only apply inside the code block wrapper. Declarations and comments pass
/// through untouched.
fn scope_css(css: &str) -> String {
    let mut scoped = String::with_capacity(css.len() + css.len() / 2);
    for line in css.lines() {
        match line.strip_suffix('{') {
            Some(selectors) => {
                let rewritten: Vec<String> = selectors
                    .split(',')
                    .map(str::trim)
                    .filter(|selector| !selector.is_empty())
                    .map(|selector| match selector {
                        ".code" => format!(".{WRAPPER_CLASS}"),
                        _ => format!(".{WRAPPER_CLASS} {selector}"),
                    })
                    .collect();
                scoped.push_str(&rewritten.join(", "));
                scoped.push_str(" {");
            }
            None => scoped.push_str(line),
        }
        scoped.push('\n');
    }
    scoped
}

/// Render a whole Markdown document to HTML.
pub fn render(text: &str, highlight: &HighlightConfig) -> Result<String, MarkdownError> {
    let mut events = Vec::new();
    let mut code_block: Option<CodeBlock> = None;

    for event in Parser::new_ext(text, options()) {
        match event {
            Event::Start(Tag::CodeBlock(ref kind)) => {
                code_block = Some(CodeBlock::new(kind));
            }
            Event::Text(ref fragment) if code_block.is_some() => {
                if let Some(block) = code_block.as_mut() {
                    block.source.push_str(fragment);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(block) = code_block.take() {
                    events.push(Event::Html(block.to_html(highlight)?.into()));
                }
            }
            other => events.push(other),
        }
    }

    let mut html_output = String::with_capacity(text.len() * 3 / 2);
    md_html::push_html(&mut html_output, events.into_iter());
    Ok(html_output)
}
