//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. Every key is
//! optional: a missing file yields the stock defaults, and the stock defaults
//! reproduce the "Low-Level Bits" site exactly, so a bare `lowbits` run needs
//! no configuration at all.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Low-Level Bits"      # Site title (index <title> and header link)
//! copyright = "Jesper Öqvist"   # Footer copyright holder
//! lang = "en"                   # <html lang="..">
//! source_dir = "_posts"         # Directory holding the Markdown posts
//! extension = "md"              # Post file extension (no leading dot)
//! posts_dir = "posts"           # Output subdirectory for post pages
//!
//! [assets]
//! favicon = "/favicon.ico"
//! stylesheets = ["/assets/style.css", "/assets/highlight.css"]
//!
//! [viewer]
//! marker = "<!-- life-viewer -->"
//! script = "/assets/js/lv-plugin.js"
//! meta_content = "viewer textarea"
//!
//! [highlight]
//! enabled = true                # Syntax-highlight fenced code blocks
//! theme = "base16-ocean.dark"   # syntect theme for `gen-highlight-css`
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse; override just the values you want:
//!
//! ```toml
//! title = "My Notes"
//!
//! [viewer]
//! script = "/js/viewer.js"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default name of the config file, looked up in the working directory.
pub const CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
///
/// All fields have defaults matching the stock site. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title shown in the index `<title>` and the header link. Inserted
    /// as raw HTML in both places.
    pub title: String,
    /// Copyright holder printed in every footer.
    pub copyright: String,
    /// Value of the `lang` attribute on `<html>`.
    pub lang: String,
    /// Directory (relative to the working directory) holding the posts.
    pub source_dir: String,
    /// Extension of post files, without the leading dot.
    pub extension: String,
    /// Output subdirectory for rendered post pages.
    pub posts_dir: String,
    /// External static assets referenced from every page head.
    pub assets: AssetsConfig,
    /// Interactive viewer marker and the head fragment it triggers.
    pub viewer: ViewerConfig,
    /// Code highlighting settings.
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Low-Level Bits".to_string(),
            copyright: "Jesper Öqvist".to_string(),
            lang: "en".to_string(),
            source_dir: "_posts".to_string(),
            extension: "md".to_string(),
            posts_dir: "posts".to_string(),
            assets: AssetsConfig::default(),
            viewer: ViewerConfig::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate that path-like values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("title", &self.title),
            ("source_dir", &self.source_dir),
            ("extension", &self.extension),
            ("posts_dir", &self.posts_dir),
            ("viewer.marker", &self.viewer.marker),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "extension must not start with a dot".into(),
            ));
        }
        // Joined into page links as `{posts_dir}/{identifier}.html`.
        if self.posts_dir.ends_with(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "posts_dir must not end with a path separator (got '{}')",
                self.posts_dir
            )));
        }
        if self.highlight.theme.trim().is_empty() {
            return Err(ConfigError::Validation(
                "highlight.theme must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Static assets the generated pages link to but never produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    pub favicon: String,
    /// Stylesheets linked in order. The highlight stylesheet belongs here too.
    pub stylesheets: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            favicon: "/favicon.ico".to_string(),
            stylesheets: vec![
                "/assets/style.css".to_string(),
                "/assets/highlight.css".to_string(),
            ],
        }
    }
}

/// Posts containing `marker` get a `<meta>` tag and a script reference in
/// their head.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub marker: String,
    pub script: String,
    pub meta_content: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            marker: "<!-- life-viewer -->".to_string(),
            script: "/assets/js/lv-plugin.js".to_string(),
            meta_content: "viewer textarea".to_string(),
        }
    }
}

/// Code highlighting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighlightConfig {
    /// When false, code blocks are emitted escaped but without scope spans.
    pub enabled: bool,
    /// Bundled syntect theme the highlight stylesheet is generated from.
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value, `Ok(None)` if it does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load the config file at `path`, merged over stock defaults and validated.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(path)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `site.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# lowbits configuration
# =====================
# Every key is optional. Values below are the defaults.

# Site title, used as the index page <title> and the header link text.
# Inserted as raw HTML: write `&amp;` for a literal ampersand.
title = "Low-Level Bits"

# Copyright holder shown in every footer.
copyright = "Jesper Öqvist"

# Language attribute on <html>.
lang = "en"

# Directory holding the Markdown posts, relative to the working directory.
# Only files directly inside it are picked up.
source_dir = "_posts"

# Extension of post files, without the leading dot.
extension = "md"

# Output subdirectory for rendered post pages.
posts_dir = "posts"

# ---------------------------------------------------------------------------
# External assets. lowbits links to these but never writes them.
# ---------------------------------------------------------------------------
[assets]
favicon = "/favicon.ico"
stylesheets = ["/assets/style.css", "/assets/highlight.css"]

# ---------------------------------------------------------------------------
# Interactive viewer. A post containing `marker` anywhere gets a
# <meta name="LifeViewer"> tag and a <script> reference in its <head>.
# ---------------------------------------------------------------------------
[viewer]
marker = "<!-- life-viewer -->"
script = "/assets/js/lv-plugin.js"
meta_content = "viewer textarea"

# ---------------------------------------------------------------------------
# Code highlighting. Code blocks are emitted with CSS classes only; style
# them from /assets/highlight.css. Set `enabled` to false to emit plain code.
# `lowbits gen-highlight-css > assets/highlight.css` regenerates the
# stylesheet from `theme`, one of syntect's bundled themes
# (base16-ocean.dark, base16-eighties.dark, base16-mocha.dark,
# base16-ocean.light, InspiredGitHub, Solarized (dark), Solarized (light)).
# ---------------------------------------------------------------------------
[highlight]
enabled = true
theme = "base16-ocean.dark"
"##
}
