//! End-to-end tests — runs the compiled binary inside a temp site root.
//!
//! Run with: `cargo test --test cli_build`

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn site_with_posts(posts: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("_posts")).unwrap();
    for (name, content) in posts {
        fs::write(tmp.path().join("_posts").join(name), content).unwrap();
    }
    tmp
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lowbits"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run lowbits")
}

fn read(dir: &Path, rel: &str) -> String {
    fs::read_to_string(dir.join(rel)).unwrap_or_else(|e| panic!("reading {rel}: {e}"))
}

const EXAMPLE: &str = "# Example Post\n<!-- date={2024-01-02} -->\nHello **world**.";
const VIEWER: &str = "## Glider Gun\n<!-- date={2023-08-15} -->\n<!-- life-viewer -->\n\n<textarea>x = 3</textarea>\n";

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn no_arguments_builds_site() {
    let site = site_with_posts(&[("2024-01-02-example.md", EXAMPLE)]);
    let out = run_in(site.path(), &[]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let page = read(site.path(), "posts/2024-01-02-example.html");
    assert!(page.contains("<title>Example Post</title>"));
    assert!(page.contains("<strong>world</strong>"));
    assert!(page.contains("Posted on 2024-01-02"));
    assert!(!page.contains("lv-plugin.js"));

    let index = read(site.path(), "index.html");
    assert!(index.contains(r#"<a href="posts/2024-01-02-example.html">Example Post</a>"#));
}

#[test]
fn index_lists_newest_path_first() {
    let site = site_with_posts(&[
        ("2023-08-15-glider.md", VIEWER),
        ("2024-01-02-example.md", EXAMPLE),
    ]);
    assert!(run_in(site.path(), &["build"]).status.success());

    let index = read(site.path(), "index.html");
    assert_eq!(index.matches("<li>").count(), 2);
    assert!(index.find("Example Post").unwrap() < index.find("Glider Gun").unwrap());

    let glider = read(site.path(), "posts/2023-08-15-glider.html");
    let head_end = glider.find("</head>").unwrap();
    let script = glider.find("/assets/js/lv-plugin.js").unwrap();
    assert!(script < head_end);
    assert!(glider.contains("<title>Glider Gun</title>"));
}

#[test]
fn rebuild_is_byte_identical() {
    let site = site_with_posts(&[
        ("2023-08-15-glider.md", VIEWER),
        ("2024-01-02-example.md", EXAMPLE),
    ]);
    let files = [
        "index.html",
        "posts/2023-08-15-glider.html",
        "posts/2024-01-02-example.html",
    ];

    assert!(run_in(site.path(), &[]).status.success());
    let first: Vec<Vec<u8>> = files.iter().map(|f| fs::read(site.path().join(f)).unwrap()).collect();
    assert!(run_in(site.path(), &[]).status.success());
    let second: Vec<Vec<u8>> = files.iter().map(|f| fs::read(site.path().join(f)).unwrap()).collect();

    assert_eq!(first, second);
}

#[test]
fn missing_source_dir_fails_without_output() {
    let site = TempDir::new().unwrap();
    let out = run_in(site.path(), &[]);

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("MissingSourceDir"));
    assert!(!site.path().join("index.html").exists());
}

#[test]
fn bad_title_fails_with_nonzero_status() {
    let site = site_with_posts(&[("2024-01-02-empty.md", "###\nno title")]);
    let out = run_in(site.path(), &[]);

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("MissingTitle"));
}

#[test]
fn check_writes_nothing() {
    let site = site_with_posts(&[("2024-01-02-example.md", EXAMPLE)]);
    let out = run_in(site.path(), &["check"]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("001 Example Post"));
    assert!(stdout.contains("Date: 2024-01-02"));
    assert!(!site.path().join("index.html").exists());
    assert!(!site.path().join("posts").exists());
}

#[test]
fn scan_prints_json_without_bodies() {
    let site = site_with_posts(&[("2024-01-02-example.md", EXAMPLE)]);
    let out = run_in(site.path(), &["scan"]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(r#""identifier": "2024-01-02-example""#));
    assert!(stdout.contains(r#""date": "2024-01-02""#));
    assert!(!stdout.contains("body_html"));
}

#[test]
fn site_toml_overrides_defaults() {
    let site = site_with_posts(&[]);
    fs::create_dir_all(site.path().join("articles")).unwrap();
    fs::write(site.path().join("articles/first.md"), "# First\n").unwrap();
    fs::write(
        site.path().join("site.toml"),
        "title = \"Notes\"\nsource_dir = \"articles\"\nposts_dir = \"p\"\n",
    )
    .unwrap();

    assert!(run_in(site.path(), &[]).status.success());
    let index = read(site.path(), "index.html");
    assert!(index.contains("<title>Notes</title>"));
    assert!(index.contains(r#"href="p/first.html""#));
    assert!(site.path().join("p/first.html").is_file());
}

#[test]
fn gen_config_prints_stock_toml() {
    let site = TempDir::new().unwrap();
    let out = run_in(site.path(), &["gen-config"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("title = \"Low-Level Bits\""));
    assert!(stdout.contains("[viewer]"));
}

#[test]
fn gen_highlight_css_styles_rendered_code() {
    let site = site_with_posts(&[(
        "2024-01-02-code.md",
        "# Code\n\n```rust\nfn main() {}\n```\n",
    )]);
    assert!(run_in(site.path(), &[]).status.success());
    let page = read(site.path(), "posts/2024-01-02-code.html");
    assert!(page.contains(r#"<span class="storage type function rust">fn</span>"#));

    let out = run_in(site.path(), &["gen-highlight-css"]);
    assert!(out.status.success());
    let css = String::from_utf8_lossy(&out.stdout);
    assert!(css.contains("generated by syntect"));
    assert!(css.contains(".codehilite {"));
    assert!(css.contains(".codehilite .storage"));
}

#[test]
fn gen_highlight_css_rejects_unknown_theme() {
    let site = TempDir::new().unwrap();
    fs::write(site.path().join("site.toml"), "[highlight]\ntheme = \"Nope\"\n").unwrap();

    let out = run_in(site.path(), &["gen-highlight-css"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("UnknownTheme"));
}

#[test]
fn quiet_overrides_rust_log() {
    let site = site_with_posts(&[("2024-01-02-example.md", EXAMPLE)]);
    let out = Command::new(env!("CARGO_BIN_EXE_lowbits"))
        .arg("--quiet")
        .current_dir(site.path())
        .env("RUST_LOG", "info")
        .output()
        .expect("failed to run lowbits");

    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!stderr.contains("2024-01-02-example"), "stderr: {stderr}");
}
