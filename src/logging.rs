//! Diagnostic logging.
//!
//! Progress goes through the `log` facade; `env_logger` prints it to stderr.
//! The default level is `info`, override with `RUST_LOG`. `--quiet` wins over
//! `RUST_LOG` and limits output to warnings and errors. User-facing build
//! summaries are printed separately by [`crate::output`].

use colored::Colorize;
use env_logger::Builder;
use std::io::Write;

const DEFAULT_FILTER: &str = "info";
const QUIET_FILTER: &str = "warn";

/// Install the global logger. Call once, at startup.
pub fn init_logging(quiet: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    Builder::new()
        .parse_filters(filter_spec(quiet, rust_log.as_deref()))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {} {}",
                chrono::Local::now().format("%H:%M:%S").to_string().dimmed(),
                short_target(record.target()).bold().bright_yellow(),
                record.args()
            )
        })
        .init();
}

/// Filter directives for the logger: quiet, then `RUST_LOG`, then `info`.
fn filter_spec(quiet: bool, rust_log: Option<&str>) -> &str {
    if quiet {
        return QUIET_FILTER;
    }
    match rust_log {
        Some(spec) if !spec.trim().is_empty() => spec,
        _ => DEFAULT_FILTER,
    }
}

/// `lowbits::scan` → `scan`.
fn short_target(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}
