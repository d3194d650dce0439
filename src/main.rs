use clap::{Parser, Subcommand};
use lowbits::{config, generate, logging, markdown, output, scan};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let hash = env!("LOWBITS_GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup
        Box::leak(format!("{} ({hash})", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "lowbits")]
#[command(about = "Static blog generator: _posts/*.md → index.html + posts/*.html")]
#[command(long_about = "\
Static blog generator: _posts/*.md → index.html + posts/*.html

Run without arguments in the site root to rebuild everything.

Source layout:

  _posts/
  ├── 2024-01-02-example.md        # → posts/2024-01-02-example.html
  └── 2023-11-20-first.md          # listed after the one above

Post format:

  # Example Post                   # first line = title (leading #s stripped)
  <!-- date={2024-01-02} -->       # optional, anywhere in the text
  <!-- life-viewer -->             # optional, adds the viewer script
  Hello **world**.

Posts are listed newest path first. Stylesheets, favicon and scripts under
/assets/ are linked but never generated.

Run 'lowbits gen-config' to print a documented site.toml, and
'lowbits gen-highlight-css > assets/highlight.css' to regenerate the code
highlighting stylesheet.")]
#[command(version = version_string())]
struct Cli {
    /// Post source directory [default: source_dir from site.toml, else _posts]
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output root (index.html and the posts directory land here)
    #[arg(long, default_value = ".", global = true)]
    output: PathBuf,

    /// Site config file (optional; stock defaults when missing)
    #[arg(long, default_value = config::CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Only log warnings and errors (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Rebuild the whole site (the default)
    Build,
    /// Parse every post without writing anything
    Check,
    /// Print the parsed posts as JSON (bodies omitted)
    Scan,
    /// Print a stock site.toml with all options documented
    GenConfig,
    /// Print the code highlighting stylesheet for the configured theme
    GenHighlightCss,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.quiet);

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let (site_config, source) = resolve_site(cli.source, &cli.config)?;
            println!("==> Scanning {}", source.display());
            let documents = scan::scan(&source, &site_config)?;

            println!("==> Generating HTML → {}", cli.output.display());
            generate::generate(&documents, &cli.output, &site_config)?;
            output::print_generate_output(&documents, &site_config);
        }
        Command::Check => {
            let (site_config, source) = resolve_site(cli.source, &cli.config)?;
            println!("==> Checking {}", source.display());
            let documents = scan::scan(&source, &site_config)?;
            output::print_scan_output(&documents, &site_config);
            println!("==> Posts are valid");
        }
        Command::Scan => {
            let (site_config, source) = resolve_site(cli.source, &cli.config)?;
            let documents = scan::scan(&source, &site_config)?;
            println!("{}", serde_json::to_string_pretty(&documents)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::GenHighlightCss => {
            let site_config = config::load_config(&cli.config)?;
            print!("{}", markdown::highlight_css(&site_config.highlight)?);
        }
    }

    Ok(())
}

/// Load the site config and pick the source directory: `--source` wins over
/// `source_dir` from the config.
fn resolve_site(
    cli_source: Option<PathBuf>,
    config_path: &Path,
) -> Result<(config::SiteConfig, PathBuf), config::ConfigError> {
    let site_config = config::load_config(config_path)?;
    let source = cli_source.unwrap_or_else(|| PathBuf::from(&site_config.source_dir));
    Ok((site_config, source))
}
