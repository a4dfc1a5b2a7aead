//! claimcheck - evidence-backed claim verification CLI
//!
//! ## Commands
//!
//! - `check`: fact-check text and print the report as JSON
//! - `config`: print the effective configuration as TOML
//! - `source`: show how a URL is classified for credibility
//! - `claims`: show extracted claims and their search queries (offline)

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, Level};

use claimcheck_backends::HttpBackendConfig;
use claimcheck_core::metrics::METRICS;
use claimcheck_core::{
    biography_queries, extract_claims, generate_queries, is_biographical, CheckerConfig,
    FactChecker,
};

#[derive(Parser, Debug)]
#[command(name = "claimcheck")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Evidence-backed claim verification", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fact-check text and print the report as JSON
    Check {
        /// Text to check (read from stdin when neither TEXT nor --file is given)
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Checker configuration (TOML)
        #[arg(short, long, env = "CLAIMCHECK_CONFIG")]
        config: Option<PathBuf>,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Checker configuration (TOML)
        #[arg(short, long, env = "CLAIMCHECK_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Show how a URL is classified for credibility
    Source {
        url: String,

        /// Checker configuration (TOML)
        #[arg(short, long, env = "CLAIMCHECK_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Show extracted claims and their search queries without checking them
    Claims {
        /// Text to split (read from stdin when omitted)
        text: Option<String>,

        /// Checker configuration (TOML)
        #[arg(short, long, env = "CLAIMCHECK_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    claimcheck_core::telemetry::init_tracing(cli.json, level);

    match cli.command {
        Commands::Check {
            text,
            file,
            config,
            pretty,
        } => cmd_check(text, file.as_deref(), config.as_deref(), pretty).await,
        Commands::Config { config } => cmd_config(config.as_deref()),
        Commands::Source { url, config } => cmd_source(&url, config.as_deref()),
        Commands::Claims { text, config } => cmd_claims(text, config.as_deref()),
    }
}

/// Load the configuration file, or defaults when none is given.
fn load_config(path: Option<&Path>) -> Result<CheckerConfig> {
    match path {
        Some(path) => CheckerConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(CheckerConfig::default()),
    }
}

/// Resolve input text: argument first, then file, then stdin.
fn read_input(text: Option<String>, file: Option<&Path>, stdin: impl Read) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    let mut buf = String::new();
    let mut stdin = stdin;
    stdin
        .read_to_string(&mut buf)
        .context("Failed to read text from stdin")?;
    Ok(buf)
}

async fn cmd_check(
    text: Option<String>,
    file: Option<&Path>,
    config: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let config = load_config(config)?;
    let text = read_input(text, file, std::io::stdin())?;

    let backends = HttpBackendConfig::from_env()
        .into_backends()
        .context("Failed to configure backends")?;
    let checker = FactChecker::new(backends, Arc::new(config));

    let report = checker.check(&text).await;
    info!(
        claims = report.response.claims.len(),
        duration_ms = report.duration_ms,
        "Fact-check complete"
    );

    let rendered = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", rendered);
    METRICS.flush();
    Ok(())
}

fn cmd_config(config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

fn render_source(url: &str, config: &CheckerConfig) -> String {
    let class = config.sources.classify(url);
    format!(
        "{}\n  trusted:       {}\n  authoritative: {}\n  base weight:   {:.1}",
        url,
        yes_no(class.trusted),
        yes_no(class.authoritative),
        config.sources.base_weight(url),
    )
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn cmd_source(url: &str, config: Option<&Path>) -> Result<()> {
    if url.trim().is_empty() {
        bail!("URL must not be empty");
    }
    let config = load_config(config)?;
    println!("{}", render_source(url, &config));
    Ok(())
}

fn render_claims(text: &str, config: &CheckerConfig) -> String {
    let claims = extract_claims(text, config.limits.min_claim_chars);
    if claims.is_empty() {
        return "No claims found.".to_string();
    }

    let mut out = String::new();
    for (i, claim) in claims.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, claim));
        if is_biographical(claim, &config.biography.keywords) {
            out.push_str("   biography queries:\n");
            for query in biography_queries(claim) {
                out.push_str(&format!("     - {}\n", query));
            }
        }
        out.push_str("   queries:\n");
        for query in generate_queries(claim) {
            out.push_str(&format!("     - {}\n", query));
        }
    }
    out
}

fn cmd_claims(text: Option<String>, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let text = read_input(text, None, std::io::stdin())?;
    print!("{}", render_claims(&text, &config));
    Ok(())
}
