//! # scopecheck
//!
//! Checks requested scopes against a granted scope list.
//!
//! ```text
//! scopecheck "user+w user/emails" user/emails+rw user/repo+w
//! allow user/emails+rw
//! allow user/repo+w
//! ```
//!
//! Exits with status 1 if any candidate is denied. `RUST_LOG` controls
//! logging (default: warn).

use anyhow::{Context, Result};
use clap::Parser;
use scopelist::{ScopeConfig, ScopeResolver, ScopeSet};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

/// Scope containment checker
#[derive(Parser)]
#[command(name = "scopecheck")]
#[command(about = "Check requested scopes against a granted scope list")]
#[command(version)]
struct Cli {
    /// Path to a JSON scope configuration file
    #[arg(short, long, env = "SCOPECHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Print the granted items that satisfied each candidate
    #[arg(short, long)]
    explain: bool,

    /// Granted scopes, separated by the configured item separator
    granted: String,

    /// Requested scopes to check
    #[arg(required = true)]
    candidates: Vec<String>,
}

fn load_config(path: Option<&PathBuf>) -> Result<ScopeConfig> {
    let Some(path) = path else {
        return Ok(ScopeConfig::default());
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = ScopeConfig::from_json(&raw)
        .with_context(|| format!("failed to load config {}", path.display()))?;

    info!(path = %path.display(), "loaded scope configuration");
    Ok(config)
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    let granted = ScopeSet::from_string(&cli.granted, config)?;
    debug!(granted = %granted, "checking candidates");

    let resolver = ScopeResolver::new(granted);
    let mut all_allowed = true;

    for candidate in &cli.candidates {
        let allowed = resolver.check(candidate);
        all_allowed &= allowed;

        println!("{} {}", if allowed { "allow" } else { "deny" }, candidate);

        if cli.explain {
            let scopes = resolver.scopes();
            let coverage = scopes.explain(&scopes.parse_item(candidate));
            for index in coverage.contributors() {
                if let Some(item) = scopes.get(*index) {
                    println!("  via {}", item);
                }
            }
            if !coverage.unmet().is_empty() {
                println!("  unmet {}", coverage.unmet());
            }
        }
    }

    Ok(if all_allowed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
