//! permissions-policy - print the policy header for a settings file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use policy_security::{HeaderAction, HeaderFormat, PolicySettings};

/// Header wire format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Feature-Policy ASCII list
    Legacy,
    /// Permissions-Policy structured dictionary
    Structured,
}

impl From<Format> for HeaderFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Legacy => HeaderFormat::Legacy,
            Format::Structured => HeaderFormat::Structured,
        }
    }
}

/// Render a Feature-Policy / Permissions-Policy header from settings
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings file (JSON)
    settings: PathBuf,

    /// Override the configured header format
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut settings = PolicySettings::from_path(&args.settings)
        .with_context(|| format!("failed to load settings from {}", args.settings.display()))?;
    if let Some(format) = args.format {
        settings.format = format.into();
    }

    match HeaderAction::from_settings(&settings).context("invalid policy settings")? {
        HeaderAction::Set(header) => println!("{header}"),
        HeaderAction::Remove { name } => info!("No directives configured, remove {}", name),
        HeaderAction::Skip => info!("No header emitted"),
    }

    Ok(())
}
