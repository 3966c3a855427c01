//! sdk-bindgen CLI
//!
//! Command-line interface for extracting service manifests and normalized
//! type models from TypeScript cloud SDK checkouts.
//!
//! JSON goes to stdout (or `--output`) only once the whole invocation has
//! succeeded; progress and diagnostics go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sdk_bindgen_analyzer::ServiceDiscoverer;
use sdk_bindgen_common::{to_pretty_json, SdkLayout};
use sdk_bindgen_parser::{ModelParser, ModelSummary};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sdk-bindgen")]
#[command(version, about = "Extract service and model metadata from TypeScript cloud SDKs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover the services of an SDK checkout and print the ordered manifest
    #[command(after_help = "EXAMPLES:\n  \
        # Manifest of the SDK checked out in the current directory\n  \
        sdk-bindgen discover\n\n  \
        # Only some services, written to a file\n  \
        sdk-bindgen discover --root ./oci-typescript-sdk --only core,identity --output services.json")]
    Discover {
        /// Root of the SDK checkout
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// YAML file overriding the default SDK layout
        #[arg(short, long)]
        layout: Option<PathBuf>,

        /// Comma-separated list of service names to keep
        #[arg(long, value_delimiter = ',')]
        only: Option<Vec<String>>,

        /// Write the JSON manifest to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse the models of one service
    #[command(after_help = "EXAMPLES:\n  \
        # Models of the core service\n  \
        sdk-bindgen parse --service core --root ./oci-typescript-sdk\n\n  \
        # With a custom layout, written to a file\n  \
        sdk-bindgen parse --service identity --layout layout.yaml --output identity.json")]
    Parse {
        /// Service directory name (e.g., "core", "identity")
        #[arg(short, long)]
        service: String,

        /// Root of the SDK checkout
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// YAML file overriding the default SDK layout
        #[arg(short, long)]
        layout: Option<PathBuf>,

        /// Write the JSON models to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "✗ Error:".red().bold(), e);
            ExitCode::FAILURE
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.verbose {
        eprintln!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::Discover {
            root,
            layout,
            only,
            output,
        } => discover_command(
            &root,
            layout.as_deref(),
            only.as_deref(),
            output.as_deref(),
            cli.verbose,
        ),
        Commands::Parse {
            service,
            root,
            layout,
            output,
        } => parse_command(
            &root,
            &service,
            layout.as_deref(),
            output.as_deref(),
            cli.verbose,
        ),
    }
}

fn discover_command(
    root: &Path,
    layout_path: Option<&Path>,
    only: Option<&[String]>,
    output: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    eprintln!("{} Discovering services in: {}", "→".cyan(), root.display());
    let layout = load_layout(layout_path)?;

    let mut manifest = ServiceDiscoverer::new(root)
        .with_layout(layout)
        .verbose(verbose)
        .discover()
        .context("Service discovery failed")?;

    if let Some(names) = only {
        manifest.retain_names(names);
        for name in names {
            if manifest.get(name).is_none() {
                eprintln!("{} Service '{}' was not discovered", "⚠".yellow(), name);
            }
        }
    }

    let json = manifest.to_json().context("Failed to serialize manifest")?;
    emit(&json, output)?;

    eprintln!(
        "\n{} {} services",
        "✓ Discovery complete:".green().bold(),
        manifest.len()
    );
    for tier in 1..=3 {
        eprintln!(
            "  Priority {}: {}",
            tier,
            manifest.count_by_priority(tier).to_string().yellow()
        );
    }

    Ok(())
}

fn parse_command(
    root: &Path,
    service: &str,
    layout_path: Option<&Path>,
    output: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    eprintln!("{} Parsing service: {}", "→".cyan(), service.yellow());

    let (json, summary) = parse_models_json(root, service, layout_path, verbose)?;
    emit(&json, output)?;

    eprintln!("\n{} {}", "✓ Parse complete:".green().bold(), summary);
    if summary.polymorphic_bases + summary.polymorphic_variants > 0 {
        eprintln!(
            "  Polymorphic: {} bases, {} variants",
            summary.polymorphic_bases, summary.polymorphic_variants
        );
    }

    Ok(())
}

/// Parse one service into its finished JSON document
///
/// Nothing is written anywhere; the caller emits the document only once it
/// exists in full.
fn parse_models_json(
    root: &Path,
    service: &str,
    layout_path: Option<&Path>,
    verbose: bool,
) -> Result<(String, ModelSummary)> {
    let layout = load_layout(layout_path)?;

    if verbose {
        eprintln!("  Root: {}", root.display());
        eprintln!("  Model directory: {}", layout.structures_dir);
    }

    let models = ModelParser::new(root, service)
        .with_layout(layout)
        .verbose(verbose)
        .parse()
        .with_context(|| format!("Failed to parse models for service '{service}'"))?;

    let json = to_pretty_json(&models).context("Failed to serialize models")?;
    Ok((json, ModelSummary::from_models(&models)))
}

fn load_layout(path: Option<&Path>) -> Result<SdkLayout> {
    match path {
        Some(path) => SdkLayout::load(path)
            .with_context(|| format!("Failed to load layout from {}", path.display())),
        None => Ok(SdkLayout::default()),
    }
}

/// Write the finished JSON document to `output`, or stdout
fn emit(json: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} Wrote {}", "→".cyan(), path.display());
        },
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        },
    }
    Ok(())
}
