//! java2go CLI
//!
//! # Usage
//!
//! ```bash
//! # Print the translation of one file
//! java2go src/Shapes.java
//!
//! # Write it next to the other Go sources, failing on the first problem
//! java2go src/Shapes.java out/shapes.go --strict
//!
//! # Use an explicit settings file
//! java2go src/Shapes.java --config migration.yaml
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=java2go_ir=debug` for per-declaration detail.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use java2go_ir::config::DEFAULT_CONFIG_FILE;
use java2go_ir::{translate_file, MigrationConfig, Mode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "java2go")]
#[command(about = "Translate a Java compilation unit into a Go source file", long_about = None)]
struct Cli {
    /// Java source file
    source: PathBuf,

    /// Output file (stdout when omitted)
    dest: Option<PathBuf>,

    /// YAML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Abort on the first failure instead of emitting placeholders
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = MigrationConfig::load(
        cli.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
    );
    let mode = if cli.strict { Mode::Strict } else { Mode::Tolerant };

    let output = match translate_file(&cli.source, &config, mode) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("error: {}: {}", cli.source.display(), e);
            return ExitCode::FAILURE;
        }
    };

    for diagnostic in &output.diagnostics {
        eprintln!("warning: {}", diagnostic);
    }

    match &cli.dest {
        Some(dest) => {
            if let Err(e) = std::fs::write(dest, &output.text) {
                eprintln!("error: cannot write {}: {}", dest.display(), e);
                return ExitCode::FAILURE;
            }
            tracing::info!("Wrote {}", dest.display());
        }
        None => print!("{}", output.text),
    }
    ExitCode::SUCCESS
}
