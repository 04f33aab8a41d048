// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and delegates every decision to Layer 2 (application).
//
// Two commands are supported:
//   1. `generate` - converts a SemEval-2016 directory to NLI-M files
//   2. `pairs`    - prints the candidate pairs for a file name
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, GenerateArgs, PairsArgs};

/// Command line of the NLI-M pair generator
#[derive(Parser, Debug)]
#[command(
    name = "semeval-nli-m",
    version,
    about = "Turn SemEval-2016 aspect-sentiment files into NLI-M sentence-pair training data."
)]
pub struct Cli {
    /// The subcommand to run (generate or pairs)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Generate(args) => run_generate(args),
            Commands::Pairs(args)    => run_pairs(args),
        }
    }
}

/// Handles the `generate` subcommand.
fn run_generate(args: GenerateArgs) -> Result<()> {
    use crate::application::generate_use_case::GenerateUseCase;

    tracing::info!("Generating NLI-M files from '{}'", args.data_dir);

    let use_case = GenerateUseCase::new(args.into())?;
    let report   = use_case.execute()?;

    println!(
        "Wrote {} file(s): {} sentences, {} rows.",
        report.files.len(),
        report.total_records(),
        report.total_rows()
    );
    if report.total_anomalies() > 0 {
        println!(
            "Skipped {} malformed construct(s); see the warnings above.",
            report.total_anomalies()
        );
    }
    Ok(())
}

/// Handles the `pairs` subcommand: one pair key per line on stdout.
fn run_pairs(args: PairsArgs) -> Result<()> {
    use crate::application::pairs_use_case::PairsUseCase;

    let use_case       = PairsUseCase::new(args.vocab.as_deref())?;
    let (domain, keys) = use_case.list(&args.file_name);

    tracing::info!(
        "'{}' uses the {} vocabulary ({} pairs)",
        args.file_name,
        domain.as_str(),
        keys.len()
    );
    for key in keys {
        println!("{key}");
    }
    Ok(())
}
