// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `generate` and `pairs`, and all
// their flags.
//
// Reference: Rust Book §12 (Building a CLI Program)
//            clap derive documentation

use clap::{builder::TypedValueParser, Args, Subcommand};

use crate::application::generate_use_case::GenerateConfig;
use crate::data::expander::DEFAULT_DUPLICATION;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert every SemEval-2016 .xml file into an NLI-M .csv file
    Generate(GenerateArgs),

    /// Print the candidate pairs a file name would be expanded against
    Pairs(PairsArgs),
}

/// All arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Directory containing the SemEval-2016 .xml files
    #[arg(long, default_value = "data/semeval2016")]
    pub data_dir: String,

    /// Where to write the generated files
    /// [default: <DATA_DIR>/bert-pair]
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Rows written for every candidate pair that carries a label
    #[arg(
        long,
        default_value_t = DEFAULT_DUPLICATION,
        value_parser = clap::value_parser!(u32).range(1..).map(|n| n as usize)
    )]
    pub duplication: usize,

    /// JSON file replacing the built-in target/aspect vocabulary
    #[arg(long)]
    pub vocab: Option<String>,

    /// Abort on the first malformed construct instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Write a JSON summary of the run to this path
    #[arg(long)]
    pub report: Option<String>,
}

/// Convert CLI GenerateArgs into the application-layer GenerateConfig.
/// The application layer never sees clap types.
impl From<GenerateArgs> for GenerateConfig {
    fn from(a: GenerateArgs) -> Self {
        GenerateConfig {
            data_dir:    a.data_dir,
            output_dir:  a.output_dir,
            duplication: a.duplication,
            vocab_path:  a.vocab,
            strict:      a.strict,
            report_path: a.report,
        }
    }
}

/// All arguments for the `pairs` command
#[derive(Args, Debug)]
pub struct PairsArgs {
    /// Input file name; only the name is inspected, the file need not exist
    #[arg(long)]
    pub file_name: String,

    /// JSON file replacing the built-in target/aspect vocabulary
    #[arg(long)]
    pub vocab: Option<String>,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["semeval-nli-m", "generate"]).unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let config = GenerateConfig::from(args);
        assert_eq!(config, GenerateConfig::default());
    }

    #[test]
    fn test_generate_flags() {
        let cli = Cli::try_parse_from([
            "semeval-nli-m",
            "generate",
            "--data-dir", "in",
            "--output-dir", "out",
            "--duplication", "8",
            "--strict",
            "--report", "r.json",
        ])
        .unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let config = GenerateConfig::from(args);
        assert_eq!(config.data_dir, "in");
        assert_eq!(config.output_dir.as_deref(), Some("out"));
        assert_eq!(config.duplication, 8);
        assert!(config.strict);
        assert_eq!(config.report_path.as_deref(), Some("r.json"));
    }

    #[test]
    fn test_zero_duplication_rejected_by_parser() {
        let result = Cli::try_parse_from(["semeval-nli-m", "generate", "--duplication", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_pairs_requires_file_name() {
        assert!(Cli::try_parse_from(["semeval-nli-m", "pairs"]).is_err());
    }
}
