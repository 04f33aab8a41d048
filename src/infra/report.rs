// ============================================================
// Layer 6 - Run Report
// ============================================================
// Summarises a conversion run: the configuration used and, per
// input file, how many sentences were read and rows written.
//
// Written only when `--report <path>` is given, as pretty JSON:
//
//   {
//     "config": { "data_dir": "data/semeval2016", ... },
//     "files": [
//       { "input": "Laptops_Train_p1.xml", "domain": "laptop",
//         "records": 1739, "rows": 412000, ... }
//     ]
//   }
//
// The report carries no timestamps, so re-running on unchanged
// input reproduces it byte for byte.
//
// Reference: serde_json crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, path::Path};

use crate::application::generate_use_case::GenerateConfig;
use crate::domain::vocabulary::Domain;

/// Counts for one converted input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// Input file name (not the full path)
    pub input: String,

    /// Output file name inside the output directory
    pub output: String,

    /// Vocabulary chosen from the file name
    pub domain: Domain,

    /// Sentences read
    pub records: usize,

    /// Rows written, duplicates included
    pub rows: usize,

    /// (sentence, candidate pair) combinations that carried a label
    pub labelled_pairs: usize,

    /// Aggregated labels whose key is not in the vocabulary
    pub unmatched_opinions: usize,

    /// Malformed constructs tolerated in best-effort mode
    pub anomalies: usize,
}

/// Everything produced by one `generate` run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub config: GenerateConfig,
    pub files:  Vec<FileReport>,
}

impl RunReport {
    pub fn total_records(&self) -> usize {
        self.files.iter().map(|f| f.records).sum()
    }

    pub fn total_rows(&self) -> usize {
        self.files.iter().map(|f| f.rows).sum()
    }

    pub fn total_anomalies(&self) -> usize {
        self.files.iter().map(|f| f.anomalies).sum()
    }

    /// Write the report as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        fs::write(path, json + "\n")
            .with_context(|| format!("Cannot write report to '{}'", path.display()))?;

        tracing::debug!("Saved run report to '{}'", path.display());
        Ok(())
    }
}
