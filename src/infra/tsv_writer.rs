// ============================================================
// Layer 6 - TSV Row Writer
// ============================================================
// Writes OutputRows to a tab-separated file, one row per line:
//
//   79:0\tnone\tLAPTOP-GENERAL\tThis computer is really fast ...
//   79:0\tpositive\tLAPTOP-OPERATION_PERFORMANCE\tThis computer ...
//
// No header row is written and fields are not quoted; the sentence
// text is written exactly as it was read. Every line, including
// the last, ends with '\n'.
//
// The output file is created (or truncated) when the writer is
// opened, so an input without sentences still leaves an empty
// file behind.
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::record::OutputRow;

/// Buffered writer for NLI-M rows.
pub struct TsvWriter<W: Write> {
    out:  BufWriter<W>,
    rows: usize,
}

impl TsvWriter<File> {
    /// Create or truncate `path` and wrap it in a TsvWriter
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Cannot create output file '{}'", path.display()))?;
        tracing::debug!("Writing rows to '{}'", path.display());
        Ok(Self::new(file))
    }
}

impl<W: Write> TsvWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            out:  BufWriter::new(inner),
            rows: 0,
        }
    }

    /// Append one row followed by a newline
    pub fn write_row(&mut self, row: &OutputRow<'_>) -> Result<()> {
        writeln!(self.out, "{row}")?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush buffered rows and hand back the inner writer
    pub fn finish(self) -> Result<W> {
        self.out
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Cannot flush output: {}", e.error()))
    }
}

/// Output file name for an input: `<stem>_NLI_M_<duplication>.csv`
pub fn output_file_name(input: &Path, duplication: usize) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    format!("{stem}_NLI_M_{duplication}.csv")
}

/// Full output path for `input` inside `output_dir`
pub fn output_path(output_dir: &Path, input: &Path, duplication: usize) -> PathBuf {
    output_dir.join(output_file_name(input, duplication))
}
