// ============================================================
// Layer 2 - GenerateUseCase
// ============================================================
// Converts every SemEval-2016 file of a data directory into an
// NLI-M training file:
//
//   Step 1: Discover input files          (Layer 4 - data)
//   Step 2: Create the output directory   (idempotent)
//   For each file:
//     Step 3: Pick the vocabulary from the file name
//     Step 4: Scan sentence records       (Layer 4 - data)
//     Step 5: Aggregate opinion labels    (Layer 4 - data)
//     Step 6: Expand into NLI-M rows      (Layer 4 - data)
//     Step 7: Write rows as TSV           (Layer 6 - infra)
//   Step 8: Log the summary, optionally save the run report
//
// Files are processed one after another and share nothing but
// the read-only vocabulary. An I/O failure aborts the run; the
// file being written at that point is left truncated.
//
// Reference: Rust Book §9 (Error Handling), §13 (Iterators)

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::{
    fs::{self, File},
    io::{BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use crate::data::{
    aggregator::AggregatedLabels,
    expander::{LabelExpander, DEFAULT_DUPLICATION},
    loader::XmlDirSource,
    scanner::RecordScanner,
};
use crate::domain::traits::CorpusSource;
use crate::domain::vocabulary::{Vocabulary, VocabularyFile};
use crate::infra::{
    report::{FileReport, RunReport},
    tsv_writer::{self, output_file_name, TsvWriter},
};

/// Sub-directory of the data directory used when no output
/// directory is given
pub const DEFAULT_OUTPUT_SUBDIR: &str = "bert-pair";

// ─── Generate Configuration ──────────────────────────────────────────────────
// Everything a run depends on. Serialisable so the run report can
// record exactly which settings produced a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateConfig {
    pub data_dir:    String,
    pub output_dir:  Option<String>,
    pub duplication: usize,
    pub vocab_path:  Option<String>,
    pub strict:      bool,
    pub report_path: Option<String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            data_dir:    "data/semeval2016".to_string(),
            output_dir:  None,
            duplication: DEFAULT_DUPLICATION,
            vocab_path:  None,
            strict:      false,
            report_path: None,
        }
    }
}

impl GenerateConfig {
    /// The configured output directory, or `<data_dir>/bert-pair`
    pub fn resolved_output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => PathBuf::from(dir),
            None => Path::new(&self.data_dir).join(DEFAULT_OUTPUT_SUBDIR),
        }
    }
}

/// Load a vocabulary file, or fall back to the built-in tables
pub fn load_vocabulary(path: Option<&str>) -> Result<Vocabulary> {
    let Some(path) = path else {
        return Ok(Vocabulary::semeval16());
    };

    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read vocabulary file '{path}'"))?;
    let tables: VocabularyFile = serde_json::from_str(&json)
        .with_context(|| format!("Vocabulary file '{path}' is not valid JSON"))?;
    let vocab = Vocabulary::from_tables(tables)
        .with_context(|| format!("Vocabulary file '{path}' is invalid"))?;

    tracing::info!("Loaded vocabulary from '{}'", path);
    Ok(vocab)
}

// ─── Per-file counts ─────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    pub records:            usize,
    pub rows:               usize,
    pub labelled_pairs:     usize,
    pub unmatched_opinions: usize,
    pub anomalies:          usize,
}

/// Run Scanner → Aggregator → Expander over one input stream and
/// write every row to `writer`.
pub fn convert<R: BufRead, W: Write>(
    reader:   R,
    writer:   &mut TsvWriter<W>,
    expander: &LabelExpander<'_>,
    strict:   bool,
    source:   &str,
) -> Result<ConvertStats> {
    let mut scanner = RecordScanner::from_reader(reader)
        .strict(strict)
        .with_source(source);
    let mut stats   = ConvertStats::default();
    let rows_before = writer.rows();

    for scanned in scanner.by_ref() {
        let scanned = scanned?;
        let labels  = AggregatedLabels::from_opinions(&scanned.opinions);
        let matched = expander.matched(&labels);

        if matched < labels.len() {
            for (key, _) in labels.iter().filter(|(k, _)| !expander.is_candidate(k)) {
                tracing::debug!(
                    "{}: sentence '{}' has {}#{} which is not a candidate pair",
                    source,
                    scanned.record.id,
                    key.target,
                    key.aspect
                );
            }
        }

        tracing::trace!(
            "{}: sentence '{}' expands to {} rows",
            source,
            scanned.record.id,
            expander.row_count(&labels)
        );
        for row in expander.expand(&scanned.record, &labels) {
            writer.write_row(&row)?;
        }

        stats.records            += 1;
        stats.labelled_pairs     += matched;
        stats.unmatched_opinions += labels.len() - matched;
    }

    stats.rows      = writer.rows() - rows_before;
    stats.anomalies = scanner.anomalies().len();
    Ok(stats)
}

// ─── GenerateUseCase ─────────────────────────────────────────────────────────
pub struct GenerateUseCase {
    config: GenerateConfig,
    vocab:  Vocabulary,
}

impl GenerateUseCase {
    /// Validate the configuration and load the vocabulary
    pub fn new(config: GenerateConfig) -> Result<Self> {
        let vocab = load_vocabulary(config.vocab_path.as_deref())?;
        Self::with_vocabulary(config, vocab)
    }

    /// Use an already-built vocabulary instead of `vocab_path`
    pub fn with_vocabulary(config: GenerateConfig, vocab: Vocabulary) -> Result<Self> {
        if config.duplication == 0 {
            bail!("duplication factor must be at least 1");
        }
        Ok(Self { config, vocab })
    }

    /// Convert every file of the configured data directory
    pub fn execute(&self) -> Result<RunReport> {
        let source = XmlDirSource::new(&self.config.data_dir);
        self.execute_with(&source)
    }

    /// Convert every file listed by `source`
    pub fn execute_with(&self, source: &dyn CorpusSource) -> Result<RunReport> {
        let cfg        = &self.config;
        let output_dir = cfg.resolved_output_dir();

        // ── Step 1: Input files ──────────────────────────────────────────────
        // Discovered first so a missing data directory is reported
        // before the default output path would create it
        let inputs = source.discover()?;

        // ── Step 2: Output directory ─────────────────────────────────────────
        fs::create_dir_all(&output_dir).with_context(|| {
            format!("Cannot create output directory '{}'", output_dir.display())
        })?;

        // ── Steps 3-7: One output file per input file ────────────────────────
        let mut files = Vec::with_capacity(inputs.len());
        for input in &inputs {
            let report = self.convert_file(input, &output_dir)?;
            tracing::info!(
                "{} → {} ({} domain): {} sentences, {} rows",
                report.input,
                report.output,
                report.domain.as_str(),
                report.records,
                report.rows
            );
            files.push(report);
        }

        // ── Step 8: Summary ──────────────────────────────────────────────────
        let report = RunReport {
            config: cfg.clone(),
            files,
        };
        tracing::info!(
            "Converted {} file(s): {} sentences, {} rows, {} anomalies",
            report.files.len(),
            report.total_records(),
            report.total_rows(),
            report.total_anomalies()
        );

        if let Some(path) = &cfg.report_path {
            report.save(Path::new(path))?;
        }

        Ok(report)
    }

    fn convert_file(&self, input: &Path, output_dir: &Path) -> Result<FileReport> {
        let file_name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        // ── Step 3: Vocabulary from the file name only ───────────────────────
        let domain   = self.vocab.domain_for(&file_name);
        let expander = LabelExpander::new(self.vocab.pairs(domain), self.config.duplication);

        let output_name = output_file_name(input, self.config.duplication);
        let output_path = tsv_writer::output_path(output_dir, input, self.config.duplication);

        let reader = BufReader::new(
            File::open(input)
                .with_context(|| format!("Cannot open input file '{}'", input.display()))?,
        );
        let mut writer = TsvWriter::create(&output_path)?;

        // ── Steps 4-7 ────────────────────────────────────────────────────────
        let stats = convert(reader, &mut writer, &expander, self.config.strict, &file_name)
            .with_context(|| format!("Failed to convert '{}'", input.display()))?;
        writer
            .finish()
            .with_context(|| format!("Cannot write '{}'", output_path.display()))?;

        Ok(FileReport {
            input:              file_name,
            output:             output_name,
            domain,
            records:            stats.records,
            rows:               stats.rows,
            labelled_pairs:     stats.labelled_pairs,
            unmatched_opinions: stats.unmatched_opinions,
            anomalies:          stats.anomalies,
        })
    }
}
