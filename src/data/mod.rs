// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// Everything between a SemEval-2016 .xml file and the rows of
// the NLI-M training file. Per input file the pipeline is:
//
//   *.xml files
//       │
//       ▼
//   XmlDirSource      → lists eligible input files
//       │
//       ▼
//   RecordScanner     → lines → ScannedRecord (id, text, opinions)
//       │                (uses the markup tag tokenizer)
//       ▼
//   AggregatedLabels  → one polarity per (target, aspect) key
//       │
//       ▼
//   LabelExpander     → one row per candidate pair, labelled rows ×40
//       │
//       ▼
//   TsvWriter (infra) → id \t label \t TARGET-ASPECT \t text
//
// Each module is responsible for exactly one step.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Lists *.xml input files in a directory
pub mod loader;

/// Line-local tag tokenizer for the SemEval markup dialect
pub mod markup;

/// Sentence-record state machine over input lines
pub mod scanner;

/// Reduces repeated opinion mentions to one label per key
pub mod aggregator;

/// Cross-joins records with candidate pairs into output rows
pub mod expander;
