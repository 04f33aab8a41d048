// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// File output that the business layers should not care about:
//
//   tsv_writer.rs - Buffered writer for NLI-M rows plus the
//                   `<stem>_NLI_M_<N>.csv` naming rule.
//
//   report.rs     - Optional JSON summary of a run (config and
//                   per-file counts) for dataset provenance.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// TSV output files and their naming
pub mod tsv_writer;

/// JSON run report
pub mod report;
