// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The application layer drives the conversion through these
// traits instead of concrete loaders, so tests can feed the
// pipeline from memory and a different corpus layout only
// needs a new implementation.
//
// Implementations:
//   - XmlDirSource (data::loader) → *.xml files in one directory
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::path::PathBuf;

use anyhow::Result;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can list the input files of a corpus.
pub trait CorpusSource {
    /// Return every eligible input file, in the order they must be
    /// processed. The order is stable across runs.
    fn discover(&self) -> Result<Vec<PathBuf>>;
}
