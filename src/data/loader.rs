// ============================================================
// Layer 4 - Corpus File Discovery
// ============================================================
// Lists the SemEval-2016 input files in one directory.
//
// Eligible files:
//   - regular files directly inside the directory (no recursion)
//   - extension `.xml`
//
// Files are returned sorted by file name so every run processes
// them in the same order. Generated .csv files (which may live in
// a sub-directory of the same data directory) are never picked up.
//
// Unlike an empty corpus, a missing or unreadable directory is an
// error: the caller asked for a corpus that is not there.
//
// Reference: Rust Book §9 (Error Handling), §12 (I/O)

use anyhow::{bail, Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::traits::CorpusSource;

/// Extension of SemEval-2016 annotation files
pub const INPUT_EXTENSION: &str = "xml";

/// Discovers `*.xml` files in a single directory.
pub struct XmlDirSource {
    dir: PathBuf,
}

impl XmlDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl CorpusSource for XmlDirSource {
    fn discover(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            bail!(
                "Input directory '{}' does not exist or is not a directory",
                self.dir.display()
            );
        }

        let mut files = Vec::new();

        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Cannot read directory '{}'", self.dir.display()))?
        {
            let entry = entry?;
            let path  = entry.path();

            if path.is_file() && has_input_extension(&path) {
                files.push(path);
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        tracing::info!(
            "Found {} input file(s) in '{}'",
            files.len(),
            self.dir.display()
        );
        Ok(files)
    }
}

fn has_input_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(INPUT_EXTENSION)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_only_xml_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Phones_Train.xml"),  "").unwrap();
        fs::write(dir.path().join("Laptops_Train.xml"), "").unwrap();
        fs::write(dir.path().join("notes.txt"),         "").unwrap();
        fs::create_dir(dir.path().join("bert-pair")).unwrap();
        fs::create_dir(dir.path().join("nested.xml")).unwrap();

        let files = XmlDirSource::new(dir.path()).discover().unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();

        assert_eq!(names, vec!["Laptops_Train.xml", "Phones_Train.xml"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir     = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err     = XmlDirSource::new(&missing).discover().unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_empty_directory_is_empty_corpus() {
        let dir = tempfile::tempdir().unwrap();
        assert!(XmlDirSource::new(dir.path()).discover().unwrap().is_empty());
    }
}
