// ============================================================
// Layer 2 - PairsUseCase
// ============================================================
// Answers "which candidate pairs would this file be expanded
// against?" without reading the file: the domain comes from the
// file name alone.
//
// Reference: Rust Book §8 (Vectors)

use anyhow::Result;

use crate::application::generate_use_case::load_vocabulary;
use crate::domain::vocabulary::{Domain, Vocabulary};

pub struct PairsUseCase {
    vocab: Vocabulary,
}

impl PairsUseCase {
    /// Load the vocabulary file, or use the built-in tables
    pub fn new(vocab_path: Option<&str>) -> Result<Self> {
        Ok(Self {
            vocab: load_vocabulary(vocab_path)?,
        })
    }

    /// Domain and `TARGET-ASPECT` keys, in expansion order
    pub fn list(&self, file_name: &str) -> (Domain, Vec<&str>) {
        let domain = self.vocab.domain_for(file_name);
        let keys   = self
            .vocab
            .pairs(domain)
            .iter()
            .map(|p| p.joined.as_str())
            .collect();
        (domain, keys)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_phone_pairs() {
        let use_case     = PairsUseCase::new(None).unwrap();
        let (domain, ks) = use_case.list("Phones_Test_Gold.xml");
        assert_eq!(domain, Domain::Phone);
        assert_eq!(ks.first(), Some(&"PHONE-GENERAL"));
        assert_eq!(ks.last(),  Some(&"COMPANY-MISCELLANEOUS"));
    }
}
