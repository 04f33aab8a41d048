// ============================================================
// Layer 3 - Target/Aspect Vocabulary
// ============================================================
// SemEval-2016 Task 5 ships two product domains that share the
// same attribute (aspect) labels but differ in their entity
// (target) labels:
//
//   Laptops: LAPTOP, DISPLAY, KEYBOARD, ... , COMPANY   (22)
//   Phones:  PHONE,  DISPLAY, KEYBOARD, ... , COMPANY   (17)
//   Aspects: GENERAL, PRICE, QUALITY, ... , MISCELLANEOUS (9)
//
// The domain of a file is decided ONLY by its file name: if the
// name contains the keyword (default "Laptop") the laptop targets
// are used, otherwise the phone targets.
//
// The candidate pairs of a domain are the cross product
// targets × aspects, targets in the outer loop:
//
//   LAPTOP-GENERAL, LAPTOP-PRICE, ..., LAPTOP-MISCELLANEOUS,
//   DISPLAY-GENERAL, ...
//
// A Vocabulary is built once at startup (built-in tables or a
// JSON file) and shared read-only by every file and record.
//
// Reference: Rust Book §8 (Vectors), §9 (Error Handling)
//            serde / serde_json crate documentation

use std::collections::HashSet;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::domain::record::OpinionKey;

/// Keyword that marks a laptop-domain file name
pub const DEFAULT_DOMAIN_KEYWORD: &str = "Laptop";

pub const LAPTOP_TARGETS: &[&str] = &[
    "LAPTOP",
    "DISPLAY",
    "KEYBOARD",
    "MOUSE",
    "MOTHERBOARD",
    "CPU",
    "FANS_COOLING",
    "PORTS",
    "MEMORY",
    "POWER_SUPPLY",
    "OPTICAL_DRIVES",
    "BATTERY",
    "GRAPHICS",
    "HARD_DISC",
    "MULTIMEDIA_DEVICES",
    "HARDWARE",
    "SOFTWARE",
    "OS",
    "WARRANTY",
    "SHIPPING",
    "SUPPORT",
    "COMPANY",
];

pub const PHONE_TARGETS: &[&str] = &[
    "PHONE",
    "DISPLAY",
    "KEYBOARD",
    "CPU",
    "PORTS",
    "MEMORY",
    "POWER_SUPPLY",
    "HARD_DISK",
    "MULTIMEDIA_DEVICES",
    "BATTERY",
    "HARDWARE",
    "SOFTWARE",
    "OS",
    "WARRANTY",
    "SHIPPING",
    "SUPPORT",
    "COMPANY",
];

pub const ASPECTS: &[&str] = &[
    "GENERAL",
    "PRICE",
    "QUALITY",
    "OPERATION_PERFORMANCE",
    "USABILITY",
    "DESIGN_FEATURES",
    "PORTABILITY",
    "CONNECTIVITY",
    "MISCELLANEOUS",
];

/// The product domain of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Laptop,
    Phone,
}

impl Domain {
    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Laptop => "laptop",
            Domain::Phone  => "phone",
        }
    }
}

/// One (target, aspect) candidate with its pre-joined output key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePair {
    /// Lookup key matching the scanner's OpinionKey
    pub key: OpinionKey,

    /// `TARGET-ASPECT`, computed once so expansion never allocates
    pub joined: String,
}

impl CandidatePair {
    pub fn new(target: &str, aspect: &str) -> Self {
        let key    = OpinionKey::new(target, aspect);
        let joined = key.joined();
        Self { key, joined }
    }
}

/// Serialised form of a vocabulary file (`--vocab vocab.json`).
///
/// ```json
/// {
///   "keyword": "Laptop",
///   "laptop_targets": ["LAPTOP", "BATTERY"],
///   "phone_targets": ["PHONE"],
///   "aspects": ["GENERAL", "PRICE"]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyFile {
    #[serde(default = "default_keyword")]
    pub keyword:        String,
    pub laptop_targets: Vec<String>,
    pub phone_targets:  Vec<String>,
    pub aspects:        Vec<String>,
}

fn default_keyword() -> String {
    DEFAULT_DOMAIN_KEYWORD.to_string()
}

impl Default for VocabularyFile {
    /// The built-in SemEval-2016 tables
    fn default() -> Self {
        let owned = |xs: &[&str]| -> Vec<String> { xs.iter().map(|s| s.to_string()).collect() };
        Self {
            keyword:        default_keyword(),
            laptop_targets: owned(LAPTOP_TARGETS),
            phone_targets:  owned(PHONE_TARGETS),
            aspects:        owned(ASPECTS),
        }
    }
}

/// Read-only candidate pair enumerations for both domains.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    keyword:      String,
    laptop_pairs: Vec<CandidatePair>,
    phone_pairs:  Vec<CandidatePair>,
}

impl Vocabulary {
    /// Validate vocabulary contents and build both cross products.
    /// Rejects an empty keyword, empty lists, and duplicate labels,
    /// any of which would make the enumeration ill-formed.
    pub fn from_tables(tables: VocabularyFile) -> Result<Self> {
        if tables.keyword.is_empty() {
            bail!("vocabulary keyword must not be empty");
        }
        check_labels("laptop_targets", &tables.laptop_targets)?;
        check_labels("phone_targets",  &tables.phone_targets)?;
        check_labels("aspects",        &tables.aspects)?;

        Ok(Self {
            laptop_pairs: cross(tables.laptop_targets.as_slice(), tables.aspects.as_slice()),
            phone_pairs:  cross(tables.phone_targets.as_slice(),  tables.aspects.as_slice()),
            keyword:      tables.keyword,
        })
    }

    /// Built-in SemEval-2016 vocabulary
    pub fn semeval16() -> Self {
        Self {
            keyword:      default_keyword(),
            laptop_pairs: cross(LAPTOP_TARGETS, ASPECTS),
            phone_pairs:  cross(PHONE_TARGETS, ASPECTS),
        }
    }

    /// Decide the domain of a file from its name alone
    pub fn domain_for(&self, file_name: &str) -> Domain {
        if file_name.contains(self.keyword.as_str()) {
            Domain::Laptop
        } else {
            Domain::Phone
        }
    }

    /// Candidate pairs of a domain in enumeration order
    pub fn pairs(&self, domain: Domain) -> &[CandidatePair] {
        match domain {
            Domain::Laptop => &self.laptop_pairs,
            Domain::Phone  => &self.phone_pairs,
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::semeval16()
    }
}

fn cross<S: AsRef<str>>(targets: &[S], aspects: &[S]) -> Vec<CandidatePair> {
    targets
        .iter()
        .flat_map(|t| {
            aspects
                .iter()
                .map(move |a| CandidatePair::new(t.as_ref(), a.as_ref()))
        })
        .collect()
}

fn check_labels(field: &str, labels: &[String]) -> Result<()> {
    if labels.is_empty() {
        bail!("vocabulary field '{field}' must not be empty");
    }
    let mut seen = HashSet::new();
    for label in labels {
        if label.is_empty() {
            bail!("vocabulary field '{field}' contains an empty label");
        }
        if !seen.insert(label.as_str()) {
            bail!("vocabulary field '{field}' lists '{label}' more than once");
        }
    }
    Ok(())
}
