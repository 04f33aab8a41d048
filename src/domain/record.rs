// ============================================================
// Layer 3 - Record Domain Types
// ============================================================
// One <sentence> element of a SemEval-2016 file becomes one
// Record plus one OpinionSet:
//
//   <sentence id="1004293:0">
//     <text>The battery life is great</text>
//     <Opinions>
//       <Opinion category="BATTERY#OPERATION_PERFORMANCE" polarity="positive"/>
//     </Opinions>
//   </sentence>
//
//   Record     { id: "1004293:0", text: "The battery life is great" }
//   OpinionSet { (BATTERY, OPERATION_PERFORMANCE) => [Positive] }
//
// After expansion every Record produces OutputRows of the form:
//   id <TAB> label <TAB> TARGET-ASPECT <TAB> text
//
// Reference: Rust Book §5 (Structs and Methods)
//            indexmap crate documentation

use std::fmt;

use indexmap::IndexMap;

use crate::domain::polarity::Polarity;

/// One sentence extracted from an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Value of the sentence's `id` attribute, unique within a file
    pub id: String,

    /// Raw sentence text exactly as it appears between <text> tags.
    /// Markup entities such as `&amp;` are NOT decoded.
    pub text: String,
}

impl Record {
    /// Create a new Record from an id and its sentence text
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id:   id.into(),
            text: text.into(),
        }
    }
}

/// Composite (target, aspect) key of an opinion or a candidate pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpinionKey {
    /// The entity the opinion is about, e.g. `LAPTOP`
    pub target: String,

    /// The attribute of the entity, e.g. `PRICE`
    pub aspect: String,
}

impl OpinionKey {
    pub fn new(target: impl Into<String>, aspect: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            aspect: aspect.into(),
        }
    }

    /// Split a `TARGET#ASPECT` category value at its first `#`.
    /// Returns None when the value has no `#` at all.
    pub fn from_category(category: &str) -> Option<Self> {
        let (target, aspect) = category.split_once('#')?;
        Some(Self::new(target, aspect))
    }

    /// Hyphen-joined form written to the output: `TARGET-ASPECT`
    pub fn joined(&self) -> String {
        format!("{}-{}", self.target, self.aspect)
    }
}

/// Every polarity mention recorded for one sentence, grouped by key.
///
/// Keys keep first-seen order and each key keeps its mentions in
/// document order, so aggregation is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpinionSet {
    mentions: IndexMap<OpinionKey, Vec<Polarity>>,
}

impl OpinionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one mention under its key
    pub fn push(&mut self, key: OpinionKey, polarity: Polarity) {
        self.mentions.entry(key).or_default().push(polarity);
    }

    /// Mentions recorded for a key, if any
    pub fn get(&self, key: &OpinionKey) -> Option<&[Polarity]> {
        self.mentions.get(key).map(Vec::as_slice)
    }

    /// Iterate over (key, mentions) in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&OpinionKey, &[Polarity])> {
        self.mentions.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.mentions.len()
    }
}

/// A finalized record together with its opinion multiset.
/// This is what the scanner hands to the aggregator and expander.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedRecord {
    pub record:   Record,
    pub opinions: OpinionSet,
}

/// One line of the generated TSV file.
///
/// Borrows from the Record and the candidate pair it was expanded
/// from, so emitting 40 duplicates does not copy the sentence text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputRow<'a> {
    pub id:    &'a str,
    pub label: &'a str,
    pub pair:  &'a str,
    pub text:  &'a str,
}

/// Formats the row as tab-separated fields without a trailing newline
impl fmt::Display for OutputRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}\t{}", self.id, self.label, self.pair, self.text)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_splits_at_first_pound() {
        let key = OpinionKey::from_category("LAPTOP#BATTERY").unwrap();
        assert_eq!(key, OpinionKey::new("LAPTOP", "BATTERY"));

        // Only the first '#' separates target from aspect
        let key = OpinionKey::from_category("A#B#C").unwrap();
        assert_eq!(key.target, "A");
        assert_eq!(key.aspect, "B#C");
    }

    #[test]
    fn test_category_without_pound_is_rejected() {
        assert!(OpinionKey::from_category("LAPTOP").is_none());
    }

    #[test]
    fn test_joined_uses_hyphen() {
        assert_eq!(OpinionKey::new("OS", "PRICE").joined(), "OS-PRICE");
    }

    #[test]
    fn test_opinion_set_groups_mentions_in_order() {
        let mut set = OpinionSet::new();
        set.push(OpinionKey::new("OS", "PRICE"), Polarity::Negative);
        set.push(OpinionKey::new("CPU", "QUALITY"), Polarity::Positive);
        set.push(OpinionKey::new("OS", "PRICE"), Polarity::Positive);

        assert_eq!(set.len(), 2);
        assert_eq!(
            set.get(&OpinionKey::new("OS", "PRICE")),
            Some(&[Polarity::Negative, Polarity::Positive][..])
        );

        let keys: Vec<_> = set.iter().map(|(k, _)| k.target.as_str()).collect();
        assert_eq!(keys, vec!["OS", "CPU"]);
    }

    #[test]
    fn test_output_row_is_tab_separated() {
        let row = OutputRow {
            id:    "101",
            label: "positive",
            pair:  "LAPTOP-BATTERY",
            text:  "The battery life is great",
        };
        assert_eq!(
            row.to_string(),
            "101\tpositive\tLAPTOP-BATTERY\tThe battery life is great"
        );
    }
}
