// ============================================================
// Layer 4 - Polarity Aggregator
// ============================================================
// Collapses a sentence's opinion multiset into exactly one label
// per distinct (target, aspect) key:
//
//   OpinionSet                          AggregatedLabels
//   (DISPLAY, QUALITY) → [neg, pos]  →  (DISPLAY, QUALITY) → conflict
//   (LAPTOP,  PRICE)   → [pos]       →  (LAPTOP,  PRICE)   → positive
//
// The reduction rule itself lives in domain::polarity::aggregate.
// Keys absent from the result are the "none" class.
//
// Reference: Rust Book §13 (Iterators and Closures)

use indexmap::IndexMap;

use crate::domain::polarity::{aggregate, Polarity};
use crate::domain::record::{OpinionKey, OpinionSet};

/// One aggregated polarity per (target, aspect) key of a sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedLabels {
    labels: IndexMap<OpinionKey, Polarity>,
}

impl AggregatedLabels {
    /// Aggregate every key of `opinions`, keeping first-seen order
    pub fn from_opinions(opinions: &OpinionSet) -> Self {
        let labels = opinions
            .iter()
            .map(|(key, mentions)| (key.clone(), aggregate(mentions)))
            .collect();
        Self { labels }
    }

    pub fn get(&self, key: &OpinionKey) -> Option<Polarity> {
        self.labels.get(key).copied()
    }

    pub fn contains(&self, key: &OpinionKey) -> bool {
        self.labels.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OpinionKey, Polarity)> {
        self.labels.iter().map(|(k, p)| (k, *p))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use Polarity::*;

    #[test]
    fn test_one_label_per_key() {
        let mut set = OpinionSet::new();
        set.push(OpinionKey::new("DISPLAY", "QUALITY"), Negative);
        set.push(OpinionKey::new("LAPTOP", "PRICE"), Positive);
        set.push(OpinionKey::new("DISPLAY", "QUALITY"), Positive);

        let labels = AggregatedLabels::from_opinions(&set);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.get(&OpinionKey::new("DISPLAY", "QUALITY")), Some(Conflict));
        assert_eq!(labels.get(&OpinionKey::new("LAPTOP", "PRICE")), Some(Positive));
    }

    #[test]
    fn test_every_mention_is_consumed() {
        // Two negatives outweigh one positive only if both are counted
        let mut set = OpinionSet::new();
        let key     = OpinionKey::new("OS", "USABILITY");
        set.push(key.clone(), Positive);
        set.push(key.clone(), Negative);
        set.push(key.clone(), Negative);

        assert_eq!(AggregatedLabels::from_opinions(&set).get(&key), Some(Negative));
    }

    #[test]
    fn test_absent_key_has_no_label() {
        let labels = AggregatedLabels::from_opinions(&OpinionSet::new());
        assert_eq!(labels.len(), 0);
        assert!(!labels.contains(&OpinionKey::new("CPU", "GENERAL")));
    }
}
