// ============================================================
// Layer 4 - Label Expander (NLI-M rows)
// ============================================================
// Turns one sentence into one row per candidate (target, aspect)
// pair of its domain, in enumeration order:
//
//   pair has an aggregated label → `duplication` identical rows
//   pair has no label            → one row labelled "none"
//
// Example (duplication = 3, pairs = [A-X, A-Y, B-X], A-Y positive):
//
//   101  none      A-X  text
//   101  positive  A-Y  text
//   101  positive  A-Y  text
//   101  positive  A-Y  text
//   101  none      B-X  text
//
// With the default factor of 40 a sentence produces
//   (|pairs| - matched) + 40 × matched
// rows, where `matched` counts pairs that have a label.
//
// Rows are produced lazily and borrow from the record, the
// labels, and the vocabulary, so nothing is copied per row.
//
// Reference: Rust Book §13 (Implementing the Iterator trait)

use std::slice;

use crate::data::aggregator::AggregatedLabels;
use crate::domain::polarity::NONE_LABEL;
use crate::domain::record::{OpinionKey, OutputRow, Record};
use crate::domain::vocabulary::CandidatePair;

/// Rows written per labelled pair unless configured otherwise
pub const DEFAULT_DUPLICATION: usize = 40;

/// Cross-joins sentences with one domain's candidate pairs.
#[derive(Debug, Clone, Copy)]
pub struct LabelExpander<'v> {
    pairs:       &'v [CandidatePair],
    duplication: usize,
}

impl<'v> LabelExpander<'v> {
    /// # Panics
    /// Panics if `duplication` is zero, which would silently drop
    /// every labelled row from the output.
    pub fn new(pairs: &'v [CandidatePair], duplication: usize) -> Self {
        assert!(duplication > 0, "duplication factor must be at least 1");
        Self { pairs, duplication }
    }

    /// Lazily produce every output row of one sentence
    pub fn expand<'a>(&self, record: &'a Record, labels: &'a AggregatedLabels) -> Expansion<'a>
    where
        'v: 'a,
    {
        Expansion {
            record,
            labels,
            pairs:       self.pairs.iter(),
            duplication: self.duplication,
            current:     None,
            remaining:   0,
        }
    }

    /// Whether `key` is one of this domain's candidate pairs
    pub fn is_candidate(&self, key: &OpinionKey) -> bool {
        self.pairs.iter().any(|p| &p.key == key)
    }

    /// How many candidate pairs have a label
    pub fn matched(&self, labels: &AggregatedLabels) -> usize {
        self.pairs.iter().filter(|p| labels.contains(&p.key)).count()
    }

    /// Exact number of rows `expand` yields for these labels
    pub fn row_count(&self, labels: &AggregatedLabels) -> usize {
        let matched = self.matched(labels);
        (self.pairs.len() - matched) + self.duplication * matched
    }
}

/// Iterator returned by [`LabelExpander::expand`].
#[derive(Debug, Clone)]
pub struct Expansion<'a> {
    record:      &'a Record,
    labels:      &'a AggregatedLabels,
    pairs:       slice::Iter<'a, CandidatePair>,
    duplication: usize,
    current:     Option<OutputRow<'a>>,
    remaining:   usize,
}

impl<'a> Iterator for Expansion<'a> {
    type Item = OutputRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.remaining > 0 {
                self.remaining -= 1;
                return self.current;
            }

            let record: &'a Record = self.record;
            let pair = self.pairs.next()?;
            let (label, repeats) = match self.labels.get(&pair.key) {
                Some(polarity) => (polarity.as_str(), self.duplication),
                None => (NONE_LABEL, 1),
            };

            self.current = Some(OutputRow {
                id:    &record.id,
                label,
                pair:  &pair.joined,
                text:  &record.text,
            });
            self.remaining = repeats;
        }
    }
}
