// ============================================================
// Layer 3 - Polarity Values
// ============================================================
// SemEval-2016 annotates each opinion with one of four raw
// polarity strings. They are normalised into the Polarity enum
// ("quantified") as soon as the scanner reads them:
//
//   raw string   Polarity     score
//   ----------   ----------   -----
//   positive     Positive      +1
//   negative     Negative      -1
//   neutral      Neutral        0
//   conflict     Conflict       0  (counts as mixed)
//
// When a sentence mentions the same (target, aspect) several
// times, the mentions are reduced to one label by `aggregate`:
//
//   net = #Positive - #Negative
//   net > 0                          → positive
//   net < 0                          → negative
//   net = 0 and any Positive/Conflict → conflict
//   otherwise                         → neutral
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use std::fmt;

/// Label written for candidate pairs that have no opinion.
pub const NONE_LABEL: &str = "none";

/// Normalised sentiment of one opinion mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
    Conflict,
}

impl Polarity {
    /// Map a raw `polarity="..."` value to a Polarity.
    /// Matching ignores ASCII case and surrounding whitespace.
    /// Returns None for anything that is not one of the four labels.
    pub fn quantify(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        [Self::Positive, Self::Negative, Self::Neutral, Self::Conflict]
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(raw))
    }

    /// Signed contribution to the aggregation sum
    pub fn score(self) -> i32 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1,
            Self::Neutral | Self::Conflict => 0,
        }
    }

    /// The label string written to the output file
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral  => "neutral",
            Self::Conflict => "conflict",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reduce every mention of one (target, aspect) key to one label.
///
/// `mentions` is never empty in practice: a key only exists once at
/// least one mention was recorded. An empty slice yields Neutral.
pub fn aggregate(mentions: &[Polarity]) -> Polarity {
    let net: i32 = mentions.iter().map(|p| p.score()).sum();

    if net > 0 {
        return Polarity::Positive;
    }
    if net < 0 {
        return Polarity::Negative;
    }

    // Balanced sum: positives cancelled out negatives, or an
    // annotator already marked the mention as conflicting
    let mixed = mentions
        .iter()
        .any(|p| matches!(p, Polarity::Positive | Polarity::Conflict));

    if mixed {
        Polarity::Conflict
    } else {
        Polarity::Neutral
    }
}
