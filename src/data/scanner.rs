// ============================================================
// Layer 4 - Record Scanner
// ============================================================
// Walks the lines of one SemEval-2016 file exactly once and
// yields a ScannedRecord for every <sentence> element.
//
// The scanner is an explicit two-state machine driven by the
// tags found on each line:
//
//                 <sentence id=…>
//     Outside  ───────────────────▶  InsideRecord
//        ▲                               │  <text>…</text> → text (last wins)
//        │         </sentence>           │  <Opinion …/>   → opinion multiset
//        └───────────────────────────────┘
//
// Anything outside a record is ignored. Malformed constructs are
// reported as ScanAnomaly values:
//   - best-effort mode (default): log a warning, keep scanning
//   - strict mode: stop and return the anomaly as an error
//
// The iterator is lazy and finite; once it returns an error or
// runs out of lines it keeps returning None.
//
// Reference: Rust Book §13 (Iterators), §17 (State pattern)
//            thiserror crate documentation

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::mem;

use thiserror::Error;

use crate::data::markup::{self, Tag, TagKind};
use crate::domain::polarity::Polarity;
use crate::domain::record::{OpinionKey, OpinionSet, Record, ScannedRecord};

const SENTENCE_TAG: &str = "sentence";
const TEXT_TAG:     &str = "text";
const TEXT_CLOSE:   &str = "</text>";
const OPINION_TAG:  &str = "Opinion";

/// What was wrong with a piece of markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnomalyKind {
    #[error("sentence has no id attribute")]
    MissingId,
    #[error("sentence starts inside another sentence")]
    NestedRecord,
    #[error("<text> is not closed on the same line")]
    UnclosedText,
    #[error("opinion has no category attribute")]
    MissingCategory,
    #[error("opinion category '{0}' has no '#' between target and aspect")]
    MissingAspectSeparator(String),
    #[error("opinion has no polarity attribute")]
    MissingPolarity,
    #[error("unrecognised polarity '{0}'")]
    UnknownPolarity(String),
    #[error("sentence ended without a <text> element")]
    MissingText,
    #[error("input ended inside an unterminated sentence")]
    UnterminatedRecord,
}

/// A malformed construct together with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ScanAnomaly {
    pub line: usize,
    pub kind: AnomalyKind,
}

/// Why scanning stopped early.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("malformed markup at {0}")]
    Malformed(#[from] ScanAnomaly),
}

/// A sentence whose end tag has not been seen yet
#[derive(Debug)]
struct PartialRecord {
    id:       String,
    text:     Option<String>,
    opinions: OpinionSet,
}

#[derive(Debug)]
enum ScanState {
    Outside,
    InsideRecord(PartialRecord),
}

/// Lazy, single-pass iterator of ScannedRecords over a line source.
pub struct RecordScanner<L> {
    lines:     L,
    line_no:   usize,
    state:     ScanState,
    ready:     VecDeque<ScannedRecord>,
    strict:    bool,
    source:    String,
    anomalies: Vec<ScanAnomaly>,
    finished:  bool,
}

impl<R: BufRead> RecordScanner<io::Lines<R>> {
    /// Scan the lines of a buffered reader
    pub fn from_reader(reader: R) -> Self {
        Self::new(reader.lines())
    }
}

impl<L> RecordScanner<L>
where
    L: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: L) -> Self {
        Self {
            lines,
            line_no:   0,
            state:     ScanState::Outside,
            ready:     VecDeque::new(),
            strict:    false,
            source:    "<input>".to_string(),
            anomalies: Vec::new(),
            finished:  false,
        }
    }

    /// Turn every anomaly into a hard error
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Name used in log messages (usually the input file name)
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Anomalies tolerated so far in best-effort mode
    pub fn anomalies(&self) -> &[ScanAnomaly] {
        &self.anomalies
    }

    fn inside(&self) -> bool {
        matches!(self.state, ScanState::InsideRecord(_))
    }

    fn current(&mut self) -> Option<&mut PartialRecord> {
        match &mut self.state {
            ScanState::InsideRecord(partial) => Some(partial),
            ScanState::Outside => None,
        }
    }

    /// Record an anomaly on the current line.
    /// Strict mode returns it as an error instead.
    fn note(&mut self, kind: AnomalyKind) -> Result<(), ScanAnomaly> {
        let anomaly = ScanAnomaly { line: self.line_no, kind };
        if self.strict {
            return Err(anomaly);
        }
        tracing::warn!("{}:{}: {}", self.source, anomaly.line, anomaly.kind);
        self.anomalies.push(anomaly);
        Ok(())
    }

    /// Feed one line through the state machine
    fn scan_line(&mut self, line: &str) -> Result<(), ScanAnomaly> {
        let mut pos = 0;
        while let Some(tag) = markup::next_tag(line, pos) {
            pos = self.handle_tag(line, &tag)?;
        }
        Ok(())
    }

    /// Apply one tag and return the offset to resume scanning from
    fn handle_tag(&mut self, line: &str, tag: &Tag<'_>) -> Result<usize, ScanAnomaly> {
        match (tag.name, tag.kind) {
            (SENTENCE_TAG, TagKind::Open | TagKind::SelfClosing) => {
                self.start_record(tag)?;
                if tag.kind == TagKind::SelfClosing {
                    self.finish_record()?;
                }
            }
            (SENTENCE_TAG, TagKind::Close) => {
                // A stray close outside any record is ignored
                if self.inside() {
                    self.finish_record()?;
                }
            }
            (TEXT_TAG, TagKind::Open) if self.inside() => {
                let content = &line[tag.end..];
                match content.find(TEXT_CLOSE) {
                    Some(close) => {
                        let text = content[..close].to_string();
                        if let Some(partial) = self.current() {
                            partial.text = Some(text);
                        }
                        return Ok(tag.end + close + TEXT_CLOSE.len());
                    }
                    None => self.note(AnomalyKind::UnclosedText)?,
                }
            }
            (OPINION_TAG, TagKind::Open | TagKind::SelfClosing) if self.inside() => {
                self.add_opinion(tag)?;
            }
            _ => {}
        }
        Ok(tag.end)
    }

    fn start_record(&mut self, tag: &Tag<'_>) -> Result<(), ScanAnomaly> {
        if self.inside() {
            return self.note(AnomalyKind::NestedRecord);
        }

        let id = match tag.attr("id") {
            Some(id) => id.to_string(),
            None => {
                self.note(AnomalyKind::MissingId)?;
                String::new()
            }
        };

        self.state = ScanState::InsideRecord(PartialRecord {
            id,
            text:     None,
            opinions: OpinionSet::new(),
        });
        Ok(())
    }

    fn add_opinion(&mut self, tag: &Tag<'_>) -> Result<(), ScanAnomaly> {
        let Some(category) = tag.attr("category") else {
            return self.note(AnomalyKind::MissingCategory);
        };
        let Some(key) = OpinionKey::from_category(category) else {
            return self.note(AnomalyKind::MissingAspectSeparator(category.to_string()));
        };
        let Some(raw) = tag.attr("polarity") else {
            return self.note(AnomalyKind::MissingPolarity);
        };
        let Some(polarity) = Polarity::quantify(raw) else {
            return self.note(AnomalyKind::UnknownPolarity(raw.to_string()));
        };

        if let ScanState::InsideRecord(partial) = &self.state {
            if partial.text.is_none() {
                tracing::debug!(
                    "{}:{}: opinion {}#{} precedes the text of sentence '{}'",
                    self.source,
                    self.line_no,
                    key.target,
                    key.aspect,
                    partial.id
                );
            }
        }
        if let Some(partial) = self.current() {
            partial.opinions.push(key, polarity);
        }
        Ok(())
    }

    fn finish_record(&mut self) -> Result<(), ScanAnomaly> {
        let ScanState::InsideRecord(partial) = mem::replace(&mut self.state, ScanState::Outside)
        else {
            return Ok(());
        };

        let text = match partial.text {
            Some(text) => text,
            None => {
                self.note(AnomalyKind::MissingText)?;
                String::new()
            }
        };

        tracing::debug!(
            "{}: sentence '{}' with {} opinion key(s)",
            self.source,
            partial.id,
            partial.opinions.len()
        );

        self.ready.push_back(ScannedRecord {
            record:   Record::new(partial.id, text),
            opinions: partial.opinions,
        });
        Ok(())
    }
}

impl<L> Iterator for RecordScanner<L>
where
    L: Iterator<Item = io::Result<String>>,
{
    type Item = Result<ScannedRecord, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.ready.pop_front() {
                return Some(Ok(record));
            }
            if self.finished {
                return None;
            }

            match self.lines.next() {
                Some(Ok(line)) => {
                    self.line_no += 1;
                    if let Err(anomaly) = self.scan_line(&line) {
                        self.finished = true;
                        return Some(Err(anomaly.into()));
                    }
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
                None => {
                    self.finished = true;
                    if self.inside() {
                        // The unfinished record is dropped either way
                        self.state = ScanState::Outside;
                        if let Err(anomaly) = self.note(AnomalyKind::UnterminatedRecord) {
                            return Some(Err(anomaly.into()));
                        }
                    }
                }
            }
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use Polarity::*;

    fn scan(input: &str) -> (Vec<ScannedRecord>, Vec<ScanAnomaly>) {
        let mut scanner = RecordScanner::from_reader(input.as_bytes());
        let records = scanner
            .by_ref()
            .collect::<Result<Vec<_>, _>>()
            .expect("best-effort scan never fails on in-memory input");
        (records, scanner.anomalies().to_vec())
    }

    fn scan_strict(input: &str) -> Result<Vec<ScannedRecord>, ScanError> {
        RecordScanner::from_reader(input.as_bytes())
            .strict(true)
            .collect()
    }

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Reviews>
    <Review rid="79">
        <sentences>
            <sentence id="79:0">
                <text>This computer is really fast and I'm shocked as to how easy it is to get used to...</text>
                <Opinions>
                    <Opinion category="LAPTOP#OPERATION_PERFORMANCE" polarity="positive"/>
                    <Opinion category="LAPTOP#USABILITY" polarity="positive"/>
                </Opinions>
            </sentence>
            <sentence id="79:1">
                <text>The screen is dim but the keyboard is fine.</text>
                <Opinions>
                    <Opinion category="DISPLAY#QUALITY" polarity="negative"/>
                    <Opinion category="DISPLAY#QUALITY" polarity="positive"/>
                </Opinions>
            </sentence>
        </sentences>
    </Review>
</Reviews>
"#;

    #[test]
    fn test_scans_well_formed_file() {
        let (records, anomalies) = scan(SAMPLE);
        assert!(anomalies.is_empty());
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.record.id, "79:0");
        assert!(first.record.text.starts_with("This computer is really fast"));
        assert_eq!(first.opinions.len(), 2);
        assert_eq!(
            first.opinions.get(&OpinionKey::new("LAPTOP", "USABILITY")),
            Some(&[Positive][..])
        );
    }

    #[test]
    fn test_repeated_key_keeps_every_mention() {
        let (records, _) = scan(SAMPLE);
        assert_eq!(
            records[1].opinions.get(&OpinionKey::new("DISPLAY", "QUALITY")),
            Some(&[Negative, Positive][..])
        );
    }

    #[test]
    fn test_last_text_wins() {
        let input = "<sentence id=\"1\">\n<text>first</text>\n<text>second</text>\n</sentence>\n";
        let (records, _) = scan(input);
        assert_eq!(records[0].record.text, "second");
    }

    #[test]
    fn test_text_is_kept_raw() {
        let input = "<sentence id=\"1\">\n<text>Tom &amp; Jerry's  laptop</text>\n</sentence>\n";
        let (records, _) = scan(input);
        assert_eq!(records[0].record.text, "Tom &amp; Jerry's  laptop");
    }

    #[test]
    fn test_single_line_record() {
        let input = r#"<sentence id="7"><text>ok</text><Opinion category="OS#GENERAL" polarity="neutral"/></sentence>"#;
        let (records, anomalies) = scan(input);
        assert!(anomalies.is_empty());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record, Record::new("7", "ok"));
        assert_eq!(records[0].opinions.len(), 1);
    }

    #[test]
    fn test_lines_outside_records_are_ignored() {
        let input = "<Opinion category=\"OS#GENERAL\" polarity=\"positive\"/>\n<text>stray</text>\n";
        let (records, anomalies) = scan(input);
        assert!(records.is_empty());
        assert!(anomalies.is_empty());
    }

    #[test]
    fn test_blank_lines_do_not_stop_scanning() {
        let input = "<sentence id=\"1\">\n\n<text>a</text>\n</sentence>\n\n<sentence id=\"2\">\n<text>b</text>\n</sentence>\n";
        let (records, _) = scan(input);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let (records, anomalies) = scan("");
        assert!(records.is_empty());
        assert!(anomalies.is_empty());
    }

    #[test]
    fn test_malformed_opinions_are_skipped_and_reported() {
        let input = r#"<sentence id="3">
<text>mixed bag</text>
<Opinion polarity="positive"/>
<Opinion category="LAPTOP" polarity="positive"/>
<Opinion category="LAPTOP#PRICE"/>
<Opinion category="LAPTOP#PRICE" polarity="great"/>
<Opinion category="LAPTOP#PRICE" polarity="negative"/>
</sentence>"#;
        let (records, anomalies) = scan(input);

        assert_eq!(records[0].opinions.len(), 1);
        let kinds: Vec<_> = anomalies.iter().map(|a| (a.line, a.kind.clone())).collect();
        assert_eq!(
            kinds,
            vec![
                (3, AnomalyKind::MissingCategory),
                (4, AnomalyKind::MissingAspectSeparator("LAPTOP".to_string())),
                (5, AnomalyKind::MissingPolarity),
                (6, AnomalyKind::UnknownPolarity("great".to_string())),
            ]
        );
    }

    #[test]
    fn test_missing_text_yields_empty_text() {
        let (records, anomalies) = scan("<sentence id=\"4\">\n</sentence>\n");
        assert_eq!(records[0].record.text, "");
        assert_eq!(anomalies[0].kind, AnomalyKind::MissingText);
    }

    #[test]
    fn test_unterminated_record_is_dropped() {
        let (records, anomalies) = scan("<sentence id=\"5\">\n<text>cut</text>\n");
        assert!(records.is_empty());
        assert_eq!(anomalies[0].kind, AnomalyKind::UnterminatedRecord);
    }

    #[test]
    fn test_nested_start_keeps_outer_record() {
        let input = "<sentence id=\"a\">\n<sentence id=\"b\">\n<text>t</text>\n</sentence>\n";
        let (records, anomalies) = scan(input);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record.id, "a");
        assert_eq!(anomalies[0].kind, AnomalyKind::NestedRecord);
    }

    #[test]
    fn test_missing_id_keeps_record_with_empty_id() {
        let (records, anomalies) = scan("<sentence>\n<text>no id</text>\n</sentence>\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record, Record::new("", "no id"));
        let kinds: Vec<_> = anomalies.iter().map(|a| a.kind.clone()).collect();
        assert_eq!(kinds, vec![AnomalyKind::MissingId]);
    }

    #[test]
    fn test_unclosed_text_is_ignored() {
        let input = "<sentence id=\"6\">\n<text>runs off the line\n</sentence>\n";
        let (records, anomalies) = scan(input);
        assert_eq!(records[0].record.text, "");
        let kinds: Vec<_> = anomalies.iter().map(|a| (a.line, a.kind.clone())).collect();
        assert_eq!(
            kinds,
            vec![(2, AnomalyKind::UnclosedText), (3, AnomalyKind::MissingText)]
        );
    }

    #[test]
    fn test_opinion_before_text_is_kept() {
        let input = r#"<sentence id="8">
<Opinion category="LAPTOP#PRICE" polarity="negative"/>
<text>late</text>
</sentence>"#;
        let (records, anomalies) = scan(input);
        assert!(anomalies.is_empty());
        assert_eq!(records[0].record.text, "late");
        assert_eq!(
            records[0].opinions.get(&OpinionKey::new("LAPTOP", "PRICE")),
            Some(&[Negative][..])
        );
    }

    #[test]
    fn test_gt_inside_attribute_value_keeps_opinion() {
        let input = r#"<sentence id="9">
<text>t</text>
<Opinion target="a > b" category="OS#GENERAL" polarity="positive"/>
</sentence>"#;
        let (records, anomalies) = scan(input);
        assert!(anomalies.is_empty());
        assert_eq!(
            records[0].opinions.get(&OpinionKey::new("OS", "GENERAL")),
            Some(&[Positive][..])
        );
    }

    #[test]
    fn test_id_stops_at_closing_quote() {
        let (records, _) = scan("<sentence id=\"1022:5\" OutOfScope=\"TRUE\">\n<text>x</text>\n</sentence>\n");
        assert_eq!(records[0].record.id, "1022:5");
    }

    #[test]
    fn test_strict_mode_stops_at_first_anomaly() {
        let input = "<sentence id=\"1\">\n<text>t</text>\n<Opinion category=\"X\" polarity=\"positive\"/>\n</sentence>\n";
        let err = scan_strict(input).unwrap_err();
        match err {
            ScanError::Malformed(anomaly) => {
                assert_eq!(anomaly.line, 3);
                assert_eq!(anomaly.kind, AnomalyKind::MissingAspectSeparator("X".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_mode_accepts_well_formed_input() {
        assert_eq!(scan_strict(SAMPLE).unwrap().len(), 2);
    }
}
