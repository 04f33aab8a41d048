// ============================================================
// Layer 4 - Markup Tag Tokenizer
// ============================================================
// A deliberately small, line-local tokenizer for the handful of
// tags SemEval-2016 files use. It is NOT an XML parser: there is
// no nesting validation, no entity decoding, and no namespaces.
//
// Given a line and a byte offset, `next_tag` returns the next
// tag at or after that offset:
//
//   <sentence id="1004293:0">   → Open        name="sentence"
//   </sentence>                 → Close       name="sentence"
//   <Opinion category="A#B" …/> → SelfClosing name="Opinion"
//   <?xml …?> / <!-- … -->      → skipped
//
// Attribute values are read from the raw attribute source on
// demand, between matching single or double quotes. A '>' inside
// a quoted value does not end the tag.
//
// Reference: Rust Book §8 (Strings, byte offsets and slicing)

/// How a tag opens or closes an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Open,
    Close,
    SelfClosing,
}

/// One tag found in a line. Offsets are byte offsets into that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    pub name: &'a str,
    pub kind: TagKind,
    /// Offset of the opening '<'
    pub start: usize,
    /// Offset just past the closing '>'
    pub end: usize,
    attrs: &'a str,
}

impl<'a> Tag<'a> {
    /// Value of the attribute `name`, if present and quoted.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        let src = self.attrs;

        for (at, _) in src.match_indices(name) {
            // Must be a whole attribute name, not a suffix of another
            let preceded_ok = src[..at]
                .chars()
                .next_back()
                .map_or(true, char::is_whitespace);
            if !preceded_ok {
                continue;
            }

            let rest = src[at + name.len()..].trim_start();
            let Some(rest) = rest.strip_prefix('=') else {
                continue;
            };
            let rest = rest.trim_start();

            let quote = match rest.chars().next() {
                Some(q @ ('"' | '\'')) => q,
                _ => return None,
            };
            let body = &rest[1..];
            return body.find(quote).map(|close| &body[..close]);
        }

        None
    }
}

/// Find the next tag in `line` starting at byte offset `from`.
///
/// Returns None when no further complete tag exists; a '<' with
/// no matching '>' later in the line ends the search.
pub fn next_tag(line: &str, from: usize) -> Option<Tag<'_>> {
    let mut pos = from;

    while pos < line.len() {
        let lt = pos + line[pos..].find('<')?;
        let gt = tag_end(line, lt)?;
        let inner = &line[lt + 1..gt];
        pos = gt + 1;

        // Processing instructions, comments, doctype
        if inner.starts_with('?') || inner.starts_with('!') {
            continue;
        }

        let (kind, body) = if let Some(name) = inner.strip_prefix('/') {
            (TagKind::Close, name)
        } else if let Some(body) = inner.strip_suffix('/') {
            (TagKind::SelfClosing, body)
        } else {
            (TagKind::Open, inner)
        };

        let body = body.trim();
        let (name, attrs) = match body.find(char::is_whitespace) {
            Some(split) => (&body[..split], &body[split..]),
            None => (body, ""),
        };

        // A bare '<' inside text, e.g. "a < b >"
        if name.is_empty() {
            continue;
        }

        return Some(Tag { name, kind, start: lt, end: pos, attrs });
    }

    None
}

/// Offset of the '>' closing the tag opened at `lt`.
///
/// A '>' inside a quoted attribute value does not close the tag. A quote
/// only opens a value right after '='; if it never closes, the first '>'
/// after `lt` is taken instead.
fn tag_end(line: &str, lt: usize) -> Option<usize> {
    let bytes = &line.as_bytes()[lt..];
    let mut quote: Option<u8> = None;
    let mut after_eq = false;

    for (i, &b) in bytes.iter().enumerate() {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'>' => return Some(lt + i),
                b'"' | b'\'' if after_eq => quote = Some(b),
                b'=' => after_eq = true,
                b if b.is_ascii_whitespace() => {}
                _ => after_eq = false,
            },
        }
    }

    line[lt..].find('>').map(|gt| lt + gt)
}
