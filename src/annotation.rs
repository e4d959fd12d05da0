//! Contains the iterator that extracts `[text|reading]` annotations from a sentence.

const OPEN: char = '[';
const SEPARATOR: char = '|';
const CLOSE: char = ']';

/// A `(text, reading)` pair embedded in a sentence as `[text|reading]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Annotation<'a> {
    /// The annotated text, one or more symbols.
    pub text: &'a str,
    /// The reading claimed for the text. May be empty.
    pub reading: &'a str,
    /// Byte offset of the opening bracket in the sentence.
    pub position: usize,
    /// Index of the annotation among the annotations of the sentence.
    pub index: usize,
}

/// Returns an iterator over the well-formed annotations in the sentence, left to right.
pub fn annotations(sentence: &str) -> Annotations<'_> {
    Annotations::new(sentence)
}

/// Iterator over a sentence's annotations.
///
/// Malformed brackets are skipped: scanning resumes right after a `[` that does not start
/// a well-formed annotation, so for `[a[b|c]|d]` only `[b|c]` is produced.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Annotations<'a> {
    sentence: &'a str,
    // byte offset of the unscanned rest of the sentence
    offset: usize,
    index: usize,
}

impl<'a> Annotations<'a> {
    pub fn new(sentence: &'a str) -> Self {
        Self {
            sentence,
            offset: 0,
            index: 0,
        }
    }
}

impl<'a> Iterator for Annotations<'a> {
    type Item = Annotation<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rest = &self.sentence[self.offset..];
            let open = self.offset + rest.find(OPEN)?;
            let body_start = open + OPEN.len_utf8();
            match parse_body(&self.sentence[body_start..]) {
                Some((text, reading, consumed)) => {
                    self.offset = body_start + consumed;
                    let annotation = Annotation {
                        text,
                        reading,
                        position: open,
                        index: self.index,
                    };
                    self.index += 1;
                    return Some(annotation);
                }
                None => {
                    // not an annotation, keep looking after this bracket
                    self.offset = body_start;
                }
            }
        }
    }
}

// parses `text|reading]` and returns the text, the reading and the number of bytes consumed
fn parse_body(body: &str) -> Option<(&str, &str, usize)> {
    let separator = body.find(|c: char| matches!(c, OPEN | SEPARATOR | CLOSE))?;
    if separator == 0 || !body[separator..].starts_with(SEPARATOR) {
        // empty text, or a bracket inside the text
        return None;
    }
    let text = &body[..separator];

    let reading_start = separator + SEPARATOR.len_utf8();
    let reading_rest = &body[reading_start..];
    let close = reading_rest.find(|c: char| matches!(c, OPEN | SEPARATOR | CLOSE))?;
    if !reading_rest[close..].starts_with(CLOSE) {
        return None;
    }
    let reading = &reading_rest[..close];

    Some((text, reading, reading_start + close + CLOSE.len_utf8()))
}
