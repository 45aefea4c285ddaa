//! Semantic output for the delimited tags.
//!
//! Accent and highlight tags are applied to source lines before parsing, so a
//! tag may wrap bold text, code or links. Code spans are masked while the
//! tags are matched and restored verbatim afterwards.

use crate::grammar::{apply_tags, contains_tag, TagKind, TagStrategy};
use std::ops::Range;

/// Renders tags as the elements and classes the stylesheet knows.
///
/// Text is written as is: the output is either fed back to the CommonMark
/// parser or already holds substituted markup.
pub struct SemanticTags;

impl TagStrategy for SemanticTags {
    fn tag(&self, out: &mut String, kind: TagKind, inner: &str) {
        let (open, close) = match kind {
            TagKind::Highlight => (r#"<span class="tag-highlight">"#, "</span>"),
            TagKind::AccentA => (r#"<span class="tag-purple">"#, "</span>"),
            TagKind::AccentB => (r#"<span class="tag-green">"#, "</span>"),
            TagKind::AccentC => (r#"<span class="tag-blue">"#, "</span>"),
            TagKind::Code => ("<code>", "</code>"),
            TagKind::Bold => ("<strong>", "</strong>"),
        };
        out.push_str(open);
        out.push_str(inner);
        out.push_str(close);
    }
}

// Private-use code points never collide with a delimiter.
const MASK_OPEN: char = '\u{E000}';
const MASK_CLOSE: char = '\u{E001}';

/// Apply the accent and highlight tags to one source line, outside code spans.
///
/// Bold and inline code are left for the parser.
pub fn apply_accents(line: &str) -> String {
    if !contains_tag(line, &TagKind::ACCENTS) {
        return line.to_string();
    }

    let spans = code_spans(line);
    let mut masked = String::with_capacity(line.len());
    let mut last = 0;
    for (n, span) in spans.iter().enumerate() {
        masked.push_str(&line[last..span.start]);
        masked.push_str(&format!("{}{}{}", MASK_OPEN, n, MASK_CLOSE));
        last = span.end;
    }
    masked.push_str(&line[last..]);

    let mut html = apply_tags(&masked, &TagKind::ACCENTS, &SemanticTags);
    for (n, span) in spans.iter().enumerate() {
        html = html.replacen(
            &format!("{}{}{}", MASK_OPEN, n, MASK_CLOSE),
            &line[span.clone()],
            1,
        );
    }
    html
}

/// Byte ranges of the inline code spans of a line, backticks included.
///
/// A run of backticks opens a span closed by the next run of the same length;
/// an unmatched run is literal.
fn code_spans(line: &str) -> Vec<Range<usize>> {
    let bytes = line.as_bytes();
    let mut runs = Vec::new();
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx] == b'`' {
            let start = idx;
            while idx < bytes.len() && bytes[idx] == b'`' {
                idx += 1;
            }
            runs.push(start..idx);
        } else {
            idx += 1;
        }
    }

    let mut spans = Vec::new();
    let mut next = 0;
    while next < runs.len() {
        let open = &runs[next];
        let closing = runs[next + 1..]
            .iter()
            .position(|run| run.len() == open.len());
        match closing {
            Some(offset) => {
                spans.push(open.start..runs[next + 1 + offset].end);
                next += offset + 2;
            }
            None => next += 1,
        }
    }
    spans
}

pub(crate) fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
