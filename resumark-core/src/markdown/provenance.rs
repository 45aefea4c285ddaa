//! Source-line provenance for rendered block elements.
//!
//! The parser reports the byte range of every event. A [`LineIndex`] turns the
//! start of a block into a 1-based line, and each line is claimed by the first
//! (outermost) traceable block that starts on it. Claimed blocks are written
//! with `data-line="N"` and the `clickable-section` class.

use pulldown_cmark::{Alignment, CowStr, Event, Tag, TagEnd};
use resumark_types::SourceLine;
use std::collections::HashSet;
use std::ops::Range;

/// Maps byte offsets to 1-based line numbers and back
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset at which each line starts
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(idx, _)| idx + 1));
        Self {
            starts,
            len: text.len(),
        }
    }

    /// Line containing `offset`; offsets past the end map to the last line
    pub fn line_of(&self, offset: usize) -> SourceLine {
        let idx = match self.starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        SourceLine(idx + 1)
    }

    /// Byte offset at which `line` starts; out-of-range lines clamp to the
    /// end of the text
    pub fn offset_of(&self, line: SourceLine) -> usize {
        line.get()
            .checked_sub(1)
            .and_then(|idx| self.starts.get(idx))
            .copied()
            .unwrap_or(self.len)
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}

/// An event with the line its block starts on
#[derive(Debug, Clone)]
pub struct Annotated<'a> {
    pub event: Event<'a>,
    /// Line of the event's first byte; set for `Start` events only
    pub line: Option<SourceLine>,
    /// Whether this start tag carries the provenance of its line
    pub claimed: bool,
}

fn is_traceable(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Heading { .. } | Tag::Paragraph | Tag::Item | Tag::BlockQuote(_) | Tag::TableCell
    )
}

pub struct ProvenanceAnnotator<'i> {
    index: &'i LineIndex,
    exempt: &'i HashSet<usize>,
}

impl<'i> ProvenanceAnnotator<'i> {
    pub fn new(index: &'i LineIndex, exempt: &'i HashSet<usize>) -> Self {
        Self { index, exempt }
    }

    pub fn annotate<'a, I>(&self, events: I) -> Vec<Annotated<'a>>
    where
        I: IntoIterator<Item = (Event<'a>, Range<usize>)>,
    {
        let mut claimed_lines: HashSet<usize> = self.exempt.clone();

        events
            .into_iter()
            .map(|(event, range)| {
                let line = match &event {
                    Event::Start(_) => Some(self.index.line_of(range.start)),
                    _ => None,
                };
                let claimed = match (&event, line) {
                    (Event::Start(tag), Some(line)) if is_traceable(tag) => {
                        claimed_lines.insert(line.get())
                    }
                    _ => false,
                };
                Annotated {
                    event,
                    line,
                    claimed,
                }
            })
            .collect()
    }
}

/// Writes claimed start tags as raw HTML carrying their line.
///
/// Table cells need the same head/body and alignment bookkeeping the HTML
/// writer keeps, since the cell's end tag is still written by it.
#[derive(Default)]
pub struct TraceableTags {
    alignments: Vec<Alignment>,
    in_head: bool,
    cell_index: usize,
}

impl TraceableTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve<'a>(&mut self, events: Vec<Annotated<'a>>) -> Vec<Event<'a>> {
        events
            .into_iter()
            .map(|annotated| self.resolve_one(annotated))
            .collect()
    }

    fn resolve_one<'a>(&mut self, annotated: Annotated<'a>) -> Event<'a> {
        let Annotated {
            event,
            line,
            claimed,
        } = annotated;

        let cell_index = self.cell_index;
        match &event {
            Event::Start(Tag::Table(alignments)) => self.alignments = alignments.clone(),
            Event::Start(Tag::TableHead) => {
                self.in_head = true;
                self.cell_index = 0;
            }
            Event::End(TagEnd::TableHead) => self.in_head = false,
            Event::Start(Tag::TableRow) => self.cell_index = 0,
            Event::End(TagEnd::TableCell) => self.cell_index += 1,
            _ => {}
        }

        let line = match line {
            Some(line) if claimed => line,
            _ => return event,
        };

        let attrs = format!(r#" data-line="{}" class="clickable-section""#, line);
        let html = match &event {
            Event::Start(Tag::Heading { level, .. }) => format!("<{}{}>", level, attrs),
            Event::Start(Tag::Paragraph) => format!("<p{}>", attrs),
            Event::Start(Tag::Item) => format!("<li{}>", attrs),
            Event::Start(Tag::BlockQuote(_)) => format!("<blockquote{}>\n", attrs),
            Event::Start(Tag::TableCell) => {
                let name = if self.in_head { "th" } else { "td" };
                let align = match self.alignments.get(cell_index) {
                    Some(Alignment::Left) => r#" style="text-align: left""#,
                    Some(Alignment::Center) => r#" style="text-align: center""#,
                    Some(Alignment::Right) => r#" style="text-align: right""#,
                    _ => "",
                };
                format!("<{}{}{}>", name, attrs, align)
            }
            _ => return event,
        };

        Event::Html(CowStr::from(html))
    }
}
