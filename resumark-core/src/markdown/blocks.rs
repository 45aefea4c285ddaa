//! Grouping of annotated events into top-level blocks.

use super::provenance::Annotated;
use crate::columns::strip_markup;
use pulldown_cmark::{Event, HeadingLevel, Tag, TagEnd};
use resumark_types::BlockKind;

/// Split an event stream into its top-level blocks, in order
pub fn split_top_level(events: Vec<Annotated<'_>>) -> Vec<Vec<Annotated<'_>>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    let mut depth = 0usize;

    for annotated in events {
        match annotated.event {
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }
        current.push(annotated);
        if depth == 0 {
            blocks.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Kind of a top-level block from its opening event
pub fn block_kind(events: &[Annotated<'_>]) -> BlockKind {
    match events.first().map(|a| &a.event) {
        Some(Event::Start(Tag::Heading { level, .. })) => match level {
            HeadingLevel::H1 => BlockKind::Heading1,
            HeadingLevel::H2 => BlockKind::Heading2,
            HeadingLevel::H3 => BlockKind::Heading3,
            _ => BlockKind::Other,
        },
        Some(Event::Start(Tag::Paragraph)) => BlockKind::Paragraph,
        Some(Event::Start(Tag::List(_))) => BlockKind::List,
        Some(Event::Start(Tag::Item)) => BlockKind::ListItem,
        Some(Event::Start(Tag::BlockQuote(_))) => BlockKind::Quote,
        Some(Event::Start(Tag::Table(_))) => BlockKind::Table,
        Some(Event::Start(Tag::HtmlBlock)) | Some(Event::Html(_)) => html_kind(events),
        _ => BlockKind::Other,
    }
}

fn html_kind(events: &[Annotated<'_>]) -> BlockKind {
    let raw: String = events
        .iter()
        .filter_map(|a| match &a.event {
            Event::Html(html) => Some(html.as_ref()),
            _ => None,
        })
        .collect();

    if raw.contains("flex-layout") {
        BlockKind::FlexRow
    } else if raw.trim_start().starts_with(r#"<img class="resume-avatar""#) {
        BlockKind::Avatar
    } else {
        BlockKind::Other
    }
}

/// Visible text of a block, whitespace collapsed
pub fn plain_text(events: &[Annotated<'_>]) -> String {
    let mut raw = String::new();

    for annotated in events {
        match &annotated.event {
            Event::Text(text) | Event::Code(text) | Event::InlineHtml(text) => {
                raw.push_str(text)
            }
            Event::Html(html) => {
                raw.push(' ');
                raw.push_str(html);
                raw.push(' ');
            }
            Event::SoftBreak | Event::HardBreak => raw.push(' '),
            Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::TableCell,
            ) => raw.push(' '),
            _ => {}
        }
    }

    strip_markup(&raw)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
