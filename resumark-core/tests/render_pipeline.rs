//! Integration tests for the rendering pipeline
//!
//! These tests run whole documents through rendering, highlighting and
//! pagination together.

use regex::Regex;
use resumark_core::{
    highlight, paginate, render, render_blocks, BlockKind, Config, EstimatedMetrics, LineIndex,
    MarkdownRenderer, PageLayout, SourceLine,
};
use std::collections::HashSet;

const RESUME: &str = "@avatar{/me.jpg}

> @icon{phone} 123-4567 | @icon{email} me@example.com

# Title

## Work

- item
- second ~~tag~~

@flex{**A**|B|C|2024}

First line
second line";

fn data_lines(html: &str) -> Vec<usize> {
    Regex::new(r#"data-line="(\d+)""#)
        .unwrap()
        .captures_iter(html)
        .map(|caps| caps[1].parse().unwrap())
        .collect()
}

#[test]
fn test_heading_and_list_item_provenance() {
    let html = render(RESUME, None);
    assert!(html.contains(r#"<h1 data-line="5" class="clickable-section">Title</h1>"#));
    assert!(html.contains(r#"<h2 data-line="7" class="clickable-section">Work</h2>"#));
    assert!(html.contains(r#"<li data-line="9" class="clickable-section">item</li>"#));
    assert!(html.contains(
        r#"<li data-line="10" class="clickable-section">second <span class="tag-blue">tag</span></li>"#
    ));
}

#[test]
fn test_quote_and_flex_provenance() {
    let html = render(RESUME, None);
    assert!(html.contains(r#"<blockquote data-line="3" class="clickable-section">"#));
    assert!(html.contains(r#"<div class="flex-layout clickable-section" data-line="12">"#));
}

#[test]
fn test_second_paragraph_line_loses_provenance() {
    let html = render(RESUME, None);
    assert!(html.contains(r#"<p data-line="14" class="clickable-section">First line<br />"#));
    assert!(!data_lines(&html).contains(&15));
}

#[test]
fn test_avatar_line_has_no_provenance() {
    let html = render(RESUME, None);
    assert!(!data_lines(&html).contains(&1));
    assert!(html.starts_with(r#"<img class="resume-avatar" src="/me.jpg" alt="avatar" />"#));
}

#[test]
fn test_each_line_maps_to_one_element() {
    let html = render(RESUME, None);
    let lines = data_lines(&html);
    let unique: HashSet<_> = lines.iter().collect();
    assert_eq!(lines.len(), unique.len());
    assert_eq!(lines, vec![3, 5, 7, 9, 10, 12, 14]);

    // A flex row inside a list item or paragraph belongs to that block.
    for source in ["- @flex{a|b|c|d}", "Role @flex{a|b|c|d}", "@flex{a|b|c|d} @flex{e|f|g|h}"] {
        let html = render(source, None);
        assert_eq!(data_lines(&html), vec![1], "{}", source);
    }
}

#[test]
fn test_rendering_is_pure() {
    assert_eq!(render(RESUME, None), render(RESUME, None));
    assert_eq!(highlight(RESUME), highlight(RESUME));

    let joined: String = render_blocks(RESUME, None)
        .into_iter()
        .map(|b| b.html)
        .collect();
    assert_eq!(joined, render(RESUME, None));
}

#[test]
fn test_same_delimiter_tags_never_merge() {
    let html = render("~~a~~ text ~~b~~", None);
    assert!(html.contains(
        r#"<span class="tag-blue">a</span> text <span class="tag-blue">b</span>"#
    ));

    let highlighted = highlight("~~a~~ text ~~b~~");
    assert_eq!(highlighted.matches("hl-tag-red").count(), 2);
}

#[test]
fn test_unknown_constructs_degrade() {
    let html = render("@icon{nope} @company{Nowhere} **open", None);
    assert!(!html.contains("resume-icon"));
    assert!(html.contains("<strong>Nowhere</strong>"));
    assert!(html.contains("**open"));
}

#[test]
fn test_click_to_scroll_offsets() {
    let index = LineIndex::new(RESUME);
    let offset = index.offset_of(SourceLine(5));
    assert!(RESUME[offset..].starts_with("# Title"));
    assert_eq!(index.line_of(offset), SourceLine(5));
}

#[test]
fn test_config_drives_rendering() {
    let config = Config::from_yaml(
        "companies:\n  Acme: https://acme.test/logo.png\nlayout:\n  min_column_widths: [20, 20, 20, 20]\n  default_column_widths: [40, 20, 20, 20]\n",
    )
    .unwrap();
    let renderer = MarkdownRenderer::with_config(&config);

    let html = renderer.render("@flex{@company{Acme}|b|c|d}", None);
    assert!(html.contains(r#"src="https://acme.test/logo.png""#));
    assert_eq!(renderer.column_widths("@flex{a|b|c|d}").widths(), [25, 25, 25, 25]);
}

#[test]
fn test_rendered_blocks_paginate() {
    let mut source = String::from("@avatar{/me.jpg}\n\n# Name\n");
    for i in 0..30 {
        source.push_str(&format!(
            "\n## Job {i}\n\n@flex{{Company {i}|Engineer|Team|2020 - 2024}}\n\n- {}\n- {}\n",
            "did things ".repeat(20),
            "more things ".repeat(15)
        ));
    }

    let blocks = render_blocks(&source, None);
    let flow = blocks.iter().filter(|b| b.kind != BlockKind::Avatar).count();
    let doc = paginate(blocks, &PageLayout::default(), &EstimatedMetrics::default());

    assert_eq!(doc.floating.len(), 1);
    assert!(doc.page_count() > 1);
    assert_eq!(doc.blocks().count(), flow);
    for page in &doc.pages {
        assert!(!page.last_kind().map_or(false, |k| k.is_section_heading()));
    }

    let html = doc.to_html();
    assert_eq!(
        html.matches("break-after: page").count(),
        doc.page_count() - 1
    );
}
