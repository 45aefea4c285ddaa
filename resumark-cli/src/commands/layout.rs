//! Layout inspection commands: flex columns and print pages.

use super::{load_config, read_source};
use anyhow::Result;
use resumark_core::grammar::FLEX_RE;
use resumark_core::{
    paginate, BlockKind, EstimatedMetrics, MarkdownRenderer, MeasureSurface, PageLayout,
    SourceLine,
};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct ColumnsReport {
    widths: [u32; 4],
    flex_rows: usize,
}

#[derive(Serialize)]
struct PagesReport {
    capacity: f32,
    floating: usize,
    pages: Vec<PageSummary>,
}

#[derive(Serialize)]
struct PageSummary {
    page: usize,
    height: f32,
    blocks: Vec<BlockSummary>,
}

#[derive(Serialize)]
struct BlockSummary {
    kind: BlockKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_line: Option<SourceLine>,
}

/// Print the column plan shared by the document's flex rows
pub fn show_columns(config_path: &Path, file: &Path, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let source = read_source(file)?;

    let plan = MarkdownRenderer::with_config(&config).column_widths(&source);
    let report = ColumnsReport {
        widths: plan.widths(),
        flex_rows: FLEX_RE.find_iter(&source).count(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let widths: Vec<String> = report.widths.iter().map(|w| format!("{}%", w)).collect();
        println!("{} flex rows", report.flex_rows);
        println!("Column widths: {}", widths.join(" | "));
    }
    Ok(())
}

/// Print the page assignment of the rendered blocks
pub fn show_pages(config_path: &Path, file: &Path, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let source = read_source(file)?;

    let renderer = MarkdownRenderer::with_config(&config);
    let metrics = EstimatedMetrics::new(&config.layout);
    let layout = PageLayout::from_config(&config.layout);
    let document = paginate(renderer.render_blocks(&source, None), &layout, &metrics);

    let report = PagesReport {
        capacity: layout.capacity(),
        floating: document.floating.len(),
        pages: document
            .pages
            .iter()
            .enumerate()
            .map(|(idx, page)| PageSummary {
                page: idx + 1,
                height: metrics.measure(&page.blocks),
                blocks: page
                    .blocks
                    .iter()
                    .map(|block| BlockSummary {
                        kind: block.kind,
                        source_line: block.source_line,
                    })
                    .collect(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} pages (capacity {}px)",
        report.pages.len(),
        report.capacity
    );
    for page in &report.pages {
        let lines: Vec<String> = page
            .blocks
            .iter()
            .filter_map(|b| b.source_line)
            .map(|line| line.to_string())
            .collect();
        println!(
            "  Page {}: {} blocks, ~{:.0}px, lines {}",
            page.page,
            page.blocks.len(),
            page.height,
            lines.join(", ")
        );
    }
    Ok(())
}
