//! Export command implementation.

use super::{document_title, load_config, read_source, write_output};
use anyhow::{Context, Result};
use resumark_core::{paginate, EstimatedMetrics, MarkdownRenderer, PageLayout};
use resumark_render::{render_print, DocumentMeta};
use std::path::Path;

/// Render, paginate and write a print-ready HTML document
pub fn export_document(
    config_path: &Path,
    file: &Path,
    avatar: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let source = read_source(file)?;

    let renderer = MarkdownRenderer::with_config(&config);
    let blocks = renderer.render_blocks(&source, avatar);
    let document = paginate(
        blocks,
        &PageLayout::from_config(&config.layout),
        &EstimatedMetrics::new(&config.layout),
    );

    let meta = DocumentMeta::new(document_title(file), &config.layout);
    let html = render_print(&meta, &document).context("Failed to render print document")?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| file.with_extension("html"));
    write_output(Some(&output), &html)?;

    println!(
        "✓ Exported {} pages to {:?}",
        document.page_count(),
        output
    );
    Ok(())
}
