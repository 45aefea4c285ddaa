//! Render and highlight commands.

use super::{document_title, load_config, read_source, write_output};
use anyhow::{Context, Result};
use resumark_core::MarkdownRenderer;
use resumark_render::{render_preview, DocumentMeta};
use std::path::{Path, PathBuf};

pub struct RenderOptions {
    pub avatar: Option<String>,
    pub output: Option<PathBuf>,
    pub standalone: bool,
}

/// Render a resume to an HTML fragment or a standalone preview page
pub fn render_document(config_path: &Path, file: &Path, opts: RenderOptions) -> Result<()> {
    let config = load_config(config_path)?;
    let source = read_source(file)?;

    let renderer = MarkdownRenderer::with_config(&config);
    let mut html = renderer.render(&source, opts.avatar.as_deref());

    if opts.standalone {
        let meta = DocumentMeta::new(document_title(file), &config.layout);
        html = render_preview(&meta, &html).context("Failed to render preview page")?;
    }

    write_output(opts.output.as_deref(), &html)
}

/// Write the editor highlighting of a source file
pub fn highlight_document(file: &Path, output: Option<&Path>) -> Result<()> {
    let source = read_source(file)?;
    write_output(output, &resumark_core::highlight(&source))
}
