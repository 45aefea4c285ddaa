//! Markdown rendering pipeline with the resume extensions.
//!
//! Stages: construct and accent tag substitution ([`preprocess`], [`tags`]),
//! CommonMark parsing with byte offsets, provenance annotation
//! ([`provenance`]), then HTML per top-level block ([`blocks`]).

pub mod blocks;
pub mod preprocess;
pub mod provenance;
pub mod tags;

use crate::catalog::Catalog;
use crate::config::{Config, LayoutConfig};
use blocks::{block_kind, plain_text, split_top_level};
use once_cell::sync::Lazy;
use preprocess::{Preprocessor, AVATAR_PLACEHOLDER};
use pulldown_cmark::{html, Event, Options, Parser};
use resumark_types::{BlockNode, ColumnWidthPlan};

pub use preprocess::Prepared;
pub use provenance::{LineIndex, ProvenanceAnnotator, TraceableTags};
pub use tags::{apply_accents, SemanticTags};

static DEFAULT_RENDERER: Lazy<MarkdownRenderer> = Lazy::new(MarkdownRenderer::new);

/// Markdown renderer with the resume extensions
pub struct MarkdownRenderer {
    options: Options,
    catalog: Catalog,
    layout: LayoutConfig,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        // Note: strikethrough and superscript stay disabled so that `~~` and
        // `^^` reach the accent tag pass.

        Self {
            options,
            catalog: Catalog::default(),
            layout: LayoutConfig::default(),
        }
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            catalog: config.catalog(),
            layout: config.layout.clone(),
            ..Self::new()
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Render a document to HTML
    pub fn render(&self, source: &str, avatar_url: Option<&str>) -> String {
        self.render_blocks(source, avatar_url)
            .into_iter()
            .map(|block| block.html)
            .collect()
    }

    /// Render a document into its top-level blocks
    pub fn render_blocks(&self, source: &str, avatar_url: Option<&str>) -> Vec<BlockNode> {
        let prepared = Preprocessor::new(&self.catalog, &self.layout).run(source, avatar_url);
        tracing::debug!(
            "Preprocessed {} lines, column widths {:?}",
            source.split('\n').count(),
            prepared.column_widths
        );

        let index = LineIndex::new(&prepared.text);
        let annotator = ProvenanceAnnotator::new(&index, &prepared.exempt_lines);
        let mut annotated = Vec::new();
        for segment in prepared.segments() {
            let base = segment.start;
            let parser = Parser::new_ext(&prepared.text[segment], self.options)
                .into_offset_iter()
                .map(|(event, range)| (event, range.start + base..range.end + base));
            annotated.extend(annotator.annotate(parser));
        }

        let mut resolver = TraceableTags::new();
        let mut nodes = Vec::new();

        for block in split_top_level(annotated) {
            let kind = block_kind(&block);
            let line = block.first().and_then(|a| a.line);
            let text = plain_text(&block);

            let events = resolver.resolve(block);
            let events = events.into_iter().map(|event| match event {
                Event::SoftBreak => Event::HardBreak,
                other => other,
            });

            let mut html_output = String::new();
            html::push_html(&mut html_output, events);
            if let Some(avatar) = avatar_url {
                html_output = html_output.replace(AVATAR_PLACEHOLDER, &attr_escape(avatar));
            }

            nodes.push(BlockNode::new(kind, html_output, text).with_line(line));
        }

        tracing::debug!("Rendered {} top-level blocks", nodes.len());
        nodes
    }

    /// Column plan the document's flex rows are rendered with
    pub fn column_widths(&self, source: &str) -> ColumnWidthPlan {
        Preprocessor::new(&self.catalog, &self.layout)
            .run(source, None)
            .column_widths
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn attr_escape(value: &str) -> String {
    value.replace('"', "&quot;")
}

/// Render with the built-in catalog and default layout
pub fn render(source: &str, avatar_url: Option<&str>) -> String {
    DEFAULT_RENDERER.render(source, avatar_url)
}

pub fn render_blocks(source: &str, avatar_url: Option<&str>) -> Vec<BlockNode> {
    DEFAULT_RENDERER.render_blocks(source, avatar_url)
}
