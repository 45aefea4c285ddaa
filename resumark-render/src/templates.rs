//! Askama template definitions.

use askama::Template;
use resumark_core::{LayoutConfig, PagedDocument};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

/// Document-level settings shared by both templates
#[derive(Debug, Clone)]
pub struct DocumentMeta {
    pub title: String,
    pub lang: String,
    pub line_height: u32,
    pub page_height: u32,
    pub padding_top: u32,
    pub padding_bottom: u32,
    pub padding_x: u32,
}

impl DocumentMeta {
    pub fn new(title: impl Into<String>, layout: &LayoutConfig) -> Self {
        Self {
            title: title.into(),
            lang: "zh-CN".to_string(),
            line_height: layout.line_height,
            page_height: layout.page_height,
            padding_top: layout.padding_top,
            padding_bottom: layout.padding_bottom,
            padding_x: layout.padding_x,
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }
}

/// Single-sheet preview with click-to-source support
#[derive(Template)]
#[template(path = "preview.html")]
pub struct PreviewTemplate {
    pub title: String,
    pub lang: String,
    pub line_height: u32,
    pub page_height: u32,
    pub padding_top: u32,
    pub padding_bottom: u32,
    pub padding_x: u32,

    /// Rendered resume HTML
    pub content: String,
}

/// Print document made of page wrappers
#[derive(Template)]
#[template(path = "print.html")]
pub struct PrintTemplate {
    pub title: String,
    pub lang: String,
    pub line_height: u32,
    pub page_height: u32,

    /// Output of `PagedDocument::to_html`
    pub content: String,
}

/// Wrap rendered HTML into a standalone preview page
pub fn render_preview(meta: &DocumentMeta, content: &str) -> Result<String, RenderError> {
    let template = PreviewTemplate {
        title: meta.title.clone(),
        lang: meta.lang.clone(),
        line_height: meta.line_height,
        page_height: meta.page_height,
        padding_top: meta.padding_top,
        padding_bottom: meta.padding_bottom,
        padding_x: meta.padding_x,
        content: content.to_string(),
    };
    Ok(template.render()?)
}

/// Wrap a paginated document into a print page
pub fn render_print(meta: &DocumentMeta, document: &PagedDocument) -> Result<String, RenderError> {
    let template = PrintTemplate {
        title: meta.title.clone(),
        lang: meta.lang.clone(),
        line_height: meta.line_height,
        page_height: meta.page_height,
        content: document.to_html(),
    };
    Ok(template.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumark_core::{paginate, render_blocks, EstimatedMetrics, PageLayout};

    fn meta() -> DocumentMeta {
        DocumentMeta::new("Resume <draft>", &LayoutConfig::default())
    }

    #[test]
    fn test_preview_embeds_content_unescaped() {
        let html = render_preview(&meta(), "<h1 data-line=\"1\">Name</h1>").unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1 data-line=\"1\">Name</h1>"));
        assert!(html.contains("<title>Resume &#60;draft&#62;</title>") || html.contains("<title>Resume &lt;draft&gt;</title>"));
        assert!(html.contains("--resume-line-height: 22px"));
        assert!(html.contains("padding: 30px 40px 30px"));
    }

    #[test]
    fn test_print_contains_page_wrappers() {
        let blocks = render_blocks("# Name\n\n## Work\n\ntext", None);
        let doc = paginate(blocks, &PageLayout::default(), &EstimatedMetrics::default());
        let html = render_print(&meta().with_lang("en"), &doc).unwrap();

        assert!(html.contains("<html lang=\"en\">"));
        assert!(html.contains("@page { size: A4; margin: 0; }"));
        assert!(html.contains("<div class=\"resume-page\""));
        assert!(!html.contains("break-after: page\""));
    }
}
