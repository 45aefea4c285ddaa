//! Height estimation without a layout engine.

use super::MeasureSurface;
use crate::columns::text_width;
use crate::config::LayoutConfig;
use resumark_types::{BlockKind, BlockNode};

/// Text-metric heuristic matching the print stylesheet.
///
/// Each block is wrapped at the content width using the same wide/narrow
/// character estimate as the column solver, then scaled by the font size of
/// its kind and padded with the block's vertical margins.
#[derive(Debug, Clone)]
pub struct EstimatedMetrics {
    layout: LayoutConfig,
}

/// (font scale, vertical margins, horizontal indent)
fn kind_metrics(kind: BlockKind) -> (f32, f32, f32) {
    match kind {
        BlockKind::Heading1 => (1.6, 16.0, 0.0),
        // Bottom border included
        BlockKind::Heading2 => (1.2, 23.0, 0.0),
        BlockKind::Heading3 => (1.07, 14.0, 0.0),
        BlockKind::Paragraph => (1.0, 8.0, 0.0),
        BlockKind::List | BlockKind::ListItem => (1.0, 8.0, 24.0),
        BlockKind::Quote => (1.0, 16.0, 16.0),
        BlockKind::Table => (1.0, 12.0, 0.0),
        BlockKind::FlexRow => (1.0, 6.0, 0.0),
        BlockKind::Avatar => (0.0, 0.0, 0.0),
        BlockKind::Other => (1.0, 8.0, 0.0),
    }
}

impl EstimatedMetrics {
    pub fn new(layout: &LayoutConfig) -> Self {
        Self {
            layout: layout.clone(),
        }
    }

    /// Estimated height of a single block in pixels
    pub fn block_height(&self, block: &BlockNode) -> f32 {
        let (scale, margins, indent) = kind_metrics(block.kind);
        let line_height = self.layout.line_height as f32;

        match block.kind {
            BlockKind::Avatar => 0.0,
            BlockKind::FlexRow => line_height + margins,
            BlockKind::Table => {
                // The header row has no <tr> of its own.
                let rows = block.html.matches("<tr").count() + 1;
                rows as f32 * (line_height + 8.0) + margins
            }
            BlockKind::List => {
                let items = block.html.matches("<li").count().max(1);
                let lines = self.wrapped_lines(&block.text, scale, indent).max(items);
                lines as f32 * line_height + items as f32 * 4.0 + margins
            }
            _ => {
                let breaks = block.html.matches("<br").count();
                let lines = self.wrapped_lines(&block.text, scale, indent) + breaks;
                lines as f32 * line_height * scale + margins
            }
        }
    }

    fn wrapped_lines(&self, text: &str, scale: f32, indent: f32) -> usize {
        let available = (self.layout.content_width as f32 - indent).max(1.0);
        let width = text_width(text, &self.layout) as f32 * scale;
        ((width / available).ceil() as usize).max(1)
    }
}

impl Default for EstimatedMetrics {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl MeasureSurface for EstimatedMetrics {
    fn measure(&self, blocks: &[BlockNode]) -> f32 {
        blocks.iter().map(|block| self.block_height(block)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_takes_no_space() {
        let metrics = EstimatedMetrics::default();
        let avatar = BlockNode::new(BlockKind::Avatar, "<img class=\"resume-avatar\" />", "");
        assert_eq!(metrics.block_height(&avatar), 0.0);
    }

    #[test]
    fn test_long_paragraphs_wrap() {
        let metrics = EstimatedMetrics::default();
        let short = BlockNode::new(BlockKind::Paragraph, "<p>short</p>", "short");
        let text = "word ".repeat(60);
        let long = BlockNode::new(BlockKind::Paragraph, format!("<p>{}</p>", text), text.trim());

        assert_eq!(metrics.block_height(&short), 22.0 + 8.0);
        // 299 narrow characters, 2392px over 714px: four lines.
        assert_eq!(metrics.block_height(&long), 4.0 * 22.0 + 8.0);
    }

    #[test]
    fn test_lists_count_items() {
        let metrics = EstimatedMetrics::default();
        let list = BlockNode::new(
            BlockKind::List,
            "<ul>\n<li>a</li>\n<li>b</li>\n<li>c</li>\n</ul>\n",
            "a b c",
        );
        assert_eq!(metrics.block_height(&list), 3.0 * 22.0 + 12.0 + 8.0);
    }

    #[test]
    fn test_measure_sums_blocks() {
        let metrics = EstimatedMetrics::default();
        let blocks = vec![
            BlockNode::new(BlockKind::Paragraph, "<p>a</p>", "a"),
            BlockNode::new(BlockKind::FlexRow, "<div class=\"flex-layout\"></div>", ""),
        ];
        assert_eq!(metrics.measure(&blocks), 30.0 + 28.0);
    }
}
