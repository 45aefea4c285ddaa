//! Packing rendered blocks into fixed-height pages for print.
//!
//! Blocks are never split. A page only exceeds its capacity when a single
//! block is taller than a page, and a level-2/3 heading is moved to the next
//! page rather than left as the last block of a page.

pub mod measure;

use crate::config::LayoutConfig;
use resumark_types::{BlockKind, BlockNode, PageNode};
use serde::{Deserialize, Serialize};

pub use measure::EstimatedMetrics;

/// Something that can report the rendered height of a run of blocks.
///
/// Heights are in CSS pixels and cover the blocks stacked in order, as they
/// would sit inside one page wrapper.
pub trait MeasureSurface {
    fn measure(&self, blocks: &[BlockNode]) -> f32;
}

impl<M: MeasureSurface + ?Sized> MeasureSurface for &M {
    fn measure(&self, blocks: &[BlockNode]) -> f32 {
        (**self).measure(blocks)
    }
}

/// Page geometry in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    pub page_height: u32,
    pub padding_top: u32,
    pub padding_bottom: u32,
    pub padding_x: u32,
}

impl PageLayout {
    pub fn from_config(layout: &LayoutConfig) -> Self {
        Self {
            page_height: layout.page_height,
            padding_top: layout.padding_top,
            padding_bottom: layout.padding_bottom,
            padding_x: layout.padding_x,
        }
    }

    /// Height available to blocks on one page
    pub fn capacity(&self) -> f32 {
        self.page_height
            .saturating_sub(self.padding_top)
            .saturating_sub(self.padding_bottom) as f32
    }

    fn wrapper_style(&self, break_after: bool) -> String {
        let mut style = format!(
            "padding: {}px {}px {}px; box-sizing: border-box",
            self.padding_top, self.padding_x, self.padding_bottom
        );
        if break_after {
            style.push_str("; break-after: page");
        }
        style
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

/// Result of pagination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedDocument {
    /// Blocks outside the page flow (the avatar), kept in document order
    pub floating: Vec<BlockNode>,
    pub pages: Vec<PageNode>,
    pub layout: PageLayout,
}

impl PagedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Flow blocks in page order
    pub fn blocks(&self) -> impl Iterator<Item = &BlockNode> {
        self.pages.iter().flat_map(|page| page.blocks.iter())
    }

    /// Floating blocks followed by one wrapper per page
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        for block in &self.floating {
            html.push_str(&block.html);
        }

        for page in &self.pages {
            html.push_str(&format!(
                "<div class=\"resume-page\" style=\"{}\">\n",
                self.layout.wrapper_style(page.break_after)
            ));
            for block in &page.blocks {
                html.push_str(&block.html);
            }
            html.push_str("</div>\n");
        }

        html
    }
}

/// Greedy first-fit paginator
pub struct Paginator<'m, M: MeasureSurface + ?Sized> {
    layout: PageLayout,
    measure: &'m M,
}

impl<'m, M: MeasureSurface + ?Sized> Paginator<'m, M> {
    pub fn new(layout: PageLayout, measure: &'m M) -> Self {
        Self { layout, measure }
    }

    pub fn paginate(&self, blocks: Vec<BlockNode>) -> PagedDocument {
        let capacity = self.layout.capacity();
        let (floating, flow): (Vec<_>, Vec<_>) = blocks
            .into_iter()
            .partition(|block| block.kind == BlockKind::Avatar);

        let mut pages = Vec::new();
        let mut current: Vec<BlockNode> = Vec::new();

        for block in flow {
            current.push(block);
            if current.len() < 2 || self.measure.measure(&current) <= capacity {
                continue;
            }

            let Some(overflow) = current.pop() else {
                continue;
            };
            let carried = self.take_trailing_heading(&mut current, &overflow, capacity);

            pages.push(PageNode {
                blocks: std::mem::take(&mut current),
                break_after: true,
            });
            current.extend(carried);
            current.push(overflow);
        }

        if !current.is_empty() {
            pages.push(PageNode {
                blocks: current,
                break_after: false,
            });
        }

        tracing::debug!(
            "Paginated into {} pages ({} floating blocks)",
            pages.len(),
            floating.len()
        );

        PagedDocument {
            floating,
            pages,
            layout: self.layout,
        }
    }

    /// Pop a section heading left at the bottom of `page` when it can travel
    /// with the block that follows it.
    fn take_trailing_heading(
        &self,
        page: &mut Vec<BlockNode>,
        next: &BlockNode,
        capacity: f32,
    ) -> Option<BlockNode> {
        if page.len() < 2 {
            return None;
        }
        let heading = page.last().filter(|b| b.kind.is_section_heading())?;
        let pair = [heading.clone(), next.clone()];
        if self.measure.measure(&pair) > capacity {
            return None;
        }
        page.pop()
    }
}

/// Paginate `blocks` with the given layout and measurement surface
pub fn paginate<M: MeasureSurface + ?Sized>(
    blocks: Vec<BlockNode>,
    layout: &PageLayout,
    measure: &M,
) -> PagedDocument {
    Paginator::new(*layout, measure).paginate(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Heights are carried in the block text
    struct TextHeights;

    impl MeasureSurface for TextHeights {
        fn measure(&self, blocks: &[BlockNode]) -> f32 {
            blocks
                .iter()
                .map(|b| b.text.parse::<f32>().unwrap_or(0.0))
                .sum()
        }
    }

    fn block(kind: BlockKind, height: u32) -> BlockNode {
        BlockNode::new(kind, format!("<p>{}</p>\n", height), height.to_string())
    }

    fn layout() -> PageLayout {
        PageLayout::default()
    }

    fn heights(doc: &PagedDocument) -> Vec<Vec<String>> {
        doc.pages
            .iter()
            .map(|p| p.blocks.iter().map(|b| b.text.clone()).collect())
            .collect()
    }

    #[test]
    fn test_capacity() {
        assert_eq!(layout().capacity(), 1063.0);
    }

    #[test]
    fn test_blocks_preserved_in_order() {
        let blocks: Vec<_> = (0..20)
            .map(|i| block(BlockKind::Paragraph, 100 + i))
            .collect();
        let doc = paginate(blocks.clone(), &layout(), &TextHeights);

        let flowed: Vec<_> = doc.blocks().cloned().collect();
        assert_eq!(flowed, blocks);
        assert!(doc.page_count() > 1);
        for page in &doc.pages {
            assert!(TextHeights.measure(&page.blocks) <= 1063.0);
        }
    }

    #[test]
    fn test_orphan_heading_moves_with_next_block() {
        let blocks = vec![
            block(BlockKind::Paragraph, 500),
            block(BlockKind::Heading2, 50),
            block(BlockKind::Paragraph, 600),
        ];
        let doc = paginate(blocks, &layout(), &TextHeights);
        assert_eq!(heights(&doc), vec![vec!["500"], vec!["50", "600"]]);
        assert!(doc.pages[0].break_after);
        assert!(!doc.pages[1].break_after);
    }

    #[test]
    fn test_lone_heading_stays() {
        let blocks = vec![
            block(BlockKind::Heading3, 50),
            block(BlockKind::Paragraph, 1100),
        ];
        let doc = paginate(blocks, &layout(), &TextHeights);
        assert_eq!(heights(&doc), vec![vec!["50"], vec!["1100"]]);
    }

    #[test]
    fn test_heading_not_carried_when_pair_overflows() {
        let blocks = vec![
            block(BlockKind::Paragraph, 100),
            block(BlockKind::Heading2, 50),
            block(BlockKind::Paragraph, 1050),
        ];
        let doc = paginate(blocks, &layout(), &TextHeights);
        assert_eq!(heights(&doc), vec![vec!["100", "50"], vec!["1050"]]);
    }

    #[test]
    fn test_oversized_block_overflows_alone() {
        let blocks = vec![
            block(BlockKind::Paragraph, 2000),
            block(BlockKind::Paragraph, 100),
        ];
        let doc = paginate(blocks, &layout(), &TextHeights);
        assert_eq!(heights(&doc), vec![vec!["2000"], vec!["100"]]);
    }

    #[test]
    fn test_avatar_floats_before_pages() {
        let avatar = BlockNode::new(BlockKind::Avatar, "<img class=\"resume-avatar\" />", "");
        let blocks = vec![
            avatar.clone(),
            block(BlockKind::Paragraph, 700),
            block(BlockKind::Paragraph, 700),
        ];
        let doc = paginate(blocks, &layout(), &TextHeights);
        assert_eq!(doc.floating, vec![avatar]);
        assert_eq!(doc.page_count(), 2);

        let html = doc.to_html();
        assert!(html.starts_with("<img class=\"resume-avatar\" />"));
        assert_eq!(html.matches("break-after: page").count(), 1);
        assert!(html.contains(
            "style=\"padding: 30px 40px 30px; box-sizing: border-box; break-after: page\""
        ));
    }

    #[test]
    fn test_empty_flow_has_no_pages() {
        let doc = paginate(Vec::new(), &layout(), &TextHeights);
        assert_eq!(doc.page_count(), 0);
        assert_eq!(doc.to_html(), "");
    }

    #[test]
    fn test_estimated_metrics_paginate_rendered_document() {
        let source = (1..=40)
            .map(|i| format!("## Section {}\n\n{}", i, "text ".repeat(120)))
            .collect::<Vec<_>>()
            .join("\n\n");
        let blocks = crate::markdown::render_blocks(&source, None);
        let count = blocks.len();
        let doc = paginate(blocks, &layout(), &EstimatedMetrics::default());

        assert!(doc.page_count() > 1);
        assert_eq!(doc.blocks().count(), count);
        for page in &doc.pages {
            assert_ne!(page.last_kind(), Some(BlockKind::Heading2));
        }
    }
}
