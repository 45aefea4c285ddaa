//! Shared types for resumark
//!
//! This crate provides the document model passed between the renderer, the
//! pagination engine and the command-line tools: source lines, rendered
//! blocks, column plans and pages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 1-based line number in a source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceLine(pub usize);

impl SourceLine {
    /// Returns `None` for line zero, which never exists in a source document.
    pub fn new(line: usize) -> Option<Self> {
        (line > 0).then_some(Self(line))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for SourceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of a top-level rendered block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    /// Container of list items (`<ul>` / `<ol>`)
    List,
    ListItem,
    Quote,
    Table,
    FlexRow,
    /// Floated portrait image; never takes part in page flow
    Avatar,
    Other,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Heading1 => "heading1",
            BlockKind::Heading2 => "heading2",
            BlockKind::Heading3 => "heading3",
            BlockKind::Paragraph => "paragraph",
            BlockKind::List => "list",
            BlockKind::ListItem => "list_item",
            BlockKind::Quote => "quote",
            BlockKind::Table => "table",
            BlockKind::FlexRow => "flex_row",
            BlockKind::Avatar => "avatar",
            BlockKind::Other => "other",
        }
    }

    /// Level-2 and level-3 headings must not be left dangling at a page bottom.
    pub fn is_section_heading(&self) -> bool {
        matches!(self, BlockKind::Heading2 | BlockKind::Heading3)
    }
}

/// A top-level block produced by rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockNode {
    pub kind: BlockKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_line: Option<SourceLine>,

    /// Rendered HTML of the block
    pub html: String,

    /// Plain text content with markup removed
    pub text: String,
}

impl BlockNode {
    pub fn new(kind: BlockKind, html: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind,
            source_line: None,
            html: html.into(),
            text: text.into(),
        }
    }

    pub fn with_line(mut self, line: Option<SourceLine>) -> Self {
        self.source_line = line;
        self
    }
}

/// Minimum percentage for each flex column
pub const MIN_COLUMN_WIDTHS: [u32; 4] = [10, 10, 10, 14];

/// Column plan used when no flex row qualifies for sizing
pub const DEFAULT_COLUMN_WIDTHS: [u32; 4] = [36, 22, 24, 18];

/// Percentage widths for the four cells of a flex row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnWidthPlan(pub [u32; 4]);

impl ColumnWidthPlan {
    pub fn new(widths: [u32; 4]) -> Self {
        Self(widths)
    }

    pub fn widths(&self) -> [u32; 4] {
        self.0
    }

    pub fn get(&self, column: usize) -> Option<u32> {
        self.0.get(column).copied()
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

impl Default for ColumnWidthPlan {
    fn default() -> Self {
        Self(DEFAULT_COLUMN_WIDTHS)
    }
}

/// Blocks assigned to one physical page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageNode {
    pub blocks: Vec<BlockNode>,

    /// Explicit page break after this page (false on the last page)
    #[serde(default)]
    pub break_after: bool,
}

impl PageNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn last_kind(&self) -> Option<BlockKind> {
        self.blocks.last().map(|b| b.kind)
    }

    /// Source lines of the blocks on this page, in order
    pub fn source_lines(&self) -> Vec<SourceLine> {
        self.blocks.iter().filter_map(|b| b.source_line).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_line_rejects_zero() {
        assert_eq!(SourceLine::new(0), None);
        assert_eq!(SourceLine::new(3).map(|l| l.get()), Some(3));
    }

    #[test]
    fn test_default_plan_sums_to_hundred() {
        assert_eq!(ColumnWidthPlan::default().total(), 100);
    }

    #[test]
    fn test_block_node_serializes_kind_and_line() {
        let block = BlockNode::new(BlockKind::Heading2, "<h2>Work</h2>", "Work")
            .with_line(SourceLine::new(7));
        let json = serde_json::to_string(&block).unwrap();
        assert!(json.contains("\"kind\":\"heading2\""));
        assert!(json.contains("\"source_line\":7"));
    }

    #[test]
    fn test_section_heading_kinds() {
        assert!(BlockKind::Heading2.is_section_heading());
        assert!(BlockKind::Heading3.is_section_heading());
        assert!(!BlockKind::Heading1.is_section_heading());
        assert!(!BlockKind::Paragraph.is_section_heading());
    }
}
