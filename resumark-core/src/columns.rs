//! Content-aware column widths for `@flex{a|b|c|d}` rows.
//!
//! Every qualifying row in a document shares one [`ColumnWidthPlan`], so the
//! cells of consecutive rows line up. A row qualifies when it has exactly four
//! cells and at least one of the middle cells holds content.

use crate::catalog::Catalog;
use crate::config::LayoutConfig;
use crate::grammar::{
    apply_tags, find_tags, split_cells, PlainTags, TagKind, COMPANY_RE, FLEX_RE, ICON_RE,
};
use once_cell::sync::Lazy;
use regex::Regex;
use resumark_types::ColumnWidthPlan;

static HTML_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid html tag regex"));

/// Estimates cell widths and turns them into a percentage plan
pub struct ColumnWidthSolver<'a> {
    layout: &'a LayoutConfig,
    /// Decides whether a raw `@company{…}` reference renders as a badge
    catalog: &'a Catalog,
}

impl<'a> ColumnWidthSolver<'a> {
    pub fn new(layout: &'a LayoutConfig, catalog: &'a Catalog) -> Self {
        Self { layout, catalog }
    }

    /// Plan for every flex row in `text`, or the default plan when no row
    /// qualifies.
    pub fn solve(&self, text: &str) -> ColumnWidthPlan {
        match self.measure_rows(text) {
            Some(measured) => {
                let widths = reconcile(measured, self.layout.min_column_widths);
                tracing::debug!("Sized flex columns {:?} -> {:?}", measured, widths);
                ColumnWidthPlan::new(widths)
            }
            None => ColumnWidthPlan::new(self.layout.default_column_widths),
        }
    }

    /// Per-column percentages before reconciliation, clamped to the minimums.
    pub fn measure_rows(&self, text: &str) -> Option<[u32; 4]> {
        let mut max_widths = [0u32; 4];
        let mut qualifying = 0usize;

        for caps in FLEX_RE.captures_iter(text) {
            let cells = split_cells(&caps[1]);
            if cells.len() != 4 || (cells[1].is_empty() && cells[2].is_empty()) {
                continue;
            }
            qualifying += 1;
            for (column, cell) in cells.iter().enumerate() {
                max_widths[column] = max_widths[column].max(self.estimate_width(cell));
            }
        }

        if qualifying == 0 {
            return None;
        }

        let content_width = f64::from(self.layout.content_width.max(1));
        let mut percents = [0u32; 4];
        for (column, width) in max_widths.iter().enumerate() {
            let padded = f64::from(width + self.layout.cell_padding);
            let percent = (padded / content_width * 100.0).round() as u32;
            percents[column] = percent.max(self.layout.min_column_widths[column]);
        }

        Some(percents)
    }

    /// Rendered width of one cell in pixels
    pub fn estimate_width(&self, cell: &str) -> u32 {
        if cell.is_empty() {
            return 0;
        }

        let tag_count: usize = TagKind::DECORATED
            .iter()
            .map(|kind| find_tags(cell, *kind).len())
            .sum();
        let has_badge = cell.contains("company-badge") || self.has_company_logo(cell);

        let mut width = text_width(&strip_markup(cell), self.layout);

        width += tag_count as u32 * self.layout.tag_overhead;
        if has_badge {
            width += self.layout.badge_overhead;
        }

        width
    }

    /// Whether a raw company reference in `cell` has a logo to show
    fn has_company_logo(&self, cell: &str) -> bool {
        COMPANY_RE.captures_iter(cell).any(|caps| {
            caps.get(2).map_or(false, |url| !url.as_str().trim().is_empty())
                || self.catalog.company_logo(&caps[1]).is_some()
        })
    }
}

/// Width of plain text: wide code points for anything outside ASCII
pub fn text_width(text: &str, layout: &LayoutConfig) -> u32 {
    text.chars()
        .map(|c| {
            if c.is_ascii() {
                layout.narrow_char_width
            } else {
                layout.wide_char_width
            }
        })
        .sum()
}

/// Visible text of a cell: HTML tags, construct syntax and tag delimiters removed
pub fn strip_markup(text: &str) -> String {
    let text = HTML_TAG_RE.replace_all(text, "");
    let text = COMPANY_RE.replace_all(&text, "$1");
    let text = ICON_RE.replace_all(&text, "");
    let text = apply_tags(&text, &TagKind::ALL, &PlainTags);
    text.replace("**", "").trim().to_string()
}

/// Bring clamped percentages to a total of exactly 100 without going below
/// any minimum.
fn reconcile(widths: [u32; 4], minimums: [u32; 4]) -> [u32; 4] {
    let mut widths = widths.map(i64::from);
    let minimums = minimums.map(i64::from);
    let min_total: i64 = minimums.iter().sum();

    let total: i64 = widths.iter().sum();
    if total > 100 {
        // Only the excess above each minimum competes for the free points.
        let free = (100 - min_total) as f64;
        let excess_total = (total - min_total) as f64;
        for (width, min) in widths.iter_mut().zip(minimums) {
            let excess = (*width - min) as f64;
            *width = min + (excess * free / excess_total).round() as i64;
        }
    }

    let remaining = 100 - widths.iter().sum::<i64>();
    let per_column = remaining.signum() * (remaining.abs() / 4);
    if per_column > 0 {
        for width in widths.iter_mut() {
            *width += per_column;
        }
    }

    let mut residual = 100 - widths.iter().sum::<i64>();
    let mut turn = 0;
    while residual > 0 {
        widths[1 + turn % 2] += 1;
        turn += 1;
        residual -= 1;
    }
    while residual < 0 {
        let column = if widths[3] > minimums[3] {
            3
        } else {
            (0..4)
                .max_by_key(|&c| (widths[c] - minimums[c], c))
                .unwrap_or(3)
        };
        widths[column] -= 1;
        residual += 1;
    }

    widths.map(|w| w.max(0) as u32)
}

/// Solve with the default layout and the built-in catalog
pub fn solve_column_widths(text: &str) -> ColumnWidthPlan {
    let layout = LayoutConfig::default();
    ColumnWidthSolver::new(&layout, Catalog::builtin()).solve(text)
}
