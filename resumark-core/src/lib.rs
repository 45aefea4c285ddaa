//! # resumark-core
//!
//! Core library for rendering resume documents written in Markdown with a
//! small set of extensions (`@icon{…}`, `@avatar{…}`, `@company{…}`,
//! `@flex{a|b|c|d}` and the `!!`/`^^`/`++`/`~~` accent tags).
//!
//! This crate provides the tag grammar, the HTML renderer with source-line
//! provenance, the editor highlighter, the flex column solver and the print
//! paginator.

pub mod catalog;
pub mod columns;
pub mod config;
pub mod grammar;
pub mod highlight;
pub mod markdown;
pub mod paginate;

pub use catalog::Catalog;
pub use columns::{solve_column_widths, ColumnWidthSolver};
pub use config::{Config, ConfigError, LayoutConfig};
pub use highlight::highlight;
pub use markdown::{render, render_blocks, LineIndex, MarkdownRenderer};
pub use paginate::{
    paginate, EstimatedMetrics, MeasureSurface, PageLayout, PagedDocument, Paginator,
};
pub use resumark_types::{BlockKind, BlockNode, ColumnWidthPlan, PageNode, SourceLine};
