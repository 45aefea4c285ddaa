//! # resumark-render
//!
//! Standalone HTML documents for resumark.
//!
//! This crate wraps rendered or paginated resume HTML into preview and print
//! pages using Askama.

pub mod templates;

pub use templates::{
    render_preview, render_print, DocumentMeta, PreviewTemplate, PrintTemplate, RenderError,
};
