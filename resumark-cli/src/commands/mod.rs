//! CLI command implementations.

pub mod export;
pub mod init;
pub mod layout;
pub mod render;

pub use export::export_document;
pub use init::init_project;
pub use layout::{show_columns, show_pages};
pub use render::{highlight_document, render_document, RenderOptions};

use anyhow::{Context, Result};
use resumark_core::Config;
use std::fs;
use std::path::Path;

/// Load the configuration, falling back to defaults when the file is absent
pub(crate) fn load_config(path: &Path) -> Result<Config> {
    Config::load_or_default(path).with_context(|| format!("Failed to load config {:?}", path))
}

pub(crate) fn read_source(file: &Path) -> Result<String> {
    fs::read_to_string(file).with_context(|| format!("Failed to read {:?}", file))
}

/// Write to `output`, or to stdout when no path is given
pub(crate) fn write_output(output: Option<&Path>, contents: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {:?}", parent))?;
            }
            fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))?;
            tracing::info!("Wrote {:?}", path);
        }
        None => print!("{}", contents),
    }
    Ok(())
}

/// Document title from the source file name
pub(crate) fn document_title(file: &Path) -> String {
    file.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume".to_string())
}
