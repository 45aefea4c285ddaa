//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const STARTER_RESUME: &str = include_str!("../../starter/resume.md");
const DEFAULT_CONFIG: &str = include_str!("../../starter/resumark.yml");

/// Write a starter `resume.md` and `resumark.yml`
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_if_missing(&root.join("resumark.yml"), DEFAULT_CONFIG)?;
    write_if_missing(&root.join("resume.md"), STARTER_RESUME)?;

    println!("✓ resumark initialized in {:?}", root);
    println!("  - Edit resume.md, then run `resumark render resume.md --standalone -o preview.html`");
    println!("  - Run `resumark export resume.md` for a print-ready document");
    Ok(())
}

fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        println!("{:?} already exists", path);
        return Ok(());
    }

    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))?;
    println!("Created {:?}", path);
    Ok(())
}
