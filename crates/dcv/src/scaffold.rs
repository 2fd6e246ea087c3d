//! `dcv scaffold` — export the bundled stylesheet and template for editing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use convert_input_markdown::assets::{CSS_EXPORT_NAME, DEFAULT_CSS, DEFAULT_TEMPLATE, TEMPLATE_EXPORT_NAME};

#[derive(Debug, Clone, Copy, Default)]
pub struct AssetSelection {
    pub css: bool,
    pub template: bool,
}

impl AssetSelection {
    pub fn is_empty(&self) -> bool {
        !self.css && !self.template
    }
}

/// Write the selected assets into `output_dir`, creating it if needed.
/// Returns the written paths, stylesheet first.
pub fn export_assets(output_dir: &Path, selection: AssetSelection) -> Result<Vec<PathBuf>> {
    let mut exported = Vec::new();
    if selection.is_empty() {
        return Ok(exported);
    }

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Cannot create {}", output_dir.display()))?;

    if selection.css {
        let path = output_dir.join(CSS_EXPORT_NAME);
        std::fs::write(&path, DEFAULT_CSS).with_context(|| format!("Error exporting CSS to {}", path.display()))?;
        exported.push(path);
    }
    if selection.template {
        let path = output_dir.join(TEMPLATE_EXPORT_NAME);
        std::fs::write(&path, DEFAULT_TEMPLATE)
            .with_context(|| format!("Error exporting template to {}", path.display()))?;
        exported.push(path);
    }
    Ok(exported)
}

pub fn run_scaffold(output_dir: &Path, selection: AssetSelection) -> Result<i32> {
    if selection.is_empty() {
        println!("No assets specified. Use --css, --template, or --all to export assets.");
        return Ok(0);
    }

    let exported = export_assets(output_dir, selection)?;
    println!("✓ Exported assets:");
    for path in &exported {
        println!("  • {}", path.display());
    }
    println!();
    println!("Edit these files to customize your PDF output.");
    Ok(0)
}
