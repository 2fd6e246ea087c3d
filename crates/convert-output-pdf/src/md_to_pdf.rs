//! Alternate engine: the external `md-to-pdf` Node tool.
//!
//! The tool writes `<input>.pdf` next to the source file; the result is then
//! moved to the requested output path. Without a configured `--config-file`
//! the bundled one is used, so page size and margins match the browser engine.

use std::path::{Path, PathBuf};
use std::process::Command;

use convert_core::error::{ConvertError, Result};
use convert_core::options::ConversionOptions;
use convert_utils::fs::move_file;

pub const TOOL: &str = "md-to-pdf";

/// Bundled md-to-pdf configuration (A4, same margins as the default stylesheet).
pub const DEFAULT_CONFIG: &str = include_str!("../assets/md-to-pdf-config.js");

const DEFAULT_CONFIG_NAME: &str = "md-to-pdf-config.js";

const INSTALL_HINT: &str =
    "Please install it with: npm install -g md-to-pdf (or: pnpm add -g md-to-pdf)";

pub fn locate_md_to_pdf() -> Result<PathBuf> {
    which::which(TOOL).map_err(|_| ConvertError::ExternalToolMissing {
        tool: TOOL.to_string(),
        hint: INSTALL_HINT.to_string(),
    })
}

pub fn convert_with_md_to_pdf(input_path: &Path, output_path: &Path, options: &ConversionOptions) -> Result<()> {
    let tool = locate_md_to_pdf()?;

    if !options.margins.is_empty() || options.template.is_some() {
        log::warn!("{} ignores margin and template overrides", TOOL);
    }

    let input = input_path.canonicalize()?;
    let workdir = input.parent().unwrap_or_else(|| Path::new("."));

    let scratch = tempfile::Builder::new().prefix("dcv-md-to-pdf-").tempdir()?;
    let config = config_file(options, scratch.path())?;

    let mut cmd = Command::new(&tool);
    cmd.arg(&input).current_dir(workdir);
    cmd.arg("--config-file").arg(&config);
    if let Some(css) = &options.css {
        if !css.is_file() {
            return Err(ConvertError::NotFound(css.clone()));
        }
        cmd.arg("--stylesheet").arg(css.canonicalize()?);
    }

    log::info!("Running {} on {}", TOOL, input.display());
    let output = cmd
        .output()
        .map_err(|e| ConvertError::ConversionFailed(format!("Failed to run {}: {}", TOOL, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let detail = if stderr.trim().is_empty() { stdout } else { stderr };
        return Err(ConvertError::ConversionFailed(format!(
            "Failed to convert {}: {}",
            input_path.display(),
            detail.trim()
        )));
    }

    let generated = input.with_extension("pdf");
    if generated.is_file() {
        let already_there = output_path
            .canonicalize()
            .map(|target| target == generated)
            .unwrap_or(false);
        if !already_there {
            move_file(&generated, output_path)?;
        }
    } else if !output_path.exists() {
        return Err(ConvertError::ConversionFailed(format!(
            "PDF was not generated. Command output: {}",
            String::from_utf8_lossy(&output.stdout).trim()
        )));
    }
    Ok(())
}

/// The configured config file, or the bundled one written into `scratch`.
fn config_file(options: &ConversionOptions, scratch: &Path) -> Result<PathBuf> {
    match &options.md_to_pdf_config {
        Some(config) if !config.is_file() => Err(ConvertError::NotFound(config.clone())),
        Some(config) => Ok(config.canonicalize()?),
        None => {
            let path = scratch.join(DEFAULT_CONFIG_NAME);
            std::fs::write(&path, DEFAULT_CONFIG)?;
            log::debug!("Using bundled {} config", TOOL);
            Ok(path)
        }
    }
}
