use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("{0}")]
    BadOptions(String),

    #[error("Renderer not installed: {0}")]
    RendererNotInstalled(String),

    #[error("{tool} command not found. {hint}")]
    ExternalToolMissing { tool: String, hint: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Conversion failed: {0}")]
    ConversionFailed(String),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
