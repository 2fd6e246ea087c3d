//! The converter trait implemented by the Markdown → PDF and PDF → Markdown services.

use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::options::ConversionOptions;

/// A document converter: turns one input file into one output file.
pub trait Converter: Send + Sync {
    /// Human-readable name of this converter.
    fn name(&self) -> &str;

    /// Input extensions handled, lowercase and without the leading dot.
    fn supported_extensions(&self) -> &[&'static str];

    /// Extension given to produced files, without the leading dot.
    fn output_extension(&self) -> &str;

    /// Case-insensitive extension check. Accepts `".md"` as well as `"md"`.
    fn supports_extension(&self, extension: &str) -> bool {
        let ext = extension.trim_start_matches('.');
        self.supported_extensions()
            .iter()
            .any(|supported| supported.eq_ignore_ascii_case(ext))
    }

    /// Convert `input_path` and write the result to `output_path`.
    fn convert(
        &self,
        input_path: &Path,
        output_path: &Path,
        options: &ConversionOptions,
    ) -> Result<()>;
}

/// Shared precondition check: the input exists and carries a supported extension.
pub fn check_input(converter: &dyn Converter, input_path: &Path) -> Result<()> {
    if !input_path.exists() {
        return Err(ConvertError::NotFound(input_path.to_path_buf()));
    }

    let ext = input_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    if !converter.supports_extension(ext) {
        return Err(ConvertError::UnsupportedFormat(format!(
            "{} cannot handle '.{}' files (supported: {})",
            converter.name(),
            ext,
            converter
                .supported_extensions()
                .iter()
                .map(|e| format!(".{}", e))
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestConverter;
    impl Converter for TestConverter {
        fn name(&self) -> &str {
            "Test"
        }
        fn supported_extensions(&self) -> &[&'static str] {
            &["md", "markdown"]
        }
        fn output_extension(&self) -> &str {
            "pdf"
        }
        fn convert(&self, _input: &Path, _output: &Path, _opts: &ConversionOptions) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_supports_extension_case_insensitive() {
        assert!(TestConverter.supports_extension(".md"));
        assert!(TestConverter.supports_extension("MD"));
        assert!(TestConverter.supports_extension(".MARKDOWN"));
        assert!(TestConverter.supports_extension(".Md"));
        assert!(!TestConverter.supports_extension(".pdf"));
        assert!(!TestConverter.supports_extension(""));
    }

    #[test]
    fn test_check_input_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = check_input(&TestConverter, &dir.path().join("absent.md")).unwrap_err();
        assert!(matches!(err, ConvertError::NotFound(_)));
    }

    #[test]
    fn test_check_input_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "text").unwrap();
        let err = check_input(&TestConverter, &path).unwrap_err();
        match err {
            ConvertError::UnsupportedFormat(msg) => assert!(msg.contains(".md, .markdown")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
