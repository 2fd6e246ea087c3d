//! Application context: effective settings plus the services built from them.

use std::path::Path;

use convert_core::options::ConversionOptions;
use convert_core::paths::FileManager;
use convert_core::plugin::Converter;
use convert_input_pdf::PdfToMdConverter;
use convert_output_pdf::MdToPdfConverter;

pub struct AppContext {
    pub settings: ConversionOptions,
    pub file_manager: FileManager,
    pub md_converter: Box<dyn Converter>,
    pub pdf_converter: Box<dyn Converter>,
}

impl AppContext {
    pub fn new(settings: ConversionOptions) -> Self {
        Self::with_converters(
            settings,
            Box::new(MdToPdfConverter::new()),
            Box::new(PdfToMdConverter::new()),
        )
    }

    pub fn with_converters(
        settings: ConversionOptions,
        md_converter: Box<dyn Converter>,
        pdf_converter: Box<dyn Converter>,
    ) -> Self {
        let file_manager = FileManager::new(settings.output_dir.clone());
        Self {
            settings,
            file_manager,
            md_converter,
            pdf_converter,
        }
    }

    /// Markdown first, then PDF.
    pub fn converters(&self) -> [&dyn Converter; 2] {
        [&*self.md_converter, &*self.pdf_converter]
    }

    /// The converter that accepts `path`, judged by its extension.
    pub fn converter_for(&self, path: &Path) -> Option<&dyn Converter> {
        let ext = path.extension().and_then(|e| e.to_str())?;
        self.converters()
            .into_iter()
            .find(|c| c.supports_extension(ext))
    }

    /// Input extensions accepted by any converter.
    pub fn all_extensions(&self) -> Vec<&'static str> {
        self.md_converter
            .supported_extensions()
            .iter()
            .chain(self.pdf_converter.supported_extensions())
            .copied()
            .collect()
    }
}
