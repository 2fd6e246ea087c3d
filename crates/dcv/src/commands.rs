//! Conversion commands: source validation, batch runs and console output.

use std::path::{Path, PathBuf};

use convert_core::batch::{Batch, BatchEvent, BatchReport, ProgressReporter};
use convert_core::error::{ConvertError, Result};
use convert_core::paths::PathPair;
use convert_core::plugin::Converter;

use crate::context::AppContext;

/// The ways a source can be named on the command line.
#[derive(Debug, Default, Clone)]
pub struct SourceSelection {
    pub path: Option<PathBuf>,
    pub file: Option<PathBuf>,
    pub dir: Option<PathBuf>,
}

impl SourceSelection {
    /// Exactly one of PATH, `--file` or `--dir`, pointing at something that
    /// exists and has the right kind.
    pub fn resolve(&self) -> Result<PathBuf> {
        let given = [&self.path, &self.file, &self.dir]
            .iter()
            .filter(|p| p.is_some())
            .count();
        if given == 0 {
            return Err(ConvertError::BadOptions(
                "Either a PATH argument, --file/-f or --dir/-d must be specified.".to_string(),
            ));
        }
        if given > 1 {
            return Err(ConvertError::BadOptions(
                "Specify only one of PATH, --file/-f or --dir/-d.".to_string(),
            ));
        }

        if let Some(file) = &self.file {
            require_exists(file)?;
            if file.is_dir() {
                return Err(ConvertError::BadOptions(format!(
                    "--file expects a file, but {} is a directory. Use --dir instead.",
                    file.display()
                )));
            }
            return Ok(file.clone());
        }
        if let Some(dir) = &self.dir {
            require_exists(dir)?;
            if !dir.is_dir() {
                return Err(ConvertError::BadOptions(format!(
                    "--dir expects a directory, but {} is a file. Use --file instead.",
                    dir.display()
                )));
            }
            return Ok(dir.clone());
        }

        let path = self.path.clone().unwrap_or_default();
        require_exists(&path)?;
        Ok(path)
    }
}

fn require_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ConvertError::NotFound(path.to_path_buf()))
    }
}

/// What a command converts, for the "nothing found" message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Markdown,
    Pdf,
    Any,
}

impl Kind {
    fn label(self) -> &'static str {
        match self {
            Kind::Markdown => "Markdown",
            Kind::Pdf => "PDF",
            Kind::Any => "Markdown or PDF",
        }
    }
}

pub fn run_md2pdf(ctx: &AppContext, source: &Path) -> Result<BatchReport> {
    ctx.settings.margins.validate()?;
    run_single(ctx, &*ctx.md_converter, source)
}

pub fn run_pdf2md(ctx: &AppContext, source: &Path) -> Result<BatchReport> {
    run_single(ctx, &*ctx.pdf_converter, source)
}

/// Convert every Markdown and PDF file under `source`, each with the
/// converter matching its extension.
pub fn run_convert(ctx: &AppContext, source: &Path) -> Result<BatchReport> {
    ctx.settings.margins.validate()?;
    ctx.file_manager.ensure_output_dir()?;

    let files = ctx
        .file_manager
        .find_files(source, &ctx.all_extensions(), ctx.settings.recursive)?;
    let source_dir = source.is_dir().then_some(source);

    // Markdown files run before PDFs, whatever order they were found in.
    let converters = ctx.converters();
    let mut groups: Vec<Vec<PathPair>> = converters.iter().map(|_| Vec::new()).collect();
    for input in files {
        let ext = input.extension().and_then(|e| e.to_str()).unwrap_or_default();
        let Some(index) = converters.iter().position(|c| c.supports_extension(ext)) else {
            continue;
        };
        let output = ctx
            .file_manager
            .output_path(&input, converters[index].output_extension(), source_dir);
        groups[index].push(PathPair { input, output });
    }

    let mut report = BatchReport::default();
    for (converter, pairs) in converters.into_iter().zip(groups) {
        if pairs.is_empty() {
            continue;
        }
        let batch = Batch::new(converter).progress_reporter(console_reporter());
        report.absorb(batch.run(pairs, &ctx.settings));
    }
    Ok(report)
}

fn run_single(ctx: &AppContext, converter: &dyn Converter, source: &Path) -> Result<BatchReport> {
    ctx.file_manager.ensure_output_dir()?;
    let pairs = ctx.file_manager.path_pairs(
        source,
        converter.supported_extensions(),
        converter.output_extension(),
        ctx.settings.recursive,
    )?;

    let batch = Batch::new(converter).progress_reporter(console_reporter());
    Ok(batch.run(pairs, &ctx.settings))
}

/// Per-file console lines.
pub fn console_reporter() -> ProgressReporter {
    Box::new(|event: &BatchEvent<'_>| match event {
        BatchEvent::Started(pair) => {
            let name = pair
                .input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            println!("Converting: {}...", name);
        }
        BatchEvent::Converted(pair) => println!("  → {}", pair.output.display()),
        BatchEvent::Failed(_, err) => println!("  Error: {}", err),
    })
}

pub fn summary_lines(report: &BatchReport, kind: Kind) -> Vec<String> {
    let mut lines = Vec::new();
    if report.converted_count() > 0 {
        lines.push(format!("✓ Converted {} file(s)", report.converted_count()));
    }
    if report.failed_count() > 0 {
        lines.push(format!("✗ Failed {} file(s)", report.failed_count()));
    }
    if report.is_empty() {
        lines.push(format!("No {} files found to convert.", kind.label()));
    }
    lines
}

/// Print the summary and return the process exit code.
pub fn finish(report: &BatchReport, kind: Kind) -> i32 {
    println!();
    for line in summary_lines(report, kind) {
        println!("{}", line);
    }
    if report.is_success() {
        0
    } else {
        1
    }
}
