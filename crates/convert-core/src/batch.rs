//! Batch orchestrator: runs one converter over a list of path pairs.
//!
//! Files are converted strictly one after another. A failing file is
//! reported and counted, and the loop moves on to the next one.

use log::{info, warn};

use crate::error::ConvertError;
use crate::options::ConversionOptions;
use crate::paths::PathPair;
use crate::plugin::Converter;

/// Per-file notifications emitted while a batch runs.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    Started(&'a PathPair),
    Converted(&'a PathPair),
    Failed(&'a PathPair, &'a ConvertError),
}

/// Progress reporter callback type.
pub type ProgressReporter = Box<dyn Fn(&BatchEvent<'_>) + Send + Sync>;

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<PathPair>,
    pub failed: Vec<(PathPair, ConvertError)>,
}

impl BatchReport {
    pub fn converted_count(&self) -> usize {
        self.converted.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// True when no file matched at all.
    pub fn is_empty(&self) -> bool {
        self.converted.is_empty() && self.failed.is_empty()
    }

    /// True when nothing failed (an empty batch counts as success).
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Fold another report into this one.
    pub fn absorb(&mut self, other: BatchReport) {
        self.converted.extend(other.converted);
        self.failed.extend(other.failed);
    }
}

/// Runs a converter over path pairs.
pub struct Batch<'a> {
    converter: &'a dyn Converter,
    progress_reporter: Option<ProgressReporter>,
}

impl<'a> Batch<'a> {
    pub fn new(converter: &'a dyn Converter) -> Self {
        Self {
            converter,
            progress_reporter: None,
        }
    }

    pub fn progress_reporter(mut self, reporter: ProgressReporter) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    pub fn run(
        &self,
        pairs: impl IntoIterator<Item = PathPair>,
        options: &ConversionOptions,
    ) -> BatchReport {
        let mut report = BatchReport::default();

        for pair in pairs {
            self.report(&BatchEvent::Started(&pair));
            info!(
                "[{}] {} → {}",
                self.converter.name(),
                pair.input.display(),
                pair.output.display()
            );

            match self.converter.convert(&pair.input, &pair.output, options) {
                Ok(()) => {
                    self.report(&BatchEvent::Converted(&pair));
                    report.converted.push(pair);
                }
                Err(e) => {
                    warn!("Failed to convert {}: {}", pair.input.display(), e);
                    self.report(&BatchEvent::Failed(&pair, &e));
                    report.failed.push((pair, e));
                }
            }
        }

        info!(
            "[{}] {} converted, {} failed",
            self.converter.name(),
            report.converted_count(),
            report.failed_count()
        );
        report
    }

    fn report(&self, event: &BatchEvent<'_>) {
        if let Some(ref reporter) = self.progress_reporter {
            reporter(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    /// Fails on any input whose stem starts with "bad".
    struct PickyConverter;
    impl Converter for PickyConverter {
        fn name(&self) -> &str {
            "Picky"
        }
        fn supported_extensions(&self) -> &[&'static str] {
            &["md"]
        }
        fn output_extension(&self) -> &str {
            "pdf"
        }
        fn convert(&self, input: &Path, _output: &Path, _opts: &ConversionOptions) -> Result<()> {
            let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            if stem.starts_with("bad") {
                Err(ConvertError::ConversionFailed(format!("cannot convert {}", stem)))
            } else {
                Ok(())
            }
        }
    }

    fn pair(name: &str) -> PathPair {
        PathPair {
            input: PathBuf::from(format!("in/{}.md", name)),
            output: PathBuf::from(format!("out/{}.pdf", name)),
        }
    }

    #[test]
    fn test_failures_do_not_abort_batch() {
        let report = Batch::new(&PickyConverter).run(
            vec![pair("one"), pair("bad-two"), pair("three")],
            &ConversionOptions::default(),
        );
        assert_eq!(report.converted_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.failed[0].0, pair("bad-two"));
        assert!(!report.is_success());
    }

    #[test]
    fn test_empty_batch_is_success() {
        let report = Batch::new(&PickyConverter).run(Vec::new(), &ConversionOptions::default());
        assert!(report.is_empty());
        assert!(report.is_success());
    }

    #[test]
    fn test_events_in_order() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();

        Batch::new(&PickyConverter)
            .progress_reporter(Box::new(move |event: &BatchEvent<'_>| {
                let line = match event {
                    BatchEvent::Started(p) => format!("start {}", p.input.display()),
                    BatchEvent::Converted(p) => format!("ok {}", p.output.display()),
                    BatchEvent::Failed(p, e) => format!("fail {} {}", p.input.display(), e),
                };
                sink.lock().unwrap().push(line);
            }))
            .run(vec![pair("a"), pair("bad")], &ConversionOptions::default());

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0], "start in/a.md");
        assert_eq!(events[1], "ok out/a.pdf");
        assert_eq!(events[2], "start in/bad.md");
        assert!(events[3].starts_with("fail in/bad.md Conversion failed"));
    }

    #[test]
    fn test_absorb_merges_reports() {
        let mut total = Batch::new(&PickyConverter).run(vec![pair("a")], &ConversionOptions::default());
        total.absorb(Batch::new(&PickyConverter).run(vec![pair("bad")], &ConversionOptions::default()));
        assert_eq!(total.converted_count(), 1);
        assert_eq!(total.failed_count(), 1);
    }
}
