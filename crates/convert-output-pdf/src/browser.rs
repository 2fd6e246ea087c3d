//! PDF printing via a headless Chromium-family browser.
//!
//! One browser process per document: the composed HTML is written to a
//! temporary directory, the browser loads it from a `file://` URL, lets
//! scripts and network activity settle within a virtual-time budget, and
//! prints the page. Page size and margins come from the document's CSS.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use url::Url;

use convert_core::error::{ConvertError, Result};
use convert_core::options::ConversionOptions;
use convert_utils::fs::move_file;

use crate::PdfRenderer;

/// Executable names tried on `PATH`, in order.
const BROWSER_CANDIDATES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
    "microsoft-edge",
    "msedge",
];

/// Install locations that are usually not on `PATH`.
const WELL_KNOWN_LOCATIONS: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe",
];

const INSTALL_HINT: &str = "Install Chromium or Google Chrome (e.g. apt install chromium, \
     brew install --cask chromium), or point --browser / DCV_BROWSER at the executable";

/// Budget on top of the math wait for page load and printing.
const BASE_BUDGET_MS: u64 = 2_000;

/// Prints HTML with a locally installed Chromium, Chrome or Edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromiumRenderer;

impl PdfRenderer for ChromiumRenderer {
    fn name(&self) -> &str {
        "headless Chromium"
    }

    fn render_pdf(&self, html: &str, output_path: &Path, options: &ConversionOptions) -> Result<()> {
        let browser = locate_browser(options.browser.as_deref())?;

        let tmp_dir = tempfile::TempDir::new()
            .map_err(|e| ConvertError::ConversionFailed(format!("Failed to create temp dir: {}", e)))?;
        let html_path = tmp_dir.path().join("document.html");
        let pdf_path = tmp_dir.path().join("document.pdf");
        std::fs::write(&html_path, html)
            .map_err(|e| ConvertError::ConversionFailed(format!("Failed to write HTML: {}", e)))?;

        let page_url = Url::from_file_path(&html_path).map_err(|_| {
            ConvertError::ConversionFailed(format!("Cannot build file URL for {}", html_path.display()))
        })?;

        let args = build_browser_args(&page_url, &pdf_path, tmp_dir.path(), options);
        log::debug!("Running {} {:?}", browser.display(), args);

        let output = Command::new(&browser)
            .args(&args)
            .output()
            .map_err(|e| spawn_error(&browser, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConvertError::ConversionFailed(format!(
                "{} exited with {}: {}",
                browser.display(),
                output.status,
                stderr.trim()
            )));
        }

        let produced = std::fs::metadata(&pdf_path).map(|m| m.len()).unwrap_or(0);
        if produced == 0 {
            return Err(ConvertError::ConversionFailed(format!(
                "{} did not produce a PDF",
                browser.display()
            )));
        }

        move_file(&pdf_path, output_path).map_err(|e| {
            ConvertError::ConversionFailed(format!("Failed to write {}: {}", output_path.display(), e))
        })?;
        log::info!("Wrote {} ({} bytes)", output_path.display(), produced);
        Ok(())
    }
}

/// Find the browser executable.
///
/// A configured path must exist. Otherwise the candidates are looked up on
/// `PATH`, then in well-known install locations.
pub fn locate_browser(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        if let Ok(found) = which::which(path) {
            return Ok(found);
        }
        return Err(ConvertError::RendererNotInstalled(format!(
            "configured browser '{}' was not found. {}",
            path.display(),
            INSTALL_HINT
        )));
    }

    for name in BROWSER_CANDIDATES {
        if let Ok(found) = which::which(name) {
            log::debug!("Found browser on PATH: {}", found.display());
            return Ok(found);
        }
    }

    WELL_KNOWN_LOCATIONS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
        .ok_or_else(|| {
            ConvertError::RendererNotInstalled(format!(
                "no Chromium-family browser found. {}",
                INSTALL_HINT
            ))
        })
}

/// Virtual time granted to the page before printing.
pub fn virtual_time_budget(options: &ConversionOptions) -> u64 {
    options.math_load_timeout_ms + options.math_settle_ms + BASE_BUDGET_MS
}

/// Command-line arguments for one print job. The page URL comes last.
pub fn build_browser_args(
    page_url: &Url,
    pdf_path: &Path,
    profile_root: &Path,
    options: &ConversionOptions,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "--headless=new".into(),
        "--disable-gpu".into(),
        "--no-first-run".into(),
        "--no-default-browser-check".into(),
        "--no-pdf-header-footer".into(),
        "--print-to-pdf-no-header".into(),
        "--run-all-compositor-stages-before-draw".into(),
    ];

    let mut profile = OsString::from("--user-data-dir=");
    profile.push(profile_root.join("profile"));
    args.push(profile);

    args.push(format!("--virtual-time-budget={}", virtual_time_budget(options)).into());

    let mut print = OsString::from("--print-to-pdf=");
    print.push(pdf_path);
    args.push(print);

    args.extend(options.browser_args.iter().map(OsString::from));
    args.push(page_url.as_str().into());
    args
}

fn spawn_error(browser: &Path, e: io::Error) -> ConvertError {
    match e.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => ConvertError::RendererNotInstalled(
            format!("cannot launch {}: {}. {}", browser.display(), e, INSTALL_HINT),
        ),
        _ => ConvertError::ConversionFailed(format!("Failed to run {}: {}", browser.display(), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_as_strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn test_configured_browser_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let err = locate_browser(Some(&tmp.path().join("no-such-browser"))).unwrap_err();
        match err {
            ConvertError::RendererNotInstalled(msg) => assert!(msg.contains("no-such-browser")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_configured_browser_used_as_is() {
        let tmp = tempfile::tempdir().unwrap();
        let fake = tmp.path().join("my-chrome");
        std::fs::write(&fake, "").unwrap();
        assert_eq!(locate_browser(Some(&fake)).unwrap(), fake);
    }

    #[test]
    fn test_virtual_time_budget() {
        let options = ConversionOptions {
            math_load_timeout_ms: 3_000,
            math_settle_ms: 250,
            ..Default::default()
        };
        assert_eq!(virtual_time_budget(&options), 5_250);
        assert_eq!(virtual_time_budget(&ConversionOptions::default()), 12_500);
    }

    #[test]
    fn test_browser_args() {
        let tmp = tempfile::tempdir().unwrap();
        let html = tmp.path().join("document.html");
        let pdf = tmp.path().join("document.pdf");
        let url = Url::from_file_path(&html).unwrap();
        let options = ConversionOptions {
            browser_args: vec!["--no-sandbox".to_string()],
            ..Default::default()
        };

        let args = args_as_strings(&build_browser_args(&url, &pdf, tmp.path(), &options));
        assert_eq!(args[0], "--headless=new");
        assert!(args.contains(&"--no-pdf-header-footer".to_string()));
        assert!(args.contains(&"--virtual-time-budget=12500".to_string()));
        assert!(args.contains(&format!("--print-to-pdf={}", pdf.display())));
        assert!(args.contains(&"--no-sandbox".to_string()));
        assert!(args.last().unwrap().starts_with("file://"));
        assert!(args.last().unwrap().ends_with("document.html"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_browser_is_not_installed() {
        let tmp = tempfile::tempdir().unwrap();
        let fake = tmp.path().join("not-executable");
        std::fs::write(&fake, "plain text").unwrap();
        let options = ConversionOptions {
            browser: Some(fake),
            ..Default::default()
        };
        let err = ChromiumRenderer
            .render_pdf("<html></html>", &tmp.path().join("out.pdf"), &options)
            .unwrap_err();
        assert!(matches!(err, ConvertError::RendererNotInstalled(_)));
    }

    #[test]
    #[ignore = "requires a local Chromium-family browser"]
    fn test_prints_real_pdf() {
        let tmp = tempfile::tempdir().unwrap();
        let output = tmp.path().join("out.pdf");
        ChromiumRenderer
            .render_pdf(
                "<html><body><h1>Hello</h1></body></html>",
                &output,
                &ConversionOptions::default(),
            )
            .unwrap();
        let bytes = std::fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
