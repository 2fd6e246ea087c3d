//! Input discovery and output path derivation.
//!
//! A source is either a single file or a directory. Directories are walked
//! (recursively unless told otherwise) and every file whose extension is in
//! the accepted set becomes a [`PathPair`]. Output paths mirror the file's
//! location relative to the source directory under the output root.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ConvertError, Result};

/// One unit of conversion work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPair {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Finds input files and decides where their converted counterparts go.
#[derive(Debug, Clone)]
pub struct FileManager {
    output_dir: PathBuf,
}

impl FileManager {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn set_output_dir(&mut self, output_dir: impl Into<PathBuf>) {
        self.output_dir = output_dir.into();
    }

    /// Create the output directory (and parents) if missing.
    pub fn ensure_output_dir(&self) -> Result<&Path> {
        std::fs::create_dir_all(&self.output_dir)?;
        Ok(&self.output_dir)
    }

    pub fn validate_input_path(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ConvertError::NotFound(path.to_path_buf()));
        }
        Ok(())
    }

    /// Files under `source` whose extension is in `extensions`.
    ///
    /// A single file is returned as-is when it matches and skipped otherwise.
    /// Directory entries come back sorted by file name within each directory.
    pub fn find_files(
        &self,
        source: &Path,
        extensions: &[&str],
        recursive: bool,
    ) -> Result<Vec<PathBuf>> {
        self.validate_input_path(source)?;

        if source.is_file() {
            if has_extension(source, extensions) {
                return Ok(vec![source.to_path_buf()]);
            }
            log::debug!(
                "Skipping {}: extension not in {:?}",
                source.display(),
                extensions
            );
            return Ok(Vec::new());
        }

        let max_depth = if recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();

        for entry in WalkDir::new(source)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry under {}: {}", source.display(), e);
                    continue;
                }
            };
            if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
                files.push(entry.into_path());
            }
        }

        log::debug!("Found {} matching file(s) in {}", files.len(), source.display());
        Ok(files)
    }

    /// Where the converted form of `input_path` is written.
    ///
    /// With a `source_dir` containing the input, the relative directory
    /// structure is preserved; otherwise only the file name is kept.
    pub fn output_path(
        &self,
        input_path: &Path,
        output_extension: &str,
        source_dir: Option<&Path>,
    ) -> PathBuf {
        let ext = output_extension.trim_start_matches('.');

        if let Some(relative) = source_dir.and_then(|dir| input_path.strip_prefix(dir).ok()) {
            return self.output_dir.join(relative).with_extension(ext);
        }

        let file_name = input_path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_default();
        self.output_dir.join(file_name).with_extension(ext)
    }

    /// Input/output pairs for every matching file under `source`.
    pub fn path_pairs(
        &self,
        source: &Path,
        input_extensions: &[&str],
        output_extension: &str,
        recursive: bool,
    ) -> Result<Vec<PathPair>> {
        let source_dir = if source.is_dir() { Some(source) } else { None };

        let pairs = self
            .find_files(source, input_extensions, recursive)?
            .into_iter()
            .map(|input| {
                let output = self.output_path(&input, output_extension, source_dir);
                PathPair { input, output }
            })
            .collect();
        Ok(pairs)
    }
}

impl Default for FileManager {
    fn default() -> Self {
        Self::new("dcv_output")
    }
}

/// Case-insensitive extension match. Accepted extensions may carry a leading dot.
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|candidate| candidate.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"test").unwrap();
    }

    #[test]
    fn test_output_dir_default() {
        assert_eq!(FileManager::default().output_dir(), Path::new("dcv_output"));
    }

    #[test]
    fn test_ensure_output_dir_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("new").join("output");
        let manager = FileManager::new(&out);

        assert!(!out.exists());
        let created = manager.ensure_output_dir().unwrap();
        assert!(out.is_dir());
        assert_eq!(created, out.as_path());
    }

    #[test]
    fn test_validate_input_path_not_exists() {
        let tmp = tempfile::tempdir().unwrap();
        let err = FileManager::default()
            .validate_input_path(&tmp.path().join("nonexistent.txt"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::NotFound(_)));
        assert!(err.to_string().contains("Input path does not exist"));
    }

    #[test]
    fn test_find_files_single_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("document.pdf");
        touch(&file);

        let files = FileManager::default().find_files(&file, &["pdf"], true).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_find_files_single_file_wrong_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("document.txt");
        touch(&file);

        let files = FileManager::default().find_files(&file, &["pdf"], true).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_find_files_missing_source() {
        let tmp = tempfile::tempdir().unwrap();
        let err = FileManager::default()
            .find_files(&tmp.path().join("gone"), &["pdf"], true)
            .unwrap_err();
        assert!(matches!(err, ConvertError::NotFound(_)));
    }

    #[test]
    fn test_find_files_directory_filters_extensions() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("doc1.pdf"));
        touch(&tmp.path().join("doc2.pdf"));
        touch(&tmp.path().join("readme.txt"));

        let files = FileManager::default()
            .find_files(tmp.path(), &[".pdf"], true)
            .unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["doc1.pdf", "doc2.pdf"]);
    }

    #[test]
    fn test_find_files_recursive_and_flat() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("root.pdf"));
        touch(&tmp.path().join("subdir").join("nested.pdf"));

        let manager = FileManager::default();
        assert_eq!(manager.find_files(tmp.path(), &["pdf"], true).unwrap().len(), 2);

        let flat = manager.find_files(tmp.path(), &["pdf"], false).unwrap();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].file_name().unwrap(), "root.pdf");
    }

    #[test]
    fn test_find_files_case_insensitive() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("a.PDF"));
        touch(&tmp.path().join("b.Md"));
        touch(&tmp.path().join("c.MARKDOWN"));

        let manager = FileManager::default();
        assert_eq!(manager.find_files(tmp.path(), &["pdf"], true).unwrap().len(), 1);
        assert_eq!(
            manager.find_files(tmp.path(), &["md", "markdown"], true).unwrap().len(),
            2
        );
    }

    #[test]
    fn test_directories_named_like_inputs_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("chapter.md")).unwrap();
        touch(&tmp.path().join("chapter.md").join("intro.md"));

        let files = FileManager::default()
            .find_files(tmp.path(), &["md"], true)
            .unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("chapter.md/intro.md"));
    }

    #[test]
    fn test_output_path_simple() {
        let manager = FileManager::new("/out");
        let output = manager.output_path(Path::new("/some/path/document.pdf"), ".md", None);
        assert_eq!(output, PathBuf::from("/out/document.md"));
    }

    #[test]
    fn test_output_path_with_source_dir() {
        let manager = FileManager::new("/out");
        let output = manager.output_path(
            Path::new("/in/subdir/document.pdf"),
            "md",
            Some(Path::new("/in")),
        );
        assert_eq!(output, PathBuf::from("/out/subdir/document.md"));
    }

    #[test]
    fn test_output_path_outside_source_dir_falls_back_to_name() {
        let manager = FileManager::new("/out");
        let output = manager.output_path(
            Path::new("/elsewhere/notes.markdown"),
            "pdf",
            Some(Path::new("/in")),
        );
        assert_eq!(output, PathBuf::from("/out/notes.pdf"));
    }

    #[test]
    fn test_path_pairs_single_file() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("document.pdf");
        touch(&input);
        let manager = FileManager::new(tmp.path().join("output"));

        let pairs = manager.path_pairs(&input, &["pdf"], "md", true).unwrap();
        assert_eq!(
            pairs,
            vec![PathPair {
                input,
                output: tmp.path().join("output").join("document.md"),
            }]
        );
    }

    #[test]
    fn test_path_pairs_mirror_directory_structure() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("input");
        touch(&src.join("a.md"));
        touch(&src.join("guide").join("b.markdown"));
        touch(&src.join("guide").join("deep").join("c.MD"));
        touch(&src.join("guide").join("image.png"));
        let out = tmp.path().join("output");
        let manager = FileManager::new(&out);

        let pairs = manager
            .path_pairs(&src, &["md", "markdown"], "pdf", true)
            .unwrap();
        assert_eq!(pairs.len(), 3);
        for pair in &pairs {
            let rel_in = pair.input.strip_prefix(&src).unwrap();
            let rel_out = pair.output.strip_prefix(&out).unwrap();
            assert_eq!(rel_in.parent(), rel_out.parent());
            assert_eq!(rel_in.file_stem(), rel_out.file_stem());
            assert_eq!(rel_out.extension().unwrap(), "pdf");
        }
        assert!(pairs
            .iter()
            .any(|p| p.output == out.join("guide").join("deep").join("c.pdf")));
    }
}
