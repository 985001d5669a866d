//! Output file writers.
//!
//! Generation never touches the disk. Finished files are handed to a
//! [`FileWriter`], which decides whether anything needs to change.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use parking_lot::RwLock;

use formgen_codegen::{GenResultCode, OutputFile};

use crate::error::{FormgenError, Result};

/// Destination for generated files.
///
/// Writers are shared by the threads generating different forms.
pub trait FileWriter: Send + Sync {
    /// Write `file` if its content differs from what is already there.
    ///
    /// Returns [`GenResultCode::AlreadyExists`] for unchanged content.
    fn write(&self, file: &OutputFile) -> Result<GenResultCode>;
}

/// Writes files below a root directory, skipping files whose content is
/// unchanged.
#[derive(Debug, Clone)]
pub struct DiskWriter {
    root: PathBuf,
}

impl DiskWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where `file` ends up.
    pub fn path_of(&self, file: &OutputFile) -> PathBuf {
        self.root.join(file.full_path())
    }
}

impl FileWriter for DiskWriter {
    fn write(&self, file: &OutputFile) -> Result<GenResultCode> {
        let path = self.path_of(file);
        let io_error = |source: std::io::Error| FormgenError::Io {
            path: path.clone(),
            source,
        };

        match std::fs::read(&path) {
            Ok(existing) if existing == file.content.as_bytes() => return Ok(GenResultCode::AlreadyExists),
            Ok(_) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(io_error)?;
                }
            }
            Err(err) => return Err(io_error(err)),
        }

        std::fs::write(&path, &file.content).map_err(io_error)?;
        Ok(GenResultCode::Created)
    }
}

/// Compares against an in-memory copy of the existing files and reports what
/// a real run would write.
#[derive(Debug, Default)]
pub struct DryRunWriter {
    existing: RwLock<IndexMap<String, String>>,
    pending: RwLock<Vec<String>>,
}

impl DryRunWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `path` (with extension) already holds `content`.
    pub fn with_existing(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.existing.write().insert(path.into(), content.into());
        self
    }

    /// Paths a real run would have written, in the order they were reported.
    pub fn pending(&self) -> Vec<String> {
        self.pending.read().clone()
    }
}

impl FileWriter for DryRunWriter {
    fn write(&self, file: &OutputFile) -> Result<GenResultCode> {
        let path = file.full_path();
        if self.existing.read().get(&path) == Some(&file.content) {
            return Ok(GenResultCode::AlreadyExists);
        }
        self.pending.write().push(path);
        Ok(GenResultCode::NeedsWriting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_writer_skips_unchanged_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = DiskWriter::new(dir.path());
        let file = OutputFile::new("forms/main_frame", ".py", "import wx\n");

        assert_eq!(writer.write(&file).unwrap(), GenResultCode::Created);
        let path = dir.path().join("forms/main_frame.py");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "import wx\n");

        assert_eq!(writer.write(&file).unwrap(), GenResultCode::AlreadyExists);

        let changed = OutputFile::new("forms/main_frame", ".py", "import wx\nimport wx.adv\n");
        assert_eq!(writer.write(&changed).unwrap(), GenResultCode::Created);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), changed.content);
    }

    #[test]
    fn test_disk_writer_reports_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the output directory should be.
        std::fs::write(dir.path().join("blocked"), "").unwrap();
        let writer = DiskWriter::new(dir.path());
        let file = OutputFile::new("blocked/dialog", ".h", "#pragma once\n");
        assert!(matches!(writer.write(&file), Err(FormgenError::Io { .. })));
    }

    #[test]
    fn test_dry_run_never_writes() {
        let writer = DryRunWriter::new().with_existing("about.rb", "require 'wx'\n");
        let same = OutputFile::new("about", ".rb", "require 'wx'\n");
        let other = OutputFile::new("main", ".rb", "require 'wx'\n");

        assert_eq!(writer.write(&same).unwrap(), GenResultCode::AlreadyExists);
        assert_eq!(writer.write(&other).unwrap(), GenResultCode::NeedsWriting);
        assert_eq!(writer.pending(), vec!["main.rb".to_string()]);
    }
}
