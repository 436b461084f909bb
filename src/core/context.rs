//! Validation context.
//!
//! The context bundles what every validator may read: the model snapshot, the
//! caller's settings and the file check used for file-backed forcing. It is
//! shared immutably by all validators of a pass.

use crate::core::settings::ValidationSettings;
use crate::model::HydroModel;
use std::path::Path;

/// Answers whether a referenced file exists.
pub trait FileCheck: Send + Sync {
    /// Whether `path` exists. I/O failures count as "does not exist".
    fn exists(&self, path: &Path) -> bool;
}

/// File check backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFiles;

impl FileCheck for DiskFiles {
    fn exists(&self, path: &Path) -> bool {
        match std::fs::metadata(path) {
            Ok(_) => true,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => false,
            Err(err) => {
                log::warn!("Could not stat '{}': {}", path.display(), err);
                false
            }
        }
    }
}

static DISK_FILES: DiskFiles = DiskFiles;

/// Context provided to each validator.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    /// The model under validation.
    pub model: &'a HydroModel,
    /// Settings of this pass.
    pub settings: &'a ValidationSettings,
    files: &'a dyn FileCheck,
}

impl std::fmt::Debug for ValidationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationContext")
            .field("model", &self.model.name)
            .field("settings", &self.settings)
            .field("files", &"<files>")
            .finish()
    }
}

impl<'a> ValidationContext<'a> {
    /// Create a context probing the local filesystem.
    pub fn new(model: &'a HydroModel, settings: &'a ValidationSettings) -> Self {
        Self {
            model,
            settings,
            files: &DISK_FILES,
        }
    }

    /// Replace the file check.
    pub fn with_file_check(mut self, files: &'a dyn FileCheck) -> Self {
        self.files = files;
        self
    }

    /// Whether a model file reference exists, resolved against the model directory.
    pub fn file_exists(&self, path: &Path) -> bool {
        self.files.exists(&self.settings.resolve(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;

    struct FixedFiles(HashSet<PathBuf>);

    impl FileCheck for FixedFiles {
        fn exists(&self, path: &Path) -> bool {
            self.0.contains(path)
        }
    }

    #[test]
    fn test_disk_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("wind.amu");
        std::fs::write(&file, "data").unwrap();

        assert!(DiskFiles.exists(&file));
        assert!(!DiskFiles.exists(&dir.path().join("missing.amu")));
    }

    #[test]
    fn test_relative_paths_resolve_against_model_directory() {
        let model = HydroModel::new("m");
        let settings = ValidationSettings::default().with_model_directory("/models/m");
        let files = FixedFiles([PathBuf::from("/models/m/wind.spw")].into_iter().collect());
        let ctx = ValidationContext::new(&model, &settings).with_file_check(&files);

        assert!(ctx.file_exists(Path::new("wind.spw")));
        assert!(!ctx.file_exists(Path::new("other.spw")));
    }
}
