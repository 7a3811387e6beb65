//! Temporary configuration files handed to backends.

use std::fs;
use std::path::{Path, PathBuf};

use crate::environment::Section;
use crate::error::Result;
use crate::template;

/// A configuration file materialized for one backend invocation.
///
/// The file lives in its own private directory under the operation temp
/// root, so concurrent operations never see each other's files. The
/// directory and everything in it are removed when the value is
/// dropped, on success and failure alike.
#[derive(Debug)]
pub struct TempEnvFile {
    // Held for its Drop impl, which removes the directory.
    _dir: tempfile::TempDir,
    path: PathBuf,
}

impl TempEnvFile {
    /// Writes the flattened sections to a fresh private file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory or file cannot be created.
    pub fn new(temp_root: &Path, prefix: &str, sections: &[Section]) -> Result<Self> {
        fs::create_dir_all(temp_root)?;
        let dir = tempfile::Builder::new().prefix(prefix).tempdir_in(temp_root)?;
        let path = dir.path().join("env.env");
        fs::write(&path, template::encode_env(sections))?;
        Ok(Self { _dir: dir, path })
    }

    /// Path of the materialized file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Section;

    fn sections() -> Vec<Section> {
        let mut section = Section::new("S");
        section.variables.insert("KEY".into(), "value".into());
        vec![section]
    }

    #[test]
    fn test_file_holds_flattened_variables() {
        let root = tempfile::tempdir().unwrap();
        let env_file = TempEnvFile::new(root.path(), "configurations", &sections()).unwrap();

        let contents = fs::read_to_string(env_file.path()).unwrap();
        assert_eq!(contents, "KEY=value");
    }

    #[test]
    fn test_file_removed_on_drop() {
        let root = tempfile::tempdir().unwrap();
        let path = {
            let env_file = TempEnvFile::new(root.path(), "configurations", &sections()).unwrap();
            env_file.path().to_path_buf()
        };
        assert!(!path.exists());
        assert!(!path.parent().unwrap().exists());
    }

    #[test]
    fn test_concurrent_files_are_private() {
        let root = tempfile::tempdir().unwrap();
        let first = TempEnvFile::new(root.path(), "configurations", &sections()).unwrap();
        let second = TempEnvFile::new(root.path(), "configurations", &sections()).unwrap();

        assert_ne!(first.path(), second.path());
        assert!(first.path().exists());
        assert!(second.path().exists());
    }
}
