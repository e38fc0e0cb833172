//! Class search path: a classes directory plus discovered archives.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::BridgeError;

/// File extensions treated as packaged libraries.
pub const ARCHIVE_EXTENSIONS: &[&str] = &["jar", "war"];

/// One class path entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassPathEntry {
    Directory(PathBuf),
    Archive(PathBuf),
}

impl ClassPathEntry {
    pub fn path(&self) -> &Path {
        match self {
            ClassPathEntry::Directory(path) | ClassPathEntry::Archive(path) => path,
        }
    }
}

/// Ordered list of places classes are looked up in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassPath {
    entries: Vec<ClassPathEntry>,
}

fn is_archive(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ARCHIVE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

impl ClassPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a class path from `classes_dir` (first entry) followed by
    /// every archive in `libs_dir`, sorted by file name.
    ///
    /// # Returns
    /// `Err(BridgeError::Io)` if `libs_dir` cannot be listed.
    pub fn discover(
        classes_dir: impl Into<PathBuf>,
        libs_dir: impl AsRef<Path>,
    ) -> Result<Self, BridgeError> {
        let libs_dir = libs_dir.as_ref();
        let io_error = |source| BridgeError::Io {
            path: libs_dir.to_path_buf(),
            source,
        };

        let mut archives = Vec::new();
        for entry in std::fs::read_dir(libs_dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.is_file() && is_archive(&path) {
                archives.push(path);
            }
        }
        archives.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let mut class_path = Self::new();
        class_path.push_directory(classes_dir);
        for archive in archives {
            class_path.push_archive(archive);
        }
        tracing::debug!(%class_path, "class path discovered");
        Ok(class_path)
    }

    pub fn push_directory(&mut self, path: impl Into<PathBuf>) {
        self.entries.push(ClassPathEntry::Directory(path.into()));
    }

    pub fn push_archive(&mut self, path: impl Into<PathBuf>) {
        self.entries.push(ClassPathEntry::Archive(path.into()));
    }

    pub fn entries(&self) -> &[ClassPathEntry] {
        &self.entries
    }

    /// Returns true if an archive with this file name is on the path.
    pub fn contains_archive(&self, file_name: &str) -> bool {
        self.entries.iter().any(|entry| match entry {
            ClassPathEntry::Archive(path) => path
                .file_name()
                .is_some_and(|name| name.to_string_lossy() == file_name),
            ClassPathEntry::Directory(_) => false,
        })
    }

    /// Entries as `file://` URLs; directories end with a slash.
    pub fn urls(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| match entry {
                ClassPathEntry::Directory(path) => format!("file://{}/", path.display()),
                ClassPathEntry::Archive(path) => format!("file://{}", path.display()),
            })
            .collect()
    }
}

impl fmt::Display for ClassPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paths: Vec<String> = self
            .entries
            .iter()
            .map(|e| e.path().display().to_string())
            .collect();
        f.write_str(&paths.join(":"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_extensions_are_case_insensitive() {
        assert!(is_archive(Path::new("lib/driver.jar")));
        assert!(is_archive(Path::new("lib/APP.WAR")));
        assert!(!is_archive(Path::new("lib/readme.txt")));
        assert!(!is_archive(Path::new("lib/jar")));
    }

    #[test]
    fn urls_mark_directories() {
        let mut class_path = ClassPath::new();
        class_path.push_directory("/opt/bench/bin");
        class_path.push_archive("/opt/bench/lib/a.jar");
        assert_eq!(
            class_path.urls(),
            vec!["file:///opt/bench/bin/", "file:///opt/bench/lib/a.jar"]
        );
        assert_eq!(class_path.to_string(), "/opt/bench/bin:/opt/bench/lib/a.jar");
        assert!(class_path.contains_archive("a.jar"));
        assert!(!class_path.contains_archive("bin"));
    }
}
