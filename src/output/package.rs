//! Packaging collaborator

use log::{debug, warn};
use std::io;
use std::path::{Path, PathBuf};

/// One file placed into a package at a fixed internal path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    pub source: PathBuf,
    /// Path inside the package, e.g. `/Data/Datasources/Orders.tde`
    pub internal_path: String,
}

impl PackageEntry {
    pub fn new(source: impl Into<PathBuf>, internal_path: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            internal_path: internal_path.into(),
        }
    }
}

/// Bundles a document and its extract into a single package
pub trait Packager {
    fn package(&self, destination: &Path, entries: &[PackageEntry]) -> io::Result<()>;
}

/// Lays the package out as a directory using the internal paths
///
/// Archive compression is left to other `Packager` implementations. A
/// package directory this call created is removed again if copying fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectoryPackager;

impl Packager for DirectoryPackager {
    fn package(&self, destination: &Path, entries: &[PackageEntry]) -> io::Result<()> {
        let existed = destination.exists();
        let result = copy_entries(destination, entries);
        if result.is_err() && !existed && destination.exists() {
            if let Err(e) = std::fs::remove_dir_all(destination) {
                warn!("Could not remove partial package {}: {}", destination.display(), e);
            }
        }
        result
    }
}

fn copy_entries(destination: &Path, entries: &[PackageEntry]) -> io::Result<()> {
    std::fs::create_dir_all(destination)?;
    for entry in entries {
        let target = destination.join(entry.internal_path.trim_start_matches('/'));
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(&entry.source, &target)?;
        debug!("Packaged {} as {}", entry.source.display(), entry.internal_path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_layout() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("Orders.tds");
        std::fs::write(&doc, "<datasource/>").unwrap();

        let destination = dir.path().join("Orders.tdsx");
        DirectoryPackager
            .package(&destination, &[PackageEntry::new(&doc, "/Orders.tds")])
            .unwrap();

        let copied = std::fs::read_to_string(destination.join("Orders.tds")).unwrap();
        assert_eq!(copied, "<datasource/>");
    }

    #[test]
    fn test_missing_source_fails_without_partial_package() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("out.tds");
        std::fs::write(&doc, "<datasource/>").unwrap();
        let destination = dir.path().join("out.tdsx");

        let result = DirectoryPackager.package(
            &destination,
            &[
                PackageEntry::new(&doc, "/out.tds"),
                PackageEntry::new(dir.path().join("absent.tde"), "/Data/Datasources/absent.tde"),
            ],
        );
        assert!(result.is_err());
        assert!(!destination.exists());
    }
}
