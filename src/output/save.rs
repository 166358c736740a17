//! Writing a finished datasource to disk

use log::{debug, info, warn};
use std::path::{Component, Path, PathBuf};

use super::error::OutputError;
use super::extract::ExtractWriter;
use super::package::{PackageEntry, Packager};
use crate::builder::{BuildError, DatasourceBuilder};

/// Where `save` places its artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    /// The `.tds` document
    pub document: PathBuf,
    /// The `.tdsx` package, present when an extract is bound
    pub package: Option<PathBuf>,
}

impl OutputTarget {
    pub fn for_document(dir: &Path, name: &str, has_extract: bool) -> Self {
        Self {
            document: dir.join(format!("{}.tds", name)),
            package: has_extract.then(|| dir.join(format!("{}.tdsx", name))),
        }
    }

    /// The artifact a caller should hand on: the package when there is one
    pub fn primary(&self) -> &Path {
        self.package.as_deref().unwrap_or(&self.document)
    }
}

/// Render the document and write it, plus extract and package when bound
///
/// The document is rendered fully in memory before anything touches the
/// filesystem. Collaborator failures are returned unchanged.
pub fn save(
    builder: &DatasourceBuilder,
    dir: &Path,
    name: &str,
    extract_writer: &dyn ExtractWriter,
    packager: &dyn Packager,
) -> Result<OutputTarget, OutputError> {
    validate_output_name(name)?;
    let xml = builder.to_xml_string()?;
    let target = OutputTarget::for_document(dir, name, builder.extract().is_some());
    if let Some(binding) = builder.extract() {
        validate_extract_name(&binding.filename, &target)?;
    }

    std::fs::create_dir_all(dir).map_err(|source| OutputError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    std::fs::write(&target.document, xml).map_err(|source| OutputError::Io {
        path: target.document.clone(),
        source,
    })?;
    debug!("Wrote {}", target.document.display());

    let (Some(binding), Some(package)) = (builder.extract(), target.package.as_ref()) else {
        info!("Saved datasource '{}' to {}", name, target.document.display());
        return Ok(target);
    };

    let staging = dir.join(&binding.filename);
    let columns = builder.extract_column_types();
    debug!("Creating extract {} with {} columns", staging.display(), columns.len());
    extract_writer
        .create(&columns, &staging)
        .map_err(|source| OutputError::Extract {
            path: staging.clone(),
            source,
        })?;

    let entries = [
        PackageEntry::new(&target.document, format!("/{}.tds", name)),
        PackageEntry::new(&staging, format!("/{}", binding.internal_path())),
    ];
    if let Err(source) = packager.package(package, &entries) {
        discard_staging(&staging);
        return Err(OutputError::Io {
            path: package.clone(),
            source,
        });
    }
    std::fs::remove_file(&staging).map_err(|source| OutputError::Io {
        path: staging.clone(),
        source,
    })?;

    info!("Saved datasource '{}' to {}", name, package.display());
    Ok(target)
}

/// Best-effort removal of the staged extract after a failed packaging step
fn discard_staging(staging: &Path) {
    if let Err(e) = std::fs::remove_file(staging) {
        warn!("Could not remove staged extract {}: {}", staging.display(), e);
    }
}

/// The staged extract sits next to the document and must not replace it
fn validate_extract_name(filename: &str, target: &OutputTarget) -> Result<(), BuildError> {
    let taken = [Some(&target.document), target.package.as_ref()];
    let collides = taken
        .into_iter()
        .flatten()
        .any(|path| path.file_name().is_some_and(|f| f == filename));
    if collides {
        return Err(BuildError::InvalidArgument(format!(
            "extract file '{}' would overwrite the saved document",
            filename
        )));
    }
    Ok(())
}

fn validate_output_name(name: &str) -> Result<(), BuildError> {
    if name.trim().is_empty() {
        return Err(BuildError::InvalidArgument("output name must not be empty".to_string()));
    }
    let candidate = Path::new(name);
    let traverses = candidate
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
    if candidate.is_absolute() || traverses || name.contains('/') || name.contains('\\') {
        return Err(BuildError::InvalidArgument(format!(
            "invalid output name '{}': path segments are not allowed",
            name
        )));
    }
    Ok(())
}
