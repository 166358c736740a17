//! Output (verb module)
//!
//! Writes rendered documents to disk and drives the extract-writer and
//! packaging collaborators.

mod error;
mod extract;
mod package;
mod save;

pub use error::OutputError;
pub use extract::{ExtractWriter, JsonManifestWriter};
pub use package::{DirectoryPackager, PackageEntry, Packager};
pub use save::{save, OutputTarget};
