//! Writing rendered artifacts to disk.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::debug;
use tempfile::NamedTempFile;

use crate::config::OutputFormat;

/// A rendered diagram on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    path: PathBuf,
    format: OutputFormat,
    size: usize,
}

impl Artifact {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Size of the written file in bytes.
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Writes `bytes` to `path`, replacing any previous file.
///
/// The bytes go to a temporary file in the same directory first, which is
/// then renamed over `path`; a failure leaves any existing file untouched.
pub(crate) fn write_atomic(
    path: &Path,
    bytes: &[u8],
    format: OutputFormat,
) -> std::io::Result<Artifact> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.flush()?;
    temp.persist(path).map_err(|err| err.error)?;
    debug!(path = path.display().to_string(), bytes = bytes.len(); "Artifact persisted");

    Ok(Artifact {
        path: path.to_path_buf(),
        format,
        size: bytes.len(),
    })
}
