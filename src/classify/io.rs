//! Bounded file input for recovered artifacts.
//!
//! Files are memory-mapped read-only and refused outright above the
//! configured ceiling. Classification needs the whole buffer up front, so
//! there is no partial or streaming read path.

use super::config::LimitConfig;
use crate::error::{Result, SiftError};
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A recovered file held in memory for classification.
pub struct Artifact {
    path: PathBuf,
    // None for zero-length files; they cannot be mapped.
    mmap: Option<Mmap>,
}

impl Artifact {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.mmap.is_none()
    }
}

impl std::fmt::Debug for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Artifact")
            .field("path", &self.path)
            .field("len", &self.len())
            .finish()
    }
}

/// Open and map `path`, enforcing `limits.max_file_size`.
pub fn read_artifact<P: AsRef<Path>>(path: P, limits: &LimitConfig) -> Result<Artifact> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let size = file.metadata()?.len();

    debug!(path = %path.display(), size, "opening artifact");

    if size > limits.max_file_size {
        warn!(
            path = %path.display(),
            size,
            limit = limits.max_file_size,
            "artifact too large"
        );
        return Err(SiftError::FileTooLarge {
            limit: limits.max_file_size,
            found: size,
        });
    }

    let mmap = if size == 0 {
        None
    } else {
        // Safety: read-only map of a regular file we just opened.
        Some(unsafe { Mmap::map(&file)? })
    };

    Ok(Artifact {
        path: path.to_path_buf(),
        mmap,
    })
}
