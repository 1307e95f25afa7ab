//! Parallel batch classification.
//!
//! Each buffer is independent and read-only, so batches fan out over the
//! rayon pool with no shared mutable state. Results come back in input
//! order.

use super::io::read_artifact;
use super::pipeline::Classifier;
use crate::core::ClassificationResult;
use crate::error::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Classify many in-memory buffers.
pub fn classify_all<B>(classifier: &Classifier, buffers: &[B]) -> Vec<ClassificationResult>
where
    B: AsRef<[u8]> + Sync,
{
    buffers
        .par_iter()
        .map(|b| classifier.classify(b.as_ref()))
        .collect()
}

/// Read and classify files. A file that cannot be read yields its error in
/// place; the rest of the batch is unaffected.
pub fn classify_paths<P>(
    classifier: &Classifier,
    paths: &[P],
) -> Vec<(PathBuf, Result<ClassificationResult>)>
where
    P: AsRef<Path> + Sync,
{
    let limits = &classifier.config().limits;
    let results: Vec<_> = paths
        .par_iter()
        .map(|p| {
            let path = p.as_ref();
            let outcome = read_artifact(path, limits).map(|a| classifier.classify(a.bytes()));
            if let Err(e) = &outcome {
                warn!(path = %path.display(), error = %e, "artifact not classified");
            }
            (path.to_path_buf(), outcome)
        })
        .collect();

    let identified = results
        .iter()
        .filter(|(_, r)| matches!(r, Ok(c) if !c.is_unknown()))
        .count();
    info!(total = results.len(), identified, "batch complete");
    results
}
