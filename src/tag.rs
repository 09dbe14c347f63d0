use std::fs::File;
use std::path::Path;
use sha2::{Digest, Sha256};
use crate::error::{Result, VeerError};

/// Length of the short textual form of a fingerprint used as a derived tag.
const SHORT_TAG_LEN: usize = 10;

/// Computes the content fingerprint (hex sha256) of the file at `path`.
///
/// Fails with [`VeerError::SourceNotFound`] if the file does not exist or
/// cannot be read.
pub fn fingerprint_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|_| VeerError::SourceNotFound(path.to_path_buf()))?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)
        .map_err(|_| VeerError::SourceNotFound(path.to_path_buf()))?;
    Ok(hex::encode(hasher.finalize()))
}

/// Short tag derived from a content fingerprint. Stable for identical
/// content, so re-tracking the same binary without a tag is idempotent.
pub fn short_tag(fingerprint: &str) -> String {
    fingerprint.chars().take(SHORT_TAG_LEN).collect()
}
