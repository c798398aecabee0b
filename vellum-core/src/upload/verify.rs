//! Upload verification: content digests and warning computation

use sha2::{Digest, Sha256};
use vellum_api_types::WarningMap;
use vellum_interfaces::{FileRepository, StorageError};

/// Hex-encoded SHA-256 of uploaded content.
pub fn content_digest(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// Compute the warnings an upload of `filename` with `digest` would raise.
///
/// Warnings are advisory: the caller decides whether they stop the upload
/// (no `ignorewarnings`) or are overridden. Checked against both the live
/// file table and the deletion archive, so re-uploading something that was
/// deleted surfaces `was-deleted` / `duplicate-archive`.
pub async fn check_warnings(
    files: &dyn FileRepository,
    filename: &str,
    digest: &str,
) -> Result<WarningMap, StorageError> {
    let mut warnings = WarningMap::new();

    if files.exists(filename).await? {
        warnings.insert("exists".to_string(), filename.to_string());
    }

    if let Some(other) = files.find_by_digest(digest).await? {
        if other.name != filename {
            warnings.insert("duplicate".to_string(), other.name);
        }
    }

    if files.archived_name(filename).await? {
        warnings.insert("was-deleted".to_string(), filename.to_string());
    }

    if files.archived_digest(digest).await? {
        warnings.insert("duplicate-archive".to_string(), filename.to_string());
    }

    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_stable_hex() {
        let digest = content_digest(b"wiki content");
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, content_digest(b"wiki content"));
        assert_ne!(digest, content_digest(b"other content"));
    }
}
