//! Digest computation for diff results.
//!
//! The digest is the hex SHA256 of the canonical JSON encoding. Tables are
//! key-sorted and columns are emitted in reconciled order, so equal results
//! always hash equally.

use crate::diff::model::DiffResult;
use crate::errors::Result;
use sha2::{Digest, Sha256};

/// Compute the digest of a diff result.
///
/// ## Returns
///
/// Hex-encoded SHA256 digest (64 characters)
///
/// ## Errors
///
/// Returns `TabDeltaError::Serialization` if JSON serialization fails.
pub fn result_digest(result: &DiffResult) -> Result<String> {
    let canonical = serde_json::to_string(result)?;
    Ok(hash_string(&canonical))
}

fn hash_string(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::engine::diff;
    use crate::model::{Dataset, KeySpec, Row};

    fn sample(name: &str) -> Dataset {
        Dataset::new(
            ["id", "name"],
            vec![Row::new().with("id", 1i64).with("name", name)],
        )
        .unwrap()
    }

    #[test]
    fn test_digest_is_hex_sha256() {
        let result = diff(&sample("Ann"), &sample("Ann"), &KeySpec::single("id")).unwrap();
        let digest = result_digest(&result).unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_digest_stable_across_runs() {
        let key = KeySpec::single("id");
        let a = diff(&sample("Ann"), &sample("Anne"), &key).unwrap();
        let b = diff(&sample("Ann"), &sample("Anne"), &key).unwrap();
        assert_eq!(result_digest(&a).unwrap(), result_digest(&b).unwrap());
    }

    #[test]
    fn test_digest_differs_on_change() {
        let key = KeySpec::single("id");
        let same = diff(&sample("Ann"), &sample("Ann"), &key).unwrap();
        let changed = diff(&sample("Ann"), &sample("Anne"), &key).unwrap();
        assert_ne!(
            result_digest(&same).unwrap(),
            result_digest(&changed).unwrap()
        );
    }
}
