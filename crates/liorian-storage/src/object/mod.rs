//! Object store implementations.

pub mod memory;
#[cfg(feature = "s3")]
pub mod s3;

pub use memory::MemoryObjectStore;
#[cfg(feature = "s3")]
pub use s3::S3ObjectStore;

/// Split the part of `key` after `prefix` at the first `/` and return the
/// common prefix it belongs to, if any.
pub(crate) fn common_prefix(prefix: &str, key: &str) -> Option<String> {
    let rest = key.strip_prefix(prefix)?;
    let slash = rest.find('/')?;
    Some(format!("{prefix}{}", &rest[..=slash]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_prefix() {
        assert_eq!(
            common_prefix("training-progress/", "training-progress/u1/c1/m1/1.json"),
            Some("training-progress/u1/".to_string())
        );
        assert_eq!(common_prefix("training-progress/", "training-progress/file.json"), None);
        assert_eq!(common_prefix("quiz-results/", "training-progress/u1/x"), None);
    }
}
