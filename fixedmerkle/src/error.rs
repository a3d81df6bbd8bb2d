use thiserror::Error;

use crate::def::{DEPTH_MAX, DEPTH_MIN, HASH_SIZE_MAX, HASH_SIZE_MIN};

/// Errors returned by tree configuration, construction and proof handling.
///
/// A proof that simply does not match is not an error: verification reports it as `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("depth must be {min} or more, got {depth}", min = DEPTH_MIN)]
    DepthTooSmall { depth: u32 },

    #[error("depth must be {max} or less, got {depth}", max = DEPTH_MAX)]
    DepthTooLarge { depth: u32 },

    #[error("hash size must be {min} or more, got {hash_size}", min = HASH_SIZE_MIN)]
    HashSizeTooSmall { hash_size: usize },

    #[error("hash size must be {max} or less, got {hash_size}", max = HASH_SIZE_MAX)]
    HashSizeTooLarge { hash_size: usize },

    #[error("hasher cannot produce {hash_size}-byte digests")]
    UnsupportedHashSize { hash_size: usize },

    #[error("too many leaves: got {count}, capacity is {capacity}")]
    TooManyLeaves { count: usize, capacity: u64 },

    #[error("leaf index {index} out of range (capacity {capacity})")]
    LeafIndexOutOfRange { index: u64, capacity: u64 },

    #[error("tree with {capacity} leaves cannot be allocated")]
    CapacityTooLarge { capacity: u64 },

    #[error("node {level}-{position} does not hash its children")]
    InconsistentNode { level: u32, position: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            "depth must be 1 or more, got 0",
            MerkleError::DepthTooSmall { depth: 0 }.to_string()
        );
        assert_eq!(
            "hash size must be 64 or less, got 65",
            MerkleError::HashSizeTooLarge { hash_size: 65 }.to_string()
        );
        assert_eq!(
            "leaf index 4 out of range (capacity 4)",
            MerkleError::LeafIndexOutOfRange {
                index: 4,
                capacity: 4
            }
            .to_string()
        );
    }
}
