//! Verification utilities for tree consistency checking.
//!
//! These walk a built tree and confirm that:
//! 1. Every internal node hashes its two children
//! 2. The leaf level holds the digests of a given payload list, padded with the
//!    empty-leaf digest

use crate::error::MerkleError;
use crate::utils::hasher;

use super::tree::Tree;

/// Verifies that every internal node equals `H(left ++ right)` of its children.
///
/// # Errors
/// [`MerkleError::InconsistentNode`] naming the first mismatching node, scanning from the
/// root level down.
pub fn check_hash_consistency(tree: &Tree) -> Result<(), MerkleError> {
    let config = tree.config();
    let mut sum = vec![0u8; config.hash_size()];
    for level in 0..tree.depth() {
        for position in 0..(1u64 << level) {
            hasher::node_hash_inplace(
                config.hasher(),
                &mut sum,
                tree.digest(level + 1, 2 * position),
                tree.digest(level + 1, 2 * position + 1),
            );
            if tree.digest(level, position) != sum.as_slice() {
                return Err(MerkleError::InconsistentNode { level, position });
            }
        }
    }
    Ok(())
}

/// Verifies that the leaf level was built from `leaves`.
///
/// # Errors
/// * [`MerkleError::TooManyLeaves`] if `leaves` exceeds the capacity
/// * [`MerkleError::InconsistentNode`] for the first leaf slot that differs
pub fn check_leaf_digests<L: AsRef<[u8]>>(tree: &Tree, leaves: &[L]) -> Result<(), MerkleError> {
    let config = tree.config();
    let depth = tree.depth();
    if leaves.len() as u64 > config.all_leaves() {
        return Err(MerkleError::TooManyLeaves {
            count: leaves.len(),
            capacity: config.all_leaves(),
        });
    }
    let mut sum = vec![0u8; config.hash_size()];
    for position in 0..config.all_leaves() {
        let expected = match leaves.get(position as usize) {
            Some(leaf) => {
                hasher::leaf_hash_inplace(config.hasher(), &mut sum, leaf.as_ref());
                sum.as_slice()
            }
            None => config.null_digest(depth),
        };
        if tree.digest(depth, position) != expected {
            return Err(MerkleError::InconsistentNode {
                level: depth,
                position,
            });
        }
    }
    Ok(())
}
