//! Membership proofs.
//!
//! A proof for leaf `index` is the concatenation of `depth` sibling digests, ordered from
//! the leaf level up to the level just below the root:
//!
//! ```text
//!   proof = sibling(depth) ++ sibling(depth - 1) ++ ... ++ sibling(1)
//! ```
//!
//! where `sibling(k)` is the digest of the level-`k` node whose position differs from the
//! path node's position only in its lowest bit. The proof is always
//! `depth * hash_size` bytes long.
//!
//! To verify, the path is recomputed from a leaf digest: at each level the parity of the
//! path node's position decides whether the running digest is the left (even) or the
//! right (odd) operand. The result must equal the root byte for byte. A proof that does
//! not match, including one of the wrong length, verifies as `false`; only an index
//! beyond the tree's capacity is an error.

use std::slice::ChunksExact;

use log::trace;

use crate::config::Config;
use crate::error::MerkleError;
use crate::utils::hasher;

use super::tree::Tree;

impl Tree {
    /// Creates the membership proof for the leaf slot at `index`.
    ///
    /// # Errors
    /// [`MerkleError::LeafIndexOutOfRange`] if `index >= all_leaves`.
    pub fn create_membership_proof(&self, index: u64) -> Result<Vec<u8>, MerkleError> {
        self.check_index(index)?;
        let mut proof = Vec::with_capacity(self.config().proof_size());
        let mut position = index;
        for level in (1..=self.depth()).rev() {
            proof.extend_from_slice(self.digest(level, position ^ 1));
            position >>= 1;
        }
        Ok(proof)
    }

    /// Checks `proof` against this tree's own leaf digest at `index` and its own root.
    ///
    /// The leaf value comes from the tree, not from the caller, so this confirms that the
    /// proof and the tree agree. Use [`verify_proof`] to check caller-held leaf data
    /// against a root without a tree.
    ///
    /// # Errors
    /// [`MerkleError::LeafIndexOutOfRange`] if `index >= all_leaves`, reported before the
    /// proof is looked at.
    pub fn verify_membership_proof(&self, index: u64, proof: &[u8]) -> Result<bool, MerkleError> {
        let leaf_digest = self.leaf(index)?;
        let computed = compute_root_from_proof(self.config(), leaf_digest, index, proof)?;
        Ok(computed.is_some_and(|root| root == self.root()))
    }
}

/// Splits a proof into its sibling digests, leaf level first.
///
/// Returns `None` if the proof is not exactly `depth * hash_size` bytes.
pub fn proof_siblings<'a>(config: &Config, proof: &'a [u8]) -> Option<ChunksExact<'a, u8>> {
    if proof.len() != config.proof_size() {
        return None;
    }
    Some(proof.chunks_exact(config.hash_size()))
}

/// Recomputes the root digest implied by `proof` for a leaf digest at `index`.
///
/// Returns `Ok(None)` if the proof or the leaf digest has the wrong length.
///
/// # Errors
/// [`MerkleError::LeafIndexOutOfRange`] if `index >= all_leaves`.
pub fn compute_root_from_proof(
    config: &Config,
    leaf_digest: &[u8],
    index: u64,
    proof: &[u8],
) -> Result<Option<Vec<u8>>, MerkleError> {
    check_index(config, index)?;
    let hash_size = config.hash_size();
    let siblings = match proof_siblings(config, proof) {
        Some(siblings) if leaf_digest.len() == hash_size => siblings,
        _ => {
            trace!(
                "malformed proof: {} bytes, leaf digest {} bytes",
                proof.len(),
                leaf_digest.len()
            );
            return Ok(None);
        }
    };

    let mut current = leaf_digest.to_vec();
    let mut parent = vec![0u8; hash_size];
    let mut position = index;
    for sibling in siblings {
        // an odd position is a right child, so the sibling goes first
        hasher::node_hash_inplace_x(
            config.hasher(),
            &mut parent,
            &current,
            sibling,
            position & 1 == 1,
        );
        std::mem::swap(&mut current, &mut parent);
        position >>= 1;
    }
    Ok(Some(current))
}

/// Verifies that `leaf` is stored at `index` under `root`, without a live tree.
///
/// # Errors
/// [`MerkleError::LeafIndexOutOfRange`] if `index >= all_leaves`.
pub fn verify_proof(
    config: &Config,
    root: &[u8],
    leaf: &[u8],
    index: u64,
    proof: &[u8],
) -> Result<bool, MerkleError> {
    check_index(config, index)?;
    verify_proof_with_leaf_digest(config, root, &config.hash_leaf(leaf), index, proof)
}

/// Like [`verify_proof`], starting from an already hashed leaf. This is the form to use
/// for empty slots, whose digest is [`Config::null_digest`] at level `depth`.
pub fn verify_proof_with_leaf_digest(
    config: &Config,
    root: &[u8],
    leaf_digest: &[u8],
    index: u64,
    proof: &[u8],
) -> Result<bool, MerkleError> {
    let computed = compute_root_from_proof(config, leaf_digest, index, proof)?;
    Ok(computed.is_some_and(|computed| computed == root))
}

fn check_index(config: &Config, index: u64) -> Result<(), MerkleError> {
    let capacity = config.all_leaves();
    if index >= capacity {
        return Err(MerkleError::LeafIndexOutOfRange { index, capacity });
    }
    Ok(())
}
