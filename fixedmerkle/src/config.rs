//! Configuration of a fixed-depth Merkle tree.
//!
//! A [`Config`] fixes everything that shapes a tree:
//! - `depth`: number of levels below the root, between [`DEPTH_MIN`] and [`DEPTH_MAX`]
//! - `hash_size`: digest size in bytes, between [`HASH_SIZE_MIN`] and [`HASH_SIZE_MAX`]
//! - `hasher`: the [`NodeHasher`] producing `hash_size`-byte digests
//!
//! From these it derives the capacity (`all_leaves = 2^depth`), the node count
//! (`all_nodes = 2 * all_leaves - 1`) and the digests of empty subtrees.
//!
//! # Empty leaves
//! Leaf slots beyond the supplied leaves hold the digest of `hash_size` zero bytes. The
//! digest of a fully empty subtree rooted at level `k` is kept in [`Config::null_digest`],
//! so trees with few leaves do not rehash identical padding.
//!
//! # Usage Examples
//! ```
//! use std::sync::Arc;
//! use fixedmerkle::{config::Config, utils::hasher::Sha256Hasher};
//!
//! let config = Arc::new(Config::new(Sha256Hasher::new(), 2, 32).unwrap());
//! assert_eq!(config.all_leaves(), 4);
//! assert_eq!(config.all_nodes(), 7);
//! ```
//!
//! A config is immutable and can be shared by any number of trees.

use std::fmt;

use crate::def::{DEPTH_MAX, DEPTH_MIN, HASH_SIZE_MAX, HASH_SIZE_MIN};
use crate::error::MerkleError;
use crate::utils::hasher::{self, NodeHasher};

pub struct Config {
    hasher: Box<dyn NodeHasher>,
    depth: u32,
    hash_size: usize,
    all_leaves: u64,
    all_nodes: u64,
    // null_digests[k] is the root of an empty subtree whose top is at level k
    null_digests: Vec<Vec<u8>>,
}

impl Config {
    /// Validates the parameters and derives the tree dimensions.
    ///
    /// The checks run in this order and the first failure is returned: depth too small,
    /// depth too large, hash size too small, hash size too large, hash size not
    /// producible by `hasher`.
    pub fn new<H>(hasher: H, depth: u32, hash_size: usize) -> Result<Self, MerkleError>
    where
        H: NodeHasher + 'static,
    {
        if depth < DEPTH_MIN {
            return Err(MerkleError::DepthTooSmall { depth });
        }
        if depth > DEPTH_MAX {
            return Err(MerkleError::DepthTooLarge { depth });
        }
        if hash_size < HASH_SIZE_MIN {
            return Err(MerkleError::HashSizeTooSmall { hash_size });
        }
        if hash_size > HASH_SIZE_MAX {
            return Err(MerkleError::HashSizeTooLarge { hash_size });
        }
        if !hasher.supports_output_size(hash_size) {
            return Err(MerkleError::UnsupportedHashSize { hash_size });
        }

        let all_leaves = 1u64 << depth;
        let all_nodes = 2 * all_leaves - 1;
        let null_digests = create_null_digests(&hasher, depth, hash_size);

        Ok(Self {
            hasher: Box::new(hasher),
            depth,
            hash_size,
            all_leaves,
            all_nodes,
            null_digests,
        })
    }

    pub fn hasher(&self) -> &dyn NodeHasher {
        self.hasher.as_ref()
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn hash_size(&self) -> usize {
        self.hash_size
    }

    /// Leaf capacity, `2^depth`.
    pub fn all_leaves(&self) -> u64 {
        self.all_leaves
    }

    /// Total node count, `2 * all_leaves - 1`.
    pub fn all_nodes(&self) -> u64 {
        self.all_nodes
    }

    /// Length in bytes of every membership proof, `depth * hash_size`.
    pub fn proof_size(&self) -> usize {
        self.depth as usize * self.hash_size
    }

    /// Digest of an empty subtree whose top node sits at `level` (0 is the root level).
    /// At level `depth` this is the empty-leaf digest.
    ///
    /// # Panics
    /// Panics if `level > depth`.
    pub fn null_digest(&self, level: u32) -> &[u8] {
        &self.null_digests[level as usize]
    }

    /// Root digest of a tree built without leaves.
    pub fn empty_root(&self) -> &[u8] {
        self.null_digest(0)
    }

    /// Digest stored in the leaf slot for `data`.
    pub fn hash_leaf(&self, data: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; self.hash_size];
        hasher::leaf_hash_inplace(self.hasher(), &mut out, data);
        out
    }

    /// Parent digest `H(left ++ right)`.
    pub fn hash_children(&self, left: &[u8], right: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; self.hash_size];
        hasher::node_hash_inplace(self.hasher(), &mut out, left, right);
        out
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("depth", &self.depth)
            .field("hash_size", &self.hash_size)
            .field("all_leaves", &self.all_leaves)
            .field("all_nodes", &self.all_nodes)
            .finish_non_exhaustive()
    }
}

/// Computes the empty-subtree digest for every level, from the leaf level up to the root.
fn create_null_digests(hasher: &dyn NodeHasher, depth: u32, hash_size: usize) -> Vec<Vec<u8>> {
    let mut null_digests = vec![vec![0u8; hash_size]; depth as usize + 1];
    let zero_leaf = vec![0u8; hash_size];
    hasher::leaf_hash_inplace(hasher, &mut null_digests[depth as usize], &zero_leaf);
    for level in (0..depth as usize).rev() {
        let (upper, lower) = null_digests.split_at_mut(level + 1);
        let child = &lower[0];
        hasher::node_hash_inplace(hasher, &mut upper[level], child, child);
    }
    null_digests
}
