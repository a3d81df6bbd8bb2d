//! Construction of a fixed-depth binary Merkle tree.
//!
//! The tree is stored as an arena of digests, one contiguous buffer per level:
//!
//! ```text
//!   Level:     0      1      2    ...   depth
//!   Nodes:     1      2      4    ...   2^depth   (leaf level)
//! ```
//!
//! Node `p` of level `k` lives at bytes `p * hash_size .. (p + 1) * hash_size` of
//! `levels[k]`; its children are nodes `2p` and `2p + 1` of level `k + 1`, and
//! `levels[k][p] = H(levels[k+1][2p] ++ levels[k+1][2p+1])`.
//!
//! Levels are built bottom-up. Nodes of one level are independent, so large levels are
//! hashed on the rayon pool and joined before the next level starts. Nodes whose whole
//! subtree lies beyond the supplied leaves are copied from [`Config::null_digest`].
//!
//! A tree is immutable once built. Construction either returns a complete tree or an error.

use std::fmt;
use std::sync::Arc;

use log::debug;
use rayon::prelude::*;

use crate::config::Config;
use crate::def::{PARALLEL_CHUNK_NODES, PARALLEL_MIN_NODES};
use crate::error::MerkleError;
use crate::utils::hasher::{self, NodeHasher};

use super::node::Node;

pub struct Tree {
    config: Arc<Config>,
    levels: Vec<Vec<u8>>,
    leaf_count: u64,
}

impl Tree {
    /// Builds the tree over `leaves`, padding the remaining slots with the empty-leaf digest.
    ///
    /// # Arguments
    /// * `config` - Shared tree configuration
    /// * `leaves` - Leaf payloads in slot order, at most `config.all_leaves()` of them
    ///
    /// # Errors
    /// * [`MerkleError::TooManyLeaves`] if more leaves are supplied than the tree holds
    /// * [`MerkleError::CapacityTooLarge`] if the digest arena cannot be allocated
    pub fn new<L>(config: Arc<Config>, leaves: &[L]) -> Result<Self, MerkleError>
    where
        L: AsRef<[u8]> + Sync,
    {
        let capacity = config.all_leaves();
        if leaves.len() as u64 > capacity {
            return Err(MerkleError::TooManyLeaves {
                count: leaves.len(),
                capacity,
            });
        }

        let depth = config.depth();
        let hash_size = config.hash_size();
        let mut levels = Vec::with_capacity(depth as usize + 1);

        let mut leaf_level = alloc_level(capacity, hash_size, capacity)?;
        let (used, unused) = leaf_level.split_at_mut(leaves.len() * hash_size);
        hash_leaves(config.hasher(), leaves, used, hash_size);
        fill_null(unused, config.null_digest(depth));
        levels.push(leaf_level);

        // number of nodes in the current level with at least one supplied leaf below
        let mut live = leaves.len();
        for level in (0..depth).rev() {
            let mut parents = alloc_level(1u64 << level, hash_size, capacity)?;
            live = live.div_ceil(2);
            let children = &levels[levels.len() - 1];
            let (used, unused) = parents.split_at_mut(live * hash_size);
            hash_level(config.hasher(), children, used, hash_size);
            fill_null(unused, config.null_digest(level));
            levels.push(parents);
        }
        levels.reverse();

        debug!(
            "built merkle tree depth:{} leaves:{}/{} root:{:02x?}",
            depth,
            leaves.len(),
            capacity,
            &levels[0][..hash_size]
        );

        Ok(Self {
            config,
            levels,
            leaf_count: leaves.len() as u64,
        })
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn depth(&self) -> u32 {
        self.config.depth()
    }

    /// Number of leaves supplied at construction. Slots from here on hold the empty-leaf digest.
    pub fn leaf_count(&self) -> u64 {
        self.leaf_count
    }

    /// Root digest, `hash_size` bytes.
    pub fn root(&self) -> &[u8] {
        self.digest(0, 0)
    }

    pub fn root_node(&self) -> Node<'_> {
        Node::new(self, 0, 0)
    }

    /// Returns the node at `position` of `level`, or `None` if there is no such node.
    pub fn node(&self, level: u32, position: u64) -> Option<Node<'_>> {
        if level > self.depth() || position >= 1u64 << level {
            return None;
        }
        Some(Node::new(self, level, position))
    }

    /// Stored digest of the leaf slot at `index`.
    pub fn leaf(&self, index: u64) -> Result<&[u8], MerkleError> {
        self.check_index(index)?;
        Ok(self.digest(self.depth(), index))
    }

    pub(crate) fn check_index(&self, index: u64) -> Result<(), MerkleError> {
        let capacity = self.config.all_leaves();
        if index >= capacity {
            return Err(MerkleError::LeafIndexOutOfRange { index, capacity });
        }
        Ok(())
    }

    /// Digest of node `position` at `level`. Callers guarantee both are in range.
    pub(crate) fn digest(&self, level: u32, position: u64) -> &[u8] {
        let hash_size = self.config.hash_size();
        let start = position as usize * hash_size;
        &self.levels[level as usize][start..start + hash_size]
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("config", &self.config)
            .field("leaf_count", &self.leaf_count)
            .field("root", &self.root_node())
            .finish()
    }
}

/// Allocates a zeroed level of `nodes` digests, failing instead of aborting when the
/// allocation cannot be satisfied.
fn alloc_level(nodes: u64, hash_size: usize, capacity: u64) -> Result<Vec<u8>, MerkleError> {
    let len = usize::try_from(nodes)
        .ok()
        .and_then(|n| n.checked_mul(hash_size))
        .ok_or(MerkleError::CapacityTooLarge { capacity })?;
    let mut level = Vec::new();
    level
        .try_reserve_exact(len)
        .map_err(|_| MerkleError::CapacityTooLarge { capacity })?;
    level.resize(len, 0);
    Ok(level)
}

fn fill_null(target: &mut [u8], null_digest: &[u8]) {
    for slot in target.chunks_exact_mut(null_digest.len()) {
        slot.copy_from_slice(null_digest);
    }
}

fn hash_leaves<L>(hasher: &dyn NodeHasher, leaves: &[L], target: &mut [u8], hash_size: usize)
where
    L: AsRef<[u8]> + Sync,
{
    let job = |(i, slot): (usize, &mut [u8])| {
        hasher::leaf_hash_inplace(hasher, slot, leaves[i].as_ref());
    };
    if leaves.len() >= PARALLEL_MIN_NODES {
        target
            .par_chunks_mut(hash_size)
            .with_min_len(PARALLEL_CHUNK_NODES)
            .enumerate()
            .for_each(job);
    } else {
        target.chunks_mut(hash_size).enumerate().for_each(job);
    }
}

/// Hashes the first `parents.len() / hash_size` parents of a level from `children`.
fn hash_level(hasher: &dyn NodeHasher, children: &[u8], parents: &mut [u8], hash_size: usize) {
    let job = |(p, slot): (usize, &mut [u8])| {
        let left = 2 * p * hash_size;
        hasher::node_hash_inplace(
            hasher,
            slot,
            &children[left..left + hash_size],
            &children[left + hash_size..left + 2 * hash_size],
        );
    };
    if parents.len() / hash_size >= PARALLEL_MIN_NODES {
        parents
            .par_chunks_mut(hash_size)
            .with_min_len(PARALLEL_CHUNK_NODES)
            .enumerate()
            .for_each(job);
    } else {
        parents.chunks_mut(hash_size).enumerate().for_each(job);
    }
}
