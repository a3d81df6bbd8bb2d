//! Fixed-depth binary Merkle tree with compact membership proofs.
//!
//! # Overview
//! A tree of depth `D` always has `2^D` leaf slots. The caller supplies up to that many
//! leaf payloads; each is hashed into its slot, and the remaining slots hold a fixed
//! empty-leaf digest, so the shape of the tree never depends on how many leaves were
//! given. Internal nodes are `H(left ++ right)` and the root digest commits to every slot.
//!
//! ## Components
//! - [`Config`]: validated depth, digest size and hash capability, shared by trees
//! - [`Tree`]: the built tree, immutable after construction
//! - [`Node`]: a view of one vertex of a tree
//! - [`merkletree::proof`]: membership proofs of `depth * hash_size` bytes, verified
//!   against a live tree or standalone against a root digest
//! - [`utils::hasher`]: the [`NodeHasher`] capability with SHA-2 and BLAKE2 adapters
//!
//! # Example Usage
//! ```
//! use std::sync::Arc;
//! use fixedmerkle::{Config, Tree, utils::hasher::Sha256Hasher};
//!
//! let config = Arc::new(Config::new(Sha256Hasher::new(), 2, 32).unwrap());
//! let tree = Tree::new(config.clone(), &[b"alpha", b"bravo", b"gamma"]).unwrap();
//!
//! let proof = tree.create_membership_proof(1).unwrap();
//! assert_eq!(proof.len(), 64);
//! assert!(tree.verify_membership_proof(1, &proof).unwrap());
//! assert!(!tree.verify_membership_proof(0, &proof).unwrap());
//!
//! let root = tree.root().to_vec();
//! assert!(fixedmerkle::verify_proof(&config, &root, b"bravo", 1, &proof).unwrap());
//! ```
//!
//! # Concurrency
//! Construction hashes large levels on the rayon pool. A built tree is read-only, so
//! proofs can be created and verified from many threads at once.

pub mod config;
pub mod def;
pub mod error;
pub mod merkletree;
pub mod utils;

pub use config::Config;
pub use error::MerkleError;
pub use merkletree::{
    compute_root_from_proof, proof_siblings, verify_proof, verify_proof_with_leaf_digest, Node,
    Tree,
};
pub use utils::hasher::NodeHasher;
