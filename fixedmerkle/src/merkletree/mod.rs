//! Fixed-depth binary Merkle tree.
//!
//! - [`Tree`]: builds every level of the tree once and answers proof requests
//! - [`Node`]: a view of one vertex of a built tree
//! - [`proof`]: membership proof creation and verification
//! - [`check`]: tree consistency validation utilities

pub mod check;
pub mod node;
pub mod proof;
pub mod tree;

pub use node::Node;
pub use proof::{
    compute_root_from_proof, proof_siblings, verify_proof, verify_proof_with_leaf_digest,
};
pub use tree::Tree;
