//! Utility types and functions shared by the Merkle tree modules.
//!
//! - Hashing capability and the provided hash adapters

pub mod hasher;
