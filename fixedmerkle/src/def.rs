//! Core definitions and constants for fixed-depth Merkle trees.
//!
//! The bounds below are checked once, when a [`Config`](crate::config::Config) is built.
//! A tree never re-validates them afterwards.

/// Smallest supported tree depth (two leaves under one root).
pub const DEPTH_MIN: u32 = 1;

/// Largest supported tree depth, giving a capacity of 2^32 leaves.
pub const DEPTH_MAX: u32 = 32;

/// Smallest digest size in bytes.
pub const HASH_SIZE_MIN: usize = 1;

/// Largest digest size in bytes (BLAKE2b / SHA-512 output).
pub const HASH_SIZE_MAX: usize = 64;

/// Levels holding at least this many nodes are hashed on the rayon pool.
/// Below it the cost of spawning tasks outweighs the hashing itself.
pub const PARALLEL_MIN_NODES: usize = 1 << 10;

/// Minimum number of nodes handed to a single rayon task.
pub const PARALLEL_CHUNK_NODES: usize = 64;
