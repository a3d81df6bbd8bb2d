//! Hashing capability used to build and check Merkle trees.
//!
//! The tree never talks to a concrete hash function. It goes through [`NodeHasher`], which
//! is handed the pieces of one input in order and writes a digest of the requested size.
//! Each call creates its own digest instance, so one hasher can serve many threads.
//!
//! Provided implementations:
//! - [`DigestHasher`]: any fixed-output RustCrypto digest, e.g. [`Sha256Hasher`]
//! - [`VarDigestHasher`]: variable-output BLAKE2, e.g. [`Blake2bHasher`] (1 to 64 bytes)

use std::fmt;
use std::marker::PhantomData;

use blake2::{Blake2bVar, Blake2sVar};
use sha2::digest::{Digest, Update, VariableOutput};
use sha2::{Sha256, Sha512};

/// Hash abstraction used by the Merkle tree.
pub trait NodeHasher: Send + Sync {
    /// Returns true if this hasher can produce digests of exactly `size` bytes.
    fn supports_output_size(&self, size: usize) -> bool;

    /// Hashes the concatenation of `parts` and writes the digest into `out`.
    ///
    /// # Panics
    /// Panics if `out.len()` is a size rejected by [`NodeHasher::supports_output_size`].
    fn hash_into(&self, parts: &[&[u8]], out: &mut [u8]);
}

/// Adapter for fixed-output digests such as SHA-256.
pub struct DigestHasher<D> {
    marker: PhantomData<fn() -> D>,
}

/// SHA-256, 32-byte digests.
pub type Sha256Hasher = DigestHasher<Sha256>;

/// SHA-512, 64-byte digests.
pub type Sha512Hasher = DigestHasher<Sha512>;

impl<D> DigestHasher<D> {
    pub fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<D> Default for DigestHasher<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Clone for DigestHasher<D> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<D> fmt::Debug for DigestHasher<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DigestHasher<{}>", std::any::type_name::<D>())
    }
}

impl<D: Digest> NodeHasher for DigestHasher<D> {
    fn supports_output_size(&self, size: usize) -> bool {
        size == <D as Digest>::output_size()
    }

    fn hash_into(&self, parts: &[&[u8]], out: &mut [u8]) {
        let mut hasher = D::new();
        for part in parts {
            Digest::update(&mut hasher, part);
        }
        out.copy_from_slice(&hasher.finalize());
    }
}

/// Adapter for variable-output digests. The output size is taken from the target buffer.
pub struct VarDigestHasher<V> {
    marker: PhantomData<fn() -> V>,
}

/// BLAKE2b with 1 to 64 byte digests.
pub type Blake2bHasher = VarDigestHasher<Blake2bVar>;

/// BLAKE2s with 1 to 32 byte digests.
pub type Blake2sHasher = VarDigestHasher<Blake2sVar>;

impl<V> VarDigestHasher<V> {
    pub fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<V> Default for VarDigestHasher<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for VarDigestHasher<V> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for VarDigestHasher<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VarDigestHasher<{}>", std::any::type_name::<V>())
    }
}

impl<V: VariableOutput + Update> NodeHasher for VarDigestHasher<V> {
    fn supports_output_size(&self, size: usize) -> bool {
        (1..=V::MAX_OUTPUT_SIZE).contains(&size)
    }

    fn hash_into(&self, parts: &[&[u8]], out: &mut [u8]) {
        let mut hasher = match V::new(out.len()) {
            Ok(hasher) => hasher,
            Err(_) => panic!("unsupported digest size {}", out.len()),
        };
        for part in parts {
            hasher.update(part);
        }
        if hasher.finalize_variable(out).is_err() {
            panic!("unsupported digest size {}", out.len());
        }
    }
}

/// Hashes one leaf payload into `target`.
pub fn leaf_hash_inplace(hasher: &dyn NodeHasher, target: &mut [u8], data: &[u8]) {
    hasher.hash_into(&[data], target);
}

/// Computes `H(src_a ++ src_b)` and stores it in-place.
///
/// # Arguments
/// * `hasher` - Hash capability of the tree
/// * `target` - Buffer receiving the parent digest
/// * `src_a` - Left child digest
/// * `src_b` - Right child digest
pub fn node_hash_inplace(hasher: &dyn NodeHasher, target: &mut [u8], src_a: &[u8], src_b: &[u8]) {
    hasher.hash_into(&[src_a, src_b], target);
}

/// Like [`node_hash_inplace`], but swaps the operands when `exchange_ab` is set.
pub fn node_hash_inplace_x(
    hasher: &dyn NodeHasher,
    target: &mut [u8],
    src_a: &[u8],
    src_b: &[u8],
    exchange_ab: bool,
) {
    if exchange_ab {
        node_hash_inplace(hasher, target, src_b, src_a)
    } else {
        node_hash_inplace(hasher, target, src_a, src_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256() {
        let hasher = Sha256Hasher::new();
        assert!(hasher.supports_output_size(32));
        assert!(!hasher.supports_output_size(31));
        assert!(!hasher.supports_output_size(64));

        let mut out = [0u8; 32];
        leaf_hash_inplace(&hasher, &mut out, &[]);
        assert_eq!(
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            hex::encode(out)
        );
    }

    #[test]
    fn test_parts_are_concatenated() {
        let hasher = Sha256Hasher::new();
        let mut split = [0u8; 32];
        let mut joined = [0u8; 32];
        node_hash_inplace(&hasher, &mut split, b"ab", b"cd");
        leaf_hash_inplace(&hasher, &mut joined, b"abcd");
        assert_eq!(split, joined);

        let mut swapped = [0u8; 32];
        node_hash_inplace_x(&hasher, &mut swapped, b"cd", b"ab", true);
        assert_eq!(split, swapped);
    }

    #[test]
    fn test_blake2_sizes() {
        let b2b = Blake2bHasher::new();
        assert!(!b2b.supports_output_size(0));
        assert!(b2b.supports_output_size(1));
        assert!(b2b.supports_output_size(64));
        assert!(!b2b.supports_output_size(65));

        let b2s = Blake2sHasher::new();
        assert!(b2s.supports_output_size(32));
        assert!(!b2s.supports_output_size(33));

        let mut out = [0u8; 64];
        leaf_hash_inplace(&b2b, &mut out, b"abc");
        assert_eq!(
            "ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d1\
             7d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923",
            hex::encode(out)
        );
    }

    #[test]
    #[should_panic(expected = "unsupported digest size 65")]
    fn test_blake2b_too_long() {
        let mut out = [0u8; 65];
        leaf_hash_inplace(&Blake2bHasher::new(), &mut out, b"abc");
    }
}
