use std::sync::Arc;

use fixedmerkle::{
    merkletree::check,
    utils::hasher::{Blake2bHasher, Sha256Hasher, Sha512Hasher},
    Config, MerkleError, Tree,
};

fn scenario_leaves() -> Vec<Vec<u8>> {
    vec![vec![0x01; 8], vec![0x02; 8], vec![0x03; 8]]
}

#[test]
fn test_scenario_a_root() {
    let config = Arc::new(Config::new(Sha256Hasher::new(), 2, 32).unwrap());
    let tree = Tree::new(config, &scenario_leaves()).unwrap();

    let root = tree.root_node();
    assert_eq!(
        "5236e8d7c1384c10d767b92b8cd33e569ff33c17f26473c8f95df899f37c47fc",
        hex::encode(root.digest())
    );
    assert_eq!(
        "1e2abc6e477b5ac3b15d7f153989f49db219c0244ac94b9a1b778c9dbdd5b7e4",
        hex::encode(root.left().unwrap().digest())
    );
    assert_eq!(
        "904f88d8f64ff1aa68eda446f8ecf0eb0fc79252ef8d55ca3c17611c00b75f6f",
        hex::encode(root.right().unwrap().digest())
    );
}

#[test]
fn test_scenario_b_capacity() {
    let config = Arc::new(Config::new(Sha256Hasher::new(), 2, 32).unwrap());
    let leaves: Vec<Vec<u8>> = vec![Vec::new(); 5];
    match Tree::new(config, &leaves) {
        Err(MerkleError::TooManyLeaves { count, capacity }) => {
            assert_eq!(5, count);
            assert_eq!(4, capacity);
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_capacity_boundary() {
    for depth in 1..=6 {
        let config = Arc::new(Config::new(Blake2bHasher::new(), depth, 24).unwrap());
        let capacity = config.all_leaves() as usize;
        for count in [0, 1, capacity - 1, capacity, capacity + 1] {
            let leaves: Vec<Vec<u8>> = (0..count)
                .map(|i| (i as u32).to_be_bytes().to_vec())
                .collect();
            let result = Tree::new(config.clone(), &leaves);
            assert_eq!(
                count > capacity,
                result.is_err(),
                "depth {} count {}",
                depth,
                count
            );
        }
    }
}

#[test]
fn test_determinism() {
    let config = Arc::new(Config::new(Sha512Hasher::new(), 5, 64).unwrap());
    let leaves: Vec<String> = (0..20).map(|i| format!("entry-{}", i)).collect();
    let a = Tree::new(config.clone(), &leaves).unwrap();
    let b = Tree::new(config.clone(), &leaves).unwrap();
    assert_eq!(a.root(), b.root());

    // a second config with the same parameters gives the same root
    let other = Arc::new(Config::new(Sha512Hasher::new(), 5, 64).unwrap());
    let c = Tree::new(other, &leaves).unwrap();
    assert_eq!(a.root(), c.root());
}

#[test]
fn test_sensitivity() {
    let config = Arc::new(Config::new(Sha256Hasher::new(), 3, 32).unwrap());
    let leaves: Vec<Vec<u8>> = (0..8u8).map(|i| vec![i; 16]).collect();
    let base = Tree::new(config.clone(), &leaves).unwrap();
    for i in 0..leaves.len() {
        for byte in 0..16 {
            let mut changed = leaves.clone();
            changed[i][byte] ^= 0x01;
            let tree = Tree::new(config.clone(), &changed).unwrap();
            assert_ne!(base.root(), tree.root(), "leaf {} byte {}", i, byte);
        }
    }
}

#[test]
fn test_padding_is_not_an_empty_payload() {
    // an empty payload hashes to H(""), while a missing leaf is H(0x00 * hash_size)
    let config = Arc::new(Config::new(Sha256Hasher::new(), 2, 32).unwrap());
    let missing = Tree::new(config.clone(), &scenario_leaves()).unwrap();
    let mut leaves = scenario_leaves();
    leaves.push(Vec::new());
    let empty_payload = Tree::new(config, &leaves).unwrap();
    assert_ne!(missing.root(), empty_payload.root());
    assert_eq!(3, missing.leaf_count());
    assert_eq!(4, empty_payload.leaf_count());
}

#[test]
fn test_consistency_various_shapes() {
    let shapes = [(1, 1, 1), (2, 7, 3), (6, 32, 33), (9, 64, 300), (11, 20, 2048)];
    for (depth, hash_size, count) in shapes {
        let config = Arc::new(Config::new(Blake2bHasher::new(), depth, hash_size).unwrap());
        let leaves: Vec<Vec<u8>> = (0..count)
            .map(|i: u32| i.to_le_bytes().to_vec())
            .collect();
        let tree = Tree::new(config, &leaves).unwrap();
        assert_eq!(hash_size, tree.root().len());
        check::check_hash_consistency(&tree).unwrap();
        check::check_leaf_digests(&tree, &leaves).unwrap();
    }
}
