//! Incremental Merkle tree builder
//!
//! Leaves are appended in order and combined eagerly: `pending[h]` holds the
//! root of a complete subtree of height `h` still waiting for its right
//! sibling, like the bits of a binary counter. When the root is read, the
//! leftover subtrees are folded right to left, so a lone right-most subtree
//! is promoted unchanged instead of being paired with a copy of itself.

use super::{NodeHash, Proof, ProofStep, Side};
use digest::Digest;
use std::marker::PhantomData;

/// Domain separation byte for leaf hashes
pub const LEAF_PREFIX: u8 = 0x00;

/// Domain separation byte for interior hashes
pub const INTERIOR_PREFIX: u8 = 0x01;

/// Hash a leaf: `H(0x00 || data)`
pub fn leaf_hash<D: Digest>(data: &[u8]) -> NodeHash {
    let mut hasher = D::new();
    hasher.update([LEAF_PREFIX]);
    hasher.update(data);
    NodeHash::from_bytes(hasher.finalize().to_vec())
}

/// Hash an interior node: `H(0x01 || left || right)`
pub fn interior_hash<D: Digest>(left: &NodeHash, right: &NodeHash) -> NodeHash {
    let mut hasher = D::new();
    hasher.update([INTERIOR_PREFIX]);
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    NodeHash::from_bytes(hasher.finalize().to_vec())
}

#[derive(Clone, Debug)]
struct Subtree {
    hash: NodeHash,
    /// Whether the proof reference leaf lies in this subtree
    on_path: bool,
}

/// A Merkle hash tree built from a sequence of leaves
///
/// The hash primitive is any [`Digest`]. A proof tree also tracks one
/// reference leaf and collects the sibling hashes needed to show that leaf is
/// part of the tree.
#[derive(Clone, Debug)]
pub struct MerkleTree<D: Digest> {
    pending: Vec<Option<Subtree>>,
    reference: Option<Vec<u8>>,
    found: bool,
    /// Siblings on the reference path from subtrees already combined
    steps: Vec<ProofStep>,
    len: usize,
    _digest: PhantomData<fn() -> D>,
}

impl<D: Digest> MerkleTree<D> {
    /// Create an empty tree
    pub fn new() -> Self {
        MerkleTree {
            pending: Vec::new(),
            reference: None,
            found: false,
            steps: Vec::new(),
            len: 0,
            _digest: PhantomData,
        }
    }

    /// Create an empty tree that can prove it contains `reference`
    pub fn with_proof(reference: &[u8]) -> Self {
        MerkleTree {
            reference: Some(reference.to_vec()),
            ..Self::new()
        }
    }

    /// Append a leaf
    pub fn add(&mut self, leaf: &[u8]) {
        let on_path = !self.found && self.reference.as_deref() == Some(leaf);
        if on_path {
            self.found = true;
        }

        let mut node = Subtree {
            hash: leaf_hash::<D>(leaf),
            on_path,
        };
        self.len += 1;

        for slot in self.pending.iter_mut() {
            match slot.take() {
                None => {
                    *slot = Some(node);
                    return;
                }
                Some(left) => node = join::<D>(left, node, &mut self.steps),
            }
        }
        self.pending.push(Some(node));
    }

    /// Number of leaves added
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the reference leaf has been added
    pub fn has_reference(&self) -> bool {
        self.found
    }

    /// The root hash; `H("")` for a tree with no leaves
    pub fn root(&self) -> NodeHash {
        match self.fold(&mut Vec::new()) {
            Some(root) => root.hash,
            None => NodeHash::from_bytes(D::digest(b"").to_vec()),
        }
    }

    /// Inclusion proof for the reference leaf
    ///
    /// `None` unless this is a proof tree and the reference has been added.
    pub fn proof(&self) -> Option<Proof> {
        if !self.found {
            return None;
        }
        let mut steps = self.steps.clone();
        self.fold(&mut steps);
        Some(Proof::new(steps))
    }

    /// Fold pending subtrees, lowest (right-most) first
    fn fold(&self, steps: &mut Vec<ProofStep>) -> Option<Subtree> {
        let mut acc: Option<Subtree> = None;
        for node in self.pending.iter().flatten() {
            acc = Some(match acc {
                None => node.clone(),
                Some(right) => join::<D>(node.clone(), right, steps),
            });
        }
        acc
    }
}

impl<D: Digest> Default for MerkleTree<D> {
    fn default() -> Self {
        Self::new()
    }
}

fn join<D: Digest>(left: Subtree, right: Subtree, steps: &mut Vec<ProofStep>) -> Subtree {
    if left.on_path {
        steps.push(ProofStep {
            hash: right.hash.clone(),
            side: Side::Right,
        });
    } else if right.on_path {
        steps.push(ProofStep {
            hash: left.hash.clone(),
            side: Side::Left,
        });
    }
    Subtree {
        hash: interior_hash::<D>(&left.hash, &right.hash),
        on_path: left.on_path || right.on_path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::Sha256;

    fn root_from_proof(leaf: &[u8], proof: &Proof) -> NodeHash {
        proof
            .into_iter()
            .fold(leaf_hash::<Sha256>(leaf), |acc, step| match step.side {
                Side::Left => interior_hash::<Sha256>(&step.hash, &acc),
                Side::Right => interior_hash::<Sha256>(&acc, &step.hash),
            })
    }

    fn tree_of(leaves: &[&[u8]]) -> MerkleTree<Sha256> {
        let mut tree = MerkleTree::new();
        for leaf in leaves {
            tree.add(leaf);
        }
        tree
    }

    #[test]
    fn test_leaf_hash_domain_separated() {
        let expected = Sha256::digest([&[0x00u8][..], b"abc"].concat());
        assert_eq!(leaf_hash::<Sha256>(b"abc").as_bytes(), expected.as_slice());
        assert_ne!(
            leaf_hash::<Sha256>(b"abc"),
            NodeHash::from_bytes(Sha256::digest(b"abc").to_vec())
        );
    }

    #[test]
    fn test_empty_root() {
        let tree = MerkleTree::<Sha256>::new();
        assert!(tree.is_empty());
        assert_eq!(tree.root().as_bytes(), Sha256::digest(b"").as_slice());
    }

    #[test]
    fn test_single_leaf_root_is_leaf_hash() {
        let tree = tree_of(&[b"only"]);
        assert_eq!(tree.root(), leaf_hash::<Sha256>(b"only"));
    }

    #[test]
    fn test_three_leaf_root_promotes_lone_subtree() {
        let tree = tree_of(&[b"a", b"b", b"c"]);
        let l0 = leaf_hash::<Sha256>(b"a");
        let l1 = leaf_hash::<Sha256>(b"b");
        let l2 = leaf_hash::<Sha256>(b"c");
        let expected = interior_hash::<Sha256>(&interior_hash::<Sha256>(&l0, &l1), &l2);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.root(), expected);
    }

    #[test]
    fn test_root_is_repeatable() {
        let mut tree = tree_of(&[b"a", b"b", b"c", b"d", b"e"]);
        let r1 = tree.root();
        assert_eq!(r1, tree.root());
        tree.add(b"f");
        assert_ne!(r1, tree.root());
    }

    #[test]
    fn test_root_depends_on_order() {
        let forward = tree_of(&[b"a", b"b"]);
        let backward = tree_of(&[b"b", b"a"]);
        assert_ne!(forward.root(), backward.root());
    }

    #[test]
    fn test_plain_tree_has_no_proof() {
        let tree = tree_of(&[b"a", b"b"]);
        assert!(!tree.has_reference());
        assert!(tree.proof().is_none());
    }

    #[test]
    fn test_proof_every_position() {
        let leaves: Vec<Vec<u8>> = (0u8..11).map(|i| vec![b'x', i]).collect();
        for target in &leaves {
            let mut tree = MerkleTree::<Sha256>::with_proof(target);
            for leaf in &leaves {
                tree.add(leaf);
            }
            let proof = tree.proof().unwrap();
            assert_eq!(root_from_proof(target, &proof), tree.root());
        }
    }

    #[test]
    fn test_proof_single_leaf_is_empty() {
        let mut tree = MerkleTree::<Sha256>::with_proof(b"solo");
        tree.add(b"solo");
        let proof = tree.proof().unwrap();
        assert!(proof.is_empty());
        assert_eq!(root_from_proof(b"solo", &proof), tree.root());
    }

    #[test]
    fn test_proof_missing_reference() {
        let mut tree = MerkleTree::<Sha256>::with_proof(b"absent");
        tree.add(b"a");
        tree.add(b"b");
        assert!(tree.proof().is_none());
    }

    #[test]
    fn test_proof_sides() {
        let mut tree = MerkleTree::<Sha256>::with_proof(b"c");
        for leaf in [&b"a"[..], b"b", b"c"] {
            tree.add(leaf);
        }
        let proof = tree.proof().unwrap();
        assert_eq!(proof.len(), 1);
        assert_eq!(proof.steps()[0].side, Side::Left);
        assert_eq!(
            proof.steps()[0].hash,
            interior_hash::<Sha256>(&leaf_hash::<Sha256>(b"a"), &leaf_hash::<Sha256>(b"b"))
        );
    }

    #[test]
    fn test_blake3_primitive() {
        let mut tree = MerkleTree::<blake3::Hasher>::new();
        tree.add(b"a");
        assert_eq!(tree.root().len(), 32);
        let mut expected = blake3::Hasher::new();
        expected.update(&[0x00]);
        expected.update(b"a");
        assert_eq!(tree.root().as_bytes(), expected.finalize().as_slice());
    }
}
