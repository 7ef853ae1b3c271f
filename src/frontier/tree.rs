//! The frontier set over a trie of tiers

use super::Tier;
use crate::merkle::MerkleTree;
use digest::Digest;

/// A trie holding the shortest bytewise prefixes of all strings not in a set
///
/// A fresh frontier has no root: nothing is excluded and the whole string
/// space is still in the frontier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frontier {
    root: Option<Tier>,
}

impl Frontier {
    /// Create an empty frontier
    pub fn new() -> Self {
        Frontier { root: None }
    }

    /// Exclude `s` (and every prefix of it) from the frontier
    ///
    /// Excluding the empty string does nothing.
    pub fn exclude(&mut self, s: &[u8]) {
        if s.is_empty() {
            return;
        }
        self.root
            .get_or_insert_with(Tier::default)
            .insert(s, Tier::Sentinel);
    }

    /// Find where `s` leaves the trie
    ///
    /// Follows `s` down one byte at a time, stopping when the input runs out
    /// or the next edge is absent. Returns the consumed prefix of `s` and
    /// whether the node reached carries no information. An empty frontier
    /// matches everything with an empty prefix.
    pub fn check<'a>(&self, s: &'a [u8]) -> (&'a [u8], bool) {
        let mut node = match &self.root {
            Some(root) if !root.is_empty() => root,
            _ => return (&s[..0], true),
        };

        let mut depth = 0;
        while let Some(&byte) = s.get(depth) {
            match node.get(byte) {
                Some(child) => {
                    node = child;
                    depth += 1;
                }
                None => break,
            }
        }
        (&s[..depth], node.is_empty())
    }

    /// In-order depth-first traversal, calling `f` on every leaf
    ///
    /// Bytes are visited in ascending order at every node, so leaves arrive in
    /// strictly ascending lexicographic order. The slice handed to `f` is
    /// reused between calls; copy it to keep it. A frontier with no root
    /// yields no leaves.
    pub fn walk<F>(&self, mut f: F)
    where
        F: FnMut(&[u8]),
    {
        let Some(root) = &self.root else {
            return;
        };

        // One frame per node on the current path, with the next byte to visit.
        let mut stack: Vec<(&Tier, u16)> = vec![(root, 0)];
        let mut prefix = Vec::new();
        while let Some((tier, next)) = stack.last_mut() {
            let tier = *tier;
            if *next > u8::MAX as u16 {
                stack.pop();
                prefix.pop();
                continue;
            }
            let byte = *next as u8;
            *next += 1;

            prefix.push(byte);
            match tier.get(byte) {
                Some(child) => stack.push((child, 0)),
                None => {
                    f(&prefix);
                    prefix.pop();
                }
            }
        }
    }

    /// All leaves, copied out of a walk
    pub fn leaves(&self) -> Vec<Vec<u8>> {
        let mut leaves = Vec::new();
        self.walk(|leaf| leaves.push(leaf.to_vec()));
        leaves
    }

    /// Number of leaves a walk would produce
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        self.walk(|_| count += 1);
        count
    }

    /// Check if nothing has been excluded
    pub fn is_empty(&self) -> bool {
        self.root.as_ref().map_or(true, Tier::is_empty)
    }

    /// The root node, if anything has been excluded
    pub fn root(&self) -> Option<&Tier> {
        self.root.as_ref()
    }

    /// Merkle hash tree over an in-order walk of the frontier
    ///
    /// Proving that a prefix of some string is a leaf of this tree shows that
    /// the string is not in the excluded set.
    pub fn merkle_tree<D: Digest>(&self) -> MerkleTree<D> {
        let mut tree = MerkleTree::new();
        self.walk(|leaf| tree.add(leaf));
        tracing::debug!(leaves = tree.len(), "built frontier merkle tree");
        tree
    }

    /// Merkle hash tree that can compactly prove it contains `reference`
    pub fn merkle_proof_tree<D: Digest>(&self, reference: &[u8]) -> MerkleTree<D> {
        let mut tree = MerkleTree::with_proof(reference);
        self.walk(|leaf| tree.add(leaf));
        tracing::debug!(
            leaves = tree.len(),
            found = tree.has_reference(),
            "built frontier merkle proof tree"
        );
        tree
    }
}
