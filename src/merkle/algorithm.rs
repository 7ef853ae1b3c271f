//! Hash primitives selectable at runtime

use super::{leaf_hash, NodeHash, Proof};
use crate::frontier::Frontier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A hash primitive known by name
///
/// Library callers pick a [`digest::Digest`] type directly; this enum is for
/// callers that only learn the choice at runtime, such as the CLI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl HashAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }

    /// Leaf hash of `data` under this primitive
    pub fn leaf_hash(&self, data: &[u8]) -> NodeHash {
        match self {
            HashAlgorithm::Sha256 => leaf_hash::<sha2::Sha256>(data),
            HashAlgorithm::Blake3 => leaf_hash::<blake3::Hasher>(data),
        }
    }

    /// Merkle root of `frontier`'s leaves
    pub fn merkle_root(&self, frontier: &Frontier) -> NodeHash {
        match self {
            HashAlgorithm::Sha256 => frontier.merkle_tree::<sha2::Sha256>().root(),
            HashAlgorithm::Blake3 => frontier.merkle_tree::<blake3::Hasher>().root(),
        }
    }

    /// Merkle root of `frontier`'s leaves and the proof for `reference`, if it
    /// is one of them
    pub fn merkle_proof(&self, frontier: &Frontier, reference: &[u8]) -> (NodeHash, Option<Proof>) {
        match self {
            HashAlgorithm::Sha256 => {
                let tree = frontier.merkle_proof_tree::<sha2::Sha256>(reference);
                (tree.root(), tree.proof())
            }
            HashAlgorithm::Blake3 => {
                let tree = frontier.merkle_proof_tree::<blake3::Hasher>(reference);
                (tree.root(), tree.proof())
            }
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithms_disagree() {
        let data = b"chunk";
        let sha = HashAlgorithm::Sha256.leaf_hash(data);
        let blake = HashAlgorithm::Blake3.leaf_hash(data);
        assert_eq!(sha.len(), 32);
        assert_eq!(blake.len(), 32);
        assert_ne!(sha, blake);
    }

    #[test]
    fn test_merkle_root_matches_generic_tree() {
        let mut f = Frontier::new();
        f.exclude(b"xyz");
        assert_eq!(
            HashAlgorithm::Blake3.merkle_root(&f),
            f.merkle_tree::<blake3::Hasher>().root()
        );
    }

    #[test]
    fn test_merkle_proof_for_leaf() {
        let mut f = Frontier::new();
        f.exclude(b"xyz");
        let (root, proof) = HashAlgorithm::Sha256.merkle_proof(&f, b"a");
        assert_eq!(root, HashAlgorithm::Sha256.merkle_root(&f));
        assert!(proof.is_some());

        let (_, missing) = HashAlgorithm::Sha256.merkle_proof(&f, b"x");
        assert!(missing.is_none());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&HashAlgorithm::Blake3).unwrap();
        assert_eq!(json, "\"blake3\"");
        let back: HashAlgorithm = serde_json::from_str("\"sha256\"").unwrap();
        assert_eq!(back, HashAlgorithm::Sha256);
        assert_eq!(HashAlgorithm::default().to_string(), "sha256");
    }
}
