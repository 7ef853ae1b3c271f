//! Merkle hash trees over frontier leaves
//!
//! Trees follow the RFC 6962 shape:
//! - Leaves hash as `H(0x00 || leaf)`, interior nodes as `H(0x01 || l || r)`
//! - A right-most subtree without a sibling is promoted, not duplicated
//! - The empty tree's root is `H("")`
//!
//! Proof trees track a single reference leaf and yield its sibling path.

mod algorithm;
mod hash;
mod proof;
mod tree;

pub use algorithm::HashAlgorithm;
pub use hash::NodeHash;
pub use proof::{Proof, ProofStep, Side};
pub use tree::{interior_hash, leaf_hash, MerkleTree, INTERIOR_PREFIX, LEAF_PREFIX};
