//! Frontier trie
//!
//! A frontier is the complement of a set of excluded byte strings, stored as
//! a trie whose absent edges are the uncovered regions of string space:
//! - Excluding a string records a path to a sentinel node
//! - Sparse nodes hold a single edge and are promoted to dense nodes on the
//!   second distinct byte at their level
//! - An in-order walk of the absent edges yields the leaves that feed the
//!   Merkle commitment

mod node;
mod tree;

pub use node::{Slots, Tier};
pub use tree::Frontier;
