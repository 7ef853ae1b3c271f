//! # frontier_set
//!
//! Frontier sets: the complement of a set of byte strings.
//!
//! A [`Frontier`] is a trie that contains the shortest bytewise prefixes of
//! all strings _not_ in a set. To show in zero knowledge that a string is not
//! in the excluded set, build a Merkle hash tree from the prefixes in the
//! frontier, then show with a Merkle proof that some prefix of the string is
//! in that tree.
//!
//! ## How it works
//!
//! Take the alphabet `a, b, c, d`, an excluded set `S` and the frontier `F`
//! of everything not in `S`. With `S` empty nothing is excluded and `F`
//! holds the empty prefix, the prefix of every string. Excluding `"a"`
//! replaces the empty prefix with `b, c, d, aa, ab, ac, ad`. Excluding
//! `"abc"` next replaces `ab` with `aba, abb, abd, abca, abcb, abcc, abcd`.
//!
//! See "Zero Knowledge Sets" by Micali, Rabin and Kilian.
//!
//! ## Example
//!
//! ```
//! use frontier_set::Frontier;
//! use sha2::Sha256;
//!
//! let mut frontier = Frontier::new();
//! frontier.exclude(b"ab");
//!
//! assert_eq!(frontier.check(b"abc"), (&b"ab"[..], true));
//! assert!(!frontier.check(b"a").1);
//!
//! let root = frontier.merkle_tree::<Sha256>().root();
//! assert_eq!(root.len(), 32);
//! ```

pub mod config;
pub mod frontier;
pub mod ingest;
pub mod merkle;

mod error;

pub use config::Config;
pub use error::{Error, Result};
pub use frontier::{Frontier, Tier};
pub use ingest::{exclude_chunks, exclude_file, ChunkMode};
pub use merkle::{HashAlgorithm, MerkleTree, NodeHash, Proof, ProofStep, Side};
