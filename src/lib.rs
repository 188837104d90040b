//! Static binary _Merkle hash tree_ with inclusion proofs.
//!
//! Given an ordered collection of byte values, [`merkle::Tree`] builds a
//! binary hash tree over them, produces a compact inclusion proof for any
//! leaf value, and verifies such a proof against a known root digest
//! without the full value set:
//!
//! ```text
//!         root = h(h12 ++ h34)
//!        /                    \
//!  h12 = h(h1 ++ h2)    h34 = h(h3 ++ h4)
//!   /            \       /            \
//! h1 = h(v1) h2 = h(v2) h3 = h(v3) h4 = h(v4)
//! ```
//!
//! The tree is a static, build-once structure: levels of digests are laid
//! out root-to-leaf in a vec-backed arena and computed strictly bottom-up,
//! with parent/child relationships expressed as index arithmetic. Odd node
//! counts leave a lone tail child at some levels; its parent is the hash of
//! that child alone.
//!
//! The hashing algorithm is an interface, not a dependency: the crate pulls
//! in no crypto library. An engine implements the standard
//! [`std::hash::Hasher`] write interface plus [`hash::Algorithm`]'s
//! finalize/reset pair, and objects become hashable through
//! [`hash::Hashable`]:
//!
//! `Value : Hashable<A> -> Hasher + Algorithm <- Tree`
//!
//! A [`proof::Proof`] owns its digests and verifies without the tree — a
//! verifier needs only the digest algorithm and the expected root. For
//! crossing process boundaries, proofs carry an explicit byte encoding
//! ([`proof::Proof::to_bytes`]).
//!
//! # Interface
//!
//! ```text
//! - construct (values) -> root digest
//! - compute_proof (value) -> proof
//! - verify_proof (proof) -> bool
//! - validate (proof, algorithm, root) -> bool
//! ```
//!
//! # Quick start
//!
//! ```
//! use std::hash::Hasher;
//! use merkle_branch::hash::Algorithm;
//! use merkle_branch::merkle::Tree;
//!
//! // toy engine: xor into a 16 byte buffer
//! #[derive(Debug, Clone, Default)]
//! struct Xor16 {
//!     data: [u8; 16],
//!     i: usize,
//! }
//!
//! impl Hasher for Xor16 {
//!     fn write(&mut self, bytes: &[u8]) {
//!         for b in bytes {
//!             self.data[self.i % 16] ^= *b;
//!             self.i += 1;
//!         }
//!     }
//!
//!     fn finish(&self) -> u64 {
//!         0
//!     }
//! }
//!
//! impl Algorithm<[u8; 16]> for Xor16 {
//!     fn hash(&mut self) -> [u8; 16] {
//!         self.data
//!     }
//!
//!     fn reset(&mut self) {
//!         *self = Xor16::default();
//!     }
//! }
//!
//! let mut tree: Tree<[u8; 16], Xor16> = Tree::new(Xor16::default());
//! let root = tree.construct(["a", "b", "c"]).unwrap();
//!
//! let proof = tree.compute_proof("a").unwrap();
//! assert!(tree.verify_proof(&proof));
//!
//! // verification does not need the tree, only the engine and the root
//! drop(tree);
//! assert!(proof.validate(&mut Xor16::default(), &root));
//! ```

#![deny(
    missing_docs,
    unused_qualifications,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces
)]

/// Typed failures of tree construction and proof generation.
pub mod error;

/// Hash infrastructure for items in the tree.
pub mod hash;

/// Tree abstractions, implementation and algorithms.
pub mod merkle;

/// Tree inclusion proof.
pub mod proof;

/// Tests XOR128.
#[cfg(test)]
mod test_xor128;
