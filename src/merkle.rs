//! The tree itself: level arena, construction, and proof generation.

use std::fmt;
use std::ops;

use log::debug;

use crate::error::{Error, Result};
use crate::hash::{Algorithm, Hashable};
use crate::proof::{Proof, Step};

/// All nodes at one depth of the tree, ordered left to right.
///
/// A node is just its digest; positions within the level address it. The
/// parent of position `i` sits at `i / 2` one level up, its children at
/// `2i` and `2i + 1` below (the right child absent on an odd tail).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Level<T>(Vec<T>);

impl<T> Level<T> {
    fn new(nodes: Vec<T>) -> Level<T> {
        Level(nodes)
    }

    /// Number of nodes at this depth.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if the level holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> ops::Deref for Level<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T: AsRef<[u8]>> fmt::Display for Level<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("------LEVEL------\n")?;
        for nd in &self.0 {
            write!(f, "NODE({}..) ", short_hex(nd.as_ref()))?;
        }
        f.write_str("\n")
    }
}

/// Merkle hash tree over an ordered collection of byte values.
///
/// ```text
///         root = h(h12 ++ h34)
///        /                    \
///  h12 = h(h1 ++ h2)    h34 = h(h3 ++ h4)
///   /            \       /            \
/// h1 = h(v1) h2 = h(v2) h3 = h(v3) h4 = h(v4)
/// ```
///
/// Levels are stored root first: `levels[0]` holds the single root digest,
/// the last level one leaf digest per input value, in input order. Parent
/// and child are index computations over adjacent levels rather than stored
/// links, and every level is computed strictly bottom-up during
/// [`construct`](Tree::construct), so no node digest is ever observable in
/// an unset state.
///
/// The tree owns one digest engine instance, shared by every hash
/// computation it makes; each computation resets the engine first. The
/// engine's buffer is mutated in place, so a tree must not be used from
/// multiple threads without external serialization.
#[derive(Debug, Clone)]
pub struct Tree<T, A> {
    alg: A,
    levels: Vec<Level<T>>,
}

impl<T, A> Tree<T, A>
where
    T: Ord + Clone + AsRef<[u8]>,
    A: Algorithm<T>,
{
    /// Creates an empty tree bound to one digest engine instance.
    pub fn new(alg: A) -> Tree<T, A> {
        Tree {
            alg,
            levels: Vec::new(),
        }
    }

    /// Builds the tree over `values`, in order, and returns the root digest.
    ///
    /// Hashes every value into a leaf digest, then fills parent levels
    /// bottom-up: each full pair hashes to `hash(left ++ right)`, an odd
    /// tail to `hash(left)` alone, until a single root digest remains.
    ///
    /// Runs exactly once per tree: a second call fails with
    /// [`Error::InvalidState`]. No values at all fail with
    /// [`Error::EmptyInput`]. A failed construction leaves the tree empty.
    pub fn construct<D, I>(&mut self, values: I) -> Result<T>
    where
        D: Hashable<A>,
        I: IntoIterator<Item = D>,
    {
        if !self.is_empty() {
            return Err(Error::InvalidState);
        }

        let alg = &mut self.alg;
        let leaves: Vec<T> = values.into_iter().map(|v| alg.leaf(v)).collect();
        if leaves.is_empty() {
            return Err(Error::EmptyInput);
        }

        let count = leaves.len();
        let height = calc_height(count);
        let mut levels = Vec::with_capacity(height);
        levels.push(Level::new(leaves));
        for _ in 1..height {
            let parent = construct_level(&mut self.alg, &levels[levels.len() - 1]);
            levels.push(parent);
        }

        if levels[levels.len() - 1].len() != 1 {
            return Err(Error::InvariantViolation(
                "root level must hold exactly one node",
            ));
        }
        levels.reverse();
        self.levels = levels;

        debug!("constructed tree: {} leaves, height {}", count, height);
        Ok(self.levels[0][0].clone())
    }

    /// Generates an inclusion proof for `value`.
    ///
    /// The value is hashed and looked up among the leaf digests with a
    /// linear scan; an absent digest fails with [`Error::NotFound`]. The
    /// proof carries the leaf digest plus one sibling step per level below
    /// the root (the root itself never enters the branch) and owns its
    /// digests, so it stays valid after the tree is dropped.
    pub fn compute_proof<D: Hashable<A>>(&mut self, value: D) -> Result<Proof<T>> {
        let item = self.alg.leaf(value);
        let height = self.height();

        let leaves = self.level(height)?;
        let idx = leaves
            .iter()
            .position(|h| *h == item)
            .ok_or(Error::NotFound)?;

        let mut branch = Vec::with_capacity(height - 1);
        let mut i = idx;
        for h in (2..=height).rev() {
            let level = self.level(h)?;
            let sibling = i ^ 1;
            branch.push(match level.get(sibling) {
                Some(s) if i & 1 == 1 => Step::Left(s.clone()),
                Some(s) => Step::Right(s.clone()),
                // odd tail: no sibling at this level, the node is
                // promoted by re-hashing it alone
                None => Step::Lone,
            });
            i /= 2;
        }

        debug!("proof for leaf {}: {} steps", idx, branch.len());
        Ok(Proof::new(branch, item))
    }

    /// Checks `proof` against this tree's current root digest.
    ///
    /// A mismatch is a normal `false`, never an error; an empty tree
    /// verifies nothing. Only the root digest and the digest engine take
    /// part — see [`Proof::validate`] for verification without the tree.
    pub fn verify_proof(&mut self, proof: &Proof<T>) -> bool {
        match self.root() {
            Some(root) => proof.validate(&mut self.alg, &root),
            None => false,
        }
    }

    /// Number of levels; 0 until the tree is constructed.
    pub fn height(&self) -> usize {
        self.levels.len()
    }

    /// `true` until [`construct`](Tree::construct) succeeds.
    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    /// Root digest, if the tree has been constructed.
    pub fn root(&self) -> Option<T> {
        self.levels.first().map(|l| l[0].clone())
    }

    /// Number of leaves the tree was built over; 0 when empty.
    pub fn leafs(&self) -> usize {
        self.levels.last().map_or(0, Level::len)
    }

    /// Level at 1-based `height`: 1 is the root level, `self.height()` the
    /// leaf level.
    pub(crate) fn level(&self, height: usize) -> Result<&Level<T>> {
        if height == 0 || height > self.height() {
            return Err(Error::HeightOutOfRange(height));
        }
        Ok(&self.levels[height - 1])
    }
}

impl<T: AsRef<[u8]>, A> fmt::Display for Tree<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in &self.levels {
            write!(f, "{}", level)?;
        }
        Ok(())
    }
}

/// Builds the parent level of `children`: parent `i` hashes children `2i`
/// and `2i + 1`, or child `2i` alone when the level has an odd tail.
fn construct_level<T, A>(alg: &mut A, children: &Level<T>) -> Level<T>
where
    T: Ord + Clone + AsRef<[u8]>,
    A: Algorithm<T>,
{
    let size = children.len().div_ceil(2);
    let mut parents = Vec::with_capacity(size);
    for i in 0..size {
        let left = children[2 * i].clone();
        parents.push(match children.get(2 * i + 1) {
            Some(right) => alg.node(left, right.clone()),
            None => alg.lone(left),
        });
    }
    Level::new(parents)
}

/// Number of levels for a tree over `count` leaves: 0 when empty, 2 for a
/// single value (the root wraps the lone leaf), `ceil(log2(count)) + 1`
/// otherwise.
pub fn calc_height(count: usize) -> usize {
    match count {
        0 => 0,
        1 => 2,
        _ => count.next_power_of_two().trailing_zeros() as usize + 1,
    }
}

pub(crate) fn short_hex(digest: &[u8]) -> String {
    let n = digest.len().min(3);
    hex::encode(&digest[..n])
}
