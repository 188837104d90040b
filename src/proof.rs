//! Merkle tree inclusion proof: the branch of sibling digests from a leaf
//! up to just below the root, plus tree-independent verification and a wire
//! encoding for shipping proofs across process boundaries.

use std::fmt;

use crate::error::{Error, Result};
use crate::hash::Algorithm;
use crate::merkle::short_hex;

/// Wire tag: sibling recombines on the left.
const TAG_LEFT: u8 = 0;
/// Wire tag: sibling recombines on the right.
const TAG_RIGHT: u8 = 1;
/// Wire tag: no sibling at this level.
const TAG_LONE: u8 = 2;

/// One branch entry: where the sibling digest sits when recombining the
/// running digest one level up.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Step<T> {
    /// Sibling belongs on the left: next digest is
    /// `hash(sibling ++ running)`.
    Left(T),
    /// Sibling belongs on the right: next digest is
    /// `hash(running ++ sibling)`.
    Right(T),
    /// No sibling at this level (odd-count tail): next digest is
    /// `hash(running)` alone, mirroring how construction promotes a lone
    /// child.
    Lone,
}

impl<T: AsRef<[u8]>> fmt::Display for Step<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Left(sib) => write!(f, "LEFT({}..)", short_hex(sib.as_ref())),
            Step::Right(sib) => write!(f, "RIGHT({}..)", short_hex(sib.as_ref())),
            Step::Lone => f.write_str("LONE"),
        }
    }
}

/// Ordered steps from the leaf's sibling up to just below the root. The
/// root itself is never part of a branch.
pub type Branch<T> = Vec<Step<T>>;

/// Merkle tree inclusion proof.
///
/// Carries the target leaf digest and the [`Branch`] of sibling steps. A
/// proof owns independent copies of its digests: it holds no reference into
/// the tree it came from and remains valid after the tree is discarded.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Proof<T> {
    branch: Branch<T>,
    item: T,
}

impl<T: Ord + Clone + AsRef<[u8]>> Proof<T> {
    /// Creates a proof from a branch and the target leaf digest.
    pub fn new(branch: Branch<T>, item: T) -> Proof<T> {
        Proof { branch, item }
    }

    /// The target leaf digest.
    pub fn item(&self) -> T {
        self.item.clone()
    }

    /// The branch steps, leaf-to-root order.
    pub fn branch(&self) -> &[Step<T>] {
        &self.branch
    }

    /// Replays the branch and compares the result to `expected_root`,
    /// byte-exact.
    ///
    /// This is a fold over a local running digest, starting at the leaf
    /// digest: [`Step::Left`] hashes `sibling ++ running`, [`Step::Right`]
    /// hashes `running ++ sibling`, [`Step::Lone`] re-hashes the running
    /// digest alone. Nothing the caller can observe is mutated, so a proof
    /// verifies any number of times; only a digest engine and the expected
    /// root are needed, not the tree the proof came from.
    pub fn validate<A: Algorithm<T>>(&self, alg: &mut A, expected_root: &T) -> bool {
        let mut running = self.item.clone();
        for step in &self.branch {
            running = match step {
                Step::Left(sib) => alg.node(sib.clone(), running),
                Step::Right(sib) => alg.node(running, sib.clone()),
                Step::Lone => alg.lone(running),
            };
        }
        running == *expected_root
    }

    /// Encodes the proof for transport: the leaf digest first, then per
    /// step a single direction tag byte (`0` left, `1` right, `2` lone)
    /// followed by the fixed-length sibling digest (absent for lone steps).
    pub fn to_bytes(&self) -> Vec<u8> {
        let dlen = self.item.as_ref().len();
        let mut out = Vec::with_capacity(dlen + self.branch.len() * (dlen + 1));
        out.extend_from_slice(self.item.as_ref());
        for step in &self.branch {
            match step {
                Step::Left(sib) => {
                    out.push(TAG_LEFT);
                    out.extend_from_slice(sib.as_ref());
                }
                Step::Right(sib) => {
                    out.push(TAG_RIGHT);
                    out.extend_from_slice(sib.as_ref());
                }
                Step::Lone => out.push(TAG_LONE),
            }
        }
        out
    }
}

impl<T> Proof<T>
where
    T: Ord + Clone + AsRef<[u8]> + AsMut<[u8]> + Default,
{
    /// Decodes a proof produced by [`Proof::to_bytes`]. The digest length
    /// is taken from `T::default()`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Proof<T>> {
        let dlen = T::default().as_ref().len();
        if dlen == 0 {
            return Err(Error::MalformedProof("zero-length digest type".into()));
        }

        let mut pos = 0;
        let item = read_digest::<T>(bytes, &mut pos, dlen)?;
        let mut branch = Branch::new();
        while pos < bytes.len() {
            let tag = bytes[pos];
            pos += 1;
            branch.push(match tag {
                TAG_LEFT => Step::Left(read_digest(bytes, &mut pos, dlen)?),
                TAG_RIGHT => Step::Right(read_digest(bytes, &mut pos, dlen)?),
                TAG_LONE => Step::Lone,
                other => {
                    return Err(Error::MalformedProof(format!(
                        "unknown direction tag {} at offset {}",
                        other,
                        pos - 1
                    )))
                }
            });
        }
        Ok(Proof::new(branch, item))
    }
}

fn read_digest<T>(bytes: &[u8], pos: &mut usize, dlen: usize) -> Result<T>
where
    T: AsMut<[u8]> + Default,
{
    let end = *pos + dlen;
    if end > bytes.len() {
        return Err(Error::MalformedProof(format!(
            "truncated digest at offset {}",
            *pos
        )));
    }
    let mut digest = T::default();
    digest.as_mut().copy_from_slice(&bytes[*pos..end]);
    *pos = end;
    Ok(digest)
}

impl<T: AsRef<[u8]>> fmt::Display for Proof<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "---PROOF---")?;
        writeln!(f, "[{}..]", short_hex(self.item.as_ref()))?;
        writeln!(f, "[BRANCH]")?;
        for step in &self.branch {
            writeln!(f, "{}", step)?;
        }
        Ok(())
    }
}
