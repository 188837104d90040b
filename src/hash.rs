//! Hash infrastructure: the digest engine contract and the bridge trait
//! feeding values into it.

use std::hash::Hasher;

/// A type that can be fed into a hasher state.
///
/// This is the crate's analogue of [`std::hash::Hash`], kept separate so
/// implementations can differ from the collection-oriented std hashes (no
/// length prefixes, no type tags): a leaf digest must be the digest of the
/// value's bytes and nothing else.
///
/// Implementations are provided for the byte-shaped types a tree is usually
/// built over; custom value types implement it by writing their canonical
/// byte form:
///
/// ```text
/// impl<H: Hasher> Hashable<H> for Transaction {
///     fn hash(&self, state: &mut H) {
///         state.write(&self.canonical_bytes());
///     }
/// }
/// ```
pub trait Hashable<H: Hasher> {
    /// Feeds this value into the given hasher state.
    fn hash(&self, state: &mut H);

    /// Feeds a slice of this type into the given hasher state.
    fn hash_slice(data: &[Self], state: &mut H)
    where
        Self: Sized,
    {
        for piece in data {
            piece.hash(state);
        }
    }
}

/// Hashing algorithm producing digests of type `T` — the tree's digest
/// engine.
///
/// Conforms to the standard [`Hasher`] write interface and adds full-length
/// digest finalization plus state reset, so a single engine instance serves
/// every hash computation of a tree in a reset-write-sum cycle. The digest
/// length must be constant across calls for a given engine.
///
/// [`Algorithm::hash`] takes `&mut self` because most cryptographic digests
/// consume their internal state on finalization.
///
/// The provided combinators fix the tree's digest rules: no domain
/// separation prefixes, plain byte concatenation. Override them only when
/// interoperating with a scheme that demands otherwise.
pub trait Algorithm<T>: Hasher
where
    T: Ord + Clone + AsRef<[u8]>,
{
    /// Returns the digest of the bytes written since the last reset.
    fn hash(&mut self) -> T;

    /// Resets the hasher state.
    fn reset(&mut self);

    /// Digest of one input value: `hash(value)`.
    fn leaf<D: Hashable<Self>>(&mut self, item: D) -> T
    where
        Self: Sized,
    {
        self.reset();
        item.hash(self);
        self.hash()
    }

    /// Digest of an interior node with two children: `hash(left ++ right)`.
    fn node(&mut self, left: T, right: T) -> T {
        self.reset();
        self.write(left.as_ref());
        self.write(right.as_ref());
        self.hash()
    }

    /// Digest of an interior node owning only a left child, the odd-count
    /// tail case: `hash(left)`.
    fn lone(&mut self, left: T) -> T {
        self.reset();
        self.write(left.as_ref());
        self.hash()
    }
}

impl<H: Hasher> Hashable<H> for [u8] {
    fn hash(&self, state: &mut H) {
        state.write(self)
    }
}

impl<H: Hasher> Hashable<H> for Vec<u8> {
    fn hash(&self, state: &mut H) {
        state.write(self)
    }
}

impl<H: Hasher, const N: usize> Hashable<H> for [u8; N] {
    fn hash(&self, state: &mut H) {
        state.write(self)
    }
}

impl<H: Hasher> Hashable<H> for str {
    fn hash(&self, state: &mut H) {
        state.write(self.as_bytes())
    }
}

impl<H: Hasher> Hashable<H> for String {
    fn hash(&self, state: &mut H) {
        state.write(self.as_bytes())
    }
}

impl<'a, H: Hasher, T: ?Sized + Hashable<H>> Hashable<H> for &'a T {
    fn hash(&self, state: &mut H) {
        (**self).hash(state)
    }
}

impl<'a, H: Hasher, T: ?Sized + Hashable<H>> Hashable<H> for &'a mut T {
    fn hash(&self, state: &mut H) {
        (**self).hash(state)
    }
}
