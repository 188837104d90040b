//! Demonstration program: build a SHA-256 tree over the values `"a".."h"`,
//! print it, prove the inclusion of `"a"`, and verify the proof. Panics if
//! verification fails.
//!
//! ```text
//! cargo run --features demo --bin merkle-demo
//! ```

use std::hash::Hasher;

use merkle_branch::hash::Algorithm;
use merkle_branch::merkle::Tree;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Default)]
struct Sha256Algorithm(Sha256);

impl Hasher for Sha256Algorithm {
    #[inline]
    fn write(&mut self, msg: &[u8]) {
        self.0.update(msg)
    }

    #[inline]
    fn finish(&self) -> u64 {
        0
    }
}

impl Algorithm<[u8; 32]> for Sha256Algorithm {
    #[inline]
    fn hash(&mut self) -> [u8; 32] {
        self.0.finalize_reset().into()
    }

    #[inline]
    fn reset(&mut self) {
        self.0 = Sha256::new();
    }
}

fn main() {
    env_logger::init();

    let vals = ["a", "b", "c", "d", "e", "f", "g", "h"];
    let mut tree = Tree::new(Sha256Algorithm::default());
    let root = tree.construct(vals).expect("construct tree");
    print!("{}", tree);
    println!("root: {}", hex::encode(root));

    let proof = tree.compute_proof("a").expect("compute proof");
    print!("{}", proof);

    if !tree.verify_proof(&proof) {
        panic!("failed to verify merkle proof");
    }
    println!("proof verified");
}
