#![cfg(test)]

use std::hash::Hasher;

use crate::error::Error;
use crate::hash::Algorithm;
use crate::merkle::{calc_height, Tree};
use crate::proof::{Proof, Step};

const SIZE: usize = 0x10;

#[derive(Debug, Copy, Clone)]
struct XOR128 {
    data: [u8; SIZE],
    i: usize,
}

impl XOR128 {
    fn new() -> XOR128 {
        XOR128 {
            data: [0; SIZE],
            i: 0,
        }
    }
}

impl Hasher for XOR128 {
    fn write(&mut self, bytes: &[u8]) {
        for x in bytes {
            self.data[self.i & (SIZE - 1)] ^= *x;
            self.i += 1;
        }
    }

    fn finish(&self) -> u64 {
        let mut h: u64 = 0;
        let mut off: u64 = 0;
        for i in 0..8 {
            h |= (self.data[i] as u64) << off;
            off += 8;
        }
        h
    }
}

impl Algorithm<[u8; 16]> for XOR128 {
    fn hash(&mut self) -> [u8; 16] {
        self.data
    }

    fn reset(&mut self) {
        *self = XOR128::new();
    }
}

fn values(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("value-{}", i)).collect()
}

fn tree_over(n: usize) -> (Tree<[u8; 16], XOR128>, [u8; 16]) {
    let mut t = Tree::new(XOR128::new());
    let root = t.construct(values(n)).unwrap();
    (t, root)
}

#[test]
fn test_calc_height() {
    assert_eq!(calc_height(0), 0);
    assert_eq!(calc_height(1), 2);
    assert_eq!(calc_height(2), 2);
    assert_eq!(calc_height(3), 3);
    assert_eq!(calc_height(4), 3);
    assert_eq!(calc_height(5), 4);
    assert_eq!(calc_height(8), 4);
    assert_eq!(calc_height(9), 5);
    assert_eq!(calc_height(1023), 11);
    assert_eq!(calc_height(1024), 11);
}

#[test]
fn test_empty_tree() {
    let mut t: Tree<[u8; 16], XOR128> = Tree::new(XOR128::new());
    assert!(t.is_empty());
    assert_eq!(t.height(), 0);
    assert_eq!(t.root(), None);
    assert_eq!(t.leafs(), 0);
    assert_eq!(t.compute_proof("a"), Err(Error::HeightOutOfRange(0)));

    // a valid proof from another tree does not verify against an empty tree
    let (mut built, _) = tree_over(4);
    let proof = built.compute_proof("value-0".to_string()).unwrap();
    assert!(!t.verify_proof(&proof));
}

#[test]
fn test_construct_empty_input() {
    let mut t: Tree<[u8; 16], XOR128> = Tree::new(XOR128::new());
    assert_eq!(t.construct(Vec::<String>::new()), Err(Error::EmptyInput));
    assert!(t.is_empty());
}

#[test]
fn test_construct_twice() {
    let (mut t, _) = tree_over(4);
    assert_eq!(t.construct(values(4)), Err(Error::InvalidState));
}

#[test]
fn test_single_value() {
    let mut t = Tree::new(XOR128::new());
    let root = t.construct(["a"]).unwrap();
    assert_eq!(t.height(), 2);
    assert_eq!(t.leafs(), 1);

    // the root wraps the lone leaf: root = hash(hash("a"))
    let mut a = XOR128::new();
    let leaf = a.leaf("a");
    assert_eq!(root, a.lone(leaf));

    let proof = t.compute_proof("a").unwrap();
    assert_eq!(proof.branch(), &[Step::Lone]);
    assert!(t.verify_proof(&proof));
}

#[test]
fn test_round_trip_inclusion() {
    for n in 1..=10 {
        let vals = values(n);
        let mut t = Tree::new(XOR128::new());
        let root = t.construct(vals.clone()).unwrap();
        for v in &vals {
            let proof = t.compute_proof(v).unwrap();
            assert!(t.verify_proof(&proof), "count {}, value {}", n, v);
            // proofs are reusable: validation mutates nothing observable
            assert!(proof.validate(&mut XOR128::new(), &root));
            assert!(proof.validate(&mut XOR128::new(), &root));
        }
    }
}

#[test]
fn test_not_found() {
    let (mut t, _) = tree_over(8);
    assert_eq!(t.compute_proof("no-such-value"), Err(Error::NotFound));
}

#[test]
fn test_height_per_count() {
    for n in 1..=33 {
        let (t, _) = tree_over(n);
        assert_eq!(t.height(), calc_height(n), "count {}", n);
        assert_eq!(t.leafs(), n);
    }
}

#[test]
fn test_level_lookup() {
    let (t, _) = tree_over(5);
    assert_eq!(t.level(0), Err(Error::HeightOutOfRange(0)));
    assert_eq!(t.level(5), Err(Error::HeightOutOfRange(5)));
    assert_eq!(t.level(1).unwrap().len(), 1);
    assert_eq!(t.level(2).unwrap().len(), 2);
    assert_eq!(t.level(3).unwrap().len(), 3);
    assert_eq!(t.level(4).unwrap().len(), 5);
}

#[test]
fn test_tamper_detection() {
    let (mut t, root) = tree_over(4);
    let proof = t.compute_proof("value-2".to_string()).unwrap();
    assert!(proof.validate(&mut XOR128::new(), &root));

    // flip one byte in each branch entry in turn
    for k in 0..proof.branch().len() {
        let mut steps = proof.branch().to_vec();
        match &mut steps[k] {
            Step::Left(sib) | Step::Right(sib) => sib[0] ^= 0xff,
            Step::Lone => continue,
        }
        let tampered = Proof::new(steps, proof.item());
        assert!(!tampered.validate(&mut XOR128::new(), &root), "step {}", k);
    }

    // flip one byte in the leaf digest
    let mut item = proof.item();
    item[0] ^= 0xff;
    let tampered = Proof::new(proof.branch().to_vec(), item);
    assert!(!tampered.validate(&mut XOR128::new(), &root));

    // compare against a wrong root
    let mut wrong_root = root;
    wrong_root[0] ^= 0xff;
    assert!(!proof.validate(&mut XOR128::new(), &wrong_root));
}

#[test]
fn test_determinism() {
    let (_, r1) = tree_over(7);
    let (_, r2) = tree_over(7);
    assert_eq!(r1, r2);
}

#[test]
fn test_wire_round_trip() {
    // 5 leaves: the proof for the tail value carries a lone step
    let (mut t, root) = tree_over(5);
    for v in values(5) {
        let proof = t.compute_proof(v).unwrap();
        let bytes = proof.to_bytes();
        let decoded = Proof::<[u8; 16]>::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, proof);
        assert!(decoded.validate(&mut XOR128::new(), &root));
    }

    let tail = t.compute_proof("value-4".to_string()).unwrap();
    assert!(tail.branch().contains(&Step::Lone));
}

#[test]
fn test_wire_malformed() {
    let (mut t, _) = tree_over(4);
    let bytes = t.compute_proof("value-1".to_string()).unwrap().to_bytes();

    // truncated mid-digest
    assert!(matches!(
        Proof::<[u8; 16]>::from_bytes(&bytes[..10]),
        Err(Error::MalformedProof(_))
    ));

    // unknown direction tag right after the leaf digest
    let mut bad = bytes.clone();
    bad[SIZE] = 9;
    assert!(matches!(
        Proof::<[u8; 16]>::from_bytes(&bad),
        Err(Error::MalformedProof(_))
    ));

    // tag present but sibling digest missing
    assert!(matches!(
        Proof::<[u8; 16]>::from_bytes(&bytes[..SIZE + 1]),
        Err(Error::MalformedProof(_))
    ));
}

#[test]
fn test_display() {
    let (mut t, _) = tree_over(3);
    let shown = format!("{}", t);
    assert!(shown.contains("------LEVEL------"));
    assert!(shown.contains("NODE("));

    let proof = t.compute_proof("value-0".to_string()).unwrap();
    let shown = format!("{}", proof);
    assert!(shown.contains("---PROOF---"));
    assert!(shown.contains("[BRANCH]"));
}
