//! End-to-end Groth16 tests for the membership circuit.

use crate::membership::MembershipCircuit;
use crate::poseidon::Poseidon;
use crate::tree::{AuthenticationPath, LeafIndex, MembershipTree, CAPACITY};
use ark_bn254::{Bn254, Fr};
use ark_groth16::Groth16;
use ark_snark::SNARK;
use ark_std::rand::thread_rng;

#[test]
fn groth16_round_trip() {
    let mut rng = thread_rng();
    let (pk, vk) = Groth16::<Bn254>::circuit_specific_setup(MembershipCircuit::empty(), &mut rng)
        .expect("setup failed");

    let mut tree = MembershipTree::new(Poseidon::new());
    tree.insert(Fr::from(10u64)).unwrap();
    let index = tree.insert(Fr::from(20u64)).unwrap();

    let path = AuthenticationPath::for_leaf(&tree, index);
    let circuit = MembershipCircuit::new(tree.root(), Fr::from(20u64), path);

    let proof = Groth16::<Bn254>::prove(&pk, circuit, &mut rng).expect("prove failed");
    let valid = Groth16::<Bn254>::verify(&vk, &[tree.root()], &proof).expect("verify failed");
    assert!(valid);
}

#[test]
fn groth16_rejects_mismatched_root() {
    let mut rng = thread_rng();
    let (pk, vk) = Groth16::<Bn254>::circuit_specific_setup(MembershipCircuit::empty(), &mut rng)
        .expect("setup failed");

    let mut tree = MembershipTree::new(Poseidon::new());
    let index = tree.insert(Fr::from(77u64)).unwrap();
    let proven_root = tree.root();

    let path = AuthenticationPath::for_leaf(&tree, index);
    let circuit = MembershipCircuit::new(proven_root, Fr::from(77u64), path);
    let proof = Groth16::<Bn254>::prove(&pk, circuit, &mut rng).expect("prove failed");

    // Same proof against a different claimed root.
    tree.insert(Fr::from(78u64)).unwrap();
    let other_root = tree.root();
    assert_ne!(proven_root, other_root);

    let valid = Groth16::<Bn254>::verify(&vk, &[other_root], &proof).expect("verify failed");
    assert!(!valid);
}

#[test]
fn groth16_proves_every_slot_of_a_full_tree() {
    let mut rng = thread_rng();
    let (pk, vk) = Groth16::<Bn254>::circuit_specific_setup(MembershipCircuit::empty(), &mut rng)
        .expect("setup failed");

    let mut tree = MembershipTree::new(Poseidon::new());
    for value in 0..CAPACITY {
        tree.insert(Fr::from((value * value + 1) as u64)).unwrap();
    }

    for slot in 0..CAPACITY {
        let index = LeafIndex::new(slot).unwrap();
        let path = AuthenticationPath::for_leaf(&tree, index);
        let circuit = MembershipCircuit::new(tree.root(), tree.leaf(index), path);

        let proof = Groth16::<Bn254>::prove(&pk, circuit, &mut rng).expect("prove failed");
        let valid = Groth16::<Bn254>::verify(&vk, &[tree.root()], &proof).expect("verify failed");
        assert!(valid, "slot {slot}");
    }
}
