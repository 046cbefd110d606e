//! Export the membership verifying key.
//!
//! Generates or loads the circuit keys and exports the verifying key as a hex
//! string, plus a JSON file for scripting against external verifiers.

use std::path::Path;

use ark_std::rand::{rngs::StdRng, SeedableRng};
use membership_prover::setup::{setup_membership, MembershipKeys};

fn main() {
    let keys_dir = Path::new("keys");

    println!("Loading or generating circuit keys...");

    let keys = if keys_dir.exists() {
        println!("Loading existing keys from {:?}", keys_dir);
        MembershipKeys::load_from_directory(keys_dir).expect("Failed to load keys")
    } else {
        println!("Running trusted setup (this may take a while)...");
        let mut rng = StdRng::from_entropy();
        let keys = setup_membership(&mut rng).expect("Failed to setup circuit");
        keys.save_to_directory(keys_dir)
            .expect("Failed to save keys");
        println!("Keys saved to {:?}", keys_dir);
        keys
    };

    let vk = keys.serialize_vk().expect("Failed to serialize vk");

    println!("\nMembership VK ({} bytes):", vk.len());
    println!("0x{}\n", hex::encode(&vk));

    let json = serde_json::json!({
        "membership_vk": format!("0x{}", hex::encode(&vk)),
    });

    let json_path = keys_dir.join("verifying_key.json");
    std::fs::write(&json_path, serde_json::to_string_pretty(&json).unwrap())
        .expect("Failed to write JSON");
    println!("JSON exported to {:?}", json_path);
}
