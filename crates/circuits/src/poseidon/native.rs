//! Native (off-circuit) Poseidon hashing.

use ark_bn254::Fr;
use ark_crypto_primitives::sponge::poseidon::{PoseidonConfig, PoseidonSponge};
use ark_crypto_primitives::sponge::CryptographicSponge;

use super::config::poseidon_config;
use crate::tree::Compression;

/// Two-to-one Poseidon hasher with its sponge configuration built once.
///
/// Generating the round constants is not free, so long-lived holders (trees,
/// servers) should construct one of these and reuse it.
#[derive(Clone)]
pub struct Poseidon {
    config: PoseidonConfig<Fr>,
}

impl Poseidon {
    pub fn new() -> Self {
        Self {
            config: poseidon_config(),
        }
    }

    pub fn config(&self) -> &PoseidonConfig<Fr> {
        &self.config
    }

    pub fn hash_two(&self, a: Fr, b: Fr) -> Fr {
        let mut sponge = PoseidonSponge::new(&self.config);
        sponge.absorb(&a);
        sponge.absorb(&b);
        sponge.squeeze_field_elements(1)[0]
    }
}

impl Default for Poseidon {
    fn default() -> Self {
        Self::new()
    }
}

impl Compression for Poseidon {
    fn compress(&self, left: Fr, right: Fr) -> Fr {
        self.hash_two(left, right)
    }
}

/// One-shot two-to-one hash. Builds a fresh configuration per call, so prefer
/// [`Poseidon`] anywhere throughput matters.
pub fn poseidon_hash_two(a: Fr, b: Fr) -> Fr {
    Poseidon::new().hash_two(a, b)
}
