//! Seams between the adapters and the external key-generation/signing engines.

use pqc_entropy::SharedEntropy;

use crate::error::ProviderResult;
use crate::keys::{KeyPair, PrivateKey, PublicKey};
use crate::params::AlgorithmFamily;

/// Key-pair engine that has already been initialised with a parameter set and
/// a random source.
pub trait KeyPairEngine: Send {
    /// Produce a fresh key pair; advances the engine's randomness.
    fn generate(&mut self) -> ProviderResult<KeyPair>;
}

/// Sign/verify engine for one algorithm family.
///
/// Implementations reject keys of another family with `InvalidKey`; the
/// adapter checks this before calling in, so that path only matters for
/// engines driven directly.
pub trait SignerEngine: Send {
    fn family(&self) -> AlgorithmFamily;

    /// Prepare for signing. `random` selects the randomised variant.
    fn prepare_sign(&mut self, key: &PrivateKey, random: Option<SharedEntropy>)
        -> ProviderResult<()>;

    fn prepare_verify(&mut self, key: &PublicKey) -> ProviderResult<()>;

    fn sign(&mut self, message: &[u8]) -> ProviderResult<Vec<u8>>;

    /// `Ok(false)` when the signature does not match.
    fn verify(&self, message: &[u8], signature: &[u8]) -> ProviderResult<bool>;
}
