#![no_std]

//! Deterministic Dilithium stand-in engine.
//!
//! Keys and signatures carry the published round-3 sizes for every parameter
//! set, but the arithmetic is a Blake2s transcript rather than lattice math.
//! The engine keeps the stateful `init` / `generate` / `sign` / `verify` shape
//! the provider adapters drive.

extern crate alloc;

mod params;
mod types;

pub use params::DilithiumParameters;
pub use types::{
    DilithiumError, DilithiumKeyGenerationParameters, DilithiumKeyPair,
    DilithiumPrivateKeyParameters, DilithiumPublicKeyParameters, DilithiumResult,
};

use alloc::vec::Vec;
use blake2::Blake2s256;
use digest::Digest;
use pqc_entropy::{EntropySource, SharedEntropy};

const DOMAIN_DILITHIUM_SK: &[u8] = b"PQC_DILITHIUM_SK_V1";
const DOMAIN_DILITHIUM_PK: &[u8] = b"PQC_DILITHIUM_PK_V1";
const DOMAIN_DILITHIUM_SALT: &[u8] = b"PQC_DILITHIUM_SALT_V1";
const DOMAIN_DILITHIUM_SIG: &[u8] = b"PQC_DILITHIUM_SIG_V1";

const SEED_LEN: usize = 32;
const SALT_LEN: usize = 32;

/// Key-pair generator; must be initialised before use.
#[derive(Default)]
pub struct DilithiumKeyPairGenerator {
    params: Option<DilithiumKeyGenerationParameters>,
}

impl DilithiumKeyPairGenerator {
    pub const fn new() -> Self {
        Self { params: None }
    }

    /// Bind the generator to a parameter set and random source.
    pub fn init(&mut self, params: DilithiumKeyGenerationParameters) {
        self.params = Some(params);
    }

    /// Parameter set the generator is bound to, if any.
    pub fn parameters(&self) -> Option<DilithiumParameters> {
        self.params.as_ref().map(|p| p.parameters)
    }

    /// Draw a fresh seed from the bound random source and expand a key pair.
    pub fn generate_key_pair(&mut self) -> DilithiumResult<DilithiumKeyPair> {
        let params = self
            .params
            .as_mut()
            .ok_or(DilithiumError::NotInitialized("key pair generator"))?;

        let mut seed = [0u8; SEED_LEN];
        params.random.try_fill_bytes(&mut seed)?;
        let parameters = params.parameters;

        let mut private = Vec::with_capacity(parameters.private_key_len());
        private.extend_from_slice(&seed);
        private.extend_from_slice(&expand_bytes(
            DOMAIN_DILITHIUM_SK,
            parameters,
            &seed,
            parameters.private_key_len() - SEED_LEN,
        ));

        Ok(DilithiumKeyPair {
            public_key: DilithiumPublicKeyParameters {
                parameters,
                encoded: derive_public(parameters, &seed),
            },
            private_key: DilithiumPrivateKeyParameters {
                parameters,
                encoded: private,
            },
        })
    }
}

enum SignerState {
    Sign {
        key: DilithiumPrivateKeyParameters,
        random: Option<SharedEntropy>,
    },
    Verify {
        key: DilithiumPublicKeyParameters,
    },
}

/// Message signer/verifier over complete messages.
#[derive(Default)]
pub struct DilithiumSigner {
    state: Option<SignerState>,
}

impl DilithiumSigner {
    pub const fn new() -> Self {
        Self { state: None }
    }

    /// Prepare for signing. With `random` the salt is drawn from it; without
    /// one the salt is derived from the key and message.
    pub fn init_sign(
        &mut self,
        key: DilithiumPrivateKeyParameters,
        random: Option<SharedEntropy>,
    ) {
        self.state = Some(SignerState::Sign { key, random });
    }

    pub fn init_verify(&mut self, key: DilithiumPublicKeyParameters) {
        self.state = Some(SignerState::Verify { key });
    }

    pub fn generate_signature(&mut self, message: &[u8]) -> DilithiumResult<Vec<u8>> {
        let Some(SignerState::Sign { key, random }) = self.state.as_mut() else {
            return Err(DilithiumError::NotInitialized("signer not set up for signing"));
        };
        let parameters = key.parameters;
        if key.encoded.len() != parameters.private_key_len() {
            return Err(DilithiumError::InvalidInput("dilithium private key length invalid"));
        }
        let seed = &key.encoded[..SEED_LEN];

        let mut salt = [0u8; SALT_LEN];
        match random {
            Some(random) => random.try_fill_bytes(&mut salt)?,
            None => {
                let mut input = Vec::with_capacity(SEED_LEN + message.len());
                input.extend_from_slice(seed);
                input.extend_from_slice(message);
                salt.copy_from_slice(&expand_bytes(
                    DOMAIN_DILITHIUM_SALT,
                    parameters,
                    &input,
                    SALT_LEN,
                ));
            }
        }

        let public = derive_public(parameters, seed);
        let mut signature = Vec::with_capacity(parameters.signature_len());
        signature.extend_from_slice(&salt);
        signature.extend_from_slice(&signature_tag(parameters, &public, &salt, message));
        Ok(signature)
    }

    /// `Ok(false)` on mismatch; errors only for malformed inputs.
    pub fn verify_signature(&self, message: &[u8], signature: &[u8]) -> DilithiumResult<bool> {
        let Some(SignerState::Verify { key }) = self.state.as_ref() else {
            return Err(DilithiumError::NotInitialized("signer not set up for verification"));
        };
        let parameters = key.parameters;
        if key.encoded.len() != parameters.public_key_len() {
            return Err(DilithiumError::InvalidInput("dilithium public key length invalid"));
        }
        if signature.len() != parameters.signature_len() {
            return Err(DilithiumError::InvalidInput("dilithium signature length invalid"));
        }

        let (salt, tag) = signature.split_at(SALT_LEN);
        let expected = signature_tag(parameters, &key.encoded, salt, message);
        Ok(expected.as_slice() == tag)
    }
}

fn derive_public(parameters: DilithiumParameters, seed: &[u8]) -> Vec<u8> {
    expand_bytes(
        DOMAIN_DILITHIUM_PK,
        parameters,
        seed,
        parameters.public_key_len(),
    )
}

fn signature_tag(
    parameters: DilithiumParameters,
    public: &[u8],
    salt: &[u8],
    message: &[u8],
) -> Vec<u8> {
    let mut transcript = Vec::with_capacity(public.len() + salt.len() + message.len());
    transcript.extend_from_slice(public);
    transcript.extend_from_slice(salt);
    transcript.extend_from_slice(message);
    expand_bytes(
        DOMAIN_DILITHIUM_SIG,
        parameters,
        &transcript,
        parameters.signature_len() - SALT_LEN,
    )
}

fn expand_bytes(
    domain: &[u8],
    parameters: DilithiumParameters,
    input: &[u8],
    len: usize,
) -> Vec<u8> {
    if len == 0 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(len);
    let mut counter: u32 = 0;

    while out.len() < len {
        let mut digest = Blake2s256::new();
        digest.update(domain);
        digest.update(parameters.name().as_bytes());
        digest.update((len as u32).to_le_bytes());
        digest.update(input);
        digest.update(counter.to_le_bytes());

        let block = digest.finalize();
        let remaining = len - out.len();
        out.extend_from_slice(&block[..remaining.min(block.len())]);
        counter = counter.wrapping_add(1);
    }

    out
}
