#![no_std]

//! Deterministic Falcon stand-in engine.
//!
//! Signatures are `nonce || tag` where the tag is a Blake2s transcript over
//! the public key, nonce and message, padded to the Falcon signature size.

extern crate alloc;

mod types;

pub use types::{
    FalconError, FalconKeyGenerationParameters, FalconKeyPair, FalconParameters,
    FalconPrivateKeyParameters, FalconPublicKeyParameters, FalconResult,
};

use alloc::vec::Vec;
use blake2::Blake2s256;
use digest::Digest;
use pqc_entropy::{EntropySource, SharedEntropy};

const DOMAIN_FALCON_SK: &[u8] = b"PQC_FALCON_SK_V1";
const DOMAIN_FALCON_PK: &[u8] = b"PQC_FALCON_PK_V1";
const DOMAIN_FALCON_NONCE: &[u8] = b"PQC_FALCON_NONCE_V1";
const DOMAIN_FALCON_SIG: &[u8] = b"PQC_FALCON_SIG_V1";

const SEED_LEN: usize = 48;
const NONCE_LEN: usize = 40;

#[derive(Default)]
pub struct FalconKeyPairGenerator {
    params: Option<FalconKeyGenerationParameters>,
}

impl FalconKeyPairGenerator {
    pub const fn new() -> Self {
        Self { params: None }
    }

    pub fn init(&mut self, params: FalconKeyGenerationParameters) {
        self.params = Some(params);
    }

    pub fn parameters(&self) -> Option<FalconParameters> {
        self.params.as_ref().map(|p| p.parameters)
    }

    pub fn generate_key_pair(&mut self) -> FalconResult<FalconKeyPair> {
        let params = self
            .params
            .as_mut()
            .ok_or(FalconError::NotInitialized("key pair generator"))?;

        let mut seed = [0u8; SEED_LEN];
        params.random.try_fill_bytes(&mut seed)?;
        let parameters = params.parameters;

        let mut private = Vec::with_capacity(parameters.private_key_len());
        private.extend_from_slice(&seed);
        private.extend_from_slice(&expand_bytes(
            DOMAIN_FALCON_SK,
            parameters,
            &seed,
            parameters.private_key_len() - SEED_LEN,
        ));

        Ok(FalconKeyPair {
            public_key: FalconPublicKeyParameters {
                parameters,
                encoded: derive_public(parameters, &seed),
            },
            private_key: FalconPrivateKeyParameters {
                parameters,
                encoded: private,
            },
        })
    }
}

enum Mode {
    Sign(FalconPrivateKeyParameters, Option<SharedEntropy>),
    Verify(FalconPublicKeyParameters),
}

#[derive(Default)]
pub struct FalconSigner {
    mode: Option<Mode>,
}

impl FalconSigner {
    pub const fn new() -> Self {
        Self { mode: None }
    }

    pub fn init_sign(&mut self, key: FalconPrivateKeyParameters, random: Option<SharedEntropy>) {
        self.mode = Some(Mode::Sign(key, random));
    }

    pub fn init_verify(&mut self, key: FalconPublicKeyParameters) {
        self.mode = Some(Mode::Verify(key));
    }

    pub fn generate_signature(&mut self, message: &[u8]) -> FalconResult<Vec<u8>> {
        let Some(Mode::Sign(key, random)) = self.mode.as_mut() else {
            return Err(FalconError::NotInitialized("signer not set up for signing"));
        };
        let parameters = key.parameters;
        if key.encoded.len() != parameters.private_key_len() {
            return Err(FalconError::InvalidInput("falcon private key length invalid"));
        }
        let seed = &key.encoded[..SEED_LEN];

        let nonce = match random {
            Some(random) => {
                let mut nonce = [0u8; NONCE_LEN];
                random.try_fill_bytes(&mut nonce)?;
                nonce.to_vec()
            }
            None => {
                let mut input = Vec::with_capacity(SEED_LEN + message.len());
                input.extend_from_slice(seed);
                input.extend_from_slice(message);
                expand_bytes(DOMAIN_FALCON_NONCE, parameters, &input, NONCE_LEN)
            }
        };

        let public = derive_public(parameters, seed);
        let mut signature = nonce;
        let tag = signature_tag(parameters, &public, &signature, message);
        signature.extend_from_slice(&tag);
        Ok(signature)
    }

    pub fn verify_signature(&self, message: &[u8], signature: &[u8]) -> FalconResult<bool> {
        let Some(Mode::Verify(key)) = self.mode.as_ref() else {
            return Err(FalconError::NotInitialized("signer not set up for verification"));
        };
        let parameters = key.parameters;
        if key.encoded.len() != parameters.public_key_len() {
            return Err(FalconError::InvalidInput("falcon public key length invalid"));
        }
        if signature.len() != parameters.signature_len() {
            return Err(FalconError::InvalidInput("falcon signature length invalid"));
        }

        let (nonce, tag) = signature.split_at(NONCE_LEN);
        Ok(signature_tag(parameters, &key.encoded, nonce, message).as_slice() == tag)
    }
}

fn derive_public(parameters: FalconParameters, seed: &[u8]) -> Vec<u8> {
    expand_bytes(DOMAIN_FALCON_PK, parameters, seed, parameters.public_key_len())
}

fn signature_tag(
    parameters: FalconParameters,
    public: &[u8],
    nonce: &[u8],
    message: &[u8],
) -> Vec<u8> {
    let mut transcript = Vec::with_capacity(public.len() + nonce.len() + message.len());
    transcript.extend_from_slice(public);
    transcript.extend_from_slice(nonce);
    transcript.extend_from_slice(message);
    expand_bytes(
        DOMAIN_FALCON_SIG,
        parameters,
        &transcript,
        parameters.signature_len() - NONCE_LEN,
    )
}

fn expand_bytes(domain: &[u8], parameters: FalconParameters, input: &[u8], len: usize) -> Vec<u8> {
    if len == 0 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(len);
    let mut counter: u32 = 0;

    while out.len() < len {
        let mut digest = Blake2s256::new();
        digest.update(domain);
        digest.update([parameters.log_n()]);
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

#[cfg(test)]
mod tests {
    use super::*;
    use pqc_entropy::EntropyError;

    struct Dry;

    impl EntropySource for Dry {
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), EntropyError> {
            Err(EntropyError::Unavailable("dry"))
        }
    }

    fn keypair(parameters: FalconParameters, seed: u64) -> FalconKeyPair {
        let mut generator = FalconKeyPairGenerator::new();
        generator.init(FalconKeyGenerationParameters::new(
            SharedEntropy::seeded(seed),
            parameters,
        ));
        generator.generate_key_pair().expect("keypair")
    }

    #[test]
    fn keypair_lengths_match_parameter_set() {
        for parameters in FalconParameters::ALL {
            let pair = keypair(parameters, 11);
            assert_eq!(pair.public_key.encoded.len(), parameters.public_key_len());
            assert_eq!(pair.private_key.encoded.len(), parameters.private_key_len());
        }
    }

    #[test]
    fn same_seed_yields_same_keypair() {
        assert_eq!(
            keypair(FalconParameters::Falcon512, 2),
            keypair(FalconParameters::Falcon512, 2)
        );
    }

    #[test]
    fn sign_and_verify_roundtrip_succeeds() {
        let pair = keypair(FalconParameters::Falcon1024, 3);
        let mut signer = FalconSigner::new();
        signer.init_sign(pair.private_key, Some(SharedEntropy::seeded(1)));
        let sig = signer.generate_signature(b"falcon message").expect("sign");
        assert_eq!(sig.len(), FalconParameters::Falcon1024.signature_len());

        let mut verifier = FalconSigner::new();
        verifier.init_verify(pair.public_key);
        assert!(verifier.verify_signature(b"falcon message", &sig).expect("verify"));
    }

    #[test]
    fn verify_detects_tampering() {
        let pair = keypair(FalconParameters::Falcon512, 4);
        let mut signer = FalconSigner::new();
        signer.init_sign(pair.private_key, None);
        let mut sig = signer.generate_signature(b"real message").expect("sign");
        sig[NONCE_LEN] ^= 0xFF;

        let mut verifier = FalconSigner::new();
        verifier.init_verify(pair.public_key);
        assert!(!verifier.verify_signature(b"real message", &sig).expect("verify"));
    }

    #[test]
    fn verify_without_init_is_rejected() {
        let verifier = FalconSigner::new();
        assert_eq!(
            verifier.verify_signature(b"m", &[0u8; 690]).unwrap_err(),
            FalconError::NotInitialized("signer not set up for verification")
        );
    }

    #[test]
    fn dry_entropy_is_reported_not_panicked() {
        let mut generator = FalconKeyPairGenerator::new();
        generator.init(FalconKeyGenerationParameters::new(
            SharedEntropy::new(Dry),
            FalconParameters::Falcon1024,
        ));
        assert_eq!(
            generator.generate_key_pair().unwrap_err(),
            FalconError::Entropy(EntropyError::Unavailable("dry"))
        );

        let pair = keypair(FalconParameters::Falcon512, 21);
        let mut signer = FalconSigner::new();
        signer.init_sign(pair.private_key, Some(SharedEntropy::new(Dry)));
        assert!(matches!(
            signer.generate_signature(b"m"),
            Err(FalconError::Entropy(_))
        ));
    }
}
