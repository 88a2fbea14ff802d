use crate::params::DilithiumParameters;
use alloc::vec::Vec;
use core::fmt;
use pqc_entropy::{EntropyError, SharedEntropy};

/// Inputs for [`crate::DilithiumKeyPairGenerator::init`].
#[derive(Clone, Debug)]
pub struct DilithiumKeyGenerationParameters {
    pub parameters: DilithiumParameters,
    pub random: SharedEntropy,
}

impl DilithiumKeyGenerationParameters {
    pub fn new(random: SharedEntropy, parameters: DilithiumParameters) -> Self {
        Self { parameters, random }
    }
}

/// Encoded Dilithium public key tagged with its parameter set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DilithiumPublicKeyParameters {
    pub parameters: DilithiumParameters,
    pub encoded: Vec<u8>,
}

/// Encoded Dilithium private key tagged with its parameter set.
#[derive(Clone, PartialEq, Eq)]
pub struct DilithiumPrivateKeyParameters {
    pub parameters: DilithiumParameters,
    pub encoded: Vec<u8>,
}

impl fmt::Debug for DilithiumPrivateKeyParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DilithiumPrivateKeyParameters")
            .field("parameters", &self.parameters)
            .field("encoded", &"<redacted>")
            .finish()
    }
}

/// Dilithium keypair container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DilithiumKeyPair {
    pub public_key: DilithiumPublicKeyParameters,
    pub private_key: DilithiumPrivateKeyParameters,
}

/// Errors returned by the Dilithium engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DilithiumError {
    InvalidInput(&'static str),
    NotInitialized(&'static str),
    /// The bound random source refused to produce bytes.
    Entropy(EntropyError),
}

impl fmt::Display for DilithiumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DilithiumError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            DilithiumError::NotInitialized(msg) => write!(f, "engine not initialised: {msg}"),
            DilithiumError::Entropy(err) => write!(f, "{err}"),
        }
    }
}

impl From<EntropyError> for DilithiumError {
    fn from(err: EntropyError) -> Self {
        DilithiumError::Entropy(err)
    }
}

/// Result alias for Dilithium operations.
pub type DilithiumResult<T> = core::result::Result<T, DilithiumError>;
