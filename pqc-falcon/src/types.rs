use alloc::vec::Vec;
use core::fmt;
use pqc_entropy::{EntropyError, SharedEntropy};

/// Falcon parameter sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FalconParameters {
    /// Falcon-512 (NIST category 1).
    Falcon512,
    /// Falcon-1024 (NIST category 5).
    Falcon1024,
}

impl FalconParameters {
    pub const ALL: [FalconParameters; 2] = [FalconParameters::Falcon512, FalconParameters::Falcon1024];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Falcon512 => "falcon-512",
            Self::Falcon1024 => "falcon-1024",
        }
    }

    /// log2 of the ring degree.
    pub const fn log_n(self) -> u8 {
        match self {
            Self::Falcon512 => 9,
            Self::Falcon1024 => 10,
        }
    }

    pub const fn security_category(self) -> u8 {
        match self {
            Self::Falcon512 => 1,
            Self::Falcon1024 => 5,
        }
    }

    pub const fn public_key_len(self) -> usize {
        match self {
            Self::Falcon512 => 897,
            Self::Falcon1024 => 1793,
        }
    }

    pub const fn private_key_len(self) -> usize {
        match self {
            Self::Falcon512 => 1281,
            Self::Falcon1024 => 2305,
        }
    }

    pub const fn signature_len(self) -> usize {
        match self {
            Self::Falcon512 => 690,
            Self::Falcon1024 => 1330,
        }
    }
}

impl fmt::Display for FalconParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug)]
pub struct FalconKeyGenerationParameters {
    pub parameters: FalconParameters,
    pub random: SharedEntropy,
}

impl FalconKeyGenerationParameters {
    pub fn new(random: SharedEntropy, parameters: FalconParameters) -> Self {
        Self { parameters, random }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FalconPublicKeyParameters {
    pub parameters: FalconParameters,
    pub encoded: Vec<u8>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct FalconPrivateKeyParameters {
    pub parameters: FalconParameters,
    pub encoded: Vec<u8>,
}

impl fmt::Debug for FalconPrivateKeyParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FalconPrivateKeyParameters")
            .field("parameters", &self.parameters)
            .field("encoded", &"<redacted>")
            .finish()
    }
}

/// Falcon keypair container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FalconKeyPair {
    pub public_key: FalconPublicKeyParameters,
    pub private_key: FalconPrivateKeyParameters,
}

/// Errors returned by the Falcon engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FalconError {
    InvalidInput(&'static str),
    NotInitialized(&'static str),
    Entropy(EntropyError),
}

impl fmt::Display for FalconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FalconError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            FalconError::NotInitialized(msg) => write!(f, "engine not initialised: {msg}"),
            FalconError::Entropy(err) => write!(f, "{err}"),
        }
    }
}

impl From<EntropyError> for FalconError {
    fn from(err: EntropyError) -> Self {
        FalconError::Entropy(err)
    }
}

/// Result alias for Falcon operations.
pub type FalconResult<T> = core::result::Result<T, FalconError>;
