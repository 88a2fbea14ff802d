//! Family-tagged key material handed out by the key-pair adapter.

use pqc_dilithium::{DilithiumPrivateKeyParameters, DilithiumPublicKeyParameters};
use pqc_falcon::{FalconPrivateKeyParameters, FalconPublicKeyParameters};

use crate::error::{ProviderError, ProviderResult};
use crate::params::{AlgorithmFamily, ParameterSet};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicKey {
    Dilithium(DilithiumPublicKeyParameters),
    Falcon(FalconPublicKeyParameters),
}

impl PublicKey {
    /// Wraps a raw encoding received from elsewhere, checking its length
    /// against the parameter set.
    pub fn from_encoded(parameter_set: ParameterSet, encoded: Vec<u8>) -> ProviderResult<Self> {
        if encoded.len() != parameter_set.public_key_len() {
            return Err(ProviderError::InvalidKey(format!(
                "{parameter_set} public key must be {} bytes, got {}",
                parameter_set.public_key_len(),
                encoded.len()
            )));
        }
        Ok(match parameter_set {
            ParameterSet::Dilithium(parameters) => {
                PublicKey::Dilithium(DilithiumPublicKeyParameters { parameters, encoded })
            }
            ParameterSet::Falcon(parameters) => {
                PublicKey::Falcon(FalconPublicKeyParameters { parameters, encoded })
            }
        })
    }

    pub fn parameter_set(&self) -> ParameterSet {
        match self {
            PublicKey::Dilithium(key) => ParameterSet::Dilithium(key.parameters),
            PublicKey::Falcon(key) => ParameterSet::Falcon(key.parameters),
        }
    }

    pub fn family(&self) -> AlgorithmFamily {
        self.parameter_set().family()
    }

    /// Parameter-set name the key was generated under.
    pub fn algorithm(&self) -> &'static str {
        self.parameter_set().name()
    }

    pub fn encoded(&self) -> &[u8] {
        match self {
            PublicKey::Dilithium(key) => &key.encoded,
            PublicKey::Falcon(key) => &key.encoded,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrivateKey {
    Dilithium(DilithiumPrivateKeyParameters),
    Falcon(FalconPrivateKeyParameters),
}

impl PrivateKey {
    pub fn from_encoded(parameter_set: ParameterSet, encoded: Vec<u8>) -> ProviderResult<Self> {
        if encoded.len() != parameter_set.private_key_len() {
            return Err(ProviderError::InvalidKey(format!(
                "{parameter_set} private key must be {} bytes, got {}",
                parameter_set.private_key_len(),
                encoded.len()
            )));
        }
        Ok(match parameter_set {
            ParameterSet::Dilithium(parameters) => {
                PrivateKey::Dilithium(DilithiumPrivateKeyParameters { parameters, encoded })
            }
            ParameterSet::Falcon(parameters) => {
                PrivateKey::Falcon(FalconPrivateKeyParameters { parameters, encoded })
            }
        })
    }

    pub fn parameter_set(&self) -> ParameterSet {
        match self {
            PrivateKey::Dilithium(key) => ParameterSet::Dilithium(key.parameters),
            PrivateKey::Falcon(key) => ParameterSet::Falcon(key.parameters),
        }
    }

    pub fn family(&self) -> AlgorithmFamily {
        self.parameter_set().family()
    }

    pub fn algorithm(&self) -> &'static str {
        self.parameter_set().name()
    }

    pub fn encoded(&self) -> &[u8] {
        match self {
            PrivateKey::Dilithium(key) => &key.encoded,
            PrivateKey::Falcon(key) => &key.encoded,
        }
    }
}

/// Public/private halves generated under one parameter set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

impl KeyPair {
    pub fn parameter_set(&self) -> ParameterSet {
        self.public.parameter_set()
    }
}
