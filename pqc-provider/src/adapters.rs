use std::sync::OnceLock;

use pqc_dilithium::{DilithiumKeyGenerationParameters, DilithiumKeyPairGenerator, DilithiumSigner};
use pqc_entropy::SharedEntropy;
use pqc_falcon::{FalconKeyGenerationParameters, FalconKeyPairGenerator, FalconSigner};

use crate::engine::{KeyPairEngine, SignerEngine};
use crate::error::{ProviderError, ProviderResult};
use crate::keys::{KeyPair, PrivateKey, PublicKey};
use crate::params::{AlgorithmFamily, ParameterSet};

static DEFAULT_RANDOM: OnceLock<SharedEntropy> = OnceLock::new();

/// Process-wide random source used when a key-pair adapter initialises
/// itself implicitly.
pub fn default_random() -> SharedEntropy {
    DEFAULT_RANDOM.get_or_init(SharedEntropy::host).clone()
}

/// Build and initialise the key-pair engine for `parameter_set`.
pub fn key_pair_engine(parameter_set: ParameterSet, random: SharedEntropy) -> Box<dyn KeyPairEngine> {
    match parameter_set {
        ParameterSet::Dilithium(parameters) => {
            let mut engine = DilithiumKeyPairGenerator::new();
            engine.init(DilithiumKeyGenerationParameters::new(random, parameters));
            Box::new(engine)
        }
        ParameterSet::Falcon(parameters) => {
            let mut engine = FalconKeyPairGenerator::new();
            engine.init(FalconKeyGenerationParameters::new(random, parameters));
            Box::new(engine)
        }
    }
}

/// Fresh, uninitialised signer engine for `family`.
pub fn signer_engine(family: AlgorithmFamily) -> Box<dyn SignerEngine> {
    match family {
        AlgorithmFamily::Dilithium => Box::new(DilithiumSigner::new()),
        AlgorithmFamily::Falcon => Box::new(FalconSigner::new()),
    }
}

fn foreign_key(engine: AlgorithmFamily, kind: &str, found: AlgorithmFamily) -> ProviderError {
    ProviderError::InvalidKey(format!("{found} {kind} key passed to {engine} signer"))
}

impl KeyPairEngine for DilithiumKeyPairGenerator {
    fn generate(&mut self) -> ProviderResult<KeyPair> {
        let pair = self.generate_key_pair()?;
        Ok(KeyPair {
            public: PublicKey::Dilithium(pair.public_key),
            private: PrivateKey::Dilithium(pair.private_key),
        })
    }
}

impl KeyPairEngine for FalconKeyPairGenerator {
    fn generate(&mut self) -> ProviderResult<KeyPair> {
        let pair = self.generate_key_pair()?;
        Ok(KeyPair {
            public: PublicKey::Falcon(pair.public_key),
            private: PrivateKey::Falcon(pair.private_key),
        })
    }
}

impl SignerEngine for DilithiumSigner {
    fn family(&self) -> AlgorithmFamily {
        AlgorithmFamily::Dilithium
    }

    fn prepare_sign(&mut self, key: &PrivateKey, random: Option<SharedEntropy>) -> ProviderResult<()> {
        match key {
            PrivateKey::Dilithium(key) => {
                self.init_sign(key.clone(), random);
                Ok(())
            }
            other => Err(foreign_key(AlgorithmFamily::Dilithium, "private", other.family())),
        }
    }

    fn prepare_verify(&mut self, key: &PublicKey) -> ProviderResult<()> {
        match key {
            PublicKey::Dilithium(key) => {
                self.init_verify(key.clone());
                Ok(())
            }
            other => Err(foreign_key(AlgorithmFamily::Dilithium, "public", other.family())),
        }
    }

    fn sign(&mut self, message: &[u8]) -> ProviderResult<Vec<u8>> {
        self.generate_signature(message).map_err(ProviderError::from)
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> ProviderResult<bool> {
        self.verify_signature(message, signature)
            .map_err(ProviderError::from)
    }
}

impl SignerEngine for FalconSigner {
    fn family(&self) -> AlgorithmFamily {
        AlgorithmFamily::Falcon
    }

    fn prepare_sign(&mut self, key: &PrivateKey, random: Option<SharedEntropy>) -> ProviderResult<()> {
        match key {
            PrivateKey::Falcon(key) => {
                self.init_sign(key.clone(), random);
                Ok(())
            }
            other => Err(foreign_key(AlgorithmFamily::Falcon, "private", other.family())),
        }
    }

    fn prepare_verify(&mut self, key: &PublicKey) -> ProviderResult<()> {
        match key {
            PublicKey::Falcon(key) => {
                self.init_verify(key.clone());
                Ok(())
            }
            other => Err(foreign_key(AlgorithmFamily::Falcon, "public", other.family())),
        }
    }

    fn sign(&mut self, message: &[u8]) -> ProviderResult<Vec<u8>> {
        self.generate_signature(message).map_err(ProviderError::from)
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> ProviderResult<bool> {
        self.verify_signature(message, signature)
            .map_err(ProviderError::from)
    }
}
