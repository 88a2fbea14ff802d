use std::sync::Arc;

use tracing::debug;

use crate::config::{ConfigError, ProviderConfig};
use crate::directory::AlgorithmDirectory;
use crate::error::{ProviderError, ProviderResult};
use crate::keypair::KeyPairGenerator;
use crate::params::{AlgorithmFamily, ParameterSet};
use crate::signature::SignatureSession;

/// Name-based factory for key-pair adapters and signature sessions.
///
/// A family name ("Dilithium", "falcon") yields an unlocked adapter; a
/// parameter-set name ("dilithium3", "FALCON-1024") yields one locked to that
/// set.
#[derive(Clone, Debug)]
pub struct Provider {
    directory: Arc<AlgorithmDirectory>,
    default_dilithium: ParameterSet,
    default_falcon: ParameterSet,
}

impl Provider {
    /// Every parameter set enabled, defaults `dilithium3` and `falcon-512`.
    pub fn standard() -> Self {
        Self {
            directory: Arc::new(AlgorithmDirectory::standard()),
            default_dilithium: ParameterSet::DILITHIUM3,
            default_falcon: ParameterSet::FALCON_512,
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, ConfigError> {
        let resolved = config.resolve()?;
        debug!(
            parameter_sets = resolved.directory.len(),
            default_dilithium = resolved.default_dilithium.name(),
            default_falcon = resolved.default_falcon.name(),
            "provider configured"
        );
        Ok(Self {
            directory: Arc::new(resolved.directory),
            default_dilithium: resolved.default_dilithium,
            default_falcon: resolved.default_falcon,
        })
    }

    pub fn directory(&self) -> &Arc<AlgorithmDirectory> {
        &self.directory
    }

    /// Set an unlocked adapter of `family` falls back to.
    pub fn default_parameters(&self, family: AlgorithmFamily) -> ParameterSet {
        match family {
            AlgorithmFamily::Dilithium => self.default_dilithium,
            AlgorithmFamily::Falcon => self.default_falcon,
        }
    }

    pub fn key_pair_generator(&self, algorithm: &str) -> ProviderResult<KeyPairGenerator> {
        match self.lookup(algorithm)? {
            (family, None) => KeyPairGenerator::new(
                family,
                Arc::clone(&self.directory),
                self.default_parameters(family),
            ),
            (_, Some(lock)) => Ok(KeyPairGenerator::locked(lock, Arc::clone(&self.directory))),
        }
    }

    pub fn signature(&self, algorithm: &str) -> ProviderResult<SignatureSession> {
        Ok(match self.lookup(algorithm)? {
            (family, None) => SignatureSession::new(family),
            (_, Some(lock)) => SignatureSession::locked(lock),
        })
    }

    fn lookup(&self, algorithm: &str) -> ProviderResult<(AlgorithmFamily, Option<ParameterSet>)> {
        if let Some(family) = AlgorithmFamily::from_name(algorithm) {
            return Ok((family, None));
        }
        self.directory
            .resolve(algorithm)
            .map(|set| (set.family(), Some(set)))
            .ok_or_else(|| ProviderError::InvalidParameter(format!("no such algorithm {algorithm}")))
    }
}

impl Default for Provider {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_names_give_unlocked_adapters() {
        let provider = Provider::standard();
        let generator = provider.key_pair_generator("dilithium").expect("generator");
        assert_eq!(generator.lock(), None);
        assert_eq!(generator.algorithm(), "Dilithium");

        let session = provider.signature("FALCON").expect("session");
        assert_eq!(session.lock(), None);
        assert_eq!(session.family(), AlgorithmFamily::Falcon);
    }

    #[test]
    fn set_names_give_locked_adapters() {
        let provider = Provider::standard();
        let generator = provider.key_pair_generator("Dilithium2-AES").expect("generator");
        assert_eq!(generator.lock(), Some(ParameterSet::DILITHIUM2_AES));

        let session = provider.signature("falcon-1024").expect("session");
        assert_eq!(session.lock(), Some(ParameterSet::FALCON_1024));
    }

    #[test]
    fn unknown_algorithm_is_invalid_parameter() {
        let provider = Provider::standard();
        assert!(matches!(
            provider.signature("sphincs+"),
            Err(ProviderError::InvalidParameter(_))
        ));
    }

    #[test]
    fn config_restricts_directory_and_defaults() {
        let provider = Provider::from_config(&ProviderConfig::sample()).expect("provider");
        assert_eq!(provider.directory().len(), 3);
        assert_eq!(
            provider.default_parameters(AlgorithmFamily::Falcon),
            ParameterSet::FALCON_1024
        );
        assert!(provider.key_pair_generator("dilithium2").is_err());
    }
}
