//! Key-pair adapter: resolves a parameter-set selector, enforces the optional
//! lock and drives the family's key-generation engine.

use std::sync::Arc;

use pqc_entropy::SharedEntropy;
use tracing::{debug, warn};

use crate::adapters::{default_random, key_pair_engine};
use crate::directory::AlgorithmDirectory;
use crate::engine::KeyPairEngine;
use crate::error::{ProviderError, ProviderResult};
use crate::keys::KeyPair;
use crate::params::{AlgorithmFamily, ParameterSelector, ParameterSet};

pub struct KeyPairGenerator {
    family: AlgorithmFamily,
    lock: Option<ParameterSet>,
    default_parameters: ParameterSet,
    directory: Arc<AlgorithmDirectory>,
    active: Option<ParameterSet>,
    engine: Option<Box<dyn KeyPairEngine>>,
}

impl KeyPairGenerator {
    /// Unlocked adapter for `family`. `default_parameters` is used when
    /// `generate_key_pair` runs before any `initialize`.
    pub fn new(
        family: AlgorithmFamily,
        directory: Arc<AlgorithmDirectory>,
        default_parameters: ParameterSet,
    ) -> ProviderResult<Self> {
        if default_parameters.family() != family {
            return Err(ProviderError::InvalidParameter(format!(
                "default {default_parameters} is not a {family} parameter set"
            )));
        }
        Ok(Self {
            family,
            lock: None,
            default_parameters,
            directory,
            active: None,
            engine: None,
        })
    }

    /// Adapter that only ever produces keys for `lock`.
    pub fn locked(lock: ParameterSet, directory: Arc<AlgorithmDirectory>) -> Self {
        Self {
            family: lock.family(),
            lock: Some(lock),
            default_parameters: lock,
            directory,
            active: None,
            engine: None,
        }
    }

    /// Name this adapter was requested under: the lock's set name, or the
    /// family name when unlocked.
    pub fn algorithm(&self) -> &'static str {
        match self.lock {
            Some(lock) => lock.name(),
            None => self.family.name(),
        }
    }

    pub fn family(&self) -> AlgorithmFamily {
        self.family
    }

    pub fn lock(&self) -> Option<ParameterSet> {
        self.lock
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    /// Parameter set of the current engine, once initialised.
    pub fn parameter_set(&self) -> Option<ParameterSet> {
        self.active
    }

    pub fn initialize(
        &mut self,
        selector: &ParameterSelector,
        random: SharedEntropy,
    ) -> ProviderResult<()> {
        let name = selector.lookup_name();
        let resolved = self
            .directory
            .resolve(&name)
            .ok_or_else(|| ProviderError::InvalidParameter(format!("unknown parameter set {name}")))?;

        if let Some(lock) = self.lock {
            if resolved != lock {
                warn!(lock = lock.name(), requested = resolved.name(), "parameter set rejected by lock");
                return Err(ProviderError::AlgorithmMismatch {
                    expected: lock.name(),
                    found: resolved.name(),
                });
            }
        } else if resolved.family() != self.family {
            return Err(ProviderError::InvalidParameter(format!(
                "{resolved} is not a {} parameter set",
                self.family
            )));
        }

        self.install(resolved, random);
        Ok(())
    }

    /// Key sizes alone cannot pick a parameter set; always rejected.
    pub fn initialize_with_strength(
        &mut self,
        strength: u32,
        _random: SharedEntropy,
    ) -> ProviderResult<()> {
        Err(ProviderError::InvalidParameter(format!(
            "strength {strength} cannot select a {} parameter set; use a parameter set selector",
            self.family
        )))
    }

    /// Generate a key pair, initialising with the lock (or the configured
    /// default) and the process-wide random source on first use.
    pub fn generate_key_pair(&mut self) -> ProviderResult<KeyPair> {
        if self.engine.is_none() {
            let parameters = self.lock.unwrap_or(self.default_parameters);
            debug!(parameter_set = parameters.name(), "implicit key pair initialisation");
            self.install(parameters, default_random());
        }
        let engine = self
            .engine
            .as_mut()
            .ok_or(ProviderError::NotInitialized("key pair generator"))?;
        engine.generate()
    }

    fn install(&mut self, parameters: ParameterSet, random: SharedEntropy) {
        debug!(parameter_set = parameters.name(), "key pair generator initialised");
        self.active = Some(parameters);
        self.engine = Some(key_pair_engine(parameters, random));
    }
}

impl std::fmt::Debug for KeyPairGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPairGenerator")
            .field("family", &self.family)
            .field("lock", &self.lock)
            .field("default_parameters", &self.default_parameters)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}
