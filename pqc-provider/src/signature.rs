//! Incremental sign/verify session.
//!
//! Message bytes are buffered by `update*`; `sign`/`verify` consume the
//! whole buffer in one engine call. Every terminal call empties the buffer,
//! whether it succeeds or fails, and leaves the mode untouched so the session
//! can be reused with the same key.

use std::mem;

use pqc_entropy::SharedEntropy;
use tracing::{debug, warn};

use crate::adapters::signer_engine;
use crate::engine::SignerEngine;
use crate::error::{ProviderError, ProviderResult};
use crate::keys::{PrivateKey, PublicKey};
use crate::params::{AlgorithmFamily, ParameterSelector, ParameterSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    Unset,
    Signing,
    Verifying,
}

pub struct SignatureSession {
    family: AlgorithmFamily,
    lock: Option<ParameterSet>,
    engine: Box<dyn SignerEngine>,
    mode: SessionMode,
    buffer: Vec<u8>,
}

impl SignatureSession {
    /// Session accepting any key of `family`.
    pub fn new(family: AlgorithmFamily) -> Self {
        Self::with_engine(signer_engine(family), None)
    }

    /// Session accepting only keys generated under `lock`.
    pub fn locked(lock: ParameterSet) -> Self {
        Self::with_engine(signer_engine(lock.family()), Some(lock))
    }

    /// Session over a caller-supplied engine. A lock of another family than
    /// the engine's accepts no key: keys of the engine's family fail with
    /// `AlgorithmMismatch`, keys of the lock's family with `InvalidKey`.
    pub fn with_engine(engine: Box<dyn SignerEngine>, lock: Option<ParameterSet>) -> Self {
        Self {
            family: engine.family(),
            lock,
            engine,
            mode: SessionMode::Unset,
            buffer: Vec::new(),
        }
    }

    pub fn family(&self) -> AlgorithmFamily {
        self.family
    }

    pub fn lock(&self) -> Option<ParameterSet> {
        self.lock
    }

    pub fn algorithm(&self) -> &'static str {
        match self.lock {
            Some(lock) => lock.name(),
            None => self.family.name(),
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn init_verify(&mut self, key: &PublicKey) -> ProviderResult<()> {
        self.check_key("public", key.parameter_set())?;
        self.engine.prepare_verify(key)?;
        self.buffer.clear();
        self.mode = SessionMode::Verifying;
        debug!(algorithm = key.algorithm(), "signature session ready to verify");
        Ok(())
    }

    /// Prepare for signing. With `random` the engine signs randomised;
    /// without it signing is deterministic in key and message.
    pub fn init_sign(
        &mut self,
        key: &PrivateKey,
        random: Option<SharedEntropy>,
    ) -> ProviderResult<()> {
        self.check_key("private", key.parameter_set())?;
        let randomized = random.is_some();
        self.engine.prepare_sign(key, random)?;
        self.buffer.clear();
        self.mode = SessionMode::Signing;
        debug!(algorithm = key.algorithm(), randomized, "signature session ready to sign");
        Ok(())
    }

    pub fn update(&mut self, byte: u8) {
        self.buffer.push(byte);
    }

    pub fn update_slice(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Append `bytes[offset..offset + len]`.
    pub fn update_range(&mut self, bytes: &[u8], offset: usize, len: usize) -> ProviderResult<()> {
        let window = offset
            .checked_add(len)
            .and_then(|end| bytes.get(offset..end))
            .ok_or(ProviderError::InvalidInput("update range out of bounds"))?;
        self.buffer.extend_from_slice(window);
        Ok(())
    }

    pub fn sign(&mut self) -> ProviderResult<Vec<u8>> {
        let message = mem::take(&mut self.buffer);
        if self.mode != SessionMode::Signing {
            return Err(ProviderError::NotInitialized("signing"));
        }
        let signature = self.engine.sign(&message).map_err(into_failure)?;
        debug!(message_len = message.len(), signature_len = signature.len(), "message signed");
        Ok(signature)
    }

    /// `Ok(false)` when `signature` does not match the buffered message.
    pub fn verify(&mut self, signature: &[u8]) -> ProviderResult<bool> {
        let message = mem::take(&mut self.buffer);
        if self.mode != SessionMode::Verifying {
            return Err(ProviderError::NotInitialized("verification"));
        }
        let valid = self
            .engine
            .verify(&message, signature)
            .map_err(into_failure)?;
        debug!(message_len = message.len(), valid, "signature checked");
        Ok(valid)
    }

    pub fn set_parameter(&mut self, _selector: &ParameterSelector) -> ProviderResult<()> {
        Err(ProviderError::Unsupported("set_parameter"))
    }

    pub fn set_parameter_by_name(&mut self, _name: &str, _value: &str) -> ProviderResult<()> {
        Err(ProviderError::Unsupported("set_parameter_by_name"))
    }

    pub fn get_parameter(&self, _name: &str) -> ProviderResult<String> {
        Err(ProviderError::Unsupported("get_parameter"))
    }

    fn check_key(&self, kind: &'static str, keyed: ParameterSet) -> ProviderResult<()> {
        if keyed.family() != self.family {
            warn!(kind, key_family = %keyed.family(), session_family = %self.family, "key rejected");
            return Err(ProviderError::InvalidKey(format!(
                "unknown {kind} key passed to {} signature",
                self.family
            )));
        }
        if let Some(lock) = self.lock {
            if keyed != lock {
                warn!(lock = lock.name(), key = keyed.name(), "key rejected by lock");
                return Err(ProviderError::AlgorithmMismatch {
                    expected: lock.name(),
                    found: keyed.name(),
                });
            }
        }
        Ok(())
    }
}

fn into_failure(err: ProviderError) -> ProviderError {
    match err {
        ProviderError::SignatureFailure(_) => err,
        other => ProviderError::SignatureFailure(other.to_string()),
    }
}

impl std::fmt::Debug for SignatureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureSession")
            .field("family", &self.family)
            .field("lock", &self.lock)
            .field("mode", &self.mode)
            .field("buffered", &self.buffer.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::key_pair_engine;
    use crate::keys::KeyPair;

    fn pair(set: ParameterSet, seed: u64) -> KeyPair {
        key_pair_engine(set, SharedEntropy::seeded(seed))
            .generate()
            .expect("keypair")
    }

    struct FailingEngine;

    impl SignerEngine for FailingEngine {
        fn family(&self) -> AlgorithmFamily {
            AlgorithmFamily::Falcon
        }

        fn prepare_sign(&mut self, _: &PrivateKey, _: Option<SharedEntropy>) -> ProviderResult<()> {
            Ok(())
        }

        fn prepare_verify(&mut self, _: &PublicKey) -> ProviderResult<()> {
            Ok(())
        }

        fn sign(&mut self, _: &[u8]) -> ProviderResult<Vec<u8>> {
            Err(ProviderError::InvalidInput("engine refused"))
        }

        fn verify(&self, _: &[u8], _: &[u8]) -> ProviderResult<bool> {
            Err(ProviderError::NotInitialized("engine"))
        }
    }

    #[test]
    fn lock_from_another_family_accepts_no_key() {
        let mut session = SignatureSession::with_engine(
            signer_engine(AlgorithmFamily::Dilithium),
            Some(ParameterSet::FALCON_512),
        );
        let dilithium = pair(ParameterSet::DILITHIUM2, 40);
        let falcon = pair(ParameterSet::FALCON_512, 41);

        assert!(matches!(
            session.init_sign(&dilithium.private, None),
            Err(ProviderError::AlgorithmMismatch { expected: "falcon-512", .. })
        ));
        assert!(matches!(
            session.init_verify(&falcon.public),
            Err(ProviderError::InvalidKey(_))
        ));
        assert_eq!(session.mode(), SessionMode::Unset);
    }

    #[test]
    fn starts_unset_and_buffers_before_init() {
        let mut session = SignatureSession::new(AlgorithmFamily::Dilithium);
        assert_eq!(session.mode(), SessionMode::Unset);
        session.update(1);
        session.update_slice(&[2, 3]);
        assert_eq!(session.buffered_len(), 3);
        assert_eq!(session.sign().unwrap_err(), ProviderError::NotInitialized("signing"));
        assert_eq!(session.buffered_len(), 0);
    }

    #[test]
    fn init_clears_stale_buffer() {
        let keys = pair(ParameterSet::DILITHIUM2, 1);
        let mut session = SignatureSession::new(AlgorithmFamily::Dilithium);
        session.update_slice(b"stale");
        session.init_sign(&keys.private, None).expect("init");
        assert_eq!(session.buffered_len(), 0);
        assert_eq!(session.mode(), SessionMode::Signing);
    }

    #[test]
    fn update_range_checks_bounds() {
        let mut session = SignatureSession::new(AlgorithmFamily::Falcon);
        session.update_range(b"abcdef", 2, 3).expect("in range");
        assert_eq!(session.buffered_len(), 3);
        for (offset, len) in [(4, 3), (7, 0), (usize::MAX, 2)] {
            assert_eq!(
                session.update_range(b"abcdef", offset, len).unwrap_err(),
                ProviderError::InvalidInput("update range out of bounds")
            );
        }
        assert_eq!(session.buffered_len(), 3);
    }

    #[test]
    fn wrong_mode_terminal_calls_fail_and_clear() {
        let keys = pair(ParameterSet::FALCON_512, 3);
        let mut session = SignatureSession::new(AlgorithmFamily::Falcon);
        session.init_verify(&keys.public).expect("init");
        session.update_slice(b"message");
        assert_eq!(session.sign().unwrap_err(), ProviderError::NotInitialized("signing"));
        assert_eq!(session.buffered_len(), 0);
        assert_eq!(session.mode(), SessionMode::Verifying);
    }

    #[test]
    fn foreign_family_key_is_invalid() {
        let keys = pair(ParameterSet::FALCON_1024, 4);
        let mut session = SignatureSession::new(AlgorithmFamily::Dilithium);
        session.update_slice(b"kept");
        assert_eq!(
            session.init_verify(&keys.public).unwrap_err(),
            ProviderError::InvalidKey("unknown public key passed to Dilithium signature".into())
        );
        assert_eq!(session.mode(), SessionMode::Unset);
        assert_eq!(session.buffered_len(), 4);
    }

    #[test]
    fn locked_session_requires_matching_set() {
        let keys = pair(ParameterSet::DILITHIUM5, 5);
        let mut session = SignatureSession::locked(ParameterSet::DILITHIUM3);
        assert_eq!(
            session.init_sign(&keys.private, None).unwrap_err(),
            ProviderError::AlgorithmMismatch {
                expected: "dilithium3",
                found: "dilithium5",
            }
        );
        assert_eq!(session.algorithm(), "dilithium3");
    }

    #[test]
    fn engine_errors_are_wrapped_as_signature_failures() {
        let keys = pair(ParameterSet::FALCON_512, 6);
        let mut session = SignatureSession::with_engine(Box::new(FailingEngine), None);
        session.init_sign(&keys.private, None).expect("init");
        session.update_slice(b"doomed");
        assert_eq!(
            session.sign().unwrap_err(),
            ProviderError::SignatureFailure("invalid input: engine refused".into())
        );
        assert_eq!(session.buffered_len(), 0);

        session.init_verify(&keys.public).expect("init");
        assert!(matches!(
            session.verify(&[0u8; 8]),
            Err(ProviderError::SignatureFailure(_))
        ));
    }

    #[test]
    fn parameter_tuning_is_unsupported() {
        let mut session = SignatureSession::new(AlgorithmFamily::Falcon);
        assert_eq!(
            session.set_parameter(&ParameterSet::FALCON_512.into()),
            Err(ProviderError::Unsupported("set_parameter"))
        );
        assert_eq!(
            session.set_parameter_by_name("salt", "x"),
            Err(ProviderError::Unsupported("set_parameter_by_name"))
        );
        assert_eq!(
            session.get_parameter("salt"),
            Err(ProviderError::Unsupported("get_parameter"))
        );
    }
}
