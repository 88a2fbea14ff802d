use pqc_dilithium::DilithiumError;
use pqc_falcon::FalconError;
use thiserror::Error;

/// Errors surfaced by the key-pair and signature adapters.
///
/// A signature that simply does not verify is not an error: `verify` reports
/// it as `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Unresolvable or malformed parameter-set selector.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// A lock parameter set conflicts with the requested or keyed one.
    #[error("configured for {expected}, got {found}")]
    AlgorithmMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// Key of the wrong family presented to a session.
    #[error("invalid key: {0}")]
    InvalidKey(String),
    /// Terminal operation without a matching init.
    #[error("not initialised for {0}")]
    NotInitialized(&'static str),
    /// Engine failure while signing or verifying.
    #[error("signature failure: {0}")]
    SignatureFailure(String),
    /// Runtime parameter tuning is not offered.
    #[error("{0} unsupported")]
    Unsupported(&'static str),
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

/// Alias for fallible provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

// Once an adapter has validated mode and key family, engine errors come from
// malformed signatures or a refusing random source.
impl From<DilithiumError> for ProviderError {
    fn from(value: DilithiumError) -> Self {
        ProviderError::SignatureFailure(format!("dilithium engine: {value}"))
    }
}

impl From<FalconError> for ProviderError {
    fn from(value: FalconError) -> Self {
        ProviderError::SignatureFailure(format!("falcon engine: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_become_signature_failures() {
        let err = ProviderError::from(DilithiumError::InvalidInput("dilithium signature length invalid"));
        assert_eq!(
            err,
            ProviderError::SignatureFailure(
                "dilithium engine: invalid input: dilithium signature length invalid".into()
            )
        );
        assert!(matches!(
            ProviderError::from(FalconError::NotInitialized("x")),
            ProviderError::SignatureFailure(_)
        ));
    }

    #[test]
    fn mismatch_display_names_both_sets() {
        let err = ProviderError::AlgorithmMismatch {
            expected: "dilithium3",
            found: "dilithium2",
        };
        assert_eq!(err.to_string(), "configured for dilithium3, got dilithium2");
    }
}
