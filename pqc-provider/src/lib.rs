//! Provider adapters for the Dilithium and Falcon signature engines.
//!
//! [`Provider`] hands out [`KeyPairGenerator`]s and [`SignatureSession`]s by
//! name. Adapters resolve parameter sets through a shared
//! [`AlgorithmDirectory`], refuse keys of another family, and buffer message
//! bytes until one terminal `sign`/`verify` call.
//!
//! # Quickstart
//! ```
//! use pqc_entropy::SharedEntropy;
//! use pqc_provider::{ParameterSelector, Provider};
//!
//! let provider = Provider::standard();
//! let mut generator = provider.key_pair_generator("Dilithium").unwrap();
//! generator
//!     .initialize(&ParameterSelector::named("dilithium2"), SharedEntropy::host())
//!     .unwrap();
//! let keys = generator.generate_key_pair().unwrap();
//!
//! let mut signer = provider.signature("dilithium2").unwrap();
//! signer.init_sign(&keys.private, None).unwrap();
//! signer.update_slice(b"doc-test");
//! let signature = signer.sign().unwrap();
//!
//! signer.init_verify(&keys.public).unwrap();
//! signer.update_slice(b"doc-test");
//! assert!(signer.verify(&signature).unwrap());
//! ```

pub mod adapters;
pub mod config;
pub mod directory;
pub mod engine;
pub mod error;
pub mod keypair;
pub mod keys;
pub mod logging;
pub mod params;
pub mod provider;
pub mod signature;

pub use config::{load_config, parse_config, ConfigError, ProviderConfig};
pub use directory::AlgorithmDirectory;
pub use engine::{KeyPairEngine, SignerEngine};
pub use error::{ProviderError, ProviderResult};
pub use keypair::KeyPairGenerator;
pub use keys::{KeyPair, PrivateKey, PublicKey};
pub use logging::LogFormat;
pub use params::{AlgorithmFamily, ParameterSelector, ParameterSet};
pub use provider::Provider;
pub use signature::{SessionMode, SignatureSession};
