//! Parameter-set descriptors and selectors.

use std::fmt;

use pqc_dilithium::DilithiumParameters;
use pqc_falcon::FalconParameters;

/// Algorithm family a parameter set, key, or adapter belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlgorithmFamily {
    Dilithium,
    Falcon,
}

impl AlgorithmFamily {
    pub const ALL: [AlgorithmFamily; 2] = [AlgorithmFamily::Dilithium, AlgorithmFamily::Falcon];

    pub const fn name(self) -> &'static str {
        match self {
            AlgorithmFamily::Dilithium => "Dilithium",
            AlgorithmFamily::Falcon => "Falcon",
        }
    }

    /// Case-insensitive family lookup ("dilithium", "FALCON", ...).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|family| family.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for AlgorithmFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable descriptor of one algorithm configuration.
///
/// Names are unique across families, so equality is equality by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParameterSet {
    Dilithium(DilithiumParameters),
    Falcon(FalconParameters),
}

impl ParameterSet {
    pub const DILITHIUM2: ParameterSet = ParameterSet::Dilithium(DilithiumParameters::Dilithium2);
    pub const DILITHIUM3: ParameterSet = ParameterSet::Dilithium(DilithiumParameters::Dilithium3);
    pub const DILITHIUM5: ParameterSet = ParameterSet::Dilithium(DilithiumParameters::Dilithium5);
    pub const DILITHIUM2_AES: ParameterSet =
        ParameterSet::Dilithium(DilithiumParameters::Dilithium2Aes);
    pub const DILITHIUM3_AES: ParameterSet =
        ParameterSet::Dilithium(DilithiumParameters::Dilithium3Aes);
    pub const DILITHIUM5_AES: ParameterSet =
        ParameterSet::Dilithium(DilithiumParameters::Dilithium5Aes);
    pub const FALCON_512: ParameterSet = ParameterSet::Falcon(FalconParameters::Falcon512);
    pub const FALCON_1024: ParameterSet = ParameterSet::Falcon(FalconParameters::Falcon1024);

    /// The fixed registration table.
    pub const ALL: [ParameterSet; 8] = [
        ParameterSet::DILITHIUM2,
        ParameterSet::DILITHIUM3,
        ParameterSet::DILITHIUM5,
        ParameterSet::DILITHIUM2_AES,
        ParameterSet::DILITHIUM3_AES,
        ParameterSet::DILITHIUM5_AES,
        ParameterSet::FALCON_512,
        ParameterSet::FALCON_1024,
    ];

    /// Canonical lower-case name, e.g. `dilithium3` or `falcon-512`.
    pub const fn name(self) -> &'static str {
        match self {
            ParameterSet::Dilithium(p) => p.name(),
            ParameterSet::Falcon(p) => p.name(),
        }
    }

    pub const fn family(self) -> AlgorithmFamily {
        match self {
            ParameterSet::Dilithium(_) => AlgorithmFamily::Dilithium,
            ParameterSet::Falcon(_) => AlgorithmFamily::Falcon,
        }
    }

    pub const fn security_category(self) -> u8 {
        match self {
            ParameterSet::Dilithium(p) => p.security_category(),
            ParameterSet::Falcon(p) => p.security_category(),
        }
    }

    pub const fn public_key_len(self) -> usize {
        match self {
            ParameterSet::Dilithium(p) => p.public_key_len(),
            ParameterSet::Falcon(p) => p.public_key_len(),
        }
    }

    pub const fn private_key_len(self) -> usize {
        match self {
            ParameterSet::Dilithium(p) => p.private_key_len(),
            ParameterSet::Falcon(p) => p.private_key_len(),
        }
    }

    pub const fn signature_len(self) -> usize {
        match self {
            ParameterSet::Dilithium(p) => p.signature_len(),
            ParameterSet::Falcon(p) => p.signature_len(),
        }
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a caller hands to `KeyPairGenerator::initialize`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParameterSelector {
    /// Typed reference to a descriptor; its name is used as-is.
    Spec(ParameterSet),
    /// Generic named parameter; the name is lower-cased before lookup.
    Named(String),
}

impl ParameterSelector {
    pub fn named(name: impl Into<String>) -> Self {
        ParameterSelector::Named(name.into())
    }

    /// Name used for the directory lookup.
    pub fn lookup_name(&self) -> String {
        match self {
            ParameterSelector::Spec(set) => set.name().to_owned(),
            ParameterSelector::Named(name) => name.to_ascii_lowercase(),
        }
    }
}

impl From<ParameterSet> for ParameterSelector {
    fn from(value: ParameterSet) -> Self {
        ParameterSelector::Spec(value)
    }
}

impl fmt::Display for ParameterSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterSelector::Spec(set) => write!(f, "{set}"),
            ParameterSelector::Named(name) => write!(f, "named({name})"),
        }
    }
}
