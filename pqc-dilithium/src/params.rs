/// Dilithium (round 3) parameter sets, including the AES-expanded variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DilithiumParameters {
    Dilithium2,
    Dilithium3,
    Dilithium5,
    Dilithium2Aes,
    Dilithium3Aes,
    Dilithium5Aes,
}

impl DilithiumParameters {
    /// Every parameter set in registration order.
    pub const ALL: [DilithiumParameters; 6] = [
        DilithiumParameters::Dilithium2,
        DilithiumParameters::Dilithium3,
        DilithiumParameters::Dilithium5,
        DilithiumParameters::Dilithium2Aes,
        DilithiumParameters::Dilithium3Aes,
        DilithiumParameters::Dilithium5Aes,
    ];

    /// Canonical lower-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dilithium2 => "dilithium2",
            Self::Dilithium3 => "dilithium3",
            Self::Dilithium5 => "dilithium5",
            Self::Dilithium2Aes => "dilithium2-aes",
            Self::Dilithium3Aes => "dilithium3-aes",
            Self::Dilithium5Aes => "dilithium5-aes",
        }
    }

    /// NIST security category.
    pub const fn security_category(self) -> u8 {
        match self {
            Self::Dilithium2 | Self::Dilithium2Aes => 2,
            Self::Dilithium3 | Self::Dilithium3Aes => 3,
            Self::Dilithium5 | Self::Dilithium5Aes => 5,
        }
    }

    /// Whether the matrix expansion uses AES-256-CTR instead of SHAKE.
    pub const fn uses_aes(self) -> bool {
        matches!(
            self,
            Self::Dilithium2Aes | Self::Dilithium3Aes | Self::Dilithium5Aes
        )
    }

    pub const fn public_key_len(self) -> usize {
        match self.security_category() {
            2 => 1312,
            3 => 1952,
            _ => 2592,
        }
    }

    pub const fn private_key_len(self) -> usize {
        match self.security_category() {
            2 => 2528,
            3 => 4000,
            _ => 4864,
        }
    }

    pub const fn signature_len(self) -> usize {
        match self.security_category() {
            2 => 2420,
            3 => 3293,
            _ => 4595,
        }
    }
}

impl core::fmt::Display for DilithiumParameters {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_and_lower_case() {
        for (i, a) in DilithiumParameters::ALL.iter().enumerate() {
            assert_eq!(a.name(), a.name().to_ascii_lowercase());
            for b in &DilithiumParameters::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[test]
    fn aes_variants_share_sizes_with_shake_variants() {
        let pairs = [
            (DilithiumParameters::Dilithium2, DilithiumParameters::Dilithium2Aes),
            (DilithiumParameters::Dilithium3, DilithiumParameters::Dilithium3Aes),
            (DilithiumParameters::Dilithium5, DilithiumParameters::Dilithium5Aes),
        ];
        for (shake, aes) in pairs {
            assert!(!shake.uses_aes());
            assert!(aes.uses_aes());
            assert_eq!(shake.public_key_len(), aes.public_key_len());
            assert_eq!(shake.private_key_len(), aes.private_key_len());
            assert_eq!(shake.signature_len(), aes.signature_len());
        }
    }
}
