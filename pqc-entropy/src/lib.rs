#![cfg_attr(not(feature = "std"), no_std)]

//! Random-bit sources injected into key generation and randomized signing.
//!
//! Engines never own their randomness: callers hand them a [`SharedEntropy`]
//! handle over the OS generator ([`OsEntropy`]) or, for reproducible tests,
//! a [`SeededEntropy`] stream.

extern crate alloc;

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;
use spin::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyError {
    /// The platform generator refused the request.
    Unavailable(&'static str),
}

impl fmt::Display for EntropyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntropyError::Unavailable(msg) => write!(f, "entropy unavailable: {msg}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EntropyError {}

/// Anything that can fill a buffer with random bits.
pub trait EntropySource {
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), EntropyError>;

    /// Infallible fill for callers with no error path; panics if the backend
    /// refuses.
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(err) = self.try_fill_bytes(dest) {
            panic!("{err}");
        }
    }
}

/// Operating-system generator.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

#[cfg(feature = "std")]
impl EntropySource for OsEntropy {
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        match dest {
            [] => Ok(()),
            dest => getrandom::getrandom(dest)
                .map_err(|_| EntropyError::Unavailable("getrandom failed")),
        }
    }
}

#[cfg(feature = "sim")]
const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Reproducible splitmix64 stream keyed by a `u64` seed. Not for production
/// keys.
#[cfg(feature = "sim")]
#[derive(Clone, Debug)]
pub struct SeededEntropy {
    counter: u64,
}

#[cfg(feature = "sim")]
impl SeededEntropy {
    pub fn new(seed: u64) -> Self {
        Self { counter: seed }
    }

    fn next_word(&mut self) -> [u8; 8] {
        self.counter = self.counter.wrapping_add(GOLDEN_GAMMA);
        let mut word = self.counter;
        word = (word ^ (word >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        word = (word ^ (word >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        (word ^ (word >> 31)).to_le_bytes()
    }
}

#[cfg(feature = "sim")]
impl EntropySource for SeededEntropy {
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        for chunk in dest.chunks_mut(8) {
            let word = self.next_word();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
        Ok(())
    }
}

/// Cloneable handle to one entropy source.
///
/// Clones draw from the same underlying stream, so a generator and a signer
/// handed the same handle advance one sequence between them.
#[derive(Clone)]
pub struct SharedEntropy {
    inner: Arc<Mutex<Box<dyn EntropySource + Send>>>,
}

impl SharedEntropy {
    pub fn new<S>(source: S) -> Self
    where
        S: EntropySource + Send + 'static,
    {
        Self {
            inner: Arc::new(Mutex::new(Box::new(source))),
        }
    }

    /// Handle over the OS generator.
    #[cfg(feature = "std")]
    pub fn host() -> Self {
        Self::new(OsEntropy)
    }

    /// Handle over a reproducible stream.
    #[cfg(feature = "sim")]
    pub fn seeded(seed: u64) -> Self {
        Self::new(SeededEntropy::new(seed))
    }

    /// Whether both handles point at the same underlying source.
    pub fn same_source(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl EntropySource for SharedEntropy {
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        self.inner.lock().try_fill_bytes(dest)
    }
}

impl fmt::Debug for SharedEntropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedEntropy")
            .field("handles", &Arc::strong_count(&self.inner))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Refusing;

    impl EntropySource for Refusing {
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), EntropyError> {
            Err(EntropyError::Unavailable("test backend"))
        }
    }

    #[test]
    fn refusal_propagates_through_handle() {
        let mut handle = SharedEntropy::new(Refusing);
        assert_eq!(
            handle.try_fill_bytes(&mut [0u8; 4]),
            Err(EntropyError::Unavailable("test backend"))
        );
    }

    #[test]
    #[should_panic]
    fn fill_bytes_panics_on_refusal() {
        Refusing.fill_bytes(&mut [0u8; 4]);
    }

    #[cfg(feature = "std")]
    #[test]
    fn os_entropy_fills_and_tolerates_empty_buffers() {
        let mut os = OsEntropy;
        let mut buf = [0u8; 32];
        os.try_fill_bytes(&mut buf).unwrap();
        assert_ne!(buf, [0u8; 32]);
        assert!(os.try_fill_bytes(&mut []).is_ok());
        assert_eq!(
            EntropyError::Unavailable("x").to_string(),
            "entropy unavailable: x"
        );
    }

    #[cfg(feature = "sim")]
    #[test]
    fn seeded_streams_replay_and_diverge() {
        let mut a = [0u8; 19];
        let mut b = [0u8; 19];
        let mut c = [0u8; 19];
        SeededEntropy::new(3).fill_bytes(&mut a);
        SeededEntropy::new(3).fill_bytes(&mut b);
        SeededEntropy::new(4).fill_bytes(&mut c);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[cfg(feature = "sim")]
    #[test]
    fn shared_clones_advance_one_stream() {
        let mut a = SharedEntropy::seeded(5);
        let mut b = a.clone();
        assert!(a.same_source(&b));

        let mut first = [0u8; 8];
        let mut second = [0u8; 8];
        a.fill_bytes(&mut first);
        b.fill_bytes(&mut second);

        let mut expected = [0u8; 16];
        SeededEntropy::new(5).fill_bytes(&mut expected);
        assert_eq!(&expected[..8], &first);
        assert_eq!(&expected[8..], &second);
    }

    #[cfg(feature = "sim")]
    #[test]
    fn independent_handles_are_not_the_same_source() {
        assert!(!SharedEntropy::seeded(1).same_source(&SharedEntropy::seeded(1)));
    }
}
