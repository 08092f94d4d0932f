//! Cryptographically secure randomness for handshake camouflage

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use parking_lot::Mutex;

/// Cryptographically secure PRNG, safe to share between connections.
///
/// Wraps an OS-seeded [`StdRng`] (ChaCha12) behind a mutex, so one instance
/// can sit in an `Arc` and serve every connection task. Creating a fresh
/// instance per call is also fine; seeding is cheap.
pub struct SecureRandom {
    inner: Mutex<StdRng>,
}

impl SecureRandom {
    pub fn new() -> Self {
        let mut seed_source = rand::rng();
        let rng = StdRng::from_rng(&mut seed_source);

        Self {
            inner: Mutex::new(rng),
        }
    }

    /// Fill a caller-provided buffer with random bytes.
    pub fn fill(&self, out: &mut [u8]) {
        self.inner.lock().fill_bytes(out);
    }

    /// Generate random bytes
    pub fn bytes(&self, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        self.fill(&mut out);
        out
    }

    /// Generate a fixed-size random array
    pub fn array<const N: usize>(&self) -> [u8; N] {
        let mut out = [0u8; N];
        self.fill(&mut out);
        out
    }
}

impl Default for SecureRandom {
    fn default() -> Self {
        Self::new()
    }
}
