//! Crypto

pub mod random;

pub use random::SecureRandom;
