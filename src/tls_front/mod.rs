//! Fake server handshake flight

pub mod emulator;

pub use emulator::{build_fake_handshake, build_fake_handshake_for_session};
