//! Fixed-shape TLS 1.2 ServerHello

use super::codec::encode_u24;
use super::constants::*;
use crate::crypto::SecureRandom;
use crate::error::{Result, TlsError};

/// Offset of the server random inside the ServerHello message
pub const SERVER_HELLO_RANDOM_POS: usize = HANDSHAKE_HEADER_LEN + 2;
/// Offset of the 32-byte session id inside the ServerHello message
pub const SERVER_HELLO_SESSION_ID_POS: usize = SERVER_HELLO_RANDOM_POS + TLS_RANDOM_LEN + 1;

// ============= ServerHello Builder =============

/// Builder for TLS ServerHello with correct structure
struct ServerHelloBuilder {
    /// Random bytes (32 bytes)
    random: [u8; TLS_RANDOM_LEN],
    /// Session ID (echoed from ClientHello, zero padded)
    session_id: [u8; MAX_SESSION_ID_LEN],
    /// Cipher suite
    cipher_suite: [u8; 2],
    /// Compression method
    compression: u8,
    /// Extensions, without the length prefix
    extensions: Vec<u8>,
}

impl ServerHelloBuilder {
    fn new(session_id: [u8; MAX_SESSION_ID_LEN], random: [u8; TLS_RANDOM_LEN]) -> Self {
        Self {
            random,
            session_id,
            cipher_suite: CIPHER_ECDHE_RSA_AES_256_GCM_SHA384,
            compression: COMPRESSION_NULL,
            extensions: RENEGOTIATION_INFO_EMPTY.to_vec(),
        }
    }

    /// Build ServerHello message (without record header)
    fn build_message(&self) -> Vec<u8> {
        let body_len = 2 + // version
                       TLS_RANDOM_LEN + // random
                       1 + self.session_id.len() + // session_id length + data
                       2 + // cipher suite
                       1 + // compression
                       2 + self.extensions.len(); // extensions length + data

        let mut message = Vec::with_capacity(HANDSHAKE_HEADER_LEN + body_len);

        // Handshake header
        message.push(HANDSHAKE_SERVER_HELLO);
        message.extend_from_slice(&encode_u24(body_len));

        message.extend_from_slice(&TLS_VERSION);
        message.extend_from_slice(&self.random);

        message.push(self.session_id.len() as u8);
        message.extend_from_slice(&self.session_id);

        message.extend_from_slice(&self.cipher_suite);
        message.push(self.compression);

        message.extend_from_slice(&(self.extensions.len() as u16).to_be_bytes());
        message.extend_from_slice(&self.extensions);

        message
    }
}

/// Compose the 81-byte ServerHello handshake message.
///
/// The client's session id is copied to the front of the 32-byte session id
/// field and the remainder is zero. The server random is fresh for every
/// call.
pub fn compose_server_hello(session_id: &[u8], rng: &SecureRandom) -> Result<Vec<u8>> {
    if session_id.len() > MAX_SESSION_ID_LEN {
        return Err(TlsError::InvalidSessionId {
            len: session_id.len(),
        });
    }

    let mut echoed = [0u8; MAX_SESSION_ID_LEN];
    echoed[..session_id.len()].copy_from_slice(session_id);

    let message = ServerHelloBuilder::new(echoed, rng.array()).build_message();
    debug_assert_eq!(message.len(), SERVER_HELLO_LEN);
    Ok(message)
}
