//! TLS 1.2 ClientHello decoding
//!
//! The decoder walks the handshake body with a single [`Reader`] cursor.
//! Every length prefix is checked against the remaining input before the
//! field is sliced, so a hostile peer gets a typed error, never a panic.

use tracing::{debug, trace};

use super::codec::Reader;
use super::constants::*;
use super::extensions::{Extensions, decode_extensions};
use super::record::{RecordCheck, strip_record_layer};
use crate::error::{Result, TlsError};

/// Every field of a ClientHello handshake message.
///
/// All fields are copied out of the input, so the value outlives the
/// buffer it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientHello {
    /// Always `0x01`
    pub handshake_type: u8,
    /// 24-bit length from the handshake header
    pub length: usize,
    pub client_version: [u8; 2],
    pub random: [u8; TLS_RANDOM_LEN],
    /// Session id as sent; TLS caps it at 32 bytes but the 1-byte prefix
    /// allows up to 255, and the decoder does not enforce the cap.
    pub session_id: Vec<u8>,
    /// Raw cipher suite list, two bytes per suite
    pub cipher_suites: Vec<u8>,
    pub compression_methods: Vec<u8>,
    pub extensions: Extensions,
}

fn malformed(reason: &'static str) -> TlsError {
    debug!(reason, "Rejecting ClientHello");
    TlsError::MalformedClientHello { reason }
}

impl ClientHello {
    /// Decode a ClientHello handshake message (record header already removed).
    pub fn decode(handshake: &[u8]) -> Result<Self> {
        let mut r = Reader::new(handshake);

        // Handshake Type
        let handshake_type = r.u8().ok_or_else(|| malformed("empty handshake"))?;
        if handshake_type != HANDSHAKE_CLIENT_HELLO {
            debug!(handshake_type, "Handshake is not a ClientHello");
            return Err(TlsError::NotAClientHello { handshake_type });
        }

        // Length
        let length = r.u24().ok_or_else(|| malformed("truncated handshake length"))?;
        if length != r.remaining() {
            debug!(declared = length, actual = r.remaining(), "ClientHello length mismatch");
            return Err(TlsError::LengthMismatch {
                declared: length,
                actual: r.remaining(),
            });
        }

        // Client Version
        let client_version = r
            .take_array::<2>()
            .ok_or_else(|| malformed("truncated client version"))?;

        // Random
        let random = r
            .take_array::<TLS_RANDOM_LEN>()
            .ok_or_else(|| malformed("truncated random"))?;

        // Session ID
        let session_id = r
            .vec8()
            .ok_or_else(|| malformed("truncated session id"))?
            .to_vec();

        // Cipher Suites
        let cipher_suites = r
            .vec16()
            .ok_or_else(|| malformed("truncated cipher suites"))?;
        if cipher_suites.len() % 2 != 0 {
            return Err(malformed("odd-length cipher suite list"));
        }
        let cipher_suites = cipher_suites.to_vec();

        // Compression Methods
        let compression_methods = r
            .vec8()
            .ok_or_else(|| malformed("truncated compression methods"))?
            .to_vec();

        // Extensions
        let extensions_len = r
            .u16()
            .ok_or_else(|| malformed("truncated extensions length"))? as usize;
        let extension_data = r.rest();
        let extensions = decode_extensions(extension_data, extensions_len)?;
        if extension_data.len() != extensions_len {
            let reason = format!(
                "{} trailing bytes after {}-byte extension block",
                extension_data.len() - extensions_len,
                extensions_len
            );
            debug!(reason = %reason, "Rejecting ClientHello");
            return Err(TlsError::MalformedExtensions { reason });
        }

        let hello = Self {
            handshake_type,
            length,
            client_version,
            random,
            session_id,
            cipher_suites,
            compression_methods,
            extensions,
        };

        trace!(
            version = ?hello.client_version,
            session_id_len = hello.session_id.len(),
            cipher_suites = hello.cipher_suites.len() / 2,
            extensions = hello.extensions.len(),
            "Decoded ClientHello"
        );

        Ok(hello)
    }

    /// Strip the record header, then decode the ClientHello behind it.
    pub fn from_record(record: &[u8], check: RecordCheck) -> Result<Self> {
        let handshake = strip_record_layer(record, check)?;
        Self::decode(handshake)
    }

    /// Cipher suites as 16-bit identifiers, in offered order.
    pub fn cipher_suite_ids(&self) -> Vec<u16> {
        self.cipher_suites
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect()
    }

    /// SNI host name, if the client sent one.
    pub fn server_name(&self) -> Option<String> {
        self.extensions.server_name()
    }

    /// ALPN protocols, in offered order.
    pub fn alpn_protocols(&self) -> Vec<Vec<u8>> {
        self.extensions.alpn_protocols()
    }

    /// Versions from supported_versions.
    pub fn supported_versions(&self) -> Vec<u16> {
        self.extensions.supported_versions()
    }

    /// Whether any cipher suite or extension type is a GREASE value.
    pub fn has_grease(&self) -> bool {
        self.cipher_suite_ids().into_iter().any(is_grease)
            || self.extensions.types().any(is_grease)
    }
}
