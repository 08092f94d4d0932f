//! TLS wire constants

// ============= Record Layer =============

/// Record header: type (1) + version (2) + length (2)
pub const TLS_RECORD_HEADER_LEN: usize = 5;
/// TLS 1.2 version bytes, used in every record we emit
pub const TLS_VERSION: [u8; 2] = [0x03, 0x03];
/// TLS record type: Change Cipher Spec
pub const TLS_RECORD_CHANGE_CIPHER: u8 = 0x14;
/// TLS record type: Handshake
pub const TLS_RECORD_HANDSHAKE: u8 = 0x16;
/// TLS record type: Application Data
pub const TLS_RECORD_APPLICATION: u8 = 0x17;
/// Largest payload expressible in the 2-byte record length field
pub const MAX_RECORD_PAYLOAD: usize = u16::MAX as usize;

// ============= Handshake Layer =============

/// Handshake header: type (1) + length (3)
pub const HANDSHAKE_HEADER_LEN: usize = 4;
/// Handshake message type: ClientHello
pub const HANDSHAKE_CLIENT_HELLO: u8 = 0x01;
/// Handshake message type: ServerHello
pub const HANDSHAKE_SERVER_HELLO: u8 = 0x02;
/// Client/server random length
pub const TLS_RANDOM_LEN: usize = 32;
/// Longest session id allowed by TLS 1.2
pub const MAX_SESSION_ID_LEN: usize = 32;

// ============= Fake Server Flight =============

/// TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384
pub const CIPHER_ECDHE_RSA_AES_256_GCM_SHA384: [u8; 2] = [0xc0, 0x30];
/// Null compression
pub const COMPRESSION_NULL: u8 = 0x00;
/// renegotiation_info extension with an empty renegotiated_connection
pub const RENEGOTIATION_INFO_EMPTY: [u8; 5] = [0xff, 0x01, 0x00, 0x01, 0x00];
/// ChangeCipherSpec payload
pub const CHANGE_CIPHER_SPEC_PAYLOAD: [u8; 1] = [0x01];
/// Length of the pseudo-Finished record payload
pub const FAKE_FINISHED_LEN: usize = 40;

/// ServerHello body length after the handshake header:
/// version + random + sid len + sid + cipher + compression + ext len + ext
pub const SERVER_HELLO_BODY_LEN: usize =
    2 + TLS_RANDOM_LEN + 1 + MAX_SESSION_ID_LEN + 2 + 1 + 2 + RENEGOTIATION_INFO_EMPTY.len();
/// Full ServerHello handshake message length (81)
pub const SERVER_HELLO_LEN: usize = HANDSHAKE_HEADER_LEN + SERVER_HELLO_BODY_LEN;
/// Total length of the fake server flight (137)
pub const FAKE_HANDSHAKE_LEN: usize = (TLS_RECORD_HEADER_LEN + SERVER_HELLO_LEN)
    + (TLS_RECORD_HEADER_LEN + CHANGE_CIPHER_SPEC_PAYLOAD.len())
    + (TLS_RECORD_HEADER_LEN + FAKE_FINISHED_LEN);

// ============= Extension Types =============

/// TLS Extension types
pub mod extension_type {
    pub const SERVER_NAME: u16 = 0x0000;
    pub const ALPN: u16 = 0x0010;
    pub const SUPPORTED_VERSIONS: u16 = 0x002b;
    pub const RENEGOTIATION_INFO: u16 = 0xff01;
}

/// GREASE values have the form 0x?A?A with both bytes equal.
pub fn is_grease(value: u16) -> bool {
    let [hi, lo] = value.to_be_bytes();
    hi == lo && hi & 0x0f == 0x0a
}
