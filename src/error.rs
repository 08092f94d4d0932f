//! Error Types

use thiserror::Error;

// ============= Main Errors =============

#[derive(Error, Debug)]
pub enum TlsError {
    // ============= Record Layer Errors =============

    #[error("TLS record truncated: {len} bytes, header needs 5")]
    TruncatedRecord { len: usize },

    #[error("TLS record length mismatch: header declares {declared}, got {actual}")]
    RecordLengthMismatch { declared: usize, actual: usize },

    // ============= ClientHello Errors =============

    #[error("Not a ClientHello: handshake type 0x{handshake_type:02x}")]
    NotAClientHello { handshake_type: u8 },

    #[error("ClientHello length mismatch: declared {declared}, actual {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("Malformed ClientHello: {reason}")]
    MalformedClientHello { reason: &'static str },

    #[error("Malformed extensions: {reason}")]
    MalformedExtensions { reason: String },

    // ============= Composer Errors =============

    #[error("Invalid session id: {len} bytes (max 32)")]
    InvalidSessionId { len: usize },

    #[error("TLS record too large: {len} bytes (max 65535)")]
    RecordTooLarge { len: usize },

    // ============= Config / Input Errors =============

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TlsError {
    /// Peer sent a well-formed handshake message of another type.
    pub fn is_wrong_message(&self) -> bool {
        matches!(self, Self::NotAClientHello { .. })
    }

    /// Record-layer framing was invalid.
    pub fn is_framing(&self) -> bool {
        matches!(
            self,
            Self::TruncatedRecord { .. } | Self::RecordLengthMismatch { .. }
        )
    }

    /// Inbound bytes were structurally broken (framing or ClientHello body).
    pub fn is_malformed(&self) -> bool {
        self.is_framing()
            || matches!(
                self,
                Self::LengthMismatch { .. }
                    | Self::MalformedClientHello { .. }
                    | Self::MalformedExtensions { .. }
            )
    }
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, TlsError>;
