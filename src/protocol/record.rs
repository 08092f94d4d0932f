//! TLS record layer framing

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::codec::decode_uint;
use super::constants::*;
use crate::error::{Result, TlsError};

/// How much of the inbound record header to trust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordCheck {
    /// Header length must match the bytes that follow it.
    #[default]
    Strict,
    /// Only require a complete 5-byte header.
    Permissive,
}

/// Parsed 5-byte record header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub content_type: u8,
    pub version: [u8; 2],
    pub length: u16,
}

/// Parse TLS record header
pub fn parse_record_header(header: &[u8; TLS_RECORD_HEADER_LEN]) -> RecordHeader {
    RecordHeader {
        content_type: header[0],
        version: [header[1], header[2]],
        length: u16::from_be_bytes([header[3], header[4]]),
    }
}

/// Check if bytes look like the start of a TLS handshake record
///
/// Accepts any 3.x record version; clients put 0x0301 here for
/// compatibility and 0x0303 is also common.
pub fn is_tls_handshake(first_bytes: &[u8]) -> bool {
    if first_bytes.len() < 3 {
        return false;
    }

    first_bytes[0] == TLS_RECORD_HANDSHAKE
        && first_bytes[1] == 0x03
        && first_bytes[2] <= 0x04
}

/// Remove the record header and return the handshake bytes behind it.
///
/// Record type and version are not inspected.
pub fn strip_record_layer(record: &[u8], check: RecordCheck) -> Result<&[u8]> {
    if record.len() < TLS_RECORD_HEADER_LEN {
        debug!(len = record.len(), "TLS record shorter than its header");
        return Err(TlsError::TruncatedRecord { len: record.len() });
    }

    let (header, payload) = record.split_at(TLS_RECORD_HEADER_LEN);

    if check == RecordCheck::Strict {
        let declared = decode_uint(&header[3..5]);
        if declared != payload.len() {
            debug!(
                declared,
                actual = payload.len(),
                "TLS record length does not match payload"
            );
            return Err(TlsError::RecordLengthMismatch {
                declared,
                actual: payload.len(),
            });
        }
    }

    Ok(payload)
}

/// Prepend a TLS 1.2 record header to `body`.
pub fn wrap_record(body: &[u8], record_type: u8) -> Result<Vec<u8>> {
    if body.len() > MAX_RECORD_PAYLOAD {
        return Err(TlsError::RecordTooLarge { len: body.len() });
    }

    let mut record = Vec::with_capacity(TLS_RECORD_HEADER_LEN + body.len());
    record.push(record_type);
    record.extend_from_slice(&TLS_VERSION);
    record.extend_from_slice(&(body.len() as u16).to_be_bytes());
    record.extend_from_slice(body);
    Ok(record)
}
