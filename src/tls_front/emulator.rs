use tracing::trace;

use crate::crypto::SecureRandom;
use crate::error::Result;
use crate::protocol::client_hello::ClientHello;
use crate::protocol::constants::{
    CHANGE_CIPHER_SPEC_PAYLOAD, FAKE_FINISHED_LEN, FAKE_HANDSHAKE_LEN, TLS_RECORD_CHANGE_CIPHER,
    TLS_RECORD_HANDSHAKE,
};
use crate::protocol::record::wrap_record;
use crate::protocol::server_hello::compose_server_hello;

/// Build a ServerHello + CCS + Finished sequence answering `client_hello`.
///
/// Only the session id is read from the ClientHello. The Finished record is
/// 40 random bytes with no key material behind it; anything that tries to
/// verify it will fail.
pub fn build_fake_handshake(client_hello: &ClientHello, rng: &SecureRandom) -> Result<Vec<u8>> {
    build_fake_handshake_for_session(&client_hello.session_id, rng)
}

/// Same as [`build_fake_handshake`] for callers that only kept the session id.
pub fn build_fake_handshake_for_session(session_id: &[u8], rng: &SecureRandom) -> Result<Vec<u8>> {
    // --- ServerHello ---
    let server_hello = wrap_record(&compose_server_hello(session_id, rng)?, TLS_RECORD_HANDSHAKE)?;

    // --- ChangeCipherSpec ---
    let change_cipher_spec = wrap_record(&CHANGE_CIPHER_SPEC_PAYLOAD, TLS_RECORD_CHANGE_CIPHER)?;

    // --- Finished (opaque) ---
    let finished = wrap_record(&rng.array::<FAKE_FINISHED_LEN>(), TLS_RECORD_HANDSHAKE)?;

    // --- Combine ---
    let mut response =
        Vec::with_capacity(server_hello.len() + change_cipher_spec.len() + finished.len());
    response.extend_from_slice(&server_hello);
    response.extend_from_slice(&change_cipher_spec);
    response.extend_from_slice(&finished);
    debug_assert_eq!(response.len(), FAKE_HANDSHAKE_LEN);

    trace!(
        session_id_len = session_id.len(),
        len = response.len(),
        "Built fake server handshake"
    );

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TlsError;
    use crate::protocol::constants::{SERVER_HELLO_LEN, TLS_RECORD_HEADER_LEN, TLS_VERSION};
    use crate::protocol::extensions::Extensions;
    use crate::protocol::record::RecordCheck;
    use crate::protocol::server_hello::{SERVER_HELLO_RANDOM_POS, SERVER_HELLO_SESSION_ID_POS};

    const CCS_START: usize = TLS_RECORD_HEADER_LEN + SERVER_HELLO_LEN;
    const FINISHED_START: usize = CCS_START + 6;
    /// Session id offset within the full reply
    const SID_POS: usize = TLS_RECORD_HEADER_LEN + SERVER_HELLO_SESSION_ID_POS;
    const RANDOM_POS: usize = TLS_RECORD_HEADER_LEN + SERVER_HELLO_RANDOM_POS;

    fn hello_with_session(session_id: &[u8]) -> ClientHello {
        ClientHello {
            handshake_type: 0x01,
            length: 0,
            client_version: [0x03, 0x03],
            random: [0u8; 32],
            session_id: session_id.to_vec(),
            cipher_suites: vec![0xc0, 0x30],
            compression_methods: vec![0x00],
            extensions: Extensions::default(),
        }
    }

    fn client_hello_record(session_id: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&TLS_VERSION);
        body.extend_from_slice(&[0x07; 32]);
        body.push(session_id.len() as u8);
        body.extend_from_slice(session_id);
        body.extend_from_slice(&[0x00, 0x02, 0xc0, 0x2f, 0x01, 0x00, 0x00, 0x00]);

        let mut handshake = vec![0x01];
        handshake.extend_from_slice(&(body.len() as u32).to_be_bytes()[1..4]);
        handshake.extend_from_slice(&body);

        let mut record = vec![TLS_RECORD_HANDSHAKE, 0x03, 0x01];
        record.extend_from_slice(&(handshake.len() as u16).to_be_bytes());
        record.extend_from_slice(&handshake);
        record
    }

    #[test]
    fn test_fake_handshake_structure() {
        let rng = SecureRandom::new();
        let response = build_fake_handshake(&hello_with_session(&[0xaa; 32]), &rng).unwrap();

        assert_eq!(response.len(), 137);

        // ServerHello record
        assert_eq!(&response[..5], &[0x16, 0x03, 0x03, 0x00, 0x51]);
        assert_eq!(response[5], 0x02);

        // ChangeCipherSpec record
        assert_eq!(
            &response[CCS_START..FINISHED_START],
            &[0x14, 0x03, 0x03, 0x00, 0x01, 0x01]
        );

        // Finished record
        assert_eq!(&response[FINISHED_START..FINISHED_START + 5], &[0x16, 0x03, 0x03, 0x00, 0x28]);
        assert_eq!(response.len() - FINISHED_START - 5, FAKE_FINISHED_LEN);
    }

    #[test]
    fn test_session_id_echo() {
        let rng = SecureRandom::new();
        let session_id: Vec<u8> = (0x10..0x20).collect();
        let record = client_hello_record(&session_id);

        let hello = ClientHello::from_record(&record, RecordCheck::Strict).unwrap();
        let response = build_fake_handshake(&hello, &rng).unwrap();

        assert_eq!(response.len(), 137);
        assert_eq!(response[SID_POS - 1], 0x20);
        assert_eq!(&response[SID_POS..SID_POS + 16], &session_id[..]);
    }

    #[test]
    fn test_length_independent_of_input() {
        let rng = SecureRandom::new();
        for len in [0usize, 1, 8, 16, 31, 32] {
            let response = build_fake_handshake_for_session(&vec![0x5c; len], &rng).unwrap();
            assert_eq!(response.len(), FAKE_HANDSHAKE_LEN);
        }
    }

    #[test]
    fn test_oversized_session_id_rejected() {
        let rng = SecureRandom::new();
        let hello = hello_with_session(&[0x01; 33]);
        assert!(matches!(
            build_fake_handshake(&hello, &rng),
            Err(TlsError::InvalidSessionId { len: 33 })
        ));
    }

    #[test]
    fn test_random_fields_differ_between_calls() {
        let rng = SecureRandom::new();
        let hello = hello_with_session(&[0x42; 32]);
        let a = build_fake_handshake(&hello, &rng).unwrap();
        let b = build_fake_handshake(&hello, &rng).unwrap();

        // server random and Finished payload change
        assert_ne!(&a[RANDOM_POS..RANDOM_POS + 32], &b[RANDOM_POS..RANDOM_POS + 32]);
        assert_ne!(&a[FINISHED_START + 5..], &b[FINISHED_START + 5..]);

        // everything else is fixed
        assert_eq!(&a[..RANDOM_POS], &b[..RANDOM_POS]);
        assert_eq!(&a[RANDOM_POS + 32..FINISHED_START + 5], &b[RANDOM_POS + 32..FINISHED_START + 5]);
    }

    #[test]
    fn test_records_walk_cleanly() {
        let rng = SecureRandom::new();
        let response = build_fake_handshake_for_session(&[0x01; 4], &rng).unwrap();

        let mut pos = 0;
        let mut types = Vec::new();
        while pos < response.len() {
            let len = u16::from_be_bytes([response[pos + 3], response[pos + 4]]) as usize;
            types.push(response[pos]);
            pos += TLS_RECORD_HEADER_LEN + len;
        }
        assert_eq!(pos, response.len());
        assert_eq!(types, vec![0x16, 0x14, 0x16]);
    }
}
