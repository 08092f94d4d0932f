//! camotls: TLS 1.2 ClientHello decoding and fake server handshake
//!
//! Decodes a client's first TLS record into a [`ClientHello`] and composes a
//! plausible ServerHello + ChangeCipherSpec + Finished reply for it. The reply
//! only has to look like TLS on the wire; no key exchange takes place.
//!
//! ```text
//! record bytes ─► strip_record_layer ─► ClientHello::decode ─► ClientHello
//!                                          └─ decode_extensions
//! ClientHello ─► build_fake_handshake ─► compose_server_hello + wrap_record ─► 137 bytes
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod protocol;
pub mod tls_front;

pub use crypto::SecureRandom;
pub use error::{Result, TlsError};
pub use protocol::client_hello::ClientHello;
pub use protocol::extensions::{Extensions, TlsExtension};
pub use protocol::record::{RecordCheck, RecordHeader};
pub use tls_front::{build_fake_handshake, build_fake_handshake_for_session};
