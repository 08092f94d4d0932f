//! TLS wire format: record layer, ClientHello decoding, ServerHello composition

pub mod client_hello;
pub mod codec;
pub mod constants;
pub mod extensions;
pub mod record;
pub mod server_hello;

pub use client_hello::ClientHello;
pub use extensions::{Extensions, TlsExtension, decode_extensions};
pub use record::{RecordCheck, RecordHeader, is_tls_handshake, parse_record_header, strip_record_layer, wrap_record};
pub use server_hello::compose_server_hello;
