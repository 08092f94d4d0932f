//! ClientHello extension block
//!
//! Extensions are kept in wire order, duplicates included, because their
//! order and repetition are fingerprinting signals. A first-occurrence index
//! by type sits alongside for plain lookups.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::codec::Reader;
use super::constants::extension_type;
use crate::error::{Result, TlsError};

/// Generic TLS extension container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsExtension {
    pub ext_type: u16,
    pub data: Vec<u8>,
}

impl TlsExtension {
    pub fn new(ext_type: u16, data: impl Into<Vec<u8>>) -> Self {
        Self {
            ext_type,
            data: data.into(),
        }
    }

    /// Value of the extension's 2-byte length field
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes this extension occupies on the wire: type + length + data
    pub fn encoded_len(&self) -> usize {
        4 + self.data.len()
    }
}

/// Ordered extension list with a first-occurrence index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extensions {
    list: Vec<TlsExtension>,
    first_by_type: HashMap<u16, usize>,
}

impl Extensions {
    pub fn new(list: Vec<TlsExtension>) -> Self {
        let mut first_by_type = HashMap::with_capacity(list.len());
        for (idx, ext) in list.iter().enumerate() {
            first_by_type.entry(ext.ext_type).or_insert(idx);
        }
        Self {
            list,
            first_by_type,
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TlsExtension> {
        self.list.iter()
    }

    pub fn as_slice(&self) -> &[TlsExtension] {
        &self.list
    }

    /// Extension types in wire order
    pub fn types(&self) -> impl Iterator<Item = u16> + '_ {
        self.list.iter().map(|e| e.ext_type)
    }

    pub fn contains(&self, ext_type: u16) -> bool {
        self.first_by_type.contains_key(&ext_type)
    }

    /// First extension of the given type
    pub fn first(&self, ext_type: u16) -> Option<&TlsExtension> {
        self.first_by_type.get(&ext_type).map(|&idx| &self.list[idx])
    }

    /// Data of the first extension of the given type
    pub fn get(&self, ext_type: u16) -> Option<&[u8]> {
        self.first(ext_type).map(|e| e.data.as_slice())
    }

    /// How many times `ext_type` appears
    pub fn count_of(&self, ext_type: u16) -> usize {
        self.list.iter().filter(|e| e.ext_type == ext_type).count()
    }

    /// `type → data` map keeping only the first occurrence of each type
    pub fn first_occurrence_by_type(&self) -> HashMap<u16, &[u8]> {
        self.first_by_type
            .iter()
            .map(|(&ty, &idx)| (ty, self.list[idx].data.as_slice()))
            .collect()
    }

    /// Sum of the wire sizes of all extensions
    pub fn encoded_len(&self) -> usize {
        self.list.iter().map(TlsExtension::encoded_len).sum()
    }

    /// Host name from server_name (SNI).
    pub fn server_name(&self) -> Option<String> {
        let data = self.get(extension_type::SERVER_NAME)?;
        let mut list = Reader::new(Reader::new(data).vec16()?);

        while !list.is_empty() {
            let name_type = list.u8()?;
            let name = list.vec16()?;
            if name_type == 0 && !name.is_empty() {
                return std::str::from_utf8(name).ok().map(str::to_string);
            }
        }
        None
    }

    /// ALPN protocol list, in offered order.
    pub fn alpn_protocols(&self) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        let Some(data) = self.get(extension_type::ALPN) else {
            return out;
        };
        let Some(list) = Reader::new(data).vec16() else {
            return out;
        };

        let mut list = Reader::new(list);
        while let Some(proto) = list.vec8() {
            out.push(proto.to_vec());
        }
        out
    }

    /// Versions offered in supported_versions.
    pub fn supported_versions(&self) -> Vec<u16> {
        let mut out = Vec::new();
        let Some(data) = self.get(extension_type::SUPPORTED_VERSIONS) else {
            return out;
        };
        let Some(list) = Reader::new(data).vec8() else {
            return out;
        };

        let mut list = Reader::new(list);
        while let Some(version) = list.u16() {
            out.push(version);
        }
        out
    }
}

impl<'a> IntoIterator for &'a Extensions {
    type Item = &'a TlsExtension;
    type IntoIter = std::slice::Iter<'a, TlsExtension>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

fn malformed(reason: String) -> TlsError {
    debug!(reason = %reason, "Rejecting extension block");
    TlsError::MalformedExtensions { reason }
}

/// Decode the TLV extension block.
///
/// `declared_len` is the value of the block's 2-byte length prefix; `data`
/// is everything after that prefix. TLV entries must tile the first
/// `declared_len` bytes exactly.
pub fn decode_extensions(data: &[u8], declared_len: usize) -> Result<Extensions> {
    if declared_len > data.len() {
        return Err(malformed(format!(
            "block declares {} bytes, only {} present",
            declared_len,
            data.len()
        )));
    }

    let mut r = Reader::new(&data[..declared_len]);
    let mut list = Vec::new();

    while !r.is_empty() {
        let offset = r.position();
        let header = r.take(4).ok_or_else(|| {
            malformed(format!(
                "{} stray bytes at offset {}, extension header needs 4",
                r.remaining(),
                offset
            ))
        })?;
        let ext_type = u16::from_be_bytes([header[0], header[1]]);
        let ext_len = u16::from_be_bytes([header[2], header[3]]) as usize;

        let body = r.take(ext_len).ok_or_else(|| {
            malformed(format!(
                "extension 0x{:04x} at offset {} declares {} bytes, {} left in block",
                ext_type,
                offset,
                ext_len,
                r.remaining()
            ))
        })?;

        list.push(TlsExtension::new(ext_type, body));
    }

    trace!(count = list.len(), len = declared_len, "Decoded extension block");
    Ok(Extensions::new(list))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ext(ty: u16, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + data.len());
        out.extend_from_slice(&ty.to_be_bytes());
        out.extend_from_slice(&(data.len() as u16).to_be_bytes());
        out.extend_from_slice(data);
        out
    }

    fn sni_data(host: &str) -> Vec<u8> {
        let host = host.as_bytes();
        let mut out = Vec::new();
        out.extend_from_slice(&(host.len() as u16 + 3).to_be_bytes());
        out.push(0);
        out.extend_from_slice(&(host.len() as u16).to_be_bytes());
        out.extend_from_slice(host);
        out
    }

    #[test]
    fn test_decode_empty_block() {
        let exts = decode_extensions(&[], 0).unwrap();
        assert!(exts.is_empty());
        assert_eq!(exts.encoded_len(), 0);
    }

    #[test]
    fn test_decode_preserves_order_and_duplicates() {
        let block = [
            ext(0x0a0a, &[]),
            ext(0x0000, b"first"),
            ext(0x0017, &[]),
            ext(0x0000, b"second"),
        ]
        .concat();
        let exts = decode_extensions(&block, block.len()).unwrap();

        assert_eq!(exts.len(), 4);
        assert_eq!(exts.types().collect::<Vec<_>>(), vec![0x0a0a, 0x0000, 0x0017, 0x0000]);
        assert_eq!(exts.count_of(0x0000), 2);
        assert_eq!(exts.get(0x0000), Some(&b"first"[..]));
        assert_eq!(exts.as_slice()[3].data, b"second");
        assert_eq!(exts.encoded_len(), block.len());

        let index = exts.first_occurrence_by_type();
        assert_eq!(index.len(), 3);
        assert_eq!(index[&0x0000], b"first");
        assert!(index[&0x0017].is_empty());
    }

    #[test]
    fn test_extension_length_invariant() {
        let block = [ext(0x0010, &[1, 2, 3]), ext(0x002b, &[9; 7])].concat();
        let exts = decode_extensions(&block, block.len()).unwrap();
        for ext in &exts {
            assert_eq!(ext.len(), ext.data.len());
        }
        assert_eq!(exts.first(0x002b).map(TlsExtension::len), Some(7));
    }

    #[test]
    fn test_declared_longer_than_data() {
        let block = ext(0x0017, &[0xaa, 0xbb]);
        assert_eq!(block.len(), 6);
        assert!(matches!(
            decode_extensions(&block, 8),
            Err(TlsError::MalformedExtensions { .. })
        ));
    }

    #[test]
    fn test_one_byte_short() {
        // last extension claims one byte more than the block holds
        let mut block = [ext(0x0017, &[]), ext(0x0023, &[1, 2, 3])].concat();
        let declared = block.len();
        block[declared - 4] = 0x04;
        assert!(matches!(
            decode_extensions(&block, declared),
            Err(TlsError::MalformedExtensions { .. })
        ));
    }

    #[test]
    fn test_one_byte_extra() {
        // a single stray byte after the last complete extension
        let mut block = [ext(0x0017, &[]), ext(0x0023, &[1, 2, 3])].concat();
        block.push(0x00);
        assert!(matches!(
            decode_extensions(&block, block.len()),
            Err(TlsError::MalformedExtensions { .. })
        ));
    }

    #[test]
    fn test_truncated_header_at_every_offset() {
        let block = [ext(0x0000, b"abc"), ext(0x0010, b"defg")].concat();
        for cut in 1..block.len() {
            let complete = cut == 7;
            let result = decode_extensions(&block[..cut], cut);
            if complete {
                assert_eq!(result.unwrap().len(), 1);
            } else {
                assert!(
                    matches!(result, Err(TlsError::MalformedExtensions { .. })),
                    "cut at {} should fail",
                    cut
                );
            }
        }
    }

    #[test]
    fn test_only_declared_prefix_is_decoded() {
        let mut block = ext(0x0017, &[]);
        block.extend_from_slice(&[0xde, 0xad]);
        let exts = decode_extensions(&block, 4).unwrap();
        assert_eq!(exts.len(), 1);
    }

    #[test]
    fn test_server_name() {
        let sni = sni_data("example.com");
        let block = [ext(0x0a0a, &[]), ext(0x0000, &sni)].concat();
        let exts = decode_extensions(&block, block.len()).unwrap();
        assert_eq!(exts.server_name().as_deref(), Some("example.com"));
    }

    #[test]
    fn test_server_name_malformed_is_none() {
        let block = ext(0x0000, &[0x00, 0x09, 0x00, 0x00]);
        let exts = decode_extensions(&block, block.len()).unwrap();
        assert_eq!(exts.server_name(), None);

        let exts = Extensions::default();
        assert_eq!(exts.server_name(), None);
    }

    #[test]
    fn test_alpn_protocols() {
        let mut alpn = Vec::new();
        alpn.extend_from_slice(&11u16.to_be_bytes());
        alpn.push(2);
        alpn.extend_from_slice(b"h2");
        alpn.push(4);
        alpn.extend_from_slice(b"spdy");
        alpn.push(2);
        alpn.extend_from_slice(b"h3");
        let block = ext(0x0010, &alpn);
        let exts = decode_extensions(&block, block.len()).unwrap();

        let alpn_str: Vec<String> = exts
            .alpn_protocols()
            .iter()
            .map(|p| String::from_utf8(p.clone()).unwrap())
            .collect();
        assert_eq!(alpn_str, vec!["h2", "spdy", "h3"]);
    }

    #[test]
    fn test_supported_versions() {
        let block = ext(0x002b, &[0x04, 0x03, 0x04, 0x03, 0x03]);
        let exts = decode_extensions(&block, block.len()).unwrap();
        assert_eq!(exts.supported_versions(), vec![0x0304, 0x0303]);
        assert!(Extensions::default().supported_versions().is_empty());
    }
}
