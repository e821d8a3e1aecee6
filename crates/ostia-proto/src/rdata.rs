//! DNS record data (RDATA) types.
//!
//! Only the A record gets a typed representation; every other type is
//! preserved as an opaque byte sequence. That includes an A record whose
//! RDLENGTH is not 4: the bytes are captured as-is and interpretation is
//! left to the caller.

use crate::error::{Error, Result};
use crate::rtype::{RecordType, Type};
use bytes::BytesMut;
use data_encoding::HEXLOWER;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// A record - IPv4 address (RFC 1035).
///
/// The RDATA is exactly 4 bytes containing the address in network byte
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct A {
    /// The IPv4 address.
    address: Ipv4Addr,
}

impl A {
    /// Creates a new A record.
    #[inline]
    pub const fn new(address: Ipv4Addr) -> Self {
        Self { address }
    }

    /// Returns the IPv4 address.
    #[inline]
    pub const fn address(&self) -> Ipv4Addr {
        self.address
    }

    /// Parses an A record from exactly 4 bytes of wire data.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let octets: [u8; 4] = data.try_into().map_err(|_| Error::RDataLengthMismatch {
            rtype: "A",
            expected: 4,
            actual: data.len(),
        })?;
        Ok(Self {
            address: Ipv4Addr::from(octets),
        })
    }

    /// Returns the wire format length (always 4).
    #[inline]
    pub const fn wire_len(&self) -> usize {
        4
    }

    /// Writes the A record to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.address.octets());
    }
}

impl From<Ipv4Addr> for A {
    fn from(address: Ipv4Addr) -> Self {
        Self::new(address)
    }
}

impl From<A> for Ipv4Addr {
    fn from(a: A) -> Self {
        a.address
    }
}

impl fmt::Display for A {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

/// Opaque record data - preserves raw RDATA for types without explicit
/// parsing support.
///
/// Per RFC 3597, unknown record data is rendered as `\# <length> <hex>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Opaque {
    /// The record type code this data was read under.
    type_code: u16,
    /// The raw RDATA bytes.
    data: Vec<u8>,
}

impl Opaque {
    /// Creates opaque record data.
    pub fn new(type_code: u16, data: impl Into<Vec<u8>>) -> Self {
        Self {
            type_code,
            data: data.into(),
        }
    }

    /// Returns the record type code.
    #[inline]
    pub const fn type_code(&self) -> u16 {
        self.type_code
    }

    /// Returns the raw RDATA.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the RDATA as a hex string.
    pub fn data_hex(&self) -> String {
        HEXLOWER.encode(&self.data)
    }

    /// Returns the wire format length.
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.data.len()
    }

    /// Writes the raw bytes to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.data);
    }
}

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\# {} {}", self.data.len(), self.data_hex())
    }
}

/// Parsed record data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RData {
    /// IPv4 address (A record with a well-formed 4-byte payload)
    A(A),

    /// Anything else, captured byte-for-byte
    Opaque(Opaque),
}

impl RData {
    /// Builds record data from wire bytes.
    ///
    /// A-type data of exactly 4 bytes becomes [`RData::A`]; everything
    /// else - unknown types, and A data of an unexpected length - is
    /// captured as [`RData::Opaque`]. This never fails: length validation
    /// against RDLENGTH happens in the record parser before the bytes get
    /// here.
    pub fn from_wire(rtype: Type, data: &[u8]) -> Self {
        match rtype.as_known() {
            Some(RecordType::A) if data.len() == 4 => {
                let octets: [u8; 4] = data.try_into().unwrap();
                Self::A(A::new(Ipv4Addr::from(octets)))
            }
            _ => Self::Opaque(Opaque::new(rtype.to_u16(), data)),
        }
    }

    /// Returns the IPv4 address if this is a well-formed A record.
    pub fn as_a(&self) -> Option<Ipv4Addr> {
        match self {
            Self::A(a) => Some(a.address()),
            Self::Opaque(_) => None,
        }
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        match self {
            Self::A(r) => r.wire_len(),
            Self::Opaque(r) => r.wire_len(),
        }
    }

    /// Writes the record data to wire format.
    pub fn write_to(&self, buf: &mut BytesMut) {
        match self {
            Self::A(r) => r.write_to(buf),
            Self::Opaque(r) => r.write_to(buf),
        }
    }
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A(r) => write!(f, "{r}"),
            Self::Opaque(r) => write!(f, "{r}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a_record() {
        let a = A::new(Ipv4Addr::new(192, 0, 2, 1));
        assert_eq!(a.address(), Ipv4Addr::new(192, 0, 2, 1));
        assert_eq!(a.wire_len(), 4);
        assert_eq!(a.to_string(), "192.0.2.1");
    }

    #[test]
    fn test_a_parse() {
        let a = A::parse(&[192, 0, 2, 1]).unwrap();
        assert_eq!(a.address(), Ipv4Addr::new(192, 0, 2, 1));
        assert!(A::parse(&[192, 0, 2]).is_err());
    }

    #[test]
    fn test_rdata_a_from_wire() {
        let rdata = RData::from_wire(Type::Known(RecordType::A), &[10, 0, 0, 1]);
        assert_eq!(rdata.as_a(), Some(Ipv4Addr::new(10, 0, 0, 1)));
    }

    #[test]
    fn test_rdata_malformed_a_is_opaque() {
        // A with a 6-byte payload: captured, not rejected
        let rdata = RData::from_wire(Type::Known(RecordType::A), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(rdata.as_a(), None);
        match &rdata {
            RData::Opaque(o) => {
                assert_eq!(o.type_code(), 1);
                assert_eq!(o.data(), &[1, 2, 3, 4, 5, 6]);
            }
            RData::A(_) => panic!("expected opaque data"),
        }
    }

    #[test]
    fn test_rdata_unknown_type() {
        let rdata = RData::from_wire(Type::Unknown(999), &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(rdata.as_a(), None);
        assert_eq!(rdata.to_string(), "\\# 4 deadbeef");
    }

    #[test]
    fn test_rdata_roundtrip() {
        let rdata = RData::from_wire(Type::Known(RecordType::A), &[93, 184, 216, 34]);
        let mut buf = BytesMut::new();
        rdata.write_to(&mut buf);
        assert_eq!(buf.as_ref(), &[93, 184, 216, 34]);
        assert_eq!(rdata.wire_len(), 4);
    }
}
