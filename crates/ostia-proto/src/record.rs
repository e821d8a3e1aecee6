//! DNS resource records.
//!
//! A resource record is the fundamental unit of DNS data: a name, type,
//! class, TTL, and record-specific data.
//!
//! # Wire Format
//!
//! ```text
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! /                      NAME                     /
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                      TYPE                     |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                     CLASS                     |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                      TTL                      |
//! |                                               |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                   RDLENGTH                    |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! /                     RDATA                     /
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! ```

use crate::class::{Class, RecordClass};
use crate::error::{Error, Result};
use crate::name::Name;
use crate::rdata::RData;
use crate::rtype::{RecordType, Type};
use crate::wire::WireReader;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Bytes of fixed fields following the name: type, class, TTL, RDLENGTH.
const FIXED_FIELDS_LEN: usize = 10;

/// A DNS resource record.
///
/// Parsed records are owned values: the name and data are copied out of the
/// transport buffer, nothing borrows from it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// The domain name this record is for.
    name: Name,
    /// The record type.
    rtype: Type,
    /// The record class.
    rclass: Class,
    /// Time to live in seconds, as received from the wire.
    ttl: u32,
    /// The record data.
    rdata: RData,
}

impl ResourceRecord {
    /// Creates a new resource record.
    pub fn new(name: Name, rtype: Type, rclass: Class, ttl: u32, rdata: RData) -> Self {
        Self {
            name,
            rtype,
            rclass,
            ttl,
            rdata,
        }
    }

    /// Creates an A record in the Internet class.
    pub fn a(name: Name, ttl: u32, addr: Ipv4Addr) -> Self {
        Self::new(
            name,
            Type::Known(RecordType::A),
            Class::Known(RecordClass::IN),
            ttl,
            RData::A(crate::rdata::A::new(addr)),
        )
    }

    /// Returns the record name.
    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the record type.
    #[inline]
    pub fn rtype(&self) -> Type {
        self.rtype
    }

    /// Returns the record class.
    #[inline]
    pub fn rclass(&self) -> Class {
        self.rclass
    }

    /// Returns the TTL in seconds.
    #[inline]
    pub const fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Returns the TTL as a Duration.
    #[inline]
    pub fn ttl_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.ttl))
    }

    /// Returns the record data.
    #[inline]
    pub fn rdata(&self) -> &RData {
        &self.rdata
    }

    /// Returns true if this is an A record.
    #[inline]
    pub fn is_a(&self) -> bool {
        matches!(self.rtype, Type::Known(RecordType::A))
    }

    /// Parses one resource record from wire format.
    ///
    /// The caller decides how many records to read; the header's section
    /// counts drive that loop, not this codec.
    ///
    /// # Errors
    ///
    /// [`Error::TruncatedRecord`] if the buffer ends inside the fixed
    /// fields or before `RDLENGTH` bytes of RDATA; name decode errors pass
    /// through unchanged.
    pub fn parse(reader: &mut WireReader<'_>) -> Result<Self> {
        let name = Name::parse(reader)?;

        if reader.remaining() < FIXED_FIELDS_LEN {
            return Err(Error::TruncatedRecord {
                needed: FIXED_FIELDS_LEN,
                available: reader.remaining(),
            });
        }

        let rtype = Type::from_u16(reader.read_u16()?);
        let rclass = Class::from_u16(reader.read_u16()?);
        let ttl = reader.read_u32()?;
        let rdlength = reader.read_u16()? as usize;

        if reader.remaining() < rdlength {
            return Err(Error::TruncatedRecord {
                needed: rdlength,
                available: reader.remaining(),
            });
        }

        let rdata = RData::from_wire(rtype, reader.read_bytes(rdlength)?);

        Ok(Self {
            name,
            rtype,
            rclass,
            ttl,
            rdata,
        })
    }

    /// Returns the wire format length.
    pub fn wire_len(&self) -> usize {
        self.name.wire_len() + FIXED_FIELDS_LEN + self.rdata.wire_len()
    }

    /// Writes the resource record to wire format.
    ///
    /// RDLENGTH is derived from the data being written, never supplied
    /// separately.
    pub fn write_to(&self, buf: &mut BytesMut) {
        self.name.write_wire(buf);
        buf.extend_from_slice(&self.rtype.to_u16().to_be_bytes());
        buf.extend_from_slice(&self.rclass.to_u16().to_be_bytes());
        buf.extend_from_slice(&self.ttl.to_be_bytes());
        buf.extend_from_slice(&(self.rdata.wire_len() as u16).to_be_bytes());
        self.rdata.write_to(buf);
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.name, self.ttl, self.rclass, self.rtype, self.rdata
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_of(record: &ResourceRecord) -> BytesMut {
        let mut buf = BytesMut::new();
        record.write_to(&mut buf);
        buf
    }

    #[test]
    fn test_record_roundtrip() {
        let original = ResourceRecord::a(
            "www.example.com".parse().unwrap(),
            3600,
            Ipv4Addr::new(10, 0, 0, 1),
        );

        let wire = wire_of(&original);
        let mut reader = WireReader::new(&wire);
        let parsed = ResourceRecord::parse(&mut reader).unwrap();

        assert_eq!(parsed, original);
        assert_eq!(original.wire_len(), wire.len());
        assert!(reader.is_empty());
    }

    #[test]
    fn test_ttl_copied_from_wire() {
        let record = ResourceRecord::a(
            "example.com".parse().unwrap(),
            0x01020304,
            Ipv4Addr::new(192, 0, 2, 1),
        );

        let wire = wire_of(&record);
        let mut reader = WireReader::new(&wire);
        let parsed = ResourceRecord::parse(&mut reader).unwrap();

        assert_eq!(parsed.ttl(), 0x01020304);
        assert_eq!(parsed.ttl_duration(), Duration::from_secs(0x01020304));
    }

    #[test]
    fn test_parse_hand_built_buffer() {
        // example.com A IN, TTL 300, 93.184.216.34
        let wire = [
            0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'c', b'o', b'm', 0x00, // name
            0x00, 0x01, // type A
            0x00, 0x01, // class IN
            0x00, 0x00, 0x01, 0x2C, // TTL 300
            0x00, 0x04, // RDLENGTH 4
            93, 184, 216, 34, // RDATA
        ];

        let mut reader = WireReader::new(&wire);
        let record = ResourceRecord::parse(&mut reader).unwrap();

        assert!(record.is_a());
        assert_eq!(record.name().to_string(), "example.com.");
        assert_eq!(record.ttl(), 300);
        assert_eq!(record.rdata().as_a(), Some(Ipv4Addr::new(93, 184, 216, 34)));
    }

    #[test]
    fn test_truncated_fixed_fields() {
        // Name then only 3 of the 10 fixed bytes
        let wire = [0x03, b'c', b'o', b'm', 0x00, 0x00, 0x01, 0x00];
        let mut reader = WireReader::new(&wire);

        assert!(matches!(
            ResourceRecord::parse(&mut reader),
            Err(Error::TruncatedRecord {
                needed: 10,
                available: 3
            })
        ));
    }

    #[test]
    fn test_truncated_rdata() {
        // Declares RDLENGTH 4 but carries only 2 bytes
        let wire = [
            0x03, b'c', b'o', b'm', 0x00, // name
            0x00, 0x01, 0x00, 0x01, // type, class
            0x00, 0x00, 0x00, 0x3C, // TTL
            0x00, 0x04, // RDLENGTH 4
            93, 184, // short RDATA
        ];
        let mut reader = WireReader::new(&wire);

        assert!(matches!(
            ResourceRecord::parse(&mut reader),
            Err(Error::TruncatedRecord {
                needed: 4,
                available: 2
            })
        ));
    }

    #[test]
    fn test_unknown_type_preserved() {
        // TYPE 99, 3 opaque bytes
        let wire = [
            0x03, b'c', b'o', b'm', 0x00, // name
            0x00, 0x63, 0x00, 0x01, // type 99, class IN
            0x00, 0x00, 0x00, 0x10, // TTL 16
            0x00, 0x03, // RDLENGTH 3
            0xAA, 0xBB, 0xCC,
        ];
        let mut reader = WireReader::new(&wire);
        let record = ResourceRecord::parse(&mut reader).unwrap();

        assert_eq!(record.rtype(), Type::Unknown(99));
        assert_eq!(record.rdata().as_a(), None);
        assert_eq!(record.rdata().wire_len(), 3);
    }

    #[test]
    fn test_record_display() {
        let record = ResourceRecord::a(
            "example.com".parse().unwrap(),
            300,
            Ipv4Addr::new(192, 0, 2, 1),
        );

        let display = record.to_string();
        assert!(display.contains("example.com"));
        assert!(display.contains("300"));
        assert!(display.contains("IN"));
        assert!(display.contains('A'));
        assert!(display.contains("192.0.2.1"));
    }
}
