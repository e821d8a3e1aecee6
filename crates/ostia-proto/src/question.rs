//! DNS question section.
//!
//! # Wire Format
//!
//! ```text
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! /                     QNAME                     /
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                     QTYPE                     |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                     QCLASS                    |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! ```

use crate::class::{Class, RecordClass};
use crate::error::Result;
use crate::name::Name;
use crate::rtype::{RecordType, Type};
use crate::wire::WireReader;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A DNS question: the name being asked about, the record type wanted, and
/// the class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    /// The domain name being queried.
    pub qname: Name,

    /// The type of record being requested.
    pub qtype: Type,

    /// The class of the query (usually IN for Internet).
    pub qclass: Class,
}

impl Question {
    /// Creates a new question.
    #[inline]
    pub fn new(qname: Name, qtype: RecordType, qclass: RecordClass) -> Self {
        Self {
            qname,
            qtype: Type::Known(qtype),
            qclass: Class::Known(qclass),
        }
    }

    /// Creates a question for an A record lookup in the Internet class.
    #[inline]
    pub fn a(name: Name) -> Self {
        Self::new(name, RecordType::A, RecordClass::IN)
    }

    /// Parses a question from wire format.
    ///
    /// Used by the exchange driver to step past the echoed question in a
    /// response: the encoded name plus 4 fixed bytes.
    pub fn parse(reader: &mut WireReader<'_>) -> Result<Self> {
        let qname = Name::parse(reader)?;
        let qtype = Type::from_u16(reader.read_u16()?);
        let qclass = Class::from_u16(reader.read_u16()?);

        Ok(Self {
            qname,
            qtype,
            qclass,
        })
    }

    /// Returns the wire format length of this question.
    pub fn wire_len(&self) -> usize {
        self.qname.wire_len() + 4
    }

    /// Writes the question to wire format: the encoded name followed by
    /// big-endian type and class.
    pub fn write_to(&self, buf: &mut BytesMut) {
        self.qname.write_wire(buf);
        buf.extend_from_slice(&self.qtype.to_u16().to_be_bytes());
        buf.extend_from_slice(&self.qclass.to_u16().to_be_bytes());
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.qname, self.qclass, self.qtype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let name: Name = "example.com".parse().unwrap();
        let q = Question::a(name.clone());

        assert_eq!(q.qname, name);
        assert_eq!(q.qtype, Type::Known(RecordType::A));
        assert_eq!(q.qclass, Class::Known(RecordClass::IN));
    }

    #[test]
    fn test_question_wire_bytes() {
        let q = Question::a("example.com".parse().unwrap());

        let mut buf = BytesMut::new();
        q.write_to(&mut buf);

        // 13-byte name, type A (0x0001), class IN (0x0001)
        assert_eq!(buf.len(), 17);
        assert_eq!(&buf[13..], &[0x00, 0x01, 0x00, 0x01]);
        assert_eq!(q.wire_len(), buf.len());
    }

    #[test]
    fn test_question_roundtrip() {
        let original = Question::a("www.example.com".parse().unwrap());

        let mut buf = BytesMut::new();
        original.write_to(&mut buf);

        let mut reader = WireReader::new(&buf);
        let parsed = Question::parse(&mut reader).unwrap();

        assert_eq!(parsed, original);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_question_truncated_tail() {
        let q = Question::a("example.com".parse().unwrap());
        let mut buf = BytesMut::new();
        q.write_to(&mut buf);

        // Cut into the qclass field
        let mut reader = WireReader::new(&buf[..buf.len() - 1]);
        assert!(Question::parse(&mut reader).is_err());
    }

    #[test]
    fn test_question_display() {
        let q = Question::a("example.com".parse().unwrap());
        assert_eq!(q.to_string(), "example.com. IN A");
    }
}
