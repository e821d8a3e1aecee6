//! DNS message header.
//!
//! The DNS header is a fixed 12-byte structure at the start of every DNS
//! message. It contains control information and counts of the sections that
//! follow.

use crate::error::{Error, Result};
use crate::opcode::OpCode;
use crate::rcode::ResponseCode;
use bitflags::bitflags;
use rand::Rng;
use std::fmt;

/// Size of the DNS header in bytes.
pub const HEADER_SIZE: usize = 12;

bitflags! {
    /// DNS header flags.
    ///
    /// The single-bit fields of the header flags word. The multi-bit
    /// opcode and rcode fields live in [`Header`] as their own enums.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HeaderFlags: u16 {
        /// Query/Response flag: 0 = query, 1 = response
        const QR = 0x8000;

        /// Authoritative Answer: server is authoritative for the domain
        const AA = 0x0400;

        /// Truncation: message was truncated
        const TC = 0x0200;

        /// Recursion Desired: client wants recursive resolution
        const RD = 0x0100;

        /// Recursion Available: server supports recursion
        const RA = 0x0080;
    }
}

impl Default for HeaderFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// DNS message header.
///
/// # Wire Format
///
/// Six big-endian 16-bit fields in fixed order (RFC 1035 Section 4.1.1):
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      ID                       |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    QDCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    ANCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    NSCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    ARCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// When a [`crate::Message`] is serialized the counts are recomputed from
/// the sections actually present; they are never trusted independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Message identifier for matching requests to responses.
    pub id: u16,

    /// The single-bit flags.
    pub flags: HeaderFlags,

    /// Operation code.
    pub opcode: OpCode,

    /// Response code.
    pub rcode: ResponseCode,

    /// Number of questions.
    pub qd_count: u16,

    /// Number of answer records.
    pub an_count: u16,

    /// Number of authority records.
    pub ns_count: u16,

    /// Number of additional records.
    pub ar_count: u16,
}

impl Header {
    /// Creates a new header with the given message ID and everything else
    /// zeroed.
    #[inline]
    pub const fn new(id: u16) -> Self {
        Self {
            id,
            flags: HeaderFlags::empty(),
            opcode: OpCode::Query,
            rcode: ResponseCode::NoError,
            qd_count: 0,
            an_count: 0,
            ns_count: 0,
            ar_count: 0,
        }
    }

    /// Creates a query header with a random ID from the thread RNG.
    ///
    /// Only the recursion-desired bit is set; all other flags are zero.
    pub fn query() -> Self {
        Self::query_with_rng(&mut rand::thread_rng())
    }

    /// Creates a query header drawing the ID from the given RNG.
    ///
    /// The ID is drawn from the full 16-bit space. Taking the RNG as a
    /// parameter lets tests pin the transaction ID.
    pub fn query_with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            id: rng.gen(),
            flags: HeaderFlags::RD,
            opcode: OpCode::Query,
            rcode: ResponseCode::NoError,
            qd_count: 0,
            an_count: 0,
            ns_count: 0,
            ar_count: 0,
        }
    }

    /// Creates a response header answering the given query header.
    pub fn response_from(query: &Header) -> Self {
        Self {
            id: query.id,
            flags: HeaderFlags::QR | (query.flags & HeaderFlags::RD),
            opcode: query.opcode,
            rcode: ResponseCode::NoError,
            qd_count: query.qd_count,
            an_count: 0,
            ns_count: 0,
            ar_count: 0,
        }
    }

    /// Returns true if this is a query.
    #[inline]
    pub fn is_query(&self) -> bool {
        !self.flags.contains(HeaderFlags::QR)
    }

    /// Returns true if this is a response.
    #[inline]
    pub fn is_response(&self) -> bool {
        self.flags.contains(HeaderFlags::QR)
    }

    /// Returns true if the response is from an authoritative server.
    #[inline]
    pub fn is_authoritative(&self) -> bool {
        self.flags.contains(HeaderFlags::AA)
    }

    /// Returns true if the message was truncated by the server.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.flags.contains(HeaderFlags::TC)
    }

    /// Returns true if recursion was requested.
    #[inline]
    pub fn recursion_desired(&self) -> bool {
        self.flags.contains(HeaderFlags::RD)
    }

    /// Returns true if recursion is available.
    #[inline]
    pub fn recursion_available(&self) -> bool {
        self.flags.contains(HeaderFlags::RA)
    }

    /// Sets or clears the QR flag.
    #[inline]
    pub fn set_response(&mut self, response: bool) {
        self.flags.set(HeaderFlags::QR, response);
    }

    /// Sets or clears the RA flag.
    #[inline]
    pub fn set_recursion_available(&mut self, ra: bool) {
        self.flags.set(HeaderFlags::RA, ra);
    }

    /// Parses a header from wire format.
    ///
    /// # Errors
    ///
    /// [`Error::TruncatedHeader`] if fewer than 12 bytes are available;
    /// [`Error::InvalidOpCode`] / [`Error::InvalidResponseCode`] on
    /// unassigned values in the flags word.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::TruncatedHeader {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let id = u16::from_be_bytes([data[0], data[1]]);
        let flags_raw = u16::from_be_bytes([data[2], data[3]]);

        // Opcode occupies bits 11-14
        let opcode_value = ((flags_raw >> 11) & 0x0F) as u8;
        let opcode = OpCode::from_u8(opcode_value).ok_or(Error::InvalidOpCode {
            value: opcode_value,
        })?;

        // Rcode occupies bits 0-3
        let rcode_value = (flags_raw & 0x0F) as u8;
        let rcode = ResponseCode::from_u8(rcode_value).ok_or(Error::InvalidResponseCode {
            value: rcode_value,
        })?;

        let flags = HeaderFlags::from_bits_truncate(flags_raw);

        let qd_count = u16::from_be_bytes([data[4], data[5]]);
        let an_count = u16::from_be_bytes([data[6], data[7]]);
        let ns_count = u16::from_be_bytes([data[8], data[9]]);
        let ar_count = u16::from_be_bytes([data[10], data[11]]);

        Ok(Self {
            id,
            flags,
            opcode,
            rcode,
            qd_count,
            an_count,
            ns_count,
            ar_count,
        })
    }

    /// Serializes the header to wire format.
    pub fn to_wire(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];

        buf[0..2].copy_from_slice(&self.id.to_be_bytes());

        let mut flags_raw = self.flags.bits();
        flags_raw |= u16::from(self.opcode.to_u8()) << 11;
        flags_raw |= u16::from(self.rcode.to_u8());

        buf[2..4].copy_from_slice(&flags_raw.to_be_bytes());
        buf[4..6].copy_from_slice(&self.qd_count.to_be_bytes());
        buf[6..8].copy_from_slice(&self.an_count.to_be_bytes());
        buf[8..10].copy_from_slice(&self.ns_count.to_be_bytes());
        buf[10..12].copy_from_slice(&self.ar_count.to_be_bytes());

        buf
    }

    /// Writes the header to a buffer.
    pub fn write_to(&self, buf: &mut bytes::BytesMut) {
        buf.extend_from_slice(&self.to_wire());
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id:{:#06x} {} {}", self.id, self.opcode, self.rcode)?;

        if self.is_response() {
            write!(f, " qr")?;
        }
        if self.is_authoritative() {
            write!(f, " aa")?;
        }
        if self.is_truncated() {
            write!(f, " tc")?;
        }
        if self.recursion_desired() {
            write!(f, " rd")?;
        }
        if self.recursion_available() {
            write!(f, " ra")?;
        }

        write!(
            f,
            "; QUERY: {}, ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}",
            self.qd_count, self.an_count, self.ns_count, self.ar_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_header_roundtrip() {
        let mut header = Header::new(0x1234);
        header.flags = HeaderFlags::RD | HeaderFlags::RA | HeaderFlags::QR;
        header.rcode = ResponseCode::NXDomain;
        header.qd_count = 1;
        header.an_count = 3;
        header.ns_count = 2;
        header.ar_count = 5;

        let wire = header.to_wire();
        let parsed = Header::parse(&wire).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_header_fixed_example() {
        // ID 0, no flags, one question, nothing else
        let mut header = Header::new(0);
        header.qd_count = 1;

        assert_eq!(
            header.to_wire(),
            [0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_flags_layout() {
        assert_eq!(HeaderFlags::QR.bits(), 0x8000);
        assert_eq!(HeaderFlags::AA.bits(), 0x0400);
        assert_eq!(HeaderFlags::TC.bits(), 0x0200);
        assert_eq!(HeaderFlags::RD.bits(), 0x0100);
        assert_eq!(HeaderFlags::RA.bits(), 0x0080);
    }

    #[test]
    fn test_query_header() {
        let header = Header::query();
        assert!(header.is_query());
        assert!(header.recursion_desired());
        assert_eq!(header.flags, HeaderFlags::RD);
        assert_eq!(header.opcode, OpCode::Query);
    }

    #[test]
    fn test_query_with_pinned_rng() {
        let mut rng = StepRng::new(0xABCD, 0);
        let header = Header::query_with_rng(&mut rng);
        assert_eq!(header.id, 0xABCD);
    }

    #[test]
    fn test_header_parse_too_short() {
        assert!(matches!(
            Header::parse(&[0u8; 11]),
            Err(Error::TruncatedHeader {
                expected: 12,
                actual: 11
            })
        ));
    }

    #[test]
    fn test_header_parse_reserved_rcode() {
        let mut wire = Header::new(1).to_wire();
        wire[3] = 0x0D; // rcode 13, reserved
        assert!(matches!(
            Header::parse(&wire),
            Err(Error::InvalidResponseCode { value: 13 })
        ));
    }

    #[test]
    fn test_response_from_query() {
        let mut query = Header::query();
        query.qd_count = 1;
        let response = Header::response_from(&query);

        assert_eq!(response.id, query.id);
        assert!(response.is_response());
        assert!(response.recursion_desired());
        assert_eq!(response.qd_count, 1);
    }

    #[test]
    fn test_header_display() {
        let mut header = Header::new(0xABCD);
        header.set_response(true);
        header.an_count = 2;

        let display = header.to_string();
        assert!(display.contains("0xabcd"));
        assert!(display.contains("qr"));
        assert!(display.contains("ANSWER: 2"));
    }
}
