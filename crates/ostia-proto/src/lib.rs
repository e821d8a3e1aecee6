//! # Ostia DNS Protocol Library
//!
//! Wire format types and codec for a minimal DNS stub client, following
//! RFC 1035 for the subset implemented.
//!
//! The crate covers exactly what a single-question UDP exchange needs:
//!
//! - Domain name encoding/decoding (length-prefixed labels)
//! - The fixed 12-byte message header
//! - Question serialization
//! - Resource record parsing with a typed view for A records
//! - Query assembly with a randomized (and injectable) transaction ID
//!
//! ## Limitations
//!
//! Name compression pointers (RFC 1035 Section 4.1.4) are **not** resolved.
//! A compression marker encountered during decoding fails with
//! [`Error::UnsupportedCompression`] rather than misreading the bytes that
//! follow. EDNS(0) is not supported; messages are limited to the classic
//! 512-byte UDP payload.
//!
//! ## Example
//!
//! ```rust
//! use ostia_proto::{Message, Name, Question};
//!
//! let name: Name = "example.com".parse().unwrap();
//! let query = Message::query(Question::a(name));
//! let wire = query.to_wire();
//! assert_eq!(wire.len(), 29); // 12-byte header + 13-byte name + type + class
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod class;
pub mod error;
pub mod header;
pub mod message;
pub mod name;
pub mod opcode;
pub mod question;
pub mod rcode;
pub mod rdata;
pub mod record;
pub mod rtype;
pub mod wire;

// Re-exports for convenience
pub use class::{Class, RecordClass};
pub use error::{Error, Result};
pub use header::Header;
pub use message::Message;
pub use name::Name;
pub use opcode::OpCode;
pub use question::Question;
pub use rcode::ResponseCode;
pub use rdata::RData;
pub use record::ResourceRecord;
pub use rtype::{RecordType, Type};
pub use wire::WireReader;

/// Maximum length of a DNS label (63 bytes per RFC 1035)
pub const MAX_LABEL_LENGTH: usize = 63;

/// Maximum length of a domain name in wire format (255 bytes per RFC 1035)
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum size of a UDP DNS message without EDNS0 (512 bytes per RFC 1035)
pub const MAX_UDP_MESSAGE_SIZE: usize = 512;

/// DNS port (53)
pub const DNS_PORT: u16 = 53;
