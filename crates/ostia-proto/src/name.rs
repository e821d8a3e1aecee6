//! DNS domain name representation and codec.
//!
//! Domain names are sequences of labels separated by dots. Each label can be
//! up to 63 bytes, and the entire name in wire format can be up to 255 bytes
//! including length octets and the root label.
//!
//! # Wire Format
//!
//! A domain name is encoded as a sequence of labels, each prefixed by a
//! length octet, terminated by a zero-length label (the root). For example,
//! `example.com.` is encoded as:
//!
//! ```text
//! 07 'e' 'x' 'a' 'm' 'p' 'l' 'e' 03 'c' 'o' 'm' 00
//! ```
//!
//! DNS also defines name compression via two-bit-flagged pointer octets
//! (values `0xC0` and above). This decoder does not resolve pointers: a
//! compression marker fails the decode with
//! [`Error::UnsupportedCompression`].
//!
//! # Comparison Semantics
//!
//! Names compare case-insensitively per RFC 1035; equality and hashing
//! respect this.

use crate::error::{Error, Result};
use crate::wire::WireReader;
use crate::{MAX_LABEL_LENGTH, MAX_NAME_LENGTH};
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A DNS domain name, stored in uncompressed wire format.
///
/// Typical names fit the inline storage without a heap allocation.
///
/// # Example
///
/// ```rust
/// use ostia_proto::Name;
///
/// let name: Name = "www.example.com".parse().unwrap();
/// assert_eq!(name.wire_len(), 17);
/// assert_eq!(name.to_string(), "www.example.com.");
///
/// // Case-insensitive comparison
/// let upper: Name = "WWW.EXAMPLE.COM".parse().unwrap();
/// assert_eq!(name, upper);
/// ```
#[derive(Clone)]
pub struct Name {
    /// Uncompressed wire form, including the terminating zero octet.
    wire: SmallVec<[u8; 64]>,
}

impl Name {
    /// Creates the root domain name.
    pub fn root() -> Self {
        let mut wire = SmallVec::new();
        wire.push(0);
        Self { wire }
    }

    /// Returns true if this is the root domain.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.wire.len() == 1
    }

    /// Returns the wire format representation, including the root octet.
    #[inline]
    pub fn as_wire(&self) -> &[u8] {
        &self.wire
    }

    /// Returns the wire format length.
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.wire.len()
    }

    /// Returns the number of labels, excluding the root.
    pub fn label_count(&self) -> usize {
        self.labels().count()
    }

    /// Returns an iterator over the labels, excluding the root.
    #[inline]
    pub fn labels(&self) -> LabelIter<'_> {
        LabelIter {
            wire: &self.wire,
            pos: 0,
        }
    }

    /// Decodes a name from wire format.
    ///
    /// Reads length-prefixed labels until the terminating zero octet.
    ///
    /// # Errors
    ///
    /// - [`Error::TruncatedName`] if the buffer ends before the root label
    /// - [`Error::UnsupportedCompression`] on a compression pointer marker
    /// - [`Error::InvalidName`] on a reserved label type (`0x40`-`0xBF`)
    /// - [`Error::NameTooLong`] if the accumulated wire form would exceed
    ///   255 octets
    pub fn parse(reader: &mut WireReader<'_>) -> Result<Self> {
        let mut wire = SmallVec::<[u8; 64]>::new();

        loop {
            let offset = reader.position();
            let len_byte = reader
                .read_u8()
                .map_err(|_| Error::truncated_name(offset))?;

            // Root label ends the name
            if len_byte == 0 {
                wire.push(0);
                break;
            }

            // Top two bits set: compression pointer (not resolved here)
            if len_byte >= 0xC0 {
                return Err(Error::UnsupportedCompression { offset });
            }

            // 0x40-0xBF are reserved extended label types
            if len_byte > MAX_LABEL_LENGTH as u8 {
                return Err(Error::invalid_name(format!(
                    "reserved label type 0x{len_byte:02X} at offset {offset}"
                )));
            }

            let len = len_byte as usize;
            if wire.len() + 1 + len + 1 > MAX_NAME_LENGTH {
                return Err(Error::name_too_long(wire.len() + 1 + len + 1));
            }

            let label = reader
                .read_bytes(len)
                .map_err(|_| Error::truncated_name(reader.position()))?;
            wire.push(len_byte);
            wire.extend_from_slice(label);
        }

        Ok(Self { wire })
    }

    /// Writes the name in wire format to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.wire);
    }
}

impl FromStr for Name {
    type Err = Error;

    /// Encodes a domain name from its dotted string form.
    ///
    /// A trailing dot (fully-qualified form) is accepted and implied when
    /// absent. The empty string and `"."` encode to the root name.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s == "." {
            return Ok(Self::root());
        }

        let s = s.strip_suffix('.').unwrap_or(s);
        let mut wire = SmallVec::<[u8; 64]>::new();

        for part in s.split('.') {
            if part.is_empty() {
                return Err(Error::invalid_name("empty label"));
            }
            if part.len() > MAX_LABEL_LENGTH {
                return Err(Error::invalid_name(format!(
                    "label \"{part}\" is {} bytes, maximum is {MAX_LABEL_LENGTH}",
                    part.len()
                )));
            }

            // Alphanumerics, hyphen, underscore, and asterisk (wildcards)
            for c in part.chars() {
                if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '*' {
                    return Err(Error::invalid_name(format!(
                        "invalid character {c:?} in label \"{part}\""
                    )));
                }
            }

            wire.push(part.len() as u8);
            wire.extend_from_slice(part.as_bytes());
        }

        wire.push(0);

        if wire.len() > MAX_NAME_LENGTH {
            return Err(Error::name_too_long(wire.len()));
        }

        Ok(Self { wire })
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, ".");
        }
        for label in self.labels() {
            write!(f, "{}.", String::from_utf8_lossy(label))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name(\"{self}\")")
    }
}

impl PartialEq for Name {
    /// Case-insensitive comparison per DNS semantics.
    ///
    /// Length octets are never in the ASCII letter range (they are at most
    /// 63), so a byte-wise case-folded comparison of the wire form is exact.
    fn eq(&self, other: &Self) -> bool {
        self.wire.len() == other.wire.len()
            && self
                .wire
                .iter()
                .zip(other.wire.iter())
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in &self.wire {
            byte.to_ascii_lowercase().hash(state);
        }
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::root()
    }
}

impl Serialize for Name {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = Cow::<str>::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Iterator over the labels of a [`Name`], excluding the root.
#[derive(Debug, Clone)]
pub struct LabelIter<'a> {
    wire: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for LabelIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let len = *self.wire.get(self.pos)? as usize;
        if len == 0 {
            return None;
        }
        let start = self.pos + 1;
        let label = self.wire.get(start..start + len)?;
        self.pos = start + len;
        Some(label)
    }
}
