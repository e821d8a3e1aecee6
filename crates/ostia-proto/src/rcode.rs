//! DNS response codes (RCODEs).

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// DNS response code.
///
/// The 4-bit RCODE field in the DNS header indicates the status of the
/// response. Only the header codes are represented here; the extended
/// EDNS0 range is out of scope for this client.
///
/// See RFC 1035 Section 4.1.1 and RFC 6895.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u8)]
pub enum ResponseCode {
    /// No error condition - RFC 1035
    NoError = 0,

    /// Format error - RFC 1035
    ///
    /// The name server was unable to interpret the query.
    FormErr = 1,

    /// Server failure - RFC 1035
    ServFail = 2,

    /// Name error (NXDOMAIN) - RFC 1035
    ///
    /// The domain name referenced in the query does not exist.
    NXDomain = 3,

    /// Not implemented - RFC 1035
    NotImp = 4,

    /// Query refused - RFC 1035
    Refused = 5,

    /// Name exists when it should not - RFC 2136
    YXDomain = 6,

    /// RR set exists when it should not - RFC 2136
    YXRRSet = 7,

    /// RR set that should exist does not - RFC 2136
    NXRRSet = 8,

    /// Server not authoritative for zone - RFC 2136
    NotAuth = 9,

    /// Name not contained in zone - RFC 2136
    NotZone = 10,

    /// DSO-TYPE not implemented - RFC 8490
    DsoTypeNI = 11,
}

impl ResponseCode {
    /// Returns the numeric value of the response code.
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Creates a response code from its numeric value.
    ///
    /// Returns `None` for the reserved values 12-15.
    #[inline]
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::try_from(value).ok()
    }

    /// Returns true if this code indicates success.
    #[inline]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::NoError)
    }

    /// Returns true if this is an NXDOMAIN response.
    #[inline]
    pub const fn is_nxdomain(self) -> bool {
        matches!(self, Self::NXDomain)
    }

    /// Returns true if this code indicates a server-side failure.
    #[inline]
    pub const fn is_server_error(self) -> bool {
        matches!(self, Self::ServFail)
    }

    /// Returns the human-readable name of the response code.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoError => "NOERROR",
            Self::FormErr => "FORMERR",
            Self::ServFail => "SERVFAIL",
            Self::NXDomain => "NXDOMAIN",
            Self::NotImp => "NOTIMP",
            Self::Refused => "REFUSED",
            Self::YXDomain => "YXDOMAIN",
            Self::YXRRSet => "YXRRSET",
            Self::NXRRSet => "NXRRSET",
            Self::NotAuth => "NOTAUTH",
            Self::NotZone => "NOTZONE",
            Self::DsoTypeNI => "DSOTYPENI",
        }
    }
}

impl std::fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Default for ResponseCode {
    fn default() -> Self {
        Self::NoError
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rcode_values() {
        assert_eq!(ResponseCode::NoError.to_u8(), 0);
        assert_eq!(ResponseCode::NXDomain.to_u8(), 3);
        assert_eq!(ResponseCode::Refused.to_u8(), 5);
    }

    #[test]
    fn test_rcode_from_u8() {
        assert_eq!(ResponseCode::from_u8(0), Some(ResponseCode::NoError));
        assert_eq!(ResponseCode::from_u8(2), Some(ResponseCode::ServFail));
        assert_eq!(ResponseCode::from_u8(12), None); // Reserved
    }

    #[test]
    fn test_rcode_predicates() {
        assert!(ResponseCode::NoError.is_success());
        assert!(ResponseCode::NXDomain.is_nxdomain());
        assert!(ResponseCode::ServFail.is_server_error());
        assert!(!ResponseCode::Refused.is_success());
    }

    #[test]
    fn test_rcode_display() {
        assert_eq!(ResponseCode::NoError.to_string(), "NOERROR");
        assert_eq!(ResponseCode::NXDomain.to_string(), "NXDOMAIN");
    }
}
