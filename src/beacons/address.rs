//! Canonical beacon MAC addresses
//!
//! The string form of an address is load-bearing: it names the beacon's
//! content folder on disk and keys its entry in `metadata.json`. Parse and
//! format therefore round-trip exactly, normalizing to upper-case
//! colon-separated form (`AA:BB:CC:DD:EE:01`).

use crate::error::{Error, Result};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 48-bit beacon MAC address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// Create an address from raw octets
    pub fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// The raw octets of this address
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Parse an address from its string form.
    ///
    /// Accepts six colon-separated hex octets in either case; anything
    /// else fails with [`Error::InvalidAddress`].
    pub fn parse(s: &str) -> Result<Self> {
        let mut octets = [0u8; 6];
        let mut count = 0;

        for part in s.split(':') {
            if count == 6 {
                return Err(Error::InvalidAddress(s.to_string()));
            }
            if part.len() != 2 {
                return Err(Error::InvalidAddress(s.to_string()));
            }
            octets[count] = u8::from_str_radix(part, 16)
                .map_err(|_| Error::InvalidAddress(s.to_string()))?;
            count += 1;
        }

        if count != 6 {
            return Err(Error::InvalidAddress(s.to_string()));
        }

        Ok(Self(octets))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl FromStr for MacAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for MacAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MacAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format_round_trip() {
        let addr = MacAddress::parse("AA:BB:CC:DD:EE:01").unwrap();
        assert_eq!(addr.to_string(), "AA:BB:CC:DD:EE:01");
    }

    #[test]
    fn test_parse_normalizes_case() {
        let lower = MacAddress::parse("aa:bb:cc:dd:ee:ff").unwrap();
        let upper = MacAddress::parse("AA:BB:CC:DD:EE:FF").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.to_string(), "AA:BB:CC:DD:EE:FF");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(MacAddress::parse("").is_err());
        assert!(MacAddress::parse("AA:BB:CC:DD:EE").is_err());
        assert!(MacAddress::parse("AA:BB:CC:DD:EE:FF:00").is_err());
        assert!(MacAddress::parse("AA:BB:CC:DD:EE:GG").is_err());
        assert!(MacAddress::parse("AABBCCDDEEFF").is_err());
        assert!(MacAddress::parse("AA:BB:CC:DD:EE:F").is_err());
        assert!(MacAddress::parse("not an address").is_err());
    }

    #[test]
    fn test_octets_round_trip() {
        let addr = MacAddress::new([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0x01]);
        assert_eq!(addr.octets(), [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0x01]);
        assert_eq!(MacAddress::parse(&addr.to_string()).unwrap(), addr);
    }

    #[test]
    fn test_serde_as_string() {
        let addr = MacAddress::parse("AA:BB:CC:DD:EE:02").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"AA:BB:CC:DD:EE:02\"");

        let back: MacAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);

        let bad: std::result::Result<MacAddress, _> = serde_json::from_str("\"nope\"");
        assert!(bad.is_err());
    }
}
