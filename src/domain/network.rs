// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Value Objects with Validation Invariants

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use thiserror::Error;

/// CIDR validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CidrError {
    #[error("invalid IP address '{0}'")]
    InvalidIpAddress(String),

    #[error("'{0}' has no prefix length")]
    MissingPrefix(String),

    #[error("invalid prefix length in '{0}'")]
    InvalidPrefix(String),

    #[error("prefix length {0} is too long (must be 0-32 for IPv4, 0-128 for IPv6)")]
    PrefixTooLong(u8),
}

/// IP range in CIDR notation
///
/// Invariants:
/// - Valid IPv4 or IPv6 address
/// - Prefix length present and within range for the address family
/// - Displays and serializes exactly as given (trimmed), never re-printed
///
/// # Examples
///
/// ```rust
/// use cim_network::domain::Cidr;
///
/// let cidr = Cidr::new("10.10.20.0/24").unwrap();
/// assert_eq!(cidr.prefix_length(), 24);
/// assert_eq!(cidr.to_string(), "10.10.20.0/24");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cidr {
    address: IpAddr,
    prefix_length: u8,
    text: String,
}

impl Cidr {
    /// Parse `address/prefix` notation
    pub fn new(cidr: impl AsRef<str>) -> Result<Self, CidrError> {
        let cidr = cidr.as_ref().trim();

        let (addr_str, prefix_str) = cidr
            .split_once('/')
            .ok_or_else(|| CidrError::MissingPrefix(cidr.to_string()))?;

        let address = IpAddr::from_str(addr_str)
            .map_err(|_| CidrError::InvalidIpAddress(addr_str.to_string()))?;

        let prefix_length = prefix_str
            .parse::<u8>()
            .map_err(|_| CidrError::InvalidPrefix(cidr.to_string()))?;

        let max_prefix = match address {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };

        if prefix_length > max_prefix {
            return Err(CidrError::PrefixTooLong(prefix_length));
        }

        Ok(Self {
            address,
            prefix_length,
            text: cidr.to_string(),
        })
    }

    pub fn address(&self) -> IpAddr {
        self.address
    }

    pub fn prefix_length(&self) -> u8 {
        self.prefix_length
    }

    pub fn is_ipv4(&self) -> bool {
        matches!(self.address, IpAddr::V4(_))
    }

    pub fn is_ipv6(&self) -> bool {
        matches!(self.address, IpAddr::V6(_))
    }

    /// The range as it was written
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Cidr {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Cidr {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Cidr {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Cidr::new(&raw).map_err(serde::de::Error::custom)
    }
}

/// Rule/route priority
///
/// Invariants:
/// - Value within 0-65535; lower values take precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(u16);

impl Priority {
    pub const MIN: i64 = 0;

    pub const MAX: i64 = 65535;

    pub const DEFAULT: Priority = Priority(1000);

    /// Create a priority, returning the rejected value when out of range
    pub fn new(value: i64) -> Result<Self, i64> {
        u16::try_from(value).map(Self).map_err(|_| value)
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u16> for Priority {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
