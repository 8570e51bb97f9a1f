// Copyright (c) 2025 - Cowboy AI, Inc.
//! Closed enumerations for network settings
//!
//! Raw records carry these as plain strings. Coercion maps them onto the
//! closed sets below with [`parse`](RoutingMode::parse); anything else is
//! rejected with the list of accepted values taken from `VARIANTS`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dynamic routing scope of a VPC network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingMode {
    #[default]
    Global,
    Regional,
}

impl RoutingMode {
    pub const VARIANTS: &'static [&'static str] = &["GLOBAL", "REGIONAL"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "GLOBAL",
            Self::Regional => "REGIONAL",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "GLOBAL" => Some(Self::Global),
            "REGIONAL" => Some(Self::Regional),
            _ => None,
        }
    }
}

/// Aggregation interval for subnet flow logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlowLogInterval {
    #[default]
    #[serde(rename = "INTERVAL_5_SEC")]
    Interval5Sec,
    #[serde(rename = "INTERVAL_30_SEC")]
    Interval30Sec,
    #[serde(rename = "INTERVAL_1_MIN")]
    Interval1Min,
    #[serde(rename = "INTERVAL_5_MIN")]
    Interval5Min,
    #[serde(rename = "INTERVAL_10_MIN")]
    Interval10Min,
    #[serde(rename = "INTERVAL_15_MIN")]
    Interval15Min,
}

impl FlowLogInterval {
    pub const VARIANTS: &'static [&'static str] = &[
        "INTERVAL_5_SEC",
        "INTERVAL_30_SEC",
        "INTERVAL_1_MIN",
        "INTERVAL_5_MIN",
        "INTERVAL_10_MIN",
        "INTERVAL_15_MIN",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interval5Sec => "INTERVAL_5_SEC",
            Self::Interval30Sec => "INTERVAL_30_SEC",
            Self::Interval1Min => "INTERVAL_1_MIN",
            Self::Interval5Min => "INTERVAL_5_MIN",
            Self::Interval10Min => "INTERVAL_10_MIN",
            Self::Interval15Min => "INTERVAL_15_MIN",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "INTERVAL_5_SEC" => Some(Self::Interval5Sec),
            "INTERVAL_30_SEC" => Some(Self::Interval30Sec),
            "INTERVAL_1_MIN" => Some(Self::Interval1Min),
            "INTERVAL_5_MIN" => Some(Self::Interval5Min),
            "INTERVAL_10_MIN" => Some(Self::Interval10Min),
            "INTERVAL_15_MIN" => Some(Self::Interval15Min),
            _ => None,
        }
    }
}

/// Metadata inclusion for subnet flow logs and firewall rule logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogMetadata {
    ExcludeAllMetadata,
    #[default]
    IncludeAllMetadata,
}

impl LogMetadata {
    pub const VARIANTS: &'static [&'static str] =
        &["EXCLUDE_ALL_METADATA", "INCLUDE_ALL_METADATA"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExcludeAllMetadata => "EXCLUDE_ALL_METADATA",
            Self::IncludeAllMetadata => "INCLUDE_ALL_METADATA",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "EXCLUDE_ALL_METADATA" => Some(Self::ExcludeAllMetadata),
            "INCLUDE_ALL_METADATA" => Some(Self::IncludeAllMetadata),
            _ => None,
        }
    }
}

/// Traffic direction a firewall rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Filters by source range
    #[default]
    Ingress,
    /// Filters by destination range
    Egress,
}

impl Direction {
    pub const VARIANTS: &'static [&'static str] = &["INGRESS", "EGRESS"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ingress => "INGRESS",
            Self::Egress => "EGRESS",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "INGRESS" => Some(Self::Ingress),
            "EGRESS" => Some(Self::Egress),
            _ => None,
        }
    }
}

impl fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FlowLogInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LogMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
