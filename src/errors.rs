// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for network composition
//!
//! Every failure raised while coercing a raw record names the record
//! (kind, position, name) and the field that broke a constraint.

use std::fmt;
use thiserror::Error;

use crate::domain::CidrError;

/// Result type for coercion and build operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The kind of record a validation failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Vpc,
    Subnet,
    SecondaryRange,
    Route,
    FirewallRule,
    NetworkDocument,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::Vpc => "vpc",
            RecordKind::Subnet => "subnet",
            RecordKind::SecondaryRange => "secondary range",
            RecordKind::Route => "route",
            RecordKind::FirewallRule => "firewall rule",
            RecordKind::NetworkDocument => "network document",
        };
        f.write_str(label)
    }
}

/// Identifies the record that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLocator {
    pub kind: RecordKind,

    /// 0-based position in the input list, absent for singleton records
    pub position: Option<usize>,

    /// Record name, when the raw input carried one
    pub name: Option<String>,

    /// Owning subnet for secondary ranges
    pub owner: Option<String>,
}

impl RecordLocator {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            position: None,
            name: None,
            owner: None,
        }
    }

    pub fn at(kind: RecordKind, position: usize) -> Self {
        Self {
            position: Some(position),
            ..Self::new(kind)
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Build a validation error for `field` on this record
    pub fn error(&self, field: impl Into<String>, violation: Violation) -> ValidationError {
        ValidationError {
            record: self.clone(),
            field: field.into(),
            violation,
        }
    }
}

impl fmt::Display for RecordLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(position) = self.position {
            write!(f, " #{}", position)?;
        }
        if let Some(name) = &self.name {
            write!(f, " '{}'", name)?;
        }
        if let Some(owner) = &self.owner {
            write!(f, " of subnet '{}'", owner)?;
        }
        Ok(())
    }
}

/// The constraint a field failed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("is required")]
    Missing,

    #[error("is not a valid CIDR range: {0}")]
    InvalidCidr(#[from] CidrError),

    #[error("has unknown value '{value}' (expected one of: {})", expected.join(", "))]
    UnknownVariant {
        value: String,
        expected: &'static [&'static str],
    },

    #[error("value {value} is outside [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },

    #[error("value {value} is outside [{min}, {max}]")]
    IntegerOutOfRange { value: i64, min: i64, max: i64 },

    #[error("is malformed: {0}")]
    Malformed(String),

    #[error("duplicates an earlier record keyed '{0}'")]
    Duplicate(String),
}

/// A raw record failed schema coercion
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid {record}: field `{field}` {violation}")]
pub struct ValidationError {
    pub record: RecordLocator,
    pub field: String,
    pub violation: Violation,
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Non-fatal findings about records that are valid but ambiguous
///
/// These are logged and never fail a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaAmbiguityWarning {
    /// More than one next hop is set on a single route
    MultipleNextHops { hops: Vec<&'static str> },

    /// A firewall rule has neither allow nor deny entries
    NoFirewallAction,

    /// Secondary ranges are keyed by a subnet name no subnet carries
    OrphanSecondaryRanges { subnet_name: String },
}

impl fmt::Display for SchemaAmbiguityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaAmbiguityWarning::MultipleNextHops { hops } => {
                write!(f, "multiple next hops set: {}", hops.join(", "))
            }
            SchemaAmbiguityWarning::NoFirewallAction => {
                write!(f, "neither allow nor deny entries are set")
            }
            SchemaAmbiguityWarning::OrphanSecondaryRanges { subnet_name } => {
                write!(f, "secondary ranges for unknown subnet '{}'", subnet_name)
            }
        }
    }
}
