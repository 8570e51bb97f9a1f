// Copyright (c) 2025 - Cowboy AI, Inc.
//! Composer configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;

/// Environment variable selecting the [`DuplicateSubnetPolicy`]
pub const DUPLICATE_SUBNETS_ENV: &str = "CIM_NETWORK_DUPLICATE_SUBNETS";

/// What to do with two subnets sharing a `region/name` key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateSubnetPolicy {
    /// Fail the build with a validation error
    #[default]
    Reject,
    /// Keep the later record at the earlier record's position
    LastWins,
}

impl DuplicateSubnetPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::LastWins => "last-wins",
        }
    }
}

impl fmt::Display for DuplicateSubnetPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicateSubnetPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "last-wins" | "last_wins" => Ok(Self::LastWins),
            _ => Err(ConfigError::InvalidValue {
                key: DUPLICATE_SUBNETS_ENV,
                value: s.to_string(),
                reason: "expected 'reject' or 'last-wins'".to_string(),
            }),
        }
    }
}

/// Names of the child components a composition creates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentNames {
    pub vpc: String,
    pub subnets: String,
    pub routes: String,
    pub firewall_rules: String,
}

impl Default for ComponentNames {
    fn default() -> Self {
        Self {
            vpc: "vpc".to_string(),
            subnets: "subnets".to_string(),
            routes: "route".to_string(),
            firewall_rules: "firewall_rules".to_string(),
        }
    }
}

/// Configuration for [`NetworkComposer`](crate::NetworkComposer)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    pub duplicate_subnets: DuplicateSubnetPolicy,
    pub components: ComponentNames,
}

impl ComposerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplicate_subnets(mut self, policy: DuplicateSubnetPolicy) -> Self {
        self.duplicate_subnets = policy;
        self
    }

    pub fn with_components(mut self, components: ComponentNames) -> Self {
        self.components = components;
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let duplicate_subnets = match lookup(DUPLICATE_SUBNETS_ENV) {
            Some(value) => value.parse()?,
            None => DuplicateSubnetPolicy::default(),
        };

        Ok(Self {
            duplicate_subnets,
            ..Self::default()
        })
    }
}
