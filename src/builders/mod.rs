// Copyright (c) 2025 - Cowboy AI, Inc.
//! Leaf builders
//!
//! Each builder coerces its input records, applies defaults and emits one
//! descriptor per record for the provisioning collaborator. Builders are
//! pure: the same input always produces structurally equal output.

pub mod firewall;
pub mod routes;
pub mod subnets;
pub mod vpc;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use firewall::{
    FirewallLogConfig, FirewallRuleBuilder, FirewallRuleDescriptor, FirewallRuleRecord, Ports,
    PortValue, ProtocolPorts,
};
pub use routes::{RouteBuilder, RouteDescriptor, RouteRecord, DEFAULT_INTERNET_GATEWAY};
pub use subnets::{
    FlowLogConfig, FlowSampling, SecondaryRange, SecondaryRanges, SubnetBuilder,
    SubnetDescriptor, SubnetRecord,
};
pub use vpc::{NetworkDescriptor, SharedVpcHostDescriptor, VpcBuilder, VpcResources, VpcSpec};

/// Component kinds that own created resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    #[serde(rename = "cim-network:gcp:Network")]
    Network,
    #[serde(rename = "cim-network:gcp:Vpc")]
    Vpc,
    #[serde(rename = "cim-network:gcp:Subnets")]
    Subnets,
    #[serde(rename = "cim-network:gcp:Routes")]
    Routes,
    #[serde(rename = "cim-network:gcp:FirewallRules")]
    FirewallRules,
}

impl ComponentKind {
    /// Type token the provisioning collaborator registers the component under
    pub fn type_token(&self) -> &'static str {
        match self {
            Self::Network => "cim-network:gcp:Network",
            Self::Vpc => "cim-network:gcp:Vpc",
            Self::Subnets => "cim-network:gcp:Subnets",
            Self::Routes => "cim-network:gcp:Routes",
            Self::FirewallRules => "cim-network:gcp:FirewallRules",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_token())
    }
}

/// Parent/child scoping declaration binding a resource to its component
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentScope {
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub name: String,
}

impl ComponentScope {
    pub fn new(kind: ComponentKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for ComponentScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.kind, self.name)
    }
}
