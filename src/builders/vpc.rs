// Copyright (c) 2025 - Cowboy AI, Inc.
//! VPC network container
//!
//! Produces the network descriptor and, for shared-VPC host projects, the
//! host-project registration. The registration is omitted entirely when
//! the project is not a host.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ComponentKind, ComponentScope};
use crate::coerce::{self, Input, Record};
use crate::domain::{NetworkIdentity, RoutingMode};
use crate::errors::{RecordKind, RecordLocator, ValidationResult, Violation};

/// Settings of the VPC network itself
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VpcSpec {
    pub routing_mode: RoutingMode,
    pub shared_vpc_host: bool,
    pub description: Option<String>,
    pub auto_create_subnetworks: bool,
    pub delete_default_routes: bool,
    /// 0 leaves the provider default in place
    pub mtu: u32,
}

impl VpcSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routing_mode(mut self, routing_mode: RoutingMode) -> Self {
        self.routing_mode = routing_mode;
        self
    }

    pub fn shared_vpc_host(mut self, shared_vpc_host: bool) -> Self {
        self.shared_vpc_host = shared_vpc_host;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn auto_create_subnetworks(mut self, auto_create: bool) -> Self {
        self.auto_create_subnetworks = auto_create;
        self
    }

    pub fn delete_default_routes(mut self, delete: bool) -> Self {
        self.delete_default_routes = delete;
        self
    }

    pub fn mtu(mut self, mtu: u32) -> Self {
        self.mtu = mtu;
        self
    }
}

impl From<VpcSpec> for Input<VpcSpec> {
    fn from(spec: VpcSpec) -> Self {
        Input::Typed(spec)
    }
}

#[derive(Debug, Deserialize)]
pub struct RawVpcSpec {
    #[serde(default)]
    routing_mode: Option<String>,
    #[serde(default, deserialize_with = "coerce::flag")]
    shared_vpc_host: Option<bool>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, deserialize_with = "coerce::flag")]
    auto_create_subnetworks: Option<bool>,
    #[serde(
        default,
        alias = "delete_default_internet_gateway_routes",
        deserialize_with = "coerce::flag"
    )]
    delete_default_routes: Option<bool>,
    #[serde(default, deserialize_with = "coerce::integer")]
    mtu: Option<i64>,
}

impl Record for VpcSpec {
    const KIND: RecordKind = RecordKind::Vpc;
    const NAME_KEY: Option<&'static str> = None;
    type Raw = RawVpcSpec;

    fn from_raw(raw: RawVpcSpec, locator: &RecordLocator) -> ValidationResult<Self> {
        let routing_mode = coerce::enumeration(
            raw.routing_mode,
            RoutingMode::parse,
            RoutingMode::VARIANTS,
            locator,
            "routing_mode",
        )?;

        let mtu = match raw.mtu {
            None => 0,
            Some(mtu) => u32::try_from(mtu).map_err(|_| {
                locator.error(
                    "mtu",
                    Violation::IntegerOutOfRange {
                        value: mtu,
                        min: 0,
                        max: i64::from(u32::MAX),
                    },
                )
            })?,
        };

        Ok(Self {
            routing_mode,
            shared_vpc_host: raw.shared_vpc_host.unwrap_or(false),
            description: raw.description,
            auto_create_subnetworks: raw.auto_create_subnetworks.unwrap_or(false),
            delete_default_routes: raw.delete_default_routes.unwrap_or(false),
            mtu,
        })
    }
}

/// Network container descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkDescriptor {
    pub resource_name: String,
    pub parent: ComponentScope,
    pub name: String,
    pub project: String,
    pub routing_mode: RoutingMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub auto_create_subnetworks: bool,
    pub delete_default_routes_on_create: bool,
    pub mtu: u32,
}

/// Shared-VPC host project registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedVpcHostDescriptor {
    pub resource_name: String,
    pub parent: ComponentScope,
    pub project: String,
}

/// Output of [`VpcBuilder::build`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VpcResources {
    pub network: NetworkDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_vpc_host: Option<SharedVpcHostDescriptor>,
}

/// Builds the VPC network descriptor
#[derive(Debug, Clone)]
pub struct VpcBuilder {
    scope: ComponentScope,
}

impl VpcBuilder {
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            scope: ComponentScope::new(ComponentKind::Vpc, component_name),
        }
    }

    pub fn scope(&self) -> &ComponentScope {
        &self.scope
    }

    pub fn build(
        &self,
        identity: &NetworkIdentity,
        spec: impl Into<Input<VpcSpec>>,
    ) -> ValidationResult<VpcResources> {
        let spec = coerce::coerce(spec.into(), RecordLocator::new(RecordKind::Vpc))?;

        let network = NetworkDescriptor {
            resource_name: "vpc".to_string(),
            parent: self.scope.clone(),
            name: identity.network_name.clone(),
            project: identity.project_id.clone(),
            routing_mode: spec.routing_mode,
            description: spec.description,
            auto_create_subnetworks: spec.auto_create_subnetworks,
            delete_default_routes_on_create: spec.delete_default_routes,
            mtu: spec.mtu,
        };

        let shared_vpc_host = spec.shared_vpc_host.then(|| SharedVpcHostDescriptor {
            resource_name: "shared_vpc_host".to_string(),
            parent: self.scope.clone(),
            project: identity.project_id.clone(),
        });

        debug!(
            "Built network {} in project {} (shared host: {})",
            network.name,
            network.project,
            shared_vpc_host.is_some()
        );

        Ok(VpcResources {
            network,
            shared_vpc_host,
        })
    }
}

impl Default for VpcBuilder {
    fn default() -> Self {
        Self::new("vpc")
    }
}
