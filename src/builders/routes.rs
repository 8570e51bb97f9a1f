// Copyright (c) 2025 - Cowboy AI, Inc.
//! Static routes

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{ComponentKind, ComponentScope};
use crate::coerce::{self, Input, Record};
use crate::domain::{Cidr, NetworkIdentity, Priority};
use crate::errors::{RecordKind, RecordLocator, SchemaAmbiguityWarning, ValidationResult};

/// Gateway a route points at when `next_hop_internet` is set
pub const DEFAULT_INTERNET_GATEWAY: &str = "default-internet-gateway";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    /// Derived from the network name and position when absent or empty
    pub name: Option<String>,
    pub destination_range: Cidr,
    /// Comma-separated instance tags
    pub tags: Option<String>,
    pub next_hop_internet: bool,
    pub next_hop_ip: Option<String>,
    pub description: Option<String>,
    pub next_hop_instance: Option<String>,
    pub next_hop_instance_zone: Option<String>,
    pub next_hop_vpn_tunnel: Option<String>,
    pub next_hop_ilb: Option<String>,
    pub priority: Priority,
}

impl RouteRecord {
    pub fn new(destination_range: Cidr) -> Self {
        Self {
            name: None,
            destination_range,
            tags: None,
            next_hop_internet: false,
            next_hop_ip: None,
            description: None,
            next_hop_instance: None,
            next_hop_instance_zone: None,
            next_hop_vpn_tunnel: None,
            next_hop_ilb: None,
            priority: Priority::DEFAULT,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn next_hop_internet(mut self) -> Self {
        self.next_hop_internet = true;
        self
    }

    pub fn next_hop_ip(mut self, ip: impl Into<String>) -> Self {
        self.next_hop_ip = Some(ip.into());
        self
    }

    pub fn next_hop_instance(mut self, instance: impl Into<String>, zone: impl Into<String>) -> Self {
        self.next_hop_instance = Some(instance.into());
        self.next_hop_instance_zone = Some(zone.into());
        self
    }

    pub fn next_hop_vpn_tunnel(mut self, tunnel: impl Into<String>) -> Self {
        self.next_hop_vpn_tunnel = Some(tunnel.into());
        self
    }

    pub fn next_hop_ilb(mut self, ilb: impl Into<String>) -> Self {
        self.next_hop_ilb = Some(ilb.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Names of the next-hop fields that are set
    pub fn next_hops(&self) -> Vec<&'static str> {
        let mut hops = Vec::new();
        if self.next_hop_internet {
            hops.push("next_hop_internet");
        }
        if self.next_hop_ip.is_some() {
            hops.push("next_hop_ip");
        }
        if self.next_hop_instance.is_some() {
            hops.push("next_hop_instance");
        }
        if self.next_hop_vpn_tunnel.is_some() {
            hops.push("next_hop_vpn_tunnel");
        }
        if self.next_hop_ilb.is_some() {
            hops.push("next_hop_ilb");
        }
        hops
    }

    /// Only one next hop is honored by the provider; more is ambiguous
    pub fn ambiguity(&self) -> Option<SchemaAmbiguityWarning> {
        let hops = self.next_hops();
        (hops.len() > 1).then_some(SchemaAmbiguityWarning::MultipleNextHops { hops })
    }
}

impl From<RouteRecord> for Input<RouteRecord> {
    fn from(record: RouteRecord) -> Self {
        Input::Typed(record)
    }
}

#[derive(Debug, Deserialize)]
pub struct RawRouteRecord {
    name: Option<String>,
    destination_range: Option<String>,
    tags: Option<String>,
    #[serde(default, deserialize_with = "coerce::flag")]
    next_hop_internet: Option<bool>,
    next_hop_ip: Option<String>,
    description: Option<String>,
    next_hop_instance: Option<String>,
    next_hop_instance_zone: Option<String>,
    next_hop_vpn_tunnel: Option<String>,
    next_hop_ilb: Option<String>,
    #[serde(default, deserialize_with = "coerce::integer")]
    priority: Option<i64>,
}

impl Record for RouteRecord {
    const KIND: RecordKind = RecordKind::Route;
    const NAME_KEY: Option<&'static str> = Some("name");
    type Raw = RawRouteRecord;

    fn from_raw(raw: RawRouteRecord, locator: &RecordLocator) -> ValidationResult<Self> {
        Ok(Self {
            name: raw.name,
            destination_range: coerce::required_cidr(
                raw.destination_range,
                locator,
                "destination_range",
            )?,
            tags: raw.tags,
            next_hop_internet: raw.next_hop_internet.unwrap_or(false),
            next_hop_ip: raw.next_hop_ip,
            description: raw.description,
            next_hop_instance: raw.next_hop_instance,
            next_hop_instance_zone: raw.next_hop_instance_zone,
            next_hop_vpn_tunnel: raw.next_hop_vpn_tunnel,
            next_hop_ilb: raw.next_hop_ilb,
            priority: coerce::priority(raw.priority, locator, "priority")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    pub resource_name: String,
    pub parent: ComponentScope,
    pub name: String,
    pub project: String,
    pub network: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub dest_range: Cidr,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_hop_gateway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_hop_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_hop_instance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_hop_instance_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_hop_vpn_tunnel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_hop_ilb: Option<String>,
    pub priority: Priority,
}

/// Split a comma-separated tag list, dropping blanks
pub fn parse_tags(tags: Option<&str>) -> Vec<String> {
    tags.map(|tags| {
        tags.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Name given to a route that has none
pub fn derived_route_name(network_name: &str, index: usize) -> String {
    format!("route-{}-{}", network_name, index)
}

#[derive(Debug, Clone)]
pub struct RouteBuilder {
    scope: ComponentScope,
}

impl RouteBuilder {
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            scope: ComponentScope::new(ComponentKind::Routes, component_name),
        }
    }

    pub fn scope(&self) -> &ComponentScope {
        &self.scope
    }

    pub fn build<I, R>(
        &self,
        identity: &NetworkIdentity,
        routes: I,
    ) -> ValidationResult<Vec<RouteDescriptor>>
    where
        I: IntoIterator<Item = R>,
        R: Into<Input<RouteRecord>>,
    {
        let descriptors = routes
            .into_iter()
            .enumerate()
            .map(|(index, input)| {
                let locator = RecordLocator::at(RecordKind::Route, index);
                let route = coerce::coerce(input.into(), locator)?;
                Ok(self.descriptor(identity, index, route))
            })
            .collect::<ValidationResult<Vec<_>>>()?;

        debug!("{}: built {} route(s)", self.scope, descriptors.len());
        Ok(descriptors)
    }

    fn descriptor(
        &self,
        identity: &NetworkIdentity,
        index: usize,
        route: RouteRecord,
    ) -> RouteDescriptor {
        let name = route
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| derived_route_name(&identity.network_name, index));

        if let Some(warning) = route.ambiguity() {
            warn!("{}: route #{} '{}': {}", self.scope, index, name, warning);
        }

        RouteDescriptor {
            resource_name: format!("route-{}", index),
            parent: self.scope.clone(),
            name,
            project: identity.project_id.clone(),
            network: identity.network_name.clone(),
            description: route.description,
            tags: parse_tags(route.tags.as_deref()),
            dest_range: route.destination_range,
            next_hop_gateway: route
                .next_hop_internet
                .then(|| DEFAULT_INTERNET_GATEWAY.to_string()),
            next_hop_ip: route.next_hop_ip,
            next_hop_instance: route.next_hop_instance,
            next_hop_instance_zone: route.next_hop_instance_zone,
            next_hop_vpn_tunnel: route.next_hop_vpn_tunnel,
            next_hop_ilb: route.next_hop_ilb,
            priority: route.priority,
        }
    }
}

impl Default for RouteBuilder {
    fn default() -> Self {
        Self::new("route")
    }
}
