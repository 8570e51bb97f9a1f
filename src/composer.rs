// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network composition
//!
//! A composition runs the four leaf builders against one
//! [`NetworkIdentity`] and returns their descriptors unchanged. There is no
//! cross-builder validation; the first failing builder fails the whole
//! composition.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::info;

use crate::builders::{
    ComponentKind, ComponentScope, FirewallRuleBuilder, FirewallRuleDescriptor,
    FirewallRuleRecord, RouteBuilder, RouteDescriptor, RouteRecord, SecondaryRanges,
    SubnetBuilder, SubnetDescriptor, SubnetRecord, VpcBuilder, VpcResources, VpcSpec,
};
use crate::coerce::Input;
use crate::config::ComposerConfig;
use crate::domain::{CompositionId, NetworkIdentity};
use crate::errors::{RecordKind, RecordLocator, ValidationResult, Violation};

/// Everything a composition builds from
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkInputs {
    pub vpc: Input<VpcSpec>,
    pub subnets: Vec<Input<SubnetRecord>>,
    pub secondary_ranges: SecondaryRanges,
    pub routes: Vec<Input<RouteRecord>>,
    pub firewall_rules: Vec<Input<FirewallRuleRecord>>,
}

impl Default for NetworkInputs {
    fn default() -> Self {
        Self {
            vpc: Input::Typed(VpcSpec::default()),
            subnets: Vec::new(),
            secondary_ranges: SecondaryRanges::new(),
            routes: Vec::new(),
            firewall_rules: Vec::new(),
        }
    }
}

impl NetworkInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vpc(mut self, vpc: impl Into<Input<VpcSpec>>) -> Self {
        self.vpc = vpc.into();
        self
    }

    pub fn subnet(mut self, subnet: impl Into<Input<SubnetRecord>>) -> Self {
        self.subnets.push(subnet.into());
        self
    }

    pub fn secondary_ranges(mut self, secondary_ranges: SecondaryRanges) -> Self {
        self.secondary_ranges = secondary_ranges;
        self
    }

    pub fn route(mut self, route: impl Into<Input<RouteRecord>>) -> Self {
        self.routes.push(route.into());
        self
    }

    pub fn firewall_rule(mut self, rule: impl Into<Input<FirewallRuleRecord>>) -> Self {
        self.firewall_rules.push(rule.into());
        self
    }
}

/// Descriptors of one composition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeResult {
    pub id: CompositionId,
    pub scope: ComponentScope,
    pub project_id: String,
    pub network_name: String,
    pub vpc: VpcResources,
    pub subnets: Vec<SubnetDescriptor>,
    pub routes: Vec<RouteDescriptor>,
    pub firewall_rules: Vec<FirewallRuleDescriptor>,
}

impl CompositeResult {
    pub fn id(&self) -> CompositionId {
        self.id
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Total number of resources the collaborator will create
    pub fn resource_count(&self) -> usize {
        1 + usize::from(self.vpc.shared_vpc_host.is_some())
            + self.subnets.len()
            + self.routes.len()
            + self.firewall_rules.len()
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Instantiates the leaf builders for one network
#[derive(Debug, Clone)]
pub struct NetworkComposer {
    id: CompositionId,
    scope: ComponentScope,
    identity: NetworkIdentity,
    vpc: VpcBuilder,
    subnets: SubnetBuilder,
    routes: RouteBuilder,
    firewall_rules: FirewallRuleBuilder,
}

impl NetworkComposer {
    pub fn new(resource_name: impl Into<String>, identity: NetworkIdentity) -> Self {
        Self::with_config(resource_name, identity, &ComposerConfig::default())
    }

    pub fn with_config(
        resource_name: impl Into<String>,
        identity: NetworkIdentity,
        config: &ComposerConfig,
    ) -> Self {
        let names = &config.components;
        Self {
            id: CompositionId::new(),
            scope: ComponentScope::new(ComponentKind::Network, resource_name),
            identity,
            vpc: VpcBuilder::new(names.vpc.clone()),
            subnets: SubnetBuilder::new(names.subnets.clone())
                .with_duplicate_policy(config.duplicate_subnets),
            routes: RouteBuilder::new(names.routes.clone()),
            firewall_rules: FirewallRuleBuilder::new(names.firewall_rules.clone()),
        }
    }

    pub fn id(&self) -> CompositionId {
        self.id
    }

    pub fn project_id(&self) -> &str {
        &self.identity.project_id
    }

    pub fn identity(&self) -> &NetworkIdentity {
        &self.identity
    }

    pub fn scope(&self) -> &ComponentScope {
        &self.scope
    }

    pub fn compose(&self, inputs: NetworkInputs) -> ValidationResult<CompositeResult> {
        let identity = &self.identity;

        let vpc = self.vpc.build(identity, inputs.vpc)?;
        let subnets = self
            .subnets
            .build(identity, inputs.subnets, &inputs.secondary_ranges)?;
        let routes = self.routes.build(identity, inputs.routes)?;
        let firewall_rules = self.firewall_rules.build(identity, inputs.firewall_rules)?;

        info!(
            "Composed network {} in project {} ({}): {} subnet(s), {} route(s), {} firewall rule(s)",
            identity.network_name,
            identity.project_id,
            self.id,
            subnets.len(),
            routes.len(),
            firewall_rules.len()
        );

        Ok(CompositeResult {
            id: self.id,
            scope: self.scope.clone(),
            project_id: identity.project_id.clone(),
            network_name: identity.network_name.clone(),
            vpc,
            subnets,
            routes,
            firewall_rules,
        })
    }
}

// ============================================================================
// Whole-network documents
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawNetworkDocument {
    project_id: Option<String>,
    network_name: Option<String>,
    #[serde(default)]
    subnets: Vec<Value>,
    #[serde(default)]
    secondary_ranges: HashMap<String, Vec<Value>>,
    #[serde(default)]
    routes: Vec<Value>,
    #[serde(default)]
    firewall_rules: Vec<Value>,
    /// Remaining keys are the VPC settings
    #[serde(flatten)]
    vpc: Map<String, Value>,
}

/// A whole network described as one raw JSON document
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkDocument {
    pub identity: NetworkIdentity,
    pub inputs: NetworkInputs,
}

impl NetworkDocument {
    pub fn from_json(json: &str) -> ValidationResult<Self> {
        let value: Value = serde_json::from_str(json).map_err(|err| {
            RecordLocator::new(RecordKind::NetworkDocument)
                .error(".", Violation::Malformed(err.to_string()))
        })?;
        Self::from_value(value)
    }

    /// Split a document into identity and raw builder inputs
    ///
    /// Records stay raw; they are coerced by their builders.
    pub fn from_value(value: Value) -> ValidationResult<Self> {
        let locator = RecordLocator::new(RecordKind::NetworkDocument);

        let raw: RawNetworkDocument = serde_path_to_error::deserialize(value).map_err(|err| {
            let field = err.path().to_string();
            locator.error(field, Violation::Malformed(err.into_inner().to_string()))
        })?;

        let project_id = crate::coerce::required_text(raw.project_id, &locator, "project_id")?;
        let network_name =
            crate::coerce::required_text(raw.network_name, &locator, "network_name")?;

        let secondary_ranges = raw
            .secondary_ranges
            .into_iter()
            .map(|(subnet, ranges)| (subnet, ranges.into_iter().map(Input::Raw).collect()))
            .collect();

        Ok(Self {
            identity: NetworkIdentity::new(project_id, network_name),
            inputs: NetworkInputs {
                vpc: Input::Raw(Value::Object(raw.vpc)),
                subnets: raw.subnets.into_iter().map(Input::Raw).collect(),
                secondary_ranges,
                routes: raw.routes.into_iter().map(Input::Raw).collect(),
                firewall_rules: raw.firewall_rules.into_iter().map(Input::Raw).collect(),
            },
        })
    }
}
