// Copyright (c) 2025 - Cowboy AI, Inc.
//! Firewall rules
//!
//! A rule's `ranges` are routed by direction: ingress rules filter on the
//! source of traffic, egress rules on its destination. The other side is
//! left absent.
//!
//! `allow`/`deny` are three-valued. An absent list stays absent in the
//! descriptor, an explicit empty list stays empty.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{ComponentKind, ComponentScope};
use crate::coerce::{self, Input, Record};
use crate::domain::{Cidr, Direction, LogMetadata, NetworkIdentity, Priority};
use crate::errors::{
    RecordKind, RecordLocator, SchemaAmbiguityWarning, ValidationResult, Violation,
};

// ============================================================================
// Records
// ============================================================================

/// A single port or port range (`22`, `"8080-8090"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    Number(i64),
    Text(String),
}

/// Ports as given: one value or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ports {
    One(PortValue),
    Many(Vec<PortValue>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtocolPorts {
    pub protocol: String,
    pub ports: Ports,
}

impl ProtocolPorts {
    pub fn new(protocol: impl Into<String>, ports: Ports) -> Self {
        Self {
            protocol: protocol.into(),
            ports,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FirewallLogConfig {
    pub metadata: LogMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirewallRuleRecord {
    pub name: String,
    pub description: Option<String>,
    pub direction: Direction,
    pub priority: Priority,
    pub ranges: Vec<Cidr>,
    pub source_tags: Option<Vec<String>>,
    pub source_service_accounts: Option<Vec<String>>,
    pub target_tags: Option<Vec<String>>,
    pub target_service_accounts: Option<Vec<String>>,
    pub allow: Option<Vec<ProtocolPorts>>,
    pub deny: Option<Vec<ProtocolPorts>>,
    pub log_config: Option<FirewallLogConfig>,
}

impl FirewallRuleRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            direction: Direction::default(),
            priority: Priority::DEFAULT,
            ranges: Vec::new(),
            source_tags: None,
            source_service_accounts: None,
            target_tags: None,
            target_service_accounts: None,
            allow: None,
            deny: None,
            log_config: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn ranges(mut self, ranges: Vec<Cidr>) -> Self {
        self.ranges = ranges;
        self
    }

    pub fn source_tags(mut self, tags: Vec<String>) -> Self {
        self.source_tags = Some(tags);
        self
    }

    pub fn target_tags(mut self, tags: Vec<String>) -> Self {
        self.target_tags = Some(tags);
        self
    }

    pub fn allow(mut self, allow: Vec<ProtocolPorts>) -> Self {
        self.allow = Some(allow);
        self
    }

    pub fn deny(mut self, deny: Vec<ProtocolPorts>) -> Self {
        self.deny = Some(deny);
        self
    }

    pub fn log_config(mut self, log_config: FirewallLogConfig) -> Self {
        self.log_config = Some(log_config);
        self
    }

    /// A rule that neither allows nor denies anything is suspicious
    pub fn ambiguity(&self) -> Option<SchemaAmbiguityWarning> {
        let has_entries =
            |list: &Option<Vec<ProtocolPorts>>| list.as_ref().is_some_and(|l| !l.is_empty());
        (!has_entries(&self.allow) && !has_entries(&self.deny))
            .then_some(SchemaAmbiguityWarning::NoFirewallAction)
    }
}

impl From<FirewallRuleRecord> for Input<FirewallRuleRecord> {
    fn from(record: FirewallRuleRecord) -> Self {
        Input::Typed(record)
    }
}

#[derive(Debug, Deserialize)]
pub struct RawProtocolPorts {
    protocol: Option<String>,
    ports: Option<Ports>,
}

#[derive(Debug, Deserialize)]
pub struct RawLogConfig {
    metadata: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawFirewallRuleRecord {
    name: Option<String>,
    description: Option<String>,
    direction: Option<String>,
    #[serde(default, deserialize_with = "coerce::integer")]
    priority: Option<i64>,
    ranges: Option<Vec<String>>,
    source_tags: Option<Vec<String>>,
    source_service_accounts: Option<Vec<String>>,
    target_tags: Option<Vec<String>>,
    target_service_accounts: Option<Vec<String>>,
    #[serde(default, alias = "allows")]
    allow: Option<Vec<RawProtocolPorts>>,
    #[serde(default, alias = "denies")]
    deny: Option<Vec<RawProtocolPorts>>,
    log_config: Option<RawLogConfig>,
}

fn protocol_ports(
    entries: Option<Vec<RawProtocolPorts>>,
    locator: &RecordLocator,
    field: &str,
) -> ValidationResult<Option<Vec<ProtocolPorts>>> {
    let Some(entries) = entries else {
        return Ok(None);
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let protocol = coerce::required_text(
                entry.protocol,
                locator,
                &format!("{}[{}].protocol", field, i),
            )?;
            let ports = entry.ports.ok_or_else(|| {
                locator.error(format!("{}[{}].ports", field, i), Violation::Missing)
            })?;
            Ok(ProtocolPorts { protocol, ports })
        })
        .collect::<ValidationResult<Vec<_>>>()
        .map(Some)
}

impl Record for FirewallRuleRecord {
    const KIND: RecordKind = RecordKind::FirewallRule;
    const NAME_KEY: Option<&'static str> = Some("name");
    type Raw = RawFirewallRuleRecord;

    fn from_raw(raw: RawFirewallRuleRecord, locator: &RecordLocator) -> ValidationResult<Self> {
        let name = coerce::required_text(raw.name, locator, "name")?;
        let direction = coerce::enumeration(
            raw.direction,
            Direction::parse,
            Direction::VARIANTS,
            locator,
            "direction",
        )?;
        let priority = coerce::priority(raw.priority, locator, "priority")?;

        let ranges = raw
            .ranges
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(i, range)| coerce::cidr(range, locator, &format!("ranges[{}]", i)))
            .collect::<ValidationResult<Vec<_>>>()?;

        let allow = protocol_ports(raw.allow, locator, "allow")?;
        let deny = protocol_ports(raw.deny, locator, "deny")?;

        let log_config = raw
            .log_config
            .map(|config| {
                coerce::enumeration(
                    config.metadata,
                    LogMetadata::parse,
                    LogMetadata::VARIANTS,
                    locator,
                    "log_config.metadata",
                )
                .map(|metadata| FirewallLogConfig { metadata })
            })
            .transpose()?;

        Ok(Self {
            name,
            description: raw.description,
            direction,
            priority,
            ranges,
            source_tags: raw.source_tags,
            source_service_accounts: raw.source_service_accounts,
            target_tags: raw.target_tags,
            target_service_accounts: raw.target_service_accounts,
            allow,
            deny,
            log_config,
        })
    }

    fn validate(&self, locator: &RecordLocator) -> ValidationResult<()> {
        coerce::non_empty(&self.name, locator, "name")?;
        for (field, entries) in [("allow", &self.allow), ("deny", &self.deny)] {
            for (i, entry) in entries.iter().flatten().enumerate() {
                coerce::non_empty(&entry.protocol, locator, &format!("{}[{}].protocol", field, i))?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Descriptor and builder
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirewallRuleDescriptor {
    pub resource_name: String,
    pub parent: ComponentScope,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub direction: Direction,
    pub network: String,
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_ranges: Option<Vec<Cidr>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_ranges: Option<Vec<Cidr>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_service_accounts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_service_accounts: Option<Vec<String>>,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_config: Option<FirewallLogConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allows: Option<Vec<ProtocolPorts>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denies: Option<Vec<ProtocolPorts>>,
}

#[derive(Debug, Clone)]
pub struct FirewallRuleBuilder {
    scope: ComponentScope,
}

impl FirewallRuleBuilder {
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            scope: ComponentScope::new(ComponentKind::FirewallRules, component_name),
        }
    }

    pub fn scope(&self) -> &ComponentScope {
        &self.scope
    }

    pub fn build<I, R>(
        &self,
        identity: &NetworkIdentity,
        rules: I,
    ) -> ValidationResult<Vec<FirewallRuleDescriptor>>
    where
        I: IntoIterator<Item = R>,
        R: Into<Input<FirewallRuleRecord>>,
    {
        let descriptors = rules
            .into_iter()
            .enumerate()
            .map(|(index, input)| {
                let locator = RecordLocator::at(RecordKind::FirewallRule, index);
                let rule = coerce::coerce(input.into(), locator)?;
                Ok(self.descriptor(identity, index, rule))
            })
            .collect::<ValidationResult<Vec<_>>>()?;

        debug!("{}: built {} firewall rule(s)", self.scope, descriptors.len());
        Ok(descriptors)
    }

    fn descriptor(
        &self,
        identity: &NetworkIdentity,
        index: usize,
        rule: FirewallRuleRecord,
    ) -> FirewallRuleDescriptor {
        if let Some(warning) = rule.ambiguity() {
            warn!("{}: rule #{} '{}': {}", self.scope, index, rule.name, warning);
        }

        let (source_ranges, destination_ranges) = match rule.direction {
            Direction::Ingress => (Some(rule.ranges), None),
            Direction::Egress => (None, Some(rule.ranges)),
        };

        FirewallRuleDescriptor {
            resource_name: format!("rule-{}-{}", rule.name, index),
            parent: self.scope.clone(),
            name: rule.name,
            description: rule.description,
            direction: rule.direction,
            network: identity.network_name.clone(),
            project: identity.project_id.clone(),
            source_ranges,
            destination_ranges,
            source_tags: rule.source_tags,
            source_service_accounts: rule.source_service_accounts,
            target_tags: rule.target_tags,
            target_service_accounts: rule.target_service_accounts,
            priority: rule.priority,
            log_config: rule.log_config,
            allows: rule.allow,
            denies: rule.deny,
        }
    }
}

impl Default for FirewallRuleBuilder {
    fn default() -> Self {
        Self::new("firewall_rules")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ports_keep_their_shape() {
        let one: Ports = serde_json::from_value(json!(22)).unwrap();
        assert_eq!(one, Ports::One(PortValue::Number(22)));

        let many: Ports = serde_json::from_value(json!(["80", 443])).unwrap();
        assert_eq!(
            many,
            Ports::Many(vec![PortValue::Text("80".into()), PortValue::Number(443)])
        );
        assert_eq!(serde_json::to_value(&many).unwrap(), json!(["80", 443]));
    }

    #[test]
    fn test_rule_without_actions_is_ambiguous() {
        let rule = FirewallRuleRecord::new("empty");
        assert_eq!(rule.ambiguity(), Some(SchemaAmbiguityWarning::NoFirewallAction));

        let rule = FirewallRuleRecord::new("explicit-empty").allow(Vec::new()).deny(Vec::new());
        assert_eq!(rule.ambiguity(), Some(SchemaAmbiguityWarning::NoFirewallAction));

        let rule = FirewallRuleRecord::new("ssh").allow(vec![ProtocolPorts::new(
            "tcp",
            Ports::One(PortValue::Text("22".into())),
        )]);
        assert_eq!(rule.ambiguity(), None);
    }
}
