// Copyright (c) 2025 - Cowboy AI, Inc.
//! Subnetworks and their secondary IP ranges
//!
//! Subnets are keyed by `region/name` while building. Input order is kept;
//! two records sharing a key are rejected, or collapsed last-wins when the
//! builder is configured with [`DuplicateSubnetPolicy::LastWins`].
//! Secondary ranges are joined in by subnet name.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

use super::{ComponentKind, ComponentScope};
use crate::coerce::{self, Input, Record};
use crate::config::DuplicateSubnetPolicy;
use crate::domain::{Cidr, FlowLogInterval, LogMetadata, NetworkIdentity};
use crate::errors::{
    RecordKind, RecordLocator, SchemaAmbiguityWarning, ValidationResult, Violation,
};

/// Secondary ranges keyed by the name of the subnet they belong to
pub type SecondaryRanges = HashMap<String, Vec<Input<SecondaryRange>>>;

// ============================================================================
// Records
// ============================================================================

/// Flow-log sampling rate
///
/// Invariants:
/// - Value within 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct FlowSampling(f64);

impl FlowSampling {
    pub const DEFAULT: FlowSampling = FlowSampling(0.5);

    pub fn new(rate: f64) -> Result<Self, f64> {
        if (0.0..=1.0).contains(&rate) {
            Ok(Self(rate))
        } else {
            Err(rate)
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for FlowSampling {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubnetRecord {
    pub subnet_name: String,
    pub subnet_ip: Cidr,
    pub subnet_region: String,
    pub description: Option<String>,
    pub private_access: bool,
    pub flow_logs: bool,
    pub flow_logs_interval: FlowLogInterval,
    pub flow_logs_sampling: FlowSampling,
    pub flow_logs_metadata: LogMetadata,
}

impl SubnetRecord {
    pub fn new(name: impl Into<String>, ip: Cidr, region: impl Into<String>) -> Self {
        Self {
            subnet_name: name.into(),
            subnet_ip: ip,
            subnet_region: region.into(),
            description: None,
            private_access: false,
            flow_logs: false,
            flow_logs_interval: FlowLogInterval::default(),
            flow_logs_sampling: FlowSampling::default(),
            flow_logs_metadata: LogMetadata::default(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn private_access(mut self, enabled: bool) -> Self {
        self.private_access = enabled;
        self
    }

    pub fn flow_logs(
        mut self,
        interval: FlowLogInterval,
        sampling: FlowSampling,
        metadata: LogMetadata,
    ) -> Self {
        self.flow_logs = true;
        self.flow_logs_interval = interval;
        self.flow_logs_sampling = sampling;
        self.flow_logs_metadata = metadata;
        self
    }

    /// Key the builder collapses duplicates on
    pub fn key(&self) -> String {
        format!("{}/{}", self.subnet_region, self.subnet_name)
    }
}

impl From<SubnetRecord> for Input<SubnetRecord> {
    fn from(record: SubnetRecord) -> Self {
        Input::Typed(record)
    }
}

#[derive(Debug, Deserialize)]
pub struct RawSubnetRecord {
    subnet_name: Option<String>,
    subnet_ip: Option<String>,
    subnet_region: Option<String>,
    description: Option<String>,
    #[serde(default, alias = "subnet_private_access", deserialize_with = "coerce::flag")]
    private_access: Option<bool>,
    #[serde(default, alias = "subnet_flow_logs", deserialize_with = "coerce::flag")]
    flow_logs: Option<bool>,
    #[serde(default, alias = "subnet_flow_logs_interval")]
    flow_logs_interval: Option<String>,
    #[serde(default, alias = "subnet_flow_logs_sampling", deserialize_with = "coerce::float")]
    flow_logs_sampling: Option<f64>,
    #[serde(default, alias = "subnet_flow_logs_metadata")]
    flow_logs_metadata: Option<String>,
}

impl Record for SubnetRecord {
    const KIND: RecordKind = RecordKind::Subnet;
    const NAME_KEY: Option<&'static str> = Some("subnet_name");
    type Raw = RawSubnetRecord;

    fn from_raw(raw: RawSubnetRecord, locator: &RecordLocator) -> ValidationResult<Self> {
        let subnet_name = coerce::required_text(raw.subnet_name, locator, "subnet_name")?;
        let subnet_ip = coerce::required_cidr(raw.subnet_ip, locator, "subnet_ip")?;
        let subnet_region = coerce::required_text(raw.subnet_region, locator, "subnet_region")?;

        let flow_logs_interval = coerce::enumeration(
            raw.flow_logs_interval,
            FlowLogInterval::parse,
            FlowLogInterval::VARIANTS,
            locator,
            "flow_logs_interval",
        )?;
        let flow_logs_metadata = coerce::enumeration(
            raw.flow_logs_metadata,
            LogMetadata::parse,
            LogMetadata::VARIANTS,
            locator,
            "flow_logs_metadata",
        )?;
        let flow_logs_sampling = match raw.flow_logs_sampling {
            None => FlowSampling::DEFAULT,
            Some(rate) => FlowSampling::new(rate).map_err(|rate| {
                locator.error(
                    "flow_logs_sampling",
                    Violation::OutOfRange {
                        value: rate,
                        min: 0.0,
                        max: 1.0,
                    },
                )
            })?,
        };

        Ok(Self {
            subnet_name,
            subnet_ip,
            subnet_region,
            description: raw.description,
            private_access: raw.private_access.unwrap_or(false),
            flow_logs: raw.flow_logs.unwrap_or(false),
            flow_logs_interval,
            flow_logs_sampling,
            flow_logs_metadata,
        })
    }

    fn validate(&self, locator: &RecordLocator) -> ValidationResult<()> {
        coerce::non_empty(&self.subnet_name, locator, "subnet_name")?;
        coerce::non_empty(&self.subnet_region, locator, "subnet_region")
    }
}

/// Secondary IP range nested under a subnet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecondaryRange {
    pub range_name: String,
    pub ip_cidr_range: Cidr,
}

impl SecondaryRange {
    pub fn new(range_name: impl Into<String>, ip_cidr_range: Cidr) -> Self {
        Self {
            range_name: range_name.into(),
            ip_cidr_range,
        }
    }
}

impl From<SecondaryRange> for Input<SecondaryRange> {
    fn from(range: SecondaryRange) -> Self {
        Input::Typed(range)
    }
}

#[derive(Debug, Deserialize)]
pub struct RawSecondaryRange {
    range_name: Option<String>,
    ip_cidr_range: Option<String>,
}

impl Record for SecondaryRange {
    const KIND: RecordKind = RecordKind::SecondaryRange;
    const NAME_KEY: Option<&'static str> = Some("range_name");
    type Raw = RawSecondaryRange;

    fn from_raw(raw: RawSecondaryRange, locator: &RecordLocator) -> ValidationResult<Self> {
        Ok(Self {
            range_name: coerce::required_text(raw.range_name, locator, "range_name")?,
            ip_cidr_range: coerce::required_cidr(raw.ip_cidr_range, locator, "ip_cidr_range")?,
        })
    }

    fn validate(&self, locator: &RecordLocator) -> ValidationResult<()> {
        coerce::non_empty(&self.range_name, locator, "range_name")
    }
}

// ============================================================================
// Descriptors
// ============================================================================

/// Flow-log settings of a subnet descriptor
///
/// Disabled serializes as an empty object, which the provider reads as
/// "no flow logs". Enabled always carries all three settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlowLogConfig {
    Enabled {
        aggregation_interval: FlowLogInterval,
        flow_sampling: FlowSampling,
        metadata: LogMetadata,
    },
    Disabled {},
}

impl FlowLogConfig {
    pub fn is_enabled(&self) -> bool {
        matches!(self, FlowLogConfig::Enabled { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubnetDescriptor {
    pub resource_name: String,
    pub parent: ComponentScope,
    pub name: String,
    pub ip_cidr_range: Cidr,
    pub region: String,
    pub private_ip_google_access: bool,
    pub network: String,
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub log_config: FlowLogConfig,
    pub secondary_ip_ranges: Vec<SecondaryRange>,
}

// ============================================================================
// Builder
// ============================================================================

#[derive(Debug, Clone)]
pub struct SubnetBuilder {
    scope: ComponentScope,
    duplicates: DuplicateSubnetPolicy,
}

impl SubnetBuilder {
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            scope: ComponentScope::new(ComponentKind::Subnets, component_name),
            duplicates: DuplicateSubnetPolicy::default(),
        }
    }

    pub fn with_duplicate_policy(mut self, duplicates: DuplicateSubnetPolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn scope(&self) -> &ComponentScope {
        &self.scope
    }

    pub fn build<I, S>(
        &self,
        identity: &NetworkIdentity,
        subnets: I,
        secondary_ranges: &SecondaryRanges,
    ) -> ValidationResult<Vec<SubnetDescriptor>>
    where
        I: IntoIterator<Item = S>,
        S: Into<Input<SubnetRecord>>,
    {
        let records = self.collapse(subnets)?;

        let known: BTreeSet<&str> = records.iter().map(|r| r.subnet_name.as_str()).collect();
        let mut orphans: Vec<&String> = secondary_ranges
            .keys()
            .filter(|name| !known.contains(name.as_str()))
            .collect();
        orphans.sort();
        for subnet_name in orphans {
            let warning = SchemaAmbiguityWarning::OrphanSecondaryRanges {
                subnet_name: subnet_name.clone(),
            };
            warn!("{}: {}", self.scope, warning);
        }

        let mut descriptors = Vec::with_capacity(records.len());
        for (index, subnet) in records.into_iter().enumerate() {
            let secondary_ip_ranges = secondary_ip_ranges(secondary_ranges, &subnet.subnet_name)?;
            descriptors.push(self.descriptor(identity, index, subnet, secondary_ip_ranges));
        }

        debug!("{}: built {} subnet(s)", self.scope, descriptors.len());
        Ok(descriptors)
    }

    /// Coerce in input order, collapsing or rejecting `region/name` duplicates
    fn collapse<I, S>(&self, subnets: I) -> ValidationResult<Vec<SubnetRecord>>
    where
        I: IntoIterator<Item = S>,
        S: Into<Input<SubnetRecord>>,
    {
        let mut records: Vec<SubnetRecord> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();

        for (position, input) in subnets.into_iter().enumerate() {
            let locator = RecordLocator::at(RecordKind::Subnet, position);
            let record = coerce::coerce(input.into(), locator.clone())?;
            let key = record.key();

            match slots.get(&key) {
                None => {
                    slots.insert(key, records.len());
                    records.push(record);
                }
                Some(&slot) => match self.duplicates {
                    DuplicateSubnetPolicy::Reject => {
                        return Err(locator
                            .with_name(Some(record.subnet_name))
                            .error("subnet_name", Violation::Duplicate(key)));
                    }
                    DuplicateSubnetPolicy::LastWins => {
                        debug!("{}: subnet {} replaces an earlier record", self.scope, key);
                        records[slot] = record;
                    }
                },
            }
        }

        Ok(records)
    }

    fn descriptor(
        &self,
        identity: &NetworkIdentity,
        index: usize,
        subnet: SubnetRecord,
        secondary_ip_ranges: Vec<SecondaryRange>,
    ) -> SubnetDescriptor {
        let log_config = if subnet.flow_logs {
            FlowLogConfig::Enabled {
                aggregation_interval: subnet.flow_logs_interval,
                flow_sampling: subnet.flow_logs_sampling,
                metadata: subnet.flow_logs_metadata,
            }
        } else {
            FlowLogConfig::Disabled {}
        };

        SubnetDescriptor {
            resource_name: format!("subnetwork-{}", index),
            parent: self.scope.clone(),
            name: subnet.subnet_name,
            ip_cidr_range: subnet.subnet_ip,
            region: subnet.subnet_region,
            private_ip_google_access: subnet.private_access,
            network: identity.network_name.clone(),
            project: identity.project_id.clone(),
            description: subnet.description,
            log_config,
            secondary_ip_ranges,
        }
    }
}

impl Default for SubnetBuilder {
    fn default() -> Self {
        Self::new("subnets")
    }
}

/// Coerce the secondary ranges registered for `subnet_name`
///
/// A subnet with no entry gets no ranges.
pub fn secondary_ip_ranges(
    secondary_ranges: &SecondaryRanges,
    subnet_name: &str,
) -> ValidationResult<Vec<SecondaryRange>> {
    let Some(ranges) = secondary_ranges.get(subnet_name) else {
        return Ok(Vec::new());
    };

    ranges
        .iter()
        .enumerate()
        .map(|(position, range)| {
            let locator =
                RecordLocator::at(RecordKind::SecondaryRange, position).with_owner(subnet_name);
            coerce::coerce(range.clone(), locator)
        })
        .collect()
}
