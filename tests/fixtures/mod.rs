// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-network
//!
//! Deterministic raw records shared by the integration tests. Raw inputs are
//! built with `json!` so they go through the same coercion path as external
//! callers.
#![allow(dead_code)]

use cim_network::builders::SecondaryRanges;
use cim_network::{Input, NetworkIdentity};
use serde_json::{json, Value};

pub const TEST_PROJECT_ID: &str = "test";
pub const TEST_NETWORK_NAME: &str = "test-network";

pub fn identity() -> NetworkIdentity {
    NetworkIdentity::new(TEST_PROJECT_ID, TEST_NETWORK_NAME)
}

/// Four subnets in us-west1; the second and third have flow logs
pub fn subnets() -> Vec<Value> {
    vec![
        json!({
            "subnet_name": "test-subnet-1",
            "subnet_ip": "10.10.10.0/24",
            "subnet_region": "us-west1",
        }),
        json!({
            "subnet_name": "test-subnet-2",
            "subnet_ip": "10.10.20.0/24",
            "subnet_region": "us-west1",
            "subnet_private_access": true,
            "subnet_flow_logs": true,
        }),
        json!({
            "subnet_name": "test-subnet-3",
            "subnet_ip": "10.10.30.0/24",
            "subnet_region": "us-west1",
            "flow_logs": true,
            "flow_logs_interval": "INTERVAL_15_MIN",
            "flow_logs_sampling": 0.9,
            "flow_logs_metadata": "EXCLUDE_ALL_METADATA",
        }),
        json!({
            "subnet_name": "test-subnet-4",
            "subnet_ip": "10.10.40.0/24",
            "subnet_region": "us-west1",
        }),
    ]
}

/// Secondary ranges for subnets 1-3; subnet 2 has an explicit empty list
pub fn secondary_ranges() -> SecondaryRanges {
    secondary_ranges_from(json!({
        "test-subnet-1": [
            {"range_name": "test-subnet-1-01", "ip_cidr_range": "192.168.64.0/24"},
            {"range_name": "test-subnet-1-02", "ip_cidr_range": "192.168.65.0/24"},
        ],
        "test-subnet-2": [],
        "test-subnet-3": [
            {"range_name": "test-subnet-3-01", "ip_cidr_range": "192.168.66.0/24"},
        ],
    }))
}

/// Convert a JSON object of lists into raw secondary-range inputs
pub fn secondary_ranges_from(value: Value) -> SecondaryRanges {
    let Value::Object(map) = value else {
        panic!("secondary range fixture must be an object");
    };
    map.into_iter()
        .map(|(subnet, ranges)| {
            let Value::Array(ranges) = ranges else {
                panic!("secondary ranges for {} must be a list", subnet);
            };
            (subnet, ranges.into_iter().map(Input::Raw).collect())
        })
        .collect()
}

/// One named internet route, one unnamed tagged route
pub fn routes() -> Vec<Value> {
    vec![
        json!({
            "name": "test-egress-inet",
            "description": "route through IGW to access internet",
            "destination_range": "0.0.0.0/0",
            "tags": "egress-inet",
            "next_hop_internet": "true",
        }),
        json!({
            "description": "route through ilb",
            "destination_range": "10.10.20.0/24",
            "tags": "foo, bar, ham",
        }),
    ]
}

/// One ingress rule allowing ssh, one egress rule with no actions
pub fn firewall_rules() -> Vec<Value> {
    vec![
        json!({
            "name": "test-rule-1",
            "description": "Test rule 1",
            "ranges": ["0.0.0.0/0"],
            "allow": [{"protocol": "tcp", "ports": ["22"]}],
            "log_config": null,
        }),
        json!({
            "name": "test-rule-2",
            "description": "Test rule 2",
            "ranges": ["10.10.20.0/24"],
            "direction": "EGRESS",
        }),
    ]
}
