// Copyright (c) 2025 - Cowboy AI, Inc.
//! VPC builder tests

mod fixtures;

use anyhow::Result;
use cim_network::domain::RoutingMode;
use cim_network::errors::RecordKind;
use cim_network::{Violation, VpcBuilder, VpcSpec};
use pretty_assertions::assert_eq;
use serde_json::json;

use fixtures::{identity, TEST_NETWORK_NAME, TEST_PROJECT_ID};

#[test]
fn test_network_carries_spec_fields() -> Result<()> {
    let spec = VpcSpec::new()
        .routing_mode(RoutingMode::Regional)
        .description("test network")
        .auto_create_subnetworks(true)
        .delete_default_routes(true)
        .mtu(1460);

    let built = VpcBuilder::default().build(&identity(), spec)?;

    assert_eq!(built.network.name, TEST_NETWORK_NAME);
    assert_eq!(built.network.project, TEST_PROJECT_ID);
    assert_eq!(built.network.routing_mode, RoutingMode::Regional);
    assert_eq!(built.network.description.as_deref(), Some("test network"));
    assert!(built.network.auto_create_subnetworks);
    assert!(built.network.delete_default_routes_on_create);
    assert_eq!(built.network.mtu, 1460);
    Ok(())
}

#[test]
fn test_shared_host_registration() -> Result<()> {
    let built = VpcBuilder::default().build(&identity(), VpcSpec::new().shared_vpc_host(true))?;

    let host = built.shared_vpc_host.expect("shared host registration");
    assert_eq!(host.project, TEST_PROJECT_ID);
    assert_eq!(host.resource_name, "shared_vpc_host");
    Ok(())
}

#[test]
fn test_shared_host_omitted_from_output() -> Result<()> {
    let built = VpcBuilder::default().build(&identity(), VpcSpec::new())?;

    assert!(built.shared_vpc_host.is_none());
    let value = serde_json::to_value(&built)?;
    assert!(value.get("shared_vpc_host").is_none());
    Ok(())
}

#[test]
fn test_raw_spec() -> Result<()> {
    let built = VpcBuilder::default().build(
        &identity(),
        json!({
            "routing_mode": "REGIONAL",
            "shared_vpc_host": "true",
            "mtu": 1500,
        }),
    )?;

    assert_eq!(built.network.routing_mode, RoutingMode::Regional);
    assert!(built.shared_vpc_host.is_some());
    assert_eq!(built.network.mtu, 1500);
    Ok(())
}

#[test]
fn test_unknown_routing_mode() {
    let err = VpcBuilder::default()
        .build(&identity(), json!({"routing_mode": "PLANETARY"}))
        .unwrap_err();

    assert_eq!(err.record.kind, RecordKind::Vpc);
    assert_eq!(err.record.position, None);
    assert_eq!(err.field, "routing_mode");
    assert!(matches!(err.violation, Violation::UnknownVariant { .. }));
}

#[test]
fn test_network_json_shape() -> Result<()> {
    let built = VpcBuilder::default().build(&identity(), VpcSpec::new())?;

    assert_eq!(
        serde_json::to_value(&built)?,
        json!({
            "network": {
                "resource_name": "vpc",
                "parent": {"type": "cim-network:gcp:Vpc", "name": "vpc"},
                "name": "test-network",
                "project": "test",
                "routing_mode": "GLOBAL",
                "auto_create_subnetworks": false,
                "delete_default_routes_on_create": false,
                "mtu": 0,
            }
        })
    );
    Ok(())
}
