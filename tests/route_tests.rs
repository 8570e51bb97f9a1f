// Copyright (c) 2025 - Cowboy AI, Inc.
//! Route builder tests

mod fixtures;

use anyhow::Result;
use cim_network::builders::{RouteBuilder, RouteRecord, DEFAULT_INTERNET_GATEWAY};
use cim_network::domain::{Cidr, Priority};
use cim_network::errors::RecordKind;
use cim_network::{Input, Violation};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

use fixtures::{identity, routes, TEST_NETWORK_NAME, TEST_PROJECT_ID};

#[test]
fn test_one_descriptor_per_route() -> Result<()> {
    let built = RouteBuilder::default().build(&identity(), routes())?;

    assert_eq!(built.len(), 2);
    assert_eq!(built[0].resource_name, "route-0");
    assert_eq!(built[1].resource_name, "route-1");
    assert_eq!(built[0].project, TEST_PROJECT_ID);
    assert_eq!(built[0].network, TEST_NETWORK_NAME);
    Ok(())
}

#[test]
fn test_route_tags() -> Result<()> {
    let built = RouteBuilder::default().build(&identity(), routes())?;

    assert_eq!(built[0].tags, vec!["egress-inet"]);
    assert_eq!(built[1].tags, vec!["foo", "bar", "ham"]);
    Ok(())
}

#[test]
fn test_absent_tags_are_empty() -> Result<()> {
    let built = RouteBuilder::default().build(
        &identity(),
        vec![
            json!({"destination_range": "10.0.0.0/8"}),
            json!({"destination_range": "10.0.0.0/8", "tags": null}),
        ],
    )?;

    assert!(built[0].tags.is_empty());
    assert!(built[1].tags.is_empty());
    Ok(())
}

#[test]
fn test_next_hop_gateway() -> Result<()> {
    let built = RouteBuilder::default().build(&identity(), routes())?;

    assert_eq!(built[0].next_hop_gateway.as_deref(), Some(DEFAULT_INTERNET_GATEWAY));
    assert_eq!(built[1].next_hop_gateway, None);
    Ok(())
}

#[test]
fn test_gateway_absent_when_other_hops_set() -> Result<()> {
    let built = RouteBuilder::default().build(
        &identity(),
        vec![json!({
            "destination_range": "10.20.0.0/16",
            "next_hop_internet": false,
            "next_hop_ip": "10.0.0.5",
            "next_hop_ilb": "projects/test/regions/us-west1/forwardingRules/ilb",
        })],
    )?;

    assert_eq!(built[0].next_hop_gateway, None);
    assert_eq!(built[0].next_hop_ip.as_deref(), Some("10.0.0.5"));
    assert_eq!(
        built[0].next_hop_ilb.as_deref(),
        Some("projects/test/regions/us-west1/forwardingRules/ilb")
    );
    Ok(())
}

#[test]
fn test_names_are_positional() -> Result<()> {
    let identity = cim_network::NetworkIdentity::new("p", "net");
    let built = RouteBuilder::default().build(
        &identity,
        vec![
            json!({"name": "a", "destination_range": "10.0.0.0/8"}),
            json!({"destination_range": "10.0.0.0/8"}),
            json!({"name": "", "destination_range": "10.0.0.0/8"}),
        ],
    )?;

    let names: Vec<&str> = built.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["a", "route-net-1", "route-net-2"]);
    Ok(())
}

#[test]
fn test_fixture_unnamed_route_name() -> Result<()> {
    let built = RouteBuilder::default().build(&identity(), routes())?;

    assert_eq!(built[0].name, "test-egress-inet");
    assert_eq!(built[1].name, "route-test-network-1");
    Ok(())
}

#[test]
fn test_default_priority() -> Result<()> {
    let built = RouteBuilder::default().build(&identity(), routes())?;
    assert_eq!(built[0].priority, Priority::DEFAULT);
    Ok(())
}

#[test_case(json!(0) ; "lowest")]
#[test_case(json!(65535) ; "highest")]
#[test_case(json!("900") ; "numeric string")]
#[test_case(json!(1000.0) ; "whole number float")]
fn test_priority_accepted(priority: serde_json::Value) {
    let built = RouteBuilder::default()
        .build(
            &identity(),
            vec![json!({"destination_range": "10.0.0.0/8", "priority": priority})],
        )
        .unwrap();
    assert_eq!(built.len(), 1);
}

#[test_case(-1 ; "below range")]
#[test_case(65536 ; "above range")]
fn test_priority_rejected(priority: i64) {
    let err = RouteBuilder::default()
        .build(
            &identity(),
            vec![json!({"destination_range": "10.0.0.0/8", "priority": priority})],
        )
        .unwrap_err();

    assert_eq!(err.record.kind, RecordKind::Route);
    assert_eq!(err.field, "priority");
    assert_eq!(
        err.violation,
        Violation::IntegerOutOfRange { value: priority, min: 0, max: 65535 }
    );
}

#[test]
fn test_missing_destination_range() {
    let err = RouteBuilder::default()
        .build(&identity(), vec![json!({"name": "nowhere"})])
        .unwrap_err();

    assert_eq!(err.record.name.as_deref(), Some("nowhere"));
    assert_eq!(err.field, "destination_range");
    assert_eq!(err.violation, Violation::Missing);
}

#[test]
fn test_non_record_input_rejected() {
    let err = RouteBuilder::default()
        .build(&identity(), vec![json!("0.0.0.0/0")])
        .unwrap_err();

    assert!(matches!(err.violation, Violation::Malformed(_)));
}

#[test]
fn test_typed_route() -> Result<()> {
    let route = RouteRecord::new(Cidr::new("192.168.0.0/16")?)
        .name("vpn")
        .tags("a,b")
        .next_hop_vpn_tunnel("tunnel-1")
        .priority(Priority::from(10));

    let built = RouteBuilder::default().build(&identity(), vec![Input::from(route)])?;

    assert_eq!(built[0].name, "vpn");
    assert_eq!(built[0].tags, vec!["a", "b"]);
    assert_eq!(built[0].next_hop_vpn_tunnel.as_deref(), Some("tunnel-1"));
    assert_eq!(built[0].priority.value(), 10);
    Ok(())
}

#[test]
fn test_multiple_next_hops_still_build() -> Result<()> {
    let built = RouteBuilder::default().build(
        &identity(),
        vec![json!({
            "destination_range": "0.0.0.0/0",
            "next_hop_internet": true,
            "next_hop_ip": "10.0.0.1",
        })],
    )?;

    assert_eq!(built[0].next_hop_gateway.as_deref(), Some(DEFAULT_INTERNET_GATEWAY));
    assert_eq!(built[0].next_hop_ip.as_deref(), Some("10.0.0.1"));
    Ok(())
}

#[test]
fn test_descriptor_omits_absent_hops() -> Result<()> {
    let built = RouteBuilder::default().build(&identity(), routes())?;

    assert_eq!(
        serde_json::to_value(&built[1])?,
        json!({
            "resource_name": "route-1",
            "parent": {"type": "cim-network:gcp:Routes", "name": "route"},
            "name": "route-test-network-1",
            "project": "test",
            "network": "test-network",
            "description": "route through ilb",
            "tags": ["foo", "bar", "ham"],
            "dest_range": "10.10.20.0/24",
            "priority": 1000,
        })
    );
    Ok(())
}
