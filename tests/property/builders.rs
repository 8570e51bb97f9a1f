// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Leaf Builders

use cim_network::builders::routes::parse_tags;
use cim_network::builders::{FirewallRuleBuilder, RouteBuilder, SecondaryRanges, SubnetBuilder};
use cim_network::NetworkIdentity;
use proptest::prelude::*;
use serde_json::{json, Value};

// ============================================================================
// Property Test Strategies
// ============================================================================

fn identity() -> NetworkIdentity {
    NetworkIdentity::new("prop-project", "prop-net")
}

fn ipv4_cidr() -> impl Strategy<Value = String> {
    (any::<[u8; 4]>(), 0u8..=32).prop_map(|(octets, prefix)| {
        format!(
            "{}.{}.{}.{}/{}",
            octets[0], octets[1], octets[2], octets[3], prefix
        )
    })
}

fn resource_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,20}"
}

/// Optional route name; `None` exercises positional naming
fn route() -> impl Strategy<Value = Value> {
    (
        prop::option::of(resource_name()),
        ipv4_cidr(),
        prop::option::of(0i64..=65535),
        any::<bool>(),
    )
        .prop_map(|(name, destination, priority, internet)| {
            let mut route = json!({
                "destination_range": destination,
                "next_hop_internet": internet,
            });
            if let Some(name) = name {
                route["name"] = json!(name);
            }
            if let Some(priority) = priority {
                route["priority"] = json!(priority);
            }
            route
        })
}

fn routes() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(route(), 0..20)
}

fn firewall_rule() -> impl Strategy<Value = Value> {
    (
        resource_name(),
        prop_oneof![Just("INGRESS"), Just("EGRESS")],
        prop::collection::vec(ipv4_cidr(), 0..4),
        prop::collection::vec(1u16..=65535, 0..3),
    )
        .prop_map(|(name, direction, ranges, ports)| {
            json!({
                "name": name,
                "direction": direction,
                "ranges": ranges,
                "allow": [{"protocol": "tcp", "ports": ports}],
            })
        })
}

/// Subnets with unique names so no duplicate policy applies
fn unique_subnets() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::btree_set(resource_name(), 0..12).prop_flat_map(|names| {
        let count = names.len();
        (
            Just(names),
            prop::collection::vec((ipv4_cidr(), any::<bool>()), count),
        )
            .prop_map(|(names, settings)| {
                names
                    .into_iter()
                    .zip(settings)
                    .map(|(name, (cidr, flow_logs))| {
                        json!({
                            "subnet_name": name,
                            "subnet_ip": cidr,
                            "subnet_region": "us-west1",
                            "subnet_flow_logs": flow_logs,
                        })
                    })
                    .collect()
            })
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Building is deterministic
    ///
    /// The same raw routes always produce structurally equal descriptors.
    #[test]
    fn prop_route_build_is_deterministic(routes in routes()) {
        let first = RouteBuilder::default().build(&identity(), routes.clone()).unwrap();
        let second = RouteBuilder::default().build(&identity(), routes).unwrap();

        prop_assert_eq!(first, second);
    }

    /// Property: One route descriptor per input record, in input order
    #[test]
    fn prop_route_count_matches_input(routes in routes()) {
        let built = RouteBuilder::default().build(&identity(), routes.clone()).unwrap();

        prop_assert_eq!(built.len(), routes.len());
        for (index, descriptor) in built.iter().enumerate() {
            prop_assert_eq!(&descriptor.resource_name, &format!("route-{}", index));
        }
    }

    /// Property: Unnamed routes are named after the network and their position
    #[test]
    fn prop_route_names(routes in routes()) {
        let built = RouteBuilder::default().build(&identity(), routes.clone()).unwrap();

        for (index, (input, descriptor)) in routes.iter().zip(&built).enumerate() {
            let expected = match input.get("name").and_then(Value::as_str) {
                Some(name) => name.to_string(),
                None => format!("route-prop-net-{}", index),
            };
            prop_assert_eq!(&descriptor.name, &expected);
        }
    }

    /// Property: Tag parsing trims and drops blanks
    #[test]
    fn prop_tags_round_trip(tags in prop::collection::vec("[a-z0-9-]{1,10}", 0..8)) {
        let joined = tags
            .iter()
            .map(|tag| format!(" {} ", tag))
            .collect::<Vec<_>>()
            .join(",");

        prop_assert_eq!(parse_tags(Some(joined.as_str())), tags);
    }

    /// Property: Priorities inside [0, 65535] are accepted, others rejected
    #[test]
    fn prop_priority_bounds(priority in -100_000i64..=200_000) {
        let result = RouteBuilder::default().build(
            &identity(),
            vec![json!({"destination_range": "10.0.0.0/8", "priority": priority})],
        );

        prop_assert_eq!(result.is_ok(), (0..=65535).contains(&priority));
    }

    /// Property: One firewall descriptor per rule, ranges on one side only
    #[test]
    fn prop_firewall_rules(rules in prop::collection::vec(firewall_rule(), 0..12)) {
        let built = FirewallRuleBuilder::default().build(&identity(), rules.clone()).unwrap();

        prop_assert_eq!(built.len(), rules.len());
        for descriptor in &built {
            prop_assert!(descriptor.source_ranges.is_some() != descriptor.destination_ranges.is_some());
        }
    }

    /// Property: Unique subnets each produce one descriptor, in input order
    #[test]
    fn prop_subnet_count_matches_input(subnets in unique_subnets()) {
        let built = SubnetBuilder::default()
            .build(&identity(), subnets.clone(), &SecondaryRanges::new())
            .unwrap();

        prop_assert_eq!(built.len(), subnets.len());
        for (input, descriptor) in subnets.iter().zip(&built) {
            prop_assert_eq!(Some(descriptor.name.as_str()), input["subnet_name"].as_str());
            prop_assert_eq!(
                descriptor.log_config.is_enabled(),
                input["subnet_flow_logs"].as_bool().unwrap_or(false)
            );
        }
    }
}
