// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Domain Models
//!
//! Value objects shared by every builder. Each is validated on
//! construction, so a typed record holding them is always well-formed.
//!
//! - [`Cidr`] - IPv4/IPv6 range in CIDR notation
//! - [`Priority`] - route/firewall priority (0-65535)
//! - [`NetworkIdentity`] - project and network a composition targets
//! - [`CompositionId`] - unique identity of one composition
//! - [`RoutingMode`], [`FlowLogInterval`], [`LogMetadata`], [`Direction`] -
//!   closed enumerations accepted from raw strings

pub mod identity;
pub mod modes;
pub mod network;

pub use identity::{CompositionId, NetworkIdentity};
pub use modes::{Direction, FlowLogInterval, LogMetadata, RoutingMode};
pub use network::{Cidr, CidrError, Priority};
