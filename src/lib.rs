//! Declarative network topology for the Composable Information Machine
//!
//! Turns loosely-typed descriptions of a VPC network, its subnets, routes
//! and firewall rules into fully-specified resource descriptors for a
//! provisioning collaborator. Raw records are coerced, defaulted and
//! validated at the builder boundary; nothing here talks to a cloud API.

pub mod builders;
pub mod coerce;
pub mod composer;
pub mod config;
pub mod domain;
pub mod errors;

// Re-export commonly used types
pub use builders::{FirewallRuleBuilder, RouteBuilder, SubnetBuilder, VpcBuilder, VpcSpec};
pub use coerce::Input;
pub use composer::{CompositeResult, NetworkComposer, NetworkDocument, NetworkInputs};
pub use config::{ComposerConfig, DuplicateSubnetPolicy};
pub use domain::{CompositionId, NetworkIdentity};
pub use errors::{SchemaAmbiguityWarning, ValidationError, ValidationResult, Violation};
