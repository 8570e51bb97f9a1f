// Copyright (c) 2025 - Cowboy AI, Inc.
//! Identity Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Project and network a composition provisions into
///
/// Shared by every builder of a composition and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkIdentity {
    pub project_id: String,
    pub network_name: String,
}

impl NetworkIdentity {
    pub fn new(project_id: impl Into<String>, network_name: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            network_name: network_name.into(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn network_name(&self) -> &str {
        &self.network_name
    }
}

/// Unique identifier for a composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositionId(Uuid);

impl CompositionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for CompositionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CompositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
