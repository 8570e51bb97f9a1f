// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Builders are pure functions of their input records; these tests check
//! determinism, cardinality and naming across generated inputs.

mod builders;
