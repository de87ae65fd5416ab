//! Integration tests module
//!
//! This module contains the integration tests for the arbor CLI commands.

pub mod check;
pub mod common;
pub mod graph;
pub mod plan;
pub mod queries;
