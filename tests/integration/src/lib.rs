//! Integration test utilities for the POM reconcile client
//!
//! This crate provides helpers for running end-to-end tests against
//! the notification relay and its WebSocket transport.

pub mod helpers;
pub mod fixtures;

pub use helpers::*;
pub use fixtures::*;
