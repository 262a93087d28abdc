//! Unit tests module
//!
//! Contains tests for individual components in isolation.

#[path = "../common/mod.rs"]
mod common;

mod alert_service_test;
