//! stacksweep - stack resource teardown for an OCI-style tenancy
//!
//! This crate provides the binary that discovers every resource belonging to
//! a deployment stack (by display-name prefix) and tears the set down in
//! dependency order, isolating failures per resource.

pub mod api;
pub mod config;
pub mod orchestrator;
pub mod wait;
