//! Core probe logic (transport-agnostic)
//!
//! CRITICAL: This module MUST NOT depend on `reqwest` or any other transport;
//! it only sees the session traits.

pub mod credential;
pub mod orchestrator;
pub mod probes;
pub mod session;
pub mod validation;

// Test utilities for mock sessions (tests only)
#[cfg(test)]
pub mod mock_session;

pub use credential::CredentialSet;
pub use orchestrator::{Orchestrator, RunReport};
pub use probes::{directory_probe, reduce_outcomes, resource_probe, ProbeOutcome};
pub use session::{ApiSession, ResourceNode, SessionFactory, UserDirectory, UserEntry};
pub use validation::validate_parameters;
