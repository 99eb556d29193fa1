//! demo-monitor - liveness probe for a remote file-platform server
//!
//! Core library exposing the probe workflow and its transport-agnostic traits.

// Public modules
pub mod constants;
pub mod core;
pub mod logger;
pub mod models;
pub mod platform;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{
    validate_parameters, CredentialSet, Orchestrator, ProbeOutcome, RunReport,
};
pub use models::{ConnectionParams, Credentials, SecureString, Username};
pub use platform::RestSessionFactory;
pub use utils::{CredentialError, ProbeError, SessionError};
