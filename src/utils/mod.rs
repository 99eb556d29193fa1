//! # Utilities Module
//!
//! Cross-cutting concerns shared by the core and the platform adapter.
//!
//! - [`errors`]: typed error hierarchy using `thiserror`
//! - [`retry`]: exponential backoff for transient transport failures
//!
//! Error types live here rather than in `core` so that `platform` can produce
//! them without depending on the orchestration code.

pub mod errors;
pub mod retry;

pub use errors::{CredentialError, ProbeError, SessionError};
pub use retry::{retry_with_backoff, RetryConfig};
