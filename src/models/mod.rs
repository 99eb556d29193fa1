//! # Domain Models
//!
//! Connection parameters and account credentials.
//!
//! ## Security Design
//!
//! The [`SecureString`] type holds passwords:
//! - Password data is zeroed on drop
//! - Never exposed in `Debug` or `Display` implementations
//!
//! Credentials only live in memory for the duration of one run; nothing is
//! written to disk or to the log.

pub mod connection;
pub mod credentials;

pub use connection::ConnectionParams;
pub use credentials::{Credentials, SecureString, Username};
