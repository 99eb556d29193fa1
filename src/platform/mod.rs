//! Transport implementations of the session traits
//!
//! All HTTP-specific code is isolated here; `core` never sees `reqwest`.

pub mod rest;

pub use rest::{RestSession, RestSessionFactory};
