//! API session abstraction
//!
//! These traits let the probe logic run against the real REST transport or a
//! mock. The REST implementation lives in `src/platform/`.

use crate::models::{ConnectionParams, Credentials};
use crate::utils::SessionError;
use serde::Deserialize;

/// One account known to the server
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UserEntry {
    #[serde(rename = "Login", default)]
    pub login: String,
}

/// Result of the "search all users" call
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct UserDirectory {
    /// Total reported by the server; falls back to the number of entries
    #[serde(rename = "Total", default)]
    pub total: u64,
    #[serde(rename = "Users", default)]
    pub users: Vec<UserEntry>,
}

impl UserDirectory {
    /// Number of users, preferring the server-reported total
    pub fn count(&self) -> u64 {
        self.total.max(self.users.len() as u64)
    }

    pub fn logins(&self) -> Vec<&str> {
        self.users.iter().map(|u| u.login.as_str()).collect()
    }
}

/// One top-level item visible to an authenticated account
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ResourceNode {
    #[serde(rename = "Path", default)]
    pub path: String,
}

/// An authenticated session bound to a single account
#[async_trait::async_trait]
pub trait ApiSession: Send + Sync {
    /// Login this session was opened for
    fn login(&self) -> &str;

    /// List every user known to the server
    async fn search_users(&self) -> Result<UserDirectory, SessionError>;

    /// Fetch metadata for the given path patterns (e.g. `/*`)
    async fn bulk_meta(&self, patterns: &[&str]) -> Result<Vec<ResourceNode>, SessionError>;
}

/// Opens authenticated sessions
///
/// Every call to [`SessionFactory::open`] must return an independent session:
/// no transport or token is shared between credentials.
#[async_trait::async_trait]
pub trait SessionFactory: Send + Sync {
    /// Authenticate `credentials` against the server described by `params`
    ///
    /// # Returns
    /// * `Err(SessionError::Authentication)` - the server rejected the credentials
    /// * `Err(_)` - any other transport failure
    async fn open(
        &self,
        params: &ConnectionParams,
        credentials: &Credentials,
    ) -> Result<Box<dyn ApiSession>, SessionError>;
}
