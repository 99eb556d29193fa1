//! Probe functions for verifying a file-platform server
//!
//! Each probe takes a [`SessionFactory`] so the same logic runs against the
//! REST transport and against mocks in tests.
//!
//! # Architecture
//!
//! - [`directory_probe`] is fatal on failure: a server that cannot list its
//!   users cannot be probed further.
//! - [`resource_probe`] never fails: whatever happens to one credential is
//!   folded into its [`ProbeOutcome`].
//! - [`reduce_outcomes`] turns all outcomes into the run verdict.
//!
//! # Example
//!
//! ```ignore
//! let users = directory_probe(&factory, &params, &admin).await?;
//! let outcomes = vec![resource_probe(&factory, &params, &admin).await];
//! let successes = reduce_outcomes(&outcomes)?;
//! ```

use super::session::{ResourceNode, SessionFactory, UserDirectory};
use crate::constants::TOP_LEVEL_PATTERN;
use crate::models::{ConnectionParams, Credentials};
use crate::utils::{ProbeError, SessionError};
use std::time::Instant;

/// Outcome of checking one credential
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    /// Login that was checked
    pub login: String,
    /// Authenticated and queried successfully
    pub success: bool,
    /// Top-level resources visible to the account (empty on failure)
    pub nodes: Vec<ResourceNode>,
    /// Failure description, never contains secrets
    pub error: Option<String>,
    /// Wall time of the check in milliseconds
    pub duration_ms: u64,
}

impl ProbeOutcome {
    pub fn resource_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Confirm the server is reachable and has at least one user
///
/// Opens a session for `admin` and issues one "search all users" request.
///
/// # Errors
///
/// * `AuthenticationFailed` - the admin credentials were rejected
/// * `ServerUnreachable` - transport failure or API error
/// * `NoUsersFound` - the directory is empty
pub async fn directory_probe(
    factory: &dyn SessionFactory,
    params: &ConnectionParams,
    admin: &Credentials,
) -> Result<UserDirectory, ProbeError> {
    let login = admin.username().as_str();
    let to_probe_error = |err: SessionError| match err {
        SessionError::Authentication => ProbeError::AuthenticationFailed {
            login: login.to_string(),
            reason: err.to_string(),
        },
        other => ProbeError::ServerUnreachable(other.to_string()),
    };

    let session = factory.open(params, admin).await.map_err(to_probe_error)?;
    let directory = session.search_users().await.map_err(to_probe_error)?;

    if directory.users.is_empty() {
        return Err(ProbeError::NoUsersFound);
    }

    tracing::debug!(count = directory.count(), "user directory listed");
    Ok(directory)
}

async fn check_resources(
    factory: &dyn SessionFactory,
    params: &ConnectionParams,
    credentials: &Credentials,
) -> Result<Vec<ResourceNode>, ProbeError> {
    let login = credentials.username().as_str();

    let session = factory
        .open(params, credentials)
        .await
        .map_err(|e| ProbeError::AuthenticationFailed {
            login: login.to_string(),
            reason: e.to_string(),
        })?;
    tracing::debug!(login, "logged in");

    session
        .bulk_meta(&[TOP_LEVEL_PATTERN])
        .await
        .map_err(|e| ProbeError::QueryFailed {
            login: login.to_string(),
            reason: e.to_string(),
        })
}

/// Authenticate one credential and list its top-level resources
///
/// Never returns an error: authentication and query failures are logged and
/// recorded as a failed outcome. An account with zero resources still counts
/// as a success, only the ability to authenticate and query matters.
pub async fn resource_probe(
    factory: &dyn SessionFactory,
    params: &ConnectionParams,
    credentials: &Credentials,
) -> ProbeOutcome {
    let started = Instant::now();
    let login = credentials.username().to_string();

    let result = check_resources(factory, params, credentials).await;
    let duration_ms = started.elapsed().as_millis() as u64;

    match result {
        Ok(nodes) => {
            tracing::debug!(login = %login, count = nodes.len(), duration_ms, "resources listed");
            ProbeOutcome {
                login,
                success: true,
                nodes,
                error: None,
                duration_ms,
            }
        }
        Err(err) => {
            tracing::warn!(login = %login, error = %err, "credential check failed");
            ProbeOutcome {
                login,
                success: false,
                nodes: Vec::new(),
                error: Some(err.to_string()),
                duration_ms,
            }
        }
    }
}

/// Reduce per-credential outcomes to the run verdict
///
/// The verdict is a logical OR: one successful credential is enough.
///
/// # Returns
/// * `Ok(n)` - number of successful credentials (at least one)
/// * `Err(ProbeError::NoSuccessfulCredential)` - none succeeded, including when
///   there was nothing to check
pub fn reduce_outcomes(outcomes: &[ProbeOutcome]) -> Result<usize, ProbeError> {
    let successes = outcomes.iter().filter(|o| o.success).count();
    if successes == 0 {
        return Err(ProbeError::NoSuccessfulCredential);
    }
    Ok(successes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mock_session::MockSessionFactory;
    use crate::models::{SecureString, Username};

    fn creds(login: &str, password: &str) -> Credentials {
        Credentials::new(Username::new(login).unwrap(), SecureString::new(password))
    }

    fn params() -> ConnectionParams {
        ConnectionParams::new("https", "mock", "client", "secret")
    }

    fn outcome(login: &str, success: bool) -> ProbeOutcome {
        ProbeOutcome {
            login: login.to_string(),
            success,
            nodes: Vec::new(),
            error: None,
            duration_ms: 0,
        }
    }

    #[tokio::test]
    async fn test_directory_probe_lists_users() {
        let factory =
            MockSessionFactory::new(&["admin", "alice"]).with_account("admin", "admin", &[]);
        let dir = directory_probe(&factory, &params(), &creds("admin", "admin"))
            .await
            .unwrap();
        assert_eq!(dir.count(), 2);
        assert_eq!(dir.logins(), vec!["admin", "alice"]);
    }

    #[tokio::test]
    async fn test_directory_probe_empty_directory() {
        let factory = MockSessionFactory::new(&[]).with_account("admin", "admin", &[]);
        let result = directory_probe(&factory, &params(), &creds("admin", "admin")).await;
        assert!(matches!(result, Err(ProbeError::NoUsersFound)));
    }

    #[tokio::test]
    async fn test_directory_probe_unreachable() {
        let factory = MockSessionFactory::unreachable();
        let result = directory_probe(&factory, &params(), &creds("admin", "admin")).await;
        assert!(matches!(result, Err(ProbeError::ServerUnreachable(_))));
    }

    #[tokio::test]
    async fn test_directory_probe_admin_rejected() {
        let factory = MockSessionFactory::new(&["admin"]).with_account("admin", "admin", &[]);
        let result = directory_probe(&factory, &params(), &creds("admin", "nope")).await;
        match result {
            Err(ProbeError::AuthenticationFailed { login, .. }) => assert_eq!(login, "admin"),
            other => panic!("expected AuthenticationFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_resource_probe_success() {
        let factory = MockSessionFactory::new(&["admin"]).with_account(
            "admin",
            "admin",
            &["common-files", "personal-files"],
        );
        let outcome = resource_probe(&factory, &params(), &creds("admin", "admin")).await;
        assert!(outcome.success);
        assert_eq!(outcome.resource_count(), 2);
        assert_eq!(outcome.nodes[1].path, "personal-files");
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn test_resource_probe_zero_nodes_is_success() {
        let factory = MockSessionFactory::new(&["bob"]).with_account("bob", "bob", &[]);
        let outcome = resource_probe(&factory, &params(), &creds("bob", "bob")).await;
        assert!(outcome.success);
        assert_eq!(outcome.resource_count(), 0);
    }

    #[tokio::test]
    async fn test_resource_probe_auth_failure_recorded() {
        let factory = MockSessionFactory::new(&["alice"]);
        let outcome = resource_probe(&factory, &params(), &creds("alice", "alice")).await;
        assert!(!outcome.success);
        let error = outcome.error.unwrap();
        assert!(error.contains("Authentication failed for alice"), "{}", error);
    }

    #[tokio::test]
    async fn test_resource_probe_query_failure_recorded() {
        let factory = MockSessionFactory::new(&["carol"]).with_failing_query("carol", "carol");
        let outcome = resource_probe(&factory, &params(), &creds("carol", "carol")).await;
        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("Could not list meta for carol"));
    }

    #[test]
    fn test_reduce_is_logical_or() {
        let outcomes = vec![
            outcome("a", false),
            outcome("b", true),
            outcome("c", false),
        ];
        assert_eq!(reduce_outcomes(&outcomes).unwrap(), 1);
    }

    #[test]
    fn test_reduce_all_failed() {
        let outcomes = vec![outcome("a", false), outcome("b", false)];
        assert!(matches!(
            reduce_outcomes(&outcomes),
            Err(ProbeError::NoSuccessfulCredential)
        ));
        assert!(matches!(
            reduce_outcomes(&[]),
            Err(ProbeError::NoSuccessfulCredential)
        ));
    }
}
