//! Mock sessions for testing without a real server
//!
//! Simulates the platform's user directory and per-account workspaces so the
//! probe workflow can be exercised end to end.

use super::session::{ApiSession, ResourceNode, SessionFactory, UserDirectory, UserEntry};
use crate::models::{ConnectionParams, Credentials};
use crate::utils::SessionError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What a mock account does once authenticated
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Bulk metadata returns these paths
    Workspaces(Vec<String>),
    /// Bulk metadata is rejected with HTTP 500
    QueryFails,
}

#[derive(Debug, Clone)]
struct MockAccount {
    password: String,
    behavior: MockBehavior,
}

/// Mock session factory
///
/// Unknown logins and wrong passwords are rejected with
/// `SessionError::Authentication`.
#[derive(Debug, Default)]
pub struct MockSessionFactory {
    users: Vec<String>,
    accounts: HashMap<String, MockAccount>,
    unreachable: bool,
    opened: AtomicUsize,
}

impl MockSessionFactory {
    /// Server whose directory lists `users`
    pub fn new(users: &[&str]) -> Self {
        Self {
            users: users.iter().map(|u| u.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Server that refuses every connection
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    /// Account that authenticates and sees `paths`
    pub fn with_account(mut self, login: &str, password: &str, paths: &[&str]) -> Self {
        self.accounts.insert(
            login.to_string(),
            MockAccount {
                password: password.to_string(),
                behavior: MockBehavior::Workspaces(paths.iter().map(|p| p.to_string()).collect()),
            },
        );
        self
    }

    /// Account that authenticates but whose metadata query fails
    pub fn with_failing_query(mut self, login: &str, password: &str) -> Self {
        self.accounts.insert(
            login.to_string(),
            MockAccount {
                password: password.to_string(),
                behavior: MockBehavior::QueryFails,
            },
        );
        self
    }

    /// Number of `open` calls, successful or not
    pub fn opened_count(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SessionFactory for MockSessionFactory {
    async fn open(
        &self,
        _params: &ConnectionParams,
        credentials: &Credentials,
    ) -> Result<Box<dyn ApiSession>, SessionError> {
        self.opened.fetch_add(1, Ordering::SeqCst);

        if self.unreachable {
            return Err(SessionError::Connection {
                message: "Connection refused".to_string(),
                transient: true,
            });
        }

        let login = credentials.username().as_str();
        match self.accounts.get(login) {
            Some(account) if account.password == credentials.password().as_str() => {
                Ok(Box::new(MockSession {
                    login: login.to_string(),
                    users: self.users.clone(),
                    behavior: account.behavior.clone(),
                }))
            }
            _ => Err(SessionError::Authentication),
        }
    }
}

/// Session handed out by [`MockSessionFactory`]
pub struct MockSession {
    login: String,
    users: Vec<String>,
    behavior: MockBehavior,
}

#[async_trait::async_trait]
impl ApiSession for MockSession {
    fn login(&self) -> &str {
        &self.login
    }

    async fn search_users(&self) -> Result<UserDirectory, SessionError> {
        Ok(UserDirectory {
            total: self.users.len() as u64,
            users: self
                .users
                .iter()
                .map(|login| UserEntry {
                    login: login.clone(),
                })
                .collect(),
        })
    }

    async fn bulk_meta(&self, patterns: &[&str]) -> Result<Vec<ResourceNode>, SessionError> {
        if patterns.is_empty() {
            return Ok(Vec::new());
        }

        match &self.behavior {
            MockBehavior::Workspaces(paths) => Ok(paths
                .iter()
                .map(|path| ResourceNode { path: path.clone() })
                .collect()),
            MockBehavior::QueryFails => Err(SessionError::Api {
                status: 500,
                message: "internal error".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SecureString, Username};

    fn creds(login: &str, password: &str) -> Credentials {
        Credentials::new(Username::new(login).unwrap(), SecureString::new(password))
    }

    fn params() -> ConnectionParams {
        ConnectionParams::new("https", "mock", "client", "secret")
    }

    #[tokio::test]
    async fn test_mock_rejects_wrong_password() {
        let factory = MockSessionFactory::new(&["admin"]).with_account("admin", "admin", &[]);
        let result = factory.open(&params(), &creds("admin", "wrong")).await;
        assert!(matches!(result, Err(SessionError::Authentication)));
        assert_eq!(factory.opened_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_lists_workspaces() {
        let factory =
            MockSessionFactory::new(&["admin"]).with_account("admin", "admin", &["common-files"]);
        let session = factory.open(&params(), &creds("admin", "admin")).await.unwrap();
        let nodes = session.bulk_meta(&["/*"]).await.unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].path, "common-files");
    }
}
