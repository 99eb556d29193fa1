//! The set of accounts expected to exist on the target server

use crate::constants::DEFAULT_DEMO_USERS;
use crate::models::{Credentials, SecureString, Username};
use crate::utils::CredentialError;
use std::collections::BTreeMap;

/// Fixed mapping from login to password
///
/// Iteration is ordered by login so that reports are reproducible. Nothing in
/// the probe depends on that order.
#[derive(Clone, Debug, Default)]
pub struct CredentialSet {
    entries: BTreeMap<Username, SecureString>,
}

impl CredentialSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The accounts shipped with a demo instance
    pub fn demo() -> Self {
        let mut set = Self::new();
        for (login, password) in DEFAULT_DEMO_USERS {
            // Constants are known to be valid logins.
            if let Ok(username) = Username::new(*login) {
                set.entries.insert(username, SecureString::new(*password));
            }
        }
        set
    }

    /// Build a set from `login:password` arguments
    ///
    /// A login given twice keeps its last password.
    pub fn parse_all<I, S>(pairs: I) -> Result<Self, CredentialError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for pair in pairs {
            set.insert(pair.as_ref().parse()?);
        }
        Ok(set)
    }

    pub fn insert(&mut self, credentials: Credentials) {
        self.entries.insert(
            credentials.username().clone(),
            credentials.password().clone(),
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Credentials in login order
    pub fn iter(&self) -> impl Iterator<Item = Credentials> + '_ {
        self.entries
            .iter()
            .map(|(login, password)| Credentials::new(login.clone(), password.clone()))
    }
}
