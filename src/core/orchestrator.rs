//! Probe run orchestration
//!
//! Drives one run through its states:
//! `ValidateParams -> CheckUsers -> CheckCredential (each) -> Reduce`.
//! Validation and user-check failures end the run immediately; credential
//! failures only count against the final verdict.

use super::credential::CredentialSet;
use super::probes::{directory_probe, reduce_outcomes, resource_probe, ProbeOutcome};
use super::session::{SessionFactory, UserDirectory};
use super::validation::validate_parameters;
use crate::models::{ConnectionParams, Credentials};
use crate::utils::ProbeError;
use futures::future::join_all;
use std::io::Write;

/// Summary of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Users reported by the directory check
    pub user_count: u64,
    /// One outcome per credential, in login order
    pub outcomes: Vec<ProbeOutcome>,
    /// Number of credentials that authenticated and queried successfully
    pub successes: usize,
}

/// Runs the verification workflow for one server
pub struct Orchestrator<'a> {
    factory: &'a dyn SessionFactory,
    params: &'a ConnectionParams,
    credentials: &'a CredentialSet,
    parallel: bool,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        factory: &'a dyn SessionFactory,
        params: &'a ConnectionParams,
        credentials: &'a CredentialSet,
    ) -> Self {
        Self {
            factory,
            params,
            credentials,
            parallel: false,
        }
    }

    /// Check credentials concurrently instead of one after another
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Execute a full run, writing the human-readable report to `out`
    ///
    /// # Errors
    ///
    /// Any fatal [`ProbeError`]: `MissingParameter`, `AuthenticationFailed` or
    /// `ServerUnreachable` for the admin account, `NoUsersFound`, or
    /// `NoSuccessfulCredential` once every credential has been tried.
    pub async fn run<W: Write>(
        &self,
        admin_login: &str,
        admin_password: &str,
        out: &mut W,
    ) -> Result<RunReport, ProbeError> {
        let admin = validate_parameters(self.params, admin_login, admin_password)?;
        tracing::info!(
            server = %self.params.base_url(),
            credentials = self.credentials.len(),
            parallel = self.parallel,
            "starting probe"
        );

        let directory = directory_probe(self.factory, self.params, &admin).await?;
        print_directory(out, &directory);

        let outcomes = if self.parallel {
            self.check_parallel(out).await
        } else {
            self.check_sequential(out).await
        };

        let successes = reduce_outcomes(&outcomes)?;
        tracing::info!(
            successes,
            attempted = outcomes.len(),
            "probe finished"
        );

        Ok(RunReport {
            user_count: directory.count(),
            outcomes,
            successes,
        })
    }

    async fn check_sequential<W: Write>(&self, out: &mut W) -> Vec<ProbeOutcome> {
        let mut outcomes = Vec::with_capacity(self.credentials.len());
        for credentials in self.credentials.iter() {
            print_header(out, credentials.username().as_str());
            let outcome = resource_probe(self.factory, self.params, &credentials).await;
            print_outcome(out, &outcome);
            outcomes.push(outcome);
        }
        outcomes
    }

    async fn check_parallel<W: Write>(&self, out: &mut W) -> Vec<ProbeOutcome> {
        // join_all keeps input order, one slot per credential.
        let checks = self.credentials.iter().map(|credentials: Credentials| async move {
            resource_probe(self.factory, self.params, &credentials).await
        });
        let outcomes = join_all(checks).await;

        for outcome in &outcomes {
            print_header(out, &outcome.login);
            print_outcome(out, outcome);
        }
        outcomes
    }
}

// Console output is best effort: a closed stdout must not change the verdict.

fn print_directory<W: Write>(out: &mut W, directory: &UserDirectory) {
    let _ = writeln!(
        out,
        "Found {} users in this instance: {}.",
        directory.count(),
        directory.logins().join(", ")
    );
}

fn print_header<W: Write>(out: &mut W, login: &str) {
    let _ = writeln!(out, " ---------------- {} ----------------", login);
}

fn print_outcome<W: Write>(out: &mut W, outcome: &ProbeOutcome) {
    if !outcome.success {
        return;
    }
    let _ = writeln!(
        out,
        "* {} workspaces for {}",
        outcome.resource_count(),
        outcome.login
    );
    for node in &outcome.nodes {
        let _ = writeln!(out, "  - {}", node.path);
    }
}
