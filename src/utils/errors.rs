//! Error types for demo-monitor
//!
//! All error types use thiserror for clean error handling.
//! SECURITY: Error messages MUST NOT contain passwords or access tokens.

use std::error::Error;
use std::io;

/// Top-level error type for a probe run
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("All flags are compulsory. Missing values for: {}", .fields.join(", "))]
    MissingParameter { fields: Vec<&'static str> },

    #[error("Invalid value for {field}: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error("Could not list users: {0}")]
    ServerUnreachable(String),

    #[error("No user at all on this instance")]
    NoUsersFound,

    #[error("Authentication failed for {login}: {reason}")]
    AuthenticationFailed { login: String, reason: String },

    #[error("Could not list meta for {login}: {reason}")]
    QueryFailed { login: String, reason: String },

    #[error("Could not find any workspace for any user: check the server to further investigate")]
    NoSuccessfulCredential,
}

impl ProbeError {
    /// Process exit status for a fatal error
    ///
    /// - 1: no credential succeeded (also used for per-credential errors)
    /// - 2: admin authentication rejected
    /// - 3: server unreachable
    /// - 4: missing or invalid parameters
    /// - 5: empty user directory
    pub fn exit_code(&self) -> i32 {
        match self {
            ProbeError::NoSuccessfulCredential | ProbeError::QueryFailed { .. } => 1,
            ProbeError::AuthenticationFailed { .. } => 2,
            ProbeError::ServerUnreachable(_) => 3,
            ProbeError::MissingParameter { .. } | ProbeError::InvalidParameter { .. } => 4,
            ProbeError::NoUsersFound => 5,
        }
    }
}

/// Errors from the remote API transport
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The request never got an HTTP answer. `transient` is set from the
    /// underlying I/O error when the connection was refused, reset or timed out.
    #[error("Connection failed: {message}")]
    Connection { message: String, transient: bool },

    #[error("Authentication failed")]
    Authentication,

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl SessionError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            SessionError::Connection { transient, .. } => *transient,
            SessionError::Api { status, .. } => matches!(status, 502..=504),
            SessionError::Authentication | SessionError::Decode(_) => false,
        }
    }
}

/// Kind of the first I/O error in the source chain of `err`
fn io_error_kind(err: &(dyn Error + 'static)) -> Option<io::ErrorKind> {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            return Some(io_err.kind());
        }
        source = cause.source();
    }
    None
}

fn is_transient_io(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::TimedOut
    )
}

/// Error message followed by its causes, `reqwest` keeps the useful part there
fn with_causes(err: &(dyn Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl From<reqwest::Error> for SessionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return SessionError::Decode(with_causes(&err));
        }
        // TLS handshake failures are connect errors too, but without an I/O cause.
        let transient = err.is_timeout()
            || (err.is_connect() && io_error_kind(&err).is_some_and(is_transient_io));
        SessionError::Connection {
            message: with_causes(&err),
            transient,
        }
    }
}

/// Errors from credential parsing
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Invalid credential format, expected login:password")]
    InvalidFormat,

    #[error("Invalid username format: {0}")]
    InvalidUsername(String),
}
