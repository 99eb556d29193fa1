//! # Application-Wide Constants
//!
//! Endpoint paths, defaults and limits used by the probe, kept in one place so
//! that a change to the upstream API touches a single file.
//!
//! ## Usage
//!
//! ```rust
//! use demo_monitor::constants::*;
//!
//! assert_eq!(TOP_LEVEL_PATTERN, "/*");
//! ```

// ============================================================================
// Identity
// ============================================================================

/// `User-Agent` header sent with every request
pub const USER_AGENT: &str = "demo-monitor/1.1";

/// Accounts expected to exist on a demo instance, as `(login, password)`
///
/// Used when no `--credential` is given on the command line.
pub const DEFAULT_DEMO_USERS: &[(&str, &str)] = &[("admin", "admin"), ("alice", "alice")];

// ============================================================================
// Upstream API
// ============================================================================

/// OAuth2 token endpoint (resource-owner password grant)
pub const TOKEN_PATH: &str = "/oidc/oauth2/token";

/// Scopes requested with the password grant
pub const TOKEN_SCOPE: &str = "openid email profile pydio offline";

/// "Search all users" endpoint
pub const SEARCH_USERS_PATH: &str = "/a/user";

/// Bulk metadata endpoint
pub const BULK_META_PATH: &str = "/a/meta/bulk/get";

/// Path pattern matching every top-level entry (workspace) of an account
pub const TOP_LEVEL_PATTERN: &str = "/*";

// ============================================================================
// Timeouts and Retries
// ============================================================================

/// Per-request timeout for the HTTP transport
///
/// **Rationale**: a demo server under load can take several seconds to list
/// workspaces; 30 seconds still fails well within a monitoring interval.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connect timeout, separate from the request timeout so that a dead host
/// fails fast
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Retries for transient transport failures (not counting the first attempt)
pub const DEFAULT_RETRIES: u32 = 2;

// ============================================================================
// Logging
// ============================================================================

/// Environment variable enabling debug-level logging (`1` to enable)
pub const LOG_VERBOSE_ENV: &str = "DEMO_MONITOR_LOG_VERBOSE";
