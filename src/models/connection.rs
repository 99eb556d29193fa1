//! Connection parameters shared by every session of a run

use crate::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, USER_AGENT};
use std::fmt;
use std::time::Duration;

/// Where and how to reach the platform API
///
/// Built once from command-line input and passed by reference to every check.
/// Empty strings are allowed here; `validate_parameters` reports them.
#[derive(Clone)]
pub struct ConnectionParams {
    pub scheme: String,
    /// Host name, optionally with `:port` and a path prefix (`host/cells`)
    pub host: String,
    pub client_id: String,
    /// SECURITY: never logged
    pub client_secret: String,
    pub skip_verify: bool,
    pub user_agent: String,
    pub timeout: Duration,
}

impl ConnectionParams {
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            skip_verify: false,
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Split a full server URL (e.g. `https://files.example.com:8080/cells`) into
    /// scheme and host; the port and any path prefix stay with the host
    pub fn split_url(raw: &str) -> Option<(String, String)> {
        let parsed = url::Url::parse(raw.trim()).ok()?;
        let mut host = parsed.host_str()?.to_string();
        if let Some(port) = parsed.port() {
            host.push_str(&format!(":{}", port));
        }
        host.push_str(parsed.path().trim_end_matches('/'));
        Some((parsed.scheme().to_string(), host))
    }

    /// `scheme://host` without a trailing slash
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}",
            self.scheme.trim(),
            self.host.trim().trim_end_matches('/')
        )
    }

    /// Absolute URL for an API path starting with `/`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // SECURITY: Never reveal the client secret
        f.debug_struct("ConnectionParams")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("skip_verify", &self.skip_verify)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url() {
        let params = ConnectionParams::new("https", "files.example.com/", "cli", "secret");
        assert_eq!(params.base_url(), "https://files.example.com");
        assert_eq!(
            params.endpoint("/a/user"),
            "https://files.example.com/a/user"
        );
        assert_eq!(params.user_agent, "demo-monitor/1.1");
    }

    #[test]
    fn test_debug_hides_client_secret() {
        let params = ConnectionParams::new("https", "files.example.com", "cli", "topsecret");
        let debug_output = format!("{:?}", params);
        assert!(debug_output.contains("files.example.com"));
        assert!(!debug_output.contains("topsecret"));
    }

    #[test]
    fn test_split_url() {
        assert_eq!(
            ConnectionParams::split_url("https://demo.example.com"),
            Some(("https".to_string(), "demo.example.com".to_string()))
        );
        assert_eq!(
            ConnectionParams::split_url("http://localhost:8080/"),
            Some(("http".to_string(), "localhost:8080".to_string()))
        );
        assert_eq!(ConnectionParams::split_url("not a url"), None);
    }

    #[test]
    fn test_split_url_keeps_path_prefix() {
        let (scheme, host) =
            ConnectionParams::split_url("https://files.example.com:8443/cells/").unwrap();
        assert_eq!(host, "files.example.com:8443/cells");

        let params = ConnectionParams::new(scheme, host, "cli", "secret");
        assert_eq!(
            params.endpoint("/a/user"),
            "https://files.example.com:8443/cells/a/user"
        );
    }
}
