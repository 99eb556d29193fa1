//! Pre-flight validation of invocation parameters
//!
//! Runs before any network call. Every empty field is reported in a single
//! error so the operator can fix the invocation in one go.

use crate::models::{ConnectionParams, Credentials, SecureString, Username};
use crate::utils::ProbeError;

/// Check that every required parameter is present and build the admin credentials
///
/// Fields are checked in a fixed order: scheme, host, client identifier,
/// admin login, admin password, client secret. Whitespace-only values count
/// as missing.
///
/// # Returns
/// * `Ok(credentials)` - the admin account to use for the directory check
/// * `Err(ProbeError::MissingParameter)` - naming every empty field
/// * `Err(ProbeError::InvalidParameter)` - the admin login is not a usable username
pub fn validate_parameters(
    params: &ConnectionParams,
    admin_login: &str,
    admin_password: &str,
) -> Result<Credentials, ProbeError> {
    let checks: [(&'static str, &str); 6] = [
        ("scheme", params.scheme.as_str()),
        ("host", params.host.as_str()),
        ("client-id", params.client_id.as_str()),
        ("user", admin_login),
        ("password", admin_password),
        ("client-secret", params.client_secret.as_str()),
    ];

    let fields: Vec<&'static str> = checks
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if !fields.is_empty() {
        return Err(ProbeError::MissingParameter { fields });
    }

    let username = Username::new(admin_login).map_err(|e| ProbeError::InvalidParameter {
        field: "user",
        reason: e.to_string(),
    })?;

    Ok(Credentials::new(username, SecureString::new(admin_password)))
}
