//! demo-monitor - ping a demo server
//!
//! Lists the users of the server, then tries to list the workspaces of each
//! known account. Exits 0 when at least one account could do so.

use clap::Parser;
use demo_monitor::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRIES};
use demo_monitor::utils::RetryConfig;
use demo_monitor::{
    logger, ConnectionParams, CredentialSet, Credentials, Orchestrator, ProbeError,
    RestSessionFactory, RunReport,
};
use std::time::Duration;

/// Ping a demo server
///
/// Sends a search-users request to the server and then tries to list the
/// workspaces of each known account.
#[derive(Parser, Debug)]
#[command(name = "demo-monitor")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Full URL of the server; fills scheme and host when they are not given
    #[arg(short = 'a', long, env = "DEMO_MONITOR_URL")]
    url: Option<String>,

    /// URL scheme (http or https)
    #[arg(long, env = "DEMO_MONITOR_SCHEME")]
    scheme: Option<String>,

    /// Server host, optionally with a port
    #[arg(long, env = "DEMO_MONITOR_HOST")]
    host: Option<String>,

    /// OAuth2 client identifier
    #[arg(long, env = "DEMO_MONITOR_CLIENT_ID")]
    client_id: Option<String>,

    /// OAuth2 client secret
    #[arg(long, env = "DEMO_MONITOR_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    /// Admin login
    #[arg(short = 'u', long, env = "DEMO_MONITOR_USER")]
    user: Option<String>,

    /// Admin password
    #[arg(short = 'p', long, env = "DEMO_MONITOR_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Skip TLS verification (unknown authority, incorrect FQDN)
    #[arg(long, env = "DEMO_MONITOR_SKIP_VERIFY")]
    skip_verify: bool,

    /// Account to check, replaces the default demo accounts (repeatable)
    #[arg(short = 'c', long = "credential", value_name = "LOGIN:PASSWORD")]
    credentials: Vec<Credentials>,

    /// Check accounts concurrently
    #[arg(long)]
    parallel: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Retries for transient network failures
    #[arg(long, default_value_t = DEFAULT_RETRIES)]
    retries: u32,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Build connection parameters; missing values stay empty for the validator
    fn connection_params(&self) -> ConnectionParams {
        let (url_scheme, url_host) = match self.url.as_deref() {
            Some(raw) => {
                let parts = ConnectionParams::split_url(raw);
                if parts.is_none() {
                    tracing::warn!(url = raw, "could not parse server URL");
                }
                parts.unzip()
            }
            None => (None, None),
        };

        let mut params = ConnectionParams::new(
            self.scheme.clone().or(url_scheme).unwrap_or_default(),
            self.host.clone().or(url_host).unwrap_or_default(),
            self.client_id.clone().unwrap_or_default(),
            self.client_secret.clone().unwrap_or_default(),
        );
        params.skip_verify = self.skip_verify;
        params.timeout = Duration::from_secs(self.timeout_secs);
        params
    }

    fn credential_set(&self) -> CredentialSet {
        if self.credentials.is_empty() {
            return CredentialSet::demo();
        }
        let mut set = CredentialSet::new();
        for credentials in &self.credentials {
            set.insert(credentials.clone());
        }
        set
    }
}

async fn run(cli: Cli) -> Result<RunReport, ProbeError> {
    let params = cli.connection_params();
    let credentials = cli.credential_set();
    let factory = RestSessionFactory::new(RetryConfig::with_max_retries(cli.retries));

    let mut stdout = std::io::stdout().lock();
    Orchestrator::new(&factory, &params, &credentials)
        .parallel(cli.parallel)
        .run(
            cli.user.as_deref().unwrap_or_default(),
            cli.password.as_deref().unwrap_or_default(),
            &mut stdout,
        )
        .await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match run(cli).await {
        Ok(report) => {
            tracing::debug!(
                users = report.user_count,
                successes = report.successes,
                "server is serving content"
            );
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}
