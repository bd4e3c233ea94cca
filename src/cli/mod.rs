//! CLI module for cf-invalidate
//!
//! One invocation issues exactly one invalidation:
//!
//! ```bash
//! cf-invalidate AKID SECRET EXAMPLE123 /images/logo.png /index.html
//! ```
//!
//! When CloudFront rejects the request, the raw response body is printed to
//! stdout before the error is returned.

pub mod args;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cloudfront::{Connection, Credentials};
use crate::config::{self, Config};
use args::Cli;

/// Run the invalidate command
pub async fn run(cli: Cli) -> Result<()> {
    cli.validate().context("Invalid arguments")?;

    let config = get_config(&cli).context("Failed to get configuration")?;
    debug!(host = %config.api.host, files = cli.files.len(), "Starting cf-invalidate");

    let credentials = Credentials::new(cli.access_key_id.clone(), cli.secret_key.clone());
    let connection = Connection::open_with(credentials, &config.api)
        .context("Failed to open CloudFront connection")?;

    let result = connection
        .distribution(cli.distribution_id.as_str())
        .invalidate(cli.files.as_slice())
        .await;

    connection.close();

    if let Err(err) = result {
        if let Some(body) = err.raw_body() {
            println!("{}", String::from_utf8_lossy(body));
        }
        return Err(err).context(format!(
            "Invalidation failed for distribution {}",
            cli.distribution_id
        ));
    }

    info!(
        distribution = %cli.distribution_id,
        files = cli.files.len(),
        "Invalidation created"
    );
    Ok(())
}

/// Loaded configuration with command-line overrides applied
fn get_config(cli: &Cli) -> Result<Config> {
    let mut config = config::load_config(cli.config.as_deref())?;

    if let Some(host) = &cli.api_host {
        config.api.host = host.clone();
    }
    if cli.insecure {
        config.api.insecure_tls = true;
    }

    config.api.validate()?;
    Ok(config)
}

/// Initialize logging; RUST_LOG takes precedence over `level`
pub fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_config_overrides() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "api:\n  host: from-file.example.test\n").unwrap();

        let cli = Cli::try_parse_from([
            "cf-invalidate",
            "--config",
            path.to_str().unwrap(),
            "--api-host",
            "from-flag.example.test",
            "--insecure",
            "AKID",
            "SECRET",
            "E1",
            "/a",
        ])
        .unwrap();

        let config = get_config(&cli).unwrap();
        assert_eq!(config.api.host, "from-flag.example.test");
        assert!(config.api.insecure_tls);
    }
}
