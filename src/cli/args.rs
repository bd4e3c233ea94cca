use clap::Parser;

/// cf-invalidate - Invalidate cached files of a CloudFront distribution
#[derive(Parser, Debug)]
#[command(name = "cf-invalidate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// AWS Access Key ID
    #[arg(value_name = "ACCESS_KEY_ID")]
    pub access_key_id: String,

    /// AWS Secret Access Key
    #[arg(value_name = "SECRET_KEY")]
    pub secret_key: String,

    /// CloudFront distribution id
    #[arg(value_name = "DISTRIBUTION_ID")]
    pub distribution_id: String,

    /// Paths to invalidate (e.g. /images/logo.png)
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    pub files: Vec<String>,

    /// Config file path (YAML); environment variables are used otherwise
    #[arg(long, env = "CF_INVALIDATE_CONFIG")]
    pub config: Option<String>,

    /// Override the API host
    #[arg(long)]
    pub api_host: Option<String>,

    /// Disable SSL certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Validate arguments clap cannot check on its own
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.access_key_id.trim().is_empty() {
            anyhow::bail!("Access key id cannot be empty");
        }

        if self.distribution_id.trim().is_empty() {
            anyhow::bail!("Distribution id cannot be empty");
        }

        if let Some(path) = self.files.iter().find(|f| f.trim().is_empty()) {
            anyhow::bail!("Invalid path to invalidate: {:?}", path);
        }

        Ok(())
    }
}
