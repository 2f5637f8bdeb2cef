use anyhow::{Context, Result};
use clap::Parser;
use std::env;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub bucket: String,
    pub endpoint: String,
    pub region: String,
    pub path_style: bool,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "HTTP image gateway for an S3-compatible object store")]
pub struct Args {
    /// Host to bind to (overrides IMAGE_GATEWAY_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides IMAGE_GATEWAY_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Bucket holding the images (overrides IMAGE_GATEWAY_BUCKET)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Object-store endpoint URL (overrides IMAGE_GATEWAY_ENDPOINT)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Object-store region (overrides IMAGE_GATEWAY_REGION)
    #[arg(long)]
    pub region: Option<String>,

    /// Use path-style bucket addressing (overrides IMAGE_GATEWAY_PATH_STYLE)
    #[arg(long)]
    pub path_style: Option<bool>,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        // Parse CLI once
        let args = Args::parse();
        Self::merge(args)
    }

    /// Merge parsed CLI args over the environment, falling back to the
    /// documented defaults (local S3-compatible endpoint, port 3000).
    fn merge(args: Args) -> Result<Self> {
        let env_host = env::var("IMAGE_GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match env::var("IMAGE_GATEWAY_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing IMAGE_GATEWAY_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 3000,
            Err(err) => return Err(err).context("reading IMAGE_GATEWAY_PORT"),
        };
        let env_bucket =
            env::var("IMAGE_GATEWAY_BUCKET").unwrap_or_else(|_| "local-bucket-wll".into());
        let env_endpoint =
            env::var("IMAGE_GATEWAY_ENDPOINT").unwrap_or_else(|_| "http://localhost:4566".into());
        let env_region = env::var("IMAGE_GATEWAY_REGION").unwrap_or_else(|_| "us-east-1".into());
        let env_path_style = match env::var("IMAGE_GATEWAY_PATH_STYLE") {
            Ok(value) => value
                .parse::<bool>()
                .with_context(|| format!("parsing IMAGE_GATEWAY_PATH_STYLE value `{}`", value))?,
            Err(env::VarError::NotPresent) => true,
            Err(err) => return Err(err).context("reading IMAGE_GATEWAY_PATH_STYLE"),
        };

        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            bucket: args.bucket.unwrap_or(env_bucket),
            endpoint: args.endpoint.unwrap_or(env_endpoint),
            region: args.region.unwrap_or(env_region),
            path_style: args.path_style.unwrap_or(env_path_style),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> Args {
        Args {
            host: None,
            port: None,
            bucket: None,
            endpoint: None,
            region: None,
            path_style: None,
        }
    }

    #[test]
    fn args_override_defaults() {
        let cfg = AppConfig::merge(Args {
            host: Some("127.0.0.1".into()),
            port: Some(8080),
            bucket: Some("photos".into()),
            endpoint: Some("http://minio:9000".into()),
            region: None,
            path_style: Some(false),
        })
        .unwrap();

        assert_eq!(cfg.addr(), "127.0.0.1:8080");
        assert_eq!(cfg.bucket, "photos");
        assert_eq!(cfg.endpoint, "http://minio:9000");
        assert!(!cfg.path_style);
    }

    #[test]
    fn defaults_target_a_local_endpoint() {
        let cfg = AppConfig::merge(empty_args()).unwrap();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.bucket, "local-bucket-wll");
        assert_eq!(cfg.endpoint, "http://localhost:4566");
        assert_eq!(cfg.region, "us-east-1");
        assert!(cfg.path_style);
    }
}
