use anyhow::{Context, bail};
use clap::Parser;
use core::time::Duration;
use regid::Credential;
use std::path::PathBuf;

/// Root of the directory service.
pub const DEFAULT_BASE_URL: &str = "https://api.regid.dev/v1";

/// Credential compiled into the binary, taken from `REGID_API_KEY` at build
/// time. Empty means no credential header is sent unless one is supplied at
/// runtime.
pub const DEFAULT_API_KEY: &str = match option_env!("REGID_API_KEY") {
    Some(key) => key,
    None => "",
};

/// Runtime configuration for the `regid-export` binary.
///
/// Every setting has a compiled-in default, so the exporter runs with no
/// arguments. Values can be overridden from the command line, the
/// environment, or a `.env` file.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "regid-export",
    version,
    about = "Export the region directory as per-region JSON documents with short identifiers"
)]
pub struct CliArgs {
    /// Base URL of the directory service.
    ///
    /// Regions are read from `{base}/regions` and sub-regions from
    /// `{base}/regions/{code}/sub-regions`.
    ///
    /// Environment variable: `REGID_BASE_URL`
    #[arg(long, env = "REGID_BASE_URL", default_value_t = String::from(DEFAULT_BASE_URL))]
    pub base_url: String,

    /// Name of the header carrying the credential.
    ///
    /// Environment variable: `REGID_API_KEY_HEADER`
    #[arg(long, env = "REGID_API_KEY_HEADER", default_value_t = String::from("x-api-key"))]
    pub api_key_header: String,

    /// Credential sent with every request.
    ///
    /// Environment variable: `REGID_API_KEY`
    #[arg(long, env = "REGID_API_KEY", default_value_t = String::from(DEFAULT_API_KEY), hide_env_values = true, hide_default_value = true)]
    pub api_key: String,

    /// Directory receiving `index.json` and `regions/`.
    ///
    /// Environment variable: `REGID_OUT_DIR`
    #[arg(long, env = "REGID_OUT_DIR", default_value = "data")]
    pub out_dir: PathBuf,

    /// Pause after each region, in milliseconds.
    ///
    /// Applied whether the region succeeded or not, to stay polite to the
    /// service. Set to 0 against a local mirror.
    ///
    /// Environment variable: `REGID_DELAY_MS`
    #[arg(long, env = "REGID_DELAY_MS", default_value_t = 300)]
    pub delay_ms: u64,

    /// Per-request timeout, in seconds.
    ///
    /// Environment variable: `REGID_TIMEOUT_SECS`
    #[arg(long, env = "REGID_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub base_url: String,
    pub credential: Option<Credential>,
    pub out_dir: PathBuf,
    pub delay: Duration,
    pub timeout: Duration,
}

impl TryFrom<CliArgs> for ExportConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let base_url = args.base_url.trim();
        if base_url.is_empty() {
            bail!("REGID_BASE_URL must not be empty");
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            bail!("REGID_BASE_URL ({base_url}) must start with http:// or https://");
        }

        if args.timeout_secs == 0 {
            bail!("REGID_TIMEOUT_SECS must be greater than 0");
        }

        let credential = if args.api_key.is_empty() {
            None
        } else {
            Some(
                Credential::new(&args.api_key_header, &args.api_key)
                    .context("invalid REGID_API_KEY_HEADER or REGID_API_KEY")?,
            )
        };

        Ok(Self {
            base_url: base_url.to_owned(),
            credential,
            out_dir: args.out_dir,
            delay: Duration::from_millis(args.delay_ms),
            timeout: Duration::from_secs(args.timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<ExportConfig> {
        let args =
            CliArgs::try_parse_from(std::iter::once("regid-export").chain(args.iter().copied()))?;
        ExportConfig::try_from(args)
    }

    #[test]
    fn runs_without_arguments() {
        let config = parse(&[]).unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.out_dir, PathBuf::from("data"));
        assert_eq!(config.delay, Duration::from_millis(300));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn explicit_key_becomes_credential() {
        let config = parse(&["--api-key", "secret", "--api-key-header", "x-token"]).unwrap();
        let credential = config.credential.unwrap();
        assert_eq!(credential.header_name().as_str(), "x-token");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse(&["--base-url", "ftp://example.org"]).is_err());
        assert!(parse(&["--base-url", "  "]).is_err());
        assert!(parse(&["--timeout-secs", "0"]).is_err());
        assert!(parse(&["--api-key", "k", "--api-key-header", "no spaces allowed"]).is_err());
    }
}
