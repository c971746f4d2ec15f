//! Command-line interface and the per-run settings it produces.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use encoding_rs::Encoding;

use crate::directions::ClientConfig;

use super::error::ConfigError;

/// Enrich a shipping-address CSV with road mileage from a fixed origin.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "zip-mileage",
    about = "Fill ZIP_MILEAGE and ZIP_ADDRESS in a shipping CSV, one directions lookup per postal code"
)]
pub struct Cli {
    /// Properties file holding api.key and from.address
    #[arg(long, env = "ZIP_MILEAGE_CONFIG", default_value = "maps.properties")]
    pub config: PathBuf,

    /// Input CSV with a header row
    #[arg(long, env = "ZIP_MILEAGE_INPUT", default_value = "ship_to_addresses.csv")]
    pub input: PathBuf,

    /// Output CSV, overwritten on every run
    #[arg(
        long,
        env = "ZIP_MILEAGE_OUTPUT",
        default_value = "ship_to_addresses_out.csv"
    )]
    pub output: PathBuf,

    /// Text encoding of the input and output files. Output characters the
    /// encoding cannot represent are written as `&#NNNN;` references
    #[arg(long, env = "ZIP_MILEAGE_ENCODING", default_value = "ISO-8859-1")]
    pub encoding: String,

    /// Maximum directions queries started per second
    #[arg(long, env = "ZIP_MILEAGE_RATE_LIMIT", default_value_t = 3)]
    pub rate_limit: u32,

    /// Seconds allowed to connect to the directions service
    #[arg(long, default_value_t = 2)]
    pub connect_timeout_secs: u64,

    /// Seconds allowed between reads of a directions response
    #[arg(long, default_value_t = 2)]
    pub read_timeout_secs: u64,

    /// Seconds allowed to send a directions request
    #[arg(long, default_value_t = 2)]
    pub write_timeout_secs: u64,

    /// Override the directions endpoint
    #[arg(long)]
    pub base_url: Option<String>,

    /// Serve directions from `{postal code}.json` fixtures in this directory
    #[arg(long)]
    pub mock_data: Option<PathBuf>,
}

impl Cli {
    /// Validate the file-related flags into a [`RunConfig`].
    pub fn run_config(&self) -> Result<RunConfig, ConfigError> {
        let encoding = Encoding::for_label(self.encoding.trim().as_bytes())
            .ok_or_else(|| ConfigError::UnknownEncoding(self.encoding.clone()))?;

        Ok(RunConfig {
            input: self.input.clone(),
            output: self.output.clone(),
            encoding,
        })
    }

    /// Build the directions client configuration for `api_key`.
    pub fn client_config(&self, api_key: &str) -> Result<ClientConfig, ConfigError> {
        if self.rate_limit == 0 {
            return Err(ConfigError::Invalid {
                name: "rate-limit",
                reason: "must be at least 1 query per second",
            });
        }

        let mut config = ClientConfig::new(api_key)
            .with_query_rate(self.rate_limit)
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .with_read_timeout(Duration::from_secs(self.read_timeout_secs))
            .with_write_timeout(Duration::from_secs(self.write_timeout_secs));

        if let Some(url) = &self.base_url {
            config = config.with_base_url(url);
        }

        Ok(config)
    }
}

/// File locations and encoding for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// CSV to read.
    pub input: PathBuf,
    /// CSV to write.
    pub output: PathBuf,
    /// Encoding for both files.
    pub encoding: &'static Encoding,
}

impl RunConfig {
    /// Create a run config with an explicit encoding.
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        encoding: &'static Encoding,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            encoding,
        }
    }
}
