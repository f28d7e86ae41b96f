use thiserror::Error;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

/// Worker configuration, resolved from the environment at startup.
/// A missing required variable aborts startup before any item is
/// consumed.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub queue_url: String,
    pub bucket: String,
    pub region: String,
    pub poll_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let poll_interval_secs = match lookup("POLL_INTERVAL") {
            None => DEFAULT_POLL_INTERVAL_SECS,
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                name: "POLL_INTERVAL",
                value: raw.clone(),
            })?,
        };

        Ok(Config {
            queue_url: lookup("SQS_QUEUE_URL").ok_or(ConfigError::MissingVar("SQS_QUEUE_URL"))?,
            bucket: lookup("S3_BUCKET_NAME").ok_or(ConfigError::MissingVar("S3_BUCKET_NAME"))?,
            region: lookup("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            poll_interval_secs,
        })
    }
}
