use thiserror::Error;

pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

/// Network listener configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Listener {
    pub host: String,
    pub port: u16,
}

/// Gateway configuration, resolved from the environment at startup.
/// A missing required variable aborts startup before any traffic is
/// accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub listener: Listener,
    pub queue_url: String,
    pub credential_parameter: String,
    pub region: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("GATEWAY_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("GATEWAY_PORT") {
            None => 8080,
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                name: "GATEWAY_PORT",
                value: raw.clone(),
            })?,
        };

        Ok(Config {
            listener: Listener { host, port },
            queue_url: lookup("SQS_QUEUE_URL").ok_or(ConfigError::MissingVar("SQS_QUEUE_URL"))?,
            credential_parameter: lookup("SSM_PARAMETER_NAME")
                .ok_or(ConfigError::MissingVar("SSM_PARAMETER_NAME"))?,
            region: lookup("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
        })
    }
}
