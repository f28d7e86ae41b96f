use async_trait::async_trait;
use aws_config::SdkConfig;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SecretError {
    #[error("failed to fetch secret {name}: {message}")]
    Fetch { name: String, message: String },

    #[error("secret {0} has no value")]
    Missing(String),
}

/// A key-value secret store queried by name.
#[async_trait]
pub trait SecretSource: Send + Sync {
    async fn fetch(&self, name: &str) -> Result<String, SecretError>;
}

/// AWS SSM Parameter Store implementation of [`SecretSource`].
///
/// Parameters are fetched with decryption enabled so SecureString
/// values come back in the clear.
pub struct SsmSecretSource {
    client: aws_sdk_ssm::Client,
}

impl SsmSecretSource {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_ssm::Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl SecretSource for SsmSecretSource {
    async fn fetch(&self, name: &str) -> Result<String, SecretError> {
        let output = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
            .map_err(|e| SecretError::Fetch {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        output
            .parameter()
            .and_then(|parameter| parameter.value())
            .map(str::to_string)
            .ok_or_else(|| SecretError::Missing(name.to_string()))
    }
}
