use shared::secrets::{SecretError, SecretSource};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Resolves and caches the shared bearer credential.
///
/// The first successful resolution populates the cache; every later
/// call is a pure read with no store access. There is no expiry — a
/// resolved credential is trusted until process restart.
pub struct TokenValidator {
    source: Arc<dyn SecretSource>,
    parameter_name: String,
    cached: RwLock<Option<String>>,
}

impl TokenValidator {
    pub fn new(source: Arc<dyn SecretSource>, parameter_name: String) -> Self {
        Self {
            source,
            parameter_name,
            cached: RwLock::new(None),
        }
    }

    /// Fetches-or-returns-cached the credential value.
    pub async fn resolve(&self) -> Result<String, SecretError> {
        if let Some(token) = self.cached.read().await.as_ref() {
            return Ok(token.clone());
        }

        let mut cached = self.cached.write().await;
        // Another request may have resolved while we waited for the lock.
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }

        let token = self.source.fetch(&self.parameter_name).await?;
        tracing::info!(parameter = %self.parameter_name, "resolved shared credential");
        *cached = Some(token.clone());
        Ok(token)
    }

    /// Compares a caller-supplied credential against the resolved one.
    pub async fn validate(&self, candidate: &str) -> Result<bool, SecretError> {
        Ok(self.resolve().await? == candidate)
    }

    /// Replaces the cached value with a freshly fetched one. Not called
    /// on the request path; kept as an operational escape hatch.
    pub async fn refresh(&self) -> Result<String, SecretError> {
        let token = self.source.fetch(&self.parameter_name).await?;
        *self.cached.write().await = Some(token.clone());
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::StaticSecretSource;
    use std::sync::atomic::Ordering;

    fn validator(source: StaticSecretSource) -> (TokenValidator, Arc<StaticSecretSource>) {
        let source = Arc::new(source);
        (
            TokenValidator::new(source.clone(), "/courier/token".to_string()),
            source,
        )
    }

    #[tokio::test]
    async fn first_resolution_populates_the_cache() {
        let (validator, source) = validator(StaticSecretSource::new("sekrit"));

        assert_eq!(validator.resolve().await.unwrap(), "sekrit");
        assert!(validator.validate("sekrit").await.unwrap());
        assert!(!validator.validate("wrong").await.unwrap());

        // One fetch, despite three lookups.
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unreachable_store_propagates() {
        let (validator, source) = validator(StaticSecretSource::unavailable());

        assert!(validator.validate("anything").await.is_err());
        // A failed resolution must not poison the cache.
        assert!(validator.resolve().await.is_err());
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn refresh_fetches_again() {
        let (validator, source) = validator(StaticSecretSource::new("sekrit"));

        validator.resolve().await.unwrap();
        validator.refresh().await.unwrap();
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);

        // Later reads still come from the cache.
        validator.resolve().await.unwrap();
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }
}
