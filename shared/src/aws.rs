use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Loads shared AWS client configuration for the given region.
///
/// Credentials come from the default provider chain (environment,
/// profile, instance metadata).
pub async fn load_sdk_config(region: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await
}
