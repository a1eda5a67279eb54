//! Upload configuration, read once at startup.

use std::env;

// Environment variables (required for real submission only).
pub const ENV_API_KEY: &str = "IBMCLOUD_API_KEY";
pub const ENV_BUCKET: &str = "IBMCLOUD_BUCKET";
pub const ENV_INSTANCE_ID: &str = "IBMCLOUD_COS_INSTANCE_ID";
pub const ENV_ENDPOINT: &str = "IBMCLOUD_COS_ENDPOINT";
// Optional.
pub const ENV_REMOTE_HOST: &str = "ASPERA_REMOTE_HOST";
pub const ENV_DESTINATION: &str = "COS_DESTINATION";

/// Default transfer-network entry point (Frankfurt shared service).
pub const DEFAULT_REMOTE_HOST: &str = "ats-sl-fra.aspera.io";

/// Default COS key prefix for uploads.
pub const DEFAULT_DESTINATION: &str = "/aspera-uploads";

/// Immutable upload configuration.
///
/// Constructed once (typically from the environment) and passed into
/// every component; library code never reads the environment itself.
/// Identity fields may be empty — they are only enforced immediately
/// before a real submission, so a dry run works without credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    pub api_key: String,
    pub bucket: String,
    pub service_instance_id: String,
    pub service_endpoint: String,
    pub remote_host: String,
    pub destination: String,
    pub create_dir: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            bucket: String::new(),
            service_instance_id: String::new(),
            service_endpoint: String::new(),
            remote_host: DEFAULT_REMOTE_HOST.into(),
            destination: DEFAULT_DESTINATION.into(),
            create_dir: true,
        }
    }
}

impl UploadConfig {
    /// Builds a config from the process environment, applying defaults
    /// for the optional fields. Missing required variables become empty
    /// strings; [`missing_required`](Self::missing_required) reports them
    /// when a real submission is about to happen.
    pub fn from_env() -> Self {
        Self {
            api_key: env::var(ENV_API_KEY).unwrap_or_default(),
            bucket: env::var(ENV_BUCKET).unwrap_or_default(),
            service_instance_id: env::var(ENV_INSTANCE_ID).unwrap_or_default(),
            service_endpoint: env::var(ENV_ENDPOINT).unwrap_or_default(),
            remote_host: env::var(ENV_REMOTE_HOST).unwrap_or_else(|_| DEFAULT_REMOTE_HOST.into()),
            destination: env::var(ENV_DESTINATION).unwrap_or_else(|_| DEFAULT_DESTINATION.into()),
            create_dir: true,
        }
    }

    /// Names of every required identity field that is currently empty.
    pub fn missing_required(&self) -> Vec<String> {
        let required = [
            (ENV_API_KEY, &self.api_key),
            (ENV_BUCKET, &self.bucket),
            (ENV_INSTANCE_ID, &self.service_instance_id),
            (ENV_ENDPOINT, &self.service_endpoint),
        ];
        required
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name.to_string())
            .collect()
    }
}
