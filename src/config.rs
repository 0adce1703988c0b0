use std::time::Duration;

use crate::error::{DataApiError, Result};

pub const ENV_ACCESS_KEY_ID: &str = "ACCESS_KEY_ID";
pub const ENV_SECRET_ACCESS_KEY: &str = "SECRET_ACCESS_KEY";
pub const ENV_SESSION_TOKEN: &str = "SESSION_TOKEN";
pub const ENV_REGION: &str = "RDS_REGION";
pub const ENV_RESOURCE_ARN: &str = "RDS_RESOURCE_ARN";
pub const ENV_SECRET_ARN: &str = "RDS_SECRET_ARN";
pub const ENV_DATABASE_NAME: &str = "RDS_DATABASE_NAME";
pub const ENV_ENDPOINT: &str = "RDS_DATA_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "RDS_DATA_TIMEOUT_SECS";

/// Request timeout used when `RDS_DATA_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(45);

/// Static AWS credentials handed to the SDK.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Identifies the cluster, the credentials secret and the database every statement runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataApiTarget {
    pub resource_arn: String,
    pub secret_arn: String,
    pub database: String,
}

/// Everything needed to build a client for the Data API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataApiConfig {
    pub credentials: Credentials,
    pub region: String,
    pub target: DataApiTarget,
    /// Overrides the SDK's regional endpoint, e.g. for a local emulator.
    pub endpoint: Option<String>,
    pub timeout: Duration,
}

impl DataApiConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns `DataApiError::ConfigError` naming the first required variable that is missing or
    /// blank, or an unparsable timeout.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Same as [`DataApiConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(DataApiError::ConfigError(format!("{key} is required"))),
            }
        };
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let credentials = Credentials {
            access_key_id: required(ENV_ACCESS_KEY_ID)?,
            secret_access_key: required(ENV_SECRET_ACCESS_KEY)?,
            session_token: optional(ENV_SESSION_TOKEN),
        };
        let region = required(ENV_REGION)?;
        let target = DataApiTarget {
            resource_arn: required(ENV_RESOURCE_ARN)?,
            secret_arn: required(ENV_SECRET_ARN)?,
            database: required(ENV_DATABASE_NAME)?,
        };

        let timeout = match optional(ENV_TIMEOUT_SECS) {
            Some(raw) => raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|e| {
                DataApiError::ConfigError(format!("{ENV_TIMEOUT_SECS} must be whole seconds: {e}"))
            })?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            credentials,
            region,
            target,
            endpoint: optional(ENV_ENDPOINT).map(|url| url.trim_end_matches('/').to_string()),
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, String> {
        HashMap::from([
            (ENV_ACCESS_KEY_ID, "AKIDEXAMPLE".to_string()),
            (ENV_SECRET_ACCESS_KEY, "secret".to_string()),
            (ENV_REGION, "eu-west-1".to_string()),
            (ENV_RESOURCE_ARN, "arn:aws:rds:eu-west-1:1:cluster:c".to_string()),
            (ENV_SECRET_ARN, "arn:aws:secretsmanager:eu-west-1:1:secret:s".to_string()),
            (ENV_DATABASE_NAME, "app".to_string()),
        ])
    }

    fn load(env: &HashMap<&'static str, String>) -> Result<DataApiConfig> {
        DataApiConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn loads_required_settings_with_defaults() {
        let cfg = load(&full_env()).unwrap();
        assert_eq!(cfg.target.database, "app");
        assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);
        assert_eq!(cfg.credentials.session_token, None);
        assert_eq!(cfg.endpoint, None);
    }

    #[test]
    fn reports_missing_variable_by_name() {
        let mut env = full_env();
        env.remove(ENV_SECRET_ARN);
        let err = load(&env).unwrap_err();
        assert!(matches!(err, DataApiError::ConfigError(ref msg) if msg.contains(ENV_SECRET_ARN)));

        let mut env = full_env();
        env.insert(ENV_REGION, "   ".to_string());
        assert!(matches!(load(&env), Err(DataApiError::ConfigError(_))));
    }

    #[test]
    fn optional_settings_override_defaults() {
        let mut env = full_env();
        env.insert(ENV_ENDPOINT, "http://localhost:8080/".to_string());
        env.insert(ENV_TIMEOUT_SECS, "5".to_string());
        env.insert(ENV_SESSION_TOKEN, "token".to_string());
        let cfg = load(&env).unwrap();
        assert_eq!(cfg.endpoint.as_deref(), Some("http://localhost:8080"));
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.credentials.session_token.as_deref(), Some("token"));

        env.insert(ENV_TIMEOUT_SECS, "soon".to_string());
        assert!(matches!(load(&env), Err(DataApiError::ConfigError(_))));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let cfg = load(&full_env()).unwrap();
        let rendered = format!("{:?}", cfg.credentials);
        assert!(rendered.contains("AKIDEXAMPLE"));
        assert!(!rendered.contains("\"secret\""));
    }
}
