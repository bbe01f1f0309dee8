use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use validator::Validate;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{feature} needs a non-empty `{parameter}`")]
    MissingParameter {
        feature: &'static str,
        parameter: &'static str,
    },

    #[error("{feature} is not enabled; turn it on before using it")]
    FeatureDisabled { feature: &'static str },
}

/// Validator configuration with validation
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Check full grammar by running queries as trial transactions
    pub grammar_validation: bool,

    /// Check queries against a schema definition file
    pub schema_validation: bool,

    /// Base URL of the Neo4j HTTP API, e.g. http://localhost:7474
    #[validate(length(min = 1, message = "Neo4j URL cannot be empty"))]
    pub neo4j_url: Option<String>,

    pub username: Option<String>,

    pub password: Option<String>,

    /// Database the trial transactions run against
    #[validate(length(min = 1, message = "Database name cannot be empty"))]
    pub database: String,

    /// JSON or YAML schema records
    pub schema_path: Option<PathBuf>,

    /// Timeout for a single trial transaction request
    #[validate(range(
        min = 1,
        max = 300,
        message = "Request timeout must be between 1 and 300 seconds"
    ))]
    pub request_timeout_secs: u64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            grammar_validation: false,
            schema_validation: false,
            neo4j_url: None,
            username: None,
            password: None,
            database: "neo4j".to_string(),
            schema_path: None,
            request_timeout_secs: 30,
        }
    }
}

impl ValidatorConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            grammar_validation: parse_env_var("CYPHERCHECK_GRAMMAR_VALIDATION", "false")?,
            schema_validation: parse_env_var("CYPHERCHECK_SCHEMA_VALIDATION", "false")?,
            neo4j_url: env::var("CYPHERCHECK_NEO4J_URL").ok(),
            username: env::var("CYPHERCHECK_USERNAME").ok(),
            password: env::var("CYPHERCHECK_PASSWORD").ok(),
            database: env::var("CYPHERCHECK_DATABASE").unwrap_or_else(|_| "neo4j".to_string()),
            schema_path: env::var("CYPHERCHECK_SCHEMA_PATH").ok().map(PathBuf::from),
            request_timeout_secs: parse_env_var("CYPHERCHECK_REQUEST_TIMEOUT_SECS", "30")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Field validation plus [`check_features`](Self::check_features).
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate()?;
        self.check_features()
    }

    /// Every enabled feature must have its parameters.
    pub fn check_features(&self) -> Result<(), ConfigError> {
        if self.grammar_validation {
            require("grammar validation", "neo4j_url", self.neo4j_url.as_deref())?;
            require("grammar validation", "username", self.username.as_deref())?;
            require("grammar validation", "password", self.password.as_deref())?;
        }
        if self.schema_validation {
            let schema_path = self
                .schema_path
                .as_ref()
                .and_then(|path| path.to_str());
            require("schema validation", "schema_path", schema_path)?;
        }
        Ok(())
    }
}

fn require(
    feature: &'static str,
    parameter: &'static str,
    value: Option<&str>,
) -> Result<(), ConfigError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(()),
        _ => Err(ConfigError::MissingParameter { feature, parameter }),
    }
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
