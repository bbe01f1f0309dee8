//! Grammar checking by trial execution.
//!
//! The only reliable judge of full Cypher grammar is the database itself, so
//! grammar validation submits the query as a write transaction and reports
//! whether the database accepted it. The transaction is rolled back, so the
//! trial leaves no data behind.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

use crate::config::{ConfigError, ValidatorConfig};

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("Transaction request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Database answered with HTTP status {status}")]
    Status { status: u16 },

    #[error("Database rejected the statement: {code}: {message}")]
    Rejected { code: String, message: String },
}

/// Runs a statement inside a write transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WriteTransactionRunner: Send + Sync {
    async fn run_write(&self, query: &str) -> Result<(), TransactionError>;
}

#[derive(Debug, Deserialize)]
struct TransactionResponse {
    #[serde(default)]
    errors: Vec<StatementError>,
    commit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatementError {
    code: String,
    message: String,
}

/// [`WriteTransactionRunner`] for Neo4j's transactional HTTP endpoint.
#[derive(Debug, Clone)]
pub struct Neo4jHttpRunner {
    client: Client,
    base_url: String,
    database: String,
    username: String,
    password: String,
}

impl Neo4jHttpRunner {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Neo4jHttpRunner {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            database: database.into(),
            username: username.into(),
            password: password.into(),
        })
    }

    /// Build a runner from the grammar validation parameters of `config`.
    pub fn from_config(config: &ValidatorConfig) -> Result<Self, super::ValidatorError> {
        let required = |value: &Option<String>, parameter: &'static str| {
            value
                .clone()
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::MissingParameter {
                    feature: "grammar validation",
                    parameter,
                })
        };

        Ok(Self::new(
            required(&config.neo4j_url, "neo4j_url")?,
            required(&config.username, "username")?,
            required(&config.password, "password")?,
            config.database.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?)
    }

    pub fn transaction_endpoint(&self) -> String {
        format!("{}/db/{}/tx", self.base_url, self.database)
    }

    async fn rollback(&self, location: &str) {
        let result = self
            .client
            .delete(location)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await;
        match result {
            Ok(response) if response.status().is_success() => {
                log::debug!("Rolled back trial transaction {}", location);
            }
            // A failed statement already closed the transaction
            Ok(response) => log::debug!(
                "Rollback of {} answered HTTP {}",
                location,
                response.status()
            ),
            Err(e) => log::warn!("Failed to roll back trial transaction {}: {}", location, e),
        }
    }
}

#[async_trait]
impl WriteTransactionRunner for Neo4jHttpRunner {
    async fn run_write(&self, query: &str) -> Result<(), TransactionError> {
        let body = json!({ "statements": [{ "statement": query }] });
        let response = self
            .client
            .post(self.transaction_endpoint())
            .basic_auth(&self.username, Some(&self.password))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        if !status.is_success() {
            return Err(TransactionError::Status {
                status: status.as_u16(),
            });
        }

        let payload: TransactionResponse = response.json().await?;
        let location = location.or_else(|| {
            payload
                .commit
                .as_deref()
                .map(|commit| commit.trim_end_matches("/commit").to_string())
        });
        if let Some(location) = location {
            self.rollback(&location).await;
        }

        match payload.errors.into_iter().next() {
            Some(error) => Err(TransactionError::Rejected {
                code: error.code,
                message: error.message,
            }),
            None => Ok(()),
        }
    }
}

/// Run `query` as a trial transaction and collapse the outcome to a verdict.
pub async fn check_grammar(runner: &dyn WriteTransactionRunner, query: &str) -> bool {
    match runner.run_write(query).await {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Trial transaction rejected: {}", e);
            false
        }
    }
}
