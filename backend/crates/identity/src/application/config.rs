//! Application Configuration
//!
//! Built once at startup and shared through `Arc`; nothing below the
//! binary reads the environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{IdentityError, IdentityResult};

const JITTER_RATIO: f64 = 0.25;

/// Slack between the store call budget and the request deadline
const REQUEST_HEADROOM: Duration = Duration::from_millis(500);

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Which table backend serves the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Dynamo,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = IdentityError;

    fn from_str(s: &str) -> IdentityResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dynamo" | "dynamodb" => Ok(StoreBackend::Dynamo),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(IdentityError::Configuration(format!(
                "unknown store backend '{}'",
                other
            ))),
        }
    }
}

/// Retry policy for transient store errors
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    /// Add up to 25% random jitter to each delay
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Fail on the first error
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Delay before retry number `attempt` (0-indexed)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let capped = self.capped_delay_ms(attempt);

        let delay = if self.jitter {
            capped * (1.0 + rand::random::<f64>() * JITTER_RATIO)
        } else {
            capped
        };

        Duration::from_millis(delay as u64)
    }

    /// Longest total sleep the retry loop can add to one store call
    pub fn max_total_delay(&self) -> Duration {
        let worst = if self.jitter { 1.0 + JITTER_RATIO } else { 1.0 };
        let total_ms: f64 = (0..self.max_retries)
            .map(|attempt| self.capped_delay_ms(attempt) * worst)
            .sum();

        Duration::from_millis(total_ms.ceil() as u64)
    }

    fn capped_delay_ms(&self, attempt: u32) -> f64 {
        let base =
            self.initial_delay.as_millis() as f64 * self.backoff_multiplier.powi(attempt as i32);
        base.min(self.max_delay.as_millis() as f64)
    }
}

/// Document store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub region: String,
    /// Endpoint override (DynamoDB Local, LocalStack)
    pub endpoint: Option<String>,
    pub table_name: String,
    /// Upper bound for a single store call
    pub operation_timeout: Duration,
    pub retry: RetryConfig,
}

impl StoreConfig {
    /// Worst-case duration of one store call: every attempt timing out plus
    /// every backoff sleep
    pub fn call_budget(&self) -> Duration {
        self.operation_timeout
            .saturating_mul(self.retry.max_retries.saturating_add(1))
            .saturating_add(self.retry.max_total_delay())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            region: "us-east-1".to_string(),
            endpoint: None,
            table_name: "identities".to_string(),
            operation_timeout: Duration::from_secs(3),
            retry: RetryConfig::default(),
        }
    }
}

/// Identity application configuration
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub store: StoreConfig,
    /// Deadline for a whole HTTP request
    pub request_timeout: Duration,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
        .with_store_headroom()
    }
}

impl IdentityConfig {
    /// In-process table, no retries; for local runs and tests
    pub fn in_memory() -> Self {
        Self {
            store: StoreConfig {
                backend: StoreBackend::Memory,
                retry: RetryConfig::no_retry(),
                ..Default::default()
            },
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
        .with_store_headroom()
    }

    /// Smallest request deadline that still lets a hung store call end in
    /// its own timeout error
    pub fn min_request_timeout(&self) -> Duration {
        self.store.call_budget().saturating_add(REQUEST_HEADROOM)
    }

    fn with_store_headroom(mut self) -> Self {
        self.request_timeout = self.request_timeout.max(self.min_request_timeout());
        self
    }

    /// Read `AWS_DB_REGION`, `AWS_DB_ENDPOINT`, `AWS_DB_TABLE`,
    /// `IDENTITY_STORE`, `STORE_TIMEOUT_MS`, `STORE_MAX_RETRIES` and
    /// `HTTP_REQUEST_TIMEOUT_MS`.
    pub fn from_env() -> IdentityResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> IdentityResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match get("IDENTITY_STORE") {
            Some(value) => value.parse()?,
            None => StoreBackend::default(),
        };

        let table_name = match (get("AWS_DB_TABLE"), backend) {
            (Some(table), _) => table,
            (None, StoreBackend::Memory) => defaults.store.table_name.clone(),
            (None, StoreBackend::Dynamo) => {
                return Err(IdentityError::Configuration(
                    "AWS_DB_TABLE must be set for the DynamoDB backend".to_string(),
                ));
            }
        };

        let operation_timeout = match get("STORE_TIMEOUT_MS") {
            Some(ms) => Duration::from_millis(parse_number("STORE_TIMEOUT_MS", &ms)?),
            None => defaults.store.operation_timeout,
        };

        let retry = match get("STORE_MAX_RETRIES") {
            Some(n) => RetryConfig {
                max_retries: parse_number("STORE_MAX_RETRIES", &n)?,
                ..Default::default()
            },
            None => RetryConfig::default(),
        };

        let request_timeout = match get("HTTP_REQUEST_TIMEOUT_MS") {
            Some(ms) => Duration::from_millis(parse_number("HTTP_REQUEST_TIMEOUT_MS", &ms)?),
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let config = Self {
            store: StoreConfig {
                backend,
                region: get("AWS_DB_REGION").unwrap_or(defaults.store.region),
                endpoint: get("AWS_DB_ENDPOINT"),
                table_name,
                operation_timeout,
                retry,
            },
            request_timeout,
        };

        if config.request_timeout < config.min_request_timeout() {
            tracing::warn!(
                configured_ms = config.request_timeout.as_millis() as u64,
                raised_to_ms = config.min_request_timeout().as_millis() as u64,
                "HTTP_REQUEST_TIMEOUT_MS is shorter than the store retry budget, raising it"
            );
        }

        Ok(config.with_store_headroom())
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> IdentityResult<T> {
    value.trim().parse().map_err(|_| {
        IdentityError::Configuration(format!("{} must be a number, got '{}'", key, value))
    })
}
