//! Listener and runtime configuration.
//!
//! # Environment Variables
//!
//! - `HOST`: IP address to bind (default `0.0.0.0`)
//! - `PORT`: port to bind (default `3000`)
//! - `WORKER_THREADS`: tokio worker threads (default: logical CPU count).
//!   Values above four times the CPU count are capped.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use super::factory::{ConfigurationError, read_variable};

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Where to listen and how many runtime workers to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub address: SocketAddr,
    /// `None` keeps the runtime's default worker count.
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            worker_threads: None,
        }
    }
}

impl ServerConfig {
    /// Creates a configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if `HOST`, `PORT` or `WORKER_THREADS`
    /// holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|name| {
            env::var_os(name).map(|value| value.to_string_lossy().into_owned())
        })
    }

    /// Creates a configuration from an arbitrary variable lookup.
    ///
    /// Empty or whitespace-only values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if a variable holds an invalid value.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigurationError> {
        Self::from_lookup_with_limit(lookup, max_worker_threads())
    }

    fn from_lookup_with_limit(
        lookup: impl Fn(&str) -> Option<String>,
        thread_limit: usize,
    ) -> Result<Self, ConfigurationError> {
        let defaults = Self::default();

        let ip = match read_variable(&lookup, "HOST") {
            Some(host) => host
                .parse::<IpAddr>()
                .map_err(|_| ConfigurationError::InvalidAddress(host))?,
            None => defaults.address.ip(),
        };
        let port = match read_variable(&lookup, "PORT") {
            Some(value) => parse_port(&value)?,
            None => defaults.address.port(),
        };
        let worker_threads = read_variable(&lookup, "WORKER_THREADS")
            .map(|value| parse_worker_threads(&value, thread_limit))
            .transpose()?;

        Ok(Self {
            address: SocketAddr::new(ip, port),
            worker_threads,
        })
    }
}

fn parse_port(value: &str) -> Result<u16, ConfigurationError> {
    match value.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConfigurationError::InvalidPort(value.to_string())),
    }
}

fn parse_worker_threads(value: &str, limit: usize) -> Result<usize, ConfigurationError> {
    match value.parse::<usize>() {
        Ok(0) | Err(_) => Err(ConfigurationError::InvalidWorkerThreads(value.to_string())),
        Ok(threads) if threads > limit => {
            tracing::warn!(
                requested = threads,
                limit,
                "WORKER_THREADS exceeds recommended limit, capping"
            );
            Ok(limit)
        }
        Ok(threads) => Ok(threads),
    }
}

fn max_worker_threads() -> usize {
    std::thread::available_parallelism()
        .map(|parallelism| parallelism.get().saturating_mul(4))
        .unwrap_or(64)
}
