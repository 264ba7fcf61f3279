//! Environment configuration
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the working directory.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::error::{AppError, Result};

/// Runtime configuration for the web service
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Identity used when a request carries no `x-user-id` header
    pub default_user_id: String,
    pub currency: String,
    pub seed_sample_data: bool,
    pub sample_fleet_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            default_user_id: "USER#001".to_string(),
            currency: "EUR".to_string(),
            seed_sample_data: true,
            sample_fleet_size: 50,
        }
    }
}

impl Config {
    /// Load configuration from `.env` and the environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            bind_addr: parse_or(&lookup, "BIND_ADDR", defaults.bind_addr)?,
            default_user_id: lookup("DEFAULT_USER_ID").unwrap_or(defaults.default_user_id),
            currency: lookup("CURRENCY").unwrap_or(defaults.currency),
            seed_sample_data: parse_or(&lookup, "SEED_SAMPLE_DATA", defaults.seed_sample_data)?,
            sample_fleet_size: parse_or(&lookup, "SAMPLE_FLEET_SIZE", defaults.sample_fleet_size)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::Config(format!("{key}={raw:?}: {e}"))),
        None => Ok(default),
    }
}
