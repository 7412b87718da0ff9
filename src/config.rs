//! Environment configuration.

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
    pub nats_url: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?,
            port: parse_or("PORT", 8083)?,
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10)?,
            nats_url: std::env::var("NATS_URL").ok(),
        })
    }
}

fn parse_or<T: std::str::FromStr>(var: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(var) {
        Ok(raw) => raw.parse().with_context(|| format!("{var} is not a valid number: {raw}")),
        Err(_) => Ok(default),
    }
}
