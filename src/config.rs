use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

const FLAT_SERVICE_URL_ENV: &str = "FLAT_SERVICE_URL";
const AGENCY_SERVICE_URL_ENV: &str = "AGENCY_SERVICE_URL";
const REQUEST_TIMEOUT_ENV: &str = "REQUEST_TIMEOUT_SECS";
const ACCEPT_INVALID_CERTS_ENV: &str = "ACCEPT_INVALID_CERTS";

const DEFAULT_FLAT_SERVICE_URL: &str = "https://localhost";
const DEFAULT_AGENCY_SERVICE_URL: &str = "https://localhost:444";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the flat management service, without trailing slash
    pub flat_service_url: String,
    /// Base URL of the agency service, without trailing slash
    pub agency_service_url: String,
    pub request_timeout: Duration,
    /// The lab deployments run on self-signed certificates
    pub accept_invalid_certs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flat_service_url: DEFAULT_FLAT_SERVICE_URL.to_string(),
            agency_service_url: DEFAULT_AGENCY_SERVICE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            accept_invalid_certs: false,
        }
    }
}

impl Config {
    /// Read configuration from the environment, loading `.env` first if present
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let flat_service_url = lookup(FLAT_SERVICE_URL_ENV)
            .map(|url| trim_base_url(&url))
            .unwrap_or(defaults.flat_service_url);
        let agency_service_url = lookup(AGENCY_SERVICE_URL_ENV)
            .map(|url| trim_base_url(&url))
            .unwrap_or(defaults.agency_service_url);

        let request_timeout = match lookup(REQUEST_TIMEOUT_ENV) {
            Some(raw) => Duration::from_secs(raw.trim().parse::<u64>().with_context(|| {
                format!("{REQUEST_TIMEOUT_ENV} must be a number of seconds, got {raw:?}")
            })?),
            None => defaults.request_timeout,
        };

        let accept_invalid_certs = match lookup(ACCEPT_INVALID_CERTS_ENV) {
            Some(raw) => raw.trim().parse::<bool>().with_context(|| {
                format!("{ACCEPT_INVALID_CERTS_ENV} must be true or false, got {raw:?}")
            })?,
            None => defaults.accept_invalid_certs,
        };

        Ok(Self {
            flat_service_url,
            agency_service_url,
            request_timeout,
            accept_invalid_certs,
        })
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
