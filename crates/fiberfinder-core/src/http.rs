//! Blocking HTTP GET.
//!
//! Uses the curl crate (libcurl) for the two sequential requests a run makes.
//! The pipeline only depends on the [`HttpGet`] trait, so tests can swap in a
//! canned client.

use anyhow::{Context, Result};
use std::time::Duration;

use crate::config::FiberConfig;

/// Something that can GET a URL and hand back the full response body.
pub trait HttpGet {
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// libcurl-backed client. One `Easy` handle per request; no retry.
/// A zero `timeout` leaves the transfer unbounded (libcurl's default).
#[derive(Debug, Clone)]
pub struct CurlClient {
    connect_timeout: Duration,
    timeout: Duration,
    user_agent: String,
}

impl CurlClient {
    pub fn new(connect_timeout: Duration, timeout: Duration, user_agent: impl Into<String>) -> Self {
        Self {
            connect_timeout,
            timeout,
            user_agent: user_agent.into(),
        }
    }

    pub fn from_config(cfg: &FiberConfig) -> Self {
        Self::new(cfg.connect_timeout(), cfg.timeout(), cfg.user_agent())
    }
}

impl HttpGet for CurlClient {
    /// Performs a GET, following redirects. Runs in the current thread.
    /// Non-2xx responses are errors.
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&self.user_agent)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer
                .perform()
                .with_context(|| format!("GET {} failed", url))?;
        }

        let code = easy.response_code().context("no response code")?;
        if !(200..300).contains(&code) {
            anyhow::bail!("GET {} returned HTTP {}", url, code);
        }

        tracing::debug!("GET {} -> {} bytes", url, body.len());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_takes_timeouts_and_agent() {
        let cfg = FiberConfig {
            connect_timeout_secs: 3,
            timeout_secs: 9,
            user_agent: Some("test-agent".to_string()),
            ..FiberConfig::default()
        };
        let client = CurlClient::from_config(&cfg);
        assert_eq!(client.connect_timeout, Duration::from_secs(3));
        assert_eq!(client.timeout, Duration::from_secs(9));
        assert_eq!(client.user_agent, "test-agent");
    }

    #[test]
    fn default_config_leaves_transfer_unbounded() {
        let client = CurlClient::from_config(&FiberConfig::default());
        assert_eq!(client.timeout, Duration::ZERO);
        assert_eq!(client.connect_timeout, Duration::from_secs(15));
    }

    #[test]
    fn get_rejects_unsupported_scheme() {
        let client = CurlClient::from_config(&FiberConfig::default());
        assert!(client.get("gopher-nope://example.invalid/").is_err());
    }
}
