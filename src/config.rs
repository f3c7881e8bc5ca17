//! Configuration module for Guardrail.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port for the web server (default: 8080)
    pub http_port: u16,
    /// Delay of the simulated document processing (default: 2s)
    pub upload_delay: Duration,
    /// Largest accepted upload in bytes (default: 10 MiB)
    pub max_upload_bytes: u64,
    /// Filter dashboard queries by the selected time range (default: off)
    pub apply_time_range: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8080,
            upload_delay: Duration::from_millis(2000),
            max_upload_bytes: 10 * 1024 * 1024,
            apply_time_range: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GUARDRAIL_HTTP_PORT`: HTTP port (default: 8080)
    /// - `GUARDRAIL_UPLOAD_DELAY_MS`: simulated processing delay (default: 2000)
    /// - `GUARDRAIL_MAX_UPLOAD_BYTES`: upload size limit (default: 10485760)
    /// - `GUARDRAIL_APPLY_TIME_RANGE`: `true`/`1` to filter by time range
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(port) = lookup("GUARDRAIL_HTTP_PORT").and_then(|s| s.parse().ok()) {
            cfg.http_port = port;
        }

        if let Some(ms) = lookup("GUARDRAIL_UPLOAD_DELAY_MS").and_then(|s| s.parse().ok()) {
            cfg.upload_delay = Duration::from_millis(ms);
        }

        if let Some(bytes) = lookup("GUARDRAIL_MAX_UPLOAD_BYTES").and_then(|s| s.parse().ok()) {
            cfg.max_upload_bytes = bytes;
        }

        if let Some(flag) = lookup("GUARDRAIL_APPLY_TIME_RANGE") {
            cfg.apply_time_range = matches!(flag.trim(), "1" | "true" | "TRUE" | "yes");
        }

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.http_port, 8080);
        assert_eq!(cfg.upload_delay, Duration::from_secs(2));
        assert_eq!(cfg.max_upload_bytes, 10_485_760);
        assert!(!cfg.apply_time_range);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("GUARDRAIL_HTTP_PORT", "9090"),
            ("GUARDRAIL_UPLOAD_DELAY_MS", "250"),
            ("GUARDRAIL_MAX_UPLOAD_BYTES", "not-a-number"),
            ("GUARDRAIL_APPLY_TIME_RANGE", "true"),
        ]);
        let cfg = ServerConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.http_port, 9090);
        assert_eq!(cfg.upload_delay, Duration::from_millis(250));
        assert_eq!(cfg.max_upload_bytes, 10_485_760);
        assert!(cfg.apply_time_range);
    }
}
