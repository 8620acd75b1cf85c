//! Server configuration.

use std::env;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Database URL. The in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Log level.
    pub log_level: String,
    /// Image host public key.
    pub imagekit_public_key: Option<String>,
    /// Image host private key, used to sign upload parameters.
    pub imagekit_private_key: Option<String>,
    /// Image host URL endpoint.
    pub imagekit_url_endpoint: Option<String>,
    /// Workflow service base URL.
    pub qstash_url: Option<String>,
    /// Workflow service token.
    pub qstash_token: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("LIBRARY_SERVER_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("LIBRARY_SERVER_PORT is not a valid port: {}", raw))?,
            None => 3000,
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        if let Some(url) = &database_url {
            if !url.starts_with("sqlite:") {
                anyhow::bail!("DATABASE_URL must be a sqlite: URL");
            }
        }

        Ok(Self {
            host: lookup("LIBRARY_SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url,
            log_level: lookup("LIBRARY_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            imagekit_public_key: lookup("IMAGEKIT_PUBLIC_KEY"),
            imagekit_private_key: lookup("IMAGEKIT_PRIVATE_KEY"),
            imagekit_url_endpoint: lookup("IMAGEKIT_URL_ENDPOINT"),
            qstash_url: lookup("QSTASH_URL"),
            qstash_token: lookup("QSTASH_TOKEN"),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the image host keys `(public_key, private_key, url_endpoint)`
    /// when all three are set.
    pub fn imagekit_keys(&self) -> Option<(&str, &str, &str)> {
        Some((
            self.imagekit_public_key.as_deref()?,
            self.imagekit_private_key.as_deref()?,
            self.imagekit_url_endpoint.as_deref()?,
        ))
    }

    /// Returns the workflow service `(url, token)` when both are set.
    pub fn workflow_endpoint(&self) -> Option<(&str, &str)> {
        Some((self.qstash_url.as_deref()?, self.qstash_token.as_deref()?))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.server_addr(), "0.0.0.0:3000");
        assert_eq!(config.log_level, "info");
        assert!(config.database_url.is_none());
        assert!(config.imagekit_keys().is_none());
        assert!(config.workflow_endpoint().is_none());
    }

    #[test]
    fn test_integrations_need_every_key() {
        let config = config_from(&[
            ("IMAGEKIT_PUBLIC_KEY", "public_key"),
            ("IMAGEKIT_PRIVATE_KEY", "private_key"),
            ("QSTASH_URL", "https://qstash.example.com"),
        ])
        .unwrap();

        assert!(config.imagekit_keys().is_none());
        assert!(config.workflow_endpoint().is_none());

        let config = config_from(&[
            ("IMAGEKIT_PUBLIC_KEY", "public_key"),
            ("IMAGEKIT_PRIVATE_KEY", "private_key"),
            ("IMAGEKIT_URL_ENDPOINT", "https://ik.example.com/library"),
            ("QSTASH_URL", "https://qstash.example.com"),
            ("QSTASH_TOKEN", "token"),
        ])
        .unwrap();

        assert_eq!(
            config.imagekit_keys(),
            Some(("public_key", "private_key", "https://ik.example.com/library"))
        );
        assert_eq!(
            config.workflow_endpoint(),
            Some(("https://qstash.example.com", "token"))
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[("LIBRARY_SERVER_PORT", "eighty")]).is_err());
        assert!(config_from(&[("DATABASE_URL", "postgres://localhost/library")]).is_err());

        let config = config_from(&[("DATABASE_URL", "sqlite:library.db?mode=rwc")]).unwrap();
        assert_eq!(config.database_url.as_deref(), Some("sqlite:library.db?mode=rwc"));
    }
}
