use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DIST_DIR: &str = "dist";
const DEFAULT_STATIC_DIR: &str = "assets";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 1 and 65535, got {0:?}")]
    InvalidPort(String),
}

/// Server settings, read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Built frontend bundle (`index.html` + `assets/`).
    pub dist_dir: PathBuf,
    /// Hand-maintained static files, including an optional `guidelines.json`.
    pub static_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => match raw.trim().parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(ConfigError::InvalidPort(raw)),
            },
            None => DEFAULT_PORT,
        };
        let dist_dir = lookup("DIST_DIR").unwrap_or_else(|| DEFAULT_DIST_DIR.to_string());
        let static_dir = lookup("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string());

        Ok(ServerConfig {
            port,
            dist_dir: PathBuf::from(dist_dir),
            static_dir: PathBuf::from(static_dir),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.dist_dir, PathBuf::from("dist"));
        assert_eq!(config.static_dir, PathBuf::from("assets"));
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides_from_env() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("DIST_DIR", "/srv/portal/dist"),
            ("STATIC_DIR", "/srv/portal/static"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.dist_dir, PathBuf::from("/srv/portal/dist"));
        assert_eq!(config.static_dir, PathBuf::from("/srv/portal/static"));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("http".to_string()));
    }

    #[test]
    fn test_zero_port_is_rejected() {
        assert!(ServerConfig::from_lookup(lookup_from(&[("PORT", "0")])).is_err());
    }
}
