use crate::core::library::{LibraryError, LibraryResult};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 9000;

// Identifiable defines common traits that can be shared by stored objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> &str;
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LogFormat {
    Text,
    Json,
}

// Configuration abstracts startup options for the bookshelf server
#[derive(Debug, PartialEq, Clone)]
pub struct Configuration {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Configuration {
    pub fn new(host: &str, port: u16) -> Self {
        Configuration {
            host: host.to_string(),
            port,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }

    /// Reads `BOOKSHELF_HOST`, `BOOKSHELF_PORT`, `BOOKSHELF_LOG_LEVEL` and
    /// `BOOKSHELF_LOG_FORMAT`, falling back to defaults for unset variables.
    pub fn from_env() -> LibraryResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> LibraryResult<Self>
        where F: Fn(&str) -> Option<String> {
        let mut config = Configuration::new(DEFAULT_HOST, DEFAULT_PORT);
        if let Some(host) = lookup("BOOKSHELF_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("BOOKSHELF_PORT") {
            config.port = port.trim().parse::<u16>().map_err(|err| LibraryError::validation(
                format!("invalid BOOKSHELF_PORT {:?}: {}", port, err).as_str(), Some("config".to_string())))?;
        }
        if let Some(level) = lookup("BOOKSHELF_LOG_LEVEL") {
            config.log_level = level;
        }
        if let Some(format) = lookup("BOOKSHELF_LOG_FORMAT") {
            config.log_format = match format.to_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => return Err(LibraryError::validation(
                    format!("invalid BOOKSHELF_LOG_FORMAT {:?}, expected text or json", format).as_str(),
                    Some("config".to_string()))),
            };
        }
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::domain::{Configuration, LogFormat};
    use crate::core::library::LibraryError;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[tokio::test]
    async fn test_should_build_default_config() {
        let config = Configuration::from_lookup(lookup(&[])).expect("should build config");
        assert_eq!("localhost", config.host.as_str());
        assert_eq!(9000, config.port);
        assert_eq!("info", config.log_level.as_str());
        assert_eq!(LogFormat::Text, config.log_format);
        assert_eq!("localhost:9000", config.bind_address());
    }

    #[tokio::test]
    async fn test_should_override_config() {
        let config = Configuration::from_lookup(lookup(&[
            ("BOOKSHELF_HOST", "0.0.0.0"),
            ("BOOKSHELF_PORT", "8080"),
            ("BOOKSHELF_LOG_LEVEL", "debug"),
            ("BOOKSHELF_LOG_FORMAT", "JSON"),
        ])).expect("should build config");
        assert_eq!("0.0.0.0:8080", config.bind_address());
        assert_eq!("debug", config.log_level.as_str());
        assert_eq!(LogFormat::Json, config.log_format);
    }

    #[tokio::test]
    async fn test_should_reject_invalid_port() {
        let res = Configuration::from_lookup(lookup(&[("BOOKSHELF_PORT", "ninety")]));
        assert!(matches!(res, Err(LibraryError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_should_reject_invalid_log_format() {
        let res = Configuration::from_lookup(lookup(&[("BOOKSHELF_LOG_FORMAT", "xml")]));
        assert!(matches!(res, Err(LibraryError::Validation { .. })));
    }
}
