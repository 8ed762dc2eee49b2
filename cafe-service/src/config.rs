use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind_addr: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub http: HttpConfig,
    pub metrics: Option<MetricsConfig>,
}

fn default_max_connections() -> u32 {
    8
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        let path = env::var("CAFE_CONFIG").unwrap_or_else(|_| "cafe-config.toml".to_string());
        let contents = fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {path}: {e}"))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let cfg: AppConfig = toml::from_str(contents)?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [database]
            url = "sqlite:cafe.db?mode=rwc"
            max_connections = 4

            [http]
            bind_addr = "127.0.0.1:8080"
            max_upload_bytes = 1024

            [metrics]
            bind_addr = "127.0.0.1:9100"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.database.max_connections, 4);
        assert_eq!(cfg.http.max_upload_bytes, 1024);
        assert_eq!(cfg.metrics.unwrap().bind_addr, "127.0.0.1:9100");
    }

    #[test]
    fn optional_sections_and_limits_use_defaults() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [database]
            url = "sqlite::memory:"

            [http]
            bind_addr = "0.0.0.0:8080"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.database.max_connections, 8);
        assert_eq!(cfg.http.max_upload_bytes, 10 * 1024 * 1024);
        assert!(cfg.metrics.is_none());
    }

    #[test]
    fn missing_database_section_is_an_error() {
        assert!(AppConfig::from_toml_str("[http]\nbind_addr = \"0.0.0.0:8080\"\n").is_err());
    }
}
