use serde::{Deserialize, Serialize};
use std::env;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Config {
    #[validate]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServiceConfig {
    #[validate(url)]
    pub base_url: String,
    pub verify_tls: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                base_url: "http://localhost:8080/api/v1".to_string(),
                verify_tls: true,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Config::default();

        if let Ok(base_url) = env::var("SERVICEMAP_URL") {
            config.service.base_url = base_url;
        }
        if let Ok(verify_tls) = env::var("SERVICEMAP_VERIFY_TLS") {
            config.service.verify_tls = parse_bool(&verify_tls)?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("invalid boolean value: {other}"),
    }
}
