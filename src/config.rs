use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: Server,
    pub api: Api,
    pub observability: Observability,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Server {
    pub host: String,
    pub port: u16,
    /// Externally visible base URL; derived from the `Host` header when unset.
    #[serde(default)]
    pub public_base_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Api {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Observability {
    pub service_name: String,
    pub log_filter: String,
    pub enable_metrics: bool,
}

impl Settings {
    /// Settings for tests and embedding: loopback host, no metrics.
    pub fn local(public_base_url: Option<&str>) -> Self {
        Self {
            server: Server {
                host: "127.0.0.1".to_string(),
                port: 0,
                public_base_url: public_base_url.map(str::to_string),
            },
            api: Api {
                title: "OGC API - Processes".to_string(),
                description: "Processing server implementing the OGC API - Processes 1.0 standard"
                    .to_string(),
            },
            observability: Observability {
                service_name: "ogc-api-processes".to_string(),
                log_filter: "info".to_string(),
                enable_metrics: false,
            },
        }
    }
}

/// Load settings from `config/default.toml`, `config/<env>.toml`, and env overrides.
pub fn load() -> Result<Settings, config::ConfigError> {
    let env_name = std::env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());
    config::Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{env_name}")).required(false))
        .add_source(config::Environment::with_prefix("OGCAPI").separator("__"))
        .build()?
        .try_deserialize()
}
