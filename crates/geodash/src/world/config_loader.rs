use crate::world::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadConfigError {
    #[error("config build error: {0}")]
    Build(#[from] config::ConfigError),

    #[error("config json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Layers `.env`, `geodash.*`, `geodash.local.*` and `GEODASH__*`
/// environment variables over the defaults.
pub fn load_config() -> Result<Config, LoadConfigError> {
    let _ = dotenvy::dotenv();

    let builder = config::Config::builder()
        .add_source(config::File::with_name("geodash").required(false))
        .add_source(config::File::with_name("geodash.local").required(false))
        .add_source(
            config::Environment::with_prefix("GEODASH")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

    let cfg = builder.build()?;
    log::info!("Config loaded successfully {:?}", cfg);

    Ok(cfg.try_deserialize()?)
}

impl Config {
    pub fn from_json(json: &str) -> Result<Config, LoadConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, LoadConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Loaded configuration, or defaults when nothing usable is found.
pub fn default_config() -> Config {
    match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("falling back to default config: {e}");
            Config::default()
        }
    }
}
