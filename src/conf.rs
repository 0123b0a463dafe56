use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

use crate::pkg::internal::tor::grading::GradingScale;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub service_name: String,
    pub listen_port: String,
    pub database_url: String,
    pub database_pool_max_connections: u32,
    /// minimum description similarity, in percent, for a curriculum match
    pub similarity_threshold: f64,
    pub grading_scale: GradingScale,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .set_default("service_name", "torcredit")?
            .set_default("listen_port", "8000")?
            .set_default("database_pool_max_connections", 10_i64)?
            .set_default("similarity_threshold", 20.0_f64)?
            .set_default("grading_scale", "standard")?
            .add_source(Environment::default())
            .build()?;
        let s: Settings = conf.try_deserialize()?;
        if !(0.0..=100.0).contains(&s.similarity_threshold) {
            return Err(ConfigError::Message(format!(
                "similarity_threshold must be within 0..=100, got {}",
                s.similarity_threshold
            )));
        }
        Ok(s)
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
