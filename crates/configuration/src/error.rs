use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings or a scenario file could not be read or deserialized.
    #[error("Failed to read configuration: {0}")]
    Read(#[from] config::ConfigError),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}
