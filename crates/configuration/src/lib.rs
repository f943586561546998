use config::{Environment, File};
use std::path::Path;

// Declare the modules that make up this crate.
#[cfg(feature = "clap")]
pub mod cli;
pub mod error;
pub mod logging;
pub mod scenario;
pub mod settings;

// Re-export the core types to provide a clean public API.
#[cfg(feature = "clap")]
pub use cli::ScenarioOverrides;
pub use error::ConfigError;
pub use logging::init_tracing;
pub use scenario::{load_scenario, scenario_to_toml_lines};
pub use settings::{LoggingSettings, OutputFormat, OutputSettings, Settings};

/// Prefix of the environment variables that override application settings,
/// e.g. `KPI_LOGGING__LEVEL=debug`.
pub const SETTINGS_ENV_PREFIX: &str = "KPI";

/// Loads the application settings from the `config.toml` file in the working directory.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config.toml"))
}

/// Loads the application settings from `path`, which may be absent.
///
/// Reads the file (if present) and `KPI_*` environment variables, then
/// deserializes them into our strongly-typed `Settings` struct.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix(SETTINGS_ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;

    if settings.output.table_step == 0 {
        return Err(ConfigError::InvalidSetting(
            "output.table_step must be at least 1".to_string(),
        ));
    }

    Ok(settings)
}
