use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use error_stack::{report, ResultExt};
use serde::Deserialize;
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};
use thiserror::Error;

use super::{logging_config::LoggingConfig, sheets_config::SheetsConfig};

const ENV_PREFIX: &str = "SHEETS_WRITER";
const ENV_SEPARATOR: &str = "__";

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Error, Debug)]
pub enum AppConfigError {
    #[error("Failed to read config")]
    FailedToReadConfig,
    #[error("Invalid config")]
    InvalidConfig,
}

impl AppConfig {
    /// Loads the config file at `config_path` (extension optional), then applies overrides from
    /// environment variables such as `SHEETS_WRITER__SHEETS__SPREADSHEET_ID`.
    pub fn load(config_path: &str) -> error_stack::Result<Self, AppConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(config_path))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .ignore_empty(true),
            );

        Self::from_builder(builder)
            .attach_printable_lazy(|| format!("Config file: {config_path}"))
    }

    pub fn from_builder(
        builder: ConfigBuilder<DefaultState>,
    ) -> error_stack::Result<Self, AppConfigError> {
        let config = builder
            .build()
            .change_context(AppConfigError::FailedToReadConfig)?;

        let value = config
            .try_deserialize::<serde_json::Value>()
            .change_context(AppConfigError::InvalidConfig)?;

        use serde::de::IntoDeserializer;
        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);
        AppConfig::deserialize(path_de).map_err(|e| {
            report!(AppConfigError::InvalidConfig)
                .attach_printable(e.to_string())
                .attach_printable(format!("Field path: {}", field_path(track)))
        })
    }
}

/// Renders the deserializer's position as `sheets.value_input_option` or `list[2]`.
fn field_path(track: Track) -> String {
    let mut path = String::new();
    for segment in track.path().iter() {
        match segment {
            Segment::Seq { index } => path.push_str(&format!("[{index}]")),
            Segment::Map { key } if path.is_empty() => path.push_str(key),
            Segment::Map { key } => path.push_str(&format!(".{key}")),
            Segment::Enum { variant } => path.push_str(&format!("::{variant}")),
            Segment::Unknown => path.push_str("<?>"),
        }
    }
    path
}
