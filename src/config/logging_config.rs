use error_stack::{report, ResultExt};
use tracing::level_filters::LevelFilter;

use super::app_config::AppConfigError;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: Box<str>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> Box<str> {
    "info".into()
}

impl LoggingConfig {
    pub fn level_filter(&self) -> error_stack::Result<LevelFilter, AppConfigError> {
        self.level
            .parse::<LevelFilter>()
            .map_err(|_| report!(AppConfigError::InvalidConfig))
            .attach_printable_lazy(|| format!("Unknown log level '{}'", self.level))
    }
}
