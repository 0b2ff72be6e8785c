use std::{env, process::ExitCode};

use sheets_table_writer::{
    cli,
    config::{app_config::AppConfigError, logging_config::LoggingConfig},
    AppConfig,
};
use tracing_subscriber::{
    filter::Targets, layer::SubscriberExt, util::SubscriberInitExt, Registry,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let invocation = match cli::parse_args(&args) {
        Ok(invocation) => invocation,
        Err(error) => {
            eprintln!("{error}\n\n{}", cli::USAGE);
            return ExitCode::FAILURE;
        }
    };

    // Tracing is configured from the config file, so failures up to here go to stderr directly.
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "Config".to_string());
    let config = match AppConfig::load(&config_path) {
        Ok(config) => config,
        Err(report) => {
            eprintln!("{report:?}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(report) = setup_tracing(&config.logging) {
        eprintln!("{report:?}");
        return ExitCode::FAILURE;
    }

    ExitCode::from(cli::finish(cli::run(&config, invocation).await))
}

fn setup_tracing(logging: &LoggingConfig) -> error_stack::Result<(), AppConfigError> {
    let level = logging.level_filter()?;

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    Registry::default()
        .with(Targets::new().with_target("sheets_table_writer", level))
        .with(stderr_layer)
        .init();

    Ok(())
}
