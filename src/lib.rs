pub mod cli;
pub mod config;
pub mod sheets;

pub use config::app_config::AppConfig;
pub use config::sheets_config::{CredentialKind, SheetsConfig};
pub use sheets::auth::CredentialError;
pub use sheets::sheet_service::SheetService;
pub use sheets::value_input_option::ValueInputOption;
pub use sheets::values_api::{RemoteRequestError, ValuesApi};
