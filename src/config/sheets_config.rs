use crate::sheets::value_input_option::ValueInputOption;

/// Which vendor secret format `secret_file_path` points at.
#[derive(serde::Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
    /// OAuth client secret for an installed application (`{"installed": {...}}`).
    /// The user is asked to authorize once and tokens are cached on disk.
    #[default]
    InstalledApp,
    /// Service account private key.
    ServiceAccount,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct SheetsConfig {
    /// Path of the client secret JSON file.
    pub secret_file_path: Box<str>,
    /// OAuth scope requested for every call, e.g.
    /// `https://www.googleapis.com/auth/spreadsheets`. Append `.readonly` for read-only access.
    pub oauth_host: Box<str>,
    /// How written strings are interpreted by the remote sheet.
    #[serde(default)]
    pub value_input_option: ValueInputOption,
    #[serde(default)]
    pub credential_kind: CredentialKind,
    /// Where installed-app tokens are persisted between runs.
    #[serde(default = "default_token_cache_path")]
    pub token_cache_path: Box<str>,
    /// Default spreadsheet targeted by the CLI.
    #[serde(default)]
    pub spreadsheet_id: Option<Box<str>>,
}

fn default_token_cache_path() -> Box<str> {
    "token.json".into()
}
