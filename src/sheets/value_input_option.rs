use strum::{AsRefStr, Display};

/// Controls how the remote sheet interprets written strings.
#[derive(serde::Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, AsRefStr, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    /// Stored exactly as given.
    Raw,
    /// Parsed as if typed into the UI: formulas are evaluated, numbers and dates are detected.
    #[default]
    UserEntered,
}
