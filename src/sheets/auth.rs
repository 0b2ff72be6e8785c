use error_stack::ResultExt;
use google_sheets4::hyper;
use google_sheets4::oauth2::{
    self, authenticator::Authenticator, ApplicationSecret, InstalledFlowReturnMethod,
    ServiceAccountKey,
};
use thiserror::Error;
use tracing::instrument;

use crate::config::sheets_config::{CredentialKind, SheetsConfig};

use super::http_client::HttpsConnector;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Unable to read client secret file")]
    CredentialFileError,
    #[error("Unable to parse client secret file to config")]
    CredentialParseError,
    #[error("Unable to build authenticator")]
    AuthenticatorError,
    #[error("Unable to build HTTPS transport")]
    TransportError,
}

/// Parsed contents of a client secret file.
pub enum Credentials {
    InstalledApp(ApplicationSecret),
    ServiceAccount(ServiceAccountKey),
}

impl Credentials {
    pub fn kind(&self) -> CredentialKind {
        match self {
            Credentials::InstalledApp(_) => CredentialKind::InstalledApp,
            Credentials::ServiceAccount(_) => CredentialKind::ServiceAccount,
        }
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credentials {{ kind: {:?} }}", self.kind())
    }
}

#[instrument]
pub async fn read_credentials(
    kind: CredentialKind,
    secret_file_path: &str,
) -> error_stack::Result<Credentials, CredentialError> {
    let bytes = tokio::fs::read(secret_file_path)
        .await
        .change_context(CredentialError::CredentialFileError)
        .attach_printable_lazy(|| {
            format!("Unable to read client secret file '{secret_file_path}'")
        })?;

    let credentials = match kind {
        CredentialKind::InstalledApp => {
            oauth2::parse_application_secret(&bytes).map(Credentials::InstalledApp)
        }
        CredentialKind::ServiceAccount => {
            oauth2::parse_service_account_key(&bytes).map(Credentials::ServiceAccount)
        }
    };

    credentials
        .change_context(CredentialError::CredentialParseError)
        .attach_printable_lazy(|| {
            format!("'{secret_file_path}' is not a valid {kind:?} client secret")
        })
}

/// Hands the parsed secret to the OAuth library. Tokens are fetched lazily on the first request.
#[instrument(skip(config, client))]
pub async fn authenticator(
    config: &SheetsConfig,
    credentials: Credentials,
    client: hyper::Client<HttpsConnector>,
) -> error_stack::Result<Authenticator<HttpsConnector>, CredentialError> {
    let authenticator = match credentials {
        Credentials::InstalledApp(secret) => {
            oauth2::InstalledFlowAuthenticator::with_client(
                secret,
                InstalledFlowReturnMethod::HTTPRedirect,
                client,
            )
            .persist_tokens_to_disk(&*config.token_cache_path)
            .build()
            .await
        }
        Credentials::ServiceAccount(key) => {
            oauth2::ServiceAccountAuthenticator::with_client(key, client)
                .build()
                .await
        }
    };

    authenticator
        .change_context(CredentialError::AuthenticatorError)
        .attach_printable_lazy(|| {
            format!(
                "Could not create an authenticator from '{}'",
                config.secret_file_path
            )
        })
}
