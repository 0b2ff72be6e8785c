use error_stack::ResultExt;
use google_sheets4::{hyper, hyper_rustls};

use super::auth::CredentialError;

pub type HttpsConnector = hyper_rustls::HttpsConnector<hyper::client::HttpConnector>;

pub fn http_client() -> error_stack::Result<hyper::Client<HttpsConnector>, CredentialError> {
    let connector = hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()
        .change_context(CredentialError::TransportError)
        .attach_printable("Unable to load the platform's root CA certificates")?
        .https_only()
        .enable_http1()
        .build();

    Ok(hyper::Client::builder().build(connector))
}
