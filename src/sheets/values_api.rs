use google_sheets4::api::ValueRange;
use thiserror::Error;

use super::value_input_option::ValueInputOption;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteRequestError {
    #[error("Unable to update data in sheet")]
    FailedToUpdateValues,
    #[error("Unable to clear data in sheet")]
    FailedToClearValues,
    #[error("Unable to get data from sheet")]
    FailedToGetValues,
}

/// The slice of the spreadsheet values API this crate relies on. Each call is exactly one
/// remote request; ranges are passed through in A1 notation without local validation.
#[async_trait::async_trait]
pub trait ValuesApi: Send + Sync {
    async fn update(
        &self,
        spreadsheet_id: &str,
        range: &str,
        value_range: ValueRange,
        value_input_option: ValueInputOption,
    ) -> error_stack::Result<(), RemoteRequestError>;

    /// Clears cell values only. Formatting and data validation rules are kept.
    async fn clear(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> error_stack::Result<(), RemoteRequestError>;

    async fn get(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> error_stack::Result<ValueRange, RemoteRequestError>;
}
