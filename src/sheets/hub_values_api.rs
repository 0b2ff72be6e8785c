use std::fmt::Debug;

use error_stack::ResultExt;
use google_sheets4::{
    api::{ClearValuesRequest, ValueRange},
    Sheets,
};
use tracing::instrument;

use super::{
    http_client::HttpsConnector,
    value_input_option::ValueInputOption,
    values_api::{RemoteRequestError, ValuesApi},
};

/// [`ValuesApi`] backed by the Google Sheets hub.
pub struct HubValuesApi {
    hub: Sheets<HttpsConnector>,
    scope: Box<str>,
}

impl Debug for HubValuesApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HubValuesApi {{ scope: {:?} }}", self.scope)
    }
}

impl HubValuesApi {
    pub fn new(hub: Sheets<HttpsConnector>, scope: Box<str>) -> Self {
        Self { hub, scope }
    }
}

#[async_trait::async_trait]
impl ValuesApi for HubValuesApi {
    #[instrument(skip(value_range))]
    async fn update(
        &self,
        spreadsheet_id: &str,
        range: &str,
        value_range: ValueRange,
        value_input_option: ValueInputOption,
    ) -> error_stack::Result<(), RemoteRequestError> {
        self.hub
            .spreadsheets()
            .values_update(value_range, spreadsheet_id, range)
            .value_input_option(value_input_option.as_ref())
            .add_scope(&*self.scope)
            .doit()
            .await
            .map(|(_, response)| {
                tracing::debug!(
                    updated_cells = response.updated_cells,
                    updated_range = response.updated_range.as_deref(),
                    "Values updated"
                );
            })
            .change_context(RemoteRequestError::FailedToUpdateValues)
            .attach_printable_lazy(|| format!("Failed to write to range {range}"))
    }

    #[instrument]
    async fn clear(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> error_stack::Result<(), RemoteRequestError> {
        self.hub
            .spreadsheets()
            .values_clear(ClearValuesRequest::default(), spreadsheet_id, range)
            .add_scope(&*self.scope)
            .doit()
            .await
            .map(|(_, response)| {
                tracing::debug!(
                    cleared_range = response.cleared_range.as_deref(),
                    "Values cleared"
                );
            })
            .change_context(RemoteRequestError::FailedToClearValues)
            .attach_printable_lazy(|| format!("Failed to clear range {range}"))
    }

    #[instrument]
    async fn get(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> error_stack::Result<ValueRange, RemoteRequestError> {
        self.hub
            .spreadsheets()
            .values_get(spreadsheet_id, range)
            .add_scope(&*self.scope)
            .doit()
            .await
            .map(|(_, value_range)| value_range)
            .change_context(RemoteRequestError::FailedToGetValues)
            .attach_printable_lazy(|| format!("Failed to read range {range}"))
    }
}
