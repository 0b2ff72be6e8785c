use error_stack::ResultExt;
use google_sheets4::{api::ValueRange, Sheets};
use tracing::instrument;

use crate::config::sheets_config::SheetsConfig;

use super::{
    auth::{self, CredentialError},
    http_client,
    hub_values_api::HubValuesApi,
    string_table::IntoStringTable,
    value_input_option::ValueInputOption,
    value_range_factory::ValueRangeFactory,
    values_api::{RemoteRequestError, ValuesApi},
};

/// An authorized connection bound to one spreadsheet.
///
/// The spreadsheet id and value input option are fixed at construction.
#[derive(Debug)]
pub struct SheetService<A: ValuesApi = HubValuesApi> {
    api: A,
    spreadsheet_id: Box<str>,
    value_input_option: ValueInputOption,
}

impl SheetService<HubValuesApi> {
    /// Loads the client secret named in `config` and authorizes a Google Sheets client for
    /// `spreadsheet_id`. No handle is returned unless the credentials were read and parsed.
    #[instrument(name = "SheetService::connect", skip(config, spreadsheet_id))]
    pub async fn connect(
        config: &SheetsConfig,
        spreadsheet_id: impl Into<Box<str>>,
    ) -> error_stack::Result<Self, CredentialError> {
        let credentials =
            auth::read_credentials(config.credential_kind, &config.secret_file_path).await?;

        let client = http_client::http_client()?;
        let authenticator = auth::authenticator(config, credentials, client.clone()).await?;
        let hub = Sheets::new(client, authenticator);

        let service = Self::with_api(
            HubValuesApi::new(hub, config.oauth_host.clone()),
            spreadsheet_id,
            config.value_input_option,
        );
        tracing::info!(spreadsheet_id = %service.spreadsheet_id, "Connected to spreadsheet");
        Ok(service)
    }
}

impl<A: ValuesApi> SheetService<A> {
    pub fn with_api(
        api: A,
        spreadsheet_id: impl Into<Box<str>>,
        value_input_option: ValueInputOption,
    ) -> Self {
        Self {
            api,
            spreadsheet_id: spreadsheet_id.into(),
            value_input_option,
        }
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub fn value_input_option(&self) -> ValueInputOption {
        self.value_input_option
    }

    /// Writes `table` with its upper left corner at `top_left_cell` (e.g. `Sheet1!A1`) in a
    /// single request. Rows may have different lengths.
    #[instrument(
        skip(self, table),
        fields(spreadsheet_id = %self.spreadsheet_id, rows = table.len())
    )]
    pub async fn send_data_table<R: AsRef<[T]>, T: AsRef<str>>(
        &self,
        top_left_cell: &str,
        table: &[R],
    ) -> error_stack::Result<(), RemoteRequestError> {
        let value_range = ValueRange::from_table(table);

        self.api
            .update(
                &self.spreadsheet_id,
                top_left_cell,
                value_range,
                self.value_input_option,
            )
            .await
            .attach_printable_lazy(|| {
                format!(
                    "Sending {} rows to {} in spreadsheet {}",
                    table.len(),
                    top_left_cell,
                    self.spreadsheet_id
                )
            })?;

        tracing::info!("Data table sent");
        Ok(())
    }

    /// Clears the values in `range_notation` (A1 notation). Formatting is left untouched.
    #[instrument(skip(self), fields(spreadsheet_id = %self.spreadsheet_id))]
    pub async fn clear_table_area(
        &self,
        range_notation: &str,
    ) -> error_stack::Result<(), RemoteRequestError> {
        self.api
            .clear(&self.spreadsheet_id, range_notation)
            .await
            .attach_printable_lazy(|| {
                format!(
                    "Clearing {} in spreadsheet {}",
                    range_notation, self.spreadsheet_id
                )
            })?;

        tracing::info!("Table area cleared");
        Ok(())
    }

    /// Reads `range_notation` back as text. Blank trailing cells are not returned by the remote,
    /// so rows can be shorter than the range and an empty range yields no rows.
    #[instrument(skip(self), fields(spreadsheet_id = %self.spreadsheet_id))]
    pub async fn read_table(
        &self,
        range_notation: &str,
    ) -> error_stack::Result<Vec<Vec<String>>, RemoteRequestError> {
        let value_range = self
            .api
            .get(&self.spreadsheet_id, range_notation)
            .await
            .attach_printable_lazy(|| {
                format!(
                    "Reading {} from spreadsheet {}",
                    range_notation, self.spreadsheet_id
                )
            })?;

        Ok(value_range
            .values
            .map(IntoStringTable::into_string_table)
            .unwrap_or_default())
    }
}
