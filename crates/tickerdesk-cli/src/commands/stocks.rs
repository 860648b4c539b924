use tickerdesk_core::ApiClient;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output;

pub async fn run(client: &ApiClient, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stocks = client.instrument_list().await?;
    output::render_instruments(&stocks, format, pretty)
}
