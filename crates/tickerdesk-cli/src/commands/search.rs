use tickerdesk_core::ApiClient;

use crate::cli::{OutputFormat, SearchArgs};
use crate::error::CliError;
use crate::output;

pub async fn run(
    args: &SearchArgs,
    client: &ApiClient,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let query = args.query.trim();
    if query.is_empty() {
        return Err(CliError::Usage(String::from("query must not be empty")));
    }

    let results = client.search(query).await?;
    output::render_instruments(&results, format, pretty)
}
