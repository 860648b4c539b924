use tickerdesk_core::{ApiClient, Symbol};

use crate::cli::{OutputFormat, SymbolArg};
use crate::error::CliError;
use crate::output;

pub async fn run(
    args: &SymbolArg,
    client: &ApiClient,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let quote = client.live_quote(&symbol).await?;
    output::render_live_quote(&quote, format, pretty)
}
