use tickerdesk_core::ApiClient;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output;

pub async fn run(client: &ApiClient, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let health = client.health().await?;

    match format {
        OutputFormat::Json => output::render_json(&health, pretty),
        OutputFormat::Text => {
            if health.message.is_empty() {
                println!("{}", health.status);
            } else {
                println!("{}: {}", health.status, health.message);
            }
            Ok(())
        }
    }
}
