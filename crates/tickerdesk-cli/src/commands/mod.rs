mod analyze;
mod health;
mod live;
mod predict;
mod search;
mod show;
mod stocks;
mod watch;

use tickerdesk_core::ApiClient;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli, client: &ApiClient) -> Result<(), CliError> {
    match &cli.command {
        Command::Search(args) => search::run(args, client, cli.format, cli.pretty).await,
        Command::Show(args) => show::run(args, client, cli.format, cli.pretty).await,
        Command::Live(args) => live::run(args, client, cli.format, cli.pretty).await,
        Command::Predict(args) => predict::run(args, client, cli.format, cli.pretty).await,
        Command::Analyze(args) => analyze::run(args, client, cli.format, cli.pretty).await,
        Command::Stocks => stocks::run(client, cli.format, cli.pretty).await,
        Command::Health => health::run(client, cli.format, cli.pretty).await,
        Command::Watch(args) => watch::run(args, client, cli.format, cli.pretty).await,
    }
}
