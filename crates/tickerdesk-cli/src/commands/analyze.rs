use tickerdesk_core::{AnalysisResult, ApiClient, Symbol};

use crate::cli::{OutputFormat, SymbolArg};
use crate::error::CliError;
use crate::output::{self, format_signed_percent};

pub async fn run(
    args: &SymbolArg,
    client: &ApiClient,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let analysis = client.analysis(&symbol).await?;

    match format {
        OutputFormat::Json => output::render_json(&analysis, pretty),
        OutputFormat::Text => {
            render_text(&analysis);
            Ok(())
        }
    }
}

fn render_text(analysis: &AnalysisResult) {
    println!("{} - {} - {}", analysis.symbol, analysis.name, analysis.sentiment);
    if let Some(change_percent) = analysis.change_percent {
        println!("  day change {}", format_signed_percent(change_percent));
    }

    let metrics = &analysis.metrics;
    if metrics.total_trading_days > 0 {
        println!(
            "  avg {:.2}  high {:.2}  low {:.2}  range {:.2}",
            metrics.average_price, metrics.highest_price, metrics.lowest_price, metrics.price_range,
        );
        println!(
            "  daily return {:.2}%  volatility {:.2}%  win rate {:.2}%  over {} trading days",
            metrics.average_daily_return,
            metrics.volatility,
            metrics.win_rate,
            metrics.total_trading_days,
        );
    }

    println!();
    println!("{}", analysis.analysis);
    println!();
    println!("  generated at {}", analysis.generated_at);
}
