use tickerdesk_core::{ApiClient, StockSnapshot, Symbol};

use crate::cli::{OutputFormat, ShowArgs};
use crate::error::CliError;
use crate::output::{
    self, format_price, format_range, format_signed, format_signed_percent, ChangeDirection,
};

pub async fn run(
    args: &ShowArgs,
    client: &ApiClient,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let snapshot = client.snapshot(&symbol, &args.period).await?;

    match format {
        OutputFormat::Json => output::render_json(&snapshot, pretty),
        OutputFormat::Text => {
            render_text(&snapshot);
            Ok(())
        }
    }
}

fn render_text(snapshot: &StockSnapshot) {
    let direction = ChangeDirection::from_change(snapshot.change);
    println!(
        "{} - {} [{}]",
        snapshot.symbol, snapshot.name, snapshot.exchange
    );
    println!(
        "  {} {} {} ({})",
        format_price(snapshot.current_price, &snapshot.currency),
        direction.glyph(),
        format_signed(snapshot.change),
        format_signed_percent(snapshot.change_percent),
    );
    println!(
        "  previous close {}",
        format_price(snapshot.previous_close, &snapshot.currency)
    );
    if snapshot.fifty_two_week_low > 0.0 || snapshot.fifty_two_week_high > 0.0 {
        println!(
            "  52w range {}",
            format_range(
                snapshot.fifty_two_week_low,
                snapshot.fifty_two_week_high,
                &snapshot.currency
            ),
        );
    }

    match (
        snapshot.history.first(),
        snapshot.history.last(),
        snapshot.price_bounds(),
    ) {
        (Some(first), Some(last), Some((low, high))) => {
            println!(
                "  history {} bars, {} to {}, scale {}",
                snapshot.history.len(),
                first.date,
                last.date,
                format_range(low, high, &snapshot.currency),
            );
        }
        _ => println!("  no history"),
    }
}
