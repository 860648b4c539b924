use tickerdesk_core::{ApiClient, PredictionResult, Symbol};

use crate::cli::{OutputFormat, PredictArgs};
use crate::error::CliError;
use crate::output::{self, format_signed_percent};

pub async fn run(
    args: &PredictArgs,
    client: &ApiClient,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let prediction = client.prediction(&symbol, args.days).await?;

    match format {
        OutputFormat::Json => output::render_json(&prediction, pretty),
        OutputFormat::Text => {
            render_text(&prediction);
            Ok(())
        }
    }
}

fn render_text(prediction: &PredictionResult) {
    println!(
        "{}: {} ({})",
        prediction.symbol,
        prediction.recommendation,
        format_signed_percent(prediction.overall_change),
    );
    println!("  {}", prediction.recommendation_detail);
    println!(
        "  sentiment {:.2}  sma5 {:.2}  sma20 {:.2}  rsi {:.2}  volatility {:.2}  momentum {:.2}",
        prediction.sentiment,
        prediction.indicators.sma_5,
        prediction.indicators.sma_20,
        prediction.indicators.rsi,
        prediction.indicators.volatility,
        prediction.indicators.momentum,
    );
    println!();
    println!("  {:<12} {:>10} {:>10} {:>10} {:>6}", "date", "predicted", "low", "high", "conf");
    for point in &prediction.predictions {
        println!(
            "  {:<12} {:>10.2} {:>10.2} {:>10.2} {:>5.0}%",
            point.date,
            point.predicted_price,
            point.low_bound,
            point.high_bound,
            point.confidence * 100.0,
        );
    }
    println!();
    println!("  generated at {}", prediction.generated_at);
}
