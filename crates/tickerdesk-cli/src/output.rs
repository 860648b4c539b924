//! Rendering helpers shared by the commands.

use serde::Serialize;
use tickerdesk_core::{Instrument, LiveQuote};

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{payload}");
    Ok(())
}

/// Currency glyph the way the service's own UI shows prices.
pub fn currency_symbol(currency: &str) -> &'static str {
    if currency == "INR" {
        "₹"
    } else {
        "$"
    }
}

pub fn format_price(value: f64, currency: &str) -> String {
    format!("{}{value:.2}", currency_symbol(currency))
}

/// Percent with an explicit sign: `+3.20%`, `-1.10%`.
pub fn format_signed_percent(value: f64) -> String {
    format!("{value:+.2}%")
}

/// Signed absolute change: `+2.00`, `-0.35`.
pub fn format_signed(value: f64) -> String {
    format!("{value:+.2}")
}

/// Volume in millions, matching the quote panel's `12.34M` style.
pub fn format_millions(volume: u64) -> String {
    format!("{:.2}M", volume as f64 / 1e6)
}

/// Price range rendered as `$low - $high`, ASCII only.
pub fn format_range(low: f64, high: f64, currency: &str) -> String {
    format!(
        "{} - {}",
        format_price(low, currency),
        format_price(high, currency)
    )
}

/// Direction styling for a change value. Zero counts as up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    Up,
    Down,
}

impl ChangeDirection {
    pub fn from_change(change: f64) -> Self {
        if change >= 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }

    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
        }
    }
}

pub fn render_instruments(
    instruments: &[Instrument],
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => render_json(&instruments, pretty),
        OutputFormat::Text => {
            if instruments.is_empty() {
                println!("no matches");
                return Ok(());
            }
            for instrument in instruments {
                println!(
                    "{:<14} {:<40} [{}]",
                    instrument.symbol, instrument.name, instrument.exchange
                );
            }
            Ok(())
        }
    }
}

pub fn render_live_quote(
    quote: &LiveQuote,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => render_json(quote, pretty),
        OutputFormat::Text => {
            let direction = ChangeDirection::from_change(quote.change);
            println!(
                "{} {} {} {} ({})",
                quote.symbol,
                format_price(quote.price, &quote.currency),
                direction.glyph(),
                format_signed(quote.change),
                format_signed_percent(quote.change_percent),
            );
            if let (Some(open), Some(high), Some(low)) = (quote.open, quote.high, quote.low) {
                println!(
                    "  open {}  high {}  low {}",
                    format_price(open, &quote.currency),
                    format_price(high, &quote.currency),
                    format_price(low, &quote.currency),
                );
            }
            if let Some(volume) = quote.volume {
                println!("  volume {}", format_millions(volume));
            }
            println!("  as of {}", quote.fetched_at);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_percent_carries_a_plus_sign() {
        assert_eq!(format_signed_percent(3.2), "+3.20%");
        assert_eq!(format_signed_percent(1.35), "+1.35%");
    }

    #[test]
    fn negative_percent_keeps_its_minus_sign() {
        assert_eq!(format_signed_percent(-1.1), "-1.10%");
    }

    #[test]
    fn inr_gets_the_rupee_glyph() {
        assert_eq!(format_price(2890.5, "INR"), "₹2890.50");
        assert_eq!(format_price(150.0, "USD"), "$150.00");
        assert_eq!(format_price(150.0, "EUR"), "$150.00");
    }

    #[test]
    fn zero_change_styles_as_positive() {
        assert_eq!(ChangeDirection::from_change(0.0), ChangeDirection::Up);
        assert_eq!(ChangeDirection::from_change(2.0), ChangeDirection::Up);
        assert_eq!(ChangeDirection::from_change(-0.01), ChangeDirection::Down);
    }

    #[test]
    fn volume_renders_in_millions() {
        assert_eq!(format_millions(12_340_000), "12.34M");
    }

    #[test]
    fn ranges_render_in_plain_ascii() {
        let range = format_range(124.17, 199.62, "USD");
        assert_eq!(range, "$124.17 - $199.62");
        assert!(range.is_ascii());
    }
}
