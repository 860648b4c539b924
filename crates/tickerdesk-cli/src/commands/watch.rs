use std::time::Duration;

use tickerdesk_core::{
    ApiClient, LiveQuote, LiveQuotePoller, LiveQuoteState, Symbol, POLL_PERIOD, REQUEST_TIMEOUT_MS,
};
use tokio::sync::watch;

use crate::cli::{OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output;

/// Longest a bounded watch waits for one refresh: a full poll period plus
/// the transport timeout, with slack. Failed fetches produce no
/// notification, so without this bound `--ticks` could never terminate
/// against a dead service.
fn tick_grace() -> Duration {
    POLL_PERIOD + Duration::from_millis(REQUEST_TIMEOUT_MS) + Duration::from_secs(5)
}

enum Tick {
    /// A refresh arrived; `None` is the symbol-acquisition notification
    /// that precedes the first quote.
    Refreshed(Option<LiveQuote>),
    /// Bounded wait elapsed with no refresh.
    Missed,
    /// The poller side of the channel is gone.
    Closed,
}

async fn next_tick(updates: &mut watch::Receiver<LiveQuoteState>, bounded: bool) -> Tick {
    if bounded {
        match tokio::time::timeout(tick_grace(), updates.changed()).await {
            Ok(Ok(())) => Tick::Refreshed(updates.borrow_and_update().quote.clone()),
            Ok(Err(_)) => Tick::Closed,
            Err(_) => Tick::Missed,
        }
    } else {
        match updates.changed().await {
            Ok(()) => Tick::Refreshed(updates.borrow_and_update().quote.clone()),
            Err(_) => Tick::Closed,
        }
    }
}

pub async fn run(
    args: &WatchArgs,
    client: &ApiClient,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let bounded = args.ticks != 0;

    let mut poller = LiveQuotePoller::new(client.clone());
    // Subscribe before watching so no refresh can slip past us.
    let mut updates = poller.subscribe();
    poller.watch(symbol);

    let mut seen = 0u64;
    loop {
        match next_tick(&mut updates, bounded).await {
            Tick::Refreshed(Some(quote)) => {
                output::render_live_quote(&quote, format, pretty)?;
                seen += 1;
            }
            // Symbol acquisition carries no quote and does not count.
            Tick::Refreshed(None) => continue,
            Tick::Missed => {
                eprintln!("no refresh within {}s", tick_grace().as_secs());
                seen += 1;
            }
            Tick::Closed => break,
        }
        if bounded && seen >= args.ticks {
            break;
        }
    }

    poller.stop();
    Ok(())
}
