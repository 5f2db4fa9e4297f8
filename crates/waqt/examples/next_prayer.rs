//! Live countdown to the next prayer, fed by the Aladhan API.
//!
//! ```sh
//! WAQT_CITY=Aarhus RUST_LOG=waqt=debug cargo run -p waqt --features async --example next_prayer
//! ```

use std::time::Duration;
use tracing_subscriber::EnvFilter;
use waqt::network::{AladhanClient, CachedTimetable};
use waqt::{CountdownTicker, SystemClock, WidgetConfigBuilder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = WidgetConfigBuilder::from_env()?.build()?;
    println!("\n🕌 Prayer times for {}, {} ({})\n", config.city, config.country, config.timezone);

    let timetable = CachedTimetable::new(AladhanClient::new()?);
    let ticker = CountdownTicker::spawn(config, timetable, SystemClock);
    let mut states = ticker.subscribe();

    let mut printed_rows = false;
    for _ in 0..10 {
        match tokio::time::timeout(Duration::from_secs(15), states.changed()).await {
            Ok(Ok(())) => {}
            Ok(Err(_)) => anyhow::bail!("countdown ticker stopped"),
            Err(_) => anyhow::bail!("no prayer schedule received within 15s"),
        }
        let state = states.borrow_and_update().clone();
        if let Some(error) = &state.last_error {
            eprintln!("  ⚠️ Could not fetch prayer times: {}", error);
        }
        let Some(board) = state.board.clone() else { continue };

        if !printed_rows {
            if let Some(date) = state.current_date() {
                println!("  {}\n", date);
            }
            for row in board.rows() {
                let marker = if row.is_next { "→" } else { " " };
                println!("  {} {:<8} {:<8} {}", marker, row.name, row.arabic, row.time);
            }
            println!();
            printed_rows = true;
        }

        if let (Some(next), Some(countdown)) = (board.next, board.countdown) {
            println!("  ⏳ {} ({}) in {}", next.name, next.time_label(), countdown);
        }
    }

    ticker.shutdown();
    Ok(())
}
