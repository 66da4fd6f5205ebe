mod config;
mod display;
mod error;
mod form;
mod projection;
mod role;
mod seed;
mod standings;
mod store;
mod web;

use actix_web::web::Data;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{AppConfig, RunMode};
use display::{print_events, print_leaderboard};
use seed::initial_store;
use standings::LiveTicker;
use store::{SharedStore, StoreHandle};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env()?;
    let store = StoreHandle::shared(initial_store(&config.series)?);
    info!(series = %config.series, "Dashboard state loaded");

    match config.mode {
        RunMode::Web { port } => {
            println!("Starting web server on port {}...", port);
            println!("Access the API at http://localhost:{}/api/dashboard", port);

            let ticker = LiveTicker::new(store.clone(), config.tick_interval, config.rng_seed);
            let state = Data::new(web::AppState { store, ticker });
            web::start_server(port, state).await?;
        }
        RunMode::Cli { ticks } => run_cli(&store, &config, ticks).await,
    }
    Ok(())
}

/// Prints the selected series, then runs `ticks` live updates one interval
/// apart and prints the leaderboard after each
async fn run_cli(store: &SharedStore, config: &AppConfig, ticks: u32) {
    let snapshot = store.snapshot();
    let data = snapshot.selected();
    print_leaderboard(snapshot.selected_name(), &data.leaderboard);
    print_events(&data.events);

    if data.leaderboard.is_empty() {
        println!("\nNo teams in this series, skipping live updates.");
        return;
    }

    let mut rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    println!("\n=== Running {} live updates ===", ticks);
    for tick in 1..=ticks {
        tokio::time::sleep(config.tick_interval).await;
        let next = store.apply(|s| {
            let next = s.tick_leaderboard(&mut rng);
            (next.clone(), next)
        });
        print_leaderboard(&format!("{} (update {})", next.selected_name(), tick), &next.selected().leaderboard);
    }
}
