use std::future::Future;
use std::io::Write;
use chrono::{NaiveDate, Utc};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod utils;
#[cfg(test)]
mod testing;

use api::NbpClient;
use commands::Outcome;
use config::AppConfig;
use services::chart_service::PngChartSurface;
use services::session_service::TrackerSession;

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn prompt() {
    print!("> ");
    if let Err(e) = std::io::stdout().flush() {
        debug!("Failed to flush prompt: {}", e);
    }
}

/// Run `task` unless `interrupt` fires first
async fn until_interrupted<T>(
    task: impl Future<Output = T>,
    interrupt: impl Future,
) -> Option<T> {
    tokio::select! {
        output = task => Some(output),
        _ = interrupt => None,
    }
}

fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    for directive in ["gold_tracker=info", "reqwest=warn"] {
        match directive.parse::<tracing_subscriber::filter::Directive>() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("Ignoring log directive {}: {}", directive, e),
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(true)
        .init();
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    info!("🪙 Starting Gold Price Tracker...");

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };
    debug!("Configuration: {:?}", config);

    let client = match NbpClient::with_base_url(config.nbp_api_url.clone(), config.http_timeout) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create NBP client: {}", e);
            return;
        }
    };
    let surface = PngChartSurface::new(&config.chart_output, config.chart_width, config.chart_height);
    info!("Charts are written to {}", surface.path().display());

    let mut session = TrackerSession::new(client, surface, today());

    // Load the default range once, as the page does on first render
    let loaded = until_interrupted(session.update_graph(today()), tokio::signal::ctrl_c()).await;
    match loaded {
        Some(Ok(points)) => println!("📈 Loaded {} quotations for the current month", points),
        Some(Err(e)) => println!("{}", e),
        None => {
            info!("Interrupted");
            session.shutdown();
            return;
        }
    }
    println!("Type `help` for the list of commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt();

        let Some(line) = until_interrupted(lines.next_line(), tokio::signal::ctrl_c()).await else {
            info!("Interrupted");
            break;
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read input: {}", e);
                break;
            }
        };

        // Ctrl-C also cancels a command mid-fetch
        let outcome = until_interrupted(
            commands::handle_line(&mut session, &line, today()),
            tokio::signal::ctrl_c(),
        )
        .await;

        match outcome {
            None => {
                info!("Interrupted");
                break;
            }
            Some(Outcome::Silent) => {}
            Some(Outcome::Reply(text)) => println!("{}", text),
            Some(Outcome::Quit) => break,
        }
    }

    session.shutdown();
    info!("👋 Gold Price Tracker stopped");
}
