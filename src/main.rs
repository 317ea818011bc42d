//! # Tessera - Declarative Components, Rendered Headlessly
//!
//! Runs one of the demo applications, simulates taps and prints the
//! resulting view tree.
//!
//! ## Quick Start
//!
//! ```bash
//! # Print the counter demo's view tree
//! cargo run
//!
//! # Tap "+" twice and print the tree as JSON
//! cargo run -- --tap + --tap + --json
//!
//! # Select a table row with debug logging
//! cargo run -- --demo table --tap "Row 3" -vv
//! ```

mod demo;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tessera_core::Config;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

use demo::{App, CarouselApp, CounterApp, Runtime, TableApp};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Demo {
    Counter,
    Table,
    Carousel,
}

/// Tessera - render declarative components without a display
#[derive(Parser, Debug)]
#[command(name = "tessera")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (defaults to the user config directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Demo application to run
    #[arg(short, long, value_enum, default_value_t = Demo::Counter)]
    demo: Demo,

    /// Tap the first view showing TEXT; repeatable
    #[arg(long = "tap", value_name = "TEXT")]
    taps: Vec<String>,

    /// Print the view tree as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load(),
    };

    // -v flags win over the configured level
    let log_level = match args.verbose {
        0 => config
            .logging
            .level
            .parse()
            .unwrap_or(tracing::Level::WARN),
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(log_level).into())
                .from_env_lossy(),
        )
        .init();

    tracing::info!("Starting Tessera v{}", env!("CARGO_PKG_VERSION"));

    let output = match args.demo {
        Demo::Counter => run(CounterApp::default(), config, &args)?,
        Demo::Table => run(TableApp::default(), config, &args)?,
        Demo::Carousel => run(CarouselApp::default(), config, &args)?,
    };
    print!("{output}");

    Ok(())
}

/// Runs `app` through the requested taps and renders the final tree.
fn run<A: App>(app: A, config: Config, args: &Args) -> anyhow::Result<String> {
    let mut runtime = Runtime::start(app, config)?;
    for text in &args.taps {
        let handled = runtime
            .tap(text)
            .with_context(|| format!("Failed to tap {text:?}"))?;
        tracing::info!(tap = %text, handled, "Tapped");
    }

    let window = runtime.window();
    if args.json {
        let mut json = serde_json::to_string_pretty(&window.snapshot())?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(window.outline())
    }
}
