use anyhow::Result;
use bolsa_series::{self as series, catalog, config::DbConfig, DateRange, Store, TickerUniverse};
use clap::Parser;
use cli::{Cli, Commands::*, TraceLevel};
use dotenv::dotenv;
use tracing::{debug, subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

mod cli;

fn preprocess(trace_level: Level) {
    dotenv().ok();
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .finish();
    subscriber::set_global_default(my_subscriber).expect("Set subscriber");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.trace {
        TraceLevel::Debug => Level::DEBUG,
        TraceLevel::Info => Level::INFO,
        TraceLevel::Warn => Level::WARN,
        TraceLevel::Error => Level::ERROR,
    };

    preprocess(log_level);
    trace!("Command line input recorded: {cli:#?}");

    ////////////////////////////////////////////////////////////////////////////////////////////////////

    // cli framework:
    // "> bolsa <COMMAND>"
    match &cli.command {
        // "> bolsa metrics"
        // the catalog is static; no store round-trip needed
        Metrics => {
            for metric in catalog::CATALOG {
                let kind = if metric.is_derived() { "derived" } else { "raw" };
                println!("{:>12} | {:7} | {}", metric.key, kind, metric.label);
            }
        }

        // every other command talks to the store
        command => {
            debug!("Establishing PostgreSQL connection pool");
            let store = Store::connect(&DbConfig::from_env())?;
            let universe = TickerUniverse::load(&store).await?;
            debug!("{} tickers enumerated", universe.len());

            match command {
                // "> bolsa tickers"
                // print the selectable universe, one symbol per line
                Tickers => {
                    for ticker in universe.display_names() {
                        println!("{ticker}");
                    }
                }

                // "> bolsa historical PETR3 MGLU3 --start .. --end .. --metric close"
                // one trace per ticker, JSON to stdout
                Historical {
                    tickers,
                    start,
                    end,
                    metric,
                } => {
                    let range = DateRange::new(*start, *end)?;
                    let traces =
                        series::build_historical(&store, &universe, tickers, range, metric)
                            .await?;
                    debug!("{} series built for metric '{metric}'", traces.len());
                    println!("{}", serde_json::to_string_pretty(&traces)?);
                }

                // "> bolsa ohlc PETR3 --start .. --end .."
                // candlestick-ready columns, JSON to stdout
                Ohlc { ticker, start, end } => {
                    let range = DateRange::new(*start, *end)?;
                    let ohlc = series::build_ohlc(&store, &universe, ticker, range).await?;
                    debug!("{} OHLC points for {}", ohlc.dates.len(), ohlc.name);
                    println!("{}", serde_json::to_string_pretty(&ohlc)?);
                }

                Metrics => unreachable!("handled above"),
            }
        }
    }

    Ok(())
}
