mod config;
mod error;
mod line_source;
mod log_record;
mod sink;
mod tailer;
mod telemetry;

use anyhow::Result;
use clap::Parser;
use line_source::LineSource;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use sink::Sink;

#[tokio::main]
async fn main() -> Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()?;

    // Parse command-line arguments
    let cli = config::Cli::parse();

    if cli.list_variables {
        for name in telemetry::VARIABLE_NAMES {
            println!("{}", name);
        }
        return Ok(());
    }

    // Load configuration
    let config = config::load_config(&cli)?;

    info!("Starting pixie-tail, logging to {:?}", config.log_file);

    let mut source = LineSource::open(&config.serial_port, config.baud_rate)?;
    let mut sink = Sink::new(tokio::io::stdout(), config.log_file.clone());

    // The loop only returns on a fatal error
    tokio::select! {
        result = tailer::run(&mut source, &mut sink) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, log file {:?} is complete", config.log_file);
        }
    }

    Ok(())
}
