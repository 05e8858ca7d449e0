use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "./pixie-tail.toml";

#[cfg(windows)]
const DEFAULT_SERIAL_PORT: &str = "COM24";
#[cfg(not(windows))]
const DEFAULT_SERIAL_PORT: &str = "/dev/ttyUSB0";

#[derive(Parser, Debug)]
#[clap(name = "pixie-tail", version, about)]
pub struct Cli {
    /// Path to configuration file
    #[clap(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override serial port
    #[clap(long)]
    pub port: Option<String>,

    /// Override baud rate
    #[clap(long)]
    pub baud_rate: Option<u32>,

    /// Override log file path
    #[clap(long)]
    pub log_file: Option<PathBuf>,

    /// Print the device's debug variable names and exit
    #[clap(long)]
    pub list_variables: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub serial_port: String,
    pub baud_rate: u32,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serial_port: DEFAULT_SERIAL_PORT.to_string(),
            baud_rate: 115200,
            log_file: PathBuf::from("log.txt"),
        }
    }
}

pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if cli.config.exists() {
        let config_content = fs::read_to_string(&cli.config)
            .with_context(|| format!("Failed to read config file: {:?}", cli.config))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", cli.config))?;
        info!("Loaded configuration from {:?}", cli.config);
        config
    } else if cli.config == Path::new(DEFAULT_CONFIG_PATH) {
        Config::default()
    } else {
        anyhow::bail!("Config file not found: {:?}", cli.config);
    };

    // Apply CLI overrides
    if let Some(ref port) = cli.port {
        config.serial_port = port.clone();
    }

    if let Some(baud_rate) = cli.baud_rate {
        config.baud_rate = baud_rate;
    }

    if let Some(ref log_file) = cli.log_file {
        config.log_file = log_file.clone();
    }

    Ok(config)
}
