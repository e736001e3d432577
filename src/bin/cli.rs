//! ReadyBeam CLI - Command-line interface
//!
//! Drives a ReadyBeam module from scripts and the shell.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use readybeam_core::cli::print_exit_codes;
use readybeam_core::core::device::MAX_BRIGHTNESS;
use readybeam_core::{AppConfig, Channel, CliResult, ParameterId, ReadyBeam};
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI output format
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format for scripting
    Json,
}

/// ReadyBeam CLI
#[derive(Parser, Debug)]
#[command(
    name = "readybeam-cli",
    version,
    about = "Control FISBA ReadyBeam laser modules over serial",
    long_about = None
)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, env = "READYBEAM_CONFIG")]
    config: Option<PathBuf>,

    /// Serial port name (e.g., COM3, /dev/ttyUSB0)
    #[arg(short, long, env = "READYBEAM_PORT")]
    port: Option<String>,

    /// Baud rate
    #[arg(short, long)]
    baud: Option<u32>,

    /// Read/write timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Device address
    #[arg(short, long)]
    address: Option<u8>,

    /// Reject responses that do not echo the request sequence
    #[arg(long)]
    verify_sequence: bool,

    /// Reject responses with a bad checksum
    #[arg(long)]
    verify_checksum: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the device status
    Status,

    /// Set the brightness of all channels (percent, 0 disables a channel)
    Set {
        /// Red channel
        #[arg(allow_negative_numbers = true)]
        red: f32,
        /// Green channel
        #[arg(allow_negative_numbers = true)]
        green: f32,
        /// Blue channel
        #[arg(allow_negative_numbers = true)]
        blue: f32,
    },

    /// Switch all channels off
    Off,

    /// Show one channel's state
    Channel {
        /// Channel (1-3 or red/green/blue)
        channel: Channel,
    },

    /// Read a raw parameter
    Query {
        /// Parameter id (e.g. 104, 7013)
        parameter: u16,

        /// Instance (1-3)
        #[arg(short, long, default_value = "1")]
        instance: u8,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print the exit code table
    ExitCodes,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the effective configuration to the config file
    Init,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&cli, "info");
            return report(&cli, &CliResult::from(&e));
        }
    };
    init_logging(&cli, &config.logging.level);

    tracing::debug!("ReadyBeam CLI v{}", readybeam_core::VERSION);

    match run(&cli, config) {
        Ok(()) => report(&cli, &CliResult::success()),
        Err(e) => report(&cli, &CliResult::from(&e)),
    }
}

fn init_logging(cli: &Cli, configured: &str) {
    let default = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        configured
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(default))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<AppConfig, readybeam_core::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load().or_else(|e| match e {
            readybeam_core::ConfigError::NoConfigDir => Ok(AppConfig::default()),
            other => Err(other),
        })?,
    };

    if let Some(port) = &cli.port {
        config.connection.port = port.clone();
    }
    if let Some(baud) = cli.baud {
        config.connection.baud_rate = baud;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.connection.timeout_ms = timeout_ms;
    }
    if let Some(address) = cli.address {
        config.address = address;
    }
    config.protocol.verify_sequence |= cli.verify_sequence;
    config.protocol.verify_checksum |= cli.verify_checksum;

    Ok(config)
}

fn report(cli: &Cli, result: &CliResult) -> ExitCode {
    if let Some(msg) = result.message() {
        match cli.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "error": msg,
                    "code": result.code(),
                });
                println!("{json}");
            }
            OutputFormat::Text => eprintln!("Error: {msg}"),
        }
    }
    result.to_exit_code()
}

fn run(cli: &Cli, config: AppConfig) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Config { action } => return handle_config(cli, &config, action),
        Commands::ExitCodes => {
            print_exit_codes();
            return Ok(());
        }
        _ => {}
    }

    let mut laser = ReadyBeam::open(config.connection.clone(), config.address, config.protocol)
        .with_context(|| format!("Could not open ReadyBeam on {}", config.connection.port))?;

    let outcome = run_device_command(cli, &mut laser);
    let closed = laser.close();

    outcome?;
    closed?;
    Ok(())
}

fn run_device_command(cli: &Cli, laser: &mut ReadyBeam) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Status => {
            let status = laser.get_device_status()?;
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::json!({ "status": status })),
                OutputFormat::Text => println!("{status}"),
            }
        }
        Commands::Set { red, green, blue } => {
            let powers = [*red, *green, *blue];
            for (channel, power) in Channel::ALL.iter().zip(powers) {
                if !(0.0..=MAX_BRIGHTNESS).contains(&power) {
                    tracing::warn!("{channel}: {power}% is outside 0..={MAX_BRIGHTNESS}");
                }
            }
            laser.set_brightness(&powers)?;
            if !cli.quiet {
                match cli.format {
                    OutputFormat::Json => println!(
                        "{}",
                        serde_json::json!({ "red": red, "green": green, "blue": blue })
                    ),
                    OutputFormat::Text => println!("Set R={red}% G={green}% B={blue}%"),
                }
            }
        }
        Commands::Off => {
            laser.set_brightness(&[0.0, 0.0, 0.0])?;
            if !cli.quiet {
                println!("All channels off");
            }
        }
        Commands::Channel { channel } => {
            let active = laser.is_channel_active(*channel)?;
            let brightness = laser.get_brightness(*channel)?;
            match cli.format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({
                        "channel": channel,
                        "active": active,
                        "brightness": brightness,
                    })
                ),
                OutputFormat::Text => println!(
                    "{channel}: {} at {brightness}%",
                    if active { "active" } else { "inactive" }
                ),
            }
        }
        Commands::Query { parameter, instance } => {
            let response = laser.query(ParameterId(*parameter), *instance)?;
            match cli.format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({
                        "parameter": parameter,
                        "instance": instance,
                        "payload": response.payload(),
                        "value": response.value_u32().ok(),
                    })
                ),
                OutputFormat::Text => println!("{}", response.payload()),
            }
        }
        Commands::Config { .. } | Commands::ExitCodes => {}
    }
    Ok(())
}

fn handle_config(cli: &Cli, config: &AppConfig, action: &ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
            OutputFormat::Text => print!("{}", config.to_toml()?),
        },
        ConfigAction::Init => {
            let path = match &cli.config {
                Some(path) => {
                    config.save_to(path)?;
                    path.clone()
                }
                None => config.save()?,
            };
            if !cli.quiet {
                println!("Wrote {}", path.display());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_set_accepts_negative_brightness() {
        let cli = Cli::try_parse_from(["readybeam-cli", "set", "-1", "0", "-0.5"]).unwrap();
        match cli.command {
            Commands::Set { red, green, blue } => {
                assert_eq!(red, -1.0);
                assert_eq!(green, 0.0);
                assert_eq!(blue, -0.5);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_still_parse_before_set() {
        let cli = Cli::try_parse_from(["readybeam-cli", "-p", "COM3", "-a", "2", "set", "10", "20", "30"]).unwrap();
        assert_eq!(cli.port.as_deref(), Some("COM3"));
        assert_eq!(cli.address, Some(2));
        assert!(matches!(cli.command, Commands::Set { .. }));
    }
}
