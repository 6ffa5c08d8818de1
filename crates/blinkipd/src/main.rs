// # blinkipd - blink the IP address on the activity LED
//
// Runs once after boot on a headless board. It finds the primary IPv4
// address, reduces it to its last octet (or last two when the second-to-last
// is not 0) and blinks every digit as a numeral on the activity LED:
// `I` is a short blink, `V` a medium one and `X` a long one. Zero is `X`.
//
// This binary is a thin integration layer: all blinking and resolution
// logic lives in blinkip-core.
//
// ## Usage
//
// ```bash
// sudo blinkipd                    # blink now
// sudo blinkipd install            # run at every boot via root's crontab
// blinkipd --log-level debug       # verbose
// ```
//
// ## Configuration
//
// See `config.rs` for the optional JSON file and `BLINKIP_*` variables.

mod config;
mod install;

use anyhow::Result;
use blinkip_core::{AddressResolver, BlinkConfig, BlinkPlayer, PulseDevice};
use blinkip_ip_udp::UdpRouteProbe;
use clap::{Parser, ValueEnum};
use install::InstallError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy)]
enum BlinkExitCode {
    /// Blinked (or installed) successfully
    Success = 0,
    /// `install` without root
    InstallRequiresRoot = 1,
    /// `install` found an existing entry
    AlreadyInstalled = 2,
    /// Bad arguments, configuration or logging setup
    ConfigError = 3,
    /// Device or runtime failure
    RuntimeError = 4,
}

impl From<BlinkExitCode> for ExitCode {
    fn from(code: BlinkExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Action {
    /// Run at every boot from root's crontab
    Install,
}

#[derive(Debug, Parser)]
#[command(name = "blinkipd")]
#[command(about = "Blink the IP address on the activity LED")]
struct Cli {
    /// Optional action instead of blinking
    #[arg(value_enum)]
    action: Option<Action>,

    /// Logging level (trace, debug, info, warning, error, critical)
    #[arg(long = "log-level", env = "BLINKIP_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// JSON configuration file
    #[arg(long, env = "BLINKIP_CONFIG")]
    config: Option<PathBuf>,
}

fn parse_log_level(name: &str) -> Option<Level> {
    match name.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" | "critical" => Some(Level::ERROR),
        _ => None,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(log_level) = parse_log_level(&cli.log_level) else {
        eprintln!(
            "Invalid log level '{}'. Valid levels: trace, debug, info, warning, error, critical",
            cli.log_level
        );
        return BlinkExitCode::ConfigError.into();
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return BlinkExitCode::ConfigError.into();
    }

    if cli.action == Some(Action::Install) {
        return run_install().into();
    }

    let config = match config::load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            return BlinkExitCode::ConfigError.into();
        }
    };

    // Single-threaded: every pause is awaited in sequence on one task
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return BlinkExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run(config).await {
            error!("Blinking failed: {:#}", e);
            BlinkExitCode::RuntimeError
        } else {
            BlinkExitCode::Success
        }
    });

    result.into()
}

fn run_install() -> BlinkExitCode {
    match install::install() {
        Ok(entry) => {
            info!("Installed: {}", entry);
            BlinkExitCode::Success
        }
        Err(e @ InstallError::NotPrivileged) => {
            error!("{}", e);
            BlinkExitCode::InstallRequiresRoot
        }
        Err(e @ InstallError::AlreadyInstalled(_)) => {
            warn!("{}", e);
            BlinkExitCode::AlreadyInstalled
        }
        Err(e) => {
            error!("Installation failed: {}", e);
            BlinkExitCode::RuntimeError
        }
    }
}

/// Resolve the address, then blink it
async fn run(config: BlinkConfig) -> Result<()> {
    let probe = UdpRouteProbe::from_config(&config.resolver);
    let resolver = AddressResolver::from_config(Box::new(probe), &config.resolver);

    let digits = resolver.resolve().await;
    info!("Found primary IPv4 address' low digits: {}", digits);

    let device = PulseDevice::open(&config.led).await?;
    info!(
        "Blinking on {} ({:?} polarity)",
        config.led.brightness_path.display(),
        device.polarity()
    );

    BlinkPlayer::new(device).play(&digits).await?;
    Ok(())
}
