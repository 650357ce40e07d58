//! pwcrack binary entry point.
//!
//! Thin wrapper around the pwcrack library that:
//! 1. Initializes logging on stderr
//! 2. Loads configuration
//! 3. Validates it, runs the attack and prints one `username : password`
//!    line per match

use anyhow::Result;
use pwcrack::CrackConfig;

fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries matches
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CrackConfig::from_args();

    tracing::info!(
        "Configuration loaded: dictionary={:?}, shadow={:?}, threads={}",
        config.dictionary,
        config.shadow,
        config.threads
    );

    for cracked in pwcrack::run(&config)? {
        println!("{cracked}");
    }

    Ok(())
}
