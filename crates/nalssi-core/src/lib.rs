//! Core plumbing for the Nalssi weather-calendar application.
//!
//! Holds configuration, user settings, and shared error types used by the
//! weather and calendar crates.

pub mod config;
pub mod error;
pub mod settings;

pub use config::WeatherApiConfig;
pub use error::ConfigError;
pub use settings::{Patch, SettingsPatch, TemperatureUnit, UserSettings};

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Nalssi core initialized");
    Ok(())
}
