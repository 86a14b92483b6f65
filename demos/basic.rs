//! Basic usage example

use envi::Envi;
use std::time::Duration;

#[derive(Debug, Default, Envi)]
struct Config {
    // Loaded from PORT, 8080 when unset
    #[envi(env = "PORT", default = "8080")]
    pub port: u16,

    // Must be set, even though the field has a zero value
    #[envi(env = "DATABASE_URL,required")]
    pub database_url: String,

    // Integers accept hex, octal and binary literals
    #[envi(env = "MAX_CONNECTIONS", default = "0x10")]
    pub max_connections: u32,

    // Booleans accept 1/0, t/f, true/false in common casings
    #[envi(env = "DEBUG")]
    pub debug_mode: bool,

    #[envi(env = "REQUEST_TIMEOUT", default = "1m30s")]
    pub request_timeout: Duration,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("DEBUG", "TRUE");

    // Load configuration
    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Port: {}", config.port);
    println!("  Database URL: {}", config.database_url);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Debug Mode: {}", config.debug_mode);
    println!("  Request Timeout: {:?}", config.request_timeout);

    Ok(())
}
