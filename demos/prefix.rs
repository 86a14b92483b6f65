//! Example demonstrating prefix attribute

use envi::Envi;

#[derive(Debug, Default, Envi)]
#[envi(prefix = "MYAPP_")]
struct Config {
    // Environment variables will be prefixed: MYAPP_DATABASE_URL, MYAPP_PORT, etc.
    #[envi(env = "DATABASE_URL,required")]
    pub database_url: String,

    #[envi(env = "PORT", default = "8080")]
    pub port: u16,

    #[envi(env = "DEBUG")]
    pub debug: bool,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables with prefix
    std::env::set_var("MYAPP_DATABASE_URL", "postgres://localhost/db");
    std::env::set_var("MYAPP_PORT", "3000");

    let config = Config::from_env()?;

    println!("Configuration with prefix 'MYAPP_':");
    println!("  Database URL: {}", config.database_url);
    println!("  Port: {}", config.port);
    println!("  Debug: {}", config.debug);

    Ok(())
}
