//! Example demonstrating sequences, maps and optional fields

use envi::Envi;
use std::collections::HashMap;

#[derive(Debug, Default, Envi)]
struct Config {
    // Split on ',' by default
    #[envi(env = "PORTS", default = "3000")]
    pub ports: Vec<u16>,

    // Split on a custom separator
    #[envi(env = "HOSTS", separator = ":")]
    pub hosts: Vec<String>,

    // Maps are always written as key:value,key:value
    #[envi(env = "SECTOR")]
    pub sector: HashMap<String, i32>,

    // Stays None unless RETRIES is set
    #[envi(env = "RETRIES")]
    pub retries: Option<u8>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("PORTS", "80,443,8080");
    std::env::set_var("HOSTS", "alpha.local:beta.local");
    std::env::set_var("SECTOR", "north:1,south:2");

    let config = Config::from_env()?;

    println!("Collections loaded:");
    println!("  Ports: {:?}", config.ports);
    println!("  Hosts: {:?}", config.hosts);
    println!("  Sector: {:?}", config.sector);
    println!("  Retries: {:?}", config.retries);

    Ok(())
}
