//! Example demonstrating how to branch on binding errors

use envi::{Cause, Envi};

#[derive(Debug, Default, Envi)]
struct Config {
    #[envi(env = "PROD,required")]
    pub is_prod: bool,

    #[envi(env = "WORKERS")]
    pub workers: u8,
}

fn main() {
    std::env::remove_var("PROD");
    std::env::set_var("WORKERS", "512");

    for attempt in ["without PROD", "with PROD"] {
        if attempt == "with PROD" {
            std::env::set_var("PROD", "true");
        }

        match Config::from_env() {
            Ok(config) => println!("{attempt}: {:?}", config),
            Err(e) => match e.cause() {
                Cause::RequiredMissing { key } => {
                    println!("{attempt}: fatal, {} must be set ({})", key, e.key_name)
                }
                Cause::Conversion { literal, target, .. } => {
                    println!("{attempt}: warning, {literal:?} is not a valid {target}")
                }
                _ => println!("{attempt}: {}", e),
            },
        }
    }
}
