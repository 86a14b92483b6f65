//! Example demonstrating single-field overrides after binding

use envi::Envi;

#[derive(Debug, Default, Envi)]
struct Config {
    #[envi(env = "INTENT")]
    pub intent: i32,

    #[envi(env = "PORT", default = "8080")]
    pub port: u16,

    #[envi(env = "HOSTS", separator = ";")]
    pub hosts: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("INTENT", "1");

    let mut config = Config::default();
    let mut binding = envi::bind(&mut config)?;
    println!("Bound: {:?}", binding.record());

    // Replace a single field; the others are left alone
    binding.set_field_by_name("port", "2323")?;

    // set_field_by_name splits sequences on the first field's separator;
    // set_field uses the target field's own
    binding.set_field("hosts", "a.local;b.local")?;

    println!("Overridden: {:?}", binding.record());

    if let Err(e) = binding.set_field_by_name("missing", "1") {
        println!("Expected failure: {}", e);
    }

    Ok(())
}
