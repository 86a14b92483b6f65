//! Integration tests

use envi::{Cause, Envi, LiteralError, SignedDuration};
use serial_test::serial;
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::time::Duration;

#[derive(Debug, Default, Envi)]
struct BooleanConfig {
    #[envi(env = "ISVALID")]
    pub is_valid: bool,

    #[envi(env = "ISPROD")]
    pub is_prod: bool,
}

#[derive(Debug, Default, Envi)]
struct ScalarConfig {
    #[envi(env = "PORT")]
    pub port: i64,

    #[envi(env = "VERSION")]
    pub version: u8,

    #[envi(env = "RATE")]
    pub rate: f32,

    #[envi(env = "NAME")]
    pub name: String,

    #[envi(env = "TIMEOUT")]
    pub timeout: Duration,
}

#[derive(Debug, Default, Envi)]
struct CollectionConfig {
    #[envi(env = "NUMBERS")]
    pub numbers: Vec<i32>,

    #[envi(env = "HOSTS", separator = ":")]
    pub hosts: Vec<String>,

    #[envi(env = "COUNTRIES")]
    pub countries: HashMap<String, String>,

    #[envi(env = "SECTOR")]
    pub sector: BTreeMap<String, i32>,
}

#[derive(Debug, Default, Clone, PartialEq, Envi)]
struct AppConfig {
    #[envi(env = "INTENT")]
    pub intent: i32,

    #[envi(env = "PORTS", default = "3000")]
    pub ports: Vec<u16>,

    #[envi(env = "PROD,required")]
    pub is_prod: bool,

    #[envi(env = "DEV")]
    pub is_dev: bool,

    #[envi(env = "HOSTS", separator = ":")]
    pub hosts: Vec<String>,

    #[envi(env = "SECTOR")]
    pub sector: HashMap<String, i32>,
}

#[derive(Debug, Default, Envi)]
struct ClockConfig {
    #[envi(env = "CLOCK_SKEW")]
    pub skew: SignedDuration,

    #[envi(env = "CLOCK_TIMEOUT")]
    pub timeout: Duration,

    #[envi(env = "CLOCK_RATE")]
    pub rate: f64,
}

#[derive(Debug, Default, Envi)]
struct RequiredWithDefault {
    #[envi(env = "PROD,required", default = "true")]
    pub is_prod: bool,
}

#[derive(Debug, Default, Envi)]
struct UnsupportedOptionConfig {
    #[envi(env = "PORT,optional")]
    pub port: u16,
}

#[derive(Debug, Default, Envi)]
struct PointerConfig {
    #[envi(env = "MAX_RETRIES")]
    pub max_retries: Option<u32>,

    #[envi(env = "LABEL")]
    pub label: Box<String>,

    #[envi(env = "LIMIT")]
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Envi)]
struct DefaultOnlyConfig {
    #[envi(default = "fallback")]
    pub unkeyed: String,

    pub untagged: String,
}

#[derive(Debug, Default, PartialEq)]
struct Opaque(u8);

#[derive(Debug, Default, Envi)]
struct OpaqueConfig {
    #[envi(env = "OPAQUE")]
    pub opaque: Opaque,

    #[envi(env = "AFTER_OPAQUE")]
    pub after: u16,
}

#[derive(Debug, Default, Envi)]
#[envi(prefix = "APP_")]
struct PrefixedConfig {
    #[envi(env = "PORT")]
    pub port: u16,

    #[envi(default = "local")]
    pub zone: String,
}

#[test]
#[serial]
fn test_boolean() {
    env::set_var("ISVALID", "TRUE");
    env::set_var("ISPROD", "FALSE");

    let config = BooleanConfig::from_env().unwrap();
    assert!(config.is_valid);
    assert!(!config.is_prod);

    env::remove_var("ISVALID");
    env::remove_var("ISPROD");
}

#[test]
#[serial]
fn test_scalars() {
    env::set_var("PORT", "8080");
    env::set_var("VERSION", "0x0A");
    env::set_var("RATE", "0.5");
    env::set_var("NAME", "ENVI");
    env::set_var("TIMEOUT", "1m30s");

    let config = ScalarConfig::from_env().unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.version, 10);
    assert_eq!(config.rate, 0.5);
    assert_eq!(config.name, "ENVI");
    assert_eq!(config.timeout, Duration::from_secs(90));

    env::remove_var("PORT");
    env::remove_var("VERSION");
    env::remove_var("RATE");
    env::remove_var("NAME");
    env::remove_var("TIMEOUT");
}

#[test]
#[serial]
fn test_collections() {
    env::set_var("NUMBERS", "1,2,3,4,5");
    env::set_var("HOSTS", "a:b:c");
    env::set_var("COUNTRIES", "Chile:CL,Venezuela:VEN,Colombia:CO");
    env::set_var("SECTOR", "north:1,south:2");

    let config = CollectionConfig::from_env().unwrap();
    assert_eq!(config.numbers, vec![1, 2, 3, 4, 5]);
    assert_eq!(config.hosts, vec!["a", "b", "c"]);
    assert_eq!(
        config.countries,
        HashMap::from([
            ("Chile".to_string(), "CL".to_string()),
            ("Venezuela".to_string(), "VEN".to_string()),
            ("Colombia".to_string(), "CO".to_string()),
        ])
    );
    assert_eq!(config.sector.get("south"), Some(&2));

    env::remove_var("NUMBERS");
    env::remove_var("HOSTS");
    env::remove_var("COUNTRIES");
    env::remove_var("SECTOR");
}

#[test]
#[serial]
fn test_invalid_map_entry() {
    env::set_var("COUNTRIES", "a-b");

    let err = CollectionConfig::from_env().unwrap_err();
    assert_eq!(err.key_name, "countries");
    assert_eq!(err.value, "a-b");
    assert!(matches!(err.cause(), Cause::InvalidMapEntry { entry } if entry == "a-b"));

    env::remove_var("COUNTRIES");
}

#[test]
#[serial]
fn test_required_missing() {
    env::remove_var("PROD");

    let err = AppConfig::from_env().unwrap_err();
    assert_eq!(err.key_name, "is_prod");
    assert_eq!(err.field_type, "bool");
    assert!(matches!(err.cause(), Cause::RequiredMissing { key } if key == "PROD"));
}

#[test]
#[serial]
fn test_required_ignores_default() {
    env::remove_var("PROD");

    let err = RequiredWithDefault::from_env().unwrap_err();
    assert!(matches!(err.cause(), Cause::RequiredMissing { .. }));

    env::set_var("PROD", "false");
    let config = RequiredWithDefault::from_env().unwrap();
    assert!(!config.is_prod);

    env::remove_var("PROD");
}

#[test]
#[serial]
fn test_default_fallback() {
    env::set_var("PROD", "1");
    env::remove_var("PORTS");

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.ports, vec![3000]);
    assert!(config.is_prod);

    env::remove_var("PROD");
}

#[test]
#[serial]
fn test_unsupported_option() {
    env::set_var("PORT", "80");

    let err = UnsupportedOptionConfig::from_env().unwrap_err();
    assert!(matches!(err.cause(), Cause::UnsupportedOption { option } if option == "optional"));
    assert_eq!(err.value, "80");

    env::remove_var("PORT");
}

#[test]
#[serial]
fn test_conversion_error_stops_bind() {
    env::set_var("PORT", "8080");
    env::set_var("VERSION", "256");
    env::set_var("NAME", "kept-out");

    let mut config = ScalarConfig::default();
    let err = envi::bind(&mut config).unwrap_err();
    assert_eq!(err.key_name, "version");
    assert_eq!(err.field_type, "u8");
    assert!(matches!(err.cause(), Cause::Conversion { .. }));

    // Earlier fields keep their values; later ones are not processed.
    assert_eq!(config.port, 8080);
    assert_eq!(config.name, "");

    env::remove_var("PORT");
    env::remove_var("VERSION");
    env::remove_var("NAME");
}

#[test]
#[serial]
fn test_unset_fields_untouched() {
    for key in ["PORT", "VERSION", "RATE", "NAME", "TIMEOUT"] {
        env::remove_var(key);
    }

    let mut config = ScalarConfig {
        port: 42,
        name: "preset".to_string(),
        ..ScalarConfig::default()
    };
    envi::bind(&mut config).unwrap();
    assert_eq!(config.port, 42);
    assert_eq!(config.name, "preset");
}

#[test]
#[serial]
fn test_pointers() {
    env::set_var("MAX_RETRIES", "5");
    env::set_var("LABEL", "primary");
    env::remove_var("LIMIT");

    let config = PointerConfig::from_env().unwrap();
    assert_eq!(config.max_retries, Some(5));
    assert_eq!(*config.label, "primary");
    assert_eq!(config.limit, None);

    env::remove_var("MAX_RETRIES");
    env::remove_var("LABEL");
}

#[test]
#[serial]
fn test_fields_without_key_use_default() {
    let config = DefaultOnlyConfig::from_env().unwrap();
    assert_eq!(config.unkeyed, "fallback");
    assert_eq!(config.untagged, "");
}

#[test]
#[serial]
fn test_opaque_field_is_skipped() {
    env::set_var("OPAQUE", "whatever");
    env::set_var("AFTER_OPAQUE", "7");

    let config = OpaqueConfig::from_env().unwrap();
    assert_eq!(config.opaque, Opaque(0));
    assert_eq!(config.after, 7);

    env::remove_var("OPAQUE");
    env::remove_var("AFTER_OPAQUE");
}

#[test]
#[serial]
fn test_prefix() {
    env::set_var("APP_PORT", "9000");
    env::set_var("PORT", "1");

    let config = PrefixedConfig::from_env().unwrap();
    assert_eq!(config.port, 9000);
    assert_eq!(config.zone, "local");

    env::remove_var("APP_PORT");
    env::remove_var("PORT");
}

#[test]
#[serial]
fn test_override_by_name() {
    env::set_var("PROD", "true");
    env::set_var("INTENT", "1");
    env::set_var("HOSTS", "a:b");

    let mut config = AppConfig::default();
    let mut binding = envi::bind(&mut config).unwrap();
    let before = binding.record().clone();

    binding.set_field_by_name("intent", "33").unwrap();
    assert_eq!(binding.intent, 33);
    assert_eq!(
        AppConfig {
            intent: before.intent,
            ..binding.record().clone()
        },
        before
    );

    let err = binding.set_field_by_name("Intent", "1").unwrap_err();
    assert!(matches!(err.cause(), Cause::FieldNotFound { name } if name == "Intent"));

    let err = binding.set_field_by_name("intent", "").unwrap_err();
    assert!(matches!(err.cause(), Cause::EmptyValue));
    assert_eq!(config.intent, 33);

    env::remove_var("PROD");
    env::remove_var("INTENT");
    env::remove_var("HOSTS");
}

#[test]
#[serial]
fn test_bind_is_idempotent() {
    env::set_var("PROD", "true");
    env::set_var("PORTS", "80,443");
    env::set_var("SECTOR", "a:1,b:2");

    let mut first = AppConfig::default();
    envi::bind(&mut first).unwrap();
    let mut second = AppConfig::default();
    envi::bind(&mut second).unwrap();
    assert_eq!(first, second);

    envi::bind(&mut first).unwrap();
    assert_eq!(first, second);

    env::remove_var("PROD");
    env::remove_var("PORTS");
    env::remove_var("SECTOR");
}

#[test]
#[serial]
fn test_file_based_secret() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Debug, Default, Envi)]
    struct SecretConfig {
        #[envi(env = "SECRET_KEY,required", from_file)]
        pub secret_key: String,
    }

    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "super_secret_key").unwrap();

    env::remove_var("SECRET_KEY");
    env::set_var("SECRET_KEY_FILE", temp_file.path());

    let config = SecretConfig::from_env().unwrap();
    assert_eq!(config.secret_key, "super_secret_key");

    env::set_var("SECRET_KEY_FILE", "/nonexistent/file/path");
    let err = SecretConfig::from_env().unwrap_err();
    assert!(matches!(err.cause(), Cause::FileRead { .. }));

    env::remove_var("SECRET_KEY_FILE");
}

#[test]
#[serial]
fn test_signed_and_unsigned_durations() {
    env::set_var("CLOCK_SKEW", "-1m30s");
    env::set_var("CLOCK_TIMEOUT", "1s");
    env::set_var("CLOCK_RATE", "0x1p-2");

    let config = ClockConfig::from_env().unwrap();
    assert_eq!(config.skew, SignedDuration::from_nanos(-90_000_000_000));
    assert_eq!(config.timeout, Duration::from_secs(1));
    assert_eq!(config.rate, 0.25);

    env::set_var("CLOCK_TIMEOUT", "-1s");
    let err = ClockConfig::from_env().unwrap_err();
    assert_eq!(err.key_name, "timeout");
    assert!(matches!(
        err.cause(),
        Cause::Conversion {
            source: LiteralError::Negative,
            ..
        }
    ));

    env::remove_var("CLOCK_SKEW");
    env::remove_var("CLOCK_TIMEOUT");
    env::remove_var("CLOCK_RATE");
}

#[test]
#[serial]
fn test_digit_separators() {
    env::set_var("PORT", "1_000");
    env::set_var("RATE", "1_000.5");

    let config = ScalarConfig::from_env().unwrap();
    assert_eq!(config.port, 1000);
    assert_eq!(config.rate, 1000.5);

    env::remove_var("PORT");
    env::remove_var("RATE");
}
