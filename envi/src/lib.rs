//! Bind environment variables to struct fields
//!
//! `envi` fills the fields of a plain struct from environment variables. Each field
//! declares the variable it reads, an optional default, whether the variable is
//! required, and for sequences the separator to split on. Values are converted by
//! the field's type: strings, integers of every width, floats, booleans, durations,
//! `Option`/`Box`, `Vec` and maps.
//!
//! # Features
//!
//! - **Declarative**: field table generated with `#[derive(Envi)]`
//! - **Typed conversion**: integers accept `0x`, `0o`, `0b` and leading-zero octal
//!   literals and are range checked against the field's width; floats also accept
//!   hexadecimal literals (`0x1p-2`); `_` may separate digits
//! - **Durations**: `std::time::Duration` for non-negative values, [`SignedDuration`]
//!   when `-1m30s` must be accepted
//! - **Collections**: `Vec<T>` split on a configurable separator, maps written as
//!   `key:value,key:value`
//! - **Overrides**: [`bind`] returns a [`Binding`] handle that can replace single
//!   fields by name afterwards
//! - **File-based secrets**: `#[envi(from_file)]` also reads `{KEY}_FILE`
//!
//! # Example
//!
//! ```rust
//! use envi::Envi;
//! use std::collections::HashMap;
//! use std::time::Duration;
//!
//! #[derive(Debug, Default, Envi)]
//! struct Config {
//!     #[envi(env = "PORT", default = "8080")]
//!     pub port: u16,
//!
//!     #[envi(env = "PROD,required")]
//!     pub is_prod: bool,
//!
//!     #[envi(env = "HOSTS", separator = ":")]
//!     pub hosts: Vec<String>,
//!
//!     #[envi(env = "SECTOR")]
//!     pub sector: HashMap<String, i32>,
//!
//!     #[envi(env = "TIMEOUT", default = "1m30s")]
//!     pub timeout: Duration,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("PROD", "true");
//! #     std::env::set_var("HOSTS", "a.local:b.local");
//! #     std::env::set_var("SECTOR", "north:1,south:2");
//! let mut config = Config::default();
//! let mut binding = envi::bind(&mut config)?;
//! assert_eq!(binding.port, 8080);
//! assert_eq!(binding.hosts, vec!["a.local", "b.local"]);
//! assert_eq!(binding.timeout, Duration::from_secs(90));
//!
//! binding.set_field_by_name("port", "2323")?;
//! assert_eq!(config.port, 2323);
//! #     Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## `#[envi(env = "KEY,options")]`
//!
//! The variable name, optionally followed by `,`-separated options. The only option
//! is `required`: the variable itself must be set, a `default` does not count.
//! Fields without `env` read no variable and only take their `default`.
//!
//! ## `#[envi(default = "value")]`
//!
//! The string used when the variable is unset. It goes through the same conversion
//! as a looked-up value.
//!
//! ## `#[envi(separator = ";")]`
//!
//! Separator for `Vec<T>` fields, `,` when omitted. Maps always use `,` between
//! entries and `:` between key and value.
//!
//! ## `#[envi(from_file)]`
//!
//! When `KEY` is unset, read the trimmed contents of the file named by `KEY_FILE`,
//! the layout used by Kubernetes and Docker secrets.
//!
//! ## `#[envi(prefix = "APP_")]` (struct level)
//!
//! Prefix every non-empty key.
//!
//! # Errors
//!
//! Every failure is an [`EnvError`] naming the field, its type and the offending
//! value. Branch on [`EnvError::cause`]:
//!
//! ```rust
//! use envi::{Cause, Envi};
//!
//! #[derive(Debug, Default, Envi)]
//! struct Config {
//!     #[envi(env = "DOCS_DATABASE_URL,required")]
//!     pub database_url: String,
//! }
//!
//! std::env::remove_var("DOCS_DATABASE_URL");
//! let err = Config::from_env().unwrap_err();
//! assert!(matches!(err.cause(), Cause::RequiredMissing { .. }));
//! assert_eq!(err.key_name, "database_url");
//! ```
//!
//! Only mutable references to derived records can be bound; anything else is
//! rejected at compile time:
//!
//! ```rust,compile_fail
//! use envi::Envi;
//!
//! #[derive(Default, Envi)]
//! struct Config {
//!     #[envi(env = "PORT")]
//!     pub port: u16,
//! }
//!
//! let config = Config::default();
//! let _ = envi::bind(config);
//! ```
//!
//! ```rust,compile_fail
//! use envi::Envi;
//!
//! #[derive(Envi)]
//! enum Mode {
//!     Dev,
//!     Prod,
//! }
//! ```

mod bind;
mod convert;
mod error;
mod literal;
mod record;
mod resolve;
mod shape;
mod source;
mod tag;
mod value;

#[doc(hidden)]
#[path = "private.rs"]
pub mod __private;

pub use bind::{bind, bind_with, Binding};
pub use envi_derive::Envi;
pub use error::{Cause, EnvError};
pub use literal::LiteralError;
pub use record::{Envi, FieldDescriptor};
pub use shape::{FloatWidth, IntWidth, Shape};
pub use source::{ProcessEnv, Source};
pub use value::{EnvValue, SignedDuration, Value};
