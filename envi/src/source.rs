//! Where environment values are looked up

use std::collections::{BTreeMap, HashMap};
use std::env;

/// A key/value lookup that distinguishes unset keys from empty values.
pub trait Source {
    /// Value of `key`, or `None` when it is unset. A set but empty key is
    /// `Some("")`.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// The process environment.
///
/// Keys that cannot name a variable (empty, or containing `=` or NUL) are reported
/// as unset. Values that are not valid UTF-8 are converted lossily.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Source for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        if key.is_empty() || key.contains(['=', '\0']) {
            return None;
        }
        env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}

impl Source for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Source for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<S: Source + ?Sized> Source for &S {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}
