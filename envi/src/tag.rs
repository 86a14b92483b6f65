//! Parsing of the `env` annotation

/// Key and options parsed from an `env` annotation such as `"PORT,required"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagIntent<'a> {
    /// Variable name; empty when the field reads no variable
    pub key: &'a str,
    /// Options after the key, in declaration order
    pub options: Vec<&'a str>,
}

/// Split `raw` on `,`: the first segment is the key, the rest are options.
///
/// Empty segments are kept, so `"KEY,,required"` has an empty option between the
/// key and `required`.
pub fn parse_key_and_options(raw: &str) -> TagIntent<'_> {
    let mut segments = raw.split(',');
    // `split` always yields at least one segment
    let key = segments.next().unwrap_or_default();
    TagIntent {
        key,
        options: segments.collect(),
    }
}
