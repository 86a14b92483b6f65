//! Literal parsers for scalar shapes
//!
//! Integers are base-agnostic: a `0x`, `0o` or `0b` prefix selects the radix, a bare
//! leading `0` selects octal, anything else is decimal. `_` may appear between
//! digits or right after a radix prefix, never first, last or doubled. Range checks
//! are done against the declared bit width rather than the 64-bit intermediate.

use crate::shape::FloatWidth;
use std::borrow::Cow;
use std::time::Duration;

/// Why a literal could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LiteralError {
    /// The literal is malformed for the target shape.
    #[error("invalid syntax")]
    Syntax,

    /// The literal is well formed but does not fit the declared width.
    #[error("value out of range")]
    Range,

    /// A duration component has a number but no unit.
    #[error("missing unit in duration")]
    MissingUnit,

    /// A duration component has a unit that is not recognized.
    #[error("unknown unit {0:?} in duration")]
    UnknownUnit(String),

    /// The duration is negative; `std::time::Duration` cannot hold it. Use
    /// [`SignedDuration`](crate::SignedDuration) for fields that accept negative
    /// durations.
    #[error("negative durations are not supported")]
    Negative,

    /// The converted value has a different shape than the field expects.
    #[error("value does not fit the target type")]
    Mismatch,
}

/// Parse a signed integer that must fit in `bits` bits.
pub fn parse_int(s: &str, bits: u32) -> Result<i64, LiteralError> {
    let (negative, body) = match s.as_bytes().first() {
        Some(b'+') => (false, &s[1..]),
        Some(b'-') => (true, &s[1..]),
        _ => (false, s),
    };
    let magnitude = parse_magnitude(body)?;

    // Largest magnitude of a negative value; the positive maximum is one less.
    let limit = 1u64 << (bits - 1);
    if negative {
        if magnitude > limit {
            return Err(LiteralError::Range);
        }
        Ok((-(magnitude as i128)) as i64)
    } else {
        if magnitude >= limit {
            return Err(LiteralError::Range);
        }
        Ok(magnitude as i64)
    }
}

/// Parse an unsigned integer that must fit in `bits` bits. Signs are rejected.
pub fn parse_uint(s: &str, bits: u32) -> Result<u64, LiteralError> {
    let magnitude = parse_magnitude(s)?;
    if bits < u64::BITS && magnitude >> bits != 0 {
        return Err(LiteralError::Range);
    }
    Ok(magnitude)
}

fn parse_magnitude(s: &str) -> Result<u64, LiteralError> {
    let (radix, digits) = split_radix(s);
    let digits = strip_underscores(s, digits)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(LiteralError::Syntax);
    }
    // Digits are validated, so the only remaining failure is overflow.
    u64::from_str_radix(&digits, radix).map_err(|_| LiteralError::Range)
}

fn split_radix(s: &str) -> (u32, &str) {
    let bytes = s.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        match bytes[1] {
            b'x' | b'X' => (16, &s[2..]),
            b'o' | b'O' => (8, &s[2..]),
            b'b' | b'B' => (2, &s[2..]),
            _ => (8, &s[1..]),
        }
    } else {
        (10, s)
    }
}

/// Remove `_` from `part` once the whole `literal` has been checked for misplaced
/// underscores.
fn strip_underscores<'a>(literal: &str, part: &'a str) -> Result<Cow<'a, str>, LiteralError> {
    if !part.contains('_') {
        return Ok(Cow::Borrowed(part));
    }
    if !underscores_ok(literal) {
        return Err(LiteralError::Syntax);
    }
    Ok(Cow::Owned(part.replace('_', "")))
}

/// Every `_` must follow a digit or a radix prefix and be followed by a digit.
fn underscores_ok(s: &str) -> bool {
    #[derive(PartialEq)]
    enum Seen {
        Start,
        Digit,
        Underscore,
        Other,
    }

    let bytes = s.as_bytes();
    let mut seen = Seen::Start;
    let mut rest = bytes;
    let mut hex = false;
    if bytes.len() >= 2
        && bytes[0] == b'0'
        && matches!(bytes[1].to_ascii_lowercase(), b'x' | b'o' | b'b')
    {
        // The prefix counts as a digit.
        seen = Seen::Digit;
        hex = bytes[1].to_ascii_lowercase() == b'x';
        rest = &bytes[2..];
    }

    for &b in rest {
        if b.is_ascii_digit() || (hex && b.is_ascii_hexdigit()) {
            seen = Seen::Digit;
        } else if b == b'_' {
            if seen != Seen::Digit {
                return false;
            }
            seen = Seen::Underscore;
        } else {
            if seen == Seen::Underscore {
                return false;
            }
            seen = Seen::Other;
        }
    }
    seen != Seen::Underscore
}

/// Parse a floating point literal at the given precision.
///
/// Accepts decimal literals, `inf`/`nan`, and hexadecimal literals with a binary
/// exponent (`0x1.8p3`). `_` separates digits as for integers. Finite literals that
/// overflow the precision are rejected instead of silently becoming infinite.
pub fn parse_float(s: &str, width: FloatWidth) -> Result<f64, LiteralError> {
    let (negative, body) = match s.as_bytes().first() {
        Some(b'+') => (false, &s[1..]),
        Some(b'-') => (true, &s[1..]),
        _ => (false, s),
    };
    if body.starts_with(['+', '-']) {
        return Err(LiteralError::Syntax);
    }
    let body = strip_underscores(body, body)?;

    let magnitude = match body.get(..2) {
        Some("0x" | "0X") => {
            let value = parse_hex_float(&body[2..])?;
            match width {
                FloatWidth::F32 => f64::from(value as f32),
                FloatWidth::F64 => value,
            }
        }
        _ => match width {
            FloatWidth::F32 => body.parse::<f32>().map(f64::from),
            FloatWidth::F64 => body.parse::<f64>(),
        }
        .map_err(|_| LiteralError::Syntax)?,
    };

    if magnitude.is_infinite() && !body.to_ascii_lowercase().contains("inf") {
        return Err(LiteralError::Range);
    }
    Ok(if negative { -magnitude } else { magnitude })
}

/// Hexadecimal mantissa with an optional point, followed by a mandatory `p`
/// exponent in decimal.
fn parse_hex_float(s: &str) -> Result<f64, LiteralError> {
    let (mantissa, exponent) = s.split_once(['p', 'P']).ok_or(LiteralError::Syntax)?;
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(LiteralError::Syntax);
    }

    let (exp_negative, exp_digits) = match exponent.as_bytes().first() {
        Some(b'+') => (false, &exponent[1..]),
        Some(b'-') => (true, &exponent[1..]),
        _ => (false, exponent),
    };
    if exp_digits.is_empty() || !exp_digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LiteralError::Syntax);
    }
    // Anything past this saturates to zero or infinity anyway.
    let mut exp = exp_digits.bytes().fold(0i32, |acc, b| {
        acc.saturating_mul(10)
            .saturating_add(i32::from(b - b'0'))
            .min(10_000)
    });
    if exp_negative {
        exp = -exp;
    }

    let mut mantissa: u64 = 0;
    for (index, c) in whole.chars().chain(fraction.chars()).enumerate() {
        let digit = c.to_digit(16).ok_or(LiteralError::Syntax)?;
        if mantissa >> 60 == 0 {
            mantissa = (mantissa << 4) | u64::from(digit);
            if index >= whole.len() {
                exp -= 4;
            }
        } else if index < whole.len() {
            // Digits beyond the mantissa's precision still scale the value.
            exp += 4;
        }
    }

    if mantissa == 0 {
        return Ok(0.0);
    }
    // Split the scale so neither factor overflows before the product does.
    let half = exp / 2;
    Ok(mantissa as f64 * 2f64.powi(half) * 2f64.powi(exp - half))
}

/// Parse a boolean literal.
pub fn parse_bool(s: &str) -> Result<bool, LiteralError> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(LiteralError::Syntax),
    }
}

// Durations are accumulated in nanoseconds and capped at i64::MAX.
const NANOS_LIMIT: u64 = 1 << 63;

/// Parse a duration such as `300ms`, `1h30m` or `1.5s`.
///
/// Negative literals other than zero fail with [`LiteralError::Negative`].
pub fn parse_duration(s: &str) -> Result<Duration, LiteralError> {
    let nanos = parse_signed_duration(s)?;
    u64::try_from(nanos)
        .map(Duration::from_nanos)
        .map_err(|_| LiteralError::Negative)
}

/// Parse a possibly negative duration into whole nanoseconds.
pub fn parse_signed_duration(s: &str) -> Result<i64, LiteralError> {
    let (negative, mut rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err(LiteralError::Syntax);
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        let first = rest.as_bytes()[0];
        if first != b'.' && !first.is_ascii_digit() {
            return Err(LiteralError::Syntax);
        }

        let (whole, after) = leading_int(rest)?;
        let has_whole = after.len() != rest.len();
        rest = after;

        let mut fraction = 0;
        let mut scale = 1.0;
        let mut has_fraction = false;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let (digits, digits_scale, after) = leading_fraction(after_dot);
            has_fraction = after.len() != after_dot.len();
            fraction = digits;
            scale = digits_scale;
            rest = after;
        }
        if !has_whole && !has_fraction {
            return Err(LiteralError::Syntax);
        }

        let unit_end = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_end == 0 {
            return Err(LiteralError::MissingUnit);
        }
        let (unit, after) = rest.split_at(unit_end);
        rest = after;
        let per_unit =
            unit_nanos(unit).ok_or_else(|| LiteralError::UnknownUnit(unit.to_string()))?;

        let mut nanos = whole
            .checked_mul(per_unit)
            .filter(|n| *n <= NANOS_LIMIT)
            .ok_or(LiteralError::Range)?;
        if fraction > 0 {
            nanos += (fraction as f64 * (per_unit as f64 / scale)) as u64;
            if nanos > NANOS_LIMIT {
                return Err(LiteralError::Range);
            }
        }
        total = total
            .checked_add(nanos)
            .filter(|n| *n <= NANOS_LIMIT)
            .ok_or(LiteralError::Range)?;
    }

    if negative {
        // `total` is at most 2^63, the magnitude of `i64::MIN`.
        return Ok((-(total as i128)) as i64);
    }
    i64::try_from(total).map_err(|_| LiteralError::Range)
}

fn leading_int(s: &str) -> Result<(u64, &str), LiteralError> {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    for b in s[..end].bytes() {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
            .filter(|v| *v <= NANOS_LIMIT)
            .ok_or(LiteralError::Range)?;
    }
    Ok((value, &s[end..]))
}

/// Digits after the decimal point. Precision beyond what fits is dropped.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    let mut scale = 1.0;
    let mut overflow = false;
    for b in s[..end].bytes() {
        if overflow {
            continue;
        }
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
            .filter(|v| *v <= NANOS_LIMIT)
        {
            Some(next) => {
                value = next;
                scale *= 10.0;
            }
            None => overflow = true,
        }
    }
    (value, scale, &s[end..])
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(60 * 60 * 1_000_000_000),
        _ => None,
    }
}
