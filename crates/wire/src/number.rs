//! Number text rules
//!
//! The provider carries every number as decimal text. Encoding uses the
//! shortest digits that round-trip and never an exponent. Decoding parses
//! the text as a float first and then picks the narrowest lossless kind:
//! `Int` if the value is integral and fits `i64`, else `Uint` if it fits
//! `u64`, else `Float`.
//!
//! Going through `f64` means integers beyond 2^53 can lose precision on the
//! way back. Changing that would change what existing readers see, so the
//! float-first rule is kept as is.
//!
//! Decimal text too large for `f64` is rejected rather than read as an
//! infinity. Only the explicit `Inf`/`Infinity` spellings produce one.

use dynadoc_core::{CodecError, Result, Value};

/// 2^63, the first float that no longer fits `i64`
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// 2^64, the first float that no longer fits `u64`
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Format a signed integer
pub fn format_int(i: i64) -> String {
    i.to_string()
}

/// Format an unsigned integer
pub fn format_uint(u: u64) -> String {
    u.to_string()
}

/// Format a float with the shortest round-tripping digits and no exponent
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f == f64::INFINITY {
        "+Inf".to_string()
    } else if f == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        // Display for f64 is shortest round-trip and never uses an exponent
        f.to_string()
    }
}

/// Parse number text into the narrowest lossless numeric node
pub fn parse_number(text: &str) -> Result<Value> {
    let f: f64 = text
        .parse()
        .map_err(|_| CodecError::InvalidNumber(text.to_string()))?;
    // Out-of-range decimals overflow to infinity; only explicit spellings may
    if f.is_infinite() && !is_infinity_text(text) {
        return Err(CodecError::InvalidNumber(text.to_string()));
    }
    Ok(narrow(f))
}

fn is_infinity_text(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Pick the narrowest numeric kind that holds `f` exactly
pub fn narrow(f: f64) -> Value {
    if f.fract() == 0.0 {
        if (-I64_LIMIT..I64_LIMIT).contains(&f) {
            return Value::Int(f as i64);
        }
        if (0.0..U64_LIMIT).contains(&f) {
            return Value::Uint(f as u64);
        }
    }
    Value::Float(f)
}
