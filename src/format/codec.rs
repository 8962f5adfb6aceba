//! Text conversion of parameter values
//!
//! Decoding never fails for scalar types: numbers are read from their leading
//! numeric prefix (garbage reads as zero), and unparsable colours fall back to
//! black. All number handling is locale-independent.

use crate::layers::{ParamType, ParamValue, Rgb};

/// First character that marks a boolean as true.
pub const TRUTHY_MARKER: char = 't';

/// Fallback for colour strings that cannot be parsed.
pub const FALLBACK_COLOR: Rgb = Rgb::BLACK;

/// Decode a scalar parameter.
///
/// Returns `None` only for [`ParamType::StringList`], whose values are
/// accumulated line by line by the reader and never decoded here.
pub fn decode(text: &str, param_type: ParamType) -> Option<ParamValue> {
    let value = match param_type {
        ParamType::Double => ParamValue::Double(parse_f64_lenient(text)),
        ParamType::Int => ParamValue::Int(parse_i32_lenient(text)),
        ParamType::Enumeration => ParamValue::Enumeration(parse_i32_lenient(text)),
        ParamType::String => ParamValue::String(text.to_string()),
        ParamType::Boolean => ParamValue::Boolean(decode_bool(text)),
        ParamType::Color => ParamValue::Color(decode_color(text)),
        ParamType::StringList => {
            tracing::error!(text, "string list value routed to the scalar decoder");
            return None;
        }
    };
    Some(value)
}

/// Encode a value as the text after `name=`, one entry per line to write.
pub fn encode(value: &ParamValue) -> Vec<String> {
    match value {
        ParamValue::StringList(items) => items.iter().map(|s| encode_text(s)).collect(),
        other => vec![encode_scalar(other)],
    }
}

fn encode_scalar(value: &ParamValue) -> String {
    match value {
        ParamValue::Double(v) => encode_f64(*v),
        ParamValue::Int(v) | ParamValue::Enumeration(v) => v.to_string(),
        ParamValue::String(s) => encode_text(s),
        ParamValue::Boolean(b) => encode_bool(*b).to_string(),
        ParamValue::Color(c) => c.to_string(),
        ParamValue::StringList(items) => items.join(" "),
    }
}

/// True iff the first character is the truthy marker.
pub fn decode_bool(text: &str) -> bool {
    text.chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&TRUTHY_MARKER))
}

pub fn encode_bool(value: bool) -> &'static str {
    if value {
        "t"
    } else {
        "f"
    }
}

/// Shortest decimal that reads back to the same `f64`.
pub fn encode_f64(value: f64) -> String {
    format!("{}", value)
}

/// Parse a colour, substituting [`FALLBACK_COLOR`] when the text is not one.
pub fn decode_color(text: &str) -> Rgb {
    parse_color(text).unwrap_or_else(|| {
        tracing::debug!(text, "unparsable colour, using fallback");
        FALLBACK_COLOR
    })
}

/// Parse `#rgb`, `#rrggbb`, `#rrrrggggbbbb` or a named colour.
pub fn parse_color(text: &str) -> Option<Rgb> {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex_color(hex);
    }
    named_color(text)
}

fn parse_hex_color(hex: &str) -> Option<Rgb> {
    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let width = match hex.len() {
        3 => 1,
        6 => 2,
        9 => 3,
        12 => 4,
        _ => return None,
    };
    let channel = |index: usize| -> Option<u8> {
        let digits = &hex[index * width..(index + 1) * width];
        let raw = u32::from_str_radix(digits, 16).ok()?;
        let max = (1u32 << (4 * width)) - 1;
        Some(((raw * 255 + max / 2) / max) as u8)
    };
    Some(Rgb::new(channel(0)?, channel(1)?, channel(2)?))
}

fn named_color(name: &str) -> Option<Rgb> {
    const NAMES: &[(&str, Rgb)] = &[
        ("black", Rgb::new(0, 0, 0)),
        ("white", Rgb::new(255, 255, 255)),
        ("red", Rgb::new(255, 0, 0)),
        ("green", Rgb::new(0, 255, 0)),
        ("blue", Rgb::new(0, 0, 255)),
        ("yellow", Rgb::new(255, 255, 0)),
        ("cyan", Rgb::new(0, 255, 255)),
        ("magenta", Rgb::new(255, 0, 255)),
        ("orange", Rgb::new(255, 165, 0)),
        ("purple", Rgb::new(160, 32, 240)),
        ("brown", Rgb::new(165, 42, 42)),
        ("gray", Rgb::new(190, 190, 190)),
        ("grey", Rgb::new(190, 190, 190)),
        ("darkblue", Rgb::new(0, 0, 139)),
        ("darkgreen", Rgb::new(0, 100, 0)),
        ("darkred", Rgb::new(139, 0, 0)),
    ];
    NAMES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, rgb)| *rgb)
}

/// Integer from the leading numeric prefix, like C's `atoi`.
pub fn parse_i32_lenient(text: &str) -> i32 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return 0;
    }
    match text[..end].parse::<i64>() {
        Ok(v) => v.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        // Only overflow of i64 gets here.
        Err(_) if text.starts_with('-') => i32::MIN,
        Err(_) => i32::MAX,
    }
}

/// Float from the leading numeric prefix, like C's `strtod` in the C locale.
pub fn parse_f64_lenient(text: &str) -> f64 {
    let text = text.trim();
    if let Ok(v) = text.parse::<f64>() {
        return v;
    }

    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mantissa_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if !text[mantissa_start..end].bytes().any(|b| b.is_ascii_digit()) {
        return 0.0;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    text[..end].parse::<f64>().unwrap_or(0.0)
}

/// Replace line breaks so a value cannot split its line.
pub fn encode_text(text: &str) -> String {
    if text.contains(['\n', '\r']) {
        tracing::warn!(text, "line break in parameter value replaced with space");
        text.replace(['\n', '\r'], " ")
    } else {
        text.to_string()
    }
}
