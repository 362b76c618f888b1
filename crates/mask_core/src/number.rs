//! Pure formatting and normalization of raw numeric strings.
//!
//! A *raw* string is the canonical, undecorated form of a field's value:
//! ASCII digits with at most one decimal separator, no thousands separators,
//! no prefix or suffix. Everything here is side-effect free; [`format`] is the
//! only place a display string is ever produced.

use crate::config::MaskConfig;

const ZERO: &str = "0";

/// Interpret `text` as a number under `config`'s decimal separator.
///
/// Returns `None` unless `text` is a raw numeric string: at least one ASCII
/// digit, at most one decimal separator, nothing else, and a finite value.
///
/// ```
/// use mask_core::{MaskConfig, to_number};
///
/// let config = MaskConfig::default();
/// assert_eq!(to_number("12.5", &config), Some(12.5));
/// assert_eq!(to_number(".5", &config), Some(0.5));
/// assert_eq!(to_number("1,000", &config), None);
/// assert_eq!(to_number(".", &config), None);
/// ```
pub fn to_number(text: &str, config: &MaskConfig) -> Option<f64> {
    let sep = config.decimal_separator();
    let mut digits = 0usize;
    let mut seen_sep = false;
    for ch in text.chars() {
        if ch.is_ascii_digit() {
            digits += 1;
        } else if ch == sep && !seen_sep {
            seen_sep = true;
        } else {
            return None;
        }
    }
    if digits == 0 {
        return None;
    }

    let parsed = if sep == '.' {
        text.parse::<f64>()
    } else {
        text.replace(sep, ".").parse::<f64>()
    };
    parsed.ok().filter(|v| v.is_finite())
}

/// Returns `true` if `text` is a raw numeric string; see [`to_number`].
#[inline]
pub fn is_numeric(text: &str, config: &MaskConfig) -> bool {
    to_number(text, config).is_some()
}

/// Render a programmatic number as a raw string.
///
/// Negative and non-finite values have no raw form and yield `None`.
pub fn raw_from_number(value: f64, config: &MaskConfig) -> Option<String> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    // `-0.0` displays with a sign.
    if value == 0.0 {
        return Some(ZERO.to_string());
    }
    let rendered = value.to_string();
    let sep = config.decimal_separator();
    if sep == '.' {
        Some(rendered)
    } else {
        Some(rendered.replace('.', &sep.to_string()))
    }
}

/// Drop leading zeros while they are followed by another digit.
///
/// An all-zero integer part keeps a single zero.
///
/// ```
/// use mask_core::strip_leading_zeros;
///
/// assert_eq!(strip_leading_zeros("00450"), "450");
/// assert_eq!(strip_leading_zeros("00"), "0");
/// assert_eq!(strip_leading_zeros("007.5"), "7.5");
/// assert_eq!(strip_leading_zeros("00.5"), "0.5");
/// assert_eq!(strip_leading_zeros(""), "");
/// ```
pub fn strip_leading_zeros(text: &str) -> &str {
    let zeros = text.bytes().take_while(|b| *b == b'0').count();
    if zeros == 0 {
        return text;
    }
    let followed_by_digit = text.as_bytes().get(zeros).is_some_and(u8::is_ascii_digit);
    if followed_by_digit {
        &text[zeros..]
    } else {
        &text[zeros - 1..]
    }
}

/// Cut the fraction of `text` down to `config.decimal_places()` characters.
///
/// Never rounds and never pads. With zero decimal places the separator goes
/// too. Text without a separator is returned as-is.
pub fn truncate_decimal_places<'a>(text: &'a str, config: &MaskConfig) -> &'a str {
    let sep = config.decimal_separator();
    let Some((int, frac)) = text.split_once(sep) else {
        return text;
    };
    let places = config.decimal_places();
    if places == 0 {
        return int;
    }
    match frac.char_indices().nth(places) {
        Some((cut, _)) => &text[..int.len() + sep.len_utf8() + cut],
        None => text,
    }
}

/// Bring the fraction of `text` to exactly `config.decimal_places()` digits.
///
/// Longer fractions are truncated, shorter ones right-padded with `'0'`, and
/// a missing fraction is added. With zero decimal places only the integer
/// part remains.
///
/// ```
/// use mask_core::{MaskConfig, normalize_decimal_places};
///
/// let config = MaskConfig::default();
/// assert_eq!(normalize_decimal_places("12.3459", &config), "12.34");
/// assert_eq!(normalize_decimal_places("12.3", &config), "12.30");
/// assert_eq!(normalize_decimal_places("12", &config), "12.00");
/// ```
pub fn normalize_decimal_places(text: &str, config: &MaskConfig) -> String {
    let sep = config.decimal_separator();
    let places = config.decimal_places();
    let (int, frac) = text.split_once(sep).unwrap_or((text, ""));
    if places == 0 {
        return int.to_string();
    }

    let mut out = String::with_capacity(int.len() + sep.len_utf8() + places);
    out.push_str(int);
    out.push(sep);
    let mut kept = 0usize;
    for ch in frac.chars().take(places) {
        out.push(ch);
        kept += 1;
    }
    out.extend(std::iter::repeat_n('0', places - kept));
    out
}

/// Group an integer part in threes from the right.
///
/// ```
/// use mask_core::insert_thousands_separators;
///
/// assert_eq!(insert_thousands_separators("1234567", ','), "1,234,567");
/// assert_eq!(insert_thousands_separators("123", ','), "123");
/// assert_eq!(insert_thousands_separators("", ','), "");
/// ```
pub fn insert_thousands_separators(integer: &str, sep: char) -> String {
    let len = integer.chars().count();
    let mut out = String::with_capacity(integer.len() + (len / 3) * sep.len_utf8());
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

/// Produce the display string for a raw value.
///
/// Absent values render as the empty string. Text that is not numeric is
/// rendered as if it were `"0"` rather than failing.
///
/// ```
/// use mask_core::{MaskConfig, format};
///
/// let config = MaskConfig::default();
/// assert_eq!(format(Some("1234567"), &config), "$1,234,567.00");
/// assert_eq!(format(Some("abc"), &config), "$0.00");
/// assert_eq!(format(None, &config), "");
/// ```
pub fn format(raw: Option<&str>, config: &MaskConfig) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    if !is_numeric(raw, config) {
        log::trace!(target: "mask.format", "non-numeric raw value {raw:?}, formatting as zero");
        return format(Some(ZERO), config);
    }

    let sep = config.decimal_separator();
    let normalized = normalize_decimal_places(raw, config);
    let (int, frac) = match normalized.split_once(sep) {
        Some((int, frac)) => (int, Some(frac)),
        None => (normalized.as_str(), None),
    };
    let int = if int.is_empty() { ZERO } else { int };
    let grouped = insert_thousands_separators(int, config.thousands_separator());

    let mut out = String::with_capacity(
        config.prefix().len() + grouped.len() + normalized.len() + config.suffix().len(),
    );
    out.push_str(config.prefix());
    out.push_str(&grouped);
    if let Some(frac) = frac {
        out.push(sep);
        out.push_str(frac);
    }
    out.push_str(config.suffix());
    out
}
