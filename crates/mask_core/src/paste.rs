//! Clipboard sanitizing.
//!
//! Pasted text never lands in the field verbatim. It is stripped of the
//! mask's own decoration and re-derived into a raw value, or dropped.

use crate::config::MaskConfig;
use crate::number::{is_numeric, strip_leading_zeros, truncate_decimal_places};
use crate::text::remove_all;

/// Result of handing clipboard text to a mask.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PasteOutcome {
    /// The paste was turned into a new value; the field now shows
    /// `display_text`.
    Accepted {
        display_text: String,
        raw_value: String,
    },
    /// Nothing numeric survived sanitizing. The field is unchanged.
    Rejected,
}

impl PasteOutcome {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, PasteOutcome::Accepted { .. })
    }
}

/// Derive a raw value from clipboard text, or `None` if it is not a number.
///
/// Every occurrence of the prefix, then the suffix, then the thousands
/// separator is removed. Surrounding whitespace is ignored. The fraction is
/// truncated (never rounded) to the configured decimal places.
///
/// ```
/// use mask_core::{MaskConfig, sanitize_paste};
///
/// let config = MaskConfig::default();
/// assert_eq!(sanitize_paste("$1,234.50", &config).as_deref(), Some("1234.50"));
/// assert_eq!(sanitize_paste("12.3459", &config).as_deref(), Some("12.34"));
/// assert_eq!(sanitize_paste("twelve", &config), None);
/// ```
pub fn sanitize_paste(clipboard: &str, config: &MaskConfig) -> Option<String> {
    let mut buf = [0u8; 4];
    let thousands: &str = config.thousands_separator().encode_utf8(&mut buf);

    let without_prefix = remove_all(clipboard.trim(), config.prefix());
    let without_suffix = remove_all(&without_prefix, config.suffix());
    let without_groups = remove_all(&without_suffix, thousands);
    let candidate = without_groups.trim();

    if !is_numeric(candidate, config) {
        log::debug!(target: "mask.paste", "dropping non-numeric paste {clipboard:?}");
        return None;
    }

    let raw = truncate_decimal_places(strip_leading_zeros(candidate), config);
    if raw.is_empty() {
        // Only a bare fraction was pasted and there are no decimal places.
        return Some("0".to_string());
    }
    Some(raw.to_string())
}
