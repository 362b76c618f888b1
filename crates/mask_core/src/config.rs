//! Mask configuration: the immutable formatting policy of one bound input.
//!
//! [`MaskOptions`] is the loose, deserializable shape (what a TOML file or a
//! host hands over); [`MaskConfig`] is the validated value every other module
//! works with. A `MaskConfig` can only be obtained through validation, so the
//! rest of the crate may rely on its invariants:
//!
//! - the decimal and thousands separators differ,
//! - neither separator is an ASCII digit,
//! - neither separator occurs in the prefix or suffix,
//! - `decimal_places` lies in `0..=MAX_DECIMAL_PLACES`.

use crate::error::{ConfigError, SeparatorRole};
use serde::{Deserialize, Serialize};

const DEFAULT_PREFIX: &str = "$";
const DEFAULT_SUFFIX: &str = "";
const DEFAULT_DECIMAL_SEPARATOR: char = '.';
const DEFAULT_DECIMAL_PLACES: usize = 2;
const DEFAULT_THOUSANDS_SEPARATOR: char = ',';

/// Upper bound on `decimal_places`; an f64 carries about 17 significant digits.
pub const MAX_DECIMAL_PLACES: usize = 20;

/// Unvalidated mask settings.
///
/// Omitted keys fall back to the currency defaults (`$`, no suffix, `.`, two
/// places, `,`). Unknown keys are rejected so typos in config files surface.
///
/// ```
/// use mask_core::{MaskConfig, MaskOptions};
///
/// let config = MaskConfig::new(MaskOptions {
///     prefix: String::new(),
///     suffix: " €".to_string(),
///     decimal_separator: ',',
///     thousands_separator: '.',
///     ..MaskOptions::default()
/// })
/// .unwrap();
/// assert_eq!(config.decimal_separator(), ',');
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaskOptions {
    pub prefix: String,
    pub suffix: String,
    pub decimal_separator: char,
    pub decimal_places: i64,
    pub thousands_separator: char,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            decimal_separator: DEFAULT_DECIMAL_SEPARATOR,
            decimal_places: DEFAULT_DECIMAL_PLACES as i64,
            thousands_separator: DEFAULT_THOUSANDS_SEPARATOR,
        }
    }
}

/// Validated, immutable mask policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskConfig {
    prefix: String,
    suffix: String,
    decimal_separator: char,
    decimal_places: usize,
    thousands_separator: char,
}

impl MaskConfig {
    /// Validate `options` into a config.
    pub fn new(options: MaskOptions) -> Result<Self, ConfigError> {
        let MaskOptions {
            prefix,
            suffix,
            decimal_separator,
            decimal_places,
            thousands_separator,
        } = options;

        if decimal_places < 0 {
            return Err(ConfigError::NegativeDecimalPlaces(decimal_places));
        }
        let places = match usize::try_from(decimal_places) {
            Ok(places) if places <= MAX_DECIMAL_PLACES => places,
            _ => {
                return Err(ConfigError::DecimalPlacesTooLarge {
                    got: decimal_places,
                    max: MAX_DECIMAL_PLACES,
                });
            }
        };
        if decimal_separator == thousands_separator {
            return Err(ConfigError::SeparatorCollision(decimal_separator));
        }

        let separators = [
            (SeparatorRole::Decimal, decimal_separator),
            (SeparatorRole::Thousands, thousands_separator),
        ];
        for (role, ch) in separators {
            if ch.is_ascii_digit() {
                return Err(ConfigError::DigitSeparator { role, ch });
            }
            for (affix, text) in [("prefix", &prefix), ("suffix", &suffix)] {
                if text.contains(ch) {
                    return Err(ConfigError::SeparatorInAffix {
                        role,
                        ch,
                        affix,
                        text: text.clone(),
                    });
                }
            }
        }

        Ok(Self {
            prefix,
            suffix,
            decimal_separator,
            decimal_places: places,
            thousands_separator,
        })
    }

    /// Parse and validate a TOML document holding [`MaskOptions`] keys.
    ///
    /// ```
    /// use mask_core::MaskConfig;
    ///
    /// let config = MaskConfig::from_toml_str("prefix = \"\"\nsuffix = \" kg\"\ndecimal_places = 3")
    ///     .unwrap();
    /// assert_eq!(config.suffix(), " kg");
    /// assert_eq!(config.decimal_places(), 3);
    /// ```
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let options: MaskOptions = toml::from_str(src)?;
        Self::new(options)
    }

    /// The settings this config was built from, e.g. for re-serializing.
    pub fn options(&self) -> MaskOptions {
        MaskOptions {
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
            decimal_separator: self.decimal_separator,
            decimal_places: i64::try_from(self.decimal_places).unwrap_or(i64::MAX),
            thousands_separator: self.thousands_separator,
        }
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[inline]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    #[inline]
    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    #[inline]
    pub fn decimal_places(&self) -> usize {
        self.decimal_places
    }

    #[inline]
    pub fn thousands_separator(&self) -> char {
        self.thousands_separator
    }

    /// Render `raw` with this config; see [`format`](crate::format).
    pub fn format(&self, raw: Option<&str>) -> String {
        crate::number::format(raw, self)
    }
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            decimal_separator: DEFAULT_DECIMAL_SEPARATOR,
            decimal_places: DEFAULT_DECIMAL_PLACES,
            thousands_separator: DEFAULT_THOUSANDS_SEPARATOR,
        }
    }
}

impl TryFrom<MaskOptions> for MaskConfig {
    type Error = ConfigError;

    fn try_from(options: MaskOptions) -> Result<Self, Self::Error> {
        Self::new(options)
    }
}
