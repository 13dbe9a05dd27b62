use std::{env, str::FromStr, string::String};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_NUMERIC", "LANG"];

// Languages whose conventional decimal separator is a comma
const DOT_GROUPED_COMMA_DECIMAL: [&str; 12] = [
    "da", "de", "el", "es", "id", "it", "nl", "pt", "ro", "sl", "sr", "tr",
];

const SPACE_GROUPED_COMMA_DECIMAL: [&str; 12] = [
    "bg", "cs", "fi", "fr", "hu", "lt", "nb", "no", "pl", "ru", "sv", "uk",
];

/// Decimal and digit-group separators used to read a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumberFormat {
    pub decimal_separator: char,
    pub group_separator: char,
}

impl NumberFormat {
    /// Locale-independent format: `.` for decimals, `,` for digit groups.
    pub const INVARIANT: NumberFormat = NumberFormat {
        decimal_separator: '.',
        group_separator: ',',
    };

    /// Format for a POSIX locale name such as `de_DE.UTF-8`, looked up by
    /// language code alone in a fixed table of comma-decimal languages. This
    /// approximates the platform's locale data and ignores territory
    /// variants. Unknown languages, `C` and `POSIX` fall back to
    /// [`NumberFormat::INVARIANT`].
    pub fn from_locale_name(name: &str) -> NumberFormat {
        let language = name
            .split(['_', '.', '@', '-'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        if DOT_GROUPED_COMMA_DECIMAL.contains(&language.as_str()) {
            NumberFormat {
                decimal_separator: ',',
                group_separator: '.',
            }
        } else if SPACE_GROUPED_COMMA_DECIMAL.contains(&language.as_str()) {
            NumberFormat {
                decimal_separator: ',',
                group_separator: '\u{a0}',
            }
        } else {
            NumberFormat::INVARIANT
        }
    }

    /// Format of the host locale, read from the usual locale variables in
    /// order of precedence and resolved with
    /// [`from_locale_name`](NumberFormat::from_locale_name). No system locale
    /// database is consulted, so the result can differ from what C library
    /// number formatting would use.
    pub fn from_env() -> NumberFormat {
        LOCALE_VARS
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|value| !value.is_empty())
            .map(|value| NumberFormat::from_locale_name(&value))
            .unwrap_or(NumberFormat::INVARIANT)
    }

    /// Reads a floating point number written in this format.
    ///
    /// Surrounding whitespace, a leading sign and an exponent are accepted.
    /// Group separators may only appear before the decimal separator.
    pub fn parse(&self, text: &str) -> Option<f64> {
        let text = text.trim();

        if text.is_empty() {
            return None;
        }

        let (whole, fraction) = match text.split_once(self.decimal_separator) {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (text, None),
        };

        let mut normalized = String::with_capacity(text.len());

        let (whole, exponent) = if fraction.is_none() {
            split_exponent(whole)
        } else {
            (whole, None)
        };

        normalized.extend(whole.chars().filter(|&ch| ch != self.group_separator));

        if let Some(fraction) = fraction {
            if fraction.contains(self.group_separator)
                || fraction.contains(self.decimal_separator)
            {
                return None;
            }

            normalized.push('.');
            normalized.push_str(fraction);
        }

        if let Some(exponent) = exponent {
            normalized.push_str(exponent);
        }

        if !normalized.chars().any(|ch| ch.is_ascii_digit()) {
            return None;
        }

        f64::from_str(&normalized).ok()
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat::INVARIANT
    }
}

fn split_exponent(text: &str) -> (&str, Option<&str>) {
    match text.find(['e', 'E']) {
        Some(idx) => (&text[..idx], Some(&text[idx..])),
        None => (text, None),
    }
}

pub fn parse_invariant(text: &str) -> Option<f64> {
    NumberFormat::INVARIANT.parse(text)
}
