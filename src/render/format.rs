//! Value, timestamp and location formatting.
//!
//! Every function here is total: unformattable input degrades to a
//! fallback string instead of failing the render.

use crate::models::display::{CurrencyPosition, LocationFormat, TimestampFormat, ValueFormat};
use chrono::{DateTime, Utc};
use std::fmt;

/// A raw event value as it arrives from an event or a sample.
#[derive(Debug, Clone, PartialEq)]
pub enum EventValue {
    Number(f64),
    Text(String),
}

impl From<f64> for EventValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for EventValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for EventValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for EventValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl EventValue {
    /// The numeric reading of this value, if any. Text may carry grouping commas.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        }
    }
}

impl fmt::Display for EventValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s.trim()),
        }
    }
}

/// Currency code, display symbol, fraction digits.
const CURRENCIES: &[(&str, &str, usize)] = &[
    ("USD", "$", 2),
    ("EUR", "€", 2),
    ("GBP", "£", 2),
    ("JPY", "¥", 0),
    ("CAD", "CA$", 2),
    ("AUD", "A$", 2),
    ("NZD", "NZ$", 2),
    ("CNY", "CN¥", 2),
    ("INR", "₹", 2),
    ("KRW", "₩", 0),
    ("BRL", "R$", 2),
    ("MXN", "MX$", 2),
    ("ILS", "₪", 2),
    ("VND", "₫", 0),
    ("PHP", "₱", 2),
    ("TWD", "NT$", 2),
    ("HKD", "HK$", 2),
];

/// Fraction digits shown in `number` mode, trailing zeros dropped.
const NUMBER_MAX_FRACTION_DIGITS: usize = 3;

struct Currency {
    symbol: String,
    decimals: usize,
}

/// Resolve an ISO 4217 code. Unknown but well-formed codes use the code itself.
fn lookup_currency(code: &str) -> Option<Currency> {
    let code = code.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let code = code.to_ascii_uppercase();
    let currency = CURRENCIES
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, symbol, decimals)| Currency {
            symbol: symbol.to_string(),
            decimals: *decimals,
        })
        .unwrap_or(Currency {
            symbol: code,
            decimals: 2,
        });
    Some(currency)
}

/// `1234567` -> `1,234,567`.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// en-US digits of `|value|` with grouping. Returns `(is_negative, text)`.
fn format_grouped(value: f64, decimals: usize, trim_zeros: bool) -> (bool, String) {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (fixed.as_str(), ""),
    };
    let frac_part = if trim_zeros {
        frac_part.trim_end_matches('0')
    } else {
        frac_part
    };

    let mut out = group_thousands(int_part);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }

    // -0.001 rounds to "0.00"; no sign on a zero.
    let negative = value < 0.0 && fixed.bytes().any(|b| (b'1'..=b'9').contains(&b));
    (negative, out)
}

fn fallback_value(value: &EventValue, currency: &str) -> String {
    let text = match value {
        EventValue::Number(n) => format!("{} {:.2}", currency.trim(), n),
        EventValue::Text(s) => format!("{} {}", currency.trim(), s.trim()),
    };
    text.trim().to_string()
}

/// Format an event value for display.
///
/// - `Currency`: en-US grouping with the currency's symbol placed per
///   `position`. Letter symbols (`CHF`) are separated by a space.
/// - `Number`: en-US grouping, up to three fraction digits.
/// - `Text`: the value as-is.
///
/// An invalid currency code, a non-finite number or non-numeric text in a
/// numeric mode falls back to `"{currency} {value:.2}"`.
pub fn format_display_value(
    value: &EventValue,
    format: ValueFormat,
    currency: &str,
    position: CurrencyPosition,
) -> String {
    if format == ValueFormat::Text {
        return value.to_string();
    }

    let Some(number) = value.as_number().filter(|n| n.is_finite()) else {
        return fallback_value(value, currency);
    };

    match format {
        ValueFormat::Number => {
            let (negative, digits) = format_grouped(number, NUMBER_MAX_FRACTION_DIGITS, true);
            if negative {
                format!("-{}", digits)
            } else {
                digits
            }
        }
        _ => {
            let Some(info) = lookup_currency(currency) else {
                return fallback_value(value, currency);
            };
            let (negative, digits) = format_grouped(number, info.decimals, false);
            let sign = if negative { "-" } else { "" };
            let gap = if info.symbol.chars().all(|c| c.is_ascii_alphabetic()) {
                " "
            } else {
                ""
            };
            match position {
                CurrencyPosition::Before => format!("{}{}{}{}", sign, info.symbol, gap, digits),
                CurrencyPosition::After => format!("{}{}{}{}", sign, digits, gap, info.symbol),
            }
        }
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

/// "just now", "5 minutes ago", "1 hour ago", "3 days ago".
///
/// Future timestamps (clock skew) read as "just now".
pub fn format_relative_time(occurred_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - occurred_at).num_seconds();
    if secs < 60 {
        return "just now".to_string();
    }
    let minutes = secs / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }
    plural(hours / 24, "day")
}

/// `Oct 18, 2:30 PM` (UTC).
pub fn format_absolute_time(occurred_at: DateTime<Utc>) -> String {
    occurred_at.format("%b %-d, %-I:%M %p").to_string()
}

/// Format an event time, with `prefix` prepended when non-empty.
pub fn format_timestamp(
    occurred_at: DateTime<Utc>,
    now: DateTime<Utc>,
    format: TimestampFormat,
    prefix: &str,
) -> String {
    let text = match format {
        TimestampFormat::Relative => format_relative_time(occurred_at, now),
        TimestampFormat::Absolute => format_absolute_time(occurred_at),
        TimestampFormat::Both => format!(
            "{} ({})",
            format_relative_time(occurred_at, now),
            format_absolute_time(occurred_at)
        ),
    };

    let prefix = prefix.trim();
    if prefix.is_empty() {
        text
    } else {
        format!("{} {}", prefix, text)
    }
}

/// Shown in flag mode when the country cannot be mapped to a flag.
pub const PLACEHOLDER_FLAG: &str = "🌍";

/// Common country names accepted in place of an ISO code.
const COUNTRY_CODES: &[(&str, &str)] = &[
    ("united states", "US"),
    ("usa", "US"),
    ("united kingdom", "GB"),
    ("uk", "GB"),
    ("canada", "CA"),
    ("australia", "AU"),
    ("germany", "DE"),
    ("france", "FR"),
    ("spain", "ES"),
    ("italy", "IT"),
    ("netherlands", "NL"),
    ("japan", "JP"),
    ("brazil", "BR"),
    ("india", "IN"),
    ("mexico", "MX"),
];

/// Regional-indicator flag for an ISO 3166 alpha-2 code or a known country name.
pub fn flag_emoji(country: &str) -> Option<String> {
    let country = country.trim();
    let code = if country.len() == 2 && country.chars().all(|c| c.is_ascii_alphabetic()) {
        country.to_ascii_uppercase()
    } else {
        let lower = country.to_lowercase();
        COUNTRY_CODES
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, code)| code.to_string())?
    };

    code.chars()
        .map(|c| char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)))
        .collect()
}

/// Format a location; empty parts are skipped.
pub fn format_location(city: &str, country: &str, format: LocationFormat) -> String {
    let city = city.trim();
    let country = country.trim();
    match format {
        LocationFormat::City => city.to_string(),
        LocationFormat::Country => country.to_string(),
        LocationFormat::CityCountry => [city, country]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", "),
        LocationFormat::FlagEmoji => {
            flag_emoji(country).unwrap_or_else(|| PLACEHOLDER_FLAG.to_string())
        }
    }
}
