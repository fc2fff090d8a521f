//! Names, initials and PII masking.

use crate::models::display::{AnonymizationStyle, PrivacySettings};
use regex::Regex;
use std::sync::LazyLock;

/// Alias used by the `random` anonymization style.
pub const GENERIC_ALIAS: &str = "Happy Customer";

/// Shown when an event carries no name at all.
pub const UNKNOWN_NAME: &str = "Someone";

/// Avatar text when a name yields no initials.
pub const FALLBACK_INITIALS: &str = "SP";

const EMAIL_MASK: &str = "[email hidden]";
const PHONE_MASK: &str = "[phone hidden]";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid regex")
});

// International (`+44 20 ...`), area code in parentheses, or a 3-3-4+ digit
// grouping. Dates and short numbers do not match.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+\d[\d\s().-]{5,}\d|\(\d{2,4}\)\s?\d[\d\s.-]{4,}\d|\b\d{3}[\s.-]?\d{3}[\s.-]?\d{4,}\b")
        .expect("valid regex")
});

fn initial(word: &str) -> Option<char> {
    word.chars()
        .find(|c| c.is_alphanumeric())
        .and_then(|c| c.to_uppercase().next())
}

/// Anonymize a full name.
///
/// - `FirstInitial`: `John Doe` -> `John D.`
/// - `FirstLastInitial`: `John Doe` -> `J. D.`
/// - `Random`: the fixed [`GENERIC_ALIAS`]
///
/// A single-word name simply has no last part. An empty name gives
/// [`UNKNOWN_NAME`].
pub fn anonymize_name(name: &str, style: AnonymizationStyle) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let Some(first) = words.first() else {
        return UNKNOWN_NAME.to_string();
    };
    let last_initial = words.get(1..).and_then(|rest| rest.last()).and_then(|w| initial(w));

    match style {
        AnonymizationStyle::Random => GENERIC_ALIAS.to_string(),
        AnonymizationStyle::FirstInitial => match last_initial {
            Some(l) => format!("{} {}.", first, l),
            None => first.to_string(),
        },
        AnonymizationStyle::FirstLastInitial => {
            let parts: Vec<String> = [initial(first), last_initial]
                .into_iter()
                .flatten()
                .map(|c| format!("{}.", c))
                .collect();
            if parts.is_empty() {
                UNKNOWN_NAME.to_string()
            } else {
                parts.join(" ")
            }
        }
    }
}

/// The name to show, honoring the widget's privacy settings.
pub fn display_name(name: &str, privacy: &PrivacySettings) -> String {
    if privacy.anonymize_names {
        return anonymize_name(name, privacy.anonymization_style);
    }
    let name = name.split_whitespace().collect::<Vec<_>>().join(" ");
    if name.is_empty() {
        UNKNOWN_NAME.to_string()
    } else {
        name
    }
}

/// Up to two uppercase initials: first letter of the first and last words.
pub fn get_initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let first = words.first().and_then(|w| initial(w));
    let last = if words.len() > 1 {
        words.last().and_then(|w| initial(w))
    } else {
        None
    };

    let initials: String = [first, last].into_iter().flatten().collect();
    if initials.is_empty() {
        FALLBACK_INITIALS.to_string()
    } else {
        initials
    }
}

/// Mask email addresses and phone numbers per the privacy toggles.
pub fn redact_pii(text: &str, privacy: &PrivacySettings) -> String {
    let mut out = text.to_string();
    if privacy.hide_emails {
        out = EMAIL_RE.replace_all(&out, EMAIL_MASK).into_owned();
    }
    if privacy.hide_phone_numbers {
        out = PHONE_RE.replace_all(&out, PHONE_MASK).into_owned();
    }
    out
}
