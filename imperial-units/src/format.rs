//! Locale-aware result formatting
//!
//! Results always show exactly two fraction digits. The locale decides only
//! the grouping and decimal separators.

use serde::Serialize;

/// Number separators for one locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberLocale {
    /// BCP-47 tag (e.g. "en-US")
    pub tag: &'static str,
    /// Thousands separator, if the locale groups digits
    pub grouping: Option<char>,
    pub decimal: char,
}

impl NumberLocale {
    pub const fn new(tag: &'static str, grouping: Option<char>, decimal: char) -> Self {
        NumberLocale { tag, grouping, decimal }
    }

    pub const EN_US: NumberLocale = NumberLocale::new("en-US", Some(','), '.');
    pub const EN_GB: NumberLocale = NumberLocale::new("en-GB", Some(','), '.');
    pub const DE_DE: NumberLocale = NumberLocale::new("de-DE", Some('.'), ',');
    pub const DE_CH: NumberLocale = NumberLocale::new("de-CH", Some('\u{2019}'), '.');
    pub const FR_FR: NumberLocale = NumberLocale::new("fr-FR", Some('\u{202F}'), ',');
    pub const IT_IT: NumberLocale = NumberLocale::new("it-IT", Some('.'), ',');
    pub const PT_BR: NumberLocale = NumberLocale::new("pt-BR", Some('.'), ',');
    pub const RU_RU: NumberLocale = NumberLocale::new("ru-RU", Some('\u{00A0}'), ',');
    pub const JA_JP: NumberLocale = NumberLocale::new("ja-JP", Some(','), '.');

    /// Every built-in locale. The first entry per language is that
    /// language's fallback.
    pub const ALL: [NumberLocale; 9] = [
        Self::EN_US,
        Self::EN_GB,
        Self::DE_DE,
        Self::DE_CH,
        Self::FR_FR,
        Self::IT_IT,
        Self::PT_BR,
        Self::RU_RU,
        Self::JA_JP,
    ];

    /// Resolve a locale tag.
    ///
    /// Accepts BCP-47 (`de-DE`) and POSIX (`de_DE.UTF-8`, `de_DE@euro`)
    /// spellings. An unknown region falls back to the language's first
    /// locale; `C` and `POSIX` map to en-US.
    pub fn from_tag(tag: &str) -> Option<NumberLocale> {
        let tag = tag.trim();
        let tag = tag.split(['.', '@']).next().unwrap_or(tag);
        if tag.is_empty() {
            return None;
        }
        if tag.eq_ignore_ascii_case("C") || tag.eq_ignore_ascii_case("POSIX") {
            return Some(Self::EN_US);
        }

        let normalized = tag.replace('_', "-");
        if let Some(exact) = Self::ALL.iter().find(|l| l.tag.eq_ignore_ascii_case(&normalized)) {
            return Some(*exact);
        }

        let language = normalized.split('-').next().unwrap_or(&normalized);
        Self::ALL
            .iter()
            .find(|l| l.language().eq_ignore_ascii_case(language))
            .copied()
    }

    /// Language subtag (e.g. "de" for "de-CH")
    pub fn language(&self) -> &'static str {
        self.tag.split('-').next().unwrap_or(self.tag)
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::EN_US
    }
}

/// Format with exactly two fraction digits using the locale's separators.
///
/// Rounding is half-to-even on the exact binary value. A negative value
/// keeps its sign even when it rounds to zero.
pub fn format_number(value: f64, locale: &NumberLocale) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }

    let fixed = format!("{:.2}", value);
    let (negative, digits) = match fixed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, fixed.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 * 3);
    if negative {
        out.push('-');
    }
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            if let Some(sep) = locale.grouping {
                out.push(sep);
            }
        }
        out.push(ch);
    }
    out.push(locale.decimal);
    out.push_str(frac_part);
    out
}

/// Format a result followed by its unit name, in the default (en-US) locale.
///
/// `format_result(4050.2, "foot")` gives `"4,050.20 foot"`.
pub fn format_result(value: f64, unit: &str) -> String {
    format_result_in(value, unit, &NumberLocale::default())
}

/// Format a result followed by its unit name, in the given locale.
pub fn format_result_in(value: f64, unit: &str, locale: &NumberLocale) -> String {
    format!("{} {}", format_number(value, locale), unit)
}
