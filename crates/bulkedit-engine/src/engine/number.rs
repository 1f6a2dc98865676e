//! Numeric-string parsing for user-entered amounts.
//!
//! Accepts the shapes people type or copy out of a grid:
//! `1234`, `1,234.50`, `$1,234.50`, `-€5`, `12 USD`, `(1,234.50)`, `1e3`.
//! Anything else parses to NaN.

use regex::Regex;
use std::sync::OnceLock;

fn number_re() -> &'static Regex {
    static NUMBER_RE: OnceLock<Regex> = OnceLock::new();
    NUMBER_RE.get_or_init(|| {
        Regex::new(
            r"^\s*(?<open>\()?\s*(?<lead>[-+])?\s*(?:(?<prefix>\p{Sc}|[A-Z]{3})\s*)?(?<sign>[-+])?(?<int>\d{1,3}(?:,\d{3})+|\d+)?(?<frac>\.\d*)?(?<exp>[eE][-+]?\d+)?\s*(?<suffix>\p{Sc}|[A-Z]{3})?\s*(?<close>\))?\s*$",
        )
        .expect("number regex must compile")
    })
}

/// Parse a numeric string, tolerating thousands separators and currency
/// markers. Returns NaN when the input is not a number.
pub fn parse_number(input: &str) -> f64 {
    try_parse_number(input).unwrap_or(f64::NAN)
}

fn try_parse_number(input: &str) -> Option<f64> {
    let caps = number_re().captures(input)?;

    let int = caps.name("int").map(|m| m.as_str());
    let frac = caps.name("frac").map(|m| m.as_str()).unwrap_or("");
    if int.is_none() && frac.len() < 2 {
        return None;
    }

    let parenthesized = caps.name("open").is_some();
    if parenthesized != caps.name("close").is_some() {
        return None;
    }

    let lead = caps.name("lead").map(|m| m.as_str());
    let sign = caps.name("sign").map(|m| m.as_str());
    if lead.is_some() && sign.is_some() {
        return None;
    }
    // A currency code alone on both sides ("USD 5 EUR") is ambiguous.
    if caps.name("prefix").is_some() && caps.name("suffix").is_some() {
        return None;
    }

    let mut digits = String::with_capacity(input.len());
    if lead.or(sign) == Some("-") {
        digits.push('-');
    }
    digits.push_str(&int.unwrap_or("0").replace(',', ""));
    digits.push_str(frac);
    if let Some(exp) = caps.name("exp") {
        digits.push_str(exp.as_str());
    }

    let n = digits.parse::<f64>().ok()?;
    Some(if parenthesized { -n.abs() } else { n })
}
