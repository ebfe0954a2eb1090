//! Display and formatting helpers for rendered pages.
//!
//! Pure functions over field values: number formatting, URL
//! linkification, list splitting, end-date checks. The page-writing
//! sink applies these when laying out detail and index pages.

use std::borrow::Cow;

use chrono::{Local, NaiveDate};
use odp_markdown::escape_html;
use url::Url;

/// Make large counts readable: `1000000` becomes `1,000,000`.
#[must_use]
pub fn commanum(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Drop the fraction from a numeric string: `"12.0"` becomes `"12"`.
///
/// Truncates toward zero; non-numeric input gives `None`.
#[must_use]
pub fn float_to_int(value: &str) -> Option<String> {
    let number: f64 = value.parse().ok()?;
    Some(format!("{}", number.trunc()))
}

/// Whether `value` is an absolute http(s) URL with a host.
#[must_use]
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value)
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
}

/// Wrap a URL value in a GOV.UK-styled anchor; anything that is not a
/// URL passes through unchanged.
#[must_use]
pub fn make_link(value: &str) -> Cow<'_, str> {
    if is_valid_url(value) {
        let escaped = escape_html(value);
        Cow::Owned(format!(
            r#"<a class="govuk-link" href="{escaped}">{escaped}</a>"#
        ))
    } else {
        Cow::Borrowed(value)
    }
}

/// Final segment of a slug-like value.
#[must_use]
pub fn strip_slug(value: &str) -> &str {
    value.rsplit('/').next().unwrap_or(value)
}

/// Split a `;`-separated field into its non-empty, trimmed parts.
#[must_use]
pub fn split_to_list(value: &str) -> Vec<&str> {
    value
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

/// Line of a data row in the raw CSV view, accounting for the header.
#[must_use]
pub fn github_line_num(row: usize) -> usize {
    row + 1
}

/// Expand a hex colour to its decimal channels: `#0b0c0c` becomes
/// `11,12,12`.
#[must_use]
pub fn hex_to_rgb(hex: &str) -> Option<String> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 {
        return None;
    }
    let channel =
        |range| hex.get(range).and_then(|pair| u8::from_str_radix(pair, 16).ok());
    let r = channel(0..2)?;
    let g = channel(2..4)?;
    let b = channel(4..6)?;
    Some(format!("{r},{g},{b}"))
}

/// Whether an end-date value lies in the past.
///
/// Empty or unparseable dates are not historical; a record ending
/// today is still current.
#[must_use]
pub fn is_historical(end_date: &str) -> bool {
    NaiveDate::parse_from_str(end_date, "%Y-%m-%d")
        .is_ok_and(|date| date < Local::now().date_naive())
}

/// Whether any of the given end-date values lies in the past.
pub fn contains_historical<'a>(end_dates: impl IntoIterator<Item = &'a str>) -> bool {
    end_dates.into_iter().any(is_historical)
}
