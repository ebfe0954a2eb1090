//! Alphanumeric ("natural") sort order for reference strings.
//!
//! References such as `REF2` and `REF10` should order numerically on
//! their digit runs rather than character by character. The sort key
//! splits a string into maximal digit and non-digit runs; digit runs
//! compare by numeric value with no magnitude limit, other runs compare
//! lexically.

use std::cmp::Ordering;

/// One maximal run of a sort key.
///
/// Digit runs are stored with leading zeros stripped so that comparing
/// by length and then lexically gives exact numeric order for digit
/// strings of any length. A digit run orders before a text run at the
/// same position, which keeps the ordering total for keys of unlike
/// shape.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Number(String),
    Text(String),
}

impl Ord for Part {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Part::Number(a), Part::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Part::Text(a), Part::Text(b)) => a.cmp(b),
            (Part::Number(_), Part::Text(_)) => Ordering::Less,
            (Part::Text(_), Part::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Part {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort key for one reference string.
///
/// Total for any input; keys that differ only in digit-run padding
/// (`REF2` and `REF002`) compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey(Vec<Part>);

/// Build the natural sort key for `value`.
#[must_use]
pub fn natural_key(value: &str) -> NaturalKey {
    let mut parts = Vec::new();
    let mut run = String::new();
    let mut run_is_digits = false;

    for c in value.chars() {
        let is_digit = c.is_ascii_digit();
        if !run.is_empty() && is_digit != run_is_digits {
            parts.push(finish_run(run, run_is_digits));
            run = String::new();
        }
        run.push(c);
        run_is_digits = is_digit;
    }
    if !run.is_empty() {
        parts.push(finish_run(run, run_is_digits));
    }

    NaturalKey(parts)
}

fn finish_run(run: String, is_digits: bool) -> Part {
    if is_digits {
        let stripped = run.trim_start_matches('0');
        if stripped.is_empty() {
            Part::Number("0".to_owned())
        } else {
            Part::Number(stripped.to_owned())
        }
    } else {
        Part::Text(run)
    }
}

/// Compare two strings in natural order.
///
/// ```
/// use std::cmp::Ordering;
/// use odp_site::natural_compare;
///
/// assert_eq!(natural_compare("REF2", "REF10"), Ordering::Less);
/// assert_eq!(natural_compare("REF10", "REF9"), Ordering::Greater);
/// ```
#[must_use]
pub fn compare(a: &str, b: &str) -> Ordering {
    natural_key(a).cmp(&natural_key(b))
}
