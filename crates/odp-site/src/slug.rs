//! Slug, breadcrumb, and relative-href derivation.
//!
//! A slug is a `/`-delimited hierarchical path uniquely identifying one
//! dataset row, conventionally shaped `/{dataset}/.../{reference}`. The
//! functions here are pure: they derive display names, navigation
//! breadcrumbs, and page-relative hyperlinks from slug strings without
//! touching any other state.

use serde::Serialize;

/// One entry of a navigation breadcrumb, ordered root to leaf.
///
/// The innermost entry describes the current page and carries no href.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Crumb {
    /// A linked ancestor entry.
    #[must_use]
    pub fn linked(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: Some(href.into()),
        }
    }

    /// The unlinked entry for the current page.
    #[must_use]
    pub fn current(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: None,
        }
    }
}

/// Humanise a path segment for display.
///
/// A segment whose letters are all uppercase is treated as an acronym
/// and returned unchanged (digits and punctuation do not disqualify it).
/// Otherwise every non-letter becomes a space and each word is
/// title-cased in place.
///
/// ```
/// use odp_site::format_name;
///
/// assert_eq!(format_name("local-authority-eng"), "Local Authority Eng");
/// assert_eq!(format_name("BUC"), "BUC");
/// assert_eq!(format_name("GP2"), "GP2");
/// ```
#[must_use]
pub fn format_name(name: &str) -> String {
    if is_acronym(name) {
        return name.to_owned();
    }
    let mut out = String::with_capacity(name.len());
    let mut prev_was_letter = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if prev_was_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_was_letter = true;
        } else {
            out.push(' ');
            prev_was_letter = false;
        }
    }
    out
}

fn is_acronym(name: &str) -> bool {
    let mut has_letter = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if !c.is_uppercase() {
                return false;
            }
            has_letter = true;
        }
    }
    has_letter
}

/// Sanitise one reference for use as a slug or path segment: `/` becomes
/// `-`, and spaces, parentheses, and apostrophes are dropped.
#[must_use]
pub fn sanitise_segment(segment: &str) -> String {
    segment
        .chars()
        .filter_map(|c| match c {
            '/' => Some('-'),
            ' ' | '(' | ')' | '\'' => None,
            other => Some(other),
        })
        .collect()
}

/// Drop the first `n` `/`-separated elements of `slug`.
///
/// A leading `/` yields an empty first element, so for the canonical
/// `/{dataset}/...` shape, `n = 2` leaves the path below the dataset
/// root.
#[must_use]
pub fn strip_slug_prefix(slug: &str, n: usize) -> String {
    slug.split('/').skip(n).collect::<Vec<_>>().join("/")
}

/// The last `/`-separated segment of `slug`.
#[must_use]
pub fn last_segment(slug: &str) -> &str {
    slug.rsplit('/').next().unwrap_or(slug)
}

/// Derive a page-relative hyperlink from a slug.
///
/// One leading `/` is dropped; when `strip_prefix` is given and matches
/// the front of the remainder, the prefix and a following `/` are
/// removed. The result always starts `./`. The prefix may be written
/// with or without a trailing slash.
///
/// ```
/// use odp_site::slug_to_relative_href;
///
/// assert_eq!(
///     slug_to_relative_href("/a/b/c", Some("a/b")),
///     "./c",
/// );
/// assert_eq!(
///     slug_to_relative_href("local-authority-eng/BUC/avdlp-GP2", None),
///     "./local-authority-eng/BUC/avdlp-GP2",
/// );
/// ```
#[must_use]
pub fn slug_to_relative_href(slug: &str, strip_prefix: Option<&str>) -> String {
    let mut path = slug.strip_prefix('/').unwrap_or(slug);
    if let Some(prefix) = strip_prefix {
        let prefix = prefix.strip_suffix('/').unwrap_or(prefix);
        if let Some(rest) = path.strip_prefix(prefix) {
            path = rest.strip_prefix('/').unwrap_or(rest);
        }
    }
    format!("./{path}")
}

/// Derive the breadcrumb for a slug.
///
/// The last segment becomes the innermost, unlinked entry, using
/// `reference` verbatim when supplied and the raw segment otherwise.
/// Every ancestor segment gets a humanised text and a relative href
/// stepping up one directory per level.
#[must_use]
pub fn slug_to_breadcrumb(slug: &str, reference: Option<&str>) -> Vec<Crumb> {
    let mut segments: Vec<&str> = slug.split('/').collect();
    if segments.first() == Some(&"") {
        segments.remove(0);
    }

    let mut crumbs = Vec::with_capacity(segments.len());
    for (depth, segment) in segments.iter().rev().enumerate() {
        if depth == 0 {
            crumbs.push(Crumb::current(reference.unwrap_or(segment)));
        } else {
            crumbs.push(Crumb::linked(format_name(segment), "../".repeat(depth)));
        }
    }
    crumbs.reverse();
    crumbs
}
