//! Group index accumulation for the root index page.
//!
//! Rows are partitioned into named buckets (conventionally by
//! organisation). The root index page shows either one listing per
//! group or, when grouping is disabled, one flat listing; either way
//! the entries come from the same accumulator, keyed by a sentinel
//! no-group bucket in the flat case.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::index::{IndexEntry, RawEntry};
use crate::natural;
use crate::row::Row;

/// Resolves a group id to a display label.
///
/// Implemented by reference registers (the organisation table). A
/// missing name falls back to the raw id at the call site, so partial
/// registers degrade to ids rather than dropping groups.
pub trait GroupNames {
    fn name_for(&self, id: &str) -> Option<String>;
}

impl<F> GroupNames for F
where
    F: Fn(&str) -> Option<String>,
{
    fn name_for(&self, id: &str) -> Option<String> {
        self(id)
    }
}

/// One rendered group on the root index page, ordered by label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexGroup {
    /// Group id; absent for the no-group bucket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "text")]
    pub name: String,
    pub items: Vec<IndexEntry>,
}

/// Determine the group keys for a row.
///
/// The singular field wins when non-empty; otherwise the plural
/// `{field}s` variant is split on `;`; otherwise the row lands in the
/// no-group bucket. With grouping disabled every row is no-group.
#[must_use]
pub fn group_keys(row: &Row, group_field: Option<&str>) -> Vec<Option<String>> {
    let Some(field) = group_field else {
        return vec![None];
    };
    if let Some(value) = row.get(field) {
        return vec![Some(value.to_owned())];
    }
    if let Some(list) = row.get(&format!("{field}s")) {
        let keys: Vec<Option<String>> = list
            .split(';')
            .filter(|part| !part.is_empty())
            .map(|part| Some(part.to_owned()))
            .collect();
        if !keys.is_empty() {
            return keys;
        }
    }
    vec![None]
}

/// Accumulates the grouped top-level listing across one render pass.
#[derive(Debug, Default)]
pub struct GroupIndex {
    groups: BTreeMap<Option<String>, Vec<RawEntry>>,
    seen: BTreeSet<(Option<String>, String)>,
}

impl GroupIndex {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry` to each of `groups`, deduplicating on the
    /// `(group, slug)` pair. A repeated pair leaves the group untouched.
    pub fn add_row(&mut self, groups: &[Option<String>], slug: &str, entry: &RawEntry) {
        for group in groups {
            let key = (group.clone(), slug.to_owned());
            if self.seen.contains(&key) {
                continue;
            }
            self.seen.insert(key);
            self.groups.entry(group.clone()).or_default().push(entry.clone());
        }
    }

    /// Total entries across all groups.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Number of groups seen, counting the no-group bucket.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether nothing has been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Finish into ordered groups: labels resolved through `names` with
    /// the raw id as fallback, groups sorted by label (the empty
    /// no-group label first), each group's items resolved against
    /// `strip_prefix` and ordered naturally by reference.
    #[must_use]
    pub fn into_groups(
        self,
        names: Option<&dyn GroupNames>,
        strip_prefix: &str,
    ) -> Vec<IndexGroup> {
        let mut groups: Vec<IndexGroup> = self
            .groups
            .into_iter()
            .map(|(id, entries)| {
                let name = match &id {
                    Some(id) => names
                        .and_then(|names| names.name_for(id))
                        .unwrap_or_else(|| id.clone()),
                    None => String::new(),
                };
                IndexGroup {
                    id,
                    name,
                    items: resolve_sorted(&entries, strip_prefix),
                }
            })
            .collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        groups
    }

    /// Finish into the flat listing used when grouping is disabled:
    /// every accumulated entry, resolved and naturally ordered.
    #[must_use]
    pub fn into_items(self, strip_prefix: &str) -> Vec<IndexEntry> {
        let entries: Vec<RawEntry> = self.groups.into_values().flatten().collect();
        resolve_sorted(&entries, strip_prefix)
    }
}

fn resolve_sorted(entries: &[RawEntry], strip_prefix: &str) -> Vec<IndexEntry> {
    let mut items: Vec<IndexEntry> = entries
        .iter()
        .map(|entry| entry.resolve(strip_prefix))
        .collect();
    items.sort_by(|a, b| natural::compare(&a.reference, &b.reference));
    items
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::index::LinkTarget;

    fn entry(reference: &str, slug: &str) -> RawEntry {
        RawEntry {
            reference: reference.to_owned(),
            text: None,
            end_date: None,
            link: LinkTarget::PendingSlug(slug.to_owned()),
        }
    }

    fn org(id: &str) -> Vec<Option<String>> {
        vec![Some(id.to_owned())]
    }

    #[test]
    fn test_group_keys_singular_field() {
        let row = Row::new().with("organisation", "org-one");

        assert_eq!(
            group_keys(&row, Some("organisation")),
            vec![Some("org-one".to_owned())]
        );
    }

    #[test]
    fn test_group_keys_plural_field() {
        let row = Row::new().with("organisations", "org-one;org-two");

        assert_eq!(
            group_keys(&row, Some("organisation")),
            vec![Some("org-one".to_owned()), Some("org-two".to_owned())]
        );
    }

    #[test]
    fn test_group_keys_singular_beats_plural() {
        let row = Row::new()
            .with("organisation", "org-one")
            .with("organisations", "org-two;org-three");

        assert_eq!(
            group_keys(&row, Some("organisation")),
            vec![Some("org-one".to_owned())]
        );
    }

    #[test]
    fn test_group_keys_missing_falls_to_sentinel() {
        let row = Row::new();

        assert_eq!(group_keys(&row, Some("organisation")), vec![None]);
        assert_eq!(group_keys(&row, None), vec![None]);
    }

    #[test]
    fn test_group_keys_empty_plural_pieces_dropped() {
        let row = Row::new().with("organisations", "org-one;;");

        assert_eq!(
            group_keys(&row, Some("organisation")),
            vec![Some("org-one".to_owned())]
        );
    }

    #[test]
    fn test_duplicate_group_slug_pair_kept_once() {
        let mut index = GroupIndex::new();

        index.add_row(&org("org-one"), "/d/REF01", &entry("REF01", "/d/REF01"));
        index.add_row(&org("org-one"), "/d/REF01", &entry("REF01", "/d/REF01"));

        assert_eq!(index.total_items(), 1);
    }

    #[test]
    fn test_same_slug_different_groups_kept_in_both() {
        let mut index = GroupIndex::new();

        index.add_row(&org("org-one"), "/d/REF01", &entry("REF01", "/d/REF01"));
        index.add_row(&org("org-two"), "/d/REF01", &entry("REF01", "/d/REF01"));

        assert_eq!(index.len(), 2);
        assert_eq!(index.total_items(), 2);
    }

    #[test]
    fn test_into_groups_sorted_by_label_with_items_in_natural_order() {
        let mut index = GroupIndex::new();
        index.add_row(&org("org-two"), "/d/REF10", &entry("REF10", "/d/REF10"));
        index.add_row(&org("org-one"), "/d/REF2", &entry("REF2", "/d/REF2"));
        index.add_row(&org("org-two"), "/d/REF9", &entry("REF9", "/d/REF9"));

        let groups = index.into_groups(None, "d");

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "org-one");
        assert_eq!(groups[1].name, "org-two");
        let refs: Vec<&str> = groups[1]
            .items
            .iter()
            .map(|item| item.reference.as_str())
            .collect();
        assert_eq!(refs, vec!["REF9", "REF10"]);
        assert_eq!(groups[1].items[0].href, "./REF9");
    }

    #[test]
    fn test_into_groups_resolves_labels_with_fallback() {
        let mut index = GroupIndex::new();
        index.add_row(&org("known"), "/d/a", &entry("a", "/d/a"));
        index.add_row(&org("unknown"), "/d/b", &entry("b", "/d/b"));

        let names = |id: &str| (id == "known").then(|| "A Known Name".to_owned());
        let groups = index.into_groups(Some(&names), "d");

        assert_eq!(groups[0].name, "A Known Name");
        assert_eq!(groups[0].id, Some("known".to_owned()));
        assert_eq!(groups[1].name, "unknown");
    }

    #[test]
    fn test_sentinel_group_sorts_first() {
        let mut index = GroupIndex::new();
        index.add_row(&org("org-one"), "/d/a", &entry("a", "/d/a"));
        index.add_row(&[None], "/d/b", &entry("b", "/d/b"));

        let groups = index.into_groups(None, "d");

        assert_eq!(groups[0].id, None);
        assert_eq!(groups[0].name, "");
        assert_eq!(groups[1].name, "org-one");
    }

    #[test]
    fn test_into_items_flattens_and_sorts() {
        let mut index = GroupIndex::new();
        index.add_row(&[None], "/d/REF10", &entry("REF10", "/d/REF10"));
        index.add_row(&[None], "/d/REF1", &entry("REF1", "/d/REF1"));

        let items = index.into_items("d");

        let refs: Vec<&str> = items.iter().map(|item| item.reference.as_str()).collect();
        assert_eq!(refs, vec!["REF1", "REF10"]);
    }
}
