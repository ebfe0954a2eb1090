//! Path-walk index accumulation.
//!
//! Every rendered row contributes a listing entry to each ancestor level
//! of its (prefix-stripped) slug, so that a path like `org-one/REF01`
//! produces an `org-one` index page listing `REF01`, and deeper paths
//! produce one index page per intermediate segment. Each level records
//! an entry at most once: the deepest level keyed by the row's
//! reference, levels above keyed by the child segment. On a repeat the
//! walk stops, because the ancestor chain was already populated when
//! the key first appeared.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::natural;
use crate::slug::{format_name, slug_to_relative_href};

/// Where an accumulated listing entry points.
///
/// Path-walk entries resolve their href at insertion time, relative to
/// the node that owns them. Group items keep the row's slug until the
/// page rendering pass, when the owning page's path is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Href(String),
    PendingSlug(String),
}

/// Row-derived fields for a leaf listing entry.
///
/// Ancestor levels beyond the immediate parent are recorded as bare
/// path-segment stubs without any of these.
#[derive(Debug, Clone, Default)]
pub struct EntrySeed {
    pub reference: Option<String>,
    pub text: Option<String>,
    pub end_date: Option<String>,
}

/// One listing entry as accumulated during the row pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub reference: String,
    pub text: Option<String>,
    pub end_date: Option<String>,
    pub link: LinkTarget,
}

impl RawEntry {
    /// Resolve to the render-ready form, computing a pending slug's href
    /// relative to the page identified by `strip_prefix`.
    #[must_use]
    pub fn resolve(&self, strip_prefix: &str) -> IndexEntry {
        let href = match &self.link {
            LinkTarget::Href(href) => href.clone(),
            LinkTarget::PendingSlug(slug) => slug_to_relative_href(slug, Some(strip_prefix)),
        };
        IndexEntry {
            reference: self.reference.clone(),
            text: self.text.clone(),
            href,
            end_date: self.end_date.clone(),
        }
    }
}

/// A resolved index-page listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub href: String,
    #[serde(rename = "end-date", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Accumulated listing state for one path prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexNode {
    /// Number of entries recorded at this level.
    pub count: usize,
    /// References listed at this level; doubles as the node's dedup
    /// set. Ancestor stubs record the child segment instead.
    pub references: BTreeSet<String>,
    /// Listing entries in insertion order; sorted on resolve.
    pub items: Vec<RawEntry>,
}

impl IndexNode {
    /// This node's listing, hrefs resolved against `strip_prefix` and
    /// ordered naturally by reference.
    #[must_use]
    pub fn resolved_items(&self, strip_prefix: &str) -> Vec<IndexEntry> {
        let mut items: Vec<IndexEntry> = self
            .items
            .iter()
            .map(|entry| entry.resolve(strip_prefix))
            .collect();
        items.sort_by(|a, b| natural::compare(&a.reference, &b.reference));
        items
    }
}

/// Index accumulation across one render pass.
///
/// Nodes are keyed by path prefix; top-level segments have no parent
/// node here (the root page is assembled from the group index instead).
#[derive(Debug, Default)]
pub struct PathIndex {
    nodes: BTreeMap<String, IndexNode>,
}

impl PathIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path`'s ancestor chain.
    ///
    /// The deepest level receives a row-derived entry built from `seed`,
    /// recorded under its reference; levels above it receive bare
    /// segment stubs recorded under the segment. The walk stops early
    /// when a level has already seen the entry's key.
    pub fn add(&mut self, path: &str, seed: EntrySeed) {
        let mut current = path;
        let mut seed = Some(seed);

        while let Some((stem, name)) = current.rsplit_once('/') {
            let node = self.nodes.entry(stem.to_owned()).or_default();
            let link = LinkTarget::Href(slug_to_relative_href(current, Some(stem)));

            let (entry, key) = match seed.take() {
                Some(seed) => {
                    let reference = seed.reference.unwrap_or_else(|| format_name(name));
                    let entry = RawEntry {
                        reference: reference.clone(),
                        text: seed.text,
                        end_date: seed.end_date,
                        link,
                    };
                    (entry, reference)
                }
                None => {
                    let entry = RawEntry {
                        reference: format_name(name),
                        text: None,
                        end_date: None,
                        link,
                    };
                    (entry, name.to_owned())
                }
            };

            if node.references.contains(&key) {
                // ancestors were recorded when this key first appeared
                return;
            }
            node.references.insert(key);
            node.count += 1;
            node.items.push(entry);

            current = stem;
        }
    }

    /// Whether any node has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of accumulated nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The node for `path`, if any row contributed to it.
    #[must_use]
    pub fn node(&self, path: &str) -> Option<&IndexNode> {
        self.nodes.get(path)
    }

    /// Iterate nodes in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexNode)> {
        self.nodes.iter().map(|(path, node)| (path.as_str(), node))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn seed(reference: &str, text: &str) -> EntrySeed {
        EntrySeed {
            reference: Some(reference.to_owned()),
            text: Some(text.to_owned()),
            end_date: None,
        }
    }

    #[test]
    fn test_single_level_path() {
        let mut index = PathIndex::new();

        index.add("org-one/REF01", seed("REF01", "item-one"));

        assert_eq!(index.len(), 1);
        let node = index.node("org-one").unwrap();
        assert_eq!(node.count, 1);
        assert!(node.references.contains("REF01"));
        assert_eq!(
            node.items,
            vec![RawEntry {
                reference: "REF01".to_owned(),
                text: Some("item-one".to_owned()),
                end_date: None,
                link: LinkTarget::Href("./REF01".to_owned()),
            }]
        );
    }

    #[test]
    fn test_references_carry_row_reference_not_segment() {
        let mut index = PathIndex::new();

        // the slug segment sanitises the reference's `/` to `-`
        index.add("org-one/REF-04", seed("REF/04", "item-four"));

        let node = index.node("org-one").unwrap();
        assert!(node.references.contains("REF/04"));
        assert!(!node.references.contains("REF-04"));
        assert_eq!(node.items[0].reference, "REF/04");
        assert_eq!(
            node.items[0].link,
            LinkTarget::Href("./REF-04".to_owned())
        );
    }

    #[test]
    fn test_top_level_path_records_nothing() {
        let mut index = PathIndex::new();

        index.add("REF01", seed("REF01", "item-one"));

        assert!(index.is_empty());
    }

    #[test]
    fn test_deep_path_populates_every_ancestor() {
        let mut index = PathIndex::new();

        index.add("local-authority-eng/BUC/avdlp-GP2", seed("avdlp-GP2", "policy"));

        assert_eq!(index.len(), 2);

        let leaf_parent = index.node("local-authority-eng/BUC").unwrap();
        assert_eq!(leaf_parent.count, 1);
        assert_eq!(leaf_parent.items[0].reference, "avdlp-GP2");
        assert_eq!(leaf_parent.items[0].text, Some("policy".to_owned()));
        assert_eq!(
            leaf_parent.items[0].link,
            LinkTarget::Href("./avdlp-GP2".to_owned())
        );

        // the grandparent entry is a bare stub: humanised segment, no text
        let top = index.node("local-authority-eng").unwrap();
        assert_eq!(top.count, 1);
        assert_eq!(top.items[0].reference, "BUC");
        assert_eq!(top.items[0].text, None);
        assert_eq!(top.items[0].link, LinkTarget::Href("./BUC".to_owned()));
    }

    #[test]
    fn test_shared_ancestor_recorded_once() {
        let mut index = PathIndex::new();

        index.add("local-authority-eng/BUC/a", seed("a", "first"));
        index.add("local-authority-eng/BUC/b", seed("b", "second"));

        let parent = index.node("local-authority-eng/BUC").unwrap();
        assert_eq!(parent.count, 2);

        // BUC itself appears once in the grandparent, not twice
        let top = index.node("local-authority-eng").unwrap();
        assert_eq!(top.count, 1);
        assert_eq!(top.items.len(), 1);
        assert_eq!(top.items[0].reference, "BUC");
    }

    #[test]
    fn test_repeat_child_keeps_first_entry() {
        let mut index = PathIndex::new();

        index.add("org-one/REF01", seed("REF01", "first"));
        index.add("org-one/REF01", seed("REF01", "replacement"));

        let node = index.node("org-one").unwrap();
        assert_eq!(node.count, 1);
        assert_eq!(node.items.len(), 1);
        assert_eq!(node.items[0].text, Some("first".to_owned()));
    }

    #[test]
    fn test_seed_without_reference_falls_back_to_segment() {
        let mut index = PathIndex::new();

        index.add("org-one/some-ref", EntrySeed::default());

        let node = index.node("org-one").unwrap();
        assert_eq!(node.items[0].reference, "Some Ref");
    }

    #[test]
    fn test_resolved_items_sorted_naturally() {
        let mut index = PathIndex::new();
        index.add("org/REF10", seed("REF10", "ten"));
        index.add("org/REF2", seed("REF2", "two"));
        index.add("org/REF1", seed("REF1", "one"));

        let items = index.node("org").unwrap().resolved_items("d/org");

        let refs: Vec<&str> = items.iter().map(|i| i.reference.as_str()).collect();
        assert_eq!(refs, vec!["REF1", "REF2", "REF10"]);
    }

    #[test]
    fn test_resolve_pending_slug() {
        let raw = RawEntry {
            reference: "REF01".to_owned(),
            text: None,
            end_date: None,
            link: LinkTarget::PendingSlug("/dataset-name/org-one/REF01".to_owned()),
        };

        let entry = raw.resolve("dataset-name");

        assert_eq!(entry.href, "./org-one/REF01");
    }

    #[test]
    fn test_index_entry_serialises_kebab_end_date() {
        let entry = IndexEntry {
            reference: "REF01".to_owned(),
            text: None,
            href: "./REF01".to_owned(),
            end_date: Some("2020-01-01".to_owned()),
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"reference":"REF01","href":"./REF01","end-date":"2020-01-01"}"#
        );
    }
}
