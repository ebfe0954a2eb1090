//! Dispatch over geography id families.
//!
//! Geography references arrive in mixed shapes: development policy
//! areas as slugs, parishes as bare `E04` codes, everything else as
//! statistical-geography codes. One lookup routes each id to the table
//! for its family and applies that family's quirks.

use odp_site::{Row, last_segment};
use tracing::warn;

use crate::lookup::Lookup;
use crate::table::ReferenceTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    DevelopmentPolicyArea,
    Parish,
    Boundary,
}

/// Routes geography ids to the parish, development-policy-area or
/// boundary table.
#[derive(Debug)]
pub struct GeographyLookup {
    parish: ReferenceTable,
    development_policy_area: ReferenceTable,
    boundary: ReferenceTable,
}

impl GeographyLookup {
    #[must_use]
    pub fn new(
        parish: ReferenceTable,
        development_policy_area: ReferenceTable,
        boundary: ReferenceTable,
    ) -> Self {
        Self {
            parish,
            development_policy_area,
            boundary,
        }
    }

    fn family(id: &str) -> Option<Family> {
        if id.starts_with("/development-policy-area/") {
            Some(Family::DevelopmentPolicyArea)
        } else if id.starts_with('/') {
            warn!(id = %id, "unhandled geography key");
            None
        } else if id.starts_with("E04") {
            Some(Family::Parish)
        } else {
            Some(Family::Boundary)
        }
    }

    /// Display name for a geography id.
    ///
    /// Development policy areas fall back to the final slug segment
    /// when the table has no name; boundaries never have names.
    #[must_use]
    pub fn name_for(&self, id: &str) -> Option<String> {
        match Self::family(id)? {
            Family::DevelopmentPolicyArea => Some(
                self.development_policy_area
                    .name_for(id)
                    .map_or_else(|| last_segment(id).to_owned(), ToOwned::to_owned),
            ),
            Family::Parish => self.parish.name_for(id).map(ToOwned::to_owned),
            Family::Boundary => None,
        }
    }

    /// Page URL for a geography id; boundaries have no pages.
    #[must_use]
    pub fn url_for(&self, id: &str) -> Option<String> {
        match Self::family(id)? {
            Family::DevelopmentPolicyArea => self.development_policy_area.url_for(id),
            Family::Parish => self.parish.url_for(id),
            Family::Boundary => None,
        }
    }

    /// Geometry file URL for a geography id.
    #[must_use]
    pub fn geometry_url_for(&self, id: &str) -> Option<String> {
        match Self::family(id)? {
            Family::DevelopmentPolicyArea => self.development_policy_area.geometry_url_for(id),
            Family::Parish => self.parish.geometry_url_for(id),
            Family::Boundary => self.boundary.geometry_url_for(id),
        }
    }

    /// Geometry URL for a row: its own `geometry_url` when present,
    /// otherwise derived from the `geographies` or
    /// `statistical-geography` reference. A reference that resolves to
    /// nothing does not fall through to the next field.
    #[must_use]
    pub fn geometry_url_for_row(&self, row: &Row) -> Option<String> {
        if let Some(url) = row.get("geometry_url") {
            return Some(url.to_owned());
        }
        if let Some(id) = row.get("geographies") {
            return self.geometry_url_for(id);
        }
        row.get("statistical-geography")
            .and_then(|id| self.geometry_url_for(id))
    }
}

impl Lookup for GeographyLookup {
    fn name_for(&self, id: &str) -> Option<String> {
        GeographyLookup::name_for(self, id)
    }

    fn url_for(&self, id: &str) -> Option<String> {
        GeographyLookup::url_for(self, id)
    }
}
