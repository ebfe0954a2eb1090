//! Reference lookup tables backed by local CSV files.
//!
//! This crate provides:
//! - [`ReferenceTable`]: generic keyed name/URL lookup loaded from CSV
//! - [`OrganisationTable`]: the organisation register, also usable as
//!   the group-label source for grouped rendering
//! - [`GeographyLookup`]: family dispatch over mixed geography ids
//!
//! # Quick Start
//!
//! ```
//! use odp_refdata::OrganisationTable;
//!
//! let register = "organisation,name,slug\n\
//!     local-authority-eng:HAG,Harrogate Borough Council,/organisation/local-authority-eng/HAG\n";
//! let table = OrganisationTable::from_reader(register.as_bytes())?;
//!
//! assert_eq!(
//!     table.name_for("local-authority-eng:HAG"),
//!     Some("Harrogate Borough Council"),
//! );
//! # Ok::<(), odp_refdata::RefdataError>(())
//! ```

pub(crate) mod geography;
pub(crate) mod lookup;
pub(crate) mod table;

pub use geography::GeographyLookup;
pub use lookup::{Lookup, RefdataError};
pub use table::{KeyFilter, OrganisationTable, ReferenceTable, TableConfig};
