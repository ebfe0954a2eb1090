//! GeoJSON sidecar emission for rows carrying WKT geometry.
//!
//! A row may carry its geometry as a WKT string in one of a small set of
//! conventional fields. When it does, a `geometry.geojson` file is
//! written next to the row's detail page: a single GeoJSON `Feature`
//! whose geometry is the converted WKT and whose properties are the full
//! row. Failures here are contained by the caller; a bad geometry must
//! never take down a render pass.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use geojson::{Feature, Geometry};
use thiserror::Error;
use wkt::TryFromWkt;

use crate::row::Row;

/// Fields checked for WKT geometry, in preference order.
pub const GEOMETRY_FIELDS: [&str; 2] = ["geometry", "point"];

/// File name of the sidecar written next to a detail page.
pub const GEOMETRY_FILE: &str = "geometry.geojson";

/// Error converting or writing a geometry sidecar.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid WKT: {0}")]
    Wkt(String),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Convert a WKT string to a GeoJSON geometry.
pub fn wkt_to_geometry(wkt_text: &str) -> Result<Geometry, GeometryError> {
    let geometry = geo_types::Geometry::<f64>::try_from_wkt_str(wkt_text)
        .map_err(|e| GeometryError::Wkt(e.to_string()))?;
    Ok(Geometry::new(geojson::Value::from(&geometry)))
}

/// Build the sidecar feature for a row: the converted geometry from
/// `field` plus the full row as properties.
pub fn feature_for_row(row: &Row, field: &str) -> Result<Feature, GeometryError> {
    let wkt_text = row.get(field).unwrap_or_default();
    let geometry = wkt_to_geometry(wkt_text)?;
    let properties: serde_json::Map<String, serde_json::Value> = row
        .iter()
        .map(|(key, value)| (key.to_owned(), serde_json::Value::from(value)))
        .collect();
    Ok(Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

/// Write the sidecar for `row` into `dir`, creating the directory if
/// needed. Returns the sidecar file name for use as the row's
/// `geometry_url`.
pub fn write_sidecar(dir: &Path, row: &Row, field: &str) -> Result<String, GeometryError> {
    let feature = feature_for_row(row, field)?;
    let json = serde_json::to_string(&feature)?;

    fs::create_dir_all(dir).map_err(|e| GeometryError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let path = dir.join(GEOMETRY_FILE);
    fs::write(&path, json).map_err(|e| GeometryError::Io {
        path: path.clone(),
        source: e,
    })?;
    Ok(GEOMETRY_FILE.to_owned())
}
