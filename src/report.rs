//! Record set serialization and downstream filtering
//!
//! The record set is written in the same flat shape the archive tooling
//! has always consumed: one row per asset with latitude, longitude,
//! altitude, creation date/time, and the membership verdict. JSON is the
//! primary format; CSV carries the same columns for spreadsheet use.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use crate::error::{Result, VerifyError};
use crate::geometry::membership::{MembershipEngine, MembershipMode};
use crate::geometry::polygon::{lon_lat_of, FieldKeys};
use crate::record::{AssetRecord, Field};

/// Flat serialization shape of one asset record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRow {
    pub filename: String,
    pub checksum: String,
    pub latitude: Field<f64>,
    pub longitude: Field<f64>,
    pub altitude: Field<f64>,
    pub creation_date: Field<NaiveDate>,
    pub creation_time: Field<NaiveTime>,
    pub inside_polygon: Field<bool>,
}

impl From<&AssetRecord> for RecordRow {
    fn from(record: &AssetRecord) -> Self {
        let (latitude, longitude, altitude) = match record.coordinate.as_known() {
            Some(coord) => (
                Field::Known(coord.latitude),
                Field::Known(coord.longitude),
                coord.altitude.into(),
            ),
            None => (Field::Unknown, Field::Unknown, Field::Unknown),
        };
        let (creation_date, creation_time) = match record.timestamp.as_known() {
            Some(ts) => (Field::Known(ts.date), Field::Known(ts.time)),
            None => (Field::Unknown, Field::Unknown),
        };

        Self {
            filename: record.filename.clone(),
            checksum: record.checksum.clone(),
            latitude,
            longitude,
            altitude,
            creation_date,
            creation_time,
            inside_polygon: record.inside_polygon,
        }
    }
}

/// Write the record set as a pretty-printed JSON array
pub fn write_json(records: &[AssetRecord], path: &Path) -> Result<()> {
    let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
    let json = serde_json::to_string_pretty(&rows)
        .map_err(|e| VerifyError::output_write(path, "record serialization failed", e))?;
    std::fs::write(path, json)
        .map_err(|e| VerifyError::output_write(path, "cannot write records", e))
}

/// Write the record set as CSV with the same columns as the JSON shape
pub fn write_csv(records: &[AssetRecord], path: &Path) -> Result<()> {
    let mut out = Vec::new();
    writeln!(
        out,
        "Filename,Checksum,Latitude,Longitude,Altitude,Creation Date,Creation Time,Inside Polygon"
    )
    .expect("writing to Vec cannot fail");

    for record in records {
        let row = RecordRow::from(record);
        writeln!(
            out,
            "{},{},{},{},{},{},{},{}",
            csv_escape(&row.filename),
            csv_escape(&row.checksum),
            csv_cell(row.latitude),
            csv_cell(row.longitude),
            csv_cell(row.altitude),
            csv_cell(row.creation_date),
            csv_cell(row.creation_time),
            csv_cell(row.inside_polygon),
        )
        .expect("writing to Vec cannot fail");
    }

    std::fs::write(path, out)
        .map_err(|e| VerifyError::output_write(path, "cannot write records", e))
}

/// Records whose capture coordinate verifiably fell inside the boundary
pub fn filter_inside(records: &[AssetRecord]) -> Vec<AssetRecord> {
    records
        .iter()
        .filter(|r| r.inside_polygon == Field::Known(true))
        .cloned()
        .collect()
}

/// Annotate a points file with membership verdicts.
///
/// Reads a JSON array of point objects, tests each against the engine,
/// and writes the same array back with an added `inside_polygon` key per
/// object. The objects keep every other key they arrived with.
pub fn annotate_points_file(
    engine: &MembershipEngine,
    points_path: &Path,
    output_path: &Path,
    point_keys: &FieldKeys,
    mode: MembershipMode,
) -> Result<()> {
    let content = std::fs::read_to_string(points_path)
        .map_err(|e| VerifyError::input_read(points_path, "cannot read file", e))?;
    let mut items: Vec<serde_json::Value> = serde_json::from_str(&content)
        .map_err(|e| VerifyError::input_read(points_path, "not a JSON array", e))?;

    for (i, item) in items.iter_mut().enumerate() {
        let point = lon_lat_of(item, point_keys).ok_or_else(|| VerifyError::InputReadError {
            path: points_path.to_path_buf(),
            message: format!(
                "element {i} is missing numeric '{}'/'{}' fields",
                point_keys.lat, point_keys.lon
            ),
            source: None,
        })?;
        let inside = engine.contains(point, mode);

        let obj = item
            .as_object_mut()
            .ok_or_else(|| VerifyError::InputReadError {
                path: points_path.to_path_buf(),
                message: format!("element {i} is not an object"),
                source: None,
            })?;
        obj.insert("inside_polygon".to_string(), serde_json::Value::Bool(inside));
    }

    let json = serde_json::to_string_pretty(&items)
        .map_err(|e| VerifyError::output_write(output_path, "serialization failed", e))?;
    std::fs::write(output_path, json)
        .map_err(|e| VerifyError::output_write(output_path, "cannot write file", e))
}

fn csv_cell<T: ToString>(field: Field<T>) -> String {
    match field {
        Field::Known(v) => v.to_string(),
        Field::Unknown => String::new(),
    }
}

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
