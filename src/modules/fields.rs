//! Helpers for reading loosely-shaped legacy documents.

use bson::{Bson, Document};
use uuid::Uuid;

use crate::error::{MaintenanceError, Result};

/// Validates a UUID argument and returns it as given, so lookups match
/// the stored casing.
pub fn parse_uuid(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    Uuid::parse_str(trimmed).map_err(|_| MaintenanceError::InvalidId(raw.to_string()))?;
    Ok(trimmed.to_string())
}

/// Reads a string id from `_id`, falling back to `id` for documents that
/// were already reshaped.
pub fn string_id(doc: &Document, collection: &'static str) -> Result<String> {
    match doc.get("_id").or_else(|| doc.get("id")) {
        Some(Bson::String(id)) => Ok(id.clone()),
        Some(other) => Err(MaintenanceError::malformed(
            collection,
            format!("expected string id, found {:?}", other.element_type()),
        )),
        None => Err(MaintenanceError::malformed(collection, "missing id")),
    }
}

pub fn string(doc: &Document, key: &str, collection: &'static str) -> Result<String> {
    doc.get_str(key)
        .map(str::to_string)
        .map_err(|_| {
            MaintenanceError::malformed(collection, format!("missing string field '{}'", key))
        })
}

/// Numeric fields may have been written as int32, int64 or double.
pub fn number(doc: &Document, key: &str, collection: &'static str) -> Result<f64> {
    match doc.get(key) {
        Some(Bson::Double(v)) => Ok(*v),
        Some(Bson::Int32(v)) => Ok(f64::from(*v)),
        Some(Bson::Int64(v)) => Ok(*v as f64),
        _ => Err(MaintenanceError::malformed(
            collection,
            format!("missing numeric field '{}'", key),
        )),
    }
}

/// Embedded document array; a missing field reads as empty.
pub fn documents<'a>(
    doc: &'a Document,
    key: &str,
    collection: &'static str,
) -> Result<Vec<&'a Document>> {
    match doc.get(key) {
        None | Some(Bson::Null) => Ok(Vec::new()),
        Some(Bson::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_document().ok_or_else(|| {
                    MaintenanceError::malformed(
                        collection,
                        format!("non-document entry in '{}'", key),
                    )
                })
            })
            .collect(),
        Some(_) => Err(MaintenanceError::malformed(
            collection,
            format!("field '{}' is not an array", key),
        )),
    }
}
