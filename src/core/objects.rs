//! Radar object enumeration and per-object column lookup.

use log::debug;

use super::table::{ColumnTable, Result, TableError};
use crate::config::FieldSchema;

/// Index of a tracked radar object in the log, starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub usize);

impl ObjectId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    /// Object name under the given prefix, e.g. `aObject[3]`.
    pub fn name(self, prefix: &str) -> String {
        format!("{}[{}]", prefix, self.0)
    }
}

/// Column keys owned by one radar object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectColumns {
    pub id: ObjectId,
    pub name: String,
    pub x_disp: String,
    pub y_disp: String,
    pub x_vel: String,
    pub y_vel: String,
    pub life_cycles: String,
    /// Derived
    pub range: String,
    /// Derived
    pub radial_velocity: String,
}

impl ObjectColumns {
    /// Columns that must come from the log.
    pub fn required(&self) -> [&str; 5] {
        [
            self.x_disp.as_str(),
            self.y_disp.as_str(),
            self.x_vel.as_str(),
            self.y_vel.as_str(),
            self.life_cycles.as_str(),
        ]
    }
}

impl FieldSchema {
    /// Name of an object, e.g. `aObject[3]`.
    pub fn object_name(&self, id: ObjectId) -> String {
        id.name(&self.object_prefix)
    }

    /// Resolve every column key of one object.
    pub fn object_columns(&self, id: ObjectId) -> ObjectColumns {
        let name = self.object_name(id);
        let key = |suffix: &str| format!("{}{}", name, suffix);
        ObjectColumns {
            id,
            x_disp: key(&self.x_disp),
            y_disp: key(&self.y_disp),
            x_vel: key(&self.x_vel),
            y_vel: key(&self.y_vel),
            life_cycles: key(&self.life_cycles),
            range: key(&self.range),
            radial_velocity: key(&self.radial_velocity),
            name,
        }
    }
}

/// List the radar objects present in the table.
///
/// The object count is the number of headers containing the x displacement
/// suffix; ids run from 0 to that count. No objects is a valid result.
pub fn enumerate_objects(table: &ColumnTable, schema: &FieldSchema) -> Vec<ObjectId> {
    let count = table
        .headers()
        .filter(|header| header.contains(schema.x_disp.as_str()))
        .count();
    debug!("Found {} radar objects", count);
    (0..count).map(ObjectId).collect()
}

/// Enumerate objects and resolve their column keys.
pub fn object_columns(table: &ColumnTable, schema: &FieldSchema) -> Vec<ObjectColumns> {
    enumerate_objects(table, schema)
        .into_iter()
        .map(|id| schema.object_columns(id))
        .collect()
}

/// Check that every enumerated object has all of its required columns.
///
/// Fails with `MissingColumn` naming the first absent key.
pub fn require_object_columns(table: &ColumnTable, schema: &FieldSchema) -> Result<()> {
    for columns in object_columns(table, schema) {
        if let Some(missing) = columns.required().iter().find(|key| !table.contains(key)) {
            return Err(TableError::MissingColumn(missing.to_string()));
        }
    }
    Ok(())
}
