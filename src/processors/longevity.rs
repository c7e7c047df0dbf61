//! Selection of the radar object tracked for the longest time.

use log::info;

use crate::config::FieldSchema;
use crate::core::objects::{enumerate_objects, ObjectId};
use crate::core::table::{ColumnTable, Result, TableError};

/// Pick the object with the largest lifecycle count.
///
/// Each object is scored by the maximum of its lifecycle sequence; NaN
/// values are skipped. On a tie the first object in iteration order wins.
///
/// # Errors
///
/// `InvalidInput` if there are no objects or an object has no values.
pub fn select_longest<'a, I>(lifecycles: I) -> Result<ObjectId>
where
    I: IntoIterator<Item = (ObjectId, &'a [f64])>,
{
    let mut best: Option<(ObjectId, f64)> = None;

    for (id, cycles) in lifecycles {
        if cycles.is_empty() {
            return Err(TableError::InvalidInput(format!(
                "object {} has no lifecycle values",
                id.index()
            )));
        }

        let max = cycles.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        match best {
            Some((_, best_max)) if max <= best_max => {}
            _ => best = Some((id, max)),
        }
    }

    best.map(|(id, _)| id)
        .ok_or_else(|| TableError::InvalidInput("no radar objects to select from".to_string()))
}

/// Find the longest tracked radar object in the table.
///
/// # Errors
///
/// `InvalidInput` if the table holds no radar objects or has no time steps,
/// `MissingColumn` if an object lacks its lifecycle column.
pub fn longest_tracked_object(table: &ColumnTable, schema: &FieldSchema) -> Result<ObjectId> {
    let objects = enumerate_objects(table, schema);

    let mut lifecycles = Vec::with_capacity(objects.len());
    for id in objects {
        let key = schema.object_columns(id).life_cycles;
        lifecycles.push((id, table.column(&key)?));
    }

    let longest = select_longest(lifecycles)?;
    info!("Longest tracked radar object: {}", schema.object_name(longest));
    Ok(longest)
}
