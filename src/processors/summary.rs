//! Overview of a loaded radar log.

use crate::config::FieldSchema;
use crate::core::objects::{enumerate_objects, ObjectId};
use crate::core::table::{ColumnTable, Result};
use crate::processors::longevity::longest_tracked_object;

/// Header, object and time step counts of a log.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSummary {
    pub num_headers: usize,
    pub num_objects: usize,
    pub num_time_steps: usize,
    /// `None` when the log has no radar objects.
    pub longest_tracked: Option<ObjectId>,
}

impl TableSummary {
    pub fn from_table(table: &ColumnTable, schema: &FieldSchema) -> Result<Self> {
        let num_objects = enumerate_objects(table, schema).len();
        let longest_tracked = if num_objects > 0 {
            Some(longest_tracked_object(table, schema)?)
        } else {
            None
        };

        Ok(Self {
            num_headers: table.num_columns(),
            num_objects,
            num_time_steps: table.num_rows(),
            longest_tracked,
        })
    }
}
