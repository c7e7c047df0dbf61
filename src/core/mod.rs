//! Core data types and I/O operations.

pub mod loaders;
pub mod objects;
pub mod table;

pub use loaders::{load_radar_log, LoaderError};
pub use objects::{enumerate_objects, require_object_columns, ObjectColumns, ObjectId};
pub use table::{ColumnTable, TableError};
