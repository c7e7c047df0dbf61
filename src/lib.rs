//! Radar object log processing.
//!
//! This crate provides tools for:
//! - Loading radar sensor CSV logs into typed column tables
//! - Enumerating the tracked radar objects in a log
//! - Deriving range and radial velocity for every object
//! - Selecting the longest tracked object and plotting it against a reference
//!
//! # Example
//!
//! ```no_run
//! use radar_kinematics::{
//!     core::load_radar_log,
//!     processors::{add_object_kinematics, longest_tracked_object},
//!     FieldSchema,
//! };
//!
//! let schema = FieldSchema::default();
//! let mut table = load_radar_log("motion_away_from_host.csv").unwrap();
//! add_object_kinematics(&mut table, &schema).unwrap();
//! let longest = longest_tracked_object(&table, &schema).unwrap();
//! println!("{}", schema.object_name(longest));
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod processors;
pub mod visualization;

pub use crate::config::{FieldSchema, PipelineConfig, PlotConfig};
pub use crate::core::{ColumnTable, ObjectId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
