//! Data processing modules.

pub mod kinematics;
pub mod longevity;
pub mod summary;

// Re-export key types for convenience
pub use kinematics::{add_object_kinematics, object_kinematics, ObjectKinematics, MPS_TO_KPH};
pub use longevity::{longest_tracked_object, select_longest};
pub use summary::TableSummary;
