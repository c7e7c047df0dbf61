//! Range and radial velocity derivation for tracked radar objects.

use log::debug;

use crate::config::FieldSchema;
use crate::core::objects::{object_columns, ObjectColumns};
use crate::core::table::{ColumnTable, Result, TableError};

/// m/s to km/h.
pub const MPS_TO_KPH: f64 = 3.6;

/// Straight-line distance to the object in meters.
#[inline]
pub fn range_m(x_disp: f64, y_disp: f64) -> f64 {
    (x_disp * x_disp + y_disp * y_disp).sqrt()
}

/// Line-of-sight angle in radians, measured from the y axis.
///
/// Note the argument order: `atan2(x, y)`, not `atan2(y, x)`. The radial
/// velocity projection below depends on it.
///
/// At the origin the result follows the sign of zero in `y_disp`:
/// `bearing_rad(0.0, 0.0)` is 0 but `bearing_rad(0.0, -0.0)` is pi, which
/// flips the sign of the radial velocity there.
#[inline]
pub fn bearing_rad(x_disp: f64, y_disp: f64) -> f64 {
    x_disp.atan2(y_disp)
}

/// Radial velocity in km/h. Negative while the object closes in.
#[inline]
pub fn radial_velocity_kph(x_disp: f64, y_disp: f64, x_vel: f64, y_vel: f64) -> f64 {
    let theta = bearing_rad(x_disp, y_disp);
    (y_vel * theta.cos() + x_vel * theta.sin()) * MPS_TO_KPH
}

/// Derived columns of one object.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectKinematics {
    pub range_m: Vec<f64>,
    pub radial_velocity_kph: Vec<f64>,
}

/// Compute range and radial velocity of one object from its source columns.
///
/// Fails with `MissingColumn` if a source column is absent and with
/// `InvalidInput` if the four columns differ in length.
pub fn object_kinematics(table: &ColumnTable, columns: &ObjectColumns) -> Result<ObjectKinematics> {
    let x_disp = table.column(&columns.x_disp)?;
    let y_disp = table.column(&columns.y_disp)?;
    let x_vel = table.column(&columns.x_vel)?;
    let y_vel = table.column(&columns.y_vel)?;

    let n = x_disp.len();
    if y_disp.len() != n || x_vel.len() != n || y_vel.len() != n {
        return Err(TableError::InvalidInput(format!(
            "{}: kinematic columns differ in length ({}, {}, {}, {})",
            columns.name,
            n,
            y_disp.len(),
            x_vel.len(),
            y_vel.len()
        )));
    }

    let mut range = Vec::with_capacity(n);
    let mut radial_velocity = Vec::with_capacity(n);
    for t in 0..n {
        range.push(range_m(x_disp[t], y_disp[t]));
        radial_velocity.push(radial_velocity_kph(x_disp[t], y_disp[t], x_vel[t], y_vel[t]));
    }

    Ok(ObjectKinematics {
        range_m: range,
        radial_velocity_kph: radial_velocity,
    })
}

/// Add range and radial velocity columns for every radar object.
///
/// Derived columns are keyed `{object}{schema.range}` and
/// `{object}{schema.radial_velocity}`. Calling this again recomputes the
/// same keys from the unchanged source columns and replaces them with
/// identical values; nothing else in the table is touched. If any object
/// fails, the objects before it have already been written.
///
/// Returns the columns of the objects that were processed.
pub fn add_object_kinematics(
    table: &mut ColumnTable,
    schema: &FieldSchema,
) -> Result<Vec<ObjectColumns>> {
    let objects = object_columns(table, schema);

    for columns in &objects {
        let derived = object_kinematics(table, columns)?;
        table.insert(columns.range.clone(), derived.range_m)?;
        table.insert(columns.radial_velocity.clone(), derived.radial_velocity_kph)?;
        debug!("Derived range and radial velocity for {}", columns.name);
    }

    Ok(objects)
}
