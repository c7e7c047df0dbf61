//! Configuration types for the radar log pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid field schema: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Header naming convention of the radar log.
///
/// Every per-object column is named `{object_prefix}[{index}]{suffix}`,
/// e.g. `aObject[3].Kinematic.fDistX`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Prefix shared by all radar object columns
    #[serde(default = "default_object_prefix")]
    pub object_prefix: String,

    /// Longitudinal (x) displacement suffix, also the object count marker
    #[serde(default = "default_x_disp")]
    pub x_disp: String,

    /// Lateral (y) displacement suffix
    #[serde(default = "default_y_disp")]
    pub y_disp: String,

    /// x relative velocity suffix
    #[serde(default = "default_x_vel")]
    pub x_vel: String,

    /// y relative velocity suffix
    #[serde(default = "default_y_vel")]
    pub y_vel: String,

    /// Lifecycle counter suffix
    #[serde(default = "default_life_cycles")]
    pub life_cycles: String,

    /// Suffix of the derived range column (m)
    #[serde(default = "default_range")]
    pub range: String,

    /// Suffix of the derived radial velocity column (kph)
    #[serde(default = "default_radial_velocity")]
    pub radial_velocity: String,

    /// Reference range column (m)
    #[serde(default = "default_reference_range")]
    pub reference_range: String,

    /// Reference velocity column (kph)
    #[serde(default = "default_reference_velocity")]
    pub reference_velocity: String,
}

fn default_object_prefix() -> String {
    "aObject".to_string()
}

fn default_x_disp() -> String {
    ".Kinematic.fDistX".to_string()
}

fn default_y_disp() -> String {
    ".Kinematic.fDistY".to_string()
}

fn default_x_vel() -> String {
    ".Kinematic.fVrelX".to_string()
}

fn default_y_vel() -> String {
    ".Kinematic.fVrelY".to_string()
}

fn default_life_cycles() -> String {
    ".General.uiLifeCycles".to_string()
}

fn default_range() -> String {
    ".Kinematic.fRange".to_string()
}

fn default_radial_velocity() -> String {
    ".Kinematic.fVradKph".to_string()
}

fn default_reference_range() -> String {
    "Reference.fRange".to_string()
}

fn default_reference_velocity() -> String {
    "Reference.fVelocityKph".to_string()
}

impl Default for FieldSchema {
    fn default() -> Self {
        Self {
            object_prefix: default_object_prefix(),
            x_disp: default_x_disp(),
            y_disp: default_y_disp(),
            x_vel: default_x_vel(),
            y_vel: default_y_vel(),
            life_cycles: default_life_cycles(),
            range: default_range(),
            radial_velocity: default_radial_velocity(),
            reference_range: default_reference_range(),
            reference_velocity: default_reference_velocity(),
        }
    }
}

impl FieldSchema {
    /// Check that the suffixes can be used to enumerate and derive objects.
    ///
    /// Objects are counted by headers containing `x_disp`, so no other
    /// suffix may contain it, and all suffixes must be distinct.
    pub fn validate(&self) -> Result<()> {
        if self.object_prefix.is_empty() {
            return Err(ConfigError::Invalid("object prefix is empty".to_string()));
        }

        let suffixes = [
            ("x_disp", &self.x_disp),
            ("y_disp", &self.y_disp),
            ("x_vel", &self.x_vel),
            ("y_vel", &self.y_vel),
            ("life_cycles", &self.life_cycles),
            ("range", &self.range),
            ("radial_velocity", &self.radial_velocity),
        ];

        for (i, (name, suffix)) in suffixes.iter().enumerate() {
            if suffix.is_empty() {
                return Err(ConfigError::Invalid(format!("suffix '{}' is empty", name)));
            }
            if i > 0 && suffix.contains(self.x_disp.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "suffix '{}' ({}) contains the x displacement marker '{}'",
                    name, suffix, self.x_disp
                )));
            }
            if let Some((other, _)) = suffixes[..i].iter().find(|(_, s)| s == suffix) {
                return Err(ConfigError::Invalid(format!(
                    "suffixes '{}' and '{}' are both '{}'",
                    other, name, suffix
                )));
            }
        }

        Ok(())
    }
}

/// Configuration for the range/velocity figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Image width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Image height in pixels (both panels)
    #[serde(default = "default_height")]
    pub height: u32,

    /// RGB color of the radar object series
    #[serde(default = "default_object_color")]
    pub object_color: [u8; 3],

    /// RGB color of the reference series
    #[serde(default = "default_reference_color")]
    pub reference_color: [u8; 3],

    /// Line width of both series
    #[serde(default = "default_stroke_width")]
    pub stroke_width: u32,
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    960
}

fn default_object_color() -> [u8; 3] {
    [55, 126, 184] // blue
}

fn default_reference_color() -> [u8; 3] {
    [228, 26, 28] // red
}

fn default_stroke_width() -> u32 {
    2
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            object_color: default_object_color(),
            reference_color: default_reference_color(),
            stroke_width: default_stroke_width(),
        }
    }
}

/// Main pipeline configuration combining all sub-configs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub fields: FieldSchema,

    #[serde(default)]
    pub plot: PlotConfig,
}

impl PipelineConfig {
    /// Load configuration from a YAML file and validate the field schema.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PipelineConfig = serde_yaml::from_str(&content)?;
        config.fields.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
