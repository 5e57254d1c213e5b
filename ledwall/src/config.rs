//! Wall configuration
//!
//! The single input to the geometry builder and the layout renderer.
//! Loaded from `wall.toml` or assembled by the caller; every field has the
//! default of the classic 36x8 cabinet volume.

use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::atlas::AtlasLayout;
use crate::error::{Result, WallError};

/// Where the column rotations are accumulated from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurvePivot {
    /// Rotations are symmetric about the middle of the wall, so the wall
    /// bows evenly and is mirror symmetric about the YZ plane.
    #[default]
    Center,
    /// Column 0 is unrotated and every further column turns by one more
    /// tilt step. The left edge of the wall sits at the origin.
    Left,
}

impl fmt::Display for CurvePivot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Center => f.write_str("center"),
            Self::Left => f.write_str("left"),
        }
    }
}

/// LED wall configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WallConfig {
    /// Number of cabinet columns
    pub cabinets_wide: u32,
    /// Number of cabinet rows
    pub cabinets_high: u32,
    /// Rotation between adjacent columns in degrees.
    /// Zero gives a flat wall, negative values curve the other way.
    pub tilt_angle_deg: f64,
    /// Physical cabinet width in millimeters
    pub cabinet_width_mm: f64,
    /// Physical cabinet height in millimeters
    pub cabinet_height_mm: f64,
    /// Texture pixels per cabinet, horizontally
    pub tile_width_px: u32,
    /// Texture pixels per cabinet, vertically
    pub tile_height_px: u32,
    /// Rotation accumulation policy
    pub pivot: CurvePivot,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            cabinets_wide: 36,
            cabinets_high: 8,
            tilt_angle_deg: 5.0,
            cabinet_width_mm: 500.0,
            cabinet_height_mm: 500.0,
            tile_width_px: 64,
            tile_height_px: 64,
            pivot: CurvePivot::Center,
        }
    }
}

impl WallConfig {
    /// Parse a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| WallError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load a configuration file.
    ///
    /// The result is not validated; exporters validate before doing any work.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| WallError::io(path, e))?;
        Self::from_toml_str(&text, path)
    }

    /// Check every invariant the builder and renderer rely on.
    pub fn validate(&self) -> Result<()> {
        if self.cabinets_wide == 0 {
            return Err(WallError::invalid("cabinets_wide", "must be at least 1"));
        }
        if self.cabinets_high == 0 {
            return Err(WallError::invalid("cabinets_high", "must be at least 1"));
        }
        check_length("cabinet_width_mm", self.cabinet_width_mm)?;
        check_length("cabinet_height_mm", self.cabinet_height_mm)?;
        if !self.tilt_angle_deg.is_finite() {
            return Err(WallError::invalid(
                "tilt_angle_deg",
                format!("must be finite, got {}", self.tilt_angle_deg),
            ));
        }
        if self.tile_width_px == 0 {
            return Err(WallError::invalid("tile_width_px", "must be at least 1"));
        }
        if self.tile_height_px == 0 {
            return Err(WallError::invalid("tile_height_px", "must be at least 1"));
        }

        if self.cabinets_wide.checked_mul(self.tile_width_px).is_none() {
            return Err(WallError::invalid(
                "tile_width_px",
                format!(
                    "{} x {} px exceeds the maximum image width",
                    self.cabinets_wide, self.tile_width_px
                ),
            ));
        }
        if self.cabinets_high.checked_mul(self.tile_height_px).is_none() {
            return Err(WallError::invalid(
                "tile_height_px",
                format!(
                    "{} x {} px exceeds the maximum image height",
                    self.cabinets_high, self.tile_height_px
                ),
            ));
        }

        let corners = (self.cabinets_wide as u64 + 1) * (self.cabinets_high as u64 + 1);
        if corners > u32::MAX as u64 {
            return Err(WallError::invalid(
                "cabinets_wide",
                format!("grid has {corners} corners, more than a mesh can index"),
            ));
        }

        Ok(())
    }

    /// Total number of cabinets
    pub fn cabinet_count(&self) -> u32 {
        self.cabinets_wide * self.cabinets_high
    }

    /// Tilt between adjacent columns in radians
    pub fn tilt_angle_rad(&self) -> f64 {
        self.tilt_angle_deg.to_radians()
    }

    /// True when the wall has no curvature
    pub fn is_flat(&self) -> bool {
        self.tilt_angle_deg == 0.0 || self.cabinets_wide == 1
    }

    /// Texture atlas layout shared by the mesh UVs and the layout image
    pub fn atlas(&self) -> AtlasLayout {
        AtlasLayout::new(
            self.cabinets_wide,
            self.cabinets_high,
            self.tile_width_px,
            self.tile_height_px,
        )
    }
}

fn check_length(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(WallError::invalid(
            field,
            format!("must be a positive length, got {value}"),
        ))
    }
}
