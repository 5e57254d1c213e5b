//! Wall options shared by every command
//!
//! Values come from `wall.toml` when `--config` is given, then individual
//! flags override single fields.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use ledwall::{CurvePivot, MeshUnits, ObjOptions, WallConfig};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct WallArgs {
    /// Path to a wall.toml config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of cabinets horizontally
    #[arg(long, global = true)]
    pub cabinets_wide: Option<u32>,

    /// Number of cabinets vertically
    #[arg(long, global = true)]
    pub cabinets_high: Option<u32>,

    /// Tilt angle between columns in degrees
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub tilt: Option<f64>,

    /// Cabinet width in millimeters
    #[arg(long, global = true)]
    pub cabinet_width: Option<f64>,

    /// Cabinet height in millimeters
    #[arg(long, global = true)]
    pub cabinet_height: Option<f64>,

    /// Texture width of each cabinet in pixels
    #[arg(long, global = true)]
    pub tile_width: Option<u32>,

    /// Texture height of each cabinet in pixels
    #[arg(long, global = true)]
    pub tile_height: Option<u32>,

    /// Where column rotations accumulate from
    #[arg(long, value_enum, global = true)]
    pub pivot: Option<PivotArg>,
}

impl WallArgs {
    /// Build the effective configuration. Validation is left to the exporters.
    pub fn resolve(&self) -> Result<WallConfig> {
        let mut config = match &self.config {
            Some(path) => WallConfig::load(path)
                .with_context(|| format!("Failed to load wall config {:?}", path))?,
            None => WallConfig::default(),
        };

        if let Some(value) = self.cabinets_wide {
            config.cabinets_wide = value;
        }
        if let Some(value) = self.cabinets_high {
            config.cabinets_high = value;
        }
        if let Some(value) = self.tilt {
            config.tilt_angle_deg = value;
        }
        if let Some(value) = self.cabinet_width {
            config.cabinet_width_mm = value;
        }
        if let Some(value) = self.cabinet_height {
            config.cabinet_height_mm = value;
        }
        if let Some(value) = self.tile_width {
            config.tile_width_px = value;
        }
        if let Some(value) = self.tile_height {
            config.tile_height_px = value;
        }
        if let Some(value) = self.pivot {
            config.pivot = value.into();
        }

        Ok(config)
    }
}

/// Mesh output options
#[derive(Args, Debug, Default)]
pub struct MeshArgs {
    /// Unit of the exported positions
    #[arg(short, long, value_enum, default_value_t = UnitsArg::Mm)]
    pub units: UnitsArg,

    /// Omit vertex normals
    #[arg(long)]
    pub no_normals: bool,
}

impl MeshArgs {
    pub fn options(&self) -> ObjOptions {
        ObjOptions {
            units: self.units.into(),
            normals: !self.no_normals,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PivotArg {
    /// Symmetric about the middle column
    Center,
    /// Accumulated from the leftmost column
    Left,
}

impl From<PivotArg> for CurvePivot {
    fn from(value: PivotArg) -> Self {
        match value {
            PivotArg::Center => CurvePivot::Center,
            PivotArg::Left => CurvePivot::Left,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnitsArg {
    /// Millimeters, as entered
    #[default]
    #[value(alias = "millimeters")]
    Mm,
    /// Meters
    #[value(name = "m", alias = "meters")]
    M,
}

impl From<UnitsArg> for MeshUnits {
    fn from(value: UnitsArg) -> Self {
        match value {
            UnitsArg::Mm => MeshUnits::Millimeters,
            UnitsArg::M => MeshUnits::Meters,
        }
    }
}
