//! Physical and pixel statistics of a wall

use std::fmt;

use crate::config::WallConfig;
use crate::error::Result;
use crate::geometry::{build_geometry, WallGeometry};

/// Dimensions report for a wall
#[derive(Debug, Clone, PartialEq)]
pub struct WallSummary {
    /// Width measured along the cabinets
    pub arc_length_mm: f64,
    /// Straight-line distance between the bottom corners of the outer edges
    pub chord_length_mm: f64,
    pub height_mm: f64,
    /// Radius of the circle through every column boundary, `None` when flat
    pub radius_mm: Option<f64>,
    /// Rotation between the first and last column
    pub total_turn_deg: f64,
    /// Atlas resolution in pixels
    pub resolution: (u32, u32),
    pub cabinet_count: u32,
    pub pixel_count: u64,
    /// Physical width over height
    pub aspect_ratio: f64,
}

impl WallSummary {
    /// Validate, build and measure a wall
    pub fn from_config(config: &WallConfig) -> Result<Self> {
        let geometry = build_geometry(config)?;
        Ok(Self::measure(config, &geometry))
    }

    /// Measure a wall that has already been built from `config`
    fn measure(config: &WallConfig, geometry: &WallGeometry) -> Self {
        let arc_length_mm = config.cabinets_wide as f64 * config.cabinet_width_mm;
        let height_mm = config.cabinets_high as f64 * config.cabinet_height_mm;

        let left = geometry.positions[geometry.corner_index(0, 0) as usize];
        let right = geometry.positions[geometry.corner_index(config.cabinets_wide, 0) as usize];
        let chord_length_mm = left.distance(right);

        let half_tilt = (config.tilt_angle_rad() / 2.0).sin().abs();
        let radius_mm = if config.is_flat() || half_tilt < 1e-12 {
            None
        } else {
            Some(config.cabinet_width_mm / (2.0 * half_tilt))
        };

        let resolution = config.atlas().image_size();

        Self {
            arc_length_mm,
            chord_length_mm,
            height_mm,
            radius_mm,
            total_turn_deg: (config.cabinets_wide - 1) as f64 * config.tilt_angle_deg,
            resolution,
            cabinet_count: config.cabinet_count(),
            pixel_count: resolution.0 as u64 * resolution.1 as u64,
            aspect_ratio: arc_length_mm / height_mm,
        }
    }
}

impl fmt::Display for WallSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Wall Dimensions:")?;
        writeln!(f, "  Arc Length: {:.2}m", self.arc_length_mm / 1000.0)?;
        writeln!(f, "  Chord Length: {:.2}m", self.chord_length_mm / 1000.0)?;
        writeln!(f, "  Height: {:.2}m", self.height_mm / 1000.0)?;
        match self.radius_mm {
            Some(radius) => writeln!(f, "  Radius: {:.2}m", radius / 1000.0)?,
            None => writeln!(f, "  Radius: flat")?,
        }
        writeln!(f, "  Curve Angle: {:.2} deg", self.total_turn_deg)?;
        writeln!(
            f,
            "Total Resolution: {}px x {}px",
            self.resolution.0, self.resolution.1
        )?;
        writeln!(f, "Total Cabinets: {}", self.cabinet_count)?;
        writeln!(f, "Total Pixels: {}", group_thousands(self.pixel_count))?;
        write!(f, "Aspect Ratio: {:.2}", self.aspect_ratio)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
