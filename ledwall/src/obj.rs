//! Wavefront OBJ export
//!
//! Layout of the written file:
//!
//! ```text
//! # comment header with the wall configuration
//! o led_wall
//! v  x y z        one per corner, in geometry order
//! vt u v          one per corner, same order
//! vn x y z        one per corner, same order (optional)
//! f  v/vt/vn ...  one quad per cabinet
//! ```
//!
//! OBJ indices are 1-based, so every corner index is written as `index + 1`.
//! Position, UV and normal share one index because the geometry keeps them
//! in lockstep.

use std::io::Write;
use std::path::Path;

use crate::config::WallConfig;
use crate::error::{Result, WallError};
use crate::geometry::{build_geometry, WallGeometry};
use crate::output::write_atomically;

/// Object name written on the `o` line
pub const OBJECT_NAME: &str = "led_wall";

/// Unit of the exported positions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MeshUnits {
    /// Same unit as the cabinet dimensions
    #[default]
    Millimeters,
    /// Scaled by 0.001, for engines that work in meters
    Meters,
}

impl MeshUnits {
    /// Uniform factor applied to every position
    pub fn scale(self) -> f64 {
        match self {
            Self::Millimeters => 1.0,
            Self::Meters => 0.001,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Millimeters => "millimeters",
            Self::Meters => "meters",
        }
    }
}

/// OBJ export options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjOptions {
    pub units: MeshUnits,
    /// Write `vn` records and reference them from faces
    pub normals: bool,
}

impl Default for ObjOptions {
    fn default() -> Self {
        Self {
            units: MeshUnits::Millimeters,
            normals: true,
        }
    }
}

/// Serialize a built wall as OBJ text.
///
/// `geometry` must have been built from `config`; the header comments are
/// taken from the configuration.
pub fn write_obj_to<W: Write>(
    geometry: &WallGeometry,
    config: &WallConfig,
    options: &ObjOptions,
    w: &mut W,
) -> std::io::Result<()> {
    debug_assert_eq!(
        geometry.face_count(),
        config.cabinet_count() as usize,
        "geometry was built from a different configuration"
    );
    debug_assert_eq!(
        geometry.vertex_count(),
        (config.cabinets_wide as usize + 1) * (config.cabinets_high as usize + 1),
        "geometry was built from a different configuration"
    );
    let (image_width, image_height) = config.atlas().image_size();

    writeln!(w, "# LED wall mesh")?;
    writeln!(
        w,
        "# cabinets: {} x {}, tilt: {} deg, pivot: {}",
        config.cabinets_wide, config.cabinets_high, config.tilt_angle_deg, config.pivot
    )?;
    writeln!(
        w,
        "# cabinet size: {} x {} mm, units: {}",
        config.cabinet_width_mm,
        config.cabinet_height_mm,
        options.units.name()
    )?;
    writeln!(
        w,
        "# texture: {} x {} px ({} x {} px per cabinet)",
        image_width, image_height, config.tile_width_px, config.tile_height_px
    )?;
    writeln!(
        w,
        "# {} vertices, {} faces",
        geometry.vertex_count(),
        geometry.face_count()
    )?;
    writeln!(w, "o {OBJECT_NAME}")?;

    let scale = options.units.scale();
    for p in &geometry.positions {
        let p = *p * scale;
        writeln!(w, "v {} {} {}", coord(p.x), coord(p.y), coord(p.z))?;
    }
    for uv in &geometry.uvs {
        writeln!(w, "vt {} {}", coord(uv.x), coord(uv.y))?;
    }
    if options.normals {
        for n in &geometry.normals {
            writeln!(w, "vn {} {} {}", coord(n.x), coord(n.y), coord(n.z))?;
        }
    }

    for face in &geometry.faces {
        w.write_all(b"f")?;
        for corner in face.corners {
            let i = corner as u64 + 1;
            if options.normals {
                write!(w, " {i}/{i}/{i}")?;
            } else {
                write!(w, " {i}/{i}")?;
            }
        }
        w.write_all(b"\n")?;
    }

    Ok(())
}

/// Write a built wall to an OBJ file. `geometry` must come from `config`.
pub fn write_obj(
    geometry: &WallGeometry,
    config: &WallConfig,
    options: &ObjOptions,
    path: &Path,
) -> Result<()> {
    write_atomically(path, |w| {
        write_obj_to(geometry, config, options, w).map_err(|e| WallError::io(path, e))
    })?;

    tracing::info!(
        "Wrote OBJ mesh {:?}: {} vertices, {} faces, {}",
        path,
        geometry.vertex_count(),
        geometry.face_count(),
        options.units.name()
    );
    Ok(())
}

/// Validate, build and write in one step. Nothing is written when the
/// configuration is invalid.
pub fn export_obj(config: &WallConfig, options: &ObjOptions, path: &Path) -> Result<WallGeometry> {
    let geometry = build_geometry(config)?;
    write_obj(&geometry, config, options, path)?;
    Ok(geometry)
}

/// Fixed six-decimal formatting without negative zero
fn coord(value: f64) -> String {
    let text = format!("{value:.6}");
    match text.strip_prefix('-') {
        Some(magnitude) if magnitude.bytes().all(|b| b == b'0' || b == b'.') => {
            magnitude.to_string()
        }
        _ => text,
    }
}
