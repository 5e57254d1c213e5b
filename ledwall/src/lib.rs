//! LED wall geometry and export
//!
//! Builds the 3D surface of a modular LED video wall, a grid of rigid
//! rectangular cabinets optionally curved by a fixed tilt between adjacent
//! columns, and exports it as
//!
//! - a welded, UV-mapped quad mesh in Wavefront OBJ format, and
//! - a PNG layout image that labels every cabinet's cell of the texture atlas.
//!
//! Both exports are pure functions of a [`WallConfig`] and share the
//! [`AtlasLayout`], so the test image always lands on the right cabinets
//! when applied to the mesh.
//!
//! # Example
//!
//! ```no_run
//! use ledwall::{export_layout, export_obj, ObjOptions, WallConfig};
//! use std::path::Path;
//!
//! let config = WallConfig {
//!     cabinets_wide: 4,
//!     cabinets_high: 2,
//!     ..Default::default()
//! };
//! export_obj(&config, &ObjOptions::default(), Path::new("wall.obj")).unwrap();
//! export_layout(&config, Path::new("wall_layout.png")).unwrap();
//! ```

pub mod atlas;
pub mod config;
pub mod error;
pub mod font;
pub mod geometry;
pub mod layout;
pub mod obj;
mod output;
pub mod summary;

pub use atlas::{AtlasLayout, Cabinet, PixelRect, UvRect};
pub use config::{CurvePivot, WallConfig};
pub use error::{Result, WallError};
pub use geometry::{build_geometry, CabinetFace, WallGeometry};
pub use layout::{export_layout, render_layout, write_layout_png};
pub use obj::{export_obj, write_obj, write_obj_to, MeshUnits, ObjOptions};
pub use summary::WallSummary;
