//! Wall geometry builder
//!
//! Builds a welded quad mesh of the wall: one vertex per cabinet corner, one
//! quad per cabinet. Each cabinet column is a rigid flat strip rotated about
//! the vertical axis; adjacent columns meet edge to edge and differ by
//! exactly the configured tilt angle.
//!
//! Frame: X right, Y up, +Z toward the audience, millimeters.

use glam::{DMat3, DVec2, DVec3};

use crate::atlas::{AtlasLayout, Cabinet};
use crate::config::{CurvePivot, WallConfig};
use crate::error::Result;

/// One cabinet's quad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CabinetFace {
    pub cabinet: Cabinet,
    /// Corner indices: bottom-left, bottom-right, top-right, top-left.
    /// Counter-clockwise seen from the audience. The same indices address
    /// positions, UVs and normals.
    pub corners: [u32; 4],
}

/// Generated wall mesh
#[derive(Debug, Clone)]
pub struct WallGeometry {
    /// Corner positions, column-major, bottom-to-top within a column
    pub positions: Vec<DVec3>,
    /// Atlas UVs, same order as `positions`
    pub uvs: Vec<DVec2>,
    /// Unit normals facing the audience, same order as `positions`
    pub normals: Vec<DVec3>,
    /// One face per cabinet, column-major, top row first
    pub faces: Vec<CabinetFace>,
    cabinets_wide: u32,
    cabinets_high: u32,
}

impl WallGeometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Index of grid corner `(column, level)`; level 0 is the bottom edge
    pub fn corner_index(&self, column: u32, level: u32) -> u32 {
        debug_assert!(column <= self.cabinets_wide && level <= self.cabinets_high);
        column * (self.cabinets_high + 1) + level
    }

    /// Face of a cabinet
    pub fn face(&self, cabinet: Cabinet) -> Option<&CabinetFace> {
        if cabinet.column >= self.cabinets_wide || cabinet.row >= self.cabinets_high {
            return None;
        }
        self.faces
            .get((cabinet.column * self.cabinets_high + cabinet.row) as usize)
    }

    /// Corner positions of a face in face order
    pub fn face_positions(&self, face: &CabinetFace) -> [DVec3; 4] {
        face.corners.map(|i| self.positions[i as usize])
    }

    /// Geometric normal of a face from its winding
    pub fn face_normal(&self, face: &CabinetFace) -> DVec3 {
        let [bl, br, _, tl] = self.face_positions(face);
        (br - bl).cross(tl - bl).normalize_or_zero()
    }

    /// Axis-aligned bounds (min, max)
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        self.positions.iter().fold(
            (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        )
    }
}

/// Rotation of every column about the vertical axis, in radians
pub(crate) fn column_angles(config: &WallConfig) -> Vec<f64> {
    let tilt = config.tilt_angle_rad();
    let offset = match config.pivot {
        CurvePivot::Center => (config.cabinets_wide - 1) as f64 / 2.0,
        CurvePivot::Left => 0.0,
    };
    (0..config.cabinets_wide)
        .map(|column| (column as f64 - offset) * tilt)
        .collect()
}

/// Rigid transform of a column: maps +X to the column's run direction and
/// +Z to its audience-facing normal.
fn column_rotation(theta: f64) -> DMat3 {
    DMat3::from_rotation_y(-theta)
}

/// Bottom points of every column boundary, left to right
fn column_boundaries(config: &WallConfig, rotations: &[DMat3]) -> Vec<DVec3> {
    let mut boundaries = Vec::with_capacity(rotations.len() + 1);
    let mut point = DVec3::ZERO;
    boundaries.push(point);
    for rotation in rotations {
        point += *rotation * DVec3::X * config.cabinet_width_mm;
        boundaries.push(point);
    }

    if config.pivot == CurvePivot::Center {
        // Put the middle of the wall's width on the origin
        let columns = rotations.len();
        let middle = if columns % 2 == 0 {
            boundaries[columns / 2]
        } else {
            let center = &rotations[columns / 2];
            boundaries[columns / 2] + *center * DVec3::X * (config.cabinet_width_mm * 0.5)
        };
        for point in &mut boundaries {
            *point -= middle;
        }
    }

    boundaries
}

/// Build the wall mesh for a configuration
pub fn build_geometry(config: &WallConfig) -> Result<WallGeometry> {
    config.validate()?;

    let atlas: AtlasLayout = config.atlas();
    let wide = config.cabinets_wide;
    let high = config.cabinets_high;

    let rotations: Vec<DMat3> = column_angles(config)
        .into_iter()
        .map(column_rotation)
        .collect();
    let column_normals: Vec<DVec3> = rotations.iter().map(|r| *r * DVec3::Z).collect();
    let boundaries = column_boundaries(config, &rotations);

    let corner_count = ((wide + 1) * (high + 1)) as usize;
    let mut positions = Vec::with_capacity(corner_count);
    let mut uvs = Vec::with_capacity(corner_count);
    let mut normals = Vec::with_capacity(corner_count);

    for (column, base) in boundaries.iter().enumerate() {
        let column = column as u32;
        let normal = boundary_normal(&column_normals, column as usize);
        for level in 0..=high {
            let lift = DVec3::Y * (level as f64 * config.cabinet_height_mm);
            positions.push(*base + lift);
            uvs.push(atlas.corner_uv(column, level));
            normals.push(normal);
        }
    }

    let index = |column: u32, level: u32| column * (high + 1) + level;
    let faces: Vec<CabinetFace> = atlas
        .cabinets()
        .map(|cabinet| {
            let column = cabinet.column;
            let bottom = atlas.bottom_level(cabinet);
            CabinetFace {
                cabinet,
                corners: [
                    index(column, bottom),
                    index(column + 1, bottom),
                    index(column + 1, bottom + 1),
                    index(column, bottom + 1),
                ],
            }
        })
        .collect();

    tracing::debug!(
        vertices = positions.len(),
        faces = faces.len(),
        tilt_deg = config.tilt_angle_deg,
        pivot = %config.pivot,
        "Built LED wall geometry"
    );

    Ok(WallGeometry {
        positions,
        uvs,
        normals,
        faces,
        cabinets_wide: wide,
        cabinets_high: high,
    })
}

/// Normal at a column boundary: the blend of the columns on either side
fn boundary_normal(column_normals: &[DVec3], boundary: usize) -> DVec3 {
    let right = column_normals.get(boundary).copied();
    let left = boundary
        .checked_sub(1)
        .and_then(|i| column_normals.get(i))
        .copied();
    match (left, right) {
        (Some(l), Some(r)) => {
            let sum = l + r;
            // Opposed columns cancel to rounding noise
            if sum.length_squared() < 1e-12 {
                r
            } else {
                sum.normalize()
            }
        }
        (Some(n), None) | (None, Some(n)) => n,
        (None, None) => DVec3::Z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn example() -> WallConfig {
        WallConfig {
            cabinets_wide: 4,
            cabinets_high: 2,
            tilt_angle_deg: 5.0,
            cabinet_width_mm: 500.0,
            cabinet_height_mm: 500.0,
            tile_width_px: 128,
            tile_height_px: 128,
            pivot: CurvePivot::Center,
        }
    }

    fn configs() -> Vec<WallConfig> {
        let mut out = Vec::new();
        for (wide, high) in [(1, 1), (1, 5), (2, 1), (3, 3), (4, 2), (7, 4), (36, 8)] {
            for tilt in [0.0, 2.5, -7.5, 30.0] {
                for pivot in [CurvePivot::Center, CurvePivot::Left] {
                    out.push(WallConfig {
                        cabinets_wide: wide,
                        cabinets_high: high,
                        tilt_angle_deg: tilt,
                        cabinet_width_mm: 600.0,
                        cabinet_height_mm: 337.5,
                        tile_width_px: 32,
                        tile_height_px: 18,
                        pivot,
                    });
                }
            }
        }
        out
    }

    fn close(a: DVec3, b: DVec3, scale: f64) -> bool {
        (a - b).length() <= EPS * scale.max(1.0)
    }

    #[test]
    fn test_example_counts() {
        let geometry = build_geometry(&example()).unwrap();
        assert_eq!(geometry.vertex_count(), 15);
        assert_eq!(geometry.uvs.len(), 15);
        assert_eq!(geometry.normals.len(), 15);
        assert_eq!(geometry.face_count(), 8);
    }

    #[test]
    fn test_counts_for_all_grids() {
        for config in configs() {
            let geometry = build_geometry(&config).unwrap();
            let corners = ((config.cabinets_wide + 1) * (config.cabinets_high + 1)) as usize;
            assert_eq!(geometry.vertex_count(), corners);
            assert_eq!(geometry.uvs.len(), corners);
            assert_eq!(geometry.normals.len(), corners);
            assert_eq!(geometry.face_count(), config.cabinet_count() as usize);
            for face in &geometry.faces {
                assert!(face.corners.iter().all(|&i| (i as usize) < corners));
            }
        }
    }

    #[test]
    fn test_flat_wall_is_coplanar() {
        for config in configs().into_iter().filter(|c| c.tilt_angle_deg == 0.0) {
            let geometry = build_geometry(&config).unwrap();
            let mean = geometry.positions.iter().map(|p| p.z).sum::<f64>()
                / geometry.vertex_count() as f64;
            let deviation = geometry
                .positions
                .iter()
                .map(|p| (p.z - mean).abs())
                .fold(0.0, f64::max);
            assert!(deviation <= EPS, "deviation {deviation} for {config:?}");
            assert!(geometry.normals.iter().all(|n| *n == DVec3::Z));
        }
    }

    #[test]
    fn test_flat_wall_layout() {
        let config = WallConfig {
            tilt_angle_deg: 0.0,
            ..example()
        };
        let geometry = build_geometry(&config).unwrap();
        let (min, max) = geometry.bounding_box();
        assert!(close(min, DVec3::new(-1000.0, 0.0, 0.0), 1000.0));
        assert!(close(max, DVec3::new(1000.0, 1000.0, 0.0), 1000.0));
    }

    #[test]
    fn test_shared_corners_are_welded() {
        for config in configs() {
            let geometry = build_geometry(&config).unwrap();
            for face in &geometry.faces {
                let Cabinet { column, row } = face.cabinet;
                if let Some(right) = geometry.face(Cabinet::new(column + 1, row)) {
                    // Our right edge is their left edge
                    assert_eq!(face.corners[1], right.corners[0]);
                    assert_eq!(face.corners[2], right.corners[3]);
                    let ours = geometry.positions[face.corners[1] as usize];
                    let theirs = geometry.positions[right.corners[0] as usize];
                    assert_eq!(
                        ours.to_array().map(f64::to_bits),
                        theirs.to_array().map(f64::to_bits)
                    );
                }
                if let Some(below) = geometry.face(Cabinet::new(column, row + 1)) {
                    assert_eq!(face.corners[0], below.corners[3]);
                    assert_eq!(face.corners[1], below.corners[2]);
                }
            }
        }
    }

    #[test]
    fn test_columns_keep_physical_size() {
        for config in configs() {
            let geometry = build_geometry(&config).unwrap();
            for face in &geometry.faces {
                let [bl, br, tr, tl] = geometry.face_positions(face);
                let width = config.cabinet_width_mm;
                let height = config.cabinet_height_mm;
                assert!(((br - bl).length() - width).abs() <= EPS * width);
                assert!(((tr - tl).length() - width).abs() <= EPS * width);
                assert!(((tl - bl).length() - height).abs() <= EPS * height);
                // Rectangular, hence planar
                assert!((br - bl).dot(tl - bl).abs() <= EPS * width * height);
                assert!(close(tr, br + (tl - bl), width));
            }
        }
    }

    #[test]
    fn test_adjacent_columns_differ_by_tilt() {
        for config in configs() {
            let geometry = build_geometry(&config).unwrap();
            for column in 0..config.cabinets_wide.saturating_sub(1) {
                let left = geometry.face(Cabinet::new(column, 0)).unwrap();
                let right = geometry.face(Cabinet::new(column + 1, 0)).unwrap();
                let a = geometry.face_normal(left);
                let b = geometry.face_normal(right);
                // Signed turn about +Y from left column to right column
                let turn = a.cross(b).y.atan2(a.dot(b));
                assert!(
                    (turn + config.tilt_angle_rad()).abs() < 1e-9,
                    "turn {turn} for {config:?}"
                );
            }
        }
    }

    #[test]
    fn test_positive_tilt_wraps_toward_audience() {
        let geometry = build_geometry(&example()).unwrap();
        let left = geometry.positions[geometry.corner_index(0, 0) as usize];
        let right = geometry.positions[geometry.corner_index(4, 0) as usize];
        let middle = geometry.positions[geometry.corner_index(2, 0) as usize];
        assert!(left.z > 0.0 && right.z > 0.0);
        assert!(close(middle, DVec3::ZERO, 1.0));

        let negative = WallConfig {
            tilt_angle_deg: -5.0,
            ..example()
        };
        let geometry = build_geometry(&negative).unwrap();
        assert!(geometry.positions[0].z < 0.0);
    }

    #[test]
    fn test_center_pivot_is_mirror_symmetric() {
        for config in configs()
            .into_iter()
            .filter(|c| c.pivot == CurvePivot::Center)
        {
            let geometry = build_geometry(&config).unwrap();
            let wide = config.cabinets_wide;
            let scale = config.cabinet_width_mm * wide as f64;
            for column in 0..=wide {
                for level in 0..=config.cabinets_high {
                    let p = geometry.positions[geometry.corner_index(column, level) as usize];
                    let mirror = geometry.corner_index(wide - column, level);
                    let q = geometry.positions[mirror as usize];
                    assert!(
                        close(p, DVec3::new(-q.x, q.y, q.z), scale),
                        "{p} vs {q} for {config:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_odd_center_column_is_unrotated() {
        let config = WallConfig {
            cabinets_wide: 5,
            ..example()
        };
        let geometry = build_geometry(&config).unwrap();
        let bottom_row = config.cabinets_high - 1;
        let face = geometry.face(Cabinet::new(2, bottom_row)).unwrap();
        let [bl, br, _, _] = geometry.face_positions(face);
        assert!(close(bl, DVec3::new(-250.0, 0.0, 0.0), 1000.0));
        assert!(close(br, DVec3::new(250.0, 0.0, 0.0), 1000.0));
    }

    #[test]
    fn test_left_pivot_starts_at_origin() {
        let config = WallConfig {
            pivot: CurvePivot::Left,
            ..example()
        };
        let geometry = build_geometry(&config).unwrap();
        assert_eq!(geometry.positions[0], DVec3::ZERO);
        let first_right = geometry.positions[geometry.corner_index(1, 0) as usize];
        assert!(close(first_right, DVec3::new(500.0, 0.0, 0.0), 500.0));
        assert_eq!(geometry.normals[0], DVec3::Z);
    }

    #[test]
    fn test_boundaries_lie_on_circle() {
        let config = WallConfig {
            cabinets_wide: 9,
            tilt_angle_deg: 10.0,
            ..example()
        };
        let half = config.tilt_angle_rad() / 2.0;
        let radius = config.cabinet_width_mm / (2.0 * half.sin());
        let geometry = build_geometry(&config).unwrap();

        // The middle column faces +Z and is centered on the origin, so the
        // circle's center sits one apothem in front of it
        let center = DVec3::new(0.0, 0.0, radius * half.cos());
        for column in 0..=config.cabinets_wide {
            let p = geometry.positions[geometry.corner_index(column, 0) as usize];
            assert!(((p - center).length() - radius).abs() < 1e-6);
        }
    }

    #[test]
    fn test_winding_faces_audience() {
        for config in configs()
            .into_iter()
            .filter(|c| c.tilt_angle_deg.abs() < 90.0)
        {
            let geometry = build_geometry(&config).unwrap();
            for face in &geometry.faces {
                let normal = geometry.face_normal(face);
                for &corner in &face.corners {
                    assert!(normal.dot(geometry.normals[corner as usize]) > 0.0);
                }
            }
        }
    }

    #[test]
    fn test_uvs_follow_vertex_order() {
        let config = example();
        let geometry = build_geometry(&config).unwrap();
        let atlas = config.atlas();
        for column in 0..=config.cabinets_wide {
            for level in 0..=config.cabinets_high {
                let i = geometry.corner_index(column, level) as usize;
                assert_eq!(geometry.uvs[i], atlas.corner_uv(column, level));
            }
        }
        for face in &geometry.faces {
            let uv = atlas.cell_uv_rect(face.cabinet);
            assert_eq!(geometry.uvs[face.corners[0] as usize], uv.min);
            assert_eq!(geometry.uvs[face.corners[2] as usize], uv.max);
            for &corner in &face.corners {
                let p = geometry.uvs[corner as usize];
                assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y));
            }
        }
    }

    #[test]
    fn test_top_row_is_row_zero() {
        let geometry = build_geometry(&example()).unwrap();
        let top = geometry.face(Cabinet::new(0, 0)).unwrap();
        let bottom = geometry.face(Cabinet::new(0, 1)).unwrap();
        assert_eq!(geometry.face_positions(top)[3].y, 1000.0);
        assert_eq!(geometry.face_positions(bottom)[0].y, 0.0);
    }

    #[test]
    fn test_degenerate_tilt_still_builds() {
        for tilt in [180.0, -360.0, 725.0] {
            let config = WallConfig {
                tilt_angle_deg: tilt,
                ..example()
            };
            let geometry = build_geometry(&config).unwrap();
            assert_eq!(geometry.vertex_count(), 15);
            assert!(geometry.positions.iter().all(|p| p.is_finite()));
            assert!(geometry.normals.iter().all(|n| n.is_normalized()));
        }
    }

    #[test]
    fn test_folded_boundaries_take_right_column_normal() {
        let config = WallConfig {
            cabinets_wide: 4,
            cabinets_high: 1,
            tilt_angle_deg: 180.0,
            ..example()
        };
        let geometry = build_geometry(&config).unwrap();
        let angles = column_angles(&config);
        for boundary in 1..config.cabinets_wide {
            let theta = angles[boundary as usize];
            let right = DVec3::new(-theta.sin(), 0.0, theta.cos());
            for level in 0..=config.cabinets_high {
                let normal = geometry.normals[geometry.corner_index(boundary, level) as usize];
                assert!(close(normal, right, 1.0), "boundary {boundary}: {normal} vs {right}");
            }
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WallConfig {
            cabinets_wide: 0,
            ..example()
        };
        assert!(matches!(
            build_geometry(&config),
            Err(crate::WallError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_deterministic() {
        let a = build_geometry(&example()).unwrap();
        let b = build_geometry(&example()).unwrap();
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.uvs, b.uvs);
        assert_eq!(a.faces, b.faces);
    }
}
