//! Texture atlas layout
//!
//! One atlas cell per cabinet. Both the mesh UVs and the layout image are
//! derived from this type so a generated test image always lines up with
//! the exported mesh when used as its texture.
//!
//! Conventions:
//! - Cabinet `(0, 0)` is the top-left cabinet seen from the audience, and
//!   the top-left `tile_width x tile_height` block of the image.
//! - UV `(0, 0)` is the bottom-left of the wall and of the image (OBJ
//!   convention, v up). Cabinet rows therefore run against v.

use glam::DVec2;

/// A cabinet address in the wall grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cabinet {
    /// Column, 0 = leftmost
    pub column: u32,
    /// Row, 0 = topmost
    pub row: u32,
}

impl Cabinet {
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }
}

/// Pixel rectangle inside the layout image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Exclusive right edge
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// UV rectangle of one atlas cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub min: DVec2,
    pub max: DVec2,
}

/// Grid of atlas cells, one per cabinet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasLayout {
    pub cabinets_wide: u32,
    pub cabinets_high: u32,
    pub tile_width: u32,
    pub tile_height: u32,
}

impl AtlasLayout {
    pub fn new(cabinets_wide: u32, cabinets_high: u32, tile_width: u32, tile_height: u32) -> Self {
        Self {
            cabinets_wide,
            cabinets_high,
            tile_width,
            tile_height,
        }
    }

    /// Resolution the atlas texture should be authored at
    pub fn image_size(&self) -> (u32, u32) {
        (
            self.cabinets_wide * self.tile_width,
            self.cabinets_high * self.tile_height,
        )
    }

    /// All cabinets in emission order: column-major, top row first
    pub fn cabinets(&self) -> impl Iterator<Item = Cabinet> + use<> {
        let high = self.cabinets_high;
        (0..self.cabinets_wide)
            .flat_map(move |column| (0..high).map(move |row| Cabinet::new(column, row)))
    }

    /// 1-based sequential cabinet number, in emission order
    pub fn cabinet_number(&self, cabinet: Cabinet) -> u32 {
        cabinet.column * self.cabinets_high + cabinet.row + 1
    }

    /// UV of grid corner `(column, level)`, where level 0 is the bottom edge
    pub fn corner_uv(&self, column: u32, level: u32) -> DVec2 {
        DVec2::new(
            column as f64 / self.cabinets_wide as f64,
            level as f64 / self.cabinets_high as f64,
        )
    }

    /// Corner level of a cabinet's bottom edge
    pub fn bottom_level(&self, cabinet: Cabinet) -> u32 {
        self.cabinets_high - 1 - cabinet.row
    }

    /// UV cell covered by a cabinet
    pub fn cell_uv_rect(&self, cabinet: Cabinet) -> UvRect {
        let bottom = self.bottom_level(cabinet);
        UvRect {
            min: self.corner_uv(cabinet.column, bottom),
            max: self.corner_uv(cabinet.column + 1, bottom + 1),
        }
    }

    /// Pixel block covered by a cabinet in the layout image
    pub fn cell_pixel_rect(&self, cabinet: Cabinet) -> PixelRect {
        PixelRect {
            x: cabinet.column * self.tile_width,
            y: cabinet.row * self.tile_height,
            width: self.tile_width,
            height: self.tile_height,
        }
    }

    /// Cabinet owning image pixel `(x, y)`
    pub fn cabinet_at_pixel(&self, x: u32, y: u32) -> Option<Cabinet> {
        let (width, height) = self.image_size();
        if x >= width || y >= height {
            return None;
        }
        Some(Cabinet::new(x / self.tile_width, y / self.tile_height))
    }
}
