//! Built-in 5x7 bitmap font for cabinet labels
//!
//! Only the characters labels use are included: digits, `,` and `#`.
//! Each glyph is 7 rows of 5 bits, most significant bit on the left.

use image::{Rgb, RgbImage};

/// Glyph cell width in font pixels
pub const GLYPH_WIDTH: u32 = 5;
/// Glyph cell height in font pixels
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal advance between glyphs (glyph + 1 column spacing)
pub const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

#[rustfmt::skip]
const DIGITS: [[u8; 7]; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110], // 0
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // 1
    [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111], // 2
    [0b01110, 0b10001, 0b00001, 0b00110, 0b00001, 0b10001, 0b01110], // 3
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010], // 4
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110], // 5
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110], // 6
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000], // 7
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110], // 8
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100], // 9
];

#[rustfmt::skip]
const COMMA: [u8; 7] = [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b01000];
#[rustfmt::skip]
const HASH: [u8; 7] = [0b01010, 0b11111, 0b01010, 0b01010, 0b11111, 0b01010, 0b00000];
const SPACE: [u8; 7] = [0; 7];

/// Bitmap for a character, `None` if the font lacks it
pub fn glyph(ch: char) -> Option<&'static [u8; 7]> {
    match ch {
        '0'..='9' => Some(&DIGITS[ch as usize - '0' as usize]),
        ',' => Some(&COMMA),
        '#' => Some(&HASH),
        ' ' => Some(&SPACE),
        _ => None,
    }
}

/// Width in image pixels of `text` drawn at `scale`
pub fn text_width(text: &str, scale: u32) -> u32 {
    let count = text.chars().count() as u32;
    if count == 0 {
        return 0;
    }
    (count * GLYPH_ADVANCE - 1) * scale
}

/// Height in image pixels of one line at `scale`
pub fn text_height(scale: u32) -> u32 {
    GLYPH_HEIGHT * scale
}

/// Draw `text` with its top-left corner at `(x, y)`. Pixels outside the
/// image are clipped; unknown characters advance without drawing.
pub fn draw_text(image: &mut RgbImage, x: u32, y: u32, text: &str, scale: u32, color: Rgb<u8>) {
    let (width, height) = image.dimensions();
    for (index, ch) in text.chars().enumerate() {
        let Some(bits) = glyph(ch) else { continue };
        let base_x = x + index as u32 * GLYPH_ADVANCE * scale;

        for (row, &row_bits) in bits.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if (row_bits >> (GLYPH_WIDTH - 1 - col)) & 1 == 0 {
                    continue;
                }
                let px = base_x + col * scale;
                let py = y + row as u32 * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        let (sx, sy) = (px + dx, py + dy);
                        if sx < width && sy < height {
                            image.put_pixel(sx, sy, color);
                        }
                    }
                }
            }
        }
    }
}
