//! Canvas to braille text, one glyph per 4×2 pixel block.
//!
//! Every braille scalar is `U+2800 + mask`, where each of the eight dots
//! contributes one mask bit. A block takes a single terminal color: the
//! maximum color id among its pixels wins, so two series crossing inside
//! one cell bleed into the higher id. That artifact is accepted; blending
//! has no representation in a text grid.

use crate::core::{
    color::{AnsiCode, Palette},
    constants::{BRAILLE_BASE, BRAILLE_HORIZONTAL_RESOLUTION, BRAILLE_VERTICAL_RESOLUTION},
};
use crate::render::canvas::Canvas;

// --- Dot layout ---

/// Mask bit for dot (row, column) of a block.
/// https://en.wikipedia.org/wiki/Braille_Patterns
const DOT_BITS: [[u8; BRAILLE_HORIZONTAL_RESOLUTION]; BRAILLE_VERTICAL_RESOLUTION] = [
    [0x01, 0x08],
    [0x02, 0x10],
    [0x04, 0x20],
    [0x40, 0x80],
];

#[inline]
fn block_glyph(mask: u8) -> char {
    // U+2800..=U+28FF are all valid scalar values
    char::from_u32(BRAILLE_BASE + u32::from(mask)).unwrap_or(' ')
}

/// Encode the whole canvas into text lines, top block row first.
///
/// Partial edge blocks read missing pixels as background. With colors
/// enabled, escapes are emitted per run of same-colored blocks rather
/// than per glyph, and every line carries exactly one trailing reset;
/// no color state survives a line break.
#[must_use]
pub fn encode_lines(canvas: &Canvas, palette: &Palette, use_colors: bool) -> Vec<String> {
    let out_h = canvas.height().div_ceil(BRAILLE_VERTICAL_RESOLUTION);
    let out_w = canvas.width().div_ceil(BRAILLE_HORIZONTAL_RESOLUTION);

    let mut lines = Vec::with_capacity(out_h);
    for row in 0..out_h {
        let mut line = String::with_capacity(out_w * 3 + 16);
        let mut current: Option<AnsiCode> = None;
        for col in 0..out_w {
            let mut mask = 0u8;
            let mut max_id = 0u8;
            for (dy, row_bits) in DOT_BITS.iter().enumerate() {
                for (dx, bit) in row_bits.iter().enumerate() {
                    let id = canvas.get(
                        col * BRAILLE_HORIZONTAL_RESOLUTION + dx,
                        row * BRAILLE_VERTICAL_RESOLUTION + dy,
                    );
                    if id != 0 {
                        mask |= bit;
                        max_id = max_id.max(id);
                    }
                }
            }
            if use_colors {
                let escape = palette.escape(max_id);
                if current != Some(escape) {
                    line.push_str(escape.as_str());
                    current = Some(escape);
                }
            }
            line.push(block_glyph(mask));
        }
        if use_colors {
            line.push_str(AnsiCode::reset().as_str());
        }
        lines.push(line);
    }
    lines
}
