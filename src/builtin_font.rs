//! Built-in 5x7 bitmap font, used when no outline font file is available.
//!
//! Glyphs are column-encoded: five bytes per character, bit 0 is the top
//! row. Rows 0 and 7 are left free on most lowercase letters, which is
//! where accent marks are drawn.

use crate::layout::TextBox;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

pub const GLYPH_COLUMNS: u32 = 5;
/// Glyph columns plus one spacing column.
pub const CELL_COLUMNS: u32 = GLYPH_COLUMNS + 1;

const FIRST_PRINTABLE: u32 = 0x20;

#[rustfmt::skip]
const ASCII: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x14, 0x08, 0x3E, 0x08, 0x14], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x7F, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x10, 0x08, 0x08, 0x10, 0x08], // ~
];

// Accent marks, drawn in rows 0..=1 above a lowercase base letter.
const ACUTE: [u8; 5] = [0x00, 0x00, 0x02, 0x01, 0x00];
const GRAVE: [u8; 5] = [0x00, 0x01, 0x02, 0x00, 0x00];
const CIRCUMFLEX: [u8; 5] = [0x00, 0x02, 0x01, 0x02, 0x00];
const DIAERESIS: [u8; 5] = [0x00, 0x01, 0x00, 0x01, 0x00];
const CEDILLA: [u8; 5] = [0x00, 0x00, 0x80, 0x00, 0x00];

fn ascii_glyph(c: char) -> [u8; 5] {
    let code = c as u32;
    ASCII[(code - FIRST_PRINTABLE) as usize]
}

fn compose(base: char, mark: [u8; 5]) -> [u8; 5] {
    overlay(ascii_glyph(base), mark)
}

fn overlay(mut columns: [u8; 5], mark: [u8; 5]) -> [u8; 5] {
    for (column, bits) in columns.iter_mut().zip(mark) {
        *column |= bits;
    }
    columns
}

/// Column bitmap for `c`, falling back to `?` for unsupported characters.
pub fn glyph(c: char) -> [u8; 5] {
    match c {
        ' '..='~' => ascii_glyph(c),
        'é' => compose('e', ACUTE),
        'è' => compose('e', GRAVE),
        'ê' => compose('e', CIRCUMFLEX),
        'ë' => compose('e', DIAERESIS),
        'à' => compose('a', GRAVE),
        'â' => compose('a', CIRCUMFLEX),
        'ç' => compose('c', CEDILLA),
        'ô' => compose('o', CIRCUMFLEX),
        'û' => compose('u', CIRCUMFLEX),
        'ù' => compose('u', GRAVE),
        // The dot of `i` sits in row 0, so drop it before adding the mark.
        'î' => compose_dotless_i(CIRCUMFLEX),
        'ï' => compose_dotless_i(DIAERESIS),
        _ => ascii_glyph('?'),
    }
}

fn compose_dotless_i(mark: [u8; 5]) -> [u8; 5] {
    let [a, b, c, d, e] = ascii_glyph('i');
    overlay([a, b, c & !0x01, d, e], mark)
}

/// Integer upscaling factor for a requested pixel size.
pub fn scale_factor(px: f32) -> u32 {
    ((px / 10.0).round() as u32).max(1)
}

/// Calls `f` with the top-left corner of every set dot, in canvas pixels.
/// Coordinates saturate at `i32::MAX` instead of overflowing.
fn for_each_dot(text: &str, px: f32, mut f: impl FnMut(i32, i32)) {
    let factor = scale_factor(px);
    let to_px = |units: u32| units.saturating_mul(factor).min(i32::MAX as u32) as i32;
    for (i, c) in text.chars().enumerate() {
        let cell_x = u32::try_from(i).unwrap_or(u32::MAX).saturating_mul(CELL_COLUMNS);
        for (col, bits) in glyph(c).iter().enumerate() {
            for row in 0..8u32 {
                if bits & (1 << row) != 0 {
                    f(to_px(cell_x.saturating_add(col as u32)), to_px(row));
                }
            }
        }
    }
}

/// Ink bounding box of `text`, relative to the pen origin.
pub fn measure(text: &str, px: f32) -> TextBox {
    let factor = scale_factor(px).min(i32::MAX as u32) as i32;
    let mut bounds: Option<(i32, i32, i32, i32)> = None;

    for_each_dot(text, px, |x, y| {
        bounds = Some(match bounds {
            Some((min_x, min_y, max_x, max_y)) => (
                min_x.min(x),
                min_y.min(y),
                max_x.max(x.saturating_add(factor)),
                max_y.max(y.saturating_add(factor)),
            ),
            None => (x, y, x.saturating_add(factor), y.saturating_add(factor)),
        });
    });

    match bounds {
        Some((min_x, min_y, max_x, max_y)) => TextBox {
            left: min_x,
            top: min_y,
            width: (max_x - min_x) as u32,
            height: (max_y - min_y) as u32,
        },
        None => TextBox::default(),
    }
}

/// Draws `text` with its pen origin at `(x, y)`. Dots outside the canvas are clipped.
pub fn draw(canvas: &mut RgbImage, text: &str, px: f32, x: i32, y: i32, color: Rgb<u8>) {
    let factor = scale_factor(px);
    for_each_dot(text, px, |dx, dy| {
        let rect = Rect::at(x.saturating_add(dx), y.saturating_add(dy)).of_size(factor, factor);
        draw_filled_rect_mut(canvas, rect, color);
    });
}
