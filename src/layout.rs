/// Ink bounding box of a laid-out string, relative to its pen origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextBox {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

/// Canvas position of the top-left ink pixel of each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLayout {
    pub first: (i32, i32),
    pub second: (i32, i32),
}

impl TextLayout {
    /// Pen origin that puts the ink of `text_box` at `ink`.
    pub fn pen_origin(ink: (i32, i32), text_box: &TextBox) -> (i32, i32) {
        (ink.0 - text_box.left, ink.1 - text_box.top)
    }
}

/// Centers two lines horizontally and stacks them vertically with `gap` pixels
/// between them. Floor division, so oversized text yields negative coordinates.
pub fn center_two_lines(
    canvas_width: u32,
    canvas_height: u32,
    first: &TextBox,
    second: &TextBox,
    gap: u32,
) -> TextLayout {
    let total_height = first.height as i64 + second.height as i64 + gap as i64;
    let y_start = (canvas_height as i64 - total_height).div_euclid(2);

    let x1 = (canvas_width as i64 - first.width as i64).div_euclid(2);
    let x2 = (canvas_width as i64 - second.width as i64).div_euclid(2);
    let y2 = y_start + first.height as i64 + gap as i64;

    TextLayout {
        first: (x1 as i32, y_start as i32),
        second: (x2 as i32, y2 as i32),
    }
}
