use ratatui::style::Color;

/// 3×5 digit glyphs, one row per entry, bit 2 = leftmost column
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b001, 0b001, 0b001],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

/// Bit for each dot of a cell, indexed `[column][row]`. Unicode numbers the
/// left column 1, 2, 3, 7 and the right column 4, 5, 6, 8.
const DOT_BITS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

/// Off-screen pixel buffer the match is drawn into before it becomes text.
///
/// Pixels are Braille dots, two across and four down per terminal cell, so
/// the 800×600 field keeps usable detail in an ordinary terminal. Colors are
/// tracked per cell: the last pen to touch a cell wins.
pub struct BrailleCanvas {
    width: usize,
    height: usize,
    dots: Vec<Vec<u8>>,
    colors: Vec<Vec<Color>>,
    pen: Color,
}

impl BrailleCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            dots: vec![vec![0; width]; height],
            colors: vec![vec![Color::White; width]; height],
            pen: Color::White,
        }
    }

    /// Color used by subsequent drawing calls
    pub fn set_pen(&mut self, color: Color) {
        self.pen = color;
    }

    /// Light one pixel in the current pen color. Pixels off the canvas are
    /// dropped.
    pub fn set_pixel(&mut self, x: usize, y: usize) {
        let (cell_x, cell_y) = (x / 2, y / 4);
        let Some(cell) = self
            .dots
            .get_mut(cell_y)
            .and_then(|row| row.get_mut(cell_x))
        else {
            return;
        };

        *cell |= DOT_BITS[x % 2][y % 4];
        self.colors[cell_y][cell_x] = self.pen;
    }

    /// Light every pixel of a `width`×`height` block whose top-left is (x, y)
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize) {
        for py in y..(y + height) {
            for px in x..(x + width) {
                self.set_pixel(px, py);
            }
        }
    }

    /// Draw one digit with its top-left corner at (x, y); each glyph dot
    /// becomes a `scale`×`scale` block
    pub fn draw_digit(&mut self, digit: u8, x: usize, y: usize, scale: usize) {
        let glyph = &DIGITS[(digit % 10) as usize];
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..3 {
                if bits & (0b100 >> col) != 0 {
                    self.fill_rect(x + col * scale, y + row * scale, scale, scale);
                }
            }
        }
    }

    /// Pixel width of `value` as drawn by `draw_number`
    pub fn number_width(value: u32, scale: usize) -> usize {
        let digits = value.to_string().len();
        digits * 3 * scale + (digits - 1) * scale
    }

    /// Draw a decimal number horizontally centered on `center_x`
    pub fn draw_number(&mut self, value: u32, center_x: usize, y: usize, scale: usize) {
        let mut x = center_x.saturating_sub(Self::number_width(value, scale) / 2);
        for digit in value.to_string().bytes().map(|b| b - b'0') {
            self.draw_digit(digit, x, y, scale);
            x += 4 * scale;
        }
    }

    /// The Braille character for one cell; a blank cell is U+2800, and
    /// cells off the canvas read as a space
    pub fn to_char(&self, cell_x: usize, cell_y: usize) -> char {
        self.dots
            .get(cell_y)
            .and_then(|row| row.get(cell_x))
            .and_then(|&bits| char::from_u32(0x2800 + u32::from(bits)))
            .unwrap_or(' ')
    }

    pub fn color_at(&self, cell_x: usize, cell_y: usize) -> Color {
        self.colors
            .get(cell_y)
            .and_then(|row| row.get(cell_x))
            .copied()
            .unwrap_or(Color::White)
    }

    /// Width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_width(&self) -> usize {
        self.width * 2
    }

    pub fn pixel_height(&self) -> usize {
        self.height * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braille_canvas() {
        let mut canvas = BrailleCanvas::new(2, 2);

        canvas.set_pixel(0, 0);
        assert_eq!(canvas.to_char(0, 0), '⠁'); // dot 1

        canvas.set_pixel(1, 3);
        assert_eq!(canvas.to_char(0, 0), '⢁'); // dots 1 and 8

        // Out of range is ignored
        canvas.set_pixel(10, 10);
        assert_eq!(canvas.to_char(5, 5), ' ');
    }

    #[test]
    fn test_dot_order_within_cell() {
        // Left column top to bottom, then right column: dots 1 2 3 7 4 5 6 8
        let expected = ['⠁', '⠂', '⠄', '⡀', '⠈', '⠐', '⠠', '⢀'];
        for (i, want) in expected.into_iter().enumerate() {
            let mut canvas = BrailleCanvas::new(1, 1);
            canvas.set_pixel(i / 4, i % 4);
            assert_eq!(canvas.to_char(0, 0), want);
        }
    }

    #[test]
    fn test_fill_rect_full_cell() {
        let mut canvas = BrailleCanvas::new(2, 2);
        canvas.fill_rect(2, 4, 2, 4);

        assert_eq!(canvas.to_char(1, 1), '⣿');
        assert_eq!(canvas.to_char(0, 0), '⠀');
    }

    #[test]
    fn test_pen_colors_cells() {
        let mut canvas = BrailleCanvas::new(2, 1);
        canvas.set_pen(Color::Gray);
        canvas.set_pixel(0, 0);
        canvas.set_pen(Color::Yellow);
        canvas.set_pixel(2, 0);

        assert_eq!(canvas.color_at(0, 0), Color::Gray);
        assert_eq!(canvas.color_at(1, 0), Color::Yellow);
    }

    #[test]
    fn test_number_layout() {
        assert_eq!(BrailleCanvas::number_width(7, 1), 3);
        assert_eq!(BrailleCanvas::number_width(12, 2), 14);

        let mut canvas = BrailleCanvas::new(10, 2);
        canvas.draw_number(1, 4, 0, 1);
        // Glyph starts at x = 3; the top row of "1" is its middle column, pixel (4, 0)
        assert_eq!(canvas.to_char(2, 0) as u32 & 0x01, 0x01);
        assert_eq!(canvas.to_char(1, 0) as u32 & 0x08, 0);
    }
}
