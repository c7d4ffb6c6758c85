//! The text cursor engine: pen position and attribute state, the character-stream layout state
//! machine, and thin numeric-formatting layers over it.
//!
//! Glyph rasterization itself is an external collaborator: anything implementing
//! `GlyphRenderer` (a bitmap font, for instance) is handed the pen position and attributes for
//! each printable character, and renders into a 6x8-per-size-unit cell through the display's
//! drawing primitives. This module only owns layout: advance, newline, and wrap.

use core::fmt;

use crate::color::Rgb565;
use crate::display::Display;
use crate::interface::DisplayInterface;

/// The pen state used by the printing operations.
#[derive(Clone, Copy, Debug)]
pub struct TextCursor {
    /// Pen column, in pixels. Glyphs render with their top-left corner at the pen.
    pub x: i16,
    /// Pen row, in pixels.
    pub y: i16,
    /// Foreground color of subsequent glyphs.
    pub color: Rgb565,
    /// Background color of subsequent glyph cells.
    pub background: Rgb565,
    /// Integer scale factor applied to the 6x8 glyph cell. Always at least 1.
    pub size: u8,
    /// Whether the pen wraps to the next line when a glyph would overhang the right edge.
    pub wrap: bool,
}

impl TextCursor {
    pub(crate) fn new() -> Self {
        TextCursor {
            x: 0,
            y: 0,
            color: Rgb565::WHITE,
            background: Rgb565::BLACK,
            size: 1,
            wrap: true,
        }
    }
}

/// An external font rasterizer. `draw_glyph` renders `glyph` with its top-left corner at
/// (`x`, `y`), in `fg` on `bg`, scaled by `size`, using the display's drawing primitives.
pub trait GlyphRenderer<DI>
where
    DI: DisplayInterface,
{
    fn draw_glyph(
        &mut self,
        display: &mut Display<DI>,
        x: i16,
        y: i16,
        glyph: char,
        fg: Rgb565,
        bg: Rgb565,
        size: u8,
    ) -> Result<(), ()>;
}

impl<DI> Display<DI>
where
    DI: DisplayInterface,
{
    /// The current text cursor state.
    pub fn cursor(&self) -> TextCursor {
        self.cursor
    }

    /// Move the pen to (`x`, `y`).
    pub fn set_cursor(&mut self, x: i16, y: i16) {
        self.cursor.x = x;
        self.cursor.y = y;
    }

    /// Set the text foreground color. The background is set to the same color, which makes
    /// glyph cells effectively transparent: the "background" overstrikes with the foreground.
    pub fn set_text_color(&mut self, color: Rgb565) {
        self.cursor.color = color;
        self.cursor.background = color;
    }

    /// Set the text foreground and background colors independently.
    pub fn set_text_color_bg(&mut self, color: Rgb565, background: Rgb565) {
        self.cursor.color = color;
        self.cursor.background = background;
    }

    /// Set the text scale factor, clamped to at least 1.
    pub fn set_text_size(&mut self, size: u8) {
        self.cursor.size = if size > 0 { size } else { 1 };
    }

    /// Control whether printing wraps at the right edge of the display.
    pub fn set_text_wrap(&mut self, wrap: bool) {
        self.cursor.wrap = wrap;
    }

    /// Print a string at the pen, advancing it left-to-right per glyph and top-to-bottom per
    /// line break. `'\n'` returns the pen to column 0 and advances one line; `'\r'` is
    /// ignored. After each glyph the pen advances by the cell width, and if wrapping is
    /// enabled and the next glyph would overhang the right edge, the pen wraps immediately, so
    /// no glyph is ever split by the wrap logic itself. Off-screen rows are not checked here;
    /// glyphs below the panel clip away in the drawing primitives.
    pub fn print<F>(&mut self, font: &mut F, s: &str) -> Result<(), ()>
    where
        F: GlyphRenderer<DI>,
    {
        for ch in s.chars() {
            let size = self.cursor.size as i16;
            match ch {
                '\n' => {
                    self.cursor.y = self.cursor.y.saturating_add(8 * size);
                    self.cursor.x = 0;
                }
                '\r' => {}
                _ => {
                    let cur = self.cursor;
                    font.draw_glyph(self, cur.x, cur.y, ch, cur.color, cur.background, cur.size)?;
                    // Saturating advances: a pen parked at the i16 extremes must not wrap the
                    // coordinate space, just stay pinned (and wrap the line if enabled).
                    self.cursor.x = self.cursor.x.saturating_add(6 * size);
                    if self.cursor.wrap
                        && self.cursor.x as i32 + 6 * size as i32 > self.width as i32
                    {
                        self.cursor.x = 0;
                        self.cursor.y = self.cursor.y.saturating_add(8 * size);
                    }
                }
            }
        }
        Ok(())
    }

    /// Print a string followed by a forced line break.
    pub fn println<F>(&mut self, font: &mut F, s: &str) -> Result<(), ()>
    where
        F: GlyphRenderer<DI>,
    {
        self.print(font, s)?;
        self.cursor.y = self.cursor.y.saturating_add(8 * self.cursor.size as i16);
        self.cursor.x = 0;
        Ok(())
    }

    /// Print a signed integer in decimal.
    pub fn print_int<F>(&mut self, font: &mut F, num: i32) -> Result<(), ()>
    where
        F: GlyphRenderer<DI>,
    {
        use core::fmt::Write;
        let mut w = GlyphWriter {
            display: self,
            font,
        };
        write!(w, "{}", num).map_err(|_| ())
    }

    /// Print a float in decimal with a fixed number of digits after the point.
    pub fn print_float<F>(&mut self, font: &mut F, num: f32, decimals: u8) -> Result<(), ()>
    where
        F: GlyphRenderer<DI>,
    {
        use core::fmt::Write;
        let mut w = GlyphWriter {
            display: self,
            font,
        };
        write!(w, "{:.*}", decimals as usize, num).map_err(|_| ())
    }
}

/// Adapts `print` into a `core::fmt` sink so the numeric printers need no scratch buffer.
struct GlyphWriter<'a, DI, F>
where
    DI: DisplayInterface,
    F: GlyphRenderer<DI>,
{
    display: &'a mut Display<DI>,
    font: &'a mut F,
}

impl<'a, DI, F> fmt::Write for GlyphWriter<'a, DI, F>
where
    DI: DisplayInterface,
    F: GlyphRenderer<DI>,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.display.print(&mut *self.font, s).map_err(|_| fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::GlyphRenderer;
    use crate::color::Rgb565;
    use crate::display::{Display, PixelCoord as Px};
    use crate::interface::test_spy::TestSpyInterface;

    /// Records the glyph calls it receives without drawing anything.
    struct FakeFont {
        glyphs: Vec<(i16, i16, char, Rgb565, Rgb565, u8)>,
    }

    impl FakeFont {
        fn new() -> Self {
            FakeFont { glyphs: Vec::new() }
        }
        fn placements(&self) -> Vec<(i16, i16, char)> {
            self.glyphs.iter().map(|g| (g.0, g.1, g.2)).collect()
        }
    }

    impl GlyphRenderer<TestSpyInterface> for FakeFont {
        fn draw_glyph(
            &mut self,
            _display: &mut Display<TestSpyInterface>,
            x: i16,
            y: i16,
            glyph: char,
            fg: Rgb565,
            bg: Rgb565,
            size: u8,
        ) -> Result<(), ()> {
            self.glyphs.push((x, y, glyph, fg, bg, size));
            Ok(())
        }
    }

    fn display() -> Display<TestSpyInterface> {
        Display::new(TestSpyInterface::new(), Px(240, 320), Px(0, 0))
    }

    #[test]
    fn print_advances_and_breaks_lines() {
        let mut disp = display();
        let mut font = FakeFont::new();
        disp.set_text_wrap(false);
        disp.print(&mut font, "AB\nC").unwrap();
        assert_eq!(
            font.placements(),
            vec![(0, 0, 'A'), (6, 0, 'B'), (0, 8, 'C')]
        );
        let cursor = disp.cursor();
        assert_eq!((cursor.x, cursor.y), (6, 8));
    }

    #[test]
    fn carriage_return_is_ignored() {
        let mut disp = display();
        let mut font = FakeFont::new();
        disp.print(&mut font, "A\rB").unwrap();
        assert_eq!(font.placements(), vec![(0, 0, 'A'), (6, 0, 'B')]);
    }

    #[test]
    fn wrap_happens_before_a_glyph_would_overhang() {
        let mut disp = display();
        let mut font = FakeFont::new();
        // Width 240: a size-1 pen at 234 may take one more glyph (234 + 6 = 240), but the one
        // after that must start on a new line.
        disp.set_cursor(234, 0);
        disp.print(&mut font, "AB").unwrap();
        assert_eq!(font.placements(), vec![(234, 0, 'A'), (0, 8, 'B')]);
    }

    #[test]
    fn wrap_disabled_lets_glyphs_run_off() {
        let mut disp = display();
        let mut font = FakeFont::new();
        disp.set_text_wrap(false);
        disp.set_cursor(234, 0);
        disp.print(&mut font, "AB").unwrap();
        assert_eq!(font.placements(), vec![(234, 0, 'A'), (240, 0, 'B')]);
    }

    #[test]
    fn text_size_scales_advance_and_line_height() {
        let mut disp = display();
        let mut font = FakeFont::new();
        disp.set_text_size(2);
        disp.set_text_wrap(false);
        disp.print(&mut font, "AB\nC").unwrap();
        assert_eq!(
            font.placements(),
            vec![(0, 0, 'A'), (12, 0, 'B'), (0, 16, 'C')]
        );
    }

    #[test]
    fn text_size_zero_clamps_to_one() {
        let mut disp = display();
        disp.set_text_size(0);
        assert_eq!(disp.cursor().size, 1);
    }

    #[test]
    fn cursor_at_extreme_position_advances_without_wrapping() {
        let mut disp = display();
        let mut font = FakeFont::new();
        // An advance from near i16::MAX must pin rather than wrap the coordinate space; with
        // wrapping enabled the pen then folds onto the next line as usual.
        disp.set_cursor(i16::max_value() - 2, 0);
        disp.print(&mut font, "A").unwrap();
        let cursor = disp.cursor();
        assert_eq!((cursor.x, cursor.y), (0, 8));

        disp.set_text_wrap(false);
        disp.set_cursor(i16::max_value() - 2, 0);
        disp.print(&mut font, "A").unwrap();
        assert_eq!(disp.cursor().x, i16::max_value());
    }

    #[test]
    fn println_forces_a_trailing_break() {
        let mut disp = display();
        let mut font = FakeFont::new();
        disp.println(&mut font, "A").unwrap();
        let cursor = disp.cursor();
        assert_eq!((cursor.x, cursor.y), (0, 8));
    }

    #[test]
    fn color_setters_reach_the_renderer() {
        let mut disp = display();
        let mut font = FakeFont::new();
        disp.set_text_color_bg(Rgb565::RED, Rgb565::BLUE);
        disp.print(&mut font, "A").unwrap();
        assert_eq!(font.glyphs[0].3, Rgb565::RED);
        assert_eq!(font.glyphs[0].4, Rgb565::BLUE);

        // Single-color form overstrikes: background becomes the foreground color.
        disp.set_text_color(Rgb565::GREEN);
        disp.print(&mut font, "B").unwrap();
        assert_eq!(font.glyphs[1].3, Rgb565::GREEN);
        assert_eq!(font.glyphs[1].4, Rgb565::GREEN);
    }

    #[test]
    fn print_int_formats_decimal() {
        let mut disp = display();
        let mut font = FakeFont::new();
        disp.print_int(&mut font, -42).unwrap();
        let chars: Vec<char> = font.placements().iter().map(|p| p.2).collect();
        assert_eq!(chars, vec!['-', '4', '2']);
    }

    #[test]
    fn print_float_respects_decimals() {
        let mut disp = display();
        let mut font = FakeFont::new();
        disp.print_float(&mut font, 3.14159, 2).unwrap();
        let chars: Vec<char> = font.placements().iter().map(|p| p.2).collect();
        assert_eq!(chars, vec!['3', '.', '1', '4']);
    }
}
