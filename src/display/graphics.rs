//! Shape-drawing primitives: pixels, lines, rectangles, circles, triangles, and rounded
//! rectangles, in outlined and filled variants.
//!
//! Every operation is stateless given the current display dimensions, clips itself against the
//! logical bounds, and decomposes into address-window fills so that the transport only ever
//! sees windowed bulk pixel streams. Out-of-bounds and degenerate geometry is absorbed as a
//! silent no-op rather than an error; callers only see `Err` for transport failures.
//!
//! The public API takes `i16` coordinates, but all interior geometry arithmetic is carried out
//! in `i32`: sums and differences of extreme `i16` inputs (a rectangle of width `i16::MAX`, a
//! line spanning more than 32767 columns) must clip against the display bounds, not wrap.

use core::mem::swap;

use crate::color::Rgb565;
use crate::display::Display;
use crate::interface::DisplayInterface;

impl<DI> Display<DI>
where
    DI: DisplayInterface,
{
    /// Fill the entire display with one color.
    pub fn fill_screen(&mut self, color: Rgb565) -> Result<(), ()> {
        let (w, h) = (self.width as i32, self.height as i32);
        self.fill_rect_wide(0, 0, w, h, color)
    }

    /// Draw a single pixel. Pixels outside the logical bounds are silently dropped.
    pub fn draw_pixel(&mut self, x: i16, y: i16, color: Rgb565) -> Result<(), ()> {
        self.pixel_wide(x as i32, y as i32, color)
    }

    /// Fill a rectangle, clipped against the display bounds: a negative origin consumes the
    /// size budget, and overhang past the far edges truncates it. A rectangle that clips to
    /// nothing is a no-op. Emits exactly one address window and one chunked solid fill.
    pub fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Rgb565) -> Result<(), ()> {
        self.fill_rect_wide(x as i32, y as i32, w as i32, h as i32, color)
    }

    /// Draw a 1-pixel-thick vertical line as a windowed fill rather than pixel-by-pixel.
    pub fn draw_fast_vline(&mut self, x: i16, y: i16, h: i16, color: Rgb565) -> Result<(), ()> {
        self.vline_wide(x as i32, y as i32, h as i32, color)
    }

    /// Draw a 1-pixel-thick horizontal line as a windowed fill rather than pixel-by-pixel.
    pub fn draw_fast_hline(&mut self, x: i16, y: i16, w: i16, color: Rgb565) -> Result<(), ()> {
        self.hline_wide(x as i32, y as i32, w as i32, color)
    }

    /// Draw a rectangle outline as four fast lines.
    pub fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Rgb565) -> Result<(), ()> {
        let (x, y, w, h) = (x as i32, y as i32, w as i32, h as i32);
        self.hline_wide(x, y, w, color)?;
        self.hline_wide(x, y + h - 1, w, color)?;
        self.vline_wide(x, y, h, color)?;
        self.vline_wide(x + w - 1, y, h, color)
    }

    fn pixel_wide(&mut self, x: i32, y: i32, color: Rgb565) -> Result<(), ()> {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return Ok(());
        }
        self.set_window(x as u16, y as u16, x as u16, y as u16)?;
        self.fill_window(1, color)
    }

    fn fill_rect_wide(
        &mut self,
        mut x: i32,
        mut y: i32,
        mut w: i32,
        mut h: i32,
        color: Rgb565,
    ) -> Result<(), ()> {
        let (dw, dh) = (self.width as i32, self.height as i32);
        if x >= dw || y >= dh || w <= 0 || h <= 0 {
            return Ok(());
        }
        if x < 0 {
            w += x;
            x = 0;
        }
        if y < 0 {
            h += y;
            y = 0;
        }
        if w <= 0 || h <= 0 {
            return Ok(());
        }
        if x + w > dw {
            w = dw - x;
        }
        if y + h > dh {
            h = dh - y;
        }
        self.set_window(x as u16, y as u16, (x + w - 1) as u16, (y + h - 1) as u16)?;
        self.fill_window((w * h) as u32, color)
    }

    fn vline_wide(&mut self, x: i32, y: i32, h: i32, color: Rgb565) -> Result<(), ()> {
        self.fill_rect_wide(x, y, 1, h, color)
    }

    fn hline_wide(&mut self, x: i32, y: i32, w: i32, color: Rgb565) -> Result<(), ()> {
        self.fill_rect_wide(x, y, w, 1, color)
    }

    /// Draw a line with the integer Bresenham algorithm: steep lines are transposed so the
    /// major axis is always x, the direction is normalized so x0 <= x1, and y steps by one
    /// whenever the error term underflows. Produces exactly max(|dx|, |dy|) + 1 pixel writes,
    /// monotonic in the major axis.
    pub fn draw_line(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        color: Rgb565,
    ) -> Result<(), ()> {
        let (mut x0, mut y0) = (x0 as i32, y0 as i32);
        let (mut x1, mut y1) = (x1 as i32, y1 as i32);
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            swap(&mut x0, &mut y0);
            swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            swap(&mut x0, &mut x1);
            swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let dy = (y1 - y0).abs();
        // Truncating division; the half-pixel bias is part of the expected pixel output.
        let mut err = dx / 2;
        let ystep: i32 = if y0 < y1 { 1 } else { -1 };

        while x0 <= x1 {
            if steep {
                self.pixel_wide(y0, x0, color)?;
            } else {
                self.pixel_wide(x0, y0, color)?;
            }
            err -= dy;
            if err < 0 {
                y0 += ystep;
                err += dx;
            }
            x0 += 1;
        }
        Ok(())
    }

    /// Draw a circle outline with the midpoint algorithm: the four axis points, then the
    /// 8-way symmetric point set per step. A negative radius is a no-op; radius 0 degenerates
    /// to a single pixel.
    pub fn draw_circle(&mut self, x0: i16, y0: i16, r: i16, color: Rgb565) -> Result<(), ()> {
        if r < 0 {
            return Ok(());
        }
        let (x0, y0, r) = (x0 as i32, y0 as i32, r as i32);
        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;

        self.pixel_wide(x0, y0 + r, color)?;
        self.pixel_wide(x0, y0 - r, color)?;
        self.pixel_wide(x0 + r, y0, color)?;
        self.pixel_wide(x0 - r, y0, color)?;

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            self.pixel_wide(x0 + x, y0 + y, color)?;
            self.pixel_wide(x0 - x, y0 + y, color)?;
            self.pixel_wide(x0 + x, y0 - y, color)?;
            self.pixel_wide(x0 - x, y0 - y, color)?;
            self.pixel_wide(x0 + y, y0 + x, color)?;
            self.pixel_wide(x0 - y, y0 + x, color)?;
            self.pixel_wide(x0 + y, y0 - x, color)?;
            self.pixel_wide(x0 - y, y0 - x, color)?;
        }
        Ok(())
    }

    /// Fill a circle: one full-diameter central vertical line, then per midpoint step a
    /// vertical span for each symmetric octant pair, avoiding per-pixel writes. A negative
    /// radius is a no-op.
    pub fn fill_circle(&mut self, x0: i16, y0: i16, r: i16, color: Rgb565) -> Result<(), ()> {
        if r < 0 {
            return Ok(());
        }
        let (x0, y0, r) = (x0 as i32, y0 as i32, r as i32);
        self.vline_wide(x0, y0 - r, 2 * r + 1, color)?;

        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            self.vline_wide(x0 + x, y0 - y, 2 * y + 1, color)?;
            self.vline_wide(x0 - x, y0 - y, 2 * y + 1, color)?;
            self.vline_wide(x0 + y, y0 - x, 2 * x + 1, color)?;
            self.vline_wide(x0 - y, y0 - x, 2 * x + 1, color)?;
        }
        Ok(())
    }

    /// Draw a triangle outline as three lines between the vertices, in the given order.
    pub fn draw_triangle(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: Rgb565,
    ) -> Result<(), ()> {
        self.draw_line(x0, y0, x1, y1, color)?;
        self.draw_line(x1, y1, x2, y2, color)?;
        self.draw_line(x2, y2, x0, y0, color)
    }

    /// Fill a triangle by scanline conversion: sort the vertices by ascending y, then sweep
    /// the top half along edges 0-1 and 0-2 and the bottom half along edges 1-2 and 0-2,
    /// emitting one horizontal span per row. If all three vertices share a y, the triangle
    /// degenerates to a single horizontal span covering their x extent.
    pub fn fill_triangle(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: Rgb565,
    ) -> Result<(), ()> {
        let (mut x0, mut y0) = (x0 as i32, y0 as i32);
        let (mut x1, mut y1) = (x1 as i32, y1 as i32);
        let (mut x2, mut y2) = (x2 as i32, y2 as i32);

        // Sort coordinates by y order (y2 >= y1 >= y0).
        if y0 > y1 {
            swap(&mut y0, &mut y1);
            swap(&mut x0, &mut x1);
        }
        if y1 > y2 {
            swap(&mut y2, &mut y1);
            swap(&mut x2, &mut x1);
        }
        if y0 > y1 {
            swap(&mut y0, &mut y1);
            swap(&mut x0, &mut x1);
        }

        if y0 == y2 {
            let mut a = x0;
            let mut b = x0;
            if x1 < a {
                a = x1;
            } else if x1 > b {
                b = x1;
            }
            if x2 < a {
                a = x2;
            } else if x2 > b {
                b = x2;
            }
            return self.hline_wide(a, y0, b - a + 1, color);
        }

        let dx01 = x1 - x0;
        let dy01 = y1 - y0;
        let dx02 = x2 - x0;
        let dy02 = y2 - y0;
        let dx12 = x2 - x1;
        let dy12 = y2 - y1;
        let mut sa: i32 = 0;
        let mut sb: i32 = 0;

        // The top pass stops one row short of the middle vertex, unless the top half's lower
        // edge is horizontal; the bottom pass then starts exactly where the top pass ended, so
        // the seam scanline is never drawn twice.
        let last = if y1 == y2 { y1 } else { y1 - 1 };

        let mut y = y0;
        while y <= last {
            let mut a = x0 + sa / dy01;
            let mut b = x0 + sb / dy02;
            sa += dx01;
            sb += dx02;
            if a > b {
                swap(&mut a, &mut b);
            }
            self.hline_wide(a, y, b - a + 1, color)?;
            y += 1;
        }

        sa = dx12 * (y - y1);
        sb = dx02 * (y - y0);
        while y <= y2 {
            let mut a = x1 + sa / dy12;
            let mut b = x0 + sb / dy02;
            sa += dx12;
            sb += dx02;
            if a > b {
                swap(&mut a, &mut b);
            }
            self.hline_wide(a, y, b - a + 1, color)?;
            y += 1;
        }
        Ok(())
    }

    /// Draw a rounded-rectangle outline: four straight edges shortened by the corner radius at
    /// each end, plus a midpoint-algorithm quarter arc in each corner. A negative radius is a
    /// no-op; radius 0 degenerates to a plain rectangle outline.
    pub fn draw_round_rect(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        r: i16,
        color: Rgb565,
    ) -> Result<(), ()> {
        if r < 0 {
            return Ok(());
        }
        let (x, y, w, h, r) = (x as i32, y as i32, w as i32, h as i32, r as i32);
        self.hline_wide(x + r, y, w - 2 * r, color)?;
        self.hline_wide(x + r, y + h - 1, w - 2 * r, color)?;
        self.vline_wide(x, y + r, h - 2 * r, color)?;
        self.vline_wide(x + w - 1, y + r, h - 2 * r, color)?;

        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut cx = 0;
        let mut cy = r;

        while cx < cy {
            if f >= 0 {
                cy -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            cx += 1;
            ddf_x += 2;
            f += ddf_x;

            self.pixel_wide(x + r + cx, y + r - cy, color)?;
            self.pixel_wide(x + r - cy, y + r + cx, color)?;
            self.pixel_wide(x + w - r - 1 - cx, y + r - cy, color)?;
            self.pixel_wide(x + w - r - 1 + cy, y + r + cx, color)?;
            self.pixel_wide(x + r + cx, y + h - r - 1 + cy, color)?;
            self.pixel_wide(x + r - cy, y + h - r - 1 - cx, color)?;
            self.pixel_wide(x + w - r - 1 - cx, y + h - r - 1 + cy, color)?;
            self.pixel_wide(x + w - r - 1 + cy, y + h - r - 1 - cx, color)?;
        }
        Ok(())
    }

    /// Fill a rounded rectangle: the central full-height body, plus four corner-filling
    /// vertical spans per step of the same midpoint decision variable the outline uses. A
    /// negative radius is a no-op.
    pub fn fill_round_rect(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        r: i16,
        color: Rgb565,
    ) -> Result<(), ()> {
        if r < 0 {
            return Ok(());
        }
        let (x, y, w, h, r) = (x as i32, y as i32, w as i32, h as i32, r as i32);
        self.fill_rect_wide(x + r, y, w - 2 * r, h, color)?;

        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut cx = 0;
        let mut cy = r;

        while cx < cy {
            if f >= 0 {
                cy -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            cx += 1;
            ddf_x += 2;
            f += ddf_x;

            self.vline_wide(x + r - cy, y + r - cx, 2 * cx + 1 + h - 2 * r, color)?;
            self.vline_wide(x + r + cy, y + r - cx, 2 * cx + 1 + h - 2 * r, color)?;
            self.vline_wide(x + w - r - 1 - cy, y + r - cx, 2 * cx + 1 + h - 2 * r, color)?;
            self.vline_wide(x + w - r - 1 + cy, y + r - cx, 2 * cx + 1 + h - 2 * r, color)?;
        }
        Ok(())
    }
}
