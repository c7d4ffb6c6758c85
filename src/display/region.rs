//! Region abstraction for blitting pre-rendered image data into rectangular regions of the
//! display.

use crate::color::Rgb565;
use crate::display::{Display, PixelCoord};
use crate::interface;

/// A handle to a rectangular region of a display which can be drawn into.
pub struct Region<'di, DI>
where
    DI: 'di + interface::DisplayInterface,
{
    display: &'di mut Display<DI>,
    upper_left: PixelCoord,
    lower_right: PixelCoord,
}

impl<'di, DI> Region<'di, DI>
where
    DI: 'di + interface::DisplayInterface,
{
    /// Construct a new region. This is only called by the factory method `Display::region`,
    /// which checks that the region coordinates are ordered and within the viewable area.
    pub(super) fn new(
        display: &'di mut Display<DI>,
        upper_left: PixelCoord,
        lower_right: PixelCoord,
    ) -> Self {
        Self {
            display: display,
            upper_left: upper_left,
            lower_right: lower_right,
        }
    }

    /// The number of pixels a full blit of this region requires.
    pub fn pixels(&self) -> usize {
        let cols = (self.lower_right.0 - self.upper_left.0) as usize;
        let rows = (self.lower_right.1 - self.upper_left.1) as usize;
        cols * rows
    }

    /// Blit image data into the region, left-to-right and top-to-bottom. The controller's
    /// address window mechanism requires the payload to match the window exactly, so `pixels`
    /// must contain exactly `self.pixels()` entries or the call fails without touching the
    /// bus. Pixel data is streamed through a fixed staging buffer, so arbitrarily large
    /// regions draw in constant memory.
    pub fn draw(&mut self, pixels: &[Rgb565]) -> Result<(), ()> {
        if pixels.len() != self.pixels() {
            return Err(());
        }
        self.display.set_window(
            self.upper_left.0 as u16,
            self.upper_left.1 as u16,
            (self.lower_right.0 - 1) as u16,
            (self.lower_right.1 - 1) as u16,
        )?;
        self.display.stream_pixels(pixels.iter().copied())
    }
}
