//! Extended region abstraction that allows requesting regions that "overscan" the display, i.e.
//! portions of the region may lie outside the displayable area. Image data written into
//! overscanned regions is silently discarded, to relieve the user from having to consider
//! boundary conditions in code where the region rectangle is dynamically computed.

use itertools::iproduct;

use crate::color::Rgb565;
use crate::display::{Display, PixelCoord};
use crate::interface;

/// A handle to a rectangular region which can be drawn into, but which is permitted to have
/// portions that lie outside the viewable area of the display. Pixels that fall outside the
/// viewable area are automatically dropped. This allows the user to avoid manually handling
/// boundary conditions if they simply want things drawn outside the viewable area to be cropped
/// off automatically.
///
/// The functionality is separated into its own kind of region so that the cost of the cropping
/// logic is not paid when it is known to be unnecessary.
///
/// These are intended to be short-lived, and contain a mutable borrow of the display that issued
/// them so clashing writes are prevented.
pub struct OverscannedRegion<'di, DI>
where
    DI: 'di + interface::DisplayInterface,
{
    display: &'di mut Display<DI>,
    upper_left: PixelCoord,
    lower_right: PixelCoord,
    /// The intersection of the requested rectangle with the logical display bounds, or `None`
    /// if they do not intersect at all.
    viewable: Option<(PixelCoord, PixelCoord)>,
}

/// Clip a value between some low and high limit.
fn clip<T: PartialOrd>(lo: T, x: T, hi: T) -> T {
    match () {
        _ if x > hi => hi,
        _ if x < lo => lo,
        _ => x,
    }
}

fn in_range<T: PartialOrd>(x: T, lo: T, hi: T) -> bool {
    x >= lo && x < hi
}

impl<'di, DI> OverscannedRegion<'di, DI>
where
    DI: 'di + interface::DisplayInterface,
{
    /// Construct a new region. This is only called by the factory method
    /// `Display::overscanned_region`, which checks the region coordinates are correctly
    /// ordered. Clipping happens here, against the display's logical dimensions under its
    /// current rotation.
    pub(super) fn new(
        display: &'di mut Display<DI>,
        upper_left: PixelCoord,
        lower_right: PixelCoord,
    ) -> Self {
        let viewable_ul = PixelCoord(
            clip(0, upper_left.0, display.width()),
            clip(0, upper_left.1, display.height()),
        );
        let viewable_lr = PixelCoord(
            clip(0, lower_right.0, display.width()),
            clip(0, lower_right.1, display.height()),
        );
        let viewable = if viewable_ul.0 == viewable_lr.0 || viewable_ul.1 == viewable_lr.1 {
            None
        } else {
            Some((viewable_ul, viewable_lr))
        };
        Self {
            display: display,
            upper_left: upper_left,
            lower_right: lower_right,
            viewable: viewable,
        }
    }

    /// Blit image data into the region, left-to-right and top-to-bottom, covering the full
    /// requested rectangle. The sequence of pixels is filtered such that only pixels which
    /// intersect the displayable area are transmitted to the hardware; if the region lies
    /// entirely off-screen, the iterator is not consumed and nothing is sent at all. The
    /// iterator must yield at least enough pixels to cover the viewable intersection.
    pub fn draw<I>(&mut self, iter: I) -> Result<(), ()>
    where
        I: Iterator<Item = Rgb565>,
    {
        let (viewable_ul, viewable_lr) = match self.viewable {
            Some(v) => v,
            None => return Ok(()),
        };
        let input_coords = iproduct!(
            self.upper_left.1..self.lower_right.1,
            self.upper_left.0..self.lower_right.0
        );
        let only_viewable = input_coords
            .zip(iter)
            .filter(|((r, c), _)| {
                in_range(*r, viewable_ul.1, viewable_lr.1)
                    && in_range(*c, viewable_ul.0, viewable_lr.0)
            })
            .map(|(_, px)| px);
        self.display.set_window(
            viewable_ul.0 as u16,
            viewable_ul.1 as u16,
            (viewable_lr.0 - 1) as u16,
            (viewable_lr.1 - 1) as u16,
        )?;
        self.display.stream_pixels(only_viewable)
    }
}

#[cfg(test)]
mod tests {
    use crate::color::Rgb565;
    use crate::display::{Display, PixelCoord as Px};
    use crate::interface::test_spy::{Sent, TestSpyInterface};

    /// Row-major test pixels with recognizable payloads 1, 2, 3, ...
    fn pixels(n: u16) -> impl Iterator<Item = Rgb565> {
        (1..=n).map(Rgb565)
    }

    #[test]
    fn draw_interior() {
        let di = TestSpyInterface::new();
        let mut disp = Display::new(di.split(), Px(240, 320), Px(0, 0));
        {
            let mut region = disp.overscanned_region(Px(12, 10), Px(14, 12)).unwrap();
            region.draw(pixels(4)).unwrap();
        }
        #[cfg_attr(rustfmt, rustfmt_skip)]
        di.check_multi(sends!(
            0x2A, [0, 12, 0, 13],
            0x2B, [0, 10, 0, 11],
            0x2C,
            [0, 1, 0, 2, 0, 3, 0, 4]
        ));
    }

    #[test]
    fn draw_complete_crop() {
        let di = TestSpyInterface::new();
        let mut disp = Display::new(di.split(), Px(240, 320), Px(0, 0));
        {
            let mut region = disp.overscanned_region(Px(-8, -4), Px(-4, -2)).unwrap();
            region.draw(pixels(8)).unwrap();
        }
        assert!(di.sent().is_empty());
        {
            let mut region = disp.overscanned_region(Px(240, 320), Px(244, 322)).unwrap();
            region.draw(pixels(8)).unwrap();
        }
        assert!(di.sent().is_empty());
    }

    #[test]
    fn draw_crop_row_edge() {
        let di = TestSpyInterface::new();
        let mut disp = Display::new(di.split(), Px(240, 320), Px(0, 0));
        {
            // Rows -1 and 0: the first input row is cropped away.
            let mut region = disp.overscanned_region(Px(0, -1), Px(2, 1)).unwrap();
            region.draw(pixels(4)).unwrap();
        }
        #[cfg_attr(rustfmt, rustfmt_skip)]
        di.check_multi(sends!(
            0x2A, [0, 0, 0, 1],
            0x2B, [0, 0, 0, 0],
            0x2C,
            [0, 3, 0, 4]
        ));
    }

    #[test]
    fn draw_crop_col_edge() {
        let di = TestSpyInterface::new();
        let mut disp = Display::new(di.split(), Px(240, 320), Px(0, 0));
        {
            // Columns -1 and 0: the left column of each input row is cropped away.
            let mut region = disp.overscanned_region(Px(-1, 0), Px(1, 2)).unwrap();
            region.draw(pixels(4)).unwrap();
        }
        #[cfg_attr(rustfmt, rustfmt_skip)]
        di.check_multi(sends!(
            0x2A, [0, 0, 0, 0],
            0x2B, [0, 0, 0, 1],
            0x2C,
            [0, 2, 0, 4]
        ));
    }

    #[test]
    fn draw_crop_lower_right_corner() {
        let di = TestSpyInterface::new();
        let mut disp = Display::new(di.split(), Px(240, 320), Px(0, 0));
        {
            // A 3x3 rectangle hanging off the bottom-right corner: only its 2x2 upper-left
            // quadrant is viewable.
            let mut region = disp.overscanned_region(Px(238, 318), Px(241, 321)).unwrap();
            region.draw(pixels(9)).unwrap();
        }
        #[cfg_attr(rustfmt, rustfmt_skip)]
        di.check_multi(sends!(
            0x2A, [0, 238, 0, 239],
            0x2B, [1, 62, 1, 63],
            0x2C,
            [0, 1, 0, 2, 0, 4, 0, 5]
        ));
    }

    #[test]
    fn draw_crop_applies_ram_offset() {
        let di = TestSpyInterface::new();
        let mut disp = Display::new(di.split(), Px(240, 280), Px(0, 20));
        {
            let mut region = disp.overscanned_region(Px(0, -1), Px(2, 1)).unwrap();
            region.draw(pixels(4)).unwrap();
        }
        #[cfg_attr(rustfmt, rustfmt_skip)]
        di.check_multi(sends!(
            0x2A, [0, 0, 0, 1],
            0x2B, [0, 20, 0, 20],
            0x2C,
            [0, 3, 0, 4]
        ));
    }
}
