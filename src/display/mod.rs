//! The main API to the display driver. It provides a builder API to configure the display, the
//! shape-drawing and text-printing primitives, and methods for obtaining `Region` instances
//! which can be used to stream pre-rendered image data to the display.

// This has to be here in order to be usable by mods declared afterwards.
#[cfg(test)]
#[macro_use]
pub mod testing {
    macro_rules! send {
        ([$($d:tt),*]) => {Sent::Data(vec![$($d,)*])};
        ($c:tt) => {Sent::Cmd($c)};
    }
    macro_rules! sends {
        ($($e:tt),*) => {&[$(send!($e),)*]};
    }
}

pub mod graphics;
pub mod overscanned_region;
pub mod region;
pub mod text;

use embedded_hal::blocking::delay::DelayMs;

use crate::color::Rgb565;
use crate::command::consts::*;
use crate::command::{BufCommand, Command, PixelFormat, Rotation};
use crate::config::Config;
use crate::display::overscanned_region::OverscannedRegion;
use crate::display::region::Region;
use crate::display::text::TextCursor;
use crate::interface;

/// A pixel coordinate pair of `column` and `row`.
#[derive(Clone, Copy, Debug)]
pub struct PixelCoord(pub i16, pub i16);

/// Capacity, in pixels, of the staging buffer used to batch solid fills and pixel streams into
/// few large bus transactions instead of one per pixel. Each pixel is 2 bytes on the wire, so
/// the buffer occupies twice this many bytes of stack per drawing call. The effective chunk
/// size is tunable below this capacity with `Display::set_fill_chunk`.
pub const FILL_CHUNK_PIXELS: usize = 64;

/// A driver for an ST7789 display.
pub struct Display<DI>
where
    DI: interface::DisplayInterface,
{
    iface: DI,
    native_size: PixelCoord,
    ram_offset: PixelCoord,
    rotation: Rotation,
    width: i16,
    height: i16,
    cursor: TextCursor,
    /// Effective staging-chunk size in pixels, in [1, `FILL_CHUNK_PIXELS`].
    chunk_px: usize,
    /// Pixels the armed address window still expects before the controller's RAM write
    /// completes. Every streamed pixel decrements this; arming a new window asserts it reached
    /// zero, which catches window/payload mismatches that would otherwise silently desync the
    /// controller's write pointer.
    window_px: u32,
}

impl<DI> Display<DI>
where
    DI: interface::DisplayInterface,
{
    /// Construct a new display driver for a panel with viewable dimensions `native_size`
    /// (columns, rows, in the native portrait orientation), connected to the interface `iface`.
    ///
    /// Panel modules smaller than the controller's 240x320 RAM are usually wired starting in
    /// the middle of the driver lines for mechanical PCB layout reasons. For such modules,
    /// `ram_offset` gives the RAM column and row corresponding to pixel (0, 0) of the glass, so
    /// that drawing operations can remove the offset automatically. A common 240x280 module,
    /// for example, uses an offset of `PixelCoord(0, 20)`.
    pub fn new(iface: DI, native_size: PixelCoord, ram_offset: PixelCoord) -> Self {
        if false
            || native_size.0 <= 0
            || native_size.1 <= 0
            || ram_offset.0 < 0
            || ram_offset.1 < 0
            || ram_offset.0 + native_size.0 > NUM_PIXEL_COLS as i16
            || ram_offset.1 + native_size.1 > NUM_PIXEL_ROWS as i16
        {
            panic!("Display size or RAM offset not supported by ST7789.");
        }
        Display {
            iface: iface,
            native_size: native_size,
            ram_offset: ram_offset,
            rotation: Rotation::Deg0,
            width: native_size.0,
            height: native_size.1,
            cursor: TextCursor::new(),
            chunk_px: FILL_CHUNK_PIXELS,
            window_px: 0,
        }
    }

    /// Tune the per-transaction chunk size used when streaming pixels, in pixels, clamped to
    /// [1, `FILL_CHUNK_PIXELS`]. Some SPI peripherals and DMA engines have a sweet spot below
    /// the staging buffer capacity; lowering the chunk trades more transactions for smaller
    /// ones.
    pub fn set_fill_chunk(&mut self, pixels: usize) {
        self.chunk_px = match pixels {
            0 => 1,
            p if p > FILL_CHUNK_PIXELS => FILL_CHUNK_PIXELS,
            p => p,
        };
    }

    /// Initialize the display with a config message. The vendor power-on sequence requires
    /// settling delays after several of the commands, so a delay provider is borrowed for the
    /// duration of the call.
    pub fn init<D>(&mut self, config: Config, delay: &mut D) -> Result<(), ()>
    where
        D: DelayMs<u8>,
    {
        Command::SoftReset.send(&mut self.iface)?;
        delay.delay_ms(150);
        Command::SetSleepMode(false).send(&mut self.iface)?;
        delay.delay_ms(120);
        Command::SetPixelFormat(PixelFormat::Bpp16).send(&mut self.iface)?;
        self.set_rotation(config.rotation)?;
        config.send(&mut self.iface)?;
        delay.delay_ms(10);
        Command::NormalDisplayOn.send(&mut self.iface)?;
        delay.delay_ms(10);
        Command::SetDisplayOn(true).send(&mut self.iface)?;
        delay.delay_ms(120);
        Ok(())
    }

    /// Control sleep mode. The controller requires 120ms after leaving sleep before it will
    /// accept further RAM writes; that wait is the caller's to perform.
    pub fn sleep(&mut self, enabled: bool) -> Result<(), ()> {
        Command::SetSleepMode(enabled).send(&mut self.iface)
    }

    /// Control display color inversion.
    pub fn invert(&mut self, enabled: bool) -> Result<(), ()> {
        Command::SetInversion(enabled).send(&mut self.iface)
    }

    /// Control whether the panel output is enabled. RAM contents are preserved while off.
    pub fn display_on(&mut self, enabled: bool) -> Result<(), ()> {
        Command::SetDisplayOn(enabled).send(&mut self.iface)
    }

    /// Set the display rotation, re-deriving the logical dimensions: the 90 and 270 degree
    /// rotations exchange rows and columns, so `width()` and `height()` swap relative to the
    /// native panel dimensions.
    pub fn set_rotation(&mut self, rotation: Rotation) -> Result<(), ()> {
        Command::SetAddressMode(rotation).send(&mut self.iface)?;
        if rotation.swaps_axes() {
            self.width = self.native_size.1;
            self.height = self.native_size.0;
        } else {
            self.width = self.native_size.0;
            self.height = self.native_size.1;
        }
        self.rotation = rotation;
        Ok(())
    }

    /// The logical width of the display under the current rotation.
    pub fn width(&self) -> i16 {
        self.width
    }

    /// The logical height of the display under the current rotation.
    pub fn height(&self) -> i16 {
        self.height
    }

    /// The current rotation.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Arm a RAM address window covering the inclusive logical rectangle (`x0`, `y0`) to
    /// (`x1`, `y1`), and put the controller in streaming mode. The bounds must already be
    /// ordered and clipped by the caller. The panel RAM offset is applied here, to the column
    /// and row addresses, as the final step before talking to the controller.
    ///
    /// After this, the controller expects exactly (x1-x0+1)*(y1-y0+1) pixels of data; writing
    /// more or fewer desyncs its write pointer for the next window. `window_px` tracks the
    /// expectation so debug builds can assert the contract.
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), ()> {
        debug_assert_eq!(
            self.window_px, 0,
            "previous address window was not exactly filled"
        );
        let co = self.ram_offset.0 as u16;
        let ro = self.ram_offset.1 as u16;
        Command::SetColumnAddress(x0 + co, x1 + co).send(&mut self.iface)?;
        Command::SetRowAddress(y0 + ro, y1 + ro).send(&mut self.iface)?;
        BufCommand::WriteImageData(&[]).send(&mut self.iface)?;
        self.window_px = (x1 - x0 + 1) as u32 * (y1 - y0 + 1) as u32;
        Ok(())
    }

    /// Stream `count` copies of `color` into the armed window. The staging buffer is filled
    /// with the color once and retransmitted whole while at least a full chunk of pixels
    /// remains, with one partial transaction for the remainder.
    fn fill_window(&mut self, count: u32, color: Rgb565) -> Result<(), ()> {
        debug_assert!(count <= self.window_px, "fill overruns the armed window");
        let chunk = self.chunk_px;
        let mut buf = [0u8; FILL_CHUNK_PIXELS * 2];
        let [hi, lo] = color.to_be_bytes();
        for pair in buf[..chunk * 2].chunks_exact_mut(2) {
            pair[0] = hi;
            pair[1] = lo;
        }

        let mut remaining = count;
        while remaining >= chunk as u32 {
            self.iface.send_data(&buf[..chunk * 2])?;
            remaining -= chunk as u32;
        }
        if remaining > 0 {
            self.iface.send_data(&buf[..remaining as usize * 2])?;
        }
        self.window_px = self.window_px.saturating_sub(count);
        Ok(())
    }

    /// Stream caller-supplied pixels into the armed window, chunking them through the staging
    /// buffer to bound memory. Stops when the window's pixel expectation is satisfied; the
    /// iterator must yield at least that many pixels or the window is left underfilled (which
    /// debug builds catch at the next `set_window`).
    fn stream_pixels<I>(&mut self, pixels: I) -> Result<(), ()>
    where
        I: Iterator<Item = Rgb565>,
    {
        let chunk_bytes = self.chunk_px * 2;
        let mut buf = [0u8; FILL_CHUNK_PIXELS * 2];
        let mut len = 0;
        for px in pixels.take(self.window_px as usize) {
            let be = px.to_be_bytes();
            buf[len] = be[0];
            buf[len + 1] = be[1];
            len += 2;
            if len == chunk_bytes {
                self.iface.send_data(&buf[..len])?;
                self.window_px -= (len / 2) as u32;
                len = 0;
            }
        }
        if len > 0 {
            self.iface.send_data(&buf[..len])?;
            self.window_px -= (len / 2) as u32;
        }
        debug_assert_eq!(self.window_px, 0, "pixel stream underfilled the armed window");
        Ok(())
    }

    /// Construct a rectangular region onto which to stream pre-rendered image data.
    /// `upper_left` is inclusive and `lower_right` exclusive, in logical coordinates, and the
    /// rectangle must lie entirely within the logical display bounds.
    ///
    /// Regions are intended to be short-lived, and mutably borrow the display so clashing
    /// writes are prevented.
    pub fn region<'di>(
        &'di mut self,
        upper_left: PixelCoord,
        lower_right: PixelCoord,
    ) -> Result<Region<'di, DI>, ()> {
        if false
            || upper_left.0 < 0
            || upper_left.1 < 0
            || lower_right.0 > self.width
            || lower_right.1 > self.height
            || upper_left.0 >= lower_right.0
            || upper_left.1 >= lower_right.1
        {
            return Err(());
        }
        Ok(Region::new(self, upper_left, lower_right))
    }

    /// Construct a rectangular region which silently discards overscan: the rectangle may hang
    /// off any edge of the display, and pixels falling outside the logical bounds are cropped
    /// instead of being an error. This suits callers like compositor flush callbacks whose
    /// damage rectangles are computed dynamically.
    pub fn overscanned_region<'di>(
        &'di mut self,
        upper_left: PixelCoord,
        lower_right: PixelCoord,
    ) -> Result<OverscannedRegion<'di, DI>, ()> {
        if upper_left.0 >= lower_right.0 || upper_left.1 >= lower_right.1 {
            return Err(());
        }
        Ok(OverscannedRegion::new(self, upper_left, lower_right))
    }
}
