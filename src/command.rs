//! The command set for the ST7789.
//!
//! Note 1: The display RAM of the ST7789 is 240 columns by 320 rows, one 16-bit pixel per
//! address in 16bpp mode. Column and row address windows are set with 16-bit big-endian start
//! and end bounds, both inclusive. When the MADCTL row/column exchange bit is set (90 and 270
//! degree rotations), the column address register walks the long axis of the RAM, so both
//! address commands accept the full 0..=319 range rather than each being checked against its
//! native axis.

use crate::interface::DisplayInterface;

/// Fixed properties of the display controller RAM.
pub mod consts {
    pub const NUM_PIXEL_COLS: u16 = 240;
    pub const NUM_PIXEL_ROWS: u16 = 320;
    pub const PIXEL_COL_MAX: u16 = NUM_PIXEL_COLS - 1;
    pub const PIXEL_ROW_MAX: u16 = NUM_PIXEL_ROWS - 1;
}

use self::consts::*;

/// Setting of the MADCTL memory access control register, expressed as a rotation of the panel's
/// native portrait orientation. The address-order bits and the row/column exchange bit are
/// driven together; the 90 and 270 degree values exchange rows and columns, which swaps the
/// logical width and height of the display.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rotation {
    /// Native portrait orientation.
    Deg0,
    /// Landscape.
    Deg90,
    /// Upside-down portrait.
    Deg180,
    /// Upside-down landscape.
    Deg270,
}

impl Rotation {
    /// Map a count of quarter turns onto a rotation, reducing modulo 4, so that e.g. 5 quarter
    /// turns is one.
    pub fn from_quadrants(quadrants: u8) -> Self {
        match quadrants % 4 {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    pub(crate) fn madctl_bits(self) -> u8 {
        match self {
            Rotation::Deg0 => 0x00,
            Rotation::Deg90 => 0x60,
            Rotation::Deg180 => 0xC0,
            Rotation::Deg270 => 0xA0,
        }
    }

    /// Whether this rotation exchanges rows and columns, swapping the logical dimensions.
    pub fn swaps_axes(self) -> bool {
        match self {
            Rotation::Deg90 | Rotation::Deg270 => true,
            Rotation::Deg0 | Rotation::Deg180 => false,
        }
    }
}

/// Setting of the COLMOD interface pixel format register.
#[derive(Clone, Copy)]
pub enum PixelFormat {
    /// 12 bits per pixel, 4:4:4.
    Bpp12,
    /// 16 bits per pixel, RGB565. The only format this driver streams pixels in.
    Bpp16,
    /// 18 bits per pixel, 6:6:6.
    Bpp18,
}

#[derive(Clone, Copy)]
pub enum Command {
    /// Software reset. The host must wait 120ms or more before sending further commands.
    SoftReset,
    /// Control sleep mode. Entering or leaving sleep requires a 120ms settling delay.
    SetSleepMode(bool),
    /// Return to normal (non-partial) display mode.
    NormalDisplayOn,
    /// Control display color inversion. Many ST7789 panel modules are wired such that inversion
    /// ON is the setting that yields non-inverted colors on the glass.
    SetInversion(bool),
    /// Control whether the panel output is enabled. When off, the display blanks but RAM
    /// contents are preserved.
    SetDisplayOn(bool),
    /// Set the column start and end address range, inclusive, used when writing to the display
    /// RAM. The column address pointer is reset to the start so that `WriteImageData` begins
    /// writing there. (Note 1)
    SetColumnAddress(u16, u16),
    /// Set the row start and end address range, inclusive, used when writing to the display RAM.
    /// The row address pointer is reset to the start. (Note 1)
    SetRowAddress(u16, u16),
    /// Set the MADCTL memory access control register from a rotation. See `Rotation`.
    SetAddressMode(Rotation),
    /// Set the interface pixel format. See `PixelFormat`.
    SetPixelFormat(PixelFormat),
}

pub enum BufCommand<'buf> {
    /// Write image data into display RAM. Writing begins at the address window configured by
    /// `SetColumnAddress` and `SetRowAddress` and proceeds in row-major order. Sending this
    /// command with an empty buffer arms the controller for streaming: subsequent raw data
    /// writes continue the same RAM write until the window's pixel count is satisfied.
    WriteImageData(&'buf [u8]),
}

macro_rules! ok_command {
    ($buf:ident, $cmd:expr,[]) => {
        Ok(($cmd, &$buf[..0]))
    };
    ($buf:ident, $cmd:expr,[$arg0:expr]) => {{
        $buf[0] = $arg0;
        Ok(($cmd, &$buf[..1]))
    }};
    ($buf:ident, $cmd:expr,[$arg0:expr, $arg1:expr, $arg2:expr, $arg3:expr]) => {{
        $buf[0] = $arg0;
        $buf[1] = $arg1;
        $buf[2] = $arg2;
        $buf[3] = $arg3;
        Ok(($cmd, &$buf[..4]))
    }};
}

impl Command {
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), ()>
    where
        DI: DisplayInterface,
    {
        let mut arg_buf = [0u8; 4];
        let (cmd, data) = match self {
            Command::SoftReset => ok_command!(arg_buf, 0x01, []),
            Command::SetSleepMode(ena) => ok_command!(
                arg_buf,
                match ena {
                    true => 0x10,
                    false => 0x11,
                },
                []
            ),
            Command::NormalDisplayOn => ok_command!(arg_buf, 0x13, []),
            Command::SetInversion(ena) => ok_command!(
                arg_buf,
                match ena {
                    true => 0x21,
                    false => 0x20,
                },
                []
            ),
            Command::SetDisplayOn(ena) => ok_command!(
                arg_buf,
                match ena {
                    true => 0x29,
                    false => 0x28,
                },
                []
            ),
            Command::SetColumnAddress(start, end) => match (start, end) {
                (s, e) if s <= e && e <= PIXEL_ROW_MAX => ok_command!(
                    arg_buf,
                    0x2A,
                    [(s >> 8) as u8, s as u8, (e >> 8) as u8, e as u8]
                ),
                _ => Err(()),
            },
            Command::SetRowAddress(start, end) => match (start, end) {
                (s, e) if s <= e && e <= PIXEL_ROW_MAX => ok_command!(
                    arg_buf,
                    0x2B,
                    [(s >> 8) as u8, s as u8, (e >> 8) as u8, e as u8]
                ),
                _ => Err(()),
            },
            Command::SetAddressMode(rotation) => {
                ok_command!(arg_buf, 0x36, [rotation.madctl_bits()])
            }
            Command::SetPixelFormat(format) => ok_command!(
                arg_buf,
                0x3A,
                [match format {
                    PixelFormat::Bpp12 => 0x33,
                    PixelFormat::Bpp16 => 0x55,
                    PixelFormat::Bpp18 => 0x66,
                }]
            ),
        }?;
        iface.send_command(cmd)?;
        if data.len() == 0 {
            Ok(())
        } else {
            iface.send_data(data)
        }
    }
}

impl<'a> BufCommand<'a> {
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), ()>
    where
        DI: DisplayInterface,
    {
        let (cmd, data) = match self {
            BufCommand::WriteImageData(buf) => (0x2C, buf),
        };
        iface.send_command(cmd)?;
        if data.len() == 0 {
            Ok(())
        } else {
            iface.send_data(data)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::test_spy::TestSpyInterface;

    #[test]
    fn set_column_address() {
        let mut di = TestSpyInterface::new();
        Command::SetColumnAddress(23, 42).send(&mut di).unwrap();
        di.check(0x2A, &[0, 23, 0, 42]);
        di.clear();
        Command::SetColumnAddress(0, 319).send(&mut di).unwrap();
        di.check(0x2A, &[0, 0, 0x01, 0x3F]);
        assert_eq!(Command::SetColumnAddress(42, 23).send(&mut di), Err(()));
        assert_eq!(Command::SetColumnAddress(0, 320).send(&mut di), Err(()));
    }

    #[test]
    fn set_row_address() {
        let mut di = TestSpyInterface::new();
        Command::SetRowAddress(23, 297).send(&mut di).unwrap();
        di.check(0x2B, &[0, 23, 0x01, 0x29]);
        assert_eq!(Command::SetRowAddress(42, 23).send(&mut di), Err(()));
        assert_eq!(Command::SetRowAddress(23, 320).send(&mut di), Err(()));
    }

    #[test]
    fn sleep_mode() {
        let mut di = TestSpyInterface::new();
        Command::SetSleepMode(true).send(&mut di).unwrap();
        di.check(0x10, &[]);
        di.clear();
        Command::SetSleepMode(false).send(&mut di).unwrap();
        di.check(0x11, &[]);
    }

    #[test]
    fn inversion_and_display_on() {
        let mut di = TestSpyInterface::new();
        Command::SetInversion(true).send(&mut di).unwrap();
        di.check(0x21, &[]);
        di.clear();
        Command::SetInversion(false).send(&mut di).unwrap();
        di.check(0x20, &[]);
        di.clear();
        Command::SetDisplayOn(true).send(&mut di).unwrap();
        di.check(0x29, &[]);
        di.clear();
        Command::SetDisplayOn(false).send(&mut di).unwrap();
        di.check(0x28, &[]);
    }

    #[test]
    fn set_address_mode() {
        let mut di = TestSpyInterface::new();
        Command::SetAddressMode(Rotation::Deg0)
            .send(&mut di)
            .unwrap();
        di.check(0x36, &[0x00]);
        di.clear();
        Command::SetAddressMode(Rotation::Deg90)
            .send(&mut di)
            .unwrap();
        di.check(0x36, &[0x60]);
        di.clear();
        Command::SetAddressMode(Rotation::Deg180)
            .send(&mut di)
            .unwrap();
        di.check(0x36, &[0xC0]);
        di.clear();
        Command::SetAddressMode(Rotation::Deg270)
            .send(&mut di)
            .unwrap();
        di.check(0x36, &[0xA0]);
    }

    #[test]
    fn set_pixel_format() {
        let mut di = TestSpyInterface::new();
        Command::SetPixelFormat(PixelFormat::Bpp16)
            .send(&mut di)
            .unwrap();
        di.check(0x3A, &[0x55]);
        di.clear();
        Command::SetPixelFormat(PixelFormat::Bpp12)
            .send(&mut di)
            .unwrap();
        di.check(0x3A, &[0x33]);
        di.clear();
        Command::SetPixelFormat(PixelFormat::Bpp18)
            .send(&mut di)
            .unwrap();
        di.check(0x3A, &[0x66]);
    }

    #[test]
    fn rotation_from_quadrants_reduces_modulo_4() {
        assert_eq!(Rotation::from_quadrants(0), Rotation::Deg0);
        assert_eq!(Rotation::from_quadrants(1), Rotation::Deg90);
        assert_eq!(Rotation::from_quadrants(2), Rotation::Deg180);
        assert_eq!(Rotation::from_quadrants(3), Rotation::Deg270);
        assert_eq!(Rotation::from_quadrants(5), Rotation::Deg90);
        assert_eq!(Rotation::from_quadrants(255), Rotation::Deg270);
    }

    #[test]
    fn write_image_data() {
        let mut di = TestSpyInterface::new();
        let image_buf = (0..24u8).collect::<Vec<u8>>();
        BufCommand::WriteImageData(&image_buf[..])
            .send(&mut di)
            .unwrap();
        di.check(0x2C, &(0..24u8).collect::<Vec<_>>()[..]);
    }

    #[test]
    fn write_image_data_empty_arms_streaming() {
        let mut di = TestSpyInterface::new();
        BufCommand::WriteImageData(&[]).send(&mut di).unwrap();
        di.check(0x2C, &[]);
    }
}
