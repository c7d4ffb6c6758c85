//! The RGB565 packed pixel format used by the ST7789 in 16-bit color mode.

/// A packed 16-bit RGB565 color value: 5 bits of red, 6 bits of green, and 5 bits of blue.
///
/// The in-RAM representation is the raw packed word; the wire representation is the same word in
/// big-endian byte order, which is how the controller consumes pixels during a RAMWR stream.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Rgb565 = Rgb565(0x0000);
    pub const WHITE: Rgb565 = Rgb565(0xFFFF);
    pub const RED: Rgb565 = Rgb565(0xF800);
    pub const GREEN: Rgb565 = Rgb565(0x07E0);
    pub const BLUE: Rgb565 = Rgb565(0x001F);
    pub const CYAN: Rgb565 = Rgb565(0x07FF);
    pub const MAGENTA: Rgb565 = Rgb565(0xF81F);
    pub const YELLOW: Rgb565 = Rgb565(0xFFE0);
    pub const ORANGE: Rgb565 = Rgb565(0xFC00);
    pub const PURPLE: Rgb565 = Rgb565(0x8010);
    pub const PINK: Rgb565 = Rgb565(0xFE19);
    pub const LIGHT_GREY: Rgb565 = Rgb565(0xC618);
    pub const DARK_GREY: Rgb565 = Rgb565(0x7BEF);

    /// Pack an 8-bit-per-channel color into RGB565. The low bits of each channel are truncated,
    /// not rounded: red and blue keep their 5 most significant bits, green its 6.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb565(((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3))
    }

    /// The red channel, as the truncated 5-bit value restored to its 8-bit position.
    pub fn r(&self) -> u8 {
        ((self.0 >> 8) & 0xF8) as u8
    }

    /// The green channel, as the truncated 6-bit value restored to its 8-bit position.
    pub fn g(&self) -> u8 {
        ((self.0 >> 3) & 0xFC) as u8
    }

    /// The blue channel, as the truncated 5-bit value restored to its 8-bit position.
    pub fn b(&self) -> u8 {
        ((self.0 << 3) & 0xF8) as u8
    }

    /// The big-endian wire encoding of this pixel.
    pub fn to_be_bytes(self) -> [u8; 2] {
        [(self.0 >> 8) as u8, self.0 as u8]
    }
}
