//! Driver library for the Sitronix ST7789 TFT-LCD display controller.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod color;
pub mod command;
pub mod config;
pub mod display;
pub mod interface;

// Re-exports for primary API.
pub use crate::color::Rgb565;
pub use crate::command::{consts, PixelFormat, Rotation};
pub use crate::config::Config;
pub use crate::display::text::{GlyphRenderer, TextCursor};
pub use crate::display::{Display, PixelCoord};
pub use crate::interface::spi::SpiInterface;
