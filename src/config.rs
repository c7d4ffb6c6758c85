//! Defines a struct for storing the panel-dependent settings applied when initializing the
//! ST7789.

use crate::command::*;
use crate::interface;

/// A configuration for the display. The inversion setting is mandatory because it is dictated
/// by how the panel module wires the liquid crystal to the controller: most ST7789 modules
/// require inversion ON to show non-inverted colors, but some do not, and the wrong value
/// yields a negative image. See the display module datasheet. The remaining options may be set
/// with the provided builder methods.
pub struct Config {
    pub(crate) inversion_cmd: Command,
    pub(crate) rotation: Rotation,
}

impl Config {
    pub fn new(invert: bool) -> Self {
        Config {
            inversion_cmd: Command::SetInversion(invert),
            rotation: Rotation::Deg0,
        }
    }

    /// Extend this `Config` with an initial rotation other than the native portrait
    /// orientation. The rotation can also be changed after initialization with
    /// `Display::set_rotation`.
    pub fn rotation(self, rotation: Rotation) -> Self {
        Self { rotation, ..self }
    }

    /// Transmit the commands necessary to put the display at `iface` into the configuration
    /// encoded in `self`. The rotation is not sent here; `Display::init` applies it because it
    /// also adjusts the logical display dimensions.
    pub(crate) fn send<DI>(&self, iface: &mut DI) -> Result<(), ()>
    where
        DI: interface::DisplayInterface,
    {
        self.inversion_cmd.send(iface)
    }
}
