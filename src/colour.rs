use serde::{Deserialize, Serialize};

/// A fill colour for text runs, expressed in the RGB or grey colour spaces.
///
/// In configuration files colours are written as tagged objects, e.g.
/// `{ "grey": { "g": 0.5 } }` or `{ "rgb": { "r": 0.1, "g": 0.2, "b": 0.6 } }`.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Default for Colour {
    fn default() -> Self {
        colours::BLACK
    }
}

/// Pre-defined colours used by the built-in style sheet
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    /// The mid grey used for footer small print
    pub const GREY: Colour = Colour::Grey { g: 128.0 / 255.0 };
}
