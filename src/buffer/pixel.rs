//! RGBA pixel value type

use image::Rgba;

/// One RGBA pixel with 8 bits per channel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pixel(pub [u8; 4]);

impl Pixel {
    /// Fully transparent black, used to fill rotation padding and snapped holes
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);

    /// Create a pixel from its four channels
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Create an opaque pixel
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, u8::MAX])
    }

    /// Red channel
    pub const fn r(self) -> u8 {
        self.0[0]
    }

    /// Green channel
    pub const fn g(self) -> u8 {
        self.0[1]
    }

    /// Blue channel
    pub const fn b(self) -> u8 {
        self.0[2]
    }

    /// Alpha channel
    pub const fn a(self) -> u8 {
        self.0[3]
    }

    /// Largest of the three color channels
    pub fn max_rgb(self) -> u8 {
        self.r().max(self.g()).max(self.b())
    }

    /// Smallest of the three color channels
    pub fn min_rgb(self) -> u8 {
        self.r().min(self.g()).min(self.b())
    }
}

impl From<Rgba<u8>> for Pixel {
    fn from(value: Rgba<u8>) -> Self {
        Self(value.0)
    }
}

impl From<Pixel> for Rgba<u8> {
    fn from(value: Pixel) -> Self {
        Self(value.0)
    }
}

impl From<[u8; 4]> for Pixel {
    fn from(value: [u8; 4]) -> Self {
        Self(value)
    }
}
