//! Catalog of scalar sort keys
//!
//! Every key maps a pixel onto [0, 1] so keys are comparable across the catalog.
//! Equal keys keep their input order because sorting is stable.

use crate::buffer::Pixel;
use crate::io::error::{SortError, unknown_function};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const CHANNEL_MAX: f64 = u8::MAX as f64;

/// Ordering criterion applied inside each interval
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// HSV value (brightest channel)
    #[default]
    Lightness,
    /// Sum of the three color channels
    Intensity,
    /// HSV hue
    Hue,
    /// HSV saturation
    Saturation,
    /// Red channel
    Red,
    /// Green channel
    Green,
    /// Blue channel
    Blue,
    /// Alpha channel
    Alpha,
    /// Smallest color channel
    Minimum,
    /// Largest color channel
    Maximum,
}

impl SortKey {
    /// Every key in catalog order
    pub const ALL: [Self; 10] = [
        Self::Lightness,
        Self::Intensity,
        Self::Hue,
        Self::Saturation,
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::Alpha,
        Self::Minimum,
        Self::Maximum,
    ];

    /// Catalog name of the key
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lightness => "lightness",
            Self::Intensity => "intensity",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Alpha => "alpha",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
        }
    }

    /// Names of every key in catalog order
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|key| key.name()).collect()
    }

    /// Scalar key of `pixel` in [0, 1]
    pub fn key(self, pixel: Pixel) -> f64 {
        match self {
            Self::Lightness => rgb_to_hsv(pixel).2,
            Self::Intensity => {
                let sum = u16::from(pixel.r()) + u16::from(pixel.g()) + u16::from(pixel.b());
                f64::from(sum) / (3.0 * CHANNEL_MAX)
            }
            Self::Hue => rgb_to_hsv(pixel).0,
            Self::Saturation => rgb_to_hsv(pixel).1,
            Self::Red => channel(pixel.r()),
            Self::Green => channel(pixel.g()),
            Self::Blue => channel(pixel.b()),
            Self::Alpha => channel(pixel.a()),
            Self::Minimum => channel(pixel.min_rgb()),
            Self::Maximum => channel(pixel.max_rgb()),
        }
    }

    /// Stable ascending sort of `pixels` by this key
    ///
    /// Keys are computed once per pixel rather than once per comparison.
    pub fn sort(self, pixels: &mut [Pixel]) {
        let mut keyed: Vec<(f64, Pixel)> = pixels.iter().map(|&p| (self.key(p), p)).collect();
        keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        for (slot, (_, pixel)) in pixels.iter_mut().zip(keyed) {
            *slot = pixel;
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortKey {
    type Err = SortError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.name() == name)
            .ok_or_else(|| unknown_function("sorting", name, &Self::names()))
    }
}

fn channel(value: u8) -> f64 {
    f64::from(value) / CHANNEL_MAX
}

/// Hue, saturation and value of a pixel, each in [0, 1]
///
/// Alpha is ignored. Gray pixels have hue and saturation 0.
pub fn rgb_to_hsv(pixel: Pixel) -> (f64, f64, f64) {
    let r = channel(pixel.r());
    let g = channel(pixel.g());
    let b = channel(pixel.b());
    let max = channel(pixel.max_rgb());
    let min = channel(pixel.min_rgb());
    let value = max;

    let chroma = max - min;
    if pixel.max_rgb() == pixel.min_rgb() {
        return (0.0, 0.0, value);
    }

    let saturation = chroma / max;
    let rc = (max - r) / chroma;
    let gc = (max - g) / chroma;
    let bc = (max - b) / chroma;

    let sector = if pixel.r() == pixel.max_rgb() {
        bc - gc
    } else if pixel.g() == pixel.max_rgb() {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    ((sector / 6.0).rem_euclid(1.0), saturation, value)
}
