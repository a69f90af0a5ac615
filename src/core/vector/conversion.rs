// src/core/vector/conversion.rs

//! Thumbnail to feature-vector conversion.
//!
//! Every pixel contributes three components, in row-major pixel order. The
//! method is fixed per index and applied to stored thumbnails and probes alike,
//! otherwise distances between them are meaningless.

use crate::core::common::IndexError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// D65 reference white, Y normalized to 100.
const REF_WHITE_X: f64 = 95.047;
const REF_WHITE_Y: f64 = 100.000;
const REF_WHITE_Z: f64 = 108.883;

/// CIE ε: below this the Lab pivot switches to its linear segment.
const LAB_EPSILON: f64 = 0.008_856;
const LAB_KAPPA_SLOPE: f64 = 7.787;

/// A single 8-bit RGB pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A fixed-size RGB image, pixels stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Thumbnail {
    /// # Errors
    /// Returns `IndexError::InvalidInput` if `pixels.len() != width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<Self, IndexError> {
        let expected = (width as usize) * (height as usize);
        if pixels.len() != expected {
            return Err(IndexError::invalid_input(format!(
                "thumbnail of {}x{} needs {} pixels, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self { width, height, pixels })
    }

    /// Builds a thumbnail from packed `RGBRGB...` bytes.
    ///
    /// # Errors
    /// Returns `IndexError::InvalidInput` if the byte count is not
    /// `3 * width * height`.
    pub fn from_rgb_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, IndexError> {
        if bytes.len() % 3 != 0 {
            return Err(IndexError::invalid_input(format!(
                "packed RGB buffer length {} is not a multiple of 3",
                bytes.len()
            )));
        }
        let pixels = bytes.chunks_exact(3).map(|px| Rgb::new(px[0], px[1], px[2])).collect();
        Self::new(width, height, pixels)
    }

    /// A thumbnail filled with a single color
    #[must_use]
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let count = (width as usize) * (height as usize);
        Self { width, height, pixels: vec![color; count] }
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Length of the vector produced by any conversion method.
    #[must_use]
    pub fn vector_len(&self) -> usize {
        self.pixels.len() * 3
    }
}

/// How a thumbnail is turned into a feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionMethod {
    /// Raw channels, stored in R, B, G order.
    #[default]
    Rgb,
    /// CIE L*a*b* under D65.
    Lab,
    /// CIE LCh(ab): lightness, chroma, hue in degrees.
    Lch,
}

impl ConversionMethod {
    /// Converts `thumbnail` into a vector of `3 * width * height` components.
    #[must_use]
    pub fn convert(self, thumbnail: &Thumbnail) -> Vec<f32> {
        let mut vector = Vec::with_capacity(thumbnail.vector_len());
        for &pixel in thumbnail.pixels() {
            let components = match self {
                // Stored as R, B, G.
                Self::Rgb => [f64::from(pixel.r), f64::from(pixel.b), f64::from(pixel.g)],
                Self::Lab => rgb_to_lab(pixel),
                Self::Lch => lab_to_lch(rgb_to_lab(pixel)),
            };
            vector.extend(components.iter().map(|&c| c as f32));
        }
        vector
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Lab => "lab",
            Self::Lch => "lch",
        }
    }
}

impl fmt::Display for ConversionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i32> for ConversionMethod {
    type Error = IndexError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Rgb),
            1 => Ok(Self::Lab),
            2 => Ok(Self::Lch),
            other => Err(IndexError::InvalidConversionMethod(other.to_string())),
        }
    }
}

impl FromStr for ConversionMethod {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgb" => Ok(Self::Rgb),
            "lab" => Ok(Self::Lab),
            "lch" => Ok(Self::Lch),
            _ => Err(IndexError::InvalidConversionMethod(s.to_string())),
        }
    }
}

/// sRGB channel to linear light, scaled to 0..=100.
fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    let linear = if c > 0.040_45 { ((c + 0.055) / 1.055).powf(2.4) } else { c / 12.92 };
    linear * 100.0
}

fn lab_pivot(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_KAPPA_SLOPE * t + 16.0 / 116.0
    }
}

/// RGB → XYZ → L*a*b*.
#[must_use]
pub fn rgb_to_lab(pixel: Rgb) -> [f64; 3] {
    let r = linearize(pixel.r);
    let g = linearize(pixel.g);
    let b = linearize(pixel.b);

    let x = r * 0.4124 + g * 0.3576 + b * 0.1805;
    let y = r * 0.2126 + g * 0.7152 + b * 0.0722;
    let z = r * 0.0193 + g * 0.1192 + b * 0.9505;

    let fx = lab_pivot(x / REF_WHITE_X);
    let fy = lab_pivot(y / REF_WHITE_Y);
    let fz = lab_pivot(z / REF_WHITE_Z);

    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// L*a*b* → LCh, hue in degrees within `[0, 360)`.
#[must_use]
pub fn lab_to_lch(lab: [f64; 3]) -> [f64; 3] {
    let [l, a, b] = lab;
    let chroma = a.hypot(b);
    let hue = b.atan2(a).to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to the modulus itself
    let hue = if hue >= 360.0 { 0.0 } else { hue };
    [l, chroma, hue]
}
