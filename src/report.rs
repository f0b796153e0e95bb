//! Human and machine readable palette listings.

use crate::cluster::Palette;
use serde::Serialize;
use std::fmt;

/// One palette entry, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub index: usize,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Swatch {
    /// Uppercase `RRGGBB` without a leading `#`.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color {}: RGB({}, {}, {})", self.index, self.r, self.g, self.b)
    }
}

pub fn format(palette: &Palette) -> Vec<Swatch> {
    palette
        .iter()
        .enumerate()
        .map(|(i, c)| Swatch {
            index: i + 1,
            r: c.red,
            g: c.green,
            b: c.blue,
        })
        .collect()
}
