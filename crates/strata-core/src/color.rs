//! Color handling for Strata diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Graphviz only understands named colors and hex
//! notation, so colors are always emitted as hex.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the color in `#rrggbb` notation, or `#rrggbbaa` when it is
    /// not fully opaque.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_core::color::Color;
    ///
    /// let color = Color::new("#7B8894").unwrap();
    /// assert_eq!(color.to_hex(), "#7b8894");
    /// ```
    pub fn to_hex(self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        if rgba.a == u8::MAX {
            format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b, rgba.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_named_color_to_hex() {
        let color = Color::new("red").unwrap();
        assert_eq!(color.to_hex(), "#ff0000");
    }

    #[test]
    fn test_hex_is_lowercased() {
        let color = Color::new("#2D3436").unwrap();
        assert_eq!(color.to_string(), "#2d3436");
    }

    #[test]
    fn test_transparent_color_keeps_alpha() {
        let color = Color::new("rgba(0, 0, 0, 0)").unwrap();
        assert_eq!(color.to_hex(), "#00000000");
    }

    #[test]
    fn test_color_default() {
        assert_eq!(Color::default().to_hex(), "#000000");
    }
}
