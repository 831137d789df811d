//! CSS colors for palettes and SVG output.
//!
//! [`Color`] is parsed once from a CSS string (`"#2196f3"`, `"white"`,
//! `"rgb(0, 235, 129)"`) and printed back in CSS form wherever a fill or
//! stroke attribute is written.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A parsed CSS color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color(DynamicColor);

impl Color {
    /// Parses a CSS color string.
    ///
    /// ```
    /// use armillary_core::color::Color;
    ///
    /// assert!(Color::new("#2196f3").is_ok());
    /// assert!(Color::new("white").is_ok());
    /// assert!(Color::new("blurple").is_err());
    /// ```
    pub fn new(css: &str) -> Result<Self, String> {
        DynamicColor::from_str(css)
            .map(Self)
            .map_err(|err| format!("invalid color `{css}`: {err}"))
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        color.to_string().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_strings_parse() {
        for css in ["#000", "#fcac64", "#c59def", "#00eb81", "rgb(0, 235, 129)", "white"] {
            assert!(Color::new(css).is_ok(), "{css}");
        }
    }

    #[test]
    fn test_error_names_the_input() {
        let err = Color::new("not-a-color").unwrap_err();
        assert!(err.contains("not-a-color"), "{err}");
        assert!("".parse::<Color>().is_err());
    }

    #[test]
    fn test_default_is_black() {
        assert_eq!(Color::default(), "black".parse().unwrap());
        assert_ne!(Color::default(), Color::new("white").unwrap());
    }

    #[test]
    fn test_display_reparses_to_same_color() {
        let header = Color::new("#2196f3").unwrap();
        assert_eq!(Color::new(&header.to_string()).unwrap(), header);
    }
}
