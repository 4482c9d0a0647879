//! Configuration types for Strata diagram rendering.
//!
//! This module provides configuration structures that control where
//! artifacts go, how the graph is laid out, and how it is styled. All types
//! implement [`serde::Deserialize`] for flexible loading from external
//! sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`OutputConfig`] - Output directory and [`OutputFormat`].
//! - [`LayoutConfig`] - Graph [`Rankdir`] and [`CurveStyle`].
//! - [`StyleConfig`] - Fonts, colors and the optional icon directory.
//!
//! # Example
//!
//! ```
//! # use strata::config::{AppConfig, OutputFormat};
//! let config = AppConfig::default();
//! assert_eq!(config.output().format(), OutputFormat::Png);
//! assert!(config.style().font_color().is_ok());
//! ```

use std::{
    fmt::{self, Display},
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use strata_core::color::Color;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,

    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(output: OutputConfig, layout: LayoutConfig, style: StyleConfig) -> Self {
        Self {
            output,
            layout,
            style,
        }
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Replaces the output section.
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }
}

/// Image formats the renderer can produce.
///
/// `Dot` writes the graph description itself and does not need Graphviz.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpg,
    Svg,
    Pdf,
    Dot,
}

impl OutputFormat {
    /// File extension, without the leading dot.
    pub fn extension(self) -> &'static str {
        self.into()
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(Self::Png),
            "jpg" => Ok(Self::Jpg),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            "dot" => Ok(Self::Dot),
            other => Err(format!("unsupported output format `{other}`")),
        }
    }
}

impl From<OutputFormat> for &'static str {
    fn from(val: OutputFormat) -> Self {
        match val {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Dot => "dot",
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Where rendered artifacts are written and in which format.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving artifacts.
    directory: PathBuf,

    /// Default [`OutputFormat`].
    format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            format: OutputFormat::default(),
        }
    }
}

impl OutputConfig {
    /// Creates a new [`OutputConfig`].
    ///
    /// # Arguments
    ///
    /// * `directory` - Directory receiving artifacts.
    /// * `format` - Default output format.
    pub fn new(directory: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            directory: directory.into(),
            format,
        }
    }

    /// Returns the output directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns the default [`OutputFormat`].
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// Rank direction of the laid out graph.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rankdir {
    /// Top to bottom
    Tb,
    /// Bottom to top
    Bt,
    /// Left to right (default)
    #[default]
    Lr,
    /// Right to left
    Rl,
}

impl Rankdir {
    /// Graphviz `rankdir` attribute value.
    pub fn as_dot_str(self) -> &'static str {
        match self {
            Self::Tb => "TB",
            Self::Bt => "BT",
            Self::Lr => "LR",
            Self::Rl => "RL",
        }
    }
}

/// How edges are routed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveStyle {
    #[default]
    Ortho,
    Curved,
    Spline,
    Polyline,
}

impl CurveStyle {
    /// Graphviz `splines` attribute value.
    pub fn as_dot_str(self) -> &'static str {
        match self {
            Self::Ortho => "ortho",
            Self::Curved => "curved",
            Self::Spline => "spline",
            Self::Polyline => "polyline",
        }
    }
}

/// Layout configuration passed through to Graphviz.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Default [`Rankdir`].
    #[serde(default)]
    direction: Rankdir,

    /// Default [`CurveStyle`].
    #[serde(default)]
    curve_style: CurveStyle,
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    pub fn new(direction: Rankdir, curve_style: CurveStyle) -> Self {
        Self {
            direction,
            curve_style,
        }
    }

    /// Returns the default [`Rankdir`].
    pub fn direction(&self) -> Rankdir {
        self.direction
    }

    /// Returns the default [`CurveStyle`].
    pub fn curve_style(&self) -> CurveStyle {
        self.curve_style
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Colors are kept as strings and parsed on access so that a bad value is
/// reported with the field it came from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    font_name: String,
    font_color: String,
    edge_color: String,
    cluster_pen_color: String,

    /// Cluster backgrounds, picked by nesting depth.
    cluster_backgrounds: Vec<String>,

    /// Directory holding node icons, laid out as `<provider>/<category>/<name>.png`.
    icons_dir: Option<PathBuf>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_name: "Sans-Serif".to_string(),
            font_color: "#2D3436".to_string(),
            edge_color: "#7B8894".to_string(),
            cluster_pen_color: "#AEB6BE".to_string(),
            cluster_backgrounds: ["#E5F5FD", "#EBF3E7", "#ECE8F6", "#FDF7E3"]
                .into_iter()
                .map(String::from)
                .collect(),
            icons_dir: None,
        }
    }
}

impl StyleConfig {
    /// Returns the font family used for every label.
    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    /// Returns the parsed label [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn font_color(&self) -> Result<Color, String> {
        parse_color("font_color", &self.font_color)
    }

    /// Returns the parsed default edge [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn edge_color(&self) -> Result<Color, String> {
        parse_color("edge_color", &self.edge_color)
    }

    /// Returns the parsed cluster border [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn cluster_pen_color(&self) -> Result<Color, String> {
        parse_color("cluster_pen_color", &self.cluster_pen_color)
    }

    /// Returns the parsed cluster backgrounds, outermost first.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured color string cannot be parsed.
    pub fn cluster_backgrounds(&self) -> Result<Vec<Color>, String> {
        self.cluster_backgrounds
            .iter()
            .map(|color| parse_color("cluster_backgrounds", color))
            .collect()
    }

    /// Returns the icon directory, if one is configured.
    pub fn icons_dir(&self) -> Option<&Path> {
        self.icons_dir.as_deref()
    }

    /// Checks that every configured color parses.
    ///
    /// # Errors
    ///
    /// Returns the message for the first color that cannot be parsed.
    pub fn validate(&self) -> Result<(), String> {
        self.font_color()?;
        self.edge_color()?;
        self.cluster_pen_color()?;
        self.cluster_backgrounds()?;
        Ok(())
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {field} in config: {err}"))
}
