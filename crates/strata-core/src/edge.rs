//! Direction and styling of relations between nodes.

use crate::color::Color;

/// Which ends of an edge carry an arrowhead.
///
/// The edge itself always runs from source to target; `Back` draws the
/// arrowhead at the source, `Both` makes the relation bidirectional.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Forward,
    Back,
    Both,
    None,
}

impl Direction {
    /// Graphviz `dir` attribute value.
    pub fn as_dot_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Back => "back",
            Self::Both => "both",
            Self::None => "none",
        }
    }
}

/// Line style of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
    Bold,
}

impl LineStyle {
    /// Graphviz `style` attribute value.
    pub fn as_dot_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Bold => "bold",
        }
    }
}

/// Attributes shared by every edge a single `connect` call produces.
///
/// # Examples
///
/// ```
/// use strata_core::edge::{Direction, EdgeAttrs, LineStyle};
///
/// let attrs = EdgeAttrs::new(Direction::Both)
///     .with_label("replicates")
///     .with_style(LineStyle::Dashed);
/// assert_eq!(attrs.label(), Some("replicates"));
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EdgeAttrs {
    direction: Direction,
    label: Option<String>,
    color: Option<Color>,
    style: Option<LineStyle>,
}

impl EdgeAttrs {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn style(&self) -> Option<LineStyle> {
        self.style
    }
}

impl From<Direction> for EdgeAttrs {
    fn from(direction: Direction) -> Self {
        Self::new(direction)
    }
}
