use crate::domain::market_data::SeriesKind;
use serde::{Deserialize, Serialize};

/// Value Object - space reserved around the plot for axes and labels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self { top: 20.0, right: 30.0, bottom: 30.0, left: 50.0 }
    }
}

/// Value Object - the fixed-size canvas the chart is drawn into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub margins: Margins,
}

impl Default for PlotArea {
    fn default() -> Self {
        Self { width: 800.0, height: 400.0, margins: Margins::default() }
    }
}

impl PlotArea {
    pub fn new(width: f64, height: f64, margins: Margins) -> Self {
        Self { width, height, margins }
    }

    /// Canvas width minus horizontal margins; also the right end of the x range
    pub fn plot_width(&self) -> f64 {
        self.width - self.margins.left - self.margins.right
    }

    /// Canvas height minus vertical margins; also the bottom end of the y range
    pub fn plot_height(&self) -> f64 {
        self.height - self.margins.top - self.margins.bottom
    }

    pub fn x_range(&self) -> (f64, f64) {
        (self.margins.left, self.plot_width())
    }

    /// Inverted: larger values sit higher on screen
    pub fn y_range(&self) -> (f64, f64) {
        (self.plot_height(), self.margins.top)
    }
}

/// Value Object - screen position in canvas units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance_squared(&self, other: &Point) -> f64 {
        let (dx, dy) = (self.x - other.x, self.y - other.y);
        dx * dx + dy * dy
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Value Object - opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb(((hex >> 16) & 0xFF) as u8, ((hex >> 8) & 0xFF) as u8, (hex & 0xFF) as u8)
    }

    pub fn to_hex(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// `#rrggbb`, usable as a canvas or SVG paint
    pub fn to_css(&self) -> String {
        format!("#{:06x}", self.to_hex())
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const OPEN_SERIES: Color = Color::from_hex(0xb2df8a);
    pub const CLOSE_SERIES: Color = Color::from_hex(0xe41a1c);
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

/// Value Object - stroke and fill colors of both series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPalette {
    pub open: Color,
    pub close: Color,
}

impl Default for SeriesPalette {
    fn default() -> Self {
        Self { open: Color::OPEN_SERIES, close: Color::CLOSE_SERIES }
    }
}

impl SeriesPalette {
    pub fn color_for(&self, series: SeriesKind) -> Color {
        match series {
            SeriesKind::Open => self.open,
            SeriesKind::Close => self.close,
        }
    }
}
