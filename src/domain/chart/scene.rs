//! Render boundary: what the coordinator draws, and an in-memory target for it.

use super::axis::{Axis, AxisOrientation};
use super::geometry::{Marker, Polyline};
use super::value_objects::{Color, PlotArea, Point, SeriesPalette};
use crate::domain::errors::RenderingResult;
use crate::domain::market_data::SeriesKind;
use std::fmt::Write;

pub const LEGEND_FONT_SIZE: f64 = 12.0;

/// Swatch plus label identifying one series
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub series: SeriesKind,
    pub swatch: Point,
    pub label_anchor: Point,
    pub color: Color,
}

impl LegendEntry {
    pub fn label(&self) -> String {
        self.series.to_string()
    }
}

/// Legend in the top-right corner: one row per series, 20 units apart
pub fn legend_for(area: &PlotArea, palette: &SeriesPalette) -> Vec<LegendEntry> {
    let x = area.width - 50.0;
    [SeriesKind::Open, SeriesKind::Close]
        .into_iter()
        .enumerate()
        .map(|(row, series)| {
            let swatch = Point::new(x, 20.0 + 20.0 * row as f64);
            LegendEntry {
                series,
                swatch,
                label_anchor: swatch.offset(10.0, 0.0),
                color: palette.color_for(series),
            }
        })
        .collect()
}

/// A drawing target the coordinator exclusively owns.
///
/// `clear` must remove everything previously drawn; the coordinator calls it
/// at the start of every redraw.
pub trait ChartSurface {
    fn clear(&mut self) -> RenderingResult<()>;
    fn draw_axis(&mut self, axis: &Axis) -> RenderingResult<()>;
    fn draw_line(&mut self, line: &Polyline, color: Color) -> RenderingResult<()>;
    fn draw_markers(&mut self, markers: &[Marker], color: Color) -> RenderingResult<()>;
    fn draw_legend(&mut self, entries: &[LegendEntry]) -> RenderingResult<()>;
}

/// Retained copy of one draw call
#[derive(Debug, Clone, PartialEq)]
pub enum SceneElement {
    Axis(Axis),
    Line { series: SeriesKind, points: Vec<Point>, color: Color },
    Marker { series: SeriesKind, center: Point, radius: f64, color: Color },
    LegendSwatch { center: Point, radius: f64, color: Color },
    LegendLabel { anchor: Point, text: String },
}

/// In-memory scene graph; can be serialized as an SVG document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneGraph {
    width: f64,
    height: f64,
    elements: Vec<SceneElement>,
    clear_count: usize,
}

impl SceneGraph {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, elements: Vec::new(), clear_count: 0 }
    }

    pub fn elements(&self) -> &[SceneElement] {
        &self.elements
    }

    pub fn is_blank(&self) -> bool {
        self.elements.is_empty()
    }

    /// How many times the scene has been wiped, i.e. how many redraws started
    pub fn clear_count(&self) -> usize {
        self.clear_count
    }

    pub fn count_markers(&self, series: SeriesKind) -> usize {
        self.elements
            .iter()
            .filter(|element| matches!(element, SceneElement::Marker { series: s, .. } if *s == series))
            .count()
    }

    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
            self.width, self.height
        );
        for element in &self.elements {
            let _ = match element {
                SceneElement::Axis(axis) => write_axis(&mut svg, axis),
                SceneElement::Line { series, points, color } => {
                    let path = Polyline::new(*series, points.clone()).to_svg_path();
                    write!(svg, r#"<path fill="none" stroke="{}" d="{}"/>"#, color.to_css(), path)
                }
                SceneElement::Marker { center, radius, color, .. }
                | SceneElement::LegendSwatch { center, radius, color } => write!(
                    svg,
                    r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                    center.x,
                    center.y,
                    radius,
                    color.to_css()
                ),
                SceneElement::LegendLabel { anchor, text } => write!(
                    svg,
                    r#"<text x="{}" y="{}" font-size="{}" alignment-baseline="middle">{}</text>"#,
                    anchor.x, anchor.y, LEGEND_FONT_SIZE, text
                ),
            };
        }
        svg.push_str("</svg>");
        svg
    }
}

fn write_axis(svg: &mut String, axis: &Axis) -> std::fmt::Result {
    let anchor = match axis.orientation {
        AxisOrientation::Bottom => "middle",
        AxisOrientation::Left => "end",
    };
    write!(
        svg,
        r#"<g><line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"/>"#,
        axis.start.x,
        axis.start.y,
        axis.end.x,
        axis.end.y,
        Color::BLACK.to_css()
    )?;
    for tick in &axis.ticks {
        let (from, to) = axis.tick_mark(tick);
        let label = axis.label_anchor(tick);
        write!(
            svg,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"/><text x="{}" y="{}" text-anchor="{}" font-size="10">{}</text>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            Color::BLACK.to_css(),
            label.x,
            label.y,
            anchor,
            tick.label
        )?;
    }
    svg.push_str("</g>");
    Ok(())
}

impl ChartSurface for SceneGraph {
    fn clear(&mut self) -> RenderingResult<()> {
        self.elements.clear();
        self.clear_count += 1;
        Ok(())
    }

    fn draw_axis(&mut self, axis: &Axis) -> RenderingResult<()> {
        self.elements.push(SceneElement::Axis(axis.clone()));
        Ok(())
    }

    fn draw_line(&mut self, line: &Polyline, color: Color) -> RenderingResult<()> {
        if line.is_drawable() {
            self.elements.push(SceneElement::Line {
                series: line.series,
                points: line.points.clone(),
                color,
            });
        }
        Ok(())
    }

    fn draw_markers(&mut self, markers: &[Marker], color: Color) -> RenderingResult<()> {
        self.elements.extend(markers.iter().map(|marker| SceneElement::Marker {
            series: marker.series,
            center: marker.center,
            radius: marker.radius,
            color,
        }));
        Ok(())
    }

    fn draw_legend(&mut self, entries: &[LegendEntry]) -> RenderingResult<()> {
        for entry in entries {
            self.elements.push(SceneElement::LegendSwatch {
                center: entry.swatch,
                radius: super::geometry::MARKER_RADIUS,
                color: entry.color,
            });
        }
        for entry in entries {
            self.elements.push(SceneElement::LegendLabel {
                anchor: entry.label_anchor,
                text: entry.label(),
            });
        }
        Ok(())
    }
}
