use super::scale::ChartScales;
use super::value_objects::{PlotArea, Point};

pub const TICK_SIZE: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    /// Horizontal, ticks hanging below the line
    Bottom,
    /// Vertical, ticks pointing left of the line
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    /// Pixel along the axis (x for bottom, y for left)
    pub position: f64,
    pub label: String,
}

/// One axis in pixel space, ready to stroke
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub orientation: AxisOrientation,
    pub start: Point,
    pub end: Point,
    pub ticks: Vec<AxisTick>,
}

impl Axis {
    /// Bottom time axis along `y = plot_height`
    pub fn bottom(scales: &ChartScales, area: &PlotArea) -> Self {
        let (x0, x1) = scales.x.range();
        let y = area.plot_height();
        let ticks = scales
            .x_ticks()
            .into_iter()
            .map(|tick| AxisTick { position: scales.x.map(&tick.value), label: tick.label })
            .collect();
        Self {
            orientation: AxisOrientation::Bottom,
            start: Point::new(x0, y),
            end: Point::new(x1, y),
            ticks,
        }
    }

    /// Left value axis along `x = margin_left`
    pub fn left(scales: &ChartScales, area: &PlotArea) -> Self {
        let (y0, y1) = scales.y.range();
        let x = area.margins.left;
        let ticks = scales
            .y_ticks()
            .into_iter()
            .map(|tick| AxisTick { position: scales.y.map(tick.value), label: tick.label })
            .collect();
        Self {
            orientation: AxisOrientation::Left,
            start: Point::new(x, y0),
            end: Point::new(x, y1),
            ticks,
        }
    }

    /// Where a tick's short mark starts and ends
    pub fn tick_mark(&self, tick: &AxisTick) -> (Point, Point) {
        match self.orientation {
            AxisOrientation::Bottom => {
                let anchor = Point::new(tick.position, self.start.y);
                (anchor, anchor.offset(0.0, TICK_SIZE))
            }
            AxisOrientation::Left => {
                let anchor = Point::new(self.start.x, tick.position);
                (anchor, anchor.offset(-TICK_SIZE, 0.0))
            }
        }
    }

    /// Anchor for a tick label, just past the tick mark
    pub fn label_anchor(&self, tick: &AxisTick) -> Point {
        let (_, end) = self.tick_mark(tick);
        match self.orientation {
            AxisOrientation::Bottom => end.offset(0.0, 3.0),
            AxisOrientation::Left => end.offset(-3.0, 0.0),
        }
    }
}
