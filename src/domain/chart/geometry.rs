use super::scale::ChartScales;
use super::value_objects::Point;
use crate::domain::market_data::{FilteredSet, Record, SeriesKind};
use std::fmt::Write;

pub const MARKER_RADIUS: f64 = 5.0;

/// Ordered points of one series
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub series: SeriesKind,
    pub points: Vec<Point>,
}

impl Polyline {
    pub fn new(series: SeriesKind, points: Vec<Point>) -> Self {
        Self { series, points }
    }

    /// A line needs at least two points to show anything
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// SVG path data (`M x,y L x,y ...`); empty when not drawable
    pub fn to_svg_path(&self) -> String {
        if !self.is_drawable() {
            return String::new();
        }
        let mut path = String::new();
        for (i, point) in self.points.iter().enumerate() {
            let command = if i == 0 { 'M' } else { 'L' };
            let _ = write!(path, "{}{},{}", command, point.x, point.y);
        }
        path
    }
}

/// Interactive dot for one record on one series
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub series: SeriesKind,
    pub center: Point,
    pub radius: f64,
    pub record: Record,
}

impl Marker {
    pub fn contains(&self, point: &Point) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }
}

/// Everything the chart draws for one selection
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub open_line: Polyline,
    pub close_line: Polyline,
    pub open_markers: Vec<Marker>,
    pub close_markers: Vec<Marker>,
}

impl ChartGeometry {
    pub fn empty() -> Self {
        Self {
            open_line: Polyline::new(SeriesKind::Open, Vec::new()),
            close_line: Polyline::new(SeriesKind::Close, Vec::new()),
            open_markers: Vec::new(),
            close_markers: Vec::new(),
        }
    }

    pub fn line(&self, series: SeriesKind) -> &Polyline {
        match series {
            SeriesKind::Open => &self.open_line,
            SeriesKind::Close => &self.close_line,
        }
    }

    pub fn markers(&self, series: SeriesKind) -> &[Marker] {
        match series {
            SeriesKind::Open => &self.open_markers,
            SeriesKind::Close => &self.close_markers,
        }
    }

    /// Markers in draw order: every open marker, then every close marker
    pub fn all_markers(&self) -> impl DoubleEndedIterator<Item = &Marker> {
        self.open_markers.iter().chain(self.close_markers.iter())
    }

    /// Top-most marker under `point`. Close markers are drawn last, so they
    /// win where the two series overlap.
    pub fn marker_at(&self, point: &Point) -> Option<&Marker> {
        self.all_markers().rev().find(|marker| marker.contains(point))
    }

    pub fn point_count(&self) -> usize {
        self.open_line.len()
    }
}

/// Project every filtered record through the scales, once per series.
pub fn build_paths(filtered: &FilteredSet, scales: &ChartScales) -> ChartGeometry {
    let project = |record: &Record, series: SeriesKind| {
        let value = match series {
            SeriesKind::Open => record.open.value(),
            SeriesKind::Close => record.close.value(),
        };
        Point::new(scales.x.map(&record.date), scales.y.map(value))
    };

    let markers_for = |series: SeriesKind| -> Vec<Marker> {
        filtered
            .iter()
            .map(|record| Marker {
                series,
                center: project(record, series),
                radius: MARKER_RADIUS,
                record: record.clone(),
            })
            .collect()
    };

    let open_markers = markers_for(SeriesKind::Open);
    let close_markers = markers_for(SeriesKind::Close);

    ChartGeometry {
        open_line: Polyline::new(
            SeriesKind::Open,
            open_markers.iter().map(|marker| marker.center).collect(),
        ),
        close_line: Polyline::new(
            SeriesKind::Close,
            close_markers.iter().map(|marker| marker.center).collect(),
        ),
        open_markers,
        close_markers,
    }
}
