use super::value_objects::Point;
use crate::domain::market_data::{Record, SeriesKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Gap between the pointer and the tooltip's top-left corner
pub const TOOLTIP_OFFSET: f64 = 10.0;

/// Snapshot of the hovered record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub date: NaiveDate,
    /// e.g. "Wed Nov 01 2023"
    pub date_label: String,
    pub open: f64,
    pub close: f64,
    /// `close - open`, rounded to cents
    pub difference: f64,
    pub series: SeriesKind,
}

impl TooltipContent {
    pub fn from_record(record: &Record, series: SeriesKind) -> Self {
        Self {
            date: record.date,
            date_label: record.date.format("%a %b %d %Y").to_string(),
            open: record.open.value(),
            close: record.close.value(),
            difference: record.difference(),
            series,
        }
    }

    pub fn difference_label(&self) -> String {
        format!("{:.2}", self.difference)
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Date: {}", self.date_label),
            format!("Open: ${:.2}", self.open),
            format!("Close: ${:.2}", self.close),
            format!("Difference: ${}", self.difference_label()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipState {
    pub visible: bool,
    pub position: Point,
    pub content: Option<TooltipContent>,
}

impl TooltipState {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.content.as_ref().map(|content| content.lines().join("\n")).unwrap_or_default()
    }
}

/// Pointer activity on a marker, as seen by the tooltip
#[derive(Debug, Clone, PartialEq)]
pub enum TooltipMessage {
    Enter { record: Record, series: SeriesKind },
    Move { x: f64, y: f64 },
    Leave,
}

/// Sole owner of the tooltip. Every message is O(1); none of them touches
/// the filter/scale/path pipeline.
#[derive(Debug, Clone)]
pub struct TooltipController {
    state: TooltipState,
    offset: f64,
}

impl Default for TooltipController {
    fn default() -> Self {
        Self::new(TOOLTIP_OFFSET)
    }
}

impl TooltipController {
    pub fn new(offset: f64) -> Self {
        Self { state: TooltipState::hidden(), offset }
    }

    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    pub fn handle(&mut self, message: TooltipMessage) -> &TooltipState {
        match message {
            TooltipMessage::Enter { record, series } => self.on_enter(&record, series),
            TooltipMessage::Move { x, y } => self.on_move(x, y),
            TooltipMessage::Leave => self.on_leave(),
        }
        &self.state
    }

    /// Replaces whatever was shown before; the last hover wins
    pub fn on_enter(&mut self, record: &Record, series: SeriesKind) {
        self.state.visible = true;
        self.state.content = Some(TooltipContent::from_record(record, series));
    }

    pub fn on_move(&mut self, pointer_x: f64, pointer_y: f64) {
        self.state.position = Point::new(pointer_x, pointer_y).offset(self.offset, self.offset);
    }

    pub fn on_leave(&mut self) {
        self.state.visible = false;
        self.state.content = None;
    }

    /// Whether the tooltip currently shows `record` on `series`. Records
    /// sharing a date still differ by their prices.
    pub fn is_showing(&self, record: &Record, series: SeriesKind) -> bool {
        self.state.visible
            && self.state.content.as_ref().is_some_and(|content| {
                content.series == series
                    && content.date == record.date
                    && content.open == record.open.value()
                    && content.close == record.close.value()
            })
    }

    /// Drop everything; used when the markers it pointed at are redrawn
    pub fn reset(&mut self) {
        self.state = TooltipState::hidden();
    }
}
