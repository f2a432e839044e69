use crate::domain::market_data::Selection;

/// What the render coordinator reports after each transition
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    DatasetReplaced { record_count: usize },
    SelectionChanged { selection: Selection },
    /// A full redraw finished with `point_count` points per series
    ChartRedrawn { selection: Selection, point_count: usize },
    /// The chart was cleared and left blank (nothing matched)
    ChartCleared { selection: Selection },
}

pub trait EventDispatcher {
    fn publish_chart_event(&self, event: ChartEvent);
}

/// Synchronous fan-out to subscribed handlers, in subscription order
#[derive(Default)]
pub struct InMemoryEventDispatcher {
    chart_handlers: Vec<Box<dyn Fn(&ChartEvent)>>,
}

impl InMemoryEventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_to_chart_events<F>(&mut self, handler: F)
    where
        F: Fn(&ChartEvent) + 'static,
    {
        self.chart_handlers.push(Box::new(handler));
    }
}

impl EventDispatcher for InMemoryEventDispatcher {
    fn publish_chart_event(&self, event: ChartEvent) {
        for handler in &self.chart_handlers {
            handler(&event);
        }
    }
}
