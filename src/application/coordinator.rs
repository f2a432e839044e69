use std::cell::RefCell;

use super::config::ChartConfig;
use crate::domain::{
    chart::{
        Axis, ChartGeometry, ChartScales, ChartSurface, Point, TooltipController, TooltipMessage,
        TooltipState, build_paths, legend_for,
    },
    errors::ChartError,
    events::{ChartEvent, EventDispatcher, InMemoryEventDispatcher},
    logging::{LogComponent, get_logger},
    market_data::{Company, Dataset, Month, Selection, SeriesKind, filter},
};
use crate::{log_debug, log_error, log_info};

/// Where the coordinator is in its draw cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    /// No non-empty dataset has arrived yet
    Idle,
    /// What is on the surface matches the current dataset and selection
    Ready,
    /// Inputs changed since the last draw; only observable mid-transition
    Dirty,
}

/// Owns the selection, the dataset handle and the surface, and redraws the
/// whole chart whenever one of the inputs actually changes.
pub struct RenderCoordinator<S: ChartSurface> {
    surface: S,
    config: ChartConfig,
    state: CoordinatorState,
    dataset: Option<Dataset>,
    selection: Selection,
    geometry: ChartGeometry,
    tooltip: TooltipController,
    events: InMemoryEventDispatcher,
}

impl<S: ChartSurface> RenderCoordinator<S> {
    pub fn new(surface: S, config: ChartConfig) -> Self {
        get_logger().info(
            LogComponent::Application("RenderCoordinator"),
            &format!("Creating render coordinator for {}", config.default_selection),
        );

        Self {
            surface,
            selection: config.default_selection.clone(),
            tooltip: TooltipController::new(config.tooltip_offset),
            config,
            state: CoordinatorState::Idle,
            dataset: None,
            geometry: ChartGeometry::empty(),
            events: InMemoryEventDispatcher::new(),
        }
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Geometry currently on the surface
    pub fn geometry(&self) -> &ChartGeometry {
        &self.geometry
    }

    pub fn tooltip(&self) -> &TooltipState {
        self.tooltip.state()
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: Fn(&ChartEvent) + 'static,
    {
        self.events.subscribe_to_chart_events(handler);
    }

    /// Hand over a dataset. Redraws only when it is a different allocation.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        if self.dataset.as_ref().is_some_and(|current| current.same_as(&dataset)) {
            return;
        }

        let record_count = dataset.len();
        self.dataset = Some(dataset);
        self.events.publish_chart_event(ChartEvent::DatasetReplaced { record_count });

        if self.state == CoordinatorState::Idle && record_count == 0 {
            log_debug!(
                LogComponent::Application("RenderCoordinator"),
                "Empty dataset while idle; nothing to draw yet"
            );
            return;
        }
        self.mark_dirty();
    }

    pub fn select_company(&mut self, company: Company) {
        if company != self.selection.company {
            self.selection.company = company;
            self.selection_changed();
        }
    }

    pub fn select_month(&mut self, month: Month) {
        if month != self.selection.month {
            self.selection.month = month;
            self.selection_changed();
        }
    }

    pub fn set_selection(&mut self, selection: Selection) {
        if selection != self.selection {
            self.selection = selection;
            self.selection_changed();
        }
    }

    fn selection_changed(&mut self) {
        self.events
            .publish_chart_event(ChartEvent::SelectionChanged { selection: self.selection.clone() });
        if self.state != CoordinatorState::Idle {
            self.mark_dirty();
        }
    }

    fn mark_dirty(&mut self) {
        self.state = CoordinatorState::Dirty;
        self.redraw();
    }

    /// Re-run the full cycle with unchanged inputs. Output is identical to
    /// the previous draw.
    pub fn force_redraw(&mut self) {
        if self.state != CoordinatorState::Idle {
            self.mark_dirty();
        }
    }

    fn redraw(&mut self) {
        let Some(dataset) = self.dataset.clone() else {
            return;
        };

        if let Err(e) = self.surface.clear() {
            log_error!(
                LogComponent::Application("RenderCoordinator"),
                "Failed to clear chart surface: {}",
                e
            );
        }
        self.geometry = ChartGeometry::empty();
        self.tooltip.reset();

        let filtered = filter(&dataset, &self.selection);
        if filtered.is_empty() {
            log_info!(
                LogComponent::Application("RenderCoordinator"),
                "No records for {}; chart left blank",
                self.selection
            );
            self.state = CoordinatorState::Ready;
            self.events
                .publish_chart_event(ChartEvent::ChartCleared { selection: self.selection.clone() });
            return;
        }

        let scales = ChartScales::build(&filtered, &self.config.plot_area);
        let mut geometry = build_paths(&filtered, &scales);
        let radius = self.config.marker_radius;
        geometry
            .open_markers
            .iter_mut()
            .chain(geometry.close_markers.iter_mut())
            .for_each(|marker| marker.radius = radius);

        for e in self.draw(&scales, &geometry) {
            log_error!(
                LogComponent::Application("RenderCoordinator"),
                "Chart draw incomplete for {}: {}",
                self.selection,
                e
            );
        }

        let point_count = geometry.point_count();
        self.geometry = geometry;
        self.state = CoordinatorState::Ready;

        log_info!(
            LogComponent::Application("RenderCoordinator"),
            "Redrew {} with {} points per series",
            self.selection,
            point_count
        );
        self.events.publish_chart_event(ChartEvent::ChartRedrawn {
            selection: self.selection.clone(),
            point_count,
        });
    }

    /// Runs every layer even when an earlier one fails; returns the failures.
    fn draw(&mut self, scales: &ChartScales, geometry: &ChartGeometry) -> Vec<ChartError> {
        let area = self.config.plot_area;
        let palette = self.config.palette;
        let mut results = vec![
            self.surface.draw_axis(&Axis::bottom(scales, &area)),
            self.surface.draw_axis(&Axis::left(scales, &area)),
        ];
        for series in [SeriesKind::Open, SeriesKind::Close] {
            results.push(self.surface.draw_line(geometry.line(series), palette.color_for(series)));
        }
        for series in [SeriesKind::Open, SeriesKind::Close] {
            results.push(
                self.surface.draw_markers(geometry.markers(series), palette.color_for(series)),
            );
        }
        results.push(self.surface.draw_legend(&legend_for(&area, &palette)));
        results.into_iter().filter_map(Result::err).collect()
    }

    /// Pointer moved over the chart. `local` is in surface units and is hit
    /// tested against the drawn markers; `page` positions the tooltip.
    pub fn pointer_moved(&mut self, local: Point, page: Point) -> &TooltipState {
        match self.geometry.marker_at(&local) {
            Some(marker) => {
                if !self.tooltip.is_showing(&marker.record, marker.series) {
                    let message =
                        TooltipMessage::Enter { record: marker.record.clone(), series: marker.series };
                    self.tooltip.handle(message);
                }
            }
            None => {
                if self.tooltip.state().visible {
                    self.tooltip.handle(TooltipMessage::Leave);
                }
            }
        }
        self.tooltip.handle(TooltipMessage::Move { x: page.x, y: page.y })
    }

    pub fn pointer_left(&mut self) -> &TooltipState {
        self.tooltip.handle(TooltipMessage::Leave)
    }
}

// The browser build keeps a single coordinator per thread
thread_local! {
    static GLOBAL_COORDINATOR: RefCell<Option<Box<dyn std::any::Any>>> = const { RefCell::new(None) };
}

/// Install the coordinator used by the wasm entry points
pub fn initialize_global_coordinator<S: ChartSurface + 'static>(coordinator: RenderCoordinator<S>) {
    GLOBAL_COORDINATOR.with(|global| {
        *global.borrow_mut() = Some(Box::new(coordinator));
    });
}

pub fn with_global_coordinator<S, F, R>(f: F) -> Option<R>
where
    S: ChartSurface + 'static,
    F: FnOnce(&RenderCoordinator<S>) -> R,
{
    GLOBAL_COORDINATOR.with(|global| {
        global.borrow().as_ref().and_then(|any| any.downcast_ref::<RenderCoordinator<S>>()).map(f)
    })
}

pub fn with_global_coordinator_mut<S, F, R>(f: F) -> Option<R>
where
    S: ChartSurface + 'static,
    F: FnOnce(&mut RenderCoordinator<S>) -> R,
{
    GLOBAL_COORDINATOR.with(|global| {
        global
            .borrow_mut()
            .as_mut()
            .and_then(|any| any.downcast_mut::<RenderCoordinator<S>>())
            .map(f)
    })
}
