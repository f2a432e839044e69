use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use open_close_chart_wasm::{
    application::{ChartConfig, CoordinatorState, RenderCoordinator},
    domain::{
        chart::{
            Axis, AxisOrientation, ChartSurface, Color, LegendEntry, Marker, Point, Polyline,
            SceneElement, SceneGraph,
        },
        errors::{ChartError, RenderingResult},
        events::ChartEvent,
        market_data::{Company, Dataset, Month, Record, SeriesKind},
    },
    infrastructure::parse_records_json,
};

fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, month, day).unwrap()
}

fn sample_records() -> Vec<Record> {
    vec![
        Record::new("Apple", day(11, 1), 150.0, 152.5),
        Record::new("Apple", day(10, 31), 148.0, 149.0),
        Record::new("Microsoft", day(10, 2), 320.0, 318.0),
        Record::new("Meta", day(11, 1), 300.0, 310.0),
        Record::new("Meta", day(11, 2), 305.0, 301.0),
        Record::new("Meta", day(11, 3), 302.0, 307.5),
    ]
}

fn coordinator() -> RenderCoordinator<SceneGraph> {
    RenderCoordinator::new(SceneGraph::new(800.0, 400.0), ChartConfig::default())
}

fn recorded_events(coordinator: &mut RenderCoordinator<SceneGraph>) -> Rc<RefCell<Vec<ChartEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    coordinator.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    events
}

#[test]
fn nothing_is_drawn_before_data_arrives() {
    let mut chart = coordinator();
    chart.select_company(Company::from("Meta"));
    chart.select_month(Month::March);

    assert_eq!(chart.state(), CoordinatorState::Idle);
    assert_eq!(chart.surface().clear_count(), 0);

    chart.set_dataset(Dataset::empty());
    assert_eq!(chart.state(), CoordinatorState::Idle);
    assert!(chart.surface().is_blank());
}

#[test]
fn hovering_the_apple_november_open_marker() {
    let mut chart = coordinator();
    chart.set_dataset(Dataset::new(sample_records()));

    assert_eq!(chart.state(), CoordinatorState::Ready);
    assert_eq!(chart.geometry().point_count(), 1);
    assert_eq!(chart.surface().count_markers(SeriesKind::Open), 1);
    assert_eq!(chart.surface().count_markers(SeriesKind::Close), 1);

    let tooltip = chart.pointer_moved(Point::new(386.0, 349.0), Point::new(400.0, 300.0)).clone();
    assert!(tooltip.visible);
    assert_eq!(tooltip.position, Point::new(410.0, 310.0));
    let content = tooltip.content.unwrap();
    assert_eq!(content.series, SeriesKind::Open);
    assert_eq!(content.difference_label(), "2.50");
    assert_eq!(content.date_label, "Wed Nov 01 2023");

    let tooltip = chart.pointer_moved(Point::new(600.0, 100.0), Point::new(620.0, 150.0));
    assert!(!tooltip.visible);
}

#[test]
fn moving_between_records_on_the_same_date_shows_the_second() {
    let mut chart = coordinator();
    chart.set_dataset(Dataset::new(vec![
        Record::new("Apple", day(11, 1), 100.0, 101.0),
        Record::new("Apple", day(11, 1), 140.0, 139.0),
        Record::new("Apple", day(11, 2), 120.0, 125.0),
    ]));

    let first = chart.geometry().markers(SeriesKind::Open)[0].center;
    let second = chart.geometry().markers(SeriesKind::Open)[1].center;

    let shown = chart.pointer_moved(first, first).content.clone().unwrap();
    assert_eq!(shown.open, 100.0);

    let shown = chart.pointer_moved(second, second).content.clone().unwrap();
    assert_eq!(shown.open, 140.0);
    assert_eq!(shown.difference_label(), "-1.00");
}

#[test]
fn switching_to_a_company_without_data_blanks_the_chart() {
    let mut chart = coordinator();
    chart.set_dataset(Dataset::new(sample_records()));
    let events = recorded_events(&mut chart);

    chart.select_company(Company::from("Microsoft"));

    assert_eq!(chart.state(), CoordinatorState::Ready);
    assert!(chart.surface().is_blank());
    assert_eq!(chart.geometry().point_count(), 0);
    assert!(!chart.pointer_moved(Point::new(385.0, 350.0), Point::new(0.0, 0.0)).visible);
    assert_eq!(
        events.borrow().last(),
        Some(&ChartEvent::ChartCleared { selection: chart.selection().clone() })
    );
}

#[test]
fn redraw_with_unchanged_inputs_is_identical() {
    let mut chart = coordinator();
    chart.set_dataset(Dataset::new(sample_records()));
    chart.select_company(Company::from("Meta"));
    let before = chart.surface().to_svg();
    let clears = chart.surface().clear_count();

    chart.force_redraw();

    assert_eq!(chart.surface().clear_count(), clears + 1);
    assert_eq!(chart.surface().to_svg(), before);
}

#[test]
fn reselecting_the_current_values_does_not_redraw() {
    let mut chart = coordinator();
    chart.set_dataset(Dataset::new(sample_records()));
    let clears = chart.surface().clear_count();

    chart.select_company(Company::from("Apple"));
    chart.select_month(Month::November);

    assert_eq!(chart.surface().clear_count(), clears);
}

#[test]
fn pointer_activity_never_redraws() {
    let mut chart = coordinator();
    chart.set_dataset(Dataset::new(sample_records()));
    chart.select_company(Company::from("Meta"));
    let clears = chart.surface().clear_count();

    let center = chart.geometry().markers(SeriesKind::Close)[1].center;
    assert!(chart.pointer_moved(center, center).visible);
    chart.pointer_moved(Point::new(5.0, 5.0), Point::new(5.0, 5.0));
    chart.pointer_left();

    assert_eq!(chart.surface().clear_count(), clears);
    assert!(!chart.tooltip().visible);
}

#[test]
fn dataset_identity_decides_redraws() {
    let mut chart = coordinator();
    let dataset = Dataset::new(sample_records());
    chart.set_dataset(dataset.clone());
    let clears = chart.surface().clear_count();

    chart.set_dataset(dataset.clone());
    assert_eq!(chart.surface().clear_count(), clears);

    chart.set_dataset(Dataset::new(sample_records()));
    assert_eq!(chart.surface().clear_count(), clears + 1);
}

#[test]
fn emptied_dataset_clears_a_drawn_chart() {
    let mut chart = coordinator();
    chart.set_dataset(Dataset::new(sample_records()));
    assert!(!chart.surface().is_blank());

    chart.set_dataset(Dataset::empty());
    assert!(chart.surface().is_blank());
    assert_eq!(chart.state(), CoordinatorState::Ready);
}

#[test]
fn scene_is_drawn_in_layer_order() {
    let mut chart = coordinator();
    chart.set_dataset(Dataset::new(sample_records()));
    chart.select_company(Company::from("Meta"));

    let kinds: Vec<String> = chart
        .surface()
        .elements()
        .iter()
        .map(|element| match element {
            SceneElement::Axis(axis) => match axis.orientation {
                AxisOrientation::Bottom => "x-axis".to_string(),
                AxisOrientation::Left => "y-axis".to_string(),
            },
            SceneElement::Line { series, .. } => format!("{}-line", series.as_ref()),
            SceneElement::Marker { series, .. } => format!("{}-marker", series.as_ref()),
            SceneElement::LegendSwatch { .. } => "swatch".to_string(),
            SceneElement::LegendLabel { text, .. } => format!("label:{}", text),
        })
        .collect();

    assert_eq!(
        kinds,
        [
            "x-axis",
            "y-axis",
            "open-line",
            "close-line",
            "open-marker",
            "open-marker",
            "open-marker",
            "close-marker",
            "close-marker",
            "close-marker",
            "swatch",
            "swatch",
            "label:Open",
            "label:Close",
        ]
    );
}

#[test]
fn events_follow_each_transition() {
    let mut chart = coordinator();
    let events = recorded_events(&mut chart);

    chart.set_dataset(Dataset::new(sample_records()));
    chart.select_month(Month::October);

    let apple_october = chart.selection().clone();
    assert_eq!(
        *events.borrow(),
        vec![
            ChartEvent::DatasetReplaced { record_count: 6 },
            ChartEvent::ChartRedrawn {
                selection: ChartConfig::default().default_selection,
                point_count: 1
            },
            ChartEvent::SelectionChanged { selection: apple_october.clone() },
            ChartEvent::ChartRedrawn { selection: apple_october, point_count: 1 },
        ]
    );
}

#[test]
fn json_rows_flow_through_to_the_scene() {
    let dataset = parse_records_json(
        r#"[
            {"Company": "Google", "Date": "2023-05-01", "Open": "105.10", "Close": "106.00"},
            {"Company": "Google", "Date": "2023-05-02", "Open": 106.2, "Close": 104.9}
        ]"#,
    )
    .unwrap();

    let mut chart = coordinator();
    chart.set_dataset(dataset);
    chart.select_company(Company::from("Google"));
    chart.select_month(Month::May);

    assert_eq!(chart.geometry().point_count(), 2);
    let svg = chart.surface().to_svg();
    assert!(svg.contains(r##"stroke="#b2df8a""##));
    assert!(svg.contains(r##"stroke="#e41a1c""##));
}

/// Scene that refuses to draw axes
#[derive(Default)]
struct NoAxes(SceneGraph);

impl ChartSurface for NoAxes {
    fn clear(&mut self) -> RenderingResult<()> {
        self.0.clear()
    }
    fn draw_axis(&mut self, _axis: &Axis) -> RenderingResult<()> {
        Err(ChartError::Rendering("axis font missing".to_string()))
    }
    fn draw_line(&mut self, line: &Polyline, color: Color) -> RenderingResult<()> {
        self.0.draw_line(line, color)
    }
    fn draw_markers(&mut self, markers: &[Marker], color: Color) -> RenderingResult<()> {
        self.0.draw_markers(markers, color)
    }
    fn draw_legend(&mut self, entries: &[LegendEntry]) -> RenderingResult<()> {
        self.0.draw_legend(entries)
    }
}

#[test]
fn a_failing_layer_does_not_stop_the_rest() {
    let mut chart = RenderCoordinator::new(NoAxes::default(), ChartConfig::default());
    chart.set_dataset(Dataset::new(sample_records()));

    assert_eq!(chart.state(), CoordinatorState::Ready);
    assert_eq!(chart.surface().0.count_markers(SeriesKind::Open), 1);
    assert!(chart.surface().0.elements().iter().all(|e| !matches!(e, SceneElement::Axis(_))));
}
