use chrono::{Duration, NaiveDate};
use open_close_chart_wasm::domain::{
    chart::{ChartScales, LinearScale, PlotArea},
    market_data::{Record, Selection, filter},
};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

fn november_rows(rows: &[(u8, i16, i16)]) -> Vec<Record> {
    let first = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
    rows.iter()
        .map(|&(day, open, close)| {
            Record::new(
                "Apple",
                first + Duration::days(day as i64 % 30),
                open as f64 / 4.0,
                close as f64 / 4.0,
            )
        })
        .collect()
}

#[quickcheck]
fn extremes_land_on_the_plot_edges(rows: Vec<(u8, i16, i16)>) -> TestResult {
    let records = november_rows(&rows);
    let filtered = filter(&records, &Selection::default());
    let (Some((first, last)), Some((low, high))) = (filtered.date_extent(), filtered.value_extent())
    else {
        return TestResult::discard();
    };
    if first == last || low == high {
        return TestResult::discard();
    }

    let scales = ChartScales::build(&filtered, &PlotArea::default());
    TestResult::from_bool(
        scales.x.map(&first) == 50.0
            && scales.x.map(&last) == 720.0
            && scales.y.map(high) == 20.0
            && scales.y.map(low) == 350.0,
    )
}

#[quickcheck]
fn every_record_maps_inside_the_plot(rows: Vec<(u8, i16, i16)>) -> bool {
    let records = november_rows(&rows);
    let filtered = filter(&records, &Selection::default());
    let scales = ChartScales::build(&filtered, &PlotArea::default());

    filtered.iter().all(|record| {
        let x = scales.x.map(&record.date);
        let ys = [scales.y.map(record.open.value()), scales.y.map(record.close.value())];
        (50.0..=720.0).contains(&x) && ys.iter().all(|y| (20.0..=350.0).contains(y))
    })
}

#[test]
fn degenerate_domains_map_to_the_middle() {
    let record = Record::new("Apple", NaiveDate::from_ymd_opt(2023, 11, 1).unwrap(), 42.0, 42.0);
    let filtered = filter(&[record.clone()], &Selection::default());
    let scales = ChartScales::build(&filtered, &PlotArea::default());

    assert_eq!(scales.x.map(&record.date), 385.0);
    assert_eq!(scales.y.map(42.0), 185.0);
    assert!(scales.x.map(&record.date).is_finite());
}

#[test]
fn empty_selection_builds_no_domain() {
    let filtered = filter(&[], &Selection::default());
    let scales = ChartScales::build(&filtered, &PlotArea::default());
    assert!(!scales.is_drawable());
    assert!(scales.x_ticks().is_empty());
}

#[test]
fn value_ticks_are_round_numbers() {
    let scale = LinearScale::new(Some((100.0, 132.0)), (350.0, 20.0));
    let labels: Vec<String> = scale.ticks(10).into_iter().map(|t| t.label).collect();
    assert_eq!(labels, ["100", "105", "110", "115", "120", "125", "130"]);
}
