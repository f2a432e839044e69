use super::value_objects::PlotArea;
use crate::domain::market_data::FilteredSet;
use chrono::{Datelike, Duration, NaiveDate};

const DEFAULT_TICK_COUNT: usize = 10;

/// A tick position in domain units together with its rendered label
#[derive(Debug, Clone, PartialEq)]
pub struct Tick<T> {
    pub value: T,
    pub label: String,
}

/// Linear map from a value domain onto a pixel range.
///
/// An absent or zero-width domain collapses every input onto the middle of
/// the range, so callers never see NaN or infinities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: Option<(f64, f64)>,
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: Option<(f64, f64)>, range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> Option<(f64, f64)> {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    fn span(&self) -> Option<(f64, f64)> {
        self.domain.filter(|(d0, d1)| d1 != d0 && (d1 - d0).is_finite())
    }

    pub fn is_degenerate(&self) -> bool {
        self.span().is_none()
    }

    pub fn map(&self, value: f64) -> f64 {
        let (r0, r1) = self.range;
        match self.span() {
            Some((d0, d1)) => r0 + (value - d0) / (d1 - d0) * (r1 - r0),
            None => (r0 + r1) / 2.0,
        }
    }

    /// Pixel back to domain value; a degenerate scale answers its only value
    pub fn invert(&self, pixel: f64) -> Option<f64> {
        let (r0, r1) = self.range;
        match self.span() {
            Some((d0, d1)) if r1 != r0 => Some(d0 + (pixel - r0) / (r1 - r0) * (d1 - d0)),
            _ => self.domain.map(|(d0, _)| d0),
        }
    }

    /// Round-numbered ticks (1, 2 or 5 times a power of ten) inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<Tick<f64>> {
        let Some((d0, d1)) = self.domain else {
            return Vec::new();
        };
        let (start, stop) = (d0.min(d1), d0.max(d1));
        if start == stop || count == 0 {
            return vec![Tick { value: start, label: format_number(start, 0) }];
        }

        let raw_step = (stop - start) / count as f64;
        let power = raw_step.log10().floor();
        let error = raw_step / 10f64.powf(power);
        let factor = if error >= 50f64.sqrt() {
            10.0
        } else if error >= 10f64.sqrt() {
            5.0
        } else if error >= 2f64.sqrt() {
            2.0
        } else {
            1.0
        };

        let step = factor * 10f64.powf(power);
        // Negative powers divide by an integer increment to keep labels exact
        let inverse = (power < 0.0).then(|| 10f64.powf(-power) / factor);
        let (first, last) = match inverse {
            Some(inverse) => ((start * inverse).ceil(), (stop * inverse).floor()),
            None => ((start / step).ceil(), (stop / step).floor()),
        };

        let decimals = decimals_for(step);
        let mut ticks = Vec::new();
        let mut i = first;
        while i <= last {
            let value = match inverse {
                Some(inverse) => i / inverse,
                None => i * step,
            };
            ticks.push(Tick { value, label: format_number(value, decimals) });
            i += 1.0;
        }
        ticks
    }
}

fn decimals_for(step: f64) -> usize {
    let mut decimals = 0;
    let mut scaled = step;
    while decimals < 6 && (scaled - scaled.round()).abs() > 1e-9 {
        scaled *= 10.0;
        decimals += 1;
    }
    decimals
}

fn format_number(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Linear-in-time map from calendar days onto a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: Option<(NaiveDate, NaiveDate)>,
    inner: LinearScale,
}

fn day_number(date: &NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

impl TimeScale {
    pub fn new(domain: Option<(NaiveDate, NaiveDate)>, range: (f64, f64)) -> Self {
        let numeric = domain.map(|(d0, d1)| (day_number(&d0), day_number(&d1)));
        Self { domain, inner: LinearScale::new(numeric, range) }
    }

    pub fn domain(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }

    pub fn is_degenerate(&self) -> bool {
        self.inner.is_degenerate()
    }

    pub fn map(&self, date: &NaiveDate) -> f64 {
        self.inner.map(day_number(date))
    }

    /// Nearest calendar day under a pixel
    pub fn invert(&self, pixel: f64) -> Option<NaiveDate> {
        let (d0, _) = self.domain?;
        let days = self.inner.invert(pixel)?.round() - day_number(&d0);
        d0.checked_add_signed(Duration::days(days as i64))
    }

    /// Day-aligned ticks every 1, 2, 7 or 14 days, whichever first fits
    /// `count`. Longer domains (one month picked across several years) fall
    /// back to ticks on month starts.
    pub fn ticks(&self, count: usize) -> Vec<Tick<NaiveDate>> {
        let Some((d0, d1)) = self.domain else {
            return Vec::new();
        };
        let span = (d1 - d0).num_days().max(0);
        let count = count.max(1) as i64;
        let Some(step) = [1, 2, 7, 14].into_iter().find(|step| span / step <= count) else {
            return month_ticks(d0, d1, count);
        };
        let pattern = if step <= 2 { "%a %d" } else { "%b %d" };

        (0..=span / step)
            .filter_map(|i| d0.checked_add_signed(Duration::days(i * step)))
            .map(|date| Tick { value: date, label: date.format(pattern).to_string() })
            .collect()
    }
}

fn month_index(date: &NaiveDate) -> i64 {
    date.year() as i64 * 12 + date.month0() as i64
}

fn month_start(index: i64) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(index.div_euclid(12) as i32, index.rem_euclid(12) as u32 + 1, 1)
}

/// First-of-month ticks every 1, 3 or 6 months or a whole number of years,
/// aligned to quarters, halves and Januaries.
fn month_ticks(d0: NaiveDate, d1: NaiveDate, count: i64) -> Vec<Tick<NaiveDate>> {
    let first = month_index(&d0) + i64::from(d0.day() > 1);
    let last = month_index(&d1);
    let span = (last - first).max(0);
    let step = [1, 3, 6]
        .into_iter()
        .find(|step| span / step < count)
        .unwrap_or_else(|| 12 * (span / (12 * count) + 1));
    let start = first + (step - first.rem_euclid(step)) % step;
    let pattern = if step < 12 { "%b %Y" } else { "%Y" };

    (start..=last)
        .step_by(step as usize)
        .filter_map(month_start)
        .map(|date| Tick { value: date, label: date.format(pattern).to_string() })
        .collect()
}

/// Both coordinate maps for one filtered set, rebuilt on every redraw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScales {
    pub x: TimeScale,
    pub y: LinearScale,
}

impl ChartScales {
    /// Time extent drives x, the joint open/close extent drives y.
    pub fn build(filtered: &FilteredSet, area: &PlotArea) -> Self {
        Self {
            x: TimeScale::new(filtered.date_extent(), area.x_range()),
            y: LinearScale::new(filtered.value_extent(), area.y_range()),
        }
    }

    /// False when there was nothing to take a domain from
    pub fn is_drawable(&self) -> bool {
        self.x.domain().is_some() && self.y.domain().is_some()
    }

    pub fn x_ticks(&self) -> Vec<Tick<NaiveDate>> {
        self.x.ticks(DEFAULT_TICK_COUNT)
    }

    pub fn y_ticks(&self) -> Vec<Tick<f64>> {
        self.y.ticks(DEFAULT_TICK_COUNT)
    }
}

/// Shorthand for [`ChartScales::build`]
pub fn build_scales(filtered: &FilteredSet, area: &PlotArea) -> ChartScales {
    ChartScales::build(filtered, area)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_maps_domain_ends_onto_range_ends() {
        let scale = LinearScale::new(Some((100.0, 132.0)), (350.0, 20.0));
        assert_eq!(scale.map(100.0), 350.0);
        assert_eq!(scale.map(132.0), 20.0);
        assert_eq!(scale.map(110.0), 246.875);
        assert_eq!(scale.invert(246.875), Some(110.0));
    }

    #[test]
    fn degenerate_domain_collapses_to_midpoint() {
        let flat = LinearScale::new(Some((5.0, 5.0)), (350.0, 20.0));
        assert_eq!(flat.map(5.0), 185.0);
        assert_eq!(flat.invert(0.0), Some(5.0));

        let missing = LinearScale::new(None, (50.0, 720.0));
        assert_eq!(missing.map(1.0e9), 385.0);
        assert_eq!(missing.invert(100.0), None);
        assert!(missing.ticks(10).is_empty());
    }

    #[test]
    fn value_ticks_use_round_steps() {
        let scale = LinearScale::new(Some((148.3, 155.9)), (350.0, 20.0));
        let labels: Vec<String> = scale.ticks(10).into_iter().map(|t| t.label).collect();
        assert_eq!(labels, ["149", "150", "151", "152", "153", "154", "155"]);

        let fine = LinearScale::new(Some((1.0, 2.0)), (350.0, 20.0));
        let ticks = fine.ticks(10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[3].label, "1.3");
    }

    #[test]
    fn time_ticks_span_the_month() {
        let start = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 11, 30).unwrap();
        let scale = TimeScale::new(Some((start, end)), (50.0, 720.0));

        assert_eq!(scale.map(&start), 50.0);
        assert_eq!(scale.map(&end), 720.0);

        let ticks = scale.ticks(10);
        assert_eq!(ticks.len(), 5);
        assert_eq!(ticks[0].label, "Nov 01");
        assert_eq!(ticks[1].label, "Nov 08");
        assert_eq!(scale.invert(720.0), Some(end));
    }

    #[test]
    fn time_ticks_stay_bounded_across_years() {
        let start = NaiveDate::from_ymd_opt(2014, 11, 3).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 11, 30).unwrap();
        let scale = TimeScale::new(Some((start, end)), (50.0, 720.0));

        let labels: Vec<String> = scale.ticks(10).into_iter().map(|t| t.label).collect();
        assert_eq!(
            labels,
            ["2015", "2016", "2017", "2018", "2019", "2020", "2021", "2022", "2023"]
        );

        let two_novembers = TimeScale::new(
            Some((NaiveDate::from_ymd_opt(2022, 11, 1).unwrap(), end)),
            (50.0, 720.0),
        );
        let labels: Vec<String> = two_novembers.ticks(10).into_iter().map(|t| t.label).collect();
        assert_eq!(labels, ["Jan 2023", "Apr 2023", "Jul 2023", "Oct 2023"]);
    }
}
