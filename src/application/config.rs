use crate::domain::{
    chart::{MARKER_RADIUS, PlotArea, SeriesPalette, TOOLTIP_OFFSET},
    errors::ChartError,
    market_data::{Company, DEFAULT_COMPANIES, Month, Selection},
};
use serde::Deserialize;

/// Everything the host can tune about the chart. Missing JSON fields fall
/// back to the defaults below.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub plot_area: PlotArea,
    pub companies: Vec<Company>,
    pub default_selection: Selection,
    pub marker_radius: f64,
    pub tooltip_offset: f64,
    pub palette: SeriesPalette,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            plot_area: PlotArea::default(),
            companies: DEFAULT_COMPANIES.iter().copied().map(Company::from).collect(),
            default_selection: Selection::default(),
            marker_radius: MARKER_RADIUS,
            tooltip_offset: TOOLTIP_OFFSET,
            palette: SeriesPalette::default(),
        }
    }
}

impl ChartConfig {
    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        let config: ChartConfig = serde_json::from_str(json)
            .map_err(|e| ChartError::Configuration(format!("invalid chart config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn months(&self) -> Vec<Month> {
        Month::all()
    }

    /// Rejects layouts that leave no room to plot in
    pub fn validate(&self) -> Result<(), ChartError> {
        let area = &self.plot_area;
        let margins = [area.margins.top, area.margins.right, area.margins.bottom, area.margins.left];
        if margins.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(ChartError::Configuration("margins must be finite and >= 0".to_string()));
        }
        if !(area.plot_width() > area.margins.left) {
            return Err(ChartError::Configuration(format!(
                "plot width {} leaves no room right of the left margin {}",
                area.plot_width(),
                area.margins.left
            )));
        }
        if !(area.plot_height() > area.margins.top) {
            return Err(ChartError::Configuration(format!(
                "plot height {} leaves no room below the top margin {}",
                area.plot_height(),
                area.margins.top
            )));
        }
        if !(self.marker_radius > 0.0) {
            return Err(ChartError::Configuration("marker radius must be positive".to_string()));
        }
        if self.companies.is_empty() {
            return Err(ChartError::Configuration("at least one company is required".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ChartConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.companies.len(), 5);
        assert_eq!(config.default_selection, Selection::new("Apple", Month::November));
        assert_eq!(config.months().len(), 12);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ChartConfig::from_json(
            r#"{"default_selection": {"company": "Meta", "month": "March"}}"#,
        )
        .unwrap();
        assert_eq!(config.default_selection, Selection::new("Meta", Month::March));
        assert_eq!(config.plot_area, PlotArea::default());
    }

    #[test]
    fn oversized_margins_are_rejected() {
        let result = ChartConfig::from_json(
            r#"{"plot_area": {"width": 120, "height": 400,
                "margins": {"top": 20, "right": 30, "bottom": 30, "left": 50}}}"#,
        );
        assert!(matches!(result, Err(ChartError::Configuration(_))));
    }
}
