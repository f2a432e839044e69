use crate::domain::{
    errors::{ChartError, IngestionResult},
    logging::{LogComponent, get_logger},
    market_data::{Dataset, Record},
};
use chrono::NaiveDate;
use serde::Deserialize;

/// One row of the stock CSV, as JSON. Prices arrive either as numbers or as
/// the raw CSV text.
#[derive(Debug, Deserialize)]
pub struct RecordRow {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Open")]
    pub open: PriceField,
    #[serde(rename = "Close")]
    pub close: PriceField,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Number(f64),
    Text(String),
}

impl PriceField {
    fn parse(&self, column: &str, row: usize) -> IngestionResult<f64> {
        let value = match self {
            PriceField::Number(value) => *value,
            PriceField::Text(text) => text.trim().parse::<f64>().map_err(|e| {
                ChartError::Ingestion(format!("row {}: {} '{}': {}", row, column, text, e))
            })?,
        };
        if !value.is_finite() {
            return Err(ChartError::Ingestion(format!("row {}: {} is not finite", row, column)));
        }
        Ok(value)
    }
}

impl RecordRow {
    /// Converts the DTO into a domain record
    pub fn to_domain_record(&self, row: usize) -> IngestionResult<Record> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|e| {
            ChartError::Ingestion(format!("row {}: Date '{}': {}", row, self.date, e))
        })?;
        let open = self.open.parse("Open", row)?;
        let close = self.close.parse("Close", row)?;
        Ok(Record::new(self.company.trim(), date, open, close))
    }
}

/// Parse a JSON array of rows into a fresh dataset. The first bad row aborts
/// the whole load.
pub fn parse_records_json(json: &str) -> IngestionResult<Dataset> {
    let rows: Vec<RecordRow> = serde_json::from_str(json)
        .map_err(|e| ChartError::Ingestion(format!("malformed dataset JSON: {}", e)))?;

    let records = rows
        .iter()
        .enumerate()
        .map(|(row, dto)| dto.to_domain_record(row))
        .collect::<IngestionResult<Vec<Record>>>()?;

    get_logger().info(
        LogComponent::Infrastructure("Ingest"),
        &format!("Parsed {} records", records.len()),
    );
    Ok(Dataset::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::Month;

    #[test]
    fn parses_numeric_and_text_prices() {
        let json = r#"[
            {"Company": "Apple", "Date": "2023-11-01", "Open": 150, "Close": "152.5"},
            {"Company": "Meta", "Date": "2023-03-14", "Open": "201.10", "Close": 199.9}
        ]"#;
        let dataset = parse_records_json(json).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset[0].company.value(), "Apple");
        assert_eq!(dataset[0].close.value(), 152.5);
        assert_eq!(dataset[1].month(), Month::March);
    }

    #[test]
    fn bad_date_is_an_ingestion_error() {
        let json = r#"[{"Company": "Apple", "Date": "11/01/2023", "Open": 1, "Close": 2}]"#;
        let err = parse_records_json(json).unwrap_err();
        assert!(matches!(err, ChartError::Ingestion(ref msg) if msg.contains("row 0")));
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let json = r#"[{"Company": "Apple", "Date": "2023-11-01", "Open": "n/a", "Close": 2}]"#;
        assert!(matches!(parse_records_json(json), Err(ChartError::Ingestion(_))));
    }

    #[test]
    fn empty_array_gives_empty_dataset() {
        assert!(parse_records_json("[]").unwrap().is_empty());
    }
}
