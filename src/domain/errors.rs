use derive_more::Display;
use wasm_bindgen::JsValue;

/// Every failure the chart can report. None of them is fatal to the page.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum ChartError {
    /// A dataset row could not be turned into a record
    #[display(fmt = "Ingestion Error: {}", _0)]
    Ingestion(String),
    #[display(fmt = "Configuration Error: {}", _0)]
    Configuration(String),
    #[display(fmt = "Rendering Error: {}", _0)]
    Rendering(String),
}

impl std::error::Error for ChartError {}

impl From<ChartError> for JsValue {
    fn from(error: ChartError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

pub type IngestionResult<T> = Result<T, ChartError>;
pub type RenderingResult<T> = Result<T, ChartError>;
