use std::cell::RefCell;
use std::str::FromStr;

use leptos::SignalSet;
use wasm_bindgen::prelude::*;

use super::globals::globals;
use crate::{
    application::{with_global_coordinator, with_global_coordinator_mut},
    domain::{
        errors::ChartError,
        logging::LogComponent,
        market_data::{Company, Dataset, Month},
    },
    infrastructure::{ingest::parse_records_json, rendering::CanvasRenderer},
    log_error,
};

// Datasets handed over before the canvas is mounted wait here
thread_local! {
    static PENDING_DATASET: RefCell<Option<Dataset>> = const { RefCell::new(None) };
}

pub(crate) fn take_pending_dataset() -> Option<Dataset> {
    PENDING_DATASET.with(|pending| pending.borrow_mut().take())
}

fn coordinator_installed() -> bool {
    with_global_coordinator::<CanvasRenderer, _, _>(|_| ()).is_some()
}

/// Replace the chart's dataset with rows parsed from a JSON array of
/// `{"Company", "Date", "Open", "Close"}`. Returns the record count.
#[wasm_bindgen(js_name = loadDatasetJson)]
pub fn load_dataset_json(json: &str) -> Result<usize, JsValue> {
    let dataset = parse_records_json(json).inspect_err(|e| {
        log_error!(LogComponent::Presentation("WasmApi"), "Rejected dataset: {}", e);
    })?;
    let record_count = dataset.len();

    if coordinator_installed() {
        with_global_coordinator_mut::<CanvasRenderer, _, _>(|coordinator| {
            coordinator.set_dataset(dataset)
        });
    } else {
        PENDING_DATASET.with(|pending| *pending.borrow_mut() = Some(dataset));
    }
    Ok(record_count)
}

#[wasm_bindgen(js_name = selectCompany)]
pub fn select_company(name: &str) -> Result<(), JsValue> {
    let company = Company::from(name.trim());
    if !globals().config.companies.contains(&company) {
        return Err(ChartError::Configuration(format!("unknown company '{}'", name)).into());
    }
    globals().company.set(company);
    Ok(())
}

#[wasm_bindgen(js_name = selectMonth)]
pub fn select_month(name: &str) -> Result<(), JsValue> {
    let month = Month::from_str(name.trim())
        .map_err(|_| ChartError::Configuration(format!("unknown month '{}'", name)))?;
    globals().month.set(month);
    Ok(())
}

/// `"Apple / November"`
#[wasm_bindgen(js_name = currentSelection)]
pub fn current_selection() -> String {
    globals().selection().to_string()
}

#[wasm_bindgen(js_name = redrawChart)]
pub fn redraw_chart() {
    with_global_coordinator_mut::<CanvasRenderer, _, _>(|coordinator| coordinator.force_redraw());
}
