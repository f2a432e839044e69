use wasm_bindgen::prelude::*;

pub mod application;
pub mod domain;
pub mod infrastructure;
#[cfg(not(feature = "logic-only"))]
pub mod presentation;

use application::ChartConfig;
use domain::logging::{LogComponent, get_logger};

/// Reads an optional `<script id="chart-config" type="application/json">`
/// block from the page; invalid JSON falls back to the defaults.
fn load_page_config() -> ChartConfig {
    let Some(json) = gloo::utils::document()
        .get_element_by_id("chart-config")
        .and_then(|element| element.text_content())
    else {
        return ChartConfig::default();
    };
    ChartConfig::from_json(&json).unwrap_or_else(|e| {
        crate::log_warn!(LogComponent::Presentation("Initialize"), "Ignoring page config: {}", e);
        ChartConfig::default()
    })
}

#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = Box::new(infrastructure::services::ConsoleLogger::new_development());
    domain::logging::init_logger(console_logger);
    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    let config = load_page_config();
    get_logger().info(
        LogComponent::Presentation("Initialize"),
        &format!("Starting chart for {}", config.default_selection),
    );

    #[cfg(not(feature = "logic-only"))]
    {
        presentation::init_globals(config);
        leptos::mount_to_body(presentation::App);
    }
}
