use leptos::html::Canvas;
use leptos::*;

use super::globals::globals;
use super::wasm_api::take_pending_dataset;
use crate::{
    application::{RenderCoordinator, initialize_global_coordinator, with_global_coordinator_mut},
    domain::{
        chart::{Point, TooltipState},
        events::ChartEvent,
        logging::{LogComponent, get_logger},
        market_data::{Month, Selection},
    },
    infrastructure::rendering::CanvasRenderer,
    log_warn,
};

#[component]
pub fn App() -> impl IntoView {
    view! {
        <style>
            {r#"
            .chart-app {
                font-family: -apple-system, BlinkMacSystemFont, sans-serif;
                padding: 20px;
            }

            .controls {
                display: flex;
                gap: 24px;
                align-items: center;
                margin-bottom: 12px;
            }

            .chart-canvas {
                border: 1px solid #ddd;
            }

            .tooltip {
                position: absolute;
                pointer-events: none;
                background: #fff;
                border: 1px solid #ccc;
                border-radius: 4px;
                padding: 6px 8px;
                font-size: 12px;
                box-shadow: 0 2px 6px rgba(0, 0, 0, 0.15);
            }

            .status {
                margin-top: 8px;
                color: #666;
                font-size: 12px;
            }
            "#}
        </style>
        <div class="chart-app">
            <div class="controls">
                <CompanySelector />
                <MonthSelector />
            </div>
            <ChartCanvas />
            <div class="status">{move || globals().status.get()}</div>
        </div>
        <ChartTooltip />
    }
}

#[component]
fn CompanySelector() -> impl IntoView {
    let company = globals().company;
    let options = globals()
        .config
        .companies
        .iter()
        .cloned()
        .map(|name| {
            let checked = name.clone();
            let selected = name.clone();
            view! {
                <label>
                    <input
                        type="radio"
                        name="company"
                        value=name.value().to_string()
                        prop:checked=move || company.with(|current| *current == checked)
                        on:change=move |_| company.set(selected.clone())
                    />
                    {name.value().to_string()}
                </label>
            }
        })
        .collect_view();

    view! { <div class="company-selector">{options}</div> }
}

#[component]
fn MonthSelector() -> impl IntoView {
    let month = globals().month;
    let on_change = move |ev: ev::Event| match event_target_value(&ev).parse::<Month>() {
        Ok(parsed) => month.set(parsed),
        Err(_) => {
            log_warn!(
                LogComponent::Presentation("MonthSelector"),
                "Ignoring unknown month '{}'",
                event_target_value(&ev)
            );
        }
    };

    view! {
        <label>
            "Month: "
            <select on:change=on_change prop:value=move || month.get().name().to_string()>
                {globals()
                    .config
                    .months()
                    .into_iter()
                    .map(|m| {
                        view! {
                            <option value=m.name() selected=move || month.get() == m>
                                {m.name()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </label>
    }
}

/// Owns the canvas; builds the coordinator once the element is mounted and
/// forwards selection changes and pointer activity to it.
#[component]
fn ChartCanvas() -> impl IntoView {
    let area = globals().config.plot_area;
    let (width, height) = (area.width as u32, area.height as u32);
    let canvas_ref = create_node_ref::<Canvas>();

    create_effect(move |installed: Option<bool>| {
        if installed == Some(true) {
            return true;
        }
        let Some(canvas) = canvas_ref.get() else {
            return false;
        };
        match CanvasRenderer::from_canvas(&canvas, width, height) {
            Ok(renderer) => {
                install_coordinator(renderer);
                true
            }
            Err(e) => {
                get_logger().error(LogComponent::Presentation("ChartCanvas"), &e.to_string());
                globals().status.set(e.to_string());
                false
            }
        }
    });

    create_effect(move |_| {
        let selection = Selection::new(globals().company.get(), globals().month.get());
        with_global_coordinator_mut::<CanvasRenderer, _, _>(|coordinator| {
            coordinator.set_selection(selection)
        });
    });

    let on_mouse_move = move |event: web_sys::MouseEvent| {
        let local = Point::new(event.offset_x() as f64, event.offset_y() as f64);
        let page = Point::new(event.page_x() as f64, event.page_y() as f64);
        let state = with_global_coordinator_mut::<CanvasRenderer, _, _>(|coordinator| {
            coordinator.pointer_moved(local, page).clone()
        });
        if let Some(state) = state {
            globals().tooltip.set(state);
        }
    };

    let on_mouse_leave = move |_event: web_sys::MouseEvent| {
        let state = with_global_coordinator_mut::<CanvasRenderer, _, _>(|coordinator| {
            coordinator.pointer_left().clone()
        });
        globals().tooltip.set(state.unwrap_or_else(TooltipState::hidden));
    };

    view! {
        <canvas
            id="chart-canvas"
            class="chart-canvas"
            node_ref=canvas_ref
            width=width
            height=height
            on:mousemove=on_mouse_move
            on:mouseleave=on_mouse_leave
        />
    }
}

fn install_coordinator(renderer: CanvasRenderer) {
    let g = globals();
    let mut coordinator = RenderCoordinator::new(renderer, g.config.clone());
    coordinator.subscribe(report_event);
    coordinator.set_selection(g.selection());
    if let Some(dataset) = take_pending_dataset() {
        coordinator.set_dataset(dataset);
    }
    initialize_global_coordinator(coordinator);
    get_logger().info(LogComponent::Presentation("ChartCanvas"), "Chart coordinator installed");
}

fn report_event(event: &ChartEvent) {
    let g = globals();
    match event {
        ChartEvent::DatasetReplaced { record_count } => {
            g.status.set(format!("Loaded {} records", record_count));
        }
        ChartEvent::SelectionChanged { .. } => {}
        ChartEvent::ChartRedrawn { selection, point_count } => {
            g.tooltip.set(TooltipState::hidden());
            g.status.set(format!("{}: {} trading days", selection, point_count));
        }
        ChartEvent::ChartCleared { selection } => {
            g.tooltip.set(TooltipState::hidden());
            g.status.set(format!("{}: no data", selection));
        }
    }
}

#[component]
fn ChartTooltip() -> impl IntoView {
    let tooltip = globals().tooltip;

    view! {
        <div
            class="tooltip"
            style:display=move || if tooltip.with(|t| t.visible) { "block" } else { "none" }
            style:left=move || format!("{}px", tooltip.with(|t| t.position.x))
            style:top=move || format!("{}px", tooltip.with(|t| t.position.y))
        >
            {move || {
                tooltip
                    .with(|t| t.content.as_ref().map(|content| content.lines()).unwrap_or_default())
                    .into_iter()
                    .map(|line| view! { <div>{line}</div> })
                    .collect_view()
            }}
        </div>
    }
}
