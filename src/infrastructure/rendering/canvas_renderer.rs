use crate::domain::{
    chart::{
        Axis, AxisOrientation, ChartSurface, Color, LEGEND_FONT_SIZE, LegendEntry, MARKER_RADIUS,
        Marker, Polyline,
    },
    errors::{ChartError, RenderingResult},
    logging::{LogComponent, get_logger},
};
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const AXIS_FONT: &str = "10px sans-serif";
const LINE_WIDTH: f64 = 1.5;

/// Canvas 2D drawing target for the chart
pub struct CanvasRenderer {
    context: CanvasRenderingContext2d,
    width: u32,
    height: u32,
}

impl CanvasRenderer {
    /// Look up `<canvas id=canvas_id>` and size it
    pub fn attach(canvas_id: &str, width: u32, height: u32) -> RenderingResult<Self> {
        let canvas = gloo::utils::document()
            .get_element_by_id(canvas_id)
            .ok_or_else(|| ChartError::Rendering(format!("canvas '{}' not found", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ChartError::Rendering(format!("'{}' is not a canvas", canvas_id)))?;
        Self::from_canvas(&canvas, width, height)
    }

    pub fn from_canvas(canvas: &HtmlCanvasElement, width: u32, height: u32) -> RenderingResult<Self> {
        canvas.set_width(width);
        canvas.set_height(height);

        let context = canvas
            .get_context("2d")
            .map_err(|e| ChartError::Rendering(format!("getContext failed: {:?}", e)))?
            .ok_or_else(|| ChartError::Rendering("2D context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ChartError::Rendering("failed to cast to 2D context".to_string()))?;

        get_logger().debug(
            LogComponent::Infrastructure("CanvasRenderer"),
            &format!("Attached to {}x{} canvas", width, height),
        );
        Ok(Self { context, width, height })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_text(&self, text: &str, x: f64, y: f64) -> RenderingResult<()> {
        self.context.fill_text(text, x, y).map_err(js_error)
    }

    fn circle(&self, x: f64, y: f64, radius: f64, color: Color) -> RenderingResult<()> {
        self.context.set_fill_style(&JsValue::from(color.to_css()));
        self.context.begin_path();
        self.context.arc(x, y, radius, 0.0, TAU).map_err(js_error)?;
        self.context.fill();
        Ok(())
    }
}

fn js_error(error: JsValue) -> ChartError {
    ChartError::Rendering(format!("{:?}", error))
}

impl ChartSurface for CanvasRenderer {
    fn clear(&mut self) -> RenderingResult<()> {
        self.context.clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
        Ok(())
    }

    fn draw_axis(&mut self, axis: &Axis) -> RenderingResult<()> {
        let ctx = &self.context;
        let black = JsValue::from(Color::BLACK.to_css());
        ctx.set_stroke_style(&black);
        ctx.set_fill_style(&black);
        ctx.set_line_width(1.0);
        ctx.set_font(AXIS_FONT);

        ctx.begin_path();
        ctx.move_to(axis.start.x, axis.start.y);
        ctx.line_to(axis.end.x, axis.end.y);
        for tick in &axis.ticks {
            let (from, to) = axis.tick_mark(tick);
            ctx.move_to(from.x, from.y);
            ctx.line_to(to.x, to.y);
        }
        ctx.stroke();

        match axis.orientation {
            AxisOrientation::Bottom => {
                ctx.set_text_align("center");
                ctx.set_text_baseline("top");
            }
            AxisOrientation::Left => {
                ctx.set_text_align("end");
                ctx.set_text_baseline("middle");
            }
        }
        for tick in &axis.ticks {
            let anchor = axis.label_anchor(tick);
            self.fill_text(&tick.label, anchor.x, anchor.y)?;
        }
        Ok(())
    }

    fn draw_line(&mut self, line: &Polyline, color: Color) -> RenderingResult<()> {
        if !line.is_drawable() {
            return Ok(());
        }
        let ctx = &self.context;
        ctx.set_stroke_style(&JsValue::from(color.to_css()));
        ctx.set_line_width(LINE_WIDTH);
        ctx.begin_path();
        let mut points = line.points.iter();
        if let Some(first) = points.next() {
            ctx.move_to(first.x, first.y);
        }
        for point in points {
            ctx.line_to(point.x, point.y);
        }
        ctx.stroke();
        Ok(())
    }

    fn draw_markers(&mut self, markers: &[Marker], color: Color) -> RenderingResult<()> {
        for marker in markers {
            self.circle(marker.center.x, marker.center.y, marker.radius, color)?;
        }
        Ok(())
    }

    fn draw_legend(&mut self, entries: &[LegendEntry]) -> RenderingResult<()> {
        for entry in entries {
            self.circle(entry.swatch.x, entry.swatch.y, MARKER_RADIUS, entry.color)?;
        }
        let ctx = &self.context;
        ctx.set_fill_style(&JsValue::from(Color::BLACK.to_css()));
        ctx.set_font(&format!("{}px sans-serif", LEGEND_FONT_SIZE));
        ctx.set_text_align("start");
        ctx.set_text_baseline("middle");
        for entry in entries {
            self.fill_text(&entry.label(), entry.label_anchor.x, entry.label_anchor.y)?;
        }
        Ok(())
    }
}
