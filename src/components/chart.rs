//! Chart Components
//!
//! HTML5 Canvas charts: the fill-level trend line and a labeled bar chart
//! for the analytics breakdowns.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::domain::trend::TrendPoint;
use crate::state::BinData;

const LINE_COLOR: &str = "#4CAF50";
const BAR_COLOR: &str = "#2196F3";

/// Fill-level trend chart. Redraws whenever the store changes.
#[component]
pub fn TrendChart() -> impl IntoView {
    let data = use_context::<BinData>().expect("BinData not found");
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        let points: Vec<TrendPoint> =
            data.store.with(|s| s.trend().points().to_vec());
        if let Some(canvas) = canvas_ref.get() {
            draw_trend(&canvas, &points);
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width="800"
            height="300"
            class="w-full h-48 md:h-72 rounded-lg"
        />
    }
}

/// Labeled bar chart over (label, value) pairs.
#[component]
pub fn BarChart(#[prop(into)] series: Signal<Vec<(String, f64)>>) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        let bars = series.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_bars(&canvas, &bars);
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width="800"
            height="300"
            class="w-full h-48 md:h-72 rounded-lg"
        />
    }
}

fn context_of(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}

struct Frame {
    width: f64,
    height: f64,
    left: f64,
    top: f64,
    chart_width: f64,
    chart_height: f64,
}

/// Clear the canvas and draw the horizontal grid with 0-100 axis labels.
fn draw_grid(ctx: &CanvasRenderingContext2d, canvas: &HtmlCanvasElement) -> Frame {
    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let frame = Frame {
        width,
        height,
        left: 40.0,
        top: 15.0,
        chart_width: width - 40.0 - 15.0,
        chart_height: height - 15.0 - 35.0,
    };

    ctx.set_fill_style(&"#1f2937".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    ctx.set_stroke_style(&"#374151".into());
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");

    for i in 0..=4 {
        let y = frame.top + (i as f64 / 4.0) * frame.chart_height;
        ctx.begin_path();
        ctx.move_to(frame.left, y);
        ctx.line_to(width - 15.0, y);
        ctx.stroke();

        let value = 100.0 - (i as f64 / 4.0) * 100.0;
        ctx.set_fill_style(&"#9ca3af".into());
        let _ = ctx.fill_text(&format!("{:.0}%", value), 5.0, y + 4.0);
    }

    frame
}

fn draw_trend(canvas: &HtmlCanvasElement, points: &[TrendPoint]) {
    let Some(ctx) = context_of(canvas) else {
        return;
    };
    let frame = draw_grid(&ctx, canvas);

    if points.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No data", frame.width / 2.0 - 30.0, frame.height / 2.0);
        return;
    }

    let step = if points.len() > 1 {
        frame.chart_width / (points.len() - 1) as f64
    } else {
        0.0
    };
    let y_of = |level: u8| frame.top + ((100 - level) as f64 / 100.0) * frame.chart_height;

    ctx.set_stroke_style(&LINE_COLOR.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, point) in points.iter().enumerate() {
        let x = frame.left + i as f64 * step;
        let y = y_of(point.level);
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.stroke();

    ctx.set_fill_style(&LINE_COLOR.into());
    for (i, point) in points.iter().enumerate() {
        let x = frame.left + i as f64 * step;
        ctx.begin_path();
        let _ = ctx.arc(x, y_of(point.level), 3.0, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();
    }

    // Hour labels, thinned so they stay legible.
    ctx.set_fill_style(&"#9ca3af".into());
    ctx.set_font("12px sans-serif");
    let thin = (points.len() / 8).max(1);
    for (i, point) in points.iter().enumerate() {
        if i % thin == 0 {
            let x = frame.left + i as f64 * step;
            let _ = ctx.fill_text(&point.time_label, x - 14.0, frame.height - 10.0);
        }
    }
}

fn draw_bars(canvas: &HtmlCanvasElement, bars: &[(String, f64)]) {
    let Some(ctx) = context_of(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let left = 40.0;
    let top = 15.0;
    let chart_width = width - left - 15.0;
    let chart_height = height - top - 35.0;

    ctx.set_fill_style(&"#1f2937".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    if bars.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No data", width / 2.0 - 30.0, height / 2.0);
        return;
    }

    let max = bars.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max).max(1.0);

    ctx.set_stroke_style(&"#374151".into());
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=4 {
        let y = top + (i as f64 / 4.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(left, y);
        ctx.line_to(width - 15.0, y);
        ctx.stroke();

        let value = max - (i as f64 / 4.0) * max;
        ctx.set_fill_style(&"#9ca3af".into());
        let _ = ctx.fill_text(&format!("{:.1}", value), 5.0, y + 4.0);
    }

    let slot = chart_width / bars.len() as f64;
    let bar_width = (slot * 0.6).min(60.0);

    for (i, (label, value)) in bars.iter().enumerate() {
        let x = left + i as f64 * slot + (slot - bar_width) / 2.0;
        let bar_height = (value / max) * chart_height;
        let y = top + chart_height - bar_height;

        ctx.set_fill_style(&BAR_COLOR.into());
        ctx.fill_rect(x, y, bar_width, bar_height);

        ctx.set_fill_style(&"#9ca3af".into());
        let _ = ctx.fill_text(label, x, height - 10.0);
    }
}
