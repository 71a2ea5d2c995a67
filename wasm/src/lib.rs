use report_plan::{ChartTheme, build_chart_spec_for_tag, compile_report, graph_data, plan_to_json};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportPlanOptions {
    theme: Option<String>,
    font_family: Option<String>,
    palette: Option<Vec<String>>,
    chart_height: Option<f32>,
}

fn build_chart_theme(options: ReportPlanOptions) -> ChartTheme {
    let mut theme = options
        .theme
        .as_deref()
        .and_then(ChartTheme::from_name)
        .unwrap_or_default();

    if let Some(font_family) = options.font_family {
        theme.font_family = font_family;
    }
    if let Some(palette) = options.palette.filter(|palette| !palette.is_empty()) {
        theme.palette = palette;
    }
    if let Some(height) = options.chart_height {
        theme.height = height;
    }

    theme
}

fn parse_options(options_json: Option<String>) -> Result<ReportPlanOptions, JsValue> {
    match options_json {
        Some(raw_options) => serde_json::from_str::<ReportPlanOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string())),
        None => Ok(ReportPlanOptions::default()),
    }
}

#[wasm_bindgen]
pub fn compile_report_plan(
    template: &str,
    payload: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let theme = build_chart_theme(parse_options(options_json)?);
    let plan = compile_report(template, payload);
    plan_to_json(&plan, &theme).map_err(|error| JsValue::from_str(&error.to_string()))
}

#[wasm_bindgen]
pub fn build_chart_spec(
    data_json: &str,
    kind: &str,
    title: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let theme = build_chart_theme(parse_options(options_json)?);
    let input = serde_json::from_str::<serde_json::Value>(data_json).ok();
    let data = graph_data(input.as_ref());
    let spec = build_chart_spec_for_tag(&data, kind, title, &theme);
    serde_json::to_string(&spec).map_err(|error| JsValue::from_str(&error.to_string()))
}
