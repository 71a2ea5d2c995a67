use crate::error::{Error, Result};
use crate::theme::ChartTheme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlConfig {
    pub title: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            title: "Report".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub chart: ChartTheme,
    pub html: HtmlConfig,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f32),
    String(String),
}

impl NumberOrString {
    fn as_f32(&self) -> Option<f32> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => val.trim().trim_end_matches("px").parse::<f32>().ok(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ChartConfigFile {
    font_family: Option<String>,
    palette: Option<Vec<String>>,
    height: Option<NumberOrString>,
    title_align: Option<String>,
    responsive_breakpoint: Option<u32>,
    responsive_width: Option<String>,
    legend_position: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct HtmlConfigFile {
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    chart: Option<ChartConfigFile>,
    html: Option<HtmlConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Overlays a JSON (or JSON5) config document on the defaults.
pub fn parse_config(contents: &str) -> Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents).map_err(|_| Error::Json(json_err))?,
    };

    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.chart = ChartTheme::from_name(theme_name).ok_or_else(|| Error::Config {
            message: format!("unknown theme `{theme_name}`"),
        })?;
    }

    if let Some(chart) = parsed.chart {
        if let Some(v) = chart.font_family {
            config.chart.font_family = v;
        }
        if let Some(v) = chart.palette {
            if v.is_empty() {
                return Err(Error::Config {
                    message: "chart.palette must not be empty".to_string(),
                });
            }
            config.chart.palette = v;
        }
        if let Some(v) = chart.height.and_then(|v| v.as_f32()) {
            config.chart.height = v;
        }
        if let Some(v) = chart.title_align {
            config.chart.title_align = v;
        }
        if let Some(v) = chart.responsive_breakpoint {
            config.chart.responsive_breakpoint = v;
        }
        if let Some(v) = chart.responsive_width {
            config.chart.responsive_width = v;
        }
        if let Some(v) = chart.legend_position {
            config.chart.legend_position = v;
        }
    }

    if let Some(html) = parsed.html {
        if let Some(v) = html.title {
            config.html.title = v;
        }
    }

    Ok(config)
}
