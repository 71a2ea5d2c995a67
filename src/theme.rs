use serde::{Deserialize, Serialize};

/// Baseline styling shared by every chart spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartTheme {
    pub font_family: String,
    pub palette: Vec<String>,
    pub height: f32,
    pub title_align: String,
    pub responsive_breakpoint: u32,
    pub responsive_width: String,
    pub legend_position: String,
}

impl ChartTheme {
    pub fn apex_default() -> Self {
        Self {
            font_family: "Helvetica, Arial, sans-serif".to_string(),
            palette: vec![
                "#008FFB".to_string(),
                "#00E396".to_string(),
                "#FEB019".to_string(),
                "#FF4560".to_string(),
                "#775DD0".to_string(),
                "#546E7A".to_string(),
            ],
            height: 350.0,
            title_align: "left".to_string(),
            responsive_breakpoint: 480,
            responsive_width: "100%".to_string(),
            legend_position: "bottom".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            palette: vec![
                "#4E79A7".to_string(),
                "#F28E2C".to_string(),
                "#E15759".to_string(),
                "#76B7B2".to_string(),
                "#59A14F".to_string(),
                "#EDC949".to_string(),
            ],
            ..Self::apex_default()
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "modern" => Some(Self::modern()),
            "default" | "apex" | "base" => Some(Self::apex_default()),
            _ => None,
        }
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::apex_default()
    }
}
