//! Chart spec synthesis for graph sections.
//!
//! Every [`ChartKind`] maps to exactly one [`SeriesShape`]; the shape decides how the
//! generic `{labels, values}` pair becomes chart series. Baseline options (title,
//! palette, responsive rule) are identical across kinds.

use crate::ir::{ChartKind, DataValue, GraphData, Section, SectionBody};
use crate::theme::ChartTheme;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesShape {
    /// One named series over `values`, labels on the x axis.
    Categorical,
    /// `values` is the series; labels go to `options.labels`.
    Flat,
    /// One named series of `{x: label, y: value}` points.
    Treemap,
    /// One named series over `values` kept exactly as supplied.
    Raw,
}

impl ChartKind {
    pub fn series_shape(self) -> SeriesShape {
        match self {
            ChartKind::Bar
            | ChartKind::Line
            | ChartKind::Area
            | ChartKind::Scatter
            | ChartKind::Radar
            | ChartKind::Heatmap
            | ChartKind::Boxplot => SeriesShape::Categorical,
            ChartKind::Pie | ChartKind::Donut | ChartKind::RadialBar => SeriesShape::Flat,
            ChartKind::Treemap => SeriesShape::Treemap,
            ChartKind::Candlestick | ChartKind::Bubble => SeriesShape::Raw,
        }
    }

    /// Type name the chart front end expects in `options.chart.type`.
    pub fn renderer_type(self) -> &'static str {
        match self {
            ChartKind::RadialBar => "radialBar",
            ChartKind::Boxplot => "boxPlot",
            other => other.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub series: ChartSeries,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartSeries {
    Flat(Vec<DataValue>),
    Named(Vec<NamedSeries>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedSeries {
    pub name: String,
    pub data: SeriesData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesData {
    Values(Vec<DataValue>),
    Points(Vec<TreemapPoint>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapPoint {
    pub x: String,
    pub y: DataValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub chart: ChartFrame,
    pub title: ChartTitle,
    pub colors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<XAxis>,
    pub responsive: Vec<ResponsiveRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartFrame {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub height: f32,
    pub font_family: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartTitle {
    pub text: String,
    pub align: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XAxis {
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsiveRule {
    pub breakpoint: u32,
    pub options: ResponsiveOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsiveOptions {
    pub chart: ResponsiveChart,
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsiveChart {
    pub width: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub position: String,
}

pub fn build_chart_spec(
    data: &GraphData,
    kind: ChartKind,
    title: &str,
    theme: &ChartTheme,
) -> ChartSpec {
    let mut options = base_options(kind, title, theme);
    let series = match kind.series_shape() {
        SeriesShape::Categorical => {
            options.xaxis = Some(XAxis {
                categories: data.labels.clone(),
            });
            named(title, SeriesData::Values(data.values.clone()))
        }
        SeriesShape::Flat => {
            options.labels = Some(data.labels.clone());
            ChartSeries::Flat(data.values.clone())
        }
        SeriesShape::Treemap => named(title, SeriesData::Points(treemap_points(data))),
        SeriesShape::Raw => named(title, SeriesData::Values(data.values.clone())),
    };
    ChartSpec { series, options }
}

/// Builds a chart spec from a raw chart-kind tag; unrecognized tags fall back to `bar`.
pub fn build_chart_spec_for_tag(
    data: &GraphData,
    tag: &str,
    title: &str,
    theme: &ChartTheme,
) -> ChartSpec {
    build_chart_spec(data, ChartKind::parse(tag), title, theme)
}

/// Chart spec for a graph section, titled after the section. `None` for other kinds.
pub fn build_section_chart(section: &Section, theme: &ChartTheme) -> Option<ChartSpec> {
    match &section.body {
        SectionBody::Graph { data, graph_type } => {
            Some(build_chart_spec(data, *graph_type, &section.title, theme))
        }
        _ => None,
    }
}

fn named(title: &str, data: SeriesData) -> ChartSeries {
    ChartSeries::Named(vec![NamedSeries {
        name: title.to_string(),
        data,
    }])
}

fn treemap_points(data: &GraphData) -> Vec<TreemapPoint> {
    data.labels
        .iter()
        .enumerate()
        .map(|(idx, label)| TreemapPoint {
            x: label.clone(),
            y: data
                .values
                .get(idx)
                .cloned()
                .unwrap_or(DataValue::Number(0.into())),
        })
        .collect()
}

fn base_options(kind: ChartKind, title: &str, theme: &ChartTheme) -> ChartOptions {
    ChartOptions {
        chart: ChartFrame {
            kind: kind.renderer_type(),
            height: theme.height,
            font_family: theme.font_family.clone(),
        },
        title: ChartTitle {
            text: title.to_string(),
            align: theme.title_align.clone(),
        },
        colors: theme.palette.clone(),
        labels: None,
        xaxis: None,
        responsive: vec![ResponsiveRule {
            breakpoint: theme.responsive_breakpoint,
            options: ResponsiveOptions {
                chart: ResponsiveChart {
                    width: theme.responsive_width.clone(),
                },
                legend: Legend {
                    position: theme.legend_position.clone(),
                },
            },
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> GraphData {
        GraphData::new(
            vec!["A".to_string(), "B".to_string()],
            vec![DataValue::Number(1.into()), DataValue::Number(2.into())],
        )
    }

    #[test]
    fn pie_series_is_values_with_labels() {
        let spec = build_chart_spec(&sample(), ChartKind::Pie, "Title", &ChartTheme::default());
        assert_eq!(
            spec.series,
            ChartSeries::Flat(vec![DataValue::Number(1.into()), DataValue::Number(2.into())])
        );
        assert_eq!(
            spec.options.labels,
            Some(vec!["A".to_string(), "B".to_string()])
        );
        assert_eq!(spec.options.xaxis, None);
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["series"], json!([1, 2]));
        assert_eq!(value["options"]["labels"], json!(["A", "B"]));
    }

    #[test]
    fn unknown_tag_matches_bar() {
        let theme = ChartTheme::default();
        let fallback = build_chart_spec_for_tag(&sample(), "unknown-kind", "Title", &theme);
        let bar = build_chart_spec_for_tag(&sample(), "bar", "Title", &theme);
        assert_eq!(fallback, bar);
        assert_eq!(
            serde_json::to_value(&fallback).unwrap(),
            serde_json::to_value(&bar).unwrap()
        );
    }

    #[test]
    fn categorical_kinds_wrap_values_and_set_categories() {
        let theme = ChartTheme::default();
        for kind in ChartKind::ALL
            .into_iter()
            .filter(|kind| kind.series_shape() == SeriesShape::Categorical)
        {
            let spec = build_chart_spec(&sample(), kind, "Scores", &theme);
            let value = serde_json::to_value(&spec).unwrap();
            assert_eq!(
                value["series"],
                json!([{"name": "Scores", "data": [1, 2]}]),
                "{kind}"
            );
            assert_eq!(value["options"]["xaxis"]["categories"], json!(["A", "B"]));
            assert!(value["options"].get("labels").is_none());
        }
    }

    #[test]
    fn treemap_pads_missing_values_with_zero() {
        let data = GraphData::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![DataValue::Number(4.into())],
        );
        let spec = build_chart_spec(&data, ChartKind::Treemap, "T", &ChartTheme::default());
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            value["series"],
            json!([{"name": "T", "data": [
                {"x": "a", "y": 4},
                {"x": "b", "y": 0},
                {"x": "c", "y": 0}
            ]}])
        );
    }

    #[test]
    fn raw_kinds_keep_points() {
        let point = json!({"x": "d1", "y": [6593.34, 6600.0, 6582.63, 6600.0]});
        let data = GraphData::new(Vec::new(), vec![DataValue::Point(point.clone())]);
        for kind in [ChartKind::Candlestick, ChartKind::Bubble] {
            let spec = build_chart_spec(&data, kind, "Prices", &ChartTheme::default());
            let value = serde_json::to_value(&spec).unwrap();
            assert_eq!(value["series"], json!([{"name": "Prices", "data": [point.clone()]}]));
            assert!(value["options"].get("xaxis").is_none());
        }
    }

    #[test]
    fn baseline_options_are_shared() {
        let theme = ChartTheme::default();
        for kind in ChartKind::ALL {
            let spec = build_chart_spec(&GraphData::default(), kind, "Empty", &theme);
            assert_eq!(spec.options.chart.kind, kind.renderer_type());
            assert_eq!(spec.options.title.text, "Empty");
            assert_eq!(spec.options.colors.len(), 6);
            assert_eq!(spec.options.responsive.len(), 1);
            assert_eq!(spec.options.responsive[0].breakpoint, 480);
            assert_eq!(spec.options.responsive[0].options.legend.position, "bottom");
        }
        assert_eq!(ChartKind::RadialBar.renderer_type(), "radialBar");
        assert_eq!(ChartKind::Boxplot.renderer_type(), "boxPlot");
    }

    #[test]
    fn section_chart_only_for_graphs() {
        let theme = ChartTheme::default();
        let graph = Section {
            id: "g".to_string(),
            shortcode: "g1".to_string(),
            title: "Growth".to_string(),
            body: SectionBody::Graph {
                data: sample(),
                graph_type: ChartKind::Donut,
            },
        };
        let spec = build_section_chart(&graph, &theme).unwrap();
        assert_eq!(spec.options.title.text, "Growth");
        assert_eq!(spec.options.chart.kind, "donut");

        let text = Section {
            body: SectionBody::Text {
                content: "hi".to_string(),
            },
            ..graph
        };
        assert!(build_section_chart(&text, &theme).is_none());
    }
}
