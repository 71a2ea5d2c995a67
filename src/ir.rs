use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Reason attached to cells whose section carries a type tag we cannot render.
pub const UNKNOWN_KIND_REASON: &str = "unknown kind";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Area,
    Pie,
    Donut,
    Scatter,
    Radar,
    RadialBar,
    Heatmap,
    Treemap,
    Boxplot,
    Candlestick,
    Bubble,
}

impl ChartKind {
    pub const ALL: [ChartKind; 13] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Area,
        ChartKind::Pie,
        ChartKind::Donut,
        ChartKind::Scatter,
        ChartKind::Radar,
        ChartKind::RadialBar,
        ChartKind::Heatmap,
        ChartKind::Treemap,
        ChartKind::Boxplot,
        ChartKind::Candlestick,
        ChartKind::Bubble,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        let lower = token.trim().to_ascii_lowercase();
        let kind = match lower.as_str() {
            "bar" => Self::Bar,
            "line" => Self::Line,
            "area" => Self::Area,
            "pie" => Self::Pie,
            "donut" => Self::Donut,
            "scatter" => Self::Scatter,
            "radar" => Self::Radar,
            "radialbar" => Self::RadialBar,
            "heatmap" => Self::Heatmap,
            "treemap" => Self::Treemap,
            "boxplot" => Self::Boxplot,
            "candlestick" => Self::Candlestick,
            "bubble" => Self::Bubble,
            _ => return None,
        };
        Some(kind)
    }

    /// Total parse: anything unrecognized renders as a bar chart.
    pub fn parse(token: &str) -> Self {
        Self::from_token(token).unwrap_or(Self::Bar)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Area => "area",
            Self::Pie => "pie",
            Self::Donut => "donut",
            Self::Scatter => "scatter",
            Self::Radar => "radar",
            Self::RadialBar => "radialbar",
            Self::Heatmap => "heatmap",
            Self::Treemap => "treemap",
            Self::Boxplot => "boxplot",
            Self::Candlestick => "candlestick",
            Self::Bubble => "bubble",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a graph's `values` array. Scalar charts hold numbers, kept in
/// their payload form (`3` stays `3`); candlestick and bubble payloads already
/// carry their points, which are kept untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataValue {
    Number(serde_json::Number),
    Point(serde_json::Value),
}

impl DataValue {
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(number) => Self::Number(number.clone()),
            other => Self::Point(other.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphData {
    pub labels: Vec<String>,
    pub values: Vec<DataValue>,
}

impl GraphData {
    pub fn new(labels: Vec<String>, values: Vec<DataValue>) -> Self {
        Self { labels, values }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Empty,
}

impl CellValue {
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Empty,
            serde_json::Value::Bool(flag) => Self::Bool(*flag),
            serde_json::Value::Number(number) => Self::Number(number.clone()),
            serde_json::Value::String(text) => Self::Text(text.clone()),
            other => Self::Text(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Empty => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Text,
    Graph,
    Table,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "section_type", rename_all = "lowercase")]
pub enum SectionBody {
    Text {
        content: String,
    },
    Graph {
        data: GraphData,
        #[serde(rename = "type")]
        graph_type: ChartKind,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    },
    Unknown {
        tag: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub id: String,
    pub shortcode: String,
    pub title: String,
    #[serde(flatten)]
    pub body: SectionBody,
}

impl Section {
    pub fn kind(&self) -> SectionKind {
        match self.body {
            SectionBody::Text { .. } => SectionKind::Text,
            SectionBody::Graph { .. } => SectionKind::Graph,
            SectionBody::Table { .. } => SectionKind::Table,
            SectionBody::Unknown { .. } => SectionKind::Unknown,
        }
    }
}

/// Normalized sections in payload order, unique by shortcode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sections {
    by_shortcode: IndexMap<String, Arc<Section>>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts unless the shortcode is already taken. Returns whether the section was kept.
    pub fn push(&mut self, section: Section) -> bool {
        if self.by_shortcode.contains_key(&section.shortcode) {
            return false;
        }
        self.by_shortcode
            .insert(section.shortcode.clone(), Arc::new(section));
        true
    }

    pub fn get(&self, shortcode: &str) -> Option<&Arc<Section>> {
        self.by_shortcode.get(shortcode)
    }

    pub fn len(&self) -> usize {
        self.by_shortcode.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_shortcode.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.by_shortcode.values().map(|section| section.as_ref())
    }

    pub fn shortcodes(&self) -> impl Iterator<Item = &str> {
        self.by_shortcode.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridColumns {
    One,
    Two,
    Three,
    Four,
}

impl GridColumns {
    /// Rows wider than four columns collapse to a single column.
    pub fn from_count(count: usize) -> Self {
        match count {
            2 => Self::Two,
            3 => Self::Three,
            4 => Self::Four,
            _ => Self::One,
        }
    }

    pub fn count(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::One => "grid-cols-1",
            Self::Two => "grid-cols-2",
            Self::Three => "grid-cols-3",
            Self::Four => "grid-cols-4",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRow {
    tokens: Vec<String>,
}

impl LayoutRow {
    pub(crate) fn new(tokens: Vec<String>) -> Self {
        debug_assert!(!tokens.is_empty());
        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_multi_column(&self) -> bool {
        self.tokens.len() > 1
    }

    pub fn columns(&self) -> GridColumns {
        GridColumns::from_count(self.tokens.len())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCell {
    Resolved(Arc<Section>),
    Missing { shortcode: String },
    Unresolved { shortcode: String, reason: String },
}

impl RenderCell {
    pub fn shortcode(&self) -> &str {
        match self {
            Self::Resolved(section) => &section.shortcode,
            Self::Missing { shortcode } | Self::Unresolved { shortcode, .. } => shortcode,
        }
    }

    pub fn variant(&self) -> &'static str {
        match self {
            Self::Resolved(_) => "resolved",
            Self::Missing { .. } => "missing",
            Self::Unresolved { .. } => "unresolved",
        }
    }

    pub fn section(&self) -> Option<&Section> {
        match self {
            Self::Resolved(section) => Some(section),
            _ => None,
        }
    }

    /// Literal text shown in place of a cell that has nothing to render.
    pub fn placeholder(&self) -> Option<String> {
        match self {
            Self::Resolved(_) => None,
            Self::Missing { shortcode } => Some(format!("[Missing: {shortcode}]")),
            Self::Unresolved { shortcode, .. } => Some(format!("[Unknown type: {shortcode}]")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderRow {
    pub columns: GridColumns,
    pub cells: Vec<RenderCell>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub resolved: usize,
    pub missing: usize,
    pub unresolved: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderPlan {
    pub rows: Vec<RenderRow>,
}

impl RenderPlan {
    pub fn cells(&self) -> impl Iterator<Item = &RenderCell> {
        self.rows.iter().flat_map(|row| row.cells.iter())
    }

    pub fn summary(&self) -> PlanSummary {
        let mut summary = PlanSummary::default();
        for cell in self.cells() {
            match cell {
                RenderCell::Resolved(_) => summary.resolved += 1,
                RenderCell::Missing { .. } => summary.missing += 1,
                RenderCell::Unresolved { .. } => summary.unresolved += 1,
            }
        }
        summary
    }
}
