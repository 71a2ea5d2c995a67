pub mod chart;
#[cfg(feature = "cli")]
pub mod cli;
pub mod compiler;
pub mod config;
pub mod error;
pub mod ir;
pub mod normalize;
pub mod parser;
pub mod plan_dump;
pub mod render;
pub mod theme;

pub use chart::{ChartSpec, build_chart_spec, build_chart_spec_for_tag, build_section_chart};
#[cfg(feature = "cli")]
pub use cli::{run, run_with};
pub use compiler::{compile_plan, compile_report};
pub use config::{Config, load_config};
pub use error::{Error, Result};
pub use ir::{
    ChartKind, DataValue, GraphData, LayoutRow, RenderCell, RenderPlan, RenderRow, Section, SectionBody,
    SectionKind, Sections,
};
pub use normalize::{graph_data, normalize_payload, normalize_value};
pub use parser::parse_template;
pub use plan_dump::{PlanDump, plan_to_json};
pub use render::render_html;
pub use theme::ChartTheme;
