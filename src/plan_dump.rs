use crate::chart::{ChartSpec, build_section_chart};
use crate::ir::{RenderCell, RenderPlan, Section};
use crate::theme::ChartTheme;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct PlanDump {
    pub rows: Vec<RowDump>,
}

#[derive(Debug, Serialize)]
pub struct RowDump {
    pub columns: usize,
    pub cells: Vec<CellDump>,
}

#[derive(Debug, Serialize)]
pub struct CellDump {
    pub variant: &'static str,
    pub shortcode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<Arc<Section>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartSpec>,
}

impl PlanDump {
    pub fn from_plan(plan: &RenderPlan, theme: &ChartTheme) -> Self {
        let rows = plan
            .rows
            .iter()
            .map(|row| RowDump {
                columns: row.columns.count(),
                cells: row
                    .cells
                    .iter()
                    .map(|cell| CellDump::from_cell(cell, theme))
                    .collect(),
            })
            .collect();
        PlanDump { rows }
    }
}

impl CellDump {
    fn from_cell(cell: &RenderCell, theme: &ChartTheme) -> Self {
        let (section, reason) = match cell {
            RenderCell::Resolved(section) => (Some(section.clone()), None),
            RenderCell::Missing { .. } => (None, None),
            RenderCell::Unresolved { reason, .. } => (None, Some(reason.clone())),
        };
        let chart = section
            .as_deref()
            .and_then(|section| build_section_chart(section, theme));
        CellDump {
            variant: cell.variant(),
            shortcode: cell.shortcode().to_string(),
            reason,
            placeholder: cell.placeholder(),
            section,
            chart,
        }
    }
}

pub fn plan_to_json(plan: &RenderPlan, theme: &ChartTheme) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&PlanDump::from_plan(plan, theme))
}

pub fn write_plan_dump(path: &Path, plan: &RenderPlan, theme: &ChartTheme) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = PlanDump::from_plan(plan, theme);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
