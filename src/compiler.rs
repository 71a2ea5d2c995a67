use crate::ir::{
    LayoutRow, RenderCell, RenderPlan, RenderRow, SectionKind, Sections, UNKNOWN_KIND_REASON,
};
use crate::normalize::normalize_payload;
use crate::parser::parse_template;
use tracing::debug;

/// Joins layout rows with sections. Every token yields exactly one cell and the
/// plan mirrors the row and column structure of the layout.
pub fn compile_plan(rows: &[LayoutRow], sections: &Sections) -> RenderPlan {
    let rows: Vec<RenderRow> = rows
        .iter()
        .map(|row| RenderRow {
            columns: row.columns(),
            cells: row
                .tokens()
                .iter()
                .map(|token| resolve_cell(token, sections))
                .collect(),
        })
        .collect();
    let plan = RenderPlan { rows };

    let summary = plan.summary();
    debug!(
        rows = plan.rows.len(),
        resolved = summary.resolved,
        missing = summary.missing,
        unresolved = summary.unresolved,
        "compiled render plan"
    );
    plan
}

/// Parse, normalize and compile in one pass.
pub fn compile_report(template: &str, payload: &str) -> RenderPlan {
    let rows = parse_template(template);
    let sections = normalize_payload(payload);
    compile_plan(&rows, &sections)
}

fn resolve_cell(shortcode: &str, sections: &Sections) -> RenderCell {
    match sections.get(shortcode) {
        Some(section) if section.kind() == SectionKind::Unknown => RenderCell::Unresolved {
            shortcode: shortcode.to_string(),
            reason: UNKNOWN_KIND_REASON.to_string(),
        },
        Some(section) => RenderCell::Resolved(section.clone()),
        None => RenderCell::Missing {
            shortcode: shortcode.to_string(),
        },
    }
}
