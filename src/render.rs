use crate::chart::build_chart_spec;
use crate::config::Config;
use crate::ir::{CellValue, RenderCell, RenderPlan, RenderRow, Section, SectionBody};
use crate::theme::ChartTheme;
use anyhow::Result;
use std::path::Path;

/// Standalone HTML preview of a plan.
pub fn render_html(plan: &RenderPlan, config: &Config) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>{}</title>\n</head>\n<body>\n",
        escape_html(&config.html.title)
    ));
    html.push_str(&render_fragment(plan, &config.chart));
    html.push_str("</body>\n</html>\n");
    html
}

/// The plan body only: one grid `div` per row, one element per cell.
pub fn render_fragment(plan: &RenderPlan, theme: &ChartTheme) -> String {
    let mut html = String::from("<main class=\"report\">\n");
    for row in &plan.rows {
        html.push_str(&row_html(row, theme));
    }
    html.push_str("</main>\n");
    html
}

fn row_html(row: &RenderRow, theme: &ChartTheme) -> String {
    let mut html = format!("<div class=\"report-row grid {}\">\n", row.columns.css_class());
    for cell in &row.cells {
        html.push_str(&cell_html(cell, theme));
    }
    html.push_str("</div>\n");
    html
}

fn cell_html(cell: &RenderCell, theme: &ChartTheme) -> String {
    let shortcode = escape_html(cell.shortcode());
    match (cell, cell.placeholder()) {
        (RenderCell::Resolved(section), _) => section_html(section, &shortcode, theme),
        (_, Some(placeholder)) => format!(
            "<div class=\"report-cell report-placeholder report-{}\" data-shortcode=\"{shortcode}\">{}</div>\n",
            cell.variant(),
            escape_html(&placeholder)
        ),
        (_, None) => String::new(),
    }
}

fn section_html(section: &Section, shortcode: &str, theme: &ChartTheme) -> String {
    let (class, body) = match &section.body {
        SectionBody::Text { content } => ("report-text", text_html(content)),
        SectionBody::Graph { data, graph_type } => {
            let spec = build_chart_spec(data, *graph_type, &section.title, theme);
            let json = serde_json::to_string(&spec).unwrap_or_default();
            (
                "report-graph",
                format!(
                    "<div class=\"report-chart\" data-chart-type=\"{}\" data-chart=\"{}\"></div>\n",
                    graph_type,
                    escape_html(&json)
                ),
            )
        }
        SectionBody::Table { headers, rows } => ("report-table", table_html(headers, rows)),
        SectionBody::Unknown { .. } => return String::new(),
    };

    let mut html = format!(
        "<section class=\"report-cell {class}\" data-shortcode=\"{shortcode}\">\n"
    );
    if !section.title.is_empty() {
        html.push_str(&format!("<h2>{}</h2>\n", escape_html(&section.title)));
    }
    html.push_str(&body);
    html.push_str("</section>\n");
    html
}

fn text_html(content: &str) -> String {
    let mut html = String::new();
    for paragraph in content.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }
        let lines: Vec<String> = paragraph.lines().map(escape_html).collect();
        html.push_str(&format!("<p>{}</p>\n", lines.join("<br>")));
    }
    html
}

fn table_html(headers: &[String], rows: &[Vec<CellValue>]) -> String {
    let mut html = String::from("<table>\n");
    if !headers.is_empty() {
        html.push_str("<thead><tr>");
        for header in headers {
            html.push_str(&format!("<th>{}</th>", escape_html(header)));
        }
        html.push_str("</tr></thead>\n");
    }
    html.push_str("<tbody>\n");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape_html(&cell.to_string())));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

pub fn write_output_html(html: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, html)?;
        }
        None => {
            print!("{}", html);
        }
    }
    Ok(())
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
