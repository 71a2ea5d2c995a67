use std::path::Path;

use report_plan::{
    ChartKind, ChartTheme, DataValue, GraphData, PlanDump, RenderCell, RenderPlan, SectionBody, SectionKind,
    build_chart_spec_for_tag, compile_report, normalize_payload, parse_template,
};
use serde_json::{Value, json};

fn fixture_root() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn read_fixture(name: &str) -> (String, String) {
    let dir = fixture_root().join(name);
    assert!(dir.exists(), "fixture missing: {name}");
    let template = std::fs::read_to_string(dir.join("template.txt")).expect("template read failed");
    let payload = std::fs::read_to_string(dir.join("payload.json")).expect("payload read failed");
    (template, payload)
}

fn compile_fixture(name: &str) -> RenderPlan {
    let (template, payload) = read_fixture(name);
    compile_report(&template, &payload)
}

fn dump(plan: &RenderPlan) -> Value {
    serde_json::to_value(PlanDump::from_plan(plan, &ChartTheme::default())).expect("dump failed")
}

fn structure(plan: &RenderPlan) -> Vec<Vec<(&'static str, String)>> {
    plan.rows
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|cell| (cell.variant(), cell.shortcode().to_string()))
                .collect()
        })
        .collect()
}

#[test]
fn plan_mirrors_template_for_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = ["end_to_end", "legacy", "fenced", "malformed", "chart_kinds"];

    for name in candidates {
        let (template, payload) = read_fixture(name);
        let rows = parse_template(&template);
        let plan = compile_report(&template, &payload);
        assert_eq!(plan.rows.len(), rows.len(), "{name}: row count");
        for (row, layout) in plan.rows.iter().zip(&rows) {
            let shortcodes: Vec<&str> = row.cells.iter().map(RenderCell::shortcode).collect();
            let tokens: Vec<&str> = layout.tokens().iter().map(String::as_str).collect();
            assert_eq!(shortcodes, tokens, "{name}: cell order");
            assert_eq!(row.columns, layout.columns(), "{name}: grid columns");
        }
        assert_eq!(plan, compile_report(&template, &payload), "{name}: idempotence");
    }
}

#[test]
fn end_to_end_scenario() {
    let plan = compile_fixture("end_to_end");
    assert_eq!(
        structure(&plan),
        vec![
            vec![("resolved", "intro".to_string())],
            vec![("resolved", "g1".to_string()), ("missing", "t1".to_string())],
        ]
    );
    let intro = plan.rows[0].cells[0].section().expect("intro resolved");
    assert_eq!(
        intro.body,
        SectionBody::Text {
            content: "Hello".to_string()
        }
    );
    let graph = plan.rows[1].cells[0].section().expect("g1 resolved");
    assert_eq!(graph.kind(), SectionKind::Graph);
    assert_eq!(
        plan.rows[1].cells[1].placeholder().as_deref(),
        Some("[Missing: t1]")
    );
}

#[test]
fn legacy_fixture_normalizes_in_group_order() {
    let (_, payload) = read_fixture("legacy");
    let sections = normalize_payload(&payload);
    assert_eq!(
        sections.shortcodes().collect::<Vec<_>>(),
        vec!["intro", "analisi", "aree_forza", "grafico1", "grafico2", "tabella1"]
    );
    assert_eq!(sections.get("intro").expect("intro").title, "Introduzione");

    let plan = compile_fixture("legacy");
    assert_eq!(plan.rows.len(), 3);
    assert_eq!(plan.summary().resolved, 6);
    let value = dump(&plan);
    assert_eq!(value["rows"][2]["columns"], 3);
    assert_eq!(value["rows"][2]["cells"][1]["chart"]["options"]["chart"]["type"], "donut");
    assert_eq!(value["rows"][2]["cells"][1]["chart"]["series"], json!([70, 30]));
    assert_eq!(
        value["rows"][2]["cells"][2]["section"]["rows"],
        json!([["Focus", 8], ["Energia", 6.5]])
    );
}

#[test]
fn fenced_json5_payload_is_unwrapped() {
    let plan = compile_fixture("fenced");
    assert_eq!(
        structure(&plan),
        vec![vec![
            ("resolved", "summary".to_string()),
            ("resolved", "chart".to_string())
        ]]
    );
}

#[test]
fn malformed_payload_renders_missing_cells() {
    let (_, payload) = read_fixture("malformed");
    assert!(normalize_payload(&payload).is_empty());
    let plan = compile_fixture("malformed");
    let summary = plan.summary();
    assert_eq!(summary.missing, 3);
    assert_eq!(summary.resolved, 0);
    let placeholders: Vec<String> = plan.cells().filter_map(RenderCell::placeholder).collect();
    assert_eq!(
        placeholders,
        vec!["[Missing: intro]", "[Missing: g1]", "[Missing: t1]"]
    );
}

#[test]
fn chart_kinds_fixture_builds_every_kind() {
    let plan = compile_fixture("chart_kinds");
    let value = dump(&plan);
    let mut types = Vec::new();
    for row in value["rows"].as_array().expect("rows") {
        for cell in row["cells"].as_array().expect("cells") {
            assert_eq!(cell["variant"], "resolved");
            types.push(
                cell["chart"]["options"]["chart"]["type"]
                    .as_str()
                    .expect("chart type")
                    .to_string(),
            );
        }
    }
    assert_eq!(
        types,
        vec![
            "bar",
            "line",
            "area",
            "pie",
            "donut",
            "scatter",
            "radar",
            "radialBar",
            "heatmap",
            "treemap",
            "boxPlot",
            "candlestick",
            "bubble",
            "bar",
        ]
    );

    let sparkline = plan.rows[3].cells[2].section().expect("sparkline");
    assert!(matches!(
        sparkline.body,
        SectionBody::Graph {
            graph_type: ChartKind::Bar,
            ..
        }
    ));
}

#[test]
fn chart_builder_contract_examples() {
    let data = GraphData::new(
        vec!["A".to_string(), "B".to_string()],
        vec![DataValue::Number(1.into()), DataValue::Number(2.into())],
    );
    let theme = ChartTheme::default();
    let pie = serde_json::to_value(build_chart_spec_for_tag(&data, "pie", "Title", &theme))
        .expect("pie spec");
    assert_eq!(pie["series"], json!([1, 2]));
    assert_eq!(pie["options"]["labels"], json!(["A", "B"]));

    let fallback = build_chart_spec_for_tag(&data, "unknown-kind", "Title", &theme);
    let bar = build_chart_spec_for_tag(&data, "bar", "Title", &theme);
    assert_eq!(fallback, bar);
}

#[test]
fn parser_contract_examples() {
    let rows = parse_template("[a]\n[b] | [c]");
    let tokens: Vec<Vec<&str>> = rows
        .iter()
        .map(|row| row.tokens().iter().map(String::as_str).collect())
        .collect();
    assert_eq!(tokens, vec![vec!["a"], vec!["b", "c"]]);
    assert!(parse_template("   \n\n\t").is_empty());
}
