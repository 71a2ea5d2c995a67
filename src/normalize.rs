//! Turns a generated-content payload into [`Sections`].
//!
//! Two payload shapes are accepted. The current one is a flat `sections` array whose
//! records carry a `section_type` tag. The legacy one splits records across
//! `text_sections`, `graph_sections` and `table_sections`, and the kind comes from the
//! array a record sits in. Both end up in the same shortcode-keyed collection.

use crate::error::{Error, Result};
use crate::ir::{CellValue, ChartKind, DataValue, GraphData, Section, SectionBody, Sections};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

static FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```[A-Za-z0-9_-]*[ \t]*\r?\n(.*?)\r?\n?```$").unwrap());

const LEGACY_GROUPS: [(&str, LegacyKind); 3] = [
    ("text_sections", LegacyKind::Text),
    ("graph_sections", LegacyKind::Graph),
    ("table_sections", LegacyKind::Table),
];

#[derive(Debug, Clone, Copy)]
enum LegacyKind {
    Text,
    Graph,
    Table,
}

/// Normalizes raw payload text. Anything that is not a JSON (or JSON5) object,
/// optionally wrapped in a Markdown code fence, yields an empty collection.
pub fn normalize_payload(input: &str) -> Sections {
    let Some(document) = parse_document(input) else {
        warn!(
            bytes = input.len(),
            "content payload is not parseable; rendering without sections"
        );
        return Sections::new();
    };
    match normalize_value(&document) {
        Ok(sections) => sections,
        Err(err) => {
            warn!(%err, "content payload rejected; rendering without sections");
            Sections::new()
        }
    }
}

/// Normalizes an already-parsed payload. A non-object document is a caller bug.
pub fn normalize_value(document: &Value) -> Result<Sections> {
    let Some(object) = document.as_object() else {
        return Err(Error::PayloadNotObject {
            found: json_type_name(document),
        });
    };

    let mut sections = Sections::new();
    if let Some(records) = object.get("sections").and_then(Value::as_array) {
        for record in records {
            if let Some(section) = section_from_record(record) {
                keep_first(&mut sections, section);
            }
        }
    } else {
        for (key, kind) in LEGACY_GROUPS {
            let Some(records) = object.get(key).and_then(Value::as_array) else {
                continue;
            };
            for record in records {
                if let Some(section) = legacy_section(record, kind) {
                    keep_first(&mut sections, section);
                }
            }
        }
    }

    debug!(count = sections.len(), "normalized content payload");
    Ok(sections)
}

fn parse_document(input: &str) -> Option<Value> {
    let trimmed = input.trim();
    let body = FENCE_RE
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(trimmed);
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return Some(value);
    }
    json5::from_str::<Value>(body).ok()
}

fn keep_first(sections: &mut Sections, section: Section) {
    let shortcode = section.shortcode.clone();
    if !sections.push(section) {
        debug!(%shortcode, "dropping duplicate section shortcode");
    }
}

fn section_from_record(record: &Value) -> Option<Section> {
    let fields = record.as_object()?;
    let body = match fields.get("section_type") {
        None | Some(Value::Null) => text_body(fields),
        Some(tag) => {
            let tag = value_to_text(tag);
            match tag.trim().to_ascii_lowercase().as_str() {
                "text" => text_body(fields),
                "graph" => graph_body(fields),
                "table" => table_body(fields),
                _ => SectionBody::Unknown { tag },
            }
        }
    };
    build_section(fields, body)
}

fn legacy_section(record: &Value, kind: LegacyKind) -> Option<Section> {
    let fields = record.as_object()?;
    let body = match kind {
        LegacyKind::Text => text_body(fields),
        LegacyKind::Graph => graph_body(fields),
        LegacyKind::Table => table_body(fields),
    };
    build_section(fields, body)
}

fn build_section(fields: &Map<String, Value>, body: SectionBody) -> Option<Section> {
    let shortcode = fields
        .get("shortcode")
        .map(value_to_text)
        .map(|code| code.trim().to_string())
        .unwrap_or_default();
    if shortcode.is_empty() {
        debug!("skipping section record without a shortcode");
        return None;
    }
    let id = fields
        .get("id")
        .filter(|value| !value.is_null())
        .map(value_to_text)
        .unwrap_or_else(|| shortcode.clone());
    let title = fields.get("title").map(value_to_text).unwrap_or_default();
    Some(Section {
        id,
        shortcode,
        title,
        body,
    })
}

fn text_body(fields: &Map<String, Value>) -> SectionBody {
    SectionBody::Text {
        content: fields.get("content").map(value_to_text).unwrap_or_default(),
    }
}

/// Reads a graph `data` object. `labels` and `values` are tolerated
/// independently: either one missing or not an array becomes empty.
pub fn graph_data(data: Option<&Value>) -> GraphData {
    let labels = array_field(data, "labels")
        .iter()
        .map(value_to_text)
        .collect();
    let values = array_field(data, "values")
        .iter()
        .map(DataValue::from_json)
        .collect();
    GraphData::new(labels, values)
}

fn graph_body(fields: &Map<String, Value>) -> SectionBody {
    let graph_type = ["type", "graphType", "graph_type"]
        .iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_str))
        .map(ChartKind::parse)
        .unwrap_or_default();
    SectionBody::Graph {
        data: graph_data(fields.get("data")),
        graph_type,
    }
}

fn table_body(fields: &Map<String, Value>) -> SectionBody {
    let headers = fields
        .get("headers")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(value_to_text).collect())
        .unwrap_or_default();
    let rows = fields
        .get("rows")
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .map(|row| match row.as_array() {
                    Some(cells) => cells.iter().map(CellValue::from_json).collect(),
                    None => vec![CellValue::from_json(row)],
                })
                .collect()
        })
        .unwrap_or_default();
    SectionBody::Table { headers, rows }
}

fn array_field<'a>(parent: Option<&'a Value>, key: &str) -> &'a [Value] {
    parent
        .and_then(|value| value.get(key))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
