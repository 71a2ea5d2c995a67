use crate::ir::LayoutRow;

const COLUMN_SEPARATOR: &str = " | ";

/// Parses the layout DSL: one row per line, `" | "` between columns.
///
/// Never fails. Blank lines, bracket-only lines and empty tokens are dropped;
/// rows keep document order.
pub fn parse_template(input: &str) -> Vec<LayoutRow> {
    let mut rows = Vec::new();

    for raw_line in input.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if line.contains(COLUMN_SEPARATOR) {
            let tokens: Vec<String> = line
                .split(COLUMN_SEPARATOR)
                .map(|token| strip_brackets(token.trim()))
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect();
            if tokens.len() >= 2 {
                rows.push(LayoutRow::new(tokens));
                continue;
            }
        }

        let token = strip_brackets(line);
        if !token.is_empty() {
            rows.push(LayoutRow::new(vec![token.to_string()]));
        }
    }

    rows
}

/// Unique shortcodes referenced by the template, in first-use order.
pub fn referenced_shortcodes(rows: &[LayoutRow]) -> Vec<&str> {
    let mut seen = Vec::new();
    for token in rows.iter().flat_map(|row| row.tokens()) {
        if !seen.contains(&token.as_str()) {
            seen.push(token.as_str());
        }
    }
    seen
}

fn strip_brackets(token: &str) -> &str {
    let token = token.strip_prefix('[').unwrap_or(token);
    let token = token.strip_suffix(']').unwrap_or(token);
    token.trim()
}
