//! Tabular projection of report payloads
//!
//! Report endpoints return either a single object or an array of objects.
//! [`ReportTable`] turns both into headers + string cells; headers come from
//! the keys of the first row.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

impl ReportTable {
    /// Build a table from a report's `data` value
    pub fn from_value(data: &Value) -> Self {
        let rows: Vec<&Value> = match data {
            Value::Array(items) => items.iter().collect(),
            Value::Null => Vec::new(),
            other => vec![other],
        };

        let headers: Vec<String> = match rows.first() {
            Some(Value::Object(map)) => map.keys().cloned().collect(),
            Some(_) => vec!["value".to_string()],
            None => return Self::default(),
        };

        let rows = rows
            .into_iter()
            .map(|row| match row {
                Value::Object(map) => headers.iter().map(|h| cell(map.get(h))).collect(),
                scalar => vec![cell(Some(scalar))],
            })
            .collect();

        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as aligned plain-text columns
    pub fn render_text(&self) -> String {
        if self.is_empty() {
            return "No data available".to_string();
        }
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| c.chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, &w)| format!("{c:<w$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = vec![line(self.headers.as_slice())];
        out.extend(self.rows.iter().map(|r| line(r.as_slice())));
        out.join("\n")
    }
}
