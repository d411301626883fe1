use serde_json::{Map, Value};
use std::io::{self, Write};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    write_csv(stdout.lock(), value);
}

/// Scalars become `field,value` rows keyed by their dotted path. Each array of
/// records follows as its own block: a `[name]` marker row, a header row,
/// then one row per record.
fn write_csv<W: Write>(out: W, value: &Value) {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(out);

    match value {
        Value::Object(map) => {
            let body = match map.get("result") {
                Some(Value::Object(result)) => result,
                Some(Value::Array(rows)) => {
                    write_array_csv(&mut wtr, rows);
                    let _ = wtr.flush();
                    return;
                }
                _ => map,
            };

            let mut fields = Vec::new();
            let mut tables = Vec::new();
            flatten("", body, &mut fields, &mut tables);

            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in &fields {
                let _ = wtr.write_record([key.as_str(), val.as_str()]);
            }
            for (name, rows) in tables {
                let _ = wtr.write_record([format!("[{}]", name)]);
                write_array_csv(&mut wtr, rows);
            }
        }
        Value::Array(arr) => {
            write_array_csv(&mut wtr, arr);
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn flatten<'a>(
    prefix: &str,
    map: &'a Map<String, Value>,
    fields: &mut Vec<(String, String)>,
    tables: &mut Vec<(String, &'a [Value])>,
) {
    for (key, val) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match val {
            Value::Object(inner) if inner.len() > 1 => flatten(&path, inner, fields, tables),
            Value::Array(rows) if rows.first().map_or(false, Value::is_object) => {
                tables.push((path, rows.as_slice()));
            }
            _ => fields.push((path, format_csv_value(val))),
        }
    }
}

fn write_array_csv<W: Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        // Single-tag variants such as {"Recovered": {"month": 14}}
        Value::Object(map) if map.len() == 1 => map
            .iter()
            .map(|(tag, inner)| match inner {
                Value::Object(f) if f.len() == 1 => f
                    .values()
                    .map(|v| format!("{}:{}", tag, format_csv_value(v)))
                    .collect::<String>(),
                other => format!("{}:{}", tag, format_csv_value(other)),
            })
            .collect(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
