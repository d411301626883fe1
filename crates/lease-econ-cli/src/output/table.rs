use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(map);
            }
        }
        Value::Array(arr) => {
            print_array_table(arr);
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => {
            // Plain fields first, then one table per nested record or row set
            let fields: Map<String, Value> = res_map
                .iter()
                .filter(|(_, v)| !is_section(v))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            if !fields.is_empty() {
                print_flat_object(&fields);
            }

            for (key, val) in res_map.iter().filter(|(_, v)| is_section(v)) {
                println!("\n{}:", section_title(key));
                match val {
                    Value::Object(section) => print_flat_object(section),
                    Value::Array(rows) => print_array_table(rows),
                    _ => {}
                }
            }
        }
        Value::Array(rows) => print_array_table(rows),
        _ => print_flat_object(envelope),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Records with several fields and arrays of records get their own table.
fn is_section(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.len() > 1,
        Value::Array(arr) => arr.first().map_or(false, Value::is_object),
        _ => false,
    }
}

fn section_title(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

fn print_flat_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    let table = Table::from(builder);
    println!("{}", table);
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        let table = Table::from(builder);
        println!("{}", table);
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(map) => match map.iter().next() {
            // Tagged variants such as {"Recovered": {"month": 14}}
            Some((tag, Value::Object(fields))) if map.len() == 1 => {
                let parts: Vec<String> = fields
                    .iter()
                    .map(|(k, v)| format!("{} {}", k, format_value(v)))
                    .collect();
                format!("{} ({})", tag, parts.join(", "))
            }
            _ => serde_json::to_string(value).unwrap_or_default(),
        },
    }
}
