use serde_json::Value;

/// Fields worth printing on their own, most important first.
const PRIORITY_KEYS: [&str; 5] = ["ner", "npv", "base_rent_psf", "total_value", "payback"];

/// Print just the key answer value from the output.
///
/// Looks inside the `result` envelope (and its `summary` record when there is
/// one) for a priority field, falling back to the first field. Arrays print
/// one answer per line.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result_obj {
        Value::Array(items) => {
            for item in items {
                println!("{}", key_answer(item));
            }
        }
        other => println!("{}", key_answer(other)),
    }
}

fn key_answer(value: &Value) -> String {
    let record = value
        .as_object()
        .and_then(|m| m.get("summary"))
        .unwrap_or(value);

    if let Value::Object(map) = record {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return format_minimal(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    format_minimal(record)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
