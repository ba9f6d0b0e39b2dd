use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Looks through the result (and its summary) for well-known fields in
/// order of priority, then falls back to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result").or_else(|| m.get("results")))
        .unwrap_or(value);

    let priority_keys = [
        "final_total",
        "total",
        "sector_key",
        "icms_rate",
        "phase_name",
    ];

    let summary = result_obj.get("summary").filter(|s| !s.is_null());
    for candidate in [summary, Some(result_obj)].into_iter().flatten() {
        if let Value::Object(map) = candidate {
            for key in &priority_keys {
                if let Some(val) = map.get(*key) {
                    if !val.is_null() {
                        println!("{}", format_minimal(val));
                        return;
                    }
                }
            }
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
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
