use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
///
/// Scalars of the result go into a Field/Value table; every nested array
/// of objects (snapshots, alerts, timeline phases) gets its own table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_section(None, result);
            } else if let Some(Value::Array(results)) = map.get("results") {
                print_array_table(results);
            } else {
                print_section(None, value);
            }
            print_envelope_notes(map);
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_section(title: Option<&str>, value: &Value) {
    let Value::Object(map) = value else {
        println!("{}", format_value(value));
        return;
    };

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut scalars = 0;
    let mut nested: Vec<(String, &Value)> = Vec::new();
    for (key, val) in map {
        match val {
            Value::Object(_) => nested.push((qualified(title, key), val)),
            Value::Array(items) if items.iter().any(Value::is_object) => {
                nested.push((qualified(title, key), val))
            }
            _ => {
                builder.push_record([key.as_str(), &format_value(val)]);
                scalars += 1;
            }
        }
    }

    if let Some(t) = title {
        println!("\n{}:", t);
    }
    if scalars > 0 {
        println!("{}", Table::from(builder));
    }

    for (name, val) in nested {
        match val {
            Value::Array(items) => {
                println!("\n{}:", name);
                print_array_table(items);
            }
            _ => print_section(Some(&name), val),
        }
    }
}

fn qualified(parent: Option<&str>, key: &str) -> String {
    match parent {
        Some(p) => format!("{}.{}", p, key),
        None => key.to_string(),
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
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

        println!("{}", Table::from(builder));
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
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
