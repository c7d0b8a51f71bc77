use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Envelope keys holding row collections, printed after the result section.
const ROW_SECTIONS: [&str; 3] = ["evolution", "brackets", "results"];

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => print_envelope(map),
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_envelope(map: &Map<String, Value>) {
    for section in ["result", "summary"] {
        if let Some(Value::Object(fields)) = map.get(section) {
            print_fields(fields);
        }
    }

    for section in ROW_SECTIONS {
        if let Some(Value::Array(rows)) = map.get(section) {
            println!("\n{}:", section);
            print_array_table(rows);
        }
    }

    let known = |k: &str| k == "result" || k == "summary" || ROW_SECTIONS.contains(&k);
    if !map.keys().any(|k| known(k.as_str())) {
        print_fields(map);
    }
}

fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
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
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
