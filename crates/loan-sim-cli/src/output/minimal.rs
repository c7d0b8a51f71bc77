use serde_json::Value;

/// Headline figure of each command, in priority order.
const HEADLINE_KEYS: [&str; 4] = ["periodic_payment", "final_value", "converted", "monthly_rate"];

/// Print just the headline figure.
///
/// Batches print one line per item; everything else prints the first
/// headline key found in the result, falling back to its first field.
pub fn print_minimal(value: &Value) {
    if let Some(Value::Array(rows)) = value.get("results") {
        for row in rows {
            let figure = row
                .get("periodic_payment")
                .filter(|v| !v.is_null())
                .or_else(|| row.get("message"))
                .map(format_minimal)
                .unwrap_or_default();
            println!("{}", figure);
        }
        return;
    }

    let result_obj = value.get("result").unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in HEADLINE_KEYS {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                println!("{}", format_minimal(val));
                return;
            }
        }

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
