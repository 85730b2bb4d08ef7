//! Conversion of text-protocol cells into JSON values.
//!
//! Raw statements travel over the MySQL text protocol, so every cell arrives
//! as bytes plus a column type name. Numbers, timestamps and JSON documents
//! are re-typed; everything else is reported as a string.

use chrono::NaiveDateTime;
use serde_json::{Number, Value};

const MYSQL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const ISO_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const INTEGER_TYPES: [&str; 7] = [
    "BOOLEAN",
    "TINYINT",
    "SMALLINT",
    "MEDIUMINT",
    "INT",
    "BIGINT",
    "YEAR",
];
const FLOAT_TYPES: [&str; 3] = ["FLOAT", "DOUBLE", "DECIMAL"];

/// Convert one cell reported with column type `type_name`.
///
/// `None` is SQL `NULL`. Values that fail to parse as their declared type are
/// returned as strings rather than dropped.
pub(crate) fn text_cell_to_json(type_name: &str, raw: Option<&[u8]>) -> Value {
    let Some(bytes) = raw else {
        return Value::Null;
    };
    let text = String::from_utf8_lossy(bytes);
    let base = type_name.split_whitespace().next().unwrap_or_default();

    let typed = if INTEGER_TYPES.contains(&base) {
        integer(&text, type_name.ends_with("UNSIGNED"))
    } else if FLOAT_TYPES.contains(&base) {
        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
    } else {
        match base {
            "DATETIME" | "TIMESTAMP" => NaiveDateTime::parse_from_str(&text, MYSQL_DATETIME_FORMAT)
                .ok()
                .map(|dt| Value::String(dt.format(ISO_DATETIME_FORMAT).to_string())),
            "JSON" => serde_json::from_str(&text).ok(),
            _ => None,
        }
    };
    typed.unwrap_or_else(|| Value::String(text.into_owned()))
}

fn integer(text: &str, unsigned: bool) -> Option<Value> {
    if unsigned {
        text.parse::<u64>().ok().map(Value::from)
    } else {
        text.parse::<i64>().ok().map(Value::from)
    }
}
