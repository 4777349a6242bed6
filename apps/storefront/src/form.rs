//! Builds products from `key=value` form fields.

use anyhow::{anyhow, bail, Context, Result};
use serde_json::{Map, Value};
use shared::domain::Product;

pub type Field = (String, Value);

/// Parses `key=value`. Values that read as JSON (numbers, booleans, quoted
/// strings, arrays) keep their type; anything else is a plain string.
pub fn parse_field(raw: &str) -> Result<Field> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key=value, got {raw:?}"))?;
    let key = key.trim();
    if key.is_empty() {
        bail!("field name missing in {raw:?}");
    }
    if matches!(key, "_id" | "id") {
        bail!("product ids are assigned by the server");
    }

    let value = value.trim();
    let value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

pub fn parse_fields<'a>(raw: impl IntoIterator<Item = &'a str>) -> Result<Vec<Field>> {
    raw.into_iter().map(parse_field).collect()
}

/// A blank-form product; `quantity` must be among the fields.
pub fn new_product(fields: Vec<Field>) -> Result<Product> {
    product_from_map(fields.into_iter().collect())
}

/// The edit form starts out filled with the original product, minus its id.
pub fn edited_product(original: &Product, fields: Vec<Field>) -> Result<Product> {
    let mut map = match serde_json::to_value(original).context("failed to encode product")? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    map.remove("_id");
    map.extend(fields);
    product_from_map(map)
}

fn product_from_map(map: Map<String, Value>) -> Result<Product> {
    serde_json::from_value(Value::Object(map)).context("invalid product form")
}
