// SPDX-License-Identifier: AGPL-3.0-or-later WITH Palimpsest

use std::path::Path;

use formfill_core::{write_file, FieldValues, FillOptions};
use serde_json::Value;
use tracing::debug;

use crate::shared::{open_template, read_file};

pub fn run(
    template: &Path,
    values: &Path,
    output: &Path,
    options: &FillOptions,
    force: bool,
) -> Result<(), i32> {
    let field_values = load_values(values)?;
    let template = open_template(template)?;

    let filled = template.fill(&field_values, options).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    write_file(&filled, output, force).map_err(|e| {
        eprintln!("Error: {}: {e}", output.display());
        1
    })?;
    debug!(path = %output.display(), bytes = filled.len(), "wrote filled form");
    Ok(())
}

fn load_values(path: &Path) -> Result<FieldValues, i32> {
    let bytes = read_file(path)?;
    let json: Value = serde_json::from_slice(&bytes).map_err(|e| {
        eprintln!("Error: {}: invalid JSON: {e}", path.display());
        1
    })?;
    values_from_json(json).map_err(|msg| {
        eprintln!("Error: {}: {msg}", path.display());
        1
    })
}

/// Flatten a JSON object into field values. Strings are taken as-is, numbers
/// and booleans are stringified, nulls are dropped.
fn values_from_json(json: Value) -> Result<FieldValues, String> {
    let Value::Object(entries) = json else {
        return Err("expected a JSON object of field values".to_string());
    };

    let mut values = FieldValues::new();
    for (name, value) in entries {
        let text = match value {
            Value::Null => continue,
            Value::String(text) => text,
            Value::Bool(flag) => flag.to_string(),
            Value::Number(number) => number.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(format!("value of {name:?} must be a string, number or boolean"));
            }
        };
        values.insert(name, text);
    }
    Ok(values)
}
