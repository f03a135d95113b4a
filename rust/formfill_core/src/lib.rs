// SPDX-License-Identifier: AGPL-3.0-or-later WITH Palimpsest

//! Fill the interactive form (AcroForm) of a PDF template.
//!
//! A [`Template`] is parsed once and exposes a [`FieldCatalog`] of its text
//! and button fields. Each fill deep-copies the template, writes the supplied
//! values (text `/V`, button `/V` plus every widget's `/AS`), flags the form so
//! viewers regenerate text appearances, and serializes the copy.
//!
//! ```no_run
//! use formfill_core::{fill, FieldValues};
//!
//! let template = std::fs::read("intake.pdf")?;
//! let values = FieldValues::from([
//!     ("pt-firstname".to_string(), "Jane".to_string()),
//!     ("sex".to_string(), "2".to_string()),
//! ]);
//! let filled = fill(&template, &values)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The same operations are exported to JavaScript as `list_fields` and
//! `fill_form`.

mod button;
mod catalog;
mod clone;
mod error;
mod fill;
mod object;
mod options;
mod template;
mod text;
mod writer;

use wasm_bindgen::prelude::*;

pub use catalog::{ButtonStyle, Field, FieldCatalog, FieldKind, Widget, OFF_STATE};
pub use clone::{clone_graph, ClonedGraph};
pub use error::FillError;
pub use fill::FieldValues;
pub use object::Rect;
pub use options::FillOptions;
pub use template::Template;
#[cfg(not(target_arch = "wasm32"))]
pub use writer::write_file;
pub use writer::write_document;

/// Fill `template_bytes` with `field_values` using default options.
pub fn fill(template_bytes: &[u8], field_values: &FieldValues) -> Result<Vec<u8>, FillError> {
    Template::load(template_bytes)?.fill(field_values, &FillOptions::default())
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Field catalog of a template, as an array of plain objects.
#[wasm_bindgen]
pub fn list_fields(pdf_data: &[u8]) -> Result<JsValue, JsValue> {
    let template = Template::load(pdf_data).map_err(js_error)?;
    serde_wasm_bindgen::to_value(template.catalog())
        .map_err(|err| JsValue::from_str(&format!("serialization error: {err}")))
}

/// Fill a template from a `{ name: value }` object. `options` may be
/// `undefined` or `null` for the defaults.
#[wasm_bindgen]
pub fn fill_form(
    pdf_data: &[u8],
    fields: JsValue,
    options: JsValue,
) -> Result<js_sys::Uint8Array, JsValue> {
    let values: FieldValues = serde_wasm_bindgen::from_value(fields)
        .map_err(|err| JsValue::from_str(&format!("invalid field values: {err}")))?;
    let options: FillOptions = if options.is_undefined() || options.is_null() {
        FillOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|err| JsValue::from_str(&format!("invalid options: {err}")))?
    };

    let filled = Template::load(pdf_data)
        .and_then(|template| template.fill(&values, &options))
        .map_err(js_error)?;
    Ok(js_sys::Uint8Array::from(filled.as_slice()))
}
