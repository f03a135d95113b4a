// SPDX-License-Identifier: AGPL-3.0-or-later WITH Palimpsest

//! Applying a name → value table to a copy of a template.

use std::collections::BTreeMap;

use lopdf::Document;
use tracing::{debug, trace};

use crate::button::fill_button;
use crate::catalog::FieldKind;
use crate::clone::clone_graph;
use crate::error::FillError;
use crate::options::FillOptions;
use crate::template::Template;
use crate::text::{fill_text, request_appearance_regeneration};

/// Field leaf name → value. Entries are applied in key order.
pub type FieldValues = BTreeMap<String, String>;

/// Clone the template's document and apply `values` to the clone.
///
/// Text values are stored exactly as given. Button values are trimmed; a
/// blank button value leaves the field at its template state, and so does a
/// value that none of the field's widgets can display. Names matching no
/// catalogued field are skipped. In strict mode the last two cases fail
/// instead.
pub(crate) fn apply(
    template: &Template,
    values: &FieldValues,
    options: &FillOptions,
) -> Result<Document, FillError> {
    let mut graph = clone_graph(template.document())?;
    if options.need_appearances {
        request_appearance_regeneration(&mut graph.document)?;
    }

    for (name, value) in values {
        let mut matched = false;

        for field in template.catalog().named(name) {
            matched = true;
            match &field.kind {
                FieldKind::Text => {
                    let field_id = graph
                        .translate(field.id)
                        .ok_or(FillError::CorruptReference(field.id))?;
                    fill_text(&mut graph.document, field_id, value)?;
                }
                FieldKind::Button { valid_states, .. } => {
                    let state = value.trim();
                    if state.is_empty() {
                        trace!(field = %name, "blank button value");
                        continue;
                    }
                    if !valid_states.contains(state) {
                        if options.strict {
                            return Err(FillError::InvalidState {
                                field: name.clone(),
                                value: state.to_string(),
                            });
                        }
                        debug!(field = %name, state, ?valid_states, "ignoring unknown button state");
                        continue;
                    }
                    fill_button(&mut graph, field, state, options.mirror_widget_values)?;
                }
            }
        }

        if !matched {
            if options.strict {
                return Err(FillError::UnknownField(name.clone()));
            }
            debug!(field = %name, "no such field in template");
        }
    }

    Ok(graph.document)
}
