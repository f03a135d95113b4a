// SPDX-License-Identifier: AGPL-3.0-or-later WITH Palimpsest

//! Checkbox and radio group state.
//!
//! A button field keeps its selection in three places that must agree: the
//! field's `/V`, and the `/AS` of each widget, which picks one entry of the
//! widget's `/AP /N` dictionary. Widgets of one radio group usually carry
//! different "on" states, one per option.

use lopdf::Object;
use tracing::debug;

use crate::catalog::{Field, OFF_STATE};
use crate::clone::ClonedGraph;
use crate::error::FillError;

/// Show `state` on the field in the cloned graph.
///
/// Every widget with an `Off` appearance is reset to it first, then every
/// widget that has a `state` appearance shows it. A radio group normally has
/// one widget per state, so one widget ends up on. A checkbox repeated on
/// several widgets with the same "on" state is shown on all of them, so the
/// copies never disagree. `/V` on the field node is always set, even when no
/// widget can show the state. With `mirror_on_widgets`, separate kid widgets
/// get the same `/V`.
///
/// Names are written with the exact bytes of the widget's `/AP /N` key, so
/// states that are not UTF-8 still select their appearance.
///
/// The caller has already checked `state` against the field's valid states.
/// Returns how many widgets now display `state`.
pub(crate) fn fill_button(
    graph: &mut ClonedGraph,
    field: &Field,
    state: &str,
    mirror_on_widgets: bool,
) -> Result<usize, FillError> {
    let field_id = graph
        .translate(field.id)
        .ok_or(FillError::CorruptReference(field.id))?;
    let target = Object::Name(
        field
            .widgets
            .iter()
            .find_map(|widget| widget.state_name(state))
            .unwrap_or(state.as_bytes())
            .to_vec(),
    );

    let mut shown = 0;
    for widget in &field.widgets {
        let widget_id = graph
            .translate(widget.id)
            .ok_or(FillError::CorruptReference(widget.id))?;
        let dict = graph
            .document
            .get_dictionary_mut(widget_id)
            .map_err(|_| FillError::CorruptReference(widget.id))?;

        if widget.supports_off() {
            dict.set("AS", Object::Name(OFF_STATE.as_bytes().to_vec()));
        }
        if let Some(name) = widget.state_name(state) {
            dict.set("AS", Object::Name(name.to_vec()));
            shown += 1;
        }
        if mirror_on_widgets && widget_id != field_id {
            dict.set("V", target.clone());
        }
    }

    if shown == 0 {
        debug!(field = %field.name, state, "no widget has an appearance for this state");
    }

    graph
        .document
        .get_dictionary_mut(field_id)
        .map_err(|_| FillError::CorruptReference(field.id))?
        .set("V", target);
    Ok(shown)
}
