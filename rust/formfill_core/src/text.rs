// SPDX-License-Identifier: AGPL-3.0-or-later WITH Palimpsest

//! Text field values and the appearance regeneration flag.

use lopdf::{Document, Object, ObjectId};

use crate::error::FillError;
use crate::object::encode_text_string;

/// Store `value` verbatim as the `/V` of the field node `field_id`.
pub(crate) fn fill_text(
    document: &mut Document,
    field_id: ObjectId,
    value: &str,
) -> Result<(), FillError> {
    document
        .get_dictionary_mut(field_id)
        .map_err(|_| FillError::CorruptReference(field_id))?
        .set("V", encode_text_string(value));
    Ok(())
}

/// Set `/NeedAppearances true` on the document's `/AcroForm`, so viewers
/// lay out text from `/V` instead of the cached appearance stream.
pub(crate) fn request_appearance_regeneration(document: &mut Document) -> Result<(), FillError> {
    let catalog = document
        .catalog()
        .map_err(|err| FillError::MalformedDocument(format!("no document catalog: {err}")))?;
    let indirect = match catalog.get(b"AcroForm") {
        Ok(Object::Reference(id)) => Some(*id),
        Ok(_) => None,
        Err(_) => return Err(FillError::NoFormPresent),
    };

    let acroform = match indirect {
        Some(id) => document
            .get_dictionary_mut(id)
            .map_err(|_| FillError::CorruptReference(id))?,
        None => document
            .catalog_mut()
            .and_then(|catalog| catalog.get_mut(b"AcroForm"))
            .and_then(Object::as_dict_mut)
            .map_err(|_| FillError::NoFormPresent)?,
    };
    acroform.set("NeedAppearances", Object::Boolean(true));
    Ok(())
}
