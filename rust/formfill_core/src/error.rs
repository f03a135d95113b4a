// SPDX-License-Identifier: AGPL-3.0-or-later WITH Palimpsest

//! Error type for loading and filling form templates.

use lopdf::ObjectId;
use thiserror::Error;

/// Every way a fill call can fail.
///
/// All variants are terminal: a failed call produces no output bytes.
/// Unknown field names and out-of-range button values are not errors unless
/// [`FillOptions::strict`](crate::FillOptions::strict) is set.
#[derive(Debug, Error)]
pub enum FillError {
    /// The input is not a parseable PDF, or it has no document catalog.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// The document parsed but its catalog has no `/AcroForm`.
    #[error("document has no interactive form")]
    NoFormPresent,

    /// An indirect reference points at an object that does not exist.
    #[error("broken reference to object {0:?}")]
    CorruptReference(ObjectId),

    /// The output sink rejected a write or flush.
    #[error("failed to write document: {0}")]
    WriteError(#[from] std::io::Error),

    /// Strict mode only: no catalogued field has this name.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Strict mode only: the button field has no appearance for this state.
    #[error("{value:?} is not a valid state for field {field:?}")]
    InvalidState { field: String, value: String },
}
