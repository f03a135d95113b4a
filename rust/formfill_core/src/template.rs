// SPDX-License-Identifier: AGPL-3.0-or-later WITH Palimpsest

use std::io::Write;

use lopdf::Document;

use crate::catalog::FieldCatalog;
use crate::error::FillError;
use crate::fill::{apply, FieldValues};
use crate::options::FillOptions;
use crate::writer::write_document;

/// A parsed form template and its field catalog.
///
/// A template is never modified after loading: every fill works on its own
/// deep copy, so one template can serve any number of fills.
#[derive(Debug)]
pub struct Template {
    document: Document,
    catalog: FieldCatalog,
}

impl Template {
    /// Parse `bytes` and read the field catalog.
    pub fn load(bytes: &[u8]) -> Result<Self, FillError> {
        if bytes.is_empty() {
            return Err(FillError::MalformedDocument("empty PDF payload".to_string()));
        }
        let document = Document::load_mem(bytes)
            .map_err(|err| FillError::MalformedDocument(format!("invalid PDF: {err}")))?;
        Self::from_document(document)
    }

    pub fn from_document(document: Document) -> Result<Self, FillError> {
        let catalog = FieldCatalog::from_document(&document)?;
        Ok(Self { document, catalog })
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Fill a copy of the template and return the serialized result.
    pub fn fill(&self, values: &FieldValues, options: &FillOptions) -> Result<Vec<u8>, FillError> {
        let mut out = Vec::new();
        self.fill_to(values, options, &mut out)?;
        Ok(out)
    }

    /// Fill a copy of the template and serialize it into `sink`.
    ///
    /// Nothing is written to `sink` unless every field was applied.
    pub fn fill_to<W: Write>(
        &self,
        values: &FieldValues,
        options: &FillOptions,
        sink: &mut W,
    ) -> Result<(), FillError> {
        let mut filled = apply(self, values, options)?;
        write_document(&mut filled, sink)
    }
}
