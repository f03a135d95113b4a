// SPDX-License-Identifier: AGPL-3.0-or-later WITH Palimpsest

//! Deep copy of a document graph.
//!
//! The copy is built in a single pass from the trailer. Every original object
//! id is memoised the first time it is seen, before its object is copied, so
//! an object reached through several paths (a field's kids and a page's
//! `/Annots`, a shared appearance stream, `/P` and `/Parent` back-links)
//! becomes exactly one object in the copy.

use std::collections::HashMap;

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::FillError;

/// Trailer entries carried into the copy. Cross-reference stream keys,
/// `/Prev` and `/Size` belong to the source file layout and are rebuilt by
/// the writer.
const TRAILER_KEYS: [&[u8]; 3] = [b"Root", b"Info", b"ID"];

/// An independent copy of a document plus the id mapping used to build it.
#[derive(Debug)]
pub struct ClonedGraph {
    pub document: Document,
    ids: HashMap<ObjectId, ObjectId>,
}

impl ClonedGraph {
    /// Id in the copy of the object that had `original` in the source.
    /// `None` when the object is unreachable from the source trailer.
    pub fn translate(&self, original: ObjectId) -> Option<ObjectId> {
        self.ids.get(&original).copied()
    }

    /// Number of objects in the copy.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Copy every object reachable from `source`'s trailer into a new document.
///
/// Fails with [`FillError::CorruptReference`] on the first reference to an
/// object the source does not contain. Objects unreachable from the trailer
/// are not copied. New ids are dense, generation 0, in discovery order.
pub fn clone_graph(source: &Document) -> Result<ClonedGraph, FillError> {
    GraphCloner {
        source,
        ids: HashMap::new(),
        pending: Vec::new(),
        next_id: 1,
    }
    .run()
}

struct GraphCloner<'a> {
    source: &'a Document,
    ids: HashMap<ObjectId, ObjectId>,
    pending: Vec<ObjectId>,
    next_id: u32,
}

impl GraphCloner<'_> {
    fn run(mut self) -> Result<ClonedGraph, FillError> {
        let mut document = Document::with_version(self.source.version.clone());

        for key in TRAILER_KEYS {
            if let Ok(value) = self.source.trailer.get(key) {
                let copied = self.copy(value);
                document.trailer.set(key.to_vec(), copied);
            }
        }

        while let Some(original) = self.pending.pop() {
            let object = self
                .source
                .objects
                .get(&original)
                .ok_or(FillError::CorruptReference(original))?;
            let copied = self.copy(object);
            document.objects.insert(self.ids[&original], copied);
        }

        document.max_id = self.next_id - 1;
        Ok(ClonedGraph {
            document,
            ids: self.ids,
        })
    }

    fn map_id(&mut self, original: ObjectId) -> ObjectId {
        if let Some(&id) = self.ids.get(&original) {
            return id;
        }
        let id = (self.next_id, 0);
        self.next_id += 1;
        self.ids.insert(original, id);
        self.pending.push(original);
        id
    }

    fn copy(&mut self, object: &Object) -> Object {
        match object {
            Object::Reference(id) => Object::Reference(self.map_id(*id)),
            Object::Array(items) => Object::Array(items.iter().map(|item| self.copy(item)).collect()),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dict(dict)),
            Object::Stream(stream) => {
                let mut copied = stream.clone();
                copied.dict = self.copy_dict(&stream.dict);
                Object::Stream(copied)
            }
            other => other.clone(),
        }
    }

    fn copy_dict(&mut self, dict: &Dictionary) -> Dictionary {
        let mut copied = Dictionary::new();
        for (key, value) in dict.iter() {
            let value = self.copy(value);
            copied.set(key.clone(), value);
        }
        copied
    }
}
