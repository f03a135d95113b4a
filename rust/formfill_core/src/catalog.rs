// SPDX-License-Identifier: AGPL-3.0-or-later WITH Palimpsest

//! Field catalog read from a document's `/AcroForm` tree.
//!
//! The catalog records, for every terminal text or button field, its leaf
//! name, kind, current value and the widgets that display it. Button kinds
//! carry the set of appearance states their widgets can show, which is what
//! the filler validates requested values against.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use lopdf::{Dictionary, Document, Object, ObjectId};
use serde::Serialize;
use tracing::trace;

use crate::error::FillError;
use crate::object::{
    dict_dict, dict_entry, dict_name, name_to_string, object_to_text, partial_name, resolve, Rect,
};

/// Appearance state name meaning "not selected".
pub const OFF_STATE: &str = "Off";

const MAX_FIELD_DEPTH: usize = 64;
const FLAG_RADIO: u32 = 1 << 15;
const FLAG_PUSHBUTTON: u32 = 1 << 16;

/// Presentation of a button field, from its `/Ff` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Checkbox,
    Radio,
    Push,
}

impl ButtonStyle {
    fn from_flags(flags: u32) -> Self {
        if flags & FLAG_PUSHBUTTON != 0 {
            Self::Push
        } else if flags & FLAG_RADIO != 0 {
            Self::Radio
        } else {
            Self::Checkbox
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text (`/FT /Tx`).
    Text,
    /// Checkbox, radio group or push button (`/FT /Btn`).
    Button {
        style: ButtonStyle,
        /// Union of the appearance states of every widget of the field.
        valid_states: BTreeSet<String>,
    },
}

/// One on-page placement of a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Widget {
    #[serde(skip)]
    pub id: ObjectId,
    /// 1-based page number, when the widget is listed in a page's `/Annots`.
    pub page: Option<u32>,
    pub rect: Option<Rect>,
    /// Keys of the widget's `/AP /N` dictionary.
    pub states: BTreeSet<String>,
    /// Current `/AS` entry.
    pub appearance_state: Option<String>,
    /// Raw name bytes behind each entry of `states`.
    #[serde(skip)]
    pub(crate) state_names: BTreeMap<String, Vec<u8>>,
}

impl Widget {
    pub fn supports(&self, state: &str) -> bool {
        self.states.contains(state)
    }

    /// Name bytes for `state` exactly as the widget's appearance dictionary
    /// spells it, or `None` when the widget cannot show `state`.
    pub(crate) fn state_name<'a>(&'a self, state: &'a str) -> Option<&'a [u8]> {
        if !self.supports(state) {
            return None;
        }
        Some(
            self.state_names
                .get(state)
                .map_or(state.as_bytes(), Vec::as_slice),
        )
    }

    pub fn supports_off(&self) -> bool {
        self.supports(OFF_STATE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    #[serde(skip)]
    pub id: ObjectId,
    /// Leaf name (`/T` of the terminal field node).
    pub name: String,
    /// Dot-joined names from the root of the field tree.
    pub qualified_name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    /// `/Ff`, inherited when the node has none.
    pub flags: u32,
    /// `/V`, inherited when the node has none.
    pub value: Option<String>,
    pub widgets: Vec<Widget>,
}

impl Field {
    pub fn valid_states(&self) -> Option<&BTreeSet<String>> {
        match &self.kind {
            FieldKind::Text => None,
            FieldKind::Button { valid_states, .. } => Some(valid_states),
        }
    }

    /// Whether the field accepts `value`: any string for text, a known
    /// appearance state for buttons.
    pub fn accepts(&self, value: &str) -> bool {
        self.valid_states()
            .map_or(true, |states| states.contains(value))
    }
}

/// Every text and button field of a document, in `/Fields` order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldCatalog {
    fields: Vec<Field>,
}

impl FieldCatalog {
    /// Read the catalog of `doc`.
    ///
    /// Fails with [`FillError::NoFormPresent`] when the document catalog has
    /// no `/AcroForm`. A form without `/Fields` gives an empty catalog.
    pub fn from_document(doc: &Document) -> Result<Self, FillError> {
        let root = doc
            .catalog()
            .map_err(|err| FillError::MalformedDocument(format!("no document catalog: {err}")))?;
        let acroform = dict_dict(doc, root, b"AcroForm").ok_or(FillError::NoFormPresent)?;

        let roots: Vec<ObjectId> = match dict_entry(doc, acroform, b"Fields") {
            Some(Object::Array(entries)) => entries.iter().filter_map(reference).collect(),
            _ => Vec::new(),
        };

        let mut walker = FieldWalker {
            doc,
            pages: PageIndex::build(doc),
            visited: HashSet::new(),
            fields: Vec::new(),
        };
        let top = Inherited::default();
        for id in roots {
            walker.walk(id, &top, 0);
        }

        Ok(Self {
            fields: walker.fields,
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// First field with the given leaf name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Every field with the given leaf name. Leaf names are unique in
    /// well-formed templates, but nothing enforces that.
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Field> + 'a {
        self.fields.iter().filter(move |field| field.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }
}

impl<'a> IntoIterator for &'a FieldCatalog {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

fn reference(obj: &Object) -> Option<ObjectId> {
    match obj {
        Object::Reference(id) => Some(*id),
        _ => None,
    }
}

/// Where each widget annotation sits, and which widgets name a parent.
struct PageIndex {
    page_of: HashMap<ObjectId, u32>,
    children_of: HashMap<ObjectId, Vec<ObjectId>>,
}

impl PageIndex {
    fn build(doc: &Document) -> Self {
        let mut page_of = HashMap::new();
        let mut children_of: HashMap<ObjectId, Vec<ObjectId>> = HashMap::new();

        for (page_number, page_id) in doc.get_pages() {
            let Ok(page) = doc.get_dictionary(page_id) else {
                continue;
            };
            let Some(Object::Array(annots)) = dict_entry(doc, page, b"Annots") else {
                continue;
            };

            for annot_id in annots.iter().filter_map(reference) {
                page_of.entry(annot_id).or_insert(page_number);

                let Ok(annot) = doc.get_dictionary(annot_id) else {
                    continue;
                };
                if dict_name(doc, annot, b"Subtype") != Some(b"Widget".as_slice()) {
                    continue;
                }
                if let Some(parent) = annot.get(b"Parent").ok().and_then(reference) {
                    children_of.entry(parent).or_default().push(annot_id);
                }
            }
        }

        Self {
            page_of,
            children_of,
        }
    }
}

/// Attributes a field node passes down to its kids.
#[derive(Default)]
struct Inherited {
    qualified_name: Option<String>,
    field_type: Option<Vec<u8>>,
    flags: Option<u32>,
    value: Option<String>,
}

struct FieldWalker<'a> {
    doc: &'a Document,
    pages: PageIndex,
    visited: HashSet<ObjectId>,
    fields: Vec<Field>,
}

impl FieldWalker<'_> {
    fn walk(&mut self, id: ObjectId, parent: &Inherited, depth: usize) {
        if depth >= MAX_FIELD_DEPTH || !self.visited.insert(id) {
            return;
        }
        let doc = self.doc;
        let Ok(dict) = doc.get_dictionary(id) else {
            return;
        };

        let name = partial_name(doc, dict);
        let node = Inherited {
            qualified_name: match (&parent.qualified_name, &name) {
                (Some(prefix), Some(name)) => Some(format!("{prefix}.{name}")),
                (prefix, name) => name.clone().or_else(|| prefix.clone()),
            },
            field_type: dict_name(doc, dict, b"FT")
                .map(<[u8]>::to_vec)
                .or_else(|| parent.field_type.clone()),
            flags: match dict_entry(doc, dict, b"Ff") {
                Some(Object::Integer(flags)) => Some(*flags as u32),
                _ => parent.flags,
            },
            value: dict_entry(doc, dict, b"V")
                .and_then(object_to_text)
                .or_else(|| parent.value.clone()),
        };

        let kids: Vec<ObjectId> = match dict_entry(doc, dict, b"Kids") {
            Some(Object::Array(kids)) => kids.iter().filter_map(reference).collect(),
            _ => Vec::new(),
        };
        let child_fields: Vec<ObjectId> = kids
            .iter()
            .copied()
            .filter(|kid| {
                doc.get_dictionary(*kid)
                    .is_ok_and(|kid| partial_name(doc, kid).is_some())
            })
            .collect();

        if !child_fields.is_empty() {
            for kid in child_fields {
                self.walk(kid, &node, depth + 1);
            }
            return;
        }

        let Some(name) = name else {
            trace!(?id, "terminal field node without a name");
            return;
        };
        self.push_terminal(id, dict, name, node, kids);
    }

    fn push_terminal(
        &mut self,
        id: ObjectId,
        dict: &Dictionary,
        name: String,
        node: Inherited,
        kids: Vec<ObjectId>,
    ) {
        let mut widget_ids = if kids.is_empty() && is_widget(self.doc, dict) {
            vec![id]
        } else {
            kids
        };
        if let Some(claimed) = self.pages.children_of.get(&id) {
            for widget_id in claimed {
                if !widget_ids.contains(widget_id) {
                    widget_ids.push(*widget_id);
                }
            }
        }
        let widgets: Vec<Widget> = widget_ids
            .into_iter()
            .filter_map(|widget_id| self.widget(widget_id))
            .collect();

        let flags = node.flags.unwrap_or(0);
        let kind = match node.field_type.as_deref() {
            Some(b"Tx") => FieldKind::Text,
            Some(b"Btn") => FieldKind::Button {
                style: ButtonStyle::from_flags(flags),
                valid_states: widgets
                    .iter()
                    .flat_map(|widget| widget.states.iter().cloned())
                    .collect(),
            },
            other => {
                trace!(
                    field = %name,
                    field_type = ?other.map(name_to_string),
                    "skipping unsupported field type"
                );
                return;
            }
        };

        self.fields.push(Field {
            id,
            qualified_name: node.qualified_name.unwrap_or_else(|| name.clone()),
            name,
            kind,
            flags,
            value: node.value,
            widgets,
        });
    }

    fn widget(&self, id: ObjectId) -> Option<Widget> {
        let doc = self.doc;
        let dict = doc.get_dictionary(id).ok()?;

        let mut state_names = BTreeMap::new();
        if let Some(normal) = dict_dict(doc, dict, b"AP").and_then(|ap| dict_dict(doc, ap, b"N")) {
            for (key, _) in normal.iter() {
                state_names
                    .entry(name_to_string(key))
                    .or_insert_with(|| key.clone());
            }
        }
        let states = state_names.keys().cloned().collect();

        Some(Widget {
            id,
            page: self.pages.page_of.get(&id).copied(),
            rect: dict
                .get(b"Rect")
                .ok()
                .and_then(|rect| resolve(doc, rect))
                .and_then(Rect::from_object),
            states,
            appearance_state: dict_name(doc, dict, b"AS").map(name_to_string),
            state_names,
        })
    }
}

fn is_widget(doc: &Document, dict: &Dictionary) -> bool {
    dict_name(doc, dict, b"Subtype") == Some(b"Widget".as_slice()) || dict.has(b"Rect")
}
