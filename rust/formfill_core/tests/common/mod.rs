// SPDX-License-Identifier: AGPL-3.0-or-later WITH Palimpsest

//! Shared helpers for integration tests: a small AcroForm template builder
//! and catalog snapshots.

#![allow(dead_code)]

use formfill_core::{FieldCatalog, Template};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

const RADIO: i64 = 1 << 15;

/// Builds multi-page form templates with lopdf.
pub struct FormBuilder {
    doc: Document,
    pages_id: ObjectId,
    pages: Vec<(ObjectId, Vec<Object>)>,
    fields: Vec<Object>,
    blank: ObjectId,
    next_y: i64,
}

impl FormBuilder {
    pub fn new(page_count: usize) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let pages = (0..page_count)
            .map(|_| (doc.new_object_id(), Vec::new()))
            .collect();
        let blank = doc.add_object(Stream::new(dictionary! {}, b"q Q".to_vec()));
        Self {
            doc,
            pages_id,
            pages,
            fields: Vec::new(),
            blank,
            next_y: 740,
        }
    }

    fn rect(&mut self) -> Object {
        let y = self.next_y;
        self.next_y -= 24;
        Object::Array(vec![
            Object::Integer(72),
            Object::Integer(y),
            Object::Integer(300),
            Object::Integer(y + 18),
        ])
    }

    fn appearances(&self, states: &[&str]) -> Dictionary {
        let mut normal = Dictionary::new();
        for state in states {
            normal.set(*state, Object::Reference(self.blank));
        }
        dictionary! { "N" => normal }
    }

    fn place(&mut self, page: usize, widget: ObjectId) {
        self.pages[page].1.push(Object::Reference(widget));
    }

    /// Text field whose single widget is merged into the field dictionary.
    pub fn text(&mut self, page: usize, name: &str, default: Option<&str>) -> &mut Self {
        let rect = self.rect();
        let mut dict = dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "FT" => "Tx",
            "T" => Object::string_literal(name),
            "P" => Object::Reference(self.pages[page].0),
            "Rect" => rect,
            "DA" => Object::string_literal("/Helv 10 Tf 0 g"),
            "AP" => dictionary! { "N" => Object::Reference(self.blank) },
        };
        if let Some(default) = default {
            dict.set("V", Object::string_literal(default));
        }
        let id = self.doc.add_object(dict);
        self.place(page, id);
        self.fields.push(Object::Reference(id));
        self
    }

    /// Checkbox with one merged widget and the given "on" state.
    pub fn checkbox(&mut self, page: usize, name: &str, on: &str) -> &mut Self {
        let rect = self.rect();
        let ap = self.appearances(&["Off", on]);
        let id = self.doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "FT" => "Btn",
            "T" => Object::string_literal(name),
            "V" => "Off",
            "AS" => "Off",
            "P" => Object::Reference(self.pages[page].0),
            "Rect" => rect,
            "AP" => ap,
        });
        self.place(page, id);
        self.fields.push(Object::Reference(id));
        self
    }

    /// Radio group: one kid widget per `(page, state)` option.
    pub fn radio(&mut self, name: &str, options: &[(usize, &str)]) -> &mut Self {
        let parent = self.doc.new_object_id();
        let mut kids = Vec::new();
        for &(page, state) in options {
            let rect = self.rect();
            let ap = self.appearances(&["Off", state]);
            let kid = self.doc.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Widget",
                "Parent" => Object::Reference(parent),
                "P" => Object::Reference(self.pages[page].0),
                "Rect" => rect,
                "AS" => "Off",
                "AP" => ap,
            });
            self.place(page, kid);
            kids.push(Object::Reference(kid));
        }
        self.doc.objects.insert(
            parent,
            Object::Dictionary(dictionary! {
                "FT" => "Btn",
                "Ff" => RADIO,
                "T" => Object::string_literal(name),
                "V" => "Off",
                "Kids" => kids,
            }),
        );
        self.fields.push(Object::Reference(parent));
        self
    }

    pub fn build(&mut self) -> Vec<u8> {
        let mut doc = self.doc.clone();
        for (page_id, annots) in &self.pages {
            doc.objects.insert(
                *page_id,
                Object::Dictionary(dictionary! {
                    "Type" => "Page",
                    "Parent" => Object::Reference(self.pages_id),
                    "MediaBox" => vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(612),
                        Object::Integer(792),
                    ],
                    "Annots" => annots.clone(),
                }),
            );
        }
        doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => self
                    .pages
                    .iter()
                    .map(|(id, _)| Object::Reference(*id))
                    .collect::<Vec<_>>(),
                "Count" => self.pages.len() as i64,
            }),
        );
        let acroform = doc.add_object(dictionary! {
            "Fields" => self.fields.clone(),
            "DA" => Object::string_literal("/Helv 0 Tf 0 g"),
        });
        let catalog = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(self.pages_id),
            "AcroForm" => Object::Reference(acroform),
        });
        doc.trailer.set("Root", Object::Reference(catalog));

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }
}

/// The new-patient template used across the integration tests.
pub fn new_patient_form() -> Vec<u8> {
    FormBuilder::new(2)
        .text(0, "pt-firstname", None)
        .text(0, "pt-lastname", None)
        .text(0, "pt-dob", Some("01/01/00"))
        .radio("sex", &[(0, "1"), (0, "2")])
        .radio("marital-status", &[(0, "Single"), (0, "Married"), (1, "Widowed")])
        .checkbox(0, "health_Diabetes", "Yes")
        .checkbox(1, "health_Asthma", "Yes")
        .radio("pregnant", &[(1, "Yes"), (1, "No")])
        .text(1, "pt-med-sig", None)
        .build()
}

/// Field name, `/V`, and each widget's `/AS`.
pub type FieldState = (String, Option<String>, Vec<Option<String>>);

pub fn snapshot(catalog: &FieldCatalog) -> Vec<FieldState> {
    catalog
        .iter()
        .map(|field| {
            (
                field.name.clone(),
                field.value.clone(),
                field
                    .widgets
                    .iter()
                    .map(|widget| widget.appearance_state.clone())
                    .collect(),
            )
        })
        .collect()
}

pub fn catalog_of(bytes: &[u8]) -> FieldCatalog {
    Template::load(bytes).unwrap().catalog().clone()
}

pub fn state_of(catalog: &FieldCatalog, name: &str) -> FieldState {
    snapshot(catalog)
        .into_iter()
        .find(|(field, _, _)| field == name)
        .unwrap_or_else(|| panic!("no field {name}"))
}
