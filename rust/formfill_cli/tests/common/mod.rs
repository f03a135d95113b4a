// SPDX-License-Identifier: AGPL-3.0-or-later WITH Palimpsest

#![allow(dead_code)]

use std::io::Write;

use assert_cmd::Command;
use lopdf::{dictionary, Document, Object, Stream};
use tempfile::NamedTempFile;

pub fn cmd() -> Command {
    Command::cargo_bin("formfill").unwrap()
}

/// One-page template: `pt-firstname` (text), `sex` (radio 1/2) and
/// `health_Diabetes` (checkbox).
pub fn intake_template() -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let page_id = doc.new_object_id();
    let blank = doc.add_object(Stream::new(dictionary! {}, b"q Q".to_vec()));
    let rect = |y: i64| {
        vec![
            Object::Integer(72),
            Object::Integer(y),
            Object::Integer(300),
            Object::Integer(y + 18),
        ]
    };

    let firstname = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "FT" => "Tx",
        "T" => Object::string_literal("pt-firstname"),
        "P" => Object::Reference(page_id),
        "Rect" => rect(720),
    });

    let sex = doc.new_object_id();
    let mut kids = Vec::new();
    for (state, y) in [("1", 690), ("2", 660)] {
        kids.push(Object::Reference(doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "Parent" => Object::Reference(sex),
            "P" => Object::Reference(page_id),
            "Rect" => rect(y),
            "AS" => "Off",
            "AP" => dictionary! {
                "N" => dictionary! {
                    "Off" => Object::Reference(blank),
                    state => Object::Reference(blank),
                },
            },
        })));
    }
    doc.objects.insert(
        sex,
        Object::Dictionary(dictionary! {
            "FT" => "Btn",
            "Ff" => 1i64 << 15,
            "T" => Object::string_literal("sex"),
            "V" => "Off",
            "Kids" => kids.clone(),
        }),
    );

    let diabetes = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "FT" => "Btn",
        "T" => Object::string_literal("health_Diabetes"),
        "V" => "Off",
        "AS" => "Off",
        "P" => Object::Reference(page_id),
        "Rect" => rect(630),
        "AP" => dictionary! {
            "N" => dictionary! {
                "Off" => Object::Reference(blank),
                "Yes" => Object::Reference(blank),
            },
        },
    });

    let mut annots = vec![Object::Reference(firstname)];
    annots.extend(kids);
    annots.push(Object::Reference(diabetes));
    doc.objects.insert(
        page_id,
        Object::Dictionary(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => media_box(),
            "Annots" => annots,
        }),
    );
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => Object::Integer(1),
        }),
    );

    let acroform = doc.add_object(dictionary! {
        "Fields" => vec![
            Object::Reference(firstname),
            Object::Reference(sex),
            Object::Reference(diabetes),
        ],
    });
    let catalog = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
        "AcroForm" => Object::Reference(acroform),
    });
    doc.trailer.set("Root", Object::Reference(catalog));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A valid PDF with a page but no interactive form.
pub fn plain_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => Object::Reference(pages_id),
        "MediaBox" => media_box(),
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => Object::Integer(1),
        }),
    );
    let catalog = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn media_box() -> Vec<Object> {
    vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(612),
        Object::Integer(792),
    ]
}

pub fn temp_file(bytes: &[u8], suffix: &str) -> NamedTempFile {
    let mut tmp = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    tmp.write_all(bytes).unwrap();
    tmp
}
