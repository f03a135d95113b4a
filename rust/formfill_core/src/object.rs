// SPDX-License-Identifier: AGPL-3.0-or-later WITH Palimpsest

//! Small helpers over lopdf objects: reference resolution, rectangles and
//! PDF text strings.

use lopdf::{Dictionary, Document, Object, StringFormat};
use serde::Serialize;

const UTF16_BOM: [u8; 2] = [0xFE, 0xFF];

/// Follow one level of indirection. Direct objects are returned as-is.
pub(crate) fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        _ => Some(obj),
    }
}

/// Look up `key` in `dict` and resolve the entry.
pub(crate) fn dict_entry<'a>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    resolve(doc, dict.get(key).ok()?)
}

pub(crate) fn dict_dict<'a>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Dictionary> {
    dict_entry(doc, dict, key)?.as_dict().ok()
}

pub(crate) fn dict_name<'a>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a [u8]> {
    match dict_entry(doc, dict, key)? {
        Object::Name(name) => Some(name.as_slice()),
        _ => None,
    }
}

/// Display form of a name object. Names are UTF-8 by convention; older
/// producers write single-byte names, which are read as PDFDocEncoding so
/// distinct names stay distinct.
pub(crate) fn name_to_string(name: &[u8]) -> String {
    match std::str::from_utf8(name) {
        Ok(text) => text.to_owned(),
        Err(_) => name.iter().map(|&b| pdf_doc_char(b)).collect(),
    }
}

fn object_to_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(v) => Some(*v as f32),
        Object::Real(v) => Some(*v as f32),
        _ => None,
    }
}

/// Widget placement in default user space, normalised so width and height
/// are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub(crate) fn from_object(obj: &Object) -> Option<Self> {
        let Object::Array(values) = obj else {
            return None;
        };

        if values.len() != 4 {
            return None;
        }

        let llx = object_to_number(&values[0])?;
        let lly = object_to_number(&values[1])?;
        let urx = object_to_number(&values[2])?;
        let ury = object_to_number(&values[3])?;

        Some(Self {
            x: llx.min(urx),
            y: lly.min(ury),
            width: (urx - llx).abs(),
            height: (ury - lly).abs(),
        })
    }
}

/// Decode a PDF text string.
///
/// Strings that open with the UTF-16BE byte-order mark are decoded as UTF-16;
/// anything else as PDFDocEncoding.
pub(crate) fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&UTF16_BOM) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&b| pdf_doc_char(b)).collect()
}

/// PDFDocEncoding. It agrees with ISO 8859-1 except for the ranges below;
/// its undefined codes (0x7F, 0x9F, 0xAD) fall back to ISO 8859-1.
fn pdf_doc_char(byte: u8) -> char {
    match byte {
        0x18 => '\u{02D8}', // breve
        0x19 => '\u{02C7}', // caron
        0x1A => '\u{02C6}', // circumflex
        0x1B => '\u{02D9}', // dot above
        0x1C => '\u{02DD}', // double acute
        0x1D => '\u{02DB}', // ogonek
        0x1E => '\u{02DA}', // ring above
        0x1F => '\u{02DC}', // small tilde
        0x80 => '\u{2022}', // bullet
        0x81 => '\u{2020}', // dagger
        0x82 => '\u{2021}', // double dagger
        0x83 => '\u{2026}', // ellipsis
        0x84 => '\u{2014}', // em dash
        0x85 => '\u{2013}', // en dash
        0x86 => '\u{0192}', // florin
        0x87 => '\u{2044}', // fraction slash
        0x88 => '\u{2039}', // single left angle quote
        0x89 => '\u{203A}', // single right angle quote
        0x8A => '\u{2212}', // minus
        0x8B => '\u{2030}', // per mille
        0x8C => '\u{201E}', // double low-9 quote
        0x8D => '\u{201C}', // left double quote
        0x8E => '\u{201D}', // right double quote
        0x8F => '\u{2018}', // left single quote
        0x90 => '\u{2019}', // right single quote
        0x91 => '\u{201A}', // single low-9 quote
        0x92 => '\u{2122}', // trade mark
        0x93 => '\u{FB01}', // fi ligature
        0x94 => '\u{FB02}', // fl ligature
        0x95 => '\u{0141}', // L with stroke
        0x96 => '\u{0152}', // OE ligature
        0x97 => '\u{0160}', // S with caron
        0x98 => '\u{0178}', // Y with diaeresis
        0x99 => '\u{017D}', // Z with caron
        0x9A => '\u{0131}', // dotless i
        0x9B => '\u{0142}', // l with stroke
        0x9C => '\u{0153}', // oe ligature
        0x9D => '\u{0161}', // s with caron
        0x9E => '\u{017E}', // z with caron
        0xA0 => '\u{20AC}', // euro
        _ => char::from(byte),
    }
}

/// Encode `text` as a PDF text string that [`decode_text_string`] reads back
/// unchanged.
///
/// Printable ASCII stays single-byte, written as a hex string when it holds a
/// character that would need escaping inside a literal.
pub(crate) fn encode_text_string(text: &str) -> Object {
    if text.bytes().all(|b| (0x20..0x7f).contains(&b)) {
        let format = if text.contains(['(', ')', '\\']) {
            StringFormat::Hexadecimal
        } else {
            StringFormat::Literal
        };
        return Object::String(text.as_bytes().to_vec(), format);
    }

    let mut bytes = UTF16_BOM.to_vec();
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Text content of a string or name object.
pub(crate) fn object_to_text(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        Object::Name(name) => Some(name_to_string(name)),
        _ => None,
    }
}

/// Partial field name (`/T`), with the NUL padding some producers leave.
pub(crate) fn partial_name(doc: &Document, dict: &Dictionary) -> Option<String> {
    let text = object_to_text(dict_entry(doc, dict, b"T")?)?;
    let text = text.trim_matches(char::from(0)).trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_owned())
    }
}
