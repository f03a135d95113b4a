// SPDX-License-Identifier: AGPL-3.0-or-later WITH Palimpsest

use std::path::Path;

use formfill_core::{ButtonStyle, Field, FieldCatalog, FieldKind};

use crate::cli::OutputFormat;
use crate::shared::open_template;

pub fn run(file: &Path, format: OutputFormat) -> Result<(), i32> {
    let template = open_template(file)?;
    match format {
        OutputFormat::Text => {
            print!("{}", render_text(template.catalog()));
            Ok(())
        }
        OutputFormat::Json => write_json(template.catalog()),
    }
}

fn kind_str(field: &Field) -> &'static str {
    match &field.kind {
        FieldKind::Text => "text",
        FieldKind::Button { style, .. } => match style {
            ButtonStyle::Checkbox => "checkbox",
            ButtonStyle::Radio => "radio",
            ButtonStyle::Push => "push",
        },
    }
}

/// One row per widget; a field without widgets still gets a row.
fn render_text(catalog: &FieldCatalog) -> String {
    let mut out = String::from("name\tqualified_name\ttype\tvalue\tstates\tpage\tappearance\n");

    for field in catalog {
        let states = field
            .valid_states()
            .map(|states| states.iter().cloned().collect::<Vec<_>>().join(","))
            .unwrap_or_default();
        let prefix = format!(
            "{}\t{}\t{}\t{}\t{}",
            field.name,
            field.qualified_name,
            kind_str(field),
            field.value.as_deref().unwrap_or(""),
            states,
        );

        if field.widgets.is_empty() {
            out.push_str(&format!("{prefix}\t\t\n"));
        }
        for widget in &field.widgets {
            out.push_str(&format!(
                "{prefix}\t{}\t{}\n",
                widget.page.map(|page| page.to_string()).unwrap_or_default(),
                widget.appearance_state.as_deref().unwrap_or(""),
            ));
        }
    }

    out
}

fn write_json(catalog: &FieldCatalog) -> Result<(), i32> {
    let json = serde_json::to_string_pretty(catalog).map_err(|e| {
        eprintln!("Error: failed to serialize fields: {e}");
        1
    })?;
    println!("{json}");
    Ok(())
}
