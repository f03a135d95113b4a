// SPDX-License-Identifier: AGPL-3.0-or-later WITH Palimpsest

use serde::{Deserialize, Serialize};

/// Knobs for a fill call. Field names are camelCase when deserialized, so a
/// JavaScript caller can pass `{ strict: true, mirrorWidgetValues: true }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FillOptions {
    /// Set `/NeedAppearances true` on the output form.
    pub need_appearances: bool,
    /// Also write a button's `/V` on each of its separate kid widgets.
    pub mirror_widget_values: bool,
    /// Reject unknown field names and out-of-range button values instead of
    /// skipping them.
    pub strict: bool,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            need_appearances: true,
            mirror_widget_values: false,
            strict: false,
        }
    }
}

impl FillOptions {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }
}
