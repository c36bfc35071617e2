//! Plain text rendering.

use crate::model::HighlightSet;

/// Items shown by [`preview`] unless asked otherwise.
pub const DEFAULT_PREVIEW_ITEMS: usize = 3;

/// All highlights as text, each under a `[Página n]` marker.
pub fn to_text(set: &HighlightSet) -> String {
    set.iter()
        .map(|h| format!("[Página {}]\n{}", h.page, h.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// The first `items` highlights, then a count of the rest.
pub fn preview(set: &HighlightSet, items: usize) -> String {
    let mut out = String::new();

    for (i, highlight) in set.iter().take(items).enumerate() {
        out.push_str(&format!("Item {:02} | Página {}\n{}\n\n", i + 1, highlight.page, highlight.text));
    }

    let rest = set.len().saturating_sub(items);
    if rest > 0 {
        out.push_str(&format!("...e mais {} itens", rest));
    }

    out.trim_end().to_string()
}
