//! Rendering of extra entries into invoice cell text.
//!
//! The exact output format is load-bearing: the invoice view and its
//! golden-output tests both consume these strings verbatim.

use shared::{DailyExtra, MenuItem};

/// Placeholder for a meal slot with no extra
pub const EMPTY_CELL: &str = "-";

/// Separator between multiple entries sharing one invoice cell
const CELL_SEPARATOR: &str = "<br>";

/// Render one extra as `"<name> – ₹<price>"`, with the trimmed note
/// appended in parentheses when present. An unresolvable menu item
/// falls back to the literal name "Item".
pub fn format_extra_display(extra: &DailyExtra, menu_item: Option<&MenuItem>) -> String {
    let name = menu_item.map(|item| item.name.as_str()).unwrap_or("Item");
    let note = extra.notes.trim();
    if note.is_empty() {
        format!("{} – ₹{}", name, extra.price)
    } else {
        format!("{} – ₹{} ({})", name, extra.price, note)
    }
}

/// Join already-rendered entries into one cell. The admission rule keeps
/// a slot to a single entry, but callers that bypass it still get a
/// readable cell rather than lost data.
pub fn format_cell(rendered: &[String]) -> String {
    if rendered.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        rendered.join(CELL_SEPARATOR)
    }
}
