//! The "P" flag convention used by the schedule matrix.

use crate::ingest::sheet::Cell;

/// A cell is marked when its trimmed, upper-cased text starts with `P`.
/// Blank cells, numbers, booleans and dates are never marked.
pub fn is_marked(cell: &Cell) -> bool {
    match cell {
        Cell::Text(s) => is_marked_str(s),
        _ => false,
    }
}

pub fn is_marked_str(s: &str) -> bool {
    s.trim().to_uppercase().starts_with('P')
}
