// ============================================================================
// DERIVED VIEW - filter + recency sort, recomputed on every read
// ============================================================================

use crate::note::Note;

/// Notes matching `filter` (case-insensitive, title or content), newest first.
/// An empty filter matches everything. Ties keep collection order.
pub fn visible_notes<'a>(notes: &'a [Note], filter: &str) -> Vec<&'a Note> {
    let query = filter.to_lowercase();
    let mut hits: Vec<&Note> = notes.iter().filter(|n| n.matches(&query)).collect();
    hits.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    hits
}
