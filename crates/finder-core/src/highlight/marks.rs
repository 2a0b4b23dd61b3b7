//! Splitting a matched text node into plain and marked pieces.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Piece {
    Text(String),
    Mark(String),
}

/// Split `text` at the given ascending char offsets.
///
/// Works right to left so that each marker can end where the following one
/// starts; overlapping occurrences each keep a marker and no char is
/// dropped. Returns `None` when an occurrence runs past the end of the text.
pub(crate) fn split_pieces(text: &str, offsets: &[usize], query_len: usize) -> Option<Vec<Piece>> {
    let chars: Vec<char> = text.chars().collect();
    let slice = |from: usize, to: usize| chars[from..to].iter().collect::<String>();

    let mut pieces = Vec::with_capacity(offsets.len() * 2 + 1);
    let mut end = chars.len();
    for &start in offsets.iter().rev() {
        if start + query_len > chars.len() || start >= end {
            return None;
        }
        let mark_end = (start + query_len).min(end);
        if mark_end < end {
            pieces.push(Piece::Text(slice(mark_end, end)));
        }
        pieces.push(Piece::Mark(slice(start, mark_end)));
        end = start;
    }
    if end > 0 {
        pieces.push(Piece::Text(slice(0, end)));
    }
    pieces.reverse();
    Some(pieces)
}
