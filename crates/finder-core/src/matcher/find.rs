//! Literal substring search over chars.

use crate::options::SearchOptions;

/// Simple lowercase fold that keeps a 1:1 char mapping. Chars whose
/// lowercase form expands to several chars are left unchanged.
pub(crate) fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Char offsets of every occurrence of `needle` in `haystack`.
///
/// Matching resumes one char after each candidate, so occurrences may
/// overlap ("aa" in "aaa" gives 0 and 1). With `whole_word`, a candidate is
/// dropped when the char just outside it on either side is a word char;
/// the ends of the haystack always count as boundaries.
pub fn find_offsets(haystack: &str, needle: &str, options: SearchOptions) -> Vec<usize> {
    let fold = |c: char| if options.match_case { c } else { fold_char(c) };
    let hay: Vec<char> = haystack.chars().map(fold).collect();
    let pat: Vec<char> = needle.chars().map(fold).collect();

    let mut offsets = Vec::new();
    if pat.is_empty() || pat.len() > hay.len() {
        return offsets;
    }

    for start in 0..=hay.len() - pat.len() {
        if hay[start..start + pat.len()] != pat[..] {
            continue;
        }
        if options.whole_word {
            let before = start.checked_sub(1).map(|i| hay[i]);
            let after = hay.get(start + pat.len()).copied();
            if before.is_some_and(is_word_char) || after.is_some_and(is_word_char) {
                continue;
            }
        }
        offsets.push(start);
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(match_case: bool, whole_word: bool) -> SearchOptions {
        SearchOptions {
            match_case,
            whole_word,
        }
    }

    #[test]
    fn case_insensitive_by_default() {
        assert_eq!(
            find_offsets("Hello world, hello again", "hello", opts(false, false)),
            vec![0, 13]
        );
    }

    #[test]
    fn match_case_is_exact() {
        assert_eq!(
            find_offsets("Hello world, hello again", "hello", opts(true, false)),
            vec![13]
        );
    }

    #[test]
    fn overlapping_occurrences() {
        assert_eq!(find_offsets("aaa", "aa", opts(false, false)), vec![0, 1]);
        assert_eq!(find_offsets("abcabc", "abc", opts(false, false)), vec![0, 3]);
    }

    #[test]
    fn whole_word_rejects_embedded_matches() {
        assert_eq!(find_offsets("cat category", "cat", opts(false, true)), vec![0]);
        assert_eq!(find_offsets("bobcat cat_x cat.", "cat", opts(false, true)), vec![13]);
    }

    #[test]
    fn whole_word_treats_node_edges_as_boundaries() {
        assert_eq!(find_offsets("cat", "cat", opts(false, true)), vec![0]);
    }

    #[test]
    fn offsets_are_in_chars() {
        assert_eq!(find_offsets("héllo héllo", "héllo", opts(false, false)), vec![0, 6]);
        assert_eq!(find_offsets("ÄBC äbc", "äbc", opts(false, false)), vec![0, 4]);
    }

    #[test]
    fn multi_char_lowercase_keeps_alignment() {
        // 'İ' lowercases to two chars, so it is left as is.
        assert_eq!(find_offsets("İx ix", "ix", opts(false, false)), vec![3]);
    }

    #[test]
    fn empty_or_long_needle_finds_nothing() {
        assert!(find_offsets("abc", "", opts(false, false)).is_empty());
        assert!(find_offsets("ab", "abc", opts(false, false)).is_empty());
    }
}
