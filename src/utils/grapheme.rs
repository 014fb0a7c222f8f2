//! Grapheme cluster handling utilities
//!
//! Typed input arrives as whole strings (keystrokes, paste). The typing
//! engine places one grapheme cluster per carriage step, so everything
//! that walks input text goes through these helpers.

use unicode_segmentation::UnicodeSegmentation;

/// Iterate over the extended grapheme clusters of `text` in typed order.
pub fn graphemes(text: &str) -> impl Iterator<Item = &str> {
    text.graphemes(true)
}

/// Count the grapheme clusters in `text`.
pub fn count_graphemes(text: &str) -> usize {
    text.graphemes(true).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_splits_per_character() {
        let out: Vec<&str> = graphemes("abc").collect();
        assert_eq!(out, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_combining_marks_stay_with_base() {
        // "בְ" is a base letter plus a combining point: one cluster
        let out: Vec<&str> = graphemes("בְא").collect();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], "בְ");
        assert_eq!(out[1], "א");
    }

    #[test]
    fn test_count_matches_iteration() {
        assert_eq!(count_graphemes(""), 0);
        assert_eq!(count_graphemes("hello"), 5);
    }
}
