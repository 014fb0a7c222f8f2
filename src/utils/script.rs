//! Script classification for directional typing
//!
//! The carriage advances left-to-right or right-to-left depending on the
//! script of the struck character. Classification is a fixed Unicode
//! range test: the machine ships right-to-left slugs for the Hebrew
//! block only, and anything it does not recognize types left-to-right.

/// Check whether a single character belongs to the Hebrew block
/// (U+0590..U+05FF), the one right-to-left script the machine supports.
pub fn is_rtl_char(c: char) -> bool {
    ('\u{0590}'..='\u{05FF}').contains(&c)
}

/// Classify a grapheme cluster by its first character.
///
/// Empty input and unrecognized scripts are left-to-right.
pub fn is_rtl(grapheme: &str) -> bool {
    grapheme.chars().next().map(is_rtl_char).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hebrew_letters_are_rtl() {
        assert!(is_rtl("א"));
        assert!(is_rtl("ש"));
        assert!(is_rtl("ת"));
    }

    #[test]
    fn test_latin_and_digits_are_ltr() {
        assert!(!is_rtl("a"));
        assert!(!is_rtl("Z"));
        assert!(!is_rtl("7"));
        assert!(!is_rtl("!"));
    }

    #[test]
    fn test_unrecognized_input_defaults_to_ltr() {
        assert!(!is_rtl(""));
        assert!(!is_rtl(" "));
        assert!(!is_rtl("愛")); // CJK is not classified
        assert!(!is_rtl("é"));
    }

    #[test]
    fn test_hebrew_points_count_as_rtl() {
        // Niqqud combining marks sit inside the same block
        assert!(is_rtl("\u{05B0}"));
        assert!(is_rtl("בְ"));
    }
}
