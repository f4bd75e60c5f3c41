//! Invisible character cleanup.

/// Strips byte order marks and C0 control characters and turns no-break
/// spaces into plain spaces.
///
/// Newlines and tabs are kept so they still separate words.
pub(super) fn clean(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\u{feff}' | '\u{fffe}' => None,
            '\u{a0}' => Some(' '),
            '\n' | '\t' => Some(c),
            c if c.is_ascii_control() => None,
            c => Some(c),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::bom("\u{feff}Hello", "Hello")]
    #[case::nbsp("a\u{a0}b", "a b")]
    #[case::control("a\u{0}b\u{7}c\u{7f}", "abc")]
    #[case::newline_kept("a\nb\tc", "a\nb\tc")]
    #[case::carriage_return("a\r\nb", "a\nb")]
    #[case::c1_kept("a\u{85}b", "a\u{85}b")]
    #[case::narrow_nbsp_kept("a\u{202f}b", "a\u{202f}b")]
    #[case::plain("日本語", "日本語")]
    fn cleans_invisible_characters(#[case] input: &str, #[case] expected: &str) {
        assert_that!(super::clean(input), eq(expected));
    }
}
