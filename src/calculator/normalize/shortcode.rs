//! Bracket shortcode removal (`[name attr="x"]inner[/name]`, `[name /]`).

use regex::Regex;

use crate::ports::ShortcodeRemover;

/// Removes paired shortcodes while keeping their inner text, then drops
/// self-closing ones.
///
/// Unpaired opening tags are left untouched.
#[derive(Debug, Clone)]
pub struct BracketShortcodes {
    /// Opening tag; group 1 is the shortcode name
    open: Regex,
    /// `[name ... /]`
    self_closing: Regex,
}

impl BracketShortcodes {
    /// Compiles the shortcode patterns.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            open: Regex::new(r"\[([A-Za-z0-9_-]+)(?:\s[^\]]*)?\]")?,
            self_closing: Regex::new(r"\[[A-Za-z0-9_-]+(?:\s[^\]]*)?/\]")?,
        })
    }

    /// Unwraps the first paired shortcode, or `None` when there is none left.
    fn unwrap_first_pair(&self, content: &str) -> Option<String> {
        self.open.captures_iter(content).find_map(|caps| {
            let open = caps.get(0)?;
            let name = caps.get(1)?.as_str();
            let closing = format!("[/{name}]");
            let rest = content.get(open.end()..)?;
            let inner_len = find_ascii_case_insensitive(rest, &closing)?;

            let before = content.get(..open.start())?;
            let inner = rest.get(..inner_len)?;
            let after = rest.get(inner_len + closing.len()..)?;
            Some(format!("{before}{inner}{after}"))
        })
    }
}

impl ShortcodeRemover for BracketShortcodes {
    fn strip(&self, content: &str) -> String {
        let mut current = content.to_owned();
        let mut unwrapped = 0_usize;
        while let Some(next) = self.unwrap_first_pair(&current) {
            current = next;
            unwrapped += 1;
        }
        tracing::trace!(unwrapped, "Unwrapped paired shortcodes");

        self.self_closing.replace_all(&current, "").into_owned()
    }
}

/// Byte offset of the first ASCII case-insensitive occurrence of `needle`.
fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[fixture]
    fn shortcodes() -> BracketShortcodes {
        BracketShortcodes::new().unwrap()
    }

    #[rstest]
    #[case::paired("[b]bold[/b] text", "bold text")]
    #[case::with_attributes(r#"[caption id="1" align="left"]A photo[/caption]"#, "A photo")]
    #[case::nested("[row][col]one[/col][col]two[/col][/row]", "onetwo")]
    #[case::closing_case_insensitive("[Note]hi[/NOTE]", "hi")]
    #[case::self_closing(r#"before [gallery ids="1,2" /] after"#, "before  after")]
    #[case::unpaired_open_kept("[gallery ids=1] text", "[gallery ids=1] text")]
    #[case::multiline("[quote]line one\nline two[/quote]", "line one\nline two")]
    #[case::no_shortcodes("plain [ text", "plain [ text")]
    fn strip(shortcodes: BracketShortcodes, #[case] input: &str, #[case] expected: &str) {
        assert_that!(shortcodes.strip(input), eq(expected));
    }

    #[rstest]
    fn unpaired_open_does_not_block_later_pairs(shortcodes: BracketShortcodes) {
        assert_that!(shortcodes.strip("[img] and [em]kept[/em]"), eq("[img] and kept"));
    }
}
