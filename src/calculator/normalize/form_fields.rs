//! Form-builder merge tags such as `{field:email}` and `{all_fields_table}`.

use regex::Regex;

/// Removes form-builder merge tags.
#[derive(Debug, Clone)]
pub(super) struct FormFieldRule {
    /// Merge tag pattern
    tag: Regex,
}

impl FormFieldRule {
    /// Compiles the merge tag pattern.
    pub(super) fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            tag: Regex::new(r"(?i)\{[^{}\s:]+:[^{}]*?\}|\{all_fields_table\}|\{fields_table\}")?,
        })
    }

    /// Removes merge tags; surrounding text is kept.
    pub(super) fn apply(&self, text: &str) -> String {
        self.tag.replace_all(text, "").into_owned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::field("Hello {field:first_name}!", "Hello !")]
    #[case::system("Sent from {system:admin_email} today", "Sent from  today")]
    #[case::table("Summary: {all_fields_table}", "Summary: ")]
    #[case::fields_table("{FIELDS_TABLE}", "")]
    #[case::plain_braces("{not a tag}", "{not a tag}")]
    fn removes_merge_tags(#[case] input: &str, #[case] expected: &str) {
        assert_that!(FormFieldRule::new().unwrap().apply(input), eq(expected));
    }
}
