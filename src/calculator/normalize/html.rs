//! Markup removal that keeps the text of translatable attributes.

use regex::{
    Captures,
    Regex,
};
use scraper::Html;

/// Strips markup and collects translatable attribute values.
#[derive(Debug, Clone)]
pub(super) struct MarkupRule {
    /// `<input type="hidden">` elements
    hidden_input: Regex,
    /// `name="value"` / `name='value'` for the translatable attribute names
    attribute: Regex,
    /// Character references decoded before stripping
    entity: Regex,
    /// `<!-- ... -->`
    comment: Regex,
    /// `<style>...</style>`
    style: Regex,
    /// `<script>...</script>`
    script: Regex,
    /// Any remaining tag
    tag: Regex,
}

impl MarkupRule {
    /// Compiles the rule for the given attribute names.
    pub(super) fn new<S: AsRef<str>>(attributes: &[S]) -> Result<Self, regex::Error> {
        let names =
            attributes.iter().map(|name| regex::escape(name.as_ref())).collect::<Vec<_>>().join("|");

        Ok(Self {
            hidden_input: Regex::new(r#"(?i)<input\b[^>]*\btype=["']?hidden["']?[^>]*>"#)?,
            attribute: Regex::new(&format!(
                r#"(?i)\b(?:{names})\s*=\s*(?:"([^"]*)"|'([^']*)')"#
            ))?,
            entity: Regex::new(r"&(?:#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]{1,31});")?,
            comment: Regex::new(r"(?s)<!--.*?-->")?,
            style: Regex::new(r"(?is)<style.*?</style>")?,
            script: Regex::new(r"(?is)<script.*?</script>")?,
            tag: Regex::new(r"<[a-zA-Z/!?][^>]*>")?,
        })
    }

    /// Removes hidden inputs and all markup, then appends the attribute texts.
    pub(super) fn apply(&self, html: &str) -> String {
        let html = self.hidden_input.replace_all(html, "");
        let attributes = self.attribute_texts(&html);

        let html = self.decode_entities(&html);
        let html = self.comment.replace_all(&html, "");
        let html = self.style.replace_all(&html, "");
        let html = self.script.replace_all(&html, "");
        let html = self.tag.replace_all(&html, "");

        format!("{html} {}", attributes.join(" "))
    }

    /// Values of the translatable attributes in document order.
    fn attribute_texts(&self, html: &str) -> Vec<String> {
        self.attribute
            .captures_iter(html)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|value| self.decode_entities(value.as_str().trim()))
            .collect()
    }

    /// Replaces named and numeric character references; unknown ones are kept.
    fn decode_entities(&self, text: &str) -> String {
        self.entity
            .replace_all(text, |caps: &Captures<'_>| {
                caps.get(0).map_or_else(String::new, |reference| decode_entity(reference.as_str()))
            })
            .into_owned()
    }
}

/// Text of one `&...;` reference as an HTML parser reads it.
///
/// A reference the parser only matches by a shorter legacy prefix
/// (`&notit;` read as `&not` + `it;`) is not a reference and stays verbatim.
fn decode_entity(reference: &str) -> String {
    let decoded = Html::parse_fragment(reference).root_element().text().collect::<String>();
    if decoded.is_empty() || (decoded.ends_with(';') && decoded.chars().count() > 1) {
        return reference.to_owned();
    }
    decoded
}
