//! Small HTML building blocks shared by the field helpers and the demo page.

use crate::error::{ConfigError, Result};

// ============================================================================
// Escaping
// ============================================================================

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ============================================================================
// Tags
// ============================================================================

/// Options for the element wrapping an editable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOptions {
    pub tag: String,
    pub id: Option<String>,
    pub class: String,
    pub attributes: Vec<(String, String)>,
}

impl Default for TagOptions {
    fn default() -> Self {
        Self {
            tag: "span".to_string(),
            id: None,
            class: "in_place_editor_field".to_string(),
            attributes: Vec::new(),
        }
    }
}

impl TagOptions {
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }
}

/// Tag names are ASCII letters and digits, starting with a letter.
pub fn is_valid_tag_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

/// `<tag id=".." class=".." ...>escaped content</tag>`
///
/// `id` is the element id; `options.id` is not consulted here.
pub fn content_tag(options: &TagOptions, id: &str, content: &str) -> Result<String> {
    if !is_valid_tag_name(&options.tag) {
        return Err(ConfigError::InvalidTagName(options.tag.clone()));
    }
    let mut attrs = format!(r#" id="{}""#, html_escape(id));
    if !options.class.is_empty() {
        attrs.push_str(&format!(r#" class="{}""#, html_escape(&options.class)));
    }
    for (name, value) in &options.attributes {
        attrs.push_str(&format!(r#" {}="{}""#, html_escape(name), html_escape(value)));
    }
    Ok(format!(
        "<{tag}{attrs}>{content}</{tag}>",
        tag = options.tag,
        attrs = attrs,
        content = html_escape(content)
    ))
}

/// Inline script block in the CDATA-guarded form older parsers expect.
pub fn javascript_tag(js: &str) -> String {
    format!(
        "<script type=\"text/javascript\">\n//<![CDATA[\n{}\n//]]>\n</script>",
        js
    )
}
