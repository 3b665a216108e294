//! In-place editor helpers.
//!
//! `render` is the primitive: a read-only element holding the current value
//! plus the widget descriptor bound to it. The `*_field` helpers derive the
//! element id, submit URL and serializer from an object/attribute pair the
//! way a typical record-backed page wants them.

use crate::descriptor::{js_string, Descriptor};
use crate::error::Result;
use crate::models::{Choice, FieldConfig, JsFunction, Serializer};

use super::components::{content_tag, javascript_tag, TagOptions};

/// Placeholder choice separating priority entries from the rest.
pub const CHOICE_SEPARATOR: &str = "------";

// ============================================================================
// Render
// ============================================================================

/// Static markup and widget descriptor for one editable field.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedField {
    pub markup: String,
    pub descriptor: Descriptor,
}

impl RenderedField {
    /// Markup followed by the script that instantiates the widget.
    pub fn to_html(&self) -> String {
        format!("{}{}", self.markup, javascript_tag(&self.descriptor.to_js()))
    }
}

/// Render `value` as an editable element described by `config`.
///
/// The element id is always `config.target_id`, so the markup and the
/// descriptor agree; `tag.id` is only read by the `*_field` helpers, which
/// copy it into the config. No request is made; the returned descriptor is
/// all the client needs.
pub fn render(config: &FieldConfig, value: &str, tag: &TagOptions) -> Result<RenderedField> {
    let descriptor = Descriptor::from_config(config)?;
    let markup = content_tag(tag, &config.target_id, value)?;
    Ok(RenderedField { markup, descriptor })
}

/// Script turning the existing element `config.target_id` into an editor.
pub fn in_place_editor(config: &FieldConfig) -> Result<String> {
    let descriptor = Descriptor::from_config(config)?;
    Ok(javascript_tag(&descriptor.to_js()))
}

// ============================================================================
// Record-backed fields
// ============================================================================

/// An attribute of a stored record, as shown on a page.
#[derive(Debug, Clone, Copy)]
pub struct FieldRef<'a> {
    pub object: &'a str,
    pub attribute: &'a str,
    pub record_id: &'a str,
    pub value: &'a str,
}

impl FieldRef<'_> {
    pub fn dom_id(&self) -> String {
        format!(
            "{}_{}_{}_in_place_editor",
            self.object, self.attribute, self.record_id
        )
    }

    /// Request parameter name for this attribute, e.g. `user[name]`.
    pub fn param_name(&self) -> String {
        format!("{}[{}]", self.object, self.attribute)
    }

    fn set_action_url(&self) -> String {
        format!("set_{}_{}/{}", self.object, self.attribute, self.record_id)
    }
}

fn bind_target(field: &FieldRef<'_>, tag: &TagOptions, config: &mut FieldConfig) {
    config.target_id = tag.id.clone().unwrap_or_else(|| field.dom_id());
}

/// Editable field posting to `set_<object>_<attribute>/<id>` unless
/// `config` already names a submit URL.
pub fn in_place_editor_field(
    field: &FieldRef<'_>,
    tag: &TagOptions,
    mut config: FieldConfig,
) -> Result<String> {
    bind_target(field, tag, &mut config);
    if config.submit_url.trim().is_empty() {
        config.submit_url = field.set_action_url();
    }
    Ok(render(&config, field.value, tag)?.to_html())
}

/// Editable field updated through a JSON resource.
///
/// Sends `PUT <resource_url>.json` with only `<object>[<attribute>]` (plus
/// the token, if any) and, unless `config` supplies its own, installs a
/// completion callback that reads `<object>.<attribute>` from the JSON body
/// and highlights the element.
pub fn rest_in_place_editor_field(
    field: &FieldRef<'_>,
    resource_url: &str,
    tag: &TagOptions,
    mut config: FieldConfig,
) -> Result<String> {
    bind_target(field, tag, &mut config);
    if config.submit_url.trim().is_empty() {
        config.submit_url = format!("{}.json", resource_url);
    }
    config = config.with_request_option("method", "put");
    if config.serializer == Serializer::AllFields {
        config.serializer = Serializer::Param(field.param_name());
    }
    if config.on_success.is_none() {
        config.on_success = Some(json_update_callback(field.object, field.attribute));
    }
    Ok(render(&config, field.value, tag)?.to_html())
}

/// Completion callback for JSON responses shaped `{object: {attribute: v}}`.
pub fn json_update_callback(object: &str, attribute: &str) -> JsFunction {
    JsFunction::new(format!(
        r##"function(transport, element) {{
  if (transport && transport.status >= 200 && transport.status < 300) {{
    new Effect.Highlight(element.id, {{startcolor: "#00ffff"}});
    element.innerHTML = String(transport.responseText.evalJSON()[{object}][{attribute}]).escapeHTML();
  }} else {{
    new Effect.Highlight(element.id, {{startcolor: "red"}});
  }}
}}"##,
        object = js_string(object),
        attribute = js_string(attribute),
    ))
}

// ============================================================================
// Choices
// ============================================================================

/// Choices for a collection editor with `priority` entries listed first.
///
/// Priority entries are followed by a separator and then every remaining
/// entry of `all` in its original order.
pub fn prioritized_choices(priority: &[Choice], all: &[Choice]) -> Vec<Choice> {
    if priority.is_empty() {
        return all.to_vec();
    }
    let mut choices = priority.to_vec();
    choices.push(Choice::new(CHOICE_SEPARATOR, CHOICE_SEPARATOR));
    choices.extend(
        all.iter()
            .filter(|c| !priority.iter().any(|p| p.value() == c.value()))
            .cloned(),
    );
    choices
}
