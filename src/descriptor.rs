//! Config → descriptor translation.
//!
//! The descriptor is what the client widget's constructor receives. Each
//! option key is produced by one row of `OPTION_TABLE`; a row yields `None`
//! when the option is absent, and absent options are left out of the
//! emitted object so the widget applies its own defaults.

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::Result;
use crate::models::FieldConfig;

/// A resolved option value, kept typed until it is written out as JS.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Text(String),
    Number(u32),
    Bool(bool),
    Json(Value),
    /// A JavaScript function expression, emitted as-is.
    Function(String),
}

impl OptionValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }

    fn to_js(&self) -> String {
        match self {
            OptionValue::Text(s) => js_string(s),
            OptionValue::Number(n) => n.to_string(),
            OptionValue::Bool(b) => b.to_string(),
            OptionValue::Json(v) => js_value(v),
            OptionValue::Function(src) => src.clone(),
        }
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            OptionValue::Text(s) | OptionValue::Function(s) => serializer.serialize_str(s),
            OptionValue::Number(n) => serializer.serialize_u32(*n),
            OptionValue::Bool(b) => serializer.serialize_bool(*b),
            OptionValue::Json(v) => v.serialize(serializer),
        }
    }
}

type OptionRow = (&'static str, fn(&FieldConfig) -> Option<OptionValue>);

const OPTION_TABLE: &[OptionRow] = &[
    ("collection", |c| match &c.mode {
        crate::models::EditorMode::Collection(choices) => {
            serde_json::to_value(choices).ok().map(OptionValue::Json)
        }
        crate::models::EditorMode::Single => None,
    }),
    ("cancelText", |c| Some(OptionValue::Text(c.texts().cancel_text))),
    ("okText", |c| Some(OptionValue::Text(c.texts().save_text))),
    ("loadingText", |c| Some(OptionValue::Text(c.texts().loading_text))),
    ("savingText", |c| Some(OptionValue::Text(c.texts().saving_text))),
    ("rows", |c| c.rows.map(OptionValue::Number)),
    ("cols", |c| c.cols.map(OptionValue::Number)),
    ("size", |c| c.size.map(OptionValue::Number)),
    ("externalControl", |c| {
        c.external_control_id.clone().map(OptionValue::Text)
    }),
    ("loadTextURL", |c| c.load_value_url.clone().map(OptionValue::Text)),
    ("ajaxOptions", |c| {
        if c.extra_request_options.is_empty() {
            None
        } else {
            Some(OptionValue::Json(Value::Object(c.extra_request_options.clone())))
        }
    }),
    ("htmlResponse", |c| {
        c.eval_response_as_script.then_some(OptionValue::Bool(false))
    }),
    ("callback", |c| {
        c.serializer
            .to_js(c.authenticity_token.as_deref())
            .map(OptionValue::Function)
    }),
    ("onComplete", |c| {
        c.on_success
            .as_ref()
            .map(|f| OptionValue::Function(f.as_str().to_string()))
    }),
    ("onFailure", |c| {
        c.on_failure
            .as_ref()
            .map(|f| OptionValue::Function(f.as_str().to_string()))
    }),
    ("clickToEditText", |c| {
        Some(OptionValue::Text(c.texts().click_to_edit_text))
    }),
    ("textBetweenControls", |c| {
        c.text_between_controls.clone().map(OptionValue::Text)
    }),
];

/// Option keys that are always present, carrying a literal default.
pub const DEFAULTED_KEYS: [&str; 5] = [
    "cancelText",
    "okText",
    "loadingText",
    "savingText",
    "clickToEditText",
];

/// Resolved description of one widget instance.
///
/// Serializes as `{widgetClass, targetId, submitUrl, options: {key: value}}`;
/// function options appear as their source text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    pub widget_class: &'static str,
    pub target_id: String,
    pub submit_url: String,
    #[serde(serialize_with = "serialize_options")]
    pub options: Vec<(&'static str, OptionValue)>,
}

fn serialize_options<S: Serializer>(
    options: &[(&'static str, OptionValue)],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_map(options.iter().map(|(key, value)| (*key, value)))
}

impl Descriptor {
    /// Resolve `config` into a descriptor. Fails on caller errors only.
    pub fn from_config(config: &FieldConfig) -> Result<Self> {
        config.validate()?;

        let options = OPTION_TABLE
            .iter()
            .filter_map(|(key, resolve)| resolve(config).map(|value| (*key, value)))
            .collect();

        Ok(Self {
            widget_class: config.mode.widget_class(),
            target_id: config.target_id.clone(),
            submit_url: config.submit_url.clone(),
            options,
        })
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.options
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.options.iter().map(|(k, _)| *k).collect()
    }

    /// The options object literal, e.g. `{cancelText:"cancel", okText:"ok"}`.
    pub fn options_js(&self) -> String {
        let entries: Vec<String> = self
            .options
            .iter()
            .map(|(key, value)| format!("{}:{}", key, value.to_js()))
            .collect();
        format!("{{{}}}", entries.join(", "))
    }

    /// The widget constructor call.
    pub fn to_js(&self) -> String {
        let mut js = format!(
            "new Ajax.{}({}, {}",
            self.widget_class,
            js_string(&self.target_id),
            js_string(&self.submit_url)
        );
        if !self.options.is_empty() {
            js.push_str(", ");
            js.push_str(&self.options_js());
        }
        js.push(')');
        js
    }
}

/// Quote `s` as a JS string literal that is safe inside a `<script>` block.
///
/// Every `<` becomes `\u003c`, so no literal can open a comment or close
/// the surrounding script element.
pub fn js_string(s: &str) -> String {
    let quoted = serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string());
    escape_for_script(&quoted)
}

fn js_value(v: &Value) -> String {
    let json = serde_json::to_string(v).unwrap_or_else(|_| "null".to_string());
    escape_for_script(&json)
}

fn escape_for_script(json: &str) -> String {
    json.replace('<', "\\u003c")
}

#[cfg(test)]
#[path = "descriptor_test.rs"]
mod descriptor_test;
