//! Data models for in-place editor fields.
//!
//! `FieldConfig` is the declarative input of the renderer; everything else in
//! this module is a piece of it.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_CANCEL_TEXT: &str = "cancel";
pub const DEFAULT_SAVE_TEXT: &str = "ok";
pub const DEFAULT_LOADING_TEXT: &str = "Loading...";
pub const DEFAULT_SAVING_TEXT: &str = "Saving...";
pub const DEFAULT_CLICK_TO_EDIT_TEXT: &str = "Click to edit";

/// Name of the form field the client widget puts the edited value in.
pub const VALUE_PARAM: &str = "value";

/// Request parameter carrying the host's anti-forgery token.
pub const TOKEN_PARAM: &str = "authenticity_token";

// ============================================================================
// Editor Mode
// ============================================================================

/// One entry of a collection editor: submitted value and visible label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice(pub String, pub String);

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Choice(value.into(), label.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn label(&self) -> &str {
        &self.1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Text input, or a textarea when more than one row is requested.
    #[default]
    Single,
    /// Select box over a fixed set of choices.
    Collection(Vec<Choice>),
}

impl EditorMode {
    /// Client-side widget class driving this mode.
    pub fn widget_class(&self) -> &'static str {
        match self {
            EditorMode::Single => "InPlaceEditor",
            EditorMode::Collection(_) => "InPlaceCollectionEditor",
        }
    }
}

// ============================================================================
// Form State & Serializer
// ============================================================================

/// Fields of the edit form at the moment the user hits save.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub fields: Vec<(String, String)>,
}

impl FormState {
    /// A form holding only the edited value, which is what the widget builds.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            fields: vec![(VALUE_PARAM.to_string(), value.into())],
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// The edited value, or an empty string if the form has none.
    pub fn value(&self) -> &str {
        self.fields
            .iter()
            .find(|(name, _)| name == VALUE_PARAM)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }
}

/// How the edit form is turned into the submit payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Serializer {
    /// Every form field, url-encoded.
    #[default]
    AllFields,
    /// Only the edited value, sent under the given parameter name
    /// (e.g. `user[name]`).
    Param(String),
}

impl Serializer {
    /// Build the url-encoded payload for `form`, appending the token if any.
    pub fn serialize(&self, form: &FormState, token: Option<&str>) -> String {
        let mut pairs: Vec<String> = match self {
            Serializer::AllFields => form
                .fields
                .iter()
                .map(|(name, value)| encode_pair(name, value))
                .collect(),
            Serializer::Param(name) => vec![encode_pair(name, form.value())],
        };
        if let Some(token) = token {
            pairs.push(encode_pair(TOKEN_PARAM, token));
        }
        pairs.join("&")
    }

    /// Client-side equivalent of [`Serializer::serialize`] as a JS function
    /// expression taking `(form, value)`.
    ///
    /// Returns `None` when the widget's built-in serialization already does
    /// the job.
    pub fn to_js(&self, token: Option<&str>) -> Option<String> {
        let mut body = match self {
            Serializer::AllFields if token.is_none() => return None,
            Serializer::AllFields => "Form.serialize(form)".to_string(),
            Serializer::Param(name) => format!(
                "{} + encodeURIComponent(value)",
                crate::descriptor::js_string(&format!("{}=", urlencoding::encode(name)))
            ),
        };
        if let Some(token) = token {
            body.push_str(&format!(
                " + '&{}=' + encodeURIComponent({})",
                TOKEN_PARAM,
                crate::descriptor::js_string(token)
            ));
        }
        Some(format!("function(form, value) {{ return {}; }}", body))
    }
}

fn encode_pair(name: &str, value: &str) -> String {
    format!("{}={}", urlencoding::encode(name), urlencoding::encode(value))
}

/// A JavaScript function expression supplied by the host, passed to the
/// client widget verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsFunction(String);

impl JsFunction {
    pub fn new(source: impl Into<String>) -> Self {
        JsFunction(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Display Texts
// ============================================================================

/// The five default-bearing display strings, resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayTexts {
    pub cancel_text: String,
    #[serde(rename = "okText")]
    pub save_text: String,
    pub loading_text: String,
    pub saving_text: String,
    pub click_to_edit_text: String,
}

impl Default for DisplayTexts {
    fn default() -> Self {
        Self {
            cancel_text: DEFAULT_CANCEL_TEXT.to_string(),
            save_text: DEFAULT_SAVE_TEXT.to_string(),
            loading_text: DEFAULT_LOADING_TEXT.to_string(),
            saving_text: DEFAULT_SAVING_TEXT.to_string(),
            click_to_edit_text: DEFAULT_CLICK_TO_EDIT_TEXT.to_string(),
        }
    }
}

// ============================================================================
// Field Config
// ============================================================================

/// Configuration of one editable field. Built once at render time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldConfig {
    pub target_id: String,
    pub submit_url: String,
    pub mode: EditorMode,
    pub rows: Option<u32>,
    pub cols: Option<u32>,
    pub size: Option<u32>,
    pub cancel_text: Option<String>,
    pub save_text: Option<String>,
    pub loading_text: Option<String>,
    pub saving_text: Option<String>,
    pub click_to_edit_text: Option<String>,
    pub text_between_controls: Option<String>,
    pub external_control_id: Option<String>,
    pub load_value_url: Option<String>,
    pub serializer: Serializer,
    pub on_success: Option<JsFunction>,
    pub on_failure: Option<JsFunction>,
    pub eval_response_as_script: bool,
    pub extra_request_options: Map<String, Value>,
    pub authenticity_token: Option<String>,
}

impl FieldConfig {
    pub fn new(target_id: impl Into<String>, submit_url: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            submit_url: submit_url.into(),
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: EditorMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_collection(self, choices: Vec<Choice>) -> Self {
        self.with_mode(EditorMode::Collection(choices))
    }

    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn with_cols(mut self, cols: u32) -> Self {
        self.cols = Some(cols);
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = Some(text.into());
        self
    }

    pub fn with_save_text(mut self, text: impl Into<String>) -> Self {
        self.save_text = Some(text.into());
        self
    }

    pub fn with_loading_text(mut self, text: impl Into<String>) -> Self {
        self.loading_text = Some(text.into());
        self
    }

    pub fn with_saving_text(mut self, text: impl Into<String>) -> Self {
        self.saving_text = Some(text.into());
        self
    }

    pub fn with_click_to_edit_text(mut self, text: impl Into<String>) -> Self {
        self.click_to_edit_text = Some(text.into());
        self
    }

    pub fn with_text_between_controls(mut self, text: impl Into<String>) -> Self {
        self.text_between_controls = Some(text.into());
        self
    }

    pub fn with_external_control(mut self, id: impl Into<String>) -> Self {
        self.external_control_id = Some(id.into());
        self
    }

    pub fn with_load_value_url(mut self, url: impl Into<String>) -> Self {
        self.load_value_url = Some(url.into());
        self
    }

    pub fn with_serializer(mut self, serializer: Serializer) -> Self {
        self.serializer = serializer;
        self
    }

    pub fn on_success(mut self, callback: JsFunction) -> Self {
        self.on_success = Some(callback);
        self
    }

    pub fn on_failure(mut self, callback: JsFunction) -> Self {
        self.on_failure = Some(callback);
        self
    }

    pub fn eval_response_as_script(mut self, eval: bool) -> Self {
        self.eval_response_as_script = eval;
        self
    }

    /// Pass-through option for the transport, e.g. `("method", "put")`.
    pub fn with_request_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra_request_options.insert(key.into(), value.into());
        self
    }

    pub fn with_authenticity_token(mut self, token: impl Into<String>) -> Self {
        self.authenticity_token = Some(token.into());
        self
    }

    /// Display strings with defaults applied.
    pub fn texts(&self) -> DisplayTexts {
        let defaults = DisplayTexts::default();
        DisplayTexts {
            cancel_text: self.cancel_text.clone().unwrap_or(defaults.cancel_text),
            save_text: self.save_text.clone().unwrap_or(defaults.save_text),
            loading_text: self.loading_text.clone().unwrap_or(defaults.loading_text),
            saving_text: self.saving_text.clone().unwrap_or(defaults.saving_text),
            click_to_edit_text: self
                .click_to_edit_text
                .clone()
                .unwrap_or(defaults.click_to_edit_text),
        }
    }

    /// HTTP method requested through the pass-through options, if any.
    pub fn request_method(&self) -> Option<&str> {
        self.extra_request_options
            .get("method")
            .and_then(Value::as_str)
    }

    /// Check the caller-supplied parts the renderer depends on.
    pub fn validate(&self) -> Result<()> {
        if self.target_id.trim().is_empty() {
            return Err(ConfigError::EmptyTargetId);
        }
        if self.submit_url.trim().is_empty() {
            return Err(ConfigError::MissingSubmitUrl(self.target_id.clone()));
        }
        if let EditorMode::Collection(choices) = &self.mode {
            if choices.is_empty() {
                return Err(ConfigError::EmptyCollection(self.target_id.clone()));
            }
        }
        Ok(())
    }
}
