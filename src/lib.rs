//! In-place editor helpers.
//!
//! Renders a value as a read-only element plus the script that turns it
//! into an editable form, and models the resulting edit cycle so hosts can
//! drive it directly.
//!
//! - `models`: field configuration and its parts
//! - `descriptor`: configuration → widget descriptor mapping
//! - `templates`: HTML helpers
//! - `session`: edit-cycle state machine
//! - `transport`: request plumbing and the async editor driver
//! - `handlers`: demo settings page

use axum::{
    routing::{get, post},
    Router,
};
use rand::Rng;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tower_http::trace::TraceLayer;

pub mod descriptor;
pub mod error;
pub mod handlers;
pub mod models;
pub mod session;
pub mod templates;
pub mod transport;

// ============================================================================
// Configuration
// ============================================================================

/// Bind address for the demo server, overridable with `EDITOR_ADDR`.
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Object name the demo settings are stored under.
pub const SETTINGS_OBJECT: &str = "setting";

/// The demo has a single settings record.
pub const RECORD_ID: &str = "1";

pub fn bind_addr() -> String {
    std::env::var("EDITOR_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string())
}

// ============================================================================
// Application State
// ============================================================================

pub struct AppState {
    settings: Mutex<BTreeMap<String, String>>,
    /// Issued once per process and embedded in every rendered editor.
    pub authenticity_token: String,
}

impl AppState {
    pub fn new() -> Self {
        let settings = BTreeMap::from([
            ("city".to_string(), "Lyon".to_string()),
            ("motto".to_string(), "Make it work, then make it fast.".to_string()),
            ("time_zone".to_string(), "Paris".to_string()),
        ]);
        let authenticity_token: String = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();

        Self {
            settings: Mutex::new(settings),
            authenticity_token,
        }
    }

    fn settings(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.settings.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn has(&self, key: &str) -> bool {
        self.settings().contains_key(key)
    }

    /// Stored value, or an empty string for unknown keys.
    pub fn get(&self, key: &str) -> String {
        self.settings().get(key).cloned().unwrap_or_default()
    }

    pub fn set(&self, key: &str, value: &str) {
        self.settings().insert(key.to_string(), value.to_string());
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Routes of the demo settings page.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/field/{key}", post(handlers::update_field))
        .route("/field/{key}/raw", get(handlers::raw_field))
        .route(
            "/api/field/{resource}",
            post(handlers::update_field_json).put(handlers::update_field_json),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Re-export commonly used types
pub use descriptor::{Descriptor, OptionValue};
pub use error::{ConfigError, SubmitFailure, TransportError};
pub use models::{
    Choice, DisplayTexts, EditorMode, FieldConfig, FormState, JsFunction, Serializer,
};
pub use session::{EditSession, EditState, Request, Response, SessionHooks, SubmitOutcome, Trigger};
pub use templates::{
    in_place_editor, in_place_editor_field, prioritized_choices, render,
    rest_in_place_editor_field, FieldRef, RenderedField, TagOptions,
};
pub use transport::{HttpTransport, InPlaceEditor, Transport};
