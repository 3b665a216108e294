//! HTTP route handlers for the demo settings page.
//!
//! The page shows three settings, each wired up a different way: a plain
//! field posting back text, a JSON resource field, and a collection field.

use crate::models::{Choice, FieldConfig};
use crate::templates::{
    base_html, field_list, html_escape, in_place_editor_field, prioritized_choices,
    rest_in_place_editor_field, FieldRef, TagOptions,
};
use crate::{AppState, RECORD_ID, SETTINGS_OBJECT};
use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

const TIME_ZONES: &[(&str, &str)] = &[
    ("UTC", "(GMT+00:00) UTC"),
    ("London", "(GMT+00:00) London"),
    ("Paris", "(GMT+01:00) Paris"),
    ("Berlin", "(GMT+01:00) Berlin"),
    ("Tokyo", "(GMT+09:00) Tokyo"),
    ("Eastern Time (US & Canada)", "(GMT-05:00) Eastern Time (US & Canada)"),
    ("Pacific Time (US & Canada)", "(GMT-08:00) Pacific Time (US & Canada)"),
];

const PRIORITY_ZONES: &[&str] = &["UTC", "Paris"];

// ============================================================================
// Index Handler
// ============================================================================

pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    match settings_html(&state) {
        Ok(content) => Html(base_html("Settings", &content)).into_response(),
        Err(e) => {
            warn!(error = %e, "failed to render settings page");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

fn time_zone_choices() -> Vec<Choice> {
    let all: Vec<Choice> = TIME_ZONES
        .iter()
        .map(|(value, label)| Choice::new(*value, *label))
        .collect();
    let priority: Vec<Choice> = all
        .iter()
        .filter(|c| PRIORITY_ZONES.iter().any(|zone| *zone == c.value()))
        .cloned()
        .collect();
    prioritized_choices(&priority, &all)
}

fn setting_field<'a>(attribute: &'a str, value: &'a str) -> FieldRef<'a> {
    FieldRef {
        object: SETTINGS_OBJECT,
        attribute,
        record_id: RECORD_ID,
        value,
    }
}

fn settings_html(state: &AppState) -> crate::error::Result<String> {
    let token = state.authenticity_token.as_str();

    let city = state.get("city");
    let motto = state.get("motto");
    let time_zone = state.get("time_zone");

    let city_field = setting_field("city", &city);
    let city_html = in_place_editor_field(
        &city_field,
        &TagOptions::default(),
        FieldConfig::new("", "/field/city")
            .with_size(30)
            .with_external_control("edit_city")
            .with_authenticity_token(token),
    )?;

    let motto_field = setting_field("motto", &motto);
    let motto_html = rest_in_place_editor_field(
        &motto_field,
        "/api/field/motto",
        &TagOptions::default().with_tag("div"),
        FieldConfig::default()
            .with_rows(3)
            .with_cols(40)
            .with_load_value_url("/field/motto/raw")
            .with_save_text("Save")
            .with_authenticity_token(token),
    )?;

    let time_zone_field = setting_field("time_zone", &time_zone);
    let time_zone_html = in_place_editor_field(
        &time_zone_field,
        &TagOptions::default(),
        FieldConfig::new("", "/field/time_zone")
            .with_collection(time_zone_choices())
            .with_authenticity_token(token),
    )?;

    Ok(field_list(&[
        (
            "City".to_string(),
            format!(
                "{}<a id=\"edit_city\" class=\"edit-link\" href=\"#\">edit</a>",
                city_html
            ),
        ),
        ("Motto".to_string(), motto_html),
        ("Time zone".to_string(), time_zone_html),
    ]))
}

// ============================================================================
// Update Handlers
// ============================================================================

fn check_token(state: &AppState, params: &HashMap<String, String>) -> Result<(), Response> {
    match params.get(crate::models::TOKEN_PARAM) {
        Some(token) if *token == state.authenticity_token => Ok(()),
        _ => Err((StatusCode::FORBIDDEN, "Invalid authenticity token").into_response()),
    }
}

/// Plain update: `value=<text>` in, escaped display text out.
pub async fn update_field(
    Path(key): Path<String>,
    State(state): State<Arc<AppState>>,
    Form(params): Form<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = check_token(&state, &params) {
        return resp;
    }
    if !state.has(&key) {
        return (StatusCode::NOT_FOUND, "Setting not found").into_response();
    }

    let value = params
        .get(crate::models::VALUE_PARAM)
        .map(|v| v.trim().to_string())
        .unwrap_or_default();
    if value.is_empty() {
        return (StatusCode::UNPROCESSABLE_ENTITY, "can't be blank").into_response();
    }

    state.set(&key, &value);
    info!(setting = %key, "updated setting");
    (StatusCode::OK, html_escape(&value)).into_response()
}

/// JSON update: `setting[<key>]=<text>` in, `{"setting": {<key>: ..}}` out.
pub async fn update_field_json(
    Path(resource): Path<String>,
    State(state): State<Arc<AppState>>,
    Form(params): Form<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = check_token(&state, &params) {
        return resp;
    }
    let key = resource.strip_suffix(".json").unwrap_or(&resource).to_string();
    if !state.has(&key) {
        return (StatusCode::NOT_FOUND, "Setting not found").into_response();
    }

    let param = format!("{}[{}]", SETTINGS_OBJECT, key);
    let value = params
        .get(&param)
        .map(|v| v.trim().to_string())
        .unwrap_or_default();
    if value.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "errors": { key.as_str(): ["can't be blank"] } })),
        )
            .into_response();
    }

    state.set(&key, &value);
    info!(setting = %key, "updated setting");
    Json(json!({
        SETTINGS_OBJECT: {
            key.as_str(): value,
            "updated_at": Utc::now().to_rfc3339(),
        }
    }))
    .into_response()
}

/// Raw stored value, used to seed the edit form.
pub async fn raw_field(
    Path(key): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    if !state.has(&key) {
        return (StatusCode::NOT_FOUND, "Setting not found").into_response();
    }
    (StatusCode::OK, state.get(&key)).into_response()
}
