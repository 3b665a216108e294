//! Tests for the edit-session state machine.

use super::*;
use crate::error::ConfigError;
use crate::models::{FieldConfig, Serializer};

// ============================================================================
// Helpers
// ============================================================================

#[derive(Default)]
struct Recorder {
    successes: Vec<Response>,
    failures: Vec<SubmitFailure>,
    load_errors: Vec<TransportError>,
}

impl SessionHooks for Recorder {
    fn on_success(&mut self, response: &Response) {
        self.successes.push(response.clone());
    }

    fn on_failure(&mut self, failure: &SubmitFailure) {
        self.failures.push(failure.clone());
    }

    fn on_load_error(&mut self, error: &TransportError) {
        self.load_errors.push(error.clone());
    }
}

fn session() -> EditSession {
    EditSession::new(FieldConfig::new("city", "/cities/1"), "Lyon").unwrap()
}

fn editing(text: &str) -> EditSession {
    let mut s = session();
    assert_eq!(s.activate(Trigger::Element), None);
    s.edit(text);
    s
}

// ============================================================================
// Activation
// ============================================================================

#[test]
fn test_activation_seeds_form_with_displayed_value() {
    let mut s = session();
    assert_eq!(s.activate(Trigger::Element), None);
    assert_eq!(s.state(), EditState::Editing);
    assert_eq!(s.draft(), "Lyon");
    assert!(s.form_visible());
}

#[test]
fn test_external_control_needs_configuration() {
    let mut s = session();
    assert_eq!(s.activate(Trigger::ExternalControl), None);
    assert_eq!(s.state(), EditState::Display);

    let config = FieldConfig::new("city", "/cities/1").with_external_control("edit_city");
    let mut s = EditSession::new(config, "Lyon").unwrap();
    s.activate(Trigger::ExternalControl);
    assert_eq!(s.state(), EditState::Editing);
}

#[test]
fn test_session_requires_valid_config() {
    let err = EditSession::new(FieldConfig::new("city", ""), "Lyon").unwrap_err();
    assert_eq!(err, ConfigError::MissingSubmitUrl("city".into()));
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_url_goes_through_loading() {
    let config = FieldConfig::new("bio", "/bio").with_load_value_url("/bio/raw");
    let mut s = EditSession::new(config, "<b>Hi</b>").unwrap();

    assert_eq!(
        s.activate(Trigger::Element),
        Some(Request::Load {
            url: "/bio/raw".into()
        })
    );
    assert_eq!(s.state(), EditState::Loading);

    s.complete_load(Ok("**Hi**".into()), &mut ());
    assert_eq!(s.state(), EditState::Editing);
    assert_eq!(s.draft(), "**Hi**");
}

#[test]
fn test_load_failure_returns_to_display() {
    let config = FieldConfig::new("bio", "/bio").with_load_value_url("/bio/raw");
    let mut s = EditSession::new(config, "Hi").unwrap();
    let mut hooks = Recorder::default();

    s.activate(Trigger::Element);
    s.complete_load(Err(TransportError::Request("timeout".into())), &mut hooks);

    assert_eq!(s.state(), EditState::Display);
    assert_eq!(s.displayed(), "Hi");
    assert_eq!(hooks.load_errors.len(), 1);
}

#[test]
fn test_triggers_ignored_while_loading() {
    let config = FieldConfig::new("bio", "/bio").with_load_value_url("/bio/raw");
    let mut s = EditSession::new(config, "Hi").unwrap();

    assert!(s.activate(Trigger::Element).is_some());
    assert_eq!(s.activate(Trigger::Element), None);
    assert_eq!(s.save(), None);
    assert_eq!(s.state(), EditState::Loading);
}

#[test]
fn test_cancel_while_loading_drops_late_result() {
    let config = FieldConfig::new("bio", "/bio").with_load_value_url("/bio/raw");
    let mut s = EditSession::new(config, "Hi").unwrap();
    let mut hooks = Recorder::default();

    assert!(s.activate(Trigger::Element).is_some());
    assert!(s.cancel());
    assert_eq!(s.state(), EditState::Display);
    assert_eq!(s.displayed(), "Hi");

    s.complete_load(Ok("late value".into()), &mut hooks);
    assert_eq!(s.state(), EditState::Display);
    assert_eq!(s.draft(), "");
    assert!(hooks.load_errors.is_empty());

    // the next activation issues a fresh load
    assert_eq!(
        s.activate(Trigger::Element),
        Some(Request::Load {
            url: "/bio/raw".into()
        })
    );
}

#[test]
fn test_reactivation_waits_on_pending_load() {
    let config = FieldConfig::new("bio", "/bio").with_load_value_url("/bio/raw");
    let mut s = EditSession::new(config, "Hi").unwrap();

    assert!(s.activate(Trigger::Element).is_some());
    assert!(s.cancel());

    // still one load outstanding, so no second request goes out
    assert_eq!(s.activate(Trigger::Element), None);
    assert_eq!(s.state(), EditState::Loading);

    s.complete_load(Ok("**Hi**".into()), &mut ());
    assert_eq!(s.state(), EditState::Editing);
    assert_eq!(s.draft(), "**Hi**");
}

// ============================================================================
// Submitting
// ============================================================================

#[test]
fn test_save_builds_submit_request() {
    let mut s = editing("Paris");
    assert_eq!(
        s.save(),
        Some(Request::Submit {
            url: "/cities/1".into(),
            method: None,
            payload: "value=Paris".into(),
        })
    );
    assert_eq!(s.state(), EditState::Submitting);
}

#[test]
fn test_save_uses_serializer_token_and_method() {
    let config = FieldConfig::new("city", "/cities/1.json")
        .with_serializer(Serializer::Param("city[name]".into()))
        .with_authenticity_token("tok")
        .with_request_option("method", "put");
    let mut s = EditSession::new(config, "Lyon").unwrap();
    s.activate(Trigger::Element);
    s.edit("Paris");

    assert_eq!(
        s.save(),
        Some(Request::Submit {
            url: "/cities/1.json".into(),
            method: Some("put".into()),
            payload: "city%5Bname%5D=Paris&authenticity_token=tok".into(),
        })
    );
}

#[test]
fn test_successful_submit_updates_display_once() {
    let mut s = editing("paris");
    let mut hooks = Recorder::default();
    s.save();

    let outcome = s.complete_submit(Ok(Response::new(200, "Paris")), &mut hooks);

    assert_eq!(outcome, SubmitOutcome::Updated("Paris".into()));
    assert_eq!(s.state(), EditState::Display);
    assert_eq!(s.displayed(), "Paris");
    assert_eq!(hooks.successes.len(), 1);
    assert!(hooks.failures.is_empty());
}

#[test]
fn test_any_2xx_is_success() {
    let mut s = editing("Paris");
    s.save();
    let outcome = s.complete_submit(Ok(Response::new(204, "")), &mut ());
    assert_eq!(outcome, SubmitOutcome::Updated(String::new()));
}

#[test]
fn test_rejected_submit_keeps_form_and_value() {
    let mut s = editing("");
    let mut hooks = Recorder::default();
    s.save();

    let outcome = s.complete_submit(Ok(Response::new(422, "can't be blank")), &mut hooks);

    assert_eq!(
        outcome,
        SubmitOutcome::Failed(SubmitFailure::Rejected {
            body: "can't be blank".into()
        })
    );
    assert_eq!(s.state(), EditState::Editing);
    assert!(s.form_visible());
    assert_eq!(s.draft(), "");
    assert_eq!(s.displayed(), "Lyon");
    assert_eq!(hooks.failures.len(), 1);
    assert!(hooks.successes.is_empty());
}

#[test]
fn test_failed_submit_keeps_entered_text() {
    let mut s = editing("Marseille");
    let mut hooks = Recorder::default();
    s.save();
    s.complete_submit(Err(TransportError::Request("offline".into())), &mut hooks);

    assert_eq!(s.state(), EditState::Editing);
    assert_eq!(s.draft(), "Marseille");
    assert_eq!(s.displayed(), "Lyon");
    assert!(matches!(hooks.failures[..], [SubmitFailure::Transport(_)]));

    // no silent retry: the next request only comes from another save
    assert!(s.save().is_some());
}

#[test]
fn test_script_response_leaves_display_alone() {
    let config = FieldConfig::new("city", "/cities/1").eval_response_as_script(true);
    let mut s = EditSession::new(config, "Lyon").unwrap();
    s.activate(Trigger::Element);
    s.save();

    let outcome = s.complete_submit(Ok(Response::new(200, "highlight()")), &mut ());
    assert_eq!(outcome, SubmitOutcome::Script("highlight()".into()));
    assert_eq!(s.displayed(), "Lyon");
    assert_eq!(s.state(), EditState::Display);
}

#[test]
fn test_no_second_request_while_submitting() {
    let mut s = editing("Paris");
    assert!(s.save().is_some());

    assert_eq!(s.activate(Trigger::Element), None);
    assert_eq!(s.save(), None);
    assert!(!s.cancel());
    assert_eq!(s.state(), EditState::Submitting);
}

#[test]
fn test_stray_completion_is_ignored() {
    let mut s = session();
    let mut hooks = Recorder::default();
    let outcome = s.complete_submit(Ok(Response::new(200, "x")), &mut hooks);
    assert_eq!(outcome, SubmitOutcome::Ignored);
    assert_eq!(s.displayed(), "Lyon");
    assert!(hooks.successes.is_empty());
}

// ============================================================================
// Cancel & reuse
// ============================================================================

#[test]
fn test_cancel_restores_pre_edit_value() {
    let mut s = editing("something else");
    assert!(s.cancel());
    assert_eq!(s.state(), EditState::Display);
    assert_eq!(s.displayed(), "Lyon");
    assert!(!s.form_visible());
}

#[test]
fn test_session_is_reusable() {
    let mut s = session();
    for city in ["Paris", "Nice", "Lille"] {
        s.activate(Trigger::Element);
        s.edit(city);
        s.save();
        s.complete_submit(Ok(Response::new(200, city)), &mut ());
        assert_eq!(s.displayed(), city);
    }
}
