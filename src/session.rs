//! Edit cycle of one in-place editor, as a sans-IO state machine.
//!
//! ```text
//! Display ──activate──▶ Loading ──load ok──▶ Editing ──save──▶ Submitting
//!    ▲  └──activate (no load URL)──────────────▲  │                 │
//!    │◀──────── load error / cancel ───────────┘  │                 │
//!    │◀────────────────── cancel ─────────────────┘                 │
//!    │◀────────────────── success ──────────────────────────────────┤
//!                                  Editing ◀──── failure ───────────┘
//! ```
//!
//! The session never performs a request itself: transitions that need one
//! return a [`Request`], and the caller feeds the result back through
//! `complete_load` / `complete_submit`. While a request is outstanding every
//! other trigger is ignored, so there is never more than one in flight.
//!
//! The one exception is cancelling a pending load: the field goes back to
//! `Display` right away and the load's result is dropped when it arrives. A
//! new activation before then waits on that same load instead of issuing
//! another one.

use tracing::{debug, warn};

use crate::error::{Result, SubmitFailure, TransportError};
use crate::models::{FieldConfig, FormState};

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Display,
    Loading,
    Editing,
    Submitting,
}

/// What started the edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A click on the field itself.
    Element,
    /// A click on the configured external control.
    ExternalControl,
}

/// A request the caller must perform on the session's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Load {
        url: String,
    },
    Submit {
        url: String,
        method: Option<String>,
        payload: String,
    },
}

/// A response that reached the server and came back with a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Any 2xx status counts as success.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Result of feeding a submit response back into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The display now shows the response body.
    Updated(String),
    /// The response is a script for the host to run; the display is untouched.
    Script(String),
    /// The form stays open.
    Failed(SubmitFailure),
    /// No submit was outstanding.
    Ignored,
}

/// Callbacks fired by the session. All methods default to no-ops.
pub trait SessionHooks {
    fn on_success(&mut self, _response: &Response) {}
    fn on_failure(&mut self, _failure: &SubmitFailure) {}
    fn on_load_error(&mut self, _error: &TransportError) {}
}

impl SessionHooks for () {}

// ============================================================================
// Edit Session
// ============================================================================

#[derive(Debug, Clone)]
pub struct EditSession {
    config: FieldConfig,
    state: EditState,
    displayed: String,
    draft: String,
    load_in_flight: bool,
}

impl EditSession {
    pub fn new(config: FieldConfig, displayed: impl Into<String>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: EditState::Display,
            displayed: displayed.into(),
            draft: String::new(),
            load_in_flight: false,
        })
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    /// Content of the read-only element.
    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    /// Text currently in the edit form.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn form_visible(&self) -> bool {
        matches!(self.state, EditState::Editing | EditState::Submitting)
    }

    /// Enter edit mode. Returns the load request when the value has to be
    /// fetched first.
    pub fn activate(&mut self, trigger: Trigger) -> Option<Request> {
        if self.state != EditState::Display {
            debug!(field = %self.config.target_id, state = ?self.state, "ignoring activation");
            return None;
        }
        if trigger == Trigger::ExternalControl && self.config.external_control_id.is_none() {
            return None;
        }

        match &self.config.load_value_url {
            Some(url) => {
                self.state = EditState::Loading;
                if self.load_in_flight {
                    return None;
                }
                self.load_in_flight = true;
                Some(Request::Load { url: url.clone() })
            }
            None => {
                self.draft = self.displayed.clone();
                self.state = EditState::Editing;
                None
            }
        }
    }

    /// Feed back the result of a load request.
    pub fn complete_load(
        &mut self,
        result: std::result::Result<String, TransportError>,
        hooks: &mut impl SessionHooks,
    ) {
        if !self.load_in_flight {
            return;
        }
        self.load_in_flight = false;
        if self.state != EditState::Loading {
            debug!(field = %self.config.target_id, "dropping load cancelled by the user");
            return;
        }
        match result {
            Ok(value) => {
                self.draft = value;
                self.state = EditState::Editing;
            }
            Err(e) => {
                warn!(field = %self.config.target_id, error = %e, "failed to load editable value");
                self.state = EditState::Display;
                hooks.on_load_error(&e);
            }
        }
    }

    /// Replace the form's text. Only meaningful while editing.
    pub fn edit(&mut self, text: impl Into<String>) {
        if self.state == EditState::Editing {
            self.draft = text.into();
        }
    }

    /// Leave edit mode without saving, or stop waiting for a pending load.
    /// Returns whether the field went back to `Display`.
    pub fn cancel(&mut self) -> bool {
        if !matches!(self.state, EditState::Editing | EditState::Loading) {
            return false;
        }
        self.draft.clear();
        self.state = EditState::Display;
        true
    }

    /// The form as it would be submitted.
    pub fn form_state(&self) -> FormState {
        FormState::with_value(self.draft.clone())
    }

    /// Submit the form. Returns `None` unless the session is editing.
    pub fn save(&mut self) -> Option<Request> {
        if self.state != EditState::Editing {
            debug!(field = %self.config.target_id, state = ?self.state, "ignoring save");
            return None;
        }
        let payload = self
            .config
            .serializer
            .serialize(&self.form_state(), self.config.authenticity_token.as_deref());
        self.state = EditState::Submitting;
        Some(Request::Submit {
            url: self.config.submit_url.clone(),
            method: self.config.request_method().map(str::to_string),
            payload,
        })
    }

    /// Feed back the result of a submit request.
    pub fn complete_submit(
        &mut self,
        result: std::result::Result<Response, TransportError>,
        hooks: &mut impl SessionHooks,
    ) -> SubmitOutcome {
        if self.state != EditState::Submitting {
            return SubmitOutcome::Ignored;
        }

        let failure = match result {
            Ok(response) if response.is_success() => {
                self.state = EditState::Display;
                self.draft.clear();
                hooks.on_success(&response);
                return if self.config.eval_response_as_script {
                    SubmitOutcome::Script(response.body)
                } else {
                    self.displayed = response.body.clone();
                    SubmitOutcome::Updated(response.body)
                };
            }
            Ok(response) => SubmitFailure::from_status(response.status, response.body),
            Err(e) => SubmitFailure::Transport(e),
        };

        warn!(field = %self.config.target_id, error = %failure, "submit failed");
        self.state = EditState::Editing;
        hooks.on_failure(&failure);
        SubmitOutcome::Failed(failure)
    }
}
