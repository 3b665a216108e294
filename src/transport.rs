//! Request plumbing for edit sessions.
//!
//! `Transport` abstracts the network; `HttpTransport` is the reqwest-backed
//! implementation. `InPlaceEditor` drives an `EditSession` through a
//! transport, performing the requests the session asks for.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use tracing::debug;
use url::Url;

use crate::error::TransportError;
use crate::session::{
    EditSession, EditState, Request, Response, SessionHooks, SubmitOutcome, Trigger,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";
const ACCEPT_ANY: &str = "text/javascript, text/html, application/xml, text/xml, */*";

// ============================================================================
// Transport
// ============================================================================

#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Fetch the value to seed the edit form with.
    async fn load(&self, url: &str) -> Result<String, TransportError>;

    /// Send the serialized form. Any status is returned as a `Response`;
    /// only failures to get one are errors.
    async fn submit(
        &self,
        url: &str,
        method: Option<&str>,
        payload: String,
    ) -> Result<Response, TransportError>;
}

/// HTTP transport. Relative URLs are resolved against `base`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base: Option<Url>,
}

impl HttpTransport {
    pub fn new(base: Option<Url>) -> Self {
        Self {
            client: Client::new(),
            base,
        }
    }

    pub fn with_base(base: &str) -> Result<Self, TransportError> {
        let base = Url::parse(base).map_err(|e| TransportError::InvalidUrl(e.to_string()))?;
        Ok(Self::new(Some(base)))
    }

    pub fn resolve(&self, url: &str) -> Result<Url, TransportError> {
        match Url::parse(url) {
            Ok(absolute) => Ok(absolute),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base {
                Some(base) => base
                    .join(url)
                    .map_err(|e| TransportError::InvalidUrl(e.to_string())),
                None => Err(TransportError::InvalidUrl(format!(
                    "relative URL without base: {}",
                    url
                ))),
            },
            Err(e) => Err(TransportError::InvalidUrl(e.to_string())),
        }
    }
}

/// Parse a pass-through method name; `None` means POST.
pub fn parse_method(method: Option<&str>) -> Result<Method, TransportError> {
    match method {
        None => Ok(Method::POST),
        Some(m) => Method::from_bytes(m.trim().to_uppercase().as_bytes())
            .map_err(|_| TransportError::InvalidMethod(m.to_string())),
    }
}

impl Transport for HttpTransport {
    async fn load(&self, url: &str) -> Result<String, TransportError> {
        let url = self.resolve(url)?;
        debug!(%url, "loading editable value");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_ANY)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::UnexpectedStatus(status.as_u16()));
        }
        response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))
    }

    async fn submit(
        &self,
        url: &str,
        method: Option<&str>,
        payload: String,
    ) -> Result<Response, TransportError> {
        let url = self.resolve(url)?;
        let method = parse_method(method)?;
        debug!(%url, %method, "submitting edited value");

        let response = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(ACCEPT, ACCEPT_ANY)
            .header("X-Requested-With", "XMLHttpRequest")
            .body(payload)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Response { status, body })
    }
}

// ============================================================================
// In-Place Editor
// ============================================================================

/// An edit session bound to a transport.
pub struct InPlaceEditor<T> {
    session: EditSession,
    transport: T,
}

impl<T: Transport> InPlaceEditor<T> {
    pub fn new(session: EditSession, transport: T) -> Self {
        Self { session, transport }
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Enter edit mode, loading the value first if configured to.
    pub async fn activate(&mut self, trigger: Trigger, hooks: &mut impl SessionHooks) -> EditState {
        if let Some(Request::Load { url }) = self.session.activate(trigger) {
            let result = self.transport.load(&url).await;
            self.session.complete_load(result, hooks);
        }
        self.session.state()
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        self.session.edit(text);
    }

    pub fn cancel(&mut self) -> bool {
        self.session.cancel()
    }

    /// Submit the form and apply the response.
    pub async fn save(&mut self, hooks: &mut impl SessionHooks) -> SubmitOutcome {
        let Some(Request::Submit {
            url,
            method,
            payload,
        }) = self.session.save()
        else {
            return SubmitOutcome::Ignored;
        };
        let result = self
            .transport
            .submit(&url, method.as_deref(), payload)
            .await;
        self.session.complete_submit(result, hooks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubmitFailure;
    use crate::models::FieldConfig;
    use std::cell::RefCell;

    /// Transport answering from canned results and recording every call.
    struct Scripted {
        load: Result<String, TransportError>,
        submit: Result<Response, TransportError>,
        calls: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(submit: Result<Response, TransportError>) -> Self {
            Self {
                load: Ok(String::new()),
                submit,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for Scripted {
        async fn load(&self, url: &str) -> Result<String, TransportError> {
            self.calls.borrow_mut().push(format!("GET {}", url));
            self.load.clone()
        }

        async fn submit(
            &self,
            url: &str,
            method: Option<&str>,
            payload: String,
        ) -> Result<Response, TransportError> {
            self.calls.borrow_mut().push(format!(
                "{} {} {}",
                method.unwrap_or("post"),
                url,
                payload
            ));
            self.submit.clone()
        }
    }

    #[derive(Default)]
    struct Counter {
        success: usize,
        failure: usize,
    }

    impl SessionHooks for Counter {
        fn on_success(&mut self, _response: &Response) {
            self.success += 1;
        }

        fn on_failure(&mut self, _failure: &SubmitFailure) {
            self.failure += 1;
        }
    }

    fn editor(config: FieldConfig, transport: Scripted) -> InPlaceEditor<Scripted> {
        InPlaceEditor::new(EditSession::new(config, "Lyon").unwrap(), transport)
    }

    #[tokio::test]
    async fn test_edit_and_save_round() {
        let mut ed = editor(
            FieldConfig::new("city", "/cities/1"),
            Scripted::new(Ok(Response::new(200, "Paris"))),
        );
        let mut hooks = Counter::default();

        assert_eq!(ed.activate(Trigger::Element, &mut hooks).await, EditState::Editing);
        ed.edit("paris");
        let outcome = ed.save(&mut hooks).await;

        assert_eq!(outcome, SubmitOutcome::Updated("Paris".into()));
        assert_eq!(ed.session().displayed(), "Paris");
        assert_eq!(hooks.success, 1);
        assert_eq!(
            *ed.transport().calls.borrow(),
            vec!["post /cities/1 value=paris".to_string()]
        );
    }

    #[tokio::test]
    async fn test_load_then_edit() {
        let mut transport = Scripted::new(Ok(Response::new(200, "")));
        transport.load = Ok("raw text".into());
        let config = FieldConfig::new("bio", "/bio").with_load_value_url("/bio/raw");
        let mut ed = editor(config, transport);

        let state = ed.activate(Trigger::Element, &mut ()).await;
        assert_eq!(state, EditState::Editing);
        assert_eq!(ed.session().draft(), "raw text");
    }

    #[tokio::test]
    async fn test_load_error_aborts_activation() {
        let mut transport = Scripted::new(Ok(Response::new(200, "")));
        transport.load = Err(TransportError::UnexpectedStatus(404));
        let config = FieldConfig::new("bio", "/bio").with_load_value_url("/bio/raw");
        let mut ed = editor(config, transport);

        assert_eq!(ed.activate(Trigger::Element, &mut ()).await, EditState::Display);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_form_open() {
        let mut ed = editor(
            FieldConfig::new("city", "/cities/1"),
            Scripted::new(Ok(Response::new(422, "blank"))),
        );
        let mut hooks = Counter::default();
        ed.activate(Trigger::Element, &mut hooks).await;
        ed.edit("");

        let outcome = ed.save(&mut hooks).await;
        assert!(matches!(
            outcome,
            SubmitOutcome::Failed(SubmitFailure::Rejected { .. })
        ));
        assert_eq!(ed.session().state(), EditState::Editing);
        assert_eq!(ed.session().displayed(), "Lyon");
        assert_eq!((hooks.success, hooks.failure), (0, 1));
    }

    #[tokio::test]
    async fn test_save_outside_edit_mode_sends_nothing() {
        let mut ed = editor(
            FieldConfig::new("city", "/cities/1"),
            Scripted::new(Ok(Response::new(200, "x"))),
        );
        assert_eq!(ed.save(&mut ()).await, SubmitOutcome::Ignored);
        assert!(ed.transport().calls.borrow().is_empty());
    }

    #[test]
    fn test_resolve_relative_against_base() {
        let t = HttpTransport::with_base("http://localhost:3000/settings/").unwrap();
        assert_eq!(
            t.resolve("/field/city").unwrap().as_str(),
            "http://localhost:3000/field/city"
        );
        assert_eq!(
            t.resolve("https://example.com/x").unwrap().as_str(),
            "https://example.com/x"
        );
        assert!(matches!(
            HttpTransport::new(None).resolve("/field/city"),
            Err(TransportError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method(None).unwrap(), Method::POST);
        assert_eq!(parse_method(Some("put")).unwrap(), Method::PUT);
        assert!(parse_method(Some("not a method")).is_err());
    }
}
