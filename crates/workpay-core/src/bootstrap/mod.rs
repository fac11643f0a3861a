//! Session bootstrap: the decision procedure between the auth widget and
//! the rest of the app.
//!
//! One attempt runs as a single sequential async task: normalize the
//! payload, extract the token and identity, persist the session, then yield
//! the navigation directive. Only the persistence writes are concurrent
//! among themselves, and all of them settle before navigation is offered.

pub mod extract;
pub mod normalize;

use std::fmt;
use std::time::Duration;

pub use extract::{ExtractError, ExtractedSession, ExtractionPolicy};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;
use workpay_types::Route;

use crate::session::{SessionRepository, SessionStore};
use crate::widget::{AuthWidget, WidgetOutcome};

/// Attempt lifecycle. `Failure` returns to the widget only through an
/// explicit user retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapState {
    /// Screen mounted, no attempt made yet.
    Idle,
    /// The external widget owns the flow; no timeout is enforced.
    AwaitingWidget,
    /// Session persisted, directive emitted.
    Success { route: Route },
    /// Attempt failed; the user may retry.
    Failure { message: String },
}

/// Terminal failure of one bootstrap attempt.
///
/// Only `user_message` is ever shown; internal detail goes to logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapFailure {
    /// No usable token in the payload (upstream error text or generic).
    Extraction(ExtractError),
    /// The session store rejected a write; always reported generically.
    Persistence,
    /// The widget invoked its failure callback; always reported generically.
    Widget,
}

impl BootstrapFailure {
    /// The message surfaced to the user.
    pub fn user_message(&self) -> String {
        match self {
            BootstrapFailure::Extraction(err) => err.user_message(),
            BootstrapFailure::Persistence => {
                "Could not save session. Please try again.".to_string()
            }
            BootstrapFailure::Widget => "Authentication was cancelled or failed.".to_string(),
        }
    }
}

impl fmt::Display for BootstrapFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}

impl std::error::Error for BootstrapFailure {}

/// Drives one login variant: widget outcome in, persisted session and
/// navigation directive out.
pub struct SessionBootstrap<S: SessionStore> {
    repo: SessionRepository<S>,
    policy: ExtractionPolicy,
    retry_delay: Duration,
    state: BootstrapState,
}

impl<S: SessionStore> SessionBootstrap<S> {
    pub fn new(repo: SessionRepository<S>, policy: ExtractionPolicy, retry_delay: Duration) -> Self {
        Self {
            repo,
            policy,
            retry_delay,
            state: BootstrapState::Idle,
        }
    }

    pub fn state(&self) -> &BootstrapState {
        &self.state
    }

    pub fn repository(&self) -> &SessionRepository<S> {
        &self.repo
    }

    /// Starts an attempt: the widget owns the flow from here.
    pub fn begin(&mut self) {
        self.state = BootstrapState::AwaitingWidget;
    }

    /// Handles the widget's success callback.
    ///
    /// Runs normalize -> extract -> persist; navigation is only offered once
    /// every persistence write has settled.
    pub async fn on_widget_success(&mut self, raw: Value) -> Result<Route, BootstrapFailure> {
        let attempt = Uuid::new_v4();
        let payload = normalize::normalize(raw);

        let session = match self.policy.extract(&payload) {
            Ok(session) => session,
            Err(err) => {
                debug!(attempt = %attempt, "extraction failed: {err}");
                return Err(self.fail(BootstrapFailure::Extraction(err)));
            }
        };

        if let Err(err) = self
            .repo
            .save_session(
                &session.token,
                session.email.as_deref(),
                self.policy.purges_stale_company(),
            )
            .await
        {
            warn!(attempt = %attempt, "session persistence failed: {err}");
            return Err(self.fail(BootstrapFailure::Persistence));
        }

        let email = if self.policy.email_defaults_empty() {
            Some(session.email.unwrap_or_default())
        } else {
            session.email
        };
        let route = Route::RoleSelection {
            token: session.token,
            email,
        };
        debug!(attempt = %attempt, route = route.name(), "session bootstrap succeeded");
        self.state = BootstrapState::Success {
            route: route.clone(),
        };
        Ok(route)
    }

    /// Handles the widget's failure callback.
    ///
    /// The underlying detail is logged, never shown.
    pub fn on_widget_failure(&mut self, detail: &str) -> BootstrapFailure {
        warn!("auth widget reported failure: {detail}");
        self.fail(BootstrapFailure::Widget)
    }

    /// Explicit `Failure -> AwaitingWidget` transition on user retry,
    /// debounced so the widget is not re-opened mid-teardown.
    pub async fn retry(&mut self) {
        if matches!(self.state, BootstrapState::Failure { .. }) {
            tokio::time::sleep(self.retry_delay).await;
            self.state = BootstrapState::AwaitingWidget;
        }
    }

    /// Runs one full attempt against a widget.
    pub async fn run_widget<W: AuthWidget>(&mut self, widget: &W) -> Result<Route, BootstrapFailure> {
        self.begin();
        match widget.run().await {
            WidgetOutcome::Success(raw) => self.on_widget_success(raw).await,
            WidgetOutcome::Failure(detail) => Err(self.on_widget_failure(&detail)),
        }
    }

    fn fail(&mut self, failure: BootstrapFailure) -> BootstrapFailure {
        self.state = BootstrapState::Failure {
            message: failure.user_message(),
        };
        failure
    }
}
