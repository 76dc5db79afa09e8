// SPDX-License-Identifier: Apache-2.0

//! Reporter facade: the `warn`/`error`/timer entry points.
//!
//! A [`Reporter`] is fixed at construction in one of two modes. In
//! development every entry point reduces to a local `tracing` event. In
//! production, events are formatted and dispatched to the configured backend
//! as issues, optionally followed by an AI triage comment.
//!
//! Two dispatch modes exist, and each entry point documents which one it
//! uses: *awaited* (the caller waits for the full create-issue -> AI ->
//! comment chain) and *detached* (the chain is spawned onto the runtime and
//! the caller returns immediately). Both swallow failures: reporting must
//! never crash the host application, so every transport or AI error is
//! reduced to a local `tracing::error!` diagnostic. Callers cannot observe
//! whether delivery succeeded.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::ai::OpenRouterClient;
use crate::backend::IssueBackend;
use crate::format::{self, AuxData, IssueContent, LogValue, RouteEntry};

/// Local callback invoked with the raw event before dispatch.
pub type Hook = Box<dyn Fn(&LogValue) + Send + Sync>;

/// Reporter mode, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print locally, never touch the network.
    Development,
    /// Format events and dispatch them as issues.
    Production,
}

/// A warning event.
///
/// Only dispatched as an issue when explicitly marked via
/// [`report_as_issue`](WarnReport::report_as_issue).
pub struct WarnReport<L> {
    /// The warning itself.
    pub warning: LogValue,
    /// Dispatch an issue for this warning (off by default).
    pub as_issue: bool,
    /// Auxiliary data rendered as a Markdown table.
    pub data: AuxData,
    /// Route history rendered as a Markdown table.
    pub routes: Vec<RouteEntry>,
    /// Labels for the created issue, typed by the backend.
    pub labels: Vec<L>,
}

impl<L> WarnReport<L> {
    /// Creates a warning report with no extras attached.
    pub fn new(warning: impl Into<LogValue>) -> Self {
        Self {
            warning: warning.into(),
            as_issue: false,
            data: AuxData::new(),
            routes: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Marks the warning as issue-worthy.
    #[must_use]
    pub fn report_as_issue(mut self) -> Self {
        self.as_issue = true;
        self
    }

    /// Attaches auxiliary data.
    #[must_use]
    pub fn with_data(mut self, data: AuxData) -> Self {
        self.data = data;
        self
    }

    /// Attaches route history.
    #[must_use]
    pub fn with_routes(mut self, routes: Vec<RouteEntry>) -> Self {
        self.routes = routes;
        self
    }

    /// Attaches issue labels.
    #[must_use]
    pub fn with_labels(mut self, labels: Vec<L>) -> Self {
        self.labels = labels;
        self
    }
}

/// An error event. Always dispatched as an issue in production.
pub struct ErrorReport<L> {
    /// The error itself.
    pub error: LogValue,
    /// Auxiliary data rendered as a Markdown table.
    pub data: AuxData,
    /// Route history rendered as a Markdown table.
    pub routes: Vec<RouteEntry>,
    /// Labels for the created issue, typed by the backend.
    pub labels: Vec<L>,
}

impl<L> ErrorReport<L> {
    /// Creates an error report with no extras attached.
    pub fn new(error: impl Into<LogValue>) -> Self {
        Self {
            error: error.into(),
            data: AuxData::new(),
            routes: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Attaches auxiliary data.
    #[must_use]
    pub fn with_data(mut self, data: AuxData) -> Self {
        self.data = data;
        self
    }

    /// Attaches route history.
    #[must_use]
    pub fn with_routes(mut self, routes: Vec<RouteEntry>) -> Self {
        self.routes = routes;
        self
    }

    /// Attaches issue labels.
    #[must_use]
    pub fn with_labels(mut self, labels: Vec<L>) -> Self {
        self.labels = labels;
        self
    }
}

struct Inner<B: IssueBackend> {
    backend: B,
    ai: Option<OpenRouterClient>,
    mode: Mode,
    log_in_production: bool,
    on_error: Option<Hook>,
    on_warn: Option<Hook>,
    timers: Mutex<HashMap<String, Instant>>,
}

impl<B: IssueBackend> Inner<B> {
    /// The shared dispatch sequence: create the issue, ask the AI
    /// collaborator, attach a non-empty answer as a comment. Every step's
    /// failure ends the chain with a local diagnostic.
    async fn deliver(&self, content: IssueContent, labels: Vec<B::Label>) {
        let number = match self
            .backend
            .create_issue(&content.title, &content.body, &labels)
            .await
        {
            Ok(number) => number,
            Err(err) => {
                error!(platform = self.backend.platform(), error = %err, "failed to create issue");
                return;
            }
        };

        let Some(ai) = &self.ai else {
            return;
        };
        let prompt = format!("{}\n{}", content.title, content.body);
        match ai.troubleshoot(&prompt).await {
            Ok(Some(answer)) if !answer.is_empty() => {
                if let Err(err) = self.backend.add_comment(number, &answer).await {
                    error!(error = %err, number, "failed to post triage comment");
                }
            }
            Ok(_) => debug!(number, "no triage answer returned"),
            Err(err) => error!(error = %err, "AI collaborator failed"),
        }
    }
}

/// The reporting facade over one backend and an optional AI collaborator.
///
/// Cheap to clone; clones share the backend, the AI client, and the timer
/// map.
pub struct Reporter<B: IssueBackend> {
    inner: Arc<Inner<B>>,
}

impl<B: IssueBackend> Clone for Reporter<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: IssueBackend + 'static> Reporter<B> {
    /// Starts building a reporter around a backend.
    pub fn builder(backend: B) -> ReporterBuilder<B> {
        ReporterBuilder {
            backend,
            ai: None,
            production: false,
            log_in_production: false,
            on_error: None,
            on_warn: None,
        }
    }

    /// The mode this reporter was constructed in.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.inner.mode
    }

    fn timers(&self) -> MutexGuard<'_, HashMap<String, Instant>> {
        // A poisoned lock only means a panic elsewhere; the map stays usable.
        self.inner
            .timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Logs an informational message.
    ///
    /// Suppressed in production unless `log_in_production` is set.
    pub fn log(&self, message: impl Display) {
        if self.inner.mode == Mode::Development || self.inner.log_in_production {
            info!("{message}");
        }
    }

    /// Logs a debug message.
    ///
    /// Suppressed in production unless `log_in_production` is set.
    pub fn debug(&self, message: impl Display) {
        if self.inner.mode == Mode::Development || self.inner.log_in_production {
            debug!("{message}");
        }
    }

    /// Reports a warning.
    ///
    /// Development: logs locally and returns. Production: invokes the
    /// `on_warn` hook, then, only when the report is marked issue-worthy,
    /// dispatches in *detached* mode (best-effort, non-blocking; requires a
    /// running tokio runtime).
    pub fn warn(&self, report: WarnReport<B::Label>) {
        if self.inner.mode == Mode::Development {
            let (title, _) = report.warning.issue_parts();
            warn!(data = ?report.data, "{title}");
            return;
        }
        if let Some(hook) = &self.inner.on_warn {
            hook(&report.warning);
        }
        if report.as_issue {
            let (title, body) = report.warning.issue_parts();
            let content = format::render_parts(&title, &body, &report.data, &report.routes);
            self.deliver_detached(content, report.labels);
        }
    }

    /// Reports an error.
    ///
    /// Development: logs locally and returns. Production: invokes the
    /// `on_error` hook, then dispatches in *awaited* mode (the call returns
    /// once the full chain has been attempted; failures are still swallowed).
    pub async fn error(&self, report: ErrorReport<B::Label>) {
        if self.inner.mode == Mode::Development {
            let (title, _) = report.error.issue_parts();
            error!(data = ?report.data, "{title}");
            return;
        }
        if let Some(hook) = &self.inner.on_error {
            hook(&report.error);
        }
        let (title, body) = report.error.issue_parts();
        let content = format::render_parts(&title, &body, &report.data, &report.routes);
        self.inner.deliver(content, report.labels).await;
    }

    /// Starts a timer.
    ///
    /// Development: logs the start. Production: records a start instant, but
    /// only when `as_issue` requests an issue-worthy measurement.
    pub fn time_start(&self, label: &str, as_issue: bool) {
        if self.inner.mode == Mode::Development {
            info!(timer = label, "timer started");
            return;
        }
        if as_issue {
            self.timers().insert(label.to_string(), Instant::now());
        }
    }

    /// Stops a timer and dispatches the measurement.
    ///
    /// Development: logs the stop. Production: computes the elapsed time,
    /// removes the entry, and dispatches (awaited) an issue titled
    /// `"{label} {elapsed}ms"`. Without a matching start this is a no-op.
    pub async fn time_end(&self, label: &str) {
        if self.inner.mode == Mode::Development {
            info!(timer = label, "timer stopped");
            return;
        }
        let started = self.timers().remove(label);
        let Some(started) = started else {
            return;
        };
        let elapsed = format!("{:.3}ms", started.elapsed().as_secs_f64() * 1000.0);
        let content =
            format::render_parts(&format!("{label} {elapsed}"), &elapsed, &AuxData::new(), &[]);
        self.inner.deliver(content, Vec::new()).await;
    }

    /// Dispatches an issue in *awaited* mode.
    ///
    /// Title and body are coerced with [`format::coerce`]; failures are
    /// swallowed after a local diagnostic.
    pub async fn issue(
        &self,
        title: impl Into<Value>,
        body: impl Into<Value>,
        data: AuxData,
        routes: Vec<RouteEntry>,
        labels: Vec<B::Label>,
    ) {
        let content = format::render(&title.into(), &body.into(), &data, &routes);
        self.inner.deliver(content, labels).await;
    }

    /// Dispatches an issue in *detached* mode.
    ///
    /// The chain is spawned onto the current tokio runtime; a failure is
    /// only visible in local logs.
    pub fn issue_detached(
        &self,
        title: impl Into<Value>,
        body: impl Into<Value>,
        data: AuxData,
        routes: Vec<RouteEntry>,
        labels: Vec<B::Label>,
    ) {
        let content = format::render(&title.into(), &body.into(), &data, &routes);
        self.deliver_detached(content, labels);
    }

    fn deliver_detached(&self, content: IssueContent, labels: Vec<B::Label>) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner.deliver(content, labels).await;
        });
    }
}

/// Builder for [`Reporter`].
pub struct ReporterBuilder<B: IssueBackend> {
    backend: B,
    ai: Option<OpenRouterClient>,
    production: bool,
    log_in_production: bool,
    on_error: Option<Hook>,
    on_warn: Option<Hook>,
}

impl<B: IssueBackend> ReporterBuilder<B> {
    /// Selects production (true) or development (false) mode.
    #[must_use]
    pub fn production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    /// Attaches an AI collaborator for triage comments.
    #[must_use]
    pub fn ai(mut self, client: OpenRouterClient) -> Self {
        self.ai = Some(client);
        self
    }

    /// Keeps `log`/`debug` output in production.
    #[must_use]
    pub fn log_in_production(mut self, keep: bool) -> Self {
        self.log_in_production = keep;
        self
    }

    /// Registers a local callback invoked with each raw error.
    #[must_use]
    pub fn on_error(mut self, hook: impl Fn(&LogValue) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    /// Registers a local callback invoked with each raw warning.
    #[must_use]
    pub fn on_warn(mut self, hook: impl Fn(&LogValue) + Send + Sync + 'static) -> Self {
        self.on_warn = Some(Box::new(hook));
        self
    }

    /// Builds the reporter.
    #[must_use]
    pub fn build(self) -> Reporter<B> {
        Reporter {
            inner: Arc::new(Inner {
                backend: self.backend,
                ai: self.ai,
                mode: if self.production {
                    Mode::Production
                } else {
                    Mode::Development
                },
                log_in_production: self.log_in_production,
                on_error: self.on_error,
                on_warn: self.on_warn,
                timers: Mutex::new(HashMap::new()),
            }),
        }
    }
}
