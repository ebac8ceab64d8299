//! View state for the two screens.
//!
//! [`AnalysisView`] backs the analysis screen and [`RagView`] backs the
//! ingest + chat screen. Each view owns its state exclusively; actions take
//! `&mut self` and are awaited one at a time by the caller.
//!
//! A request that never completes leaves its state in `Loading`. Nothing here
//! enforces a timeout; see `MarsConfig::timeout_secs` for the transport-level
//! bound.

use tracing::{debug, info};

use crate::client::MarsBackend;
use crate::errors::MarsResult;
use crate::types::{AnalysisResult, ChatMessage, ChatResponse};

/// Status shown while the backend ingests data
pub const INGEST_IN_PROGRESS: &str = "Ingesting Mars data, this may take a while...";

/// Lifecycle of a single backend operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState<T> {
    Idle,
    Loading,
    Succeeded(T),
    Failed(String),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        RequestState::Idle
    }
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn succeeded(&self) -> Option<&T> {
        match self {
            RequestState::Succeeded(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> From<MarsResult<T>> for RequestState<T> {
    fn from(outcome: MarsResult<T>) -> Self {
        match outcome {
            Ok(payload) => RequestState::Succeeded(payload),
            Err(e) => RequestState::Failed(e.to_string()),
        }
    }
}

/// State of the analysis screen
#[derive(Debug, Default)]
pub struct AnalysisView {
    state: RequestState<AnalysisResult>,
}

impl AnalysisView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RequestState<AnalysisResult> {
        &self.state
    }

    /// Enter `Loading`, dropping any previous result or error.
    /// Returns false and changes nothing if a run is already in flight.
    pub fn begin_analysis(&mut self) -> bool {
        if self.state.is_loading() {
            debug!("Analysis already running, ignoring trigger");
            return false;
        }
        self.state = RequestState::Loading;
        true
    }

    /// Leave `Loading` with the outcome of the request
    pub fn finish_analysis(&mut self, outcome: MarsResult<AnalysisResult>) {
        self.state = outcome.into();
    }

    /// Run a full analysis round trip against the backend
    pub async fn run_analysis<B>(&mut self, backend: &B) -> &RequestState<AnalysisResult>
    where
        B: MarsBackend + ?Sized,
    {
        if self.begin_analysis() {
            info!("Requesting Mars analysis");
            let outcome = backend.analyze().await;
            self.finish_analysis(outcome);
        }
        &self.state
    }
}

/// Question captured from the input and already appended to the history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuestion {
    pub question: String,
}

/// State of the ingest + chat screen
#[derive(Debug, Default)]
pub struct RagView {
    ingest: RequestState<String>,
    status: Option<String>,
    input: String,
    history: Vec<ChatMessage>,
}

impl RagView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingest_state(&self) -> &RequestState<String> {
        &self.ingest
    }

    /// Latest ingest status line, if ingest was ever triggered
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Chat history, oldest first. Append-only.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Returns false and changes nothing if ingest is already in flight
    pub fn begin_ingest(&mut self) -> bool {
        if self.ingest.is_loading() {
            debug!("Ingest already running, ignoring trigger");
            return false;
        }
        self.ingest = RequestState::Loading;
        self.status = Some(INGEST_IN_PROGRESS.to_string());
        true
    }

    /// The body becomes the status message untouched; failures get an `Error: ` prefix
    pub fn finish_ingest(&mut self, outcome: MarsResult<String>) {
        match outcome {
            Ok(body) => {
                self.status = Some(body.clone());
                self.ingest = RequestState::Succeeded(body);
            }
            Err(e) => {
                self.status = Some(e.user_message());
                self.ingest = RequestState::Failed(e.to_string());
            }
        }
    }

    pub async fn run_ingest<B>(&mut self, backend: &B) -> Option<&str>
    where
        B: MarsBackend + ?Sized,
    {
        if self.begin_ingest() {
            info!("Triggering ingest");
            let outcome = backend.ingest().await;
            self.finish_ingest(outcome);
        }
        self.status()
    }

    /// First phase of asking: take the input, clear it and append the user
    /// message. Blank input is left untouched and yields `None`.
    pub fn submit_question(&mut self) -> Option<PendingQuestion> {
        if self.input.trim().is_empty() {
            return None;
        }

        let question = std::mem::take(&mut self.input);
        self.history.push(ChatMessage::user(question.clone()));
        Some(PendingQuestion { question })
    }

    /// Second phase: append exactly one bot message for the finished request.
    /// The user message from the first phase is never rolled back.
    pub fn complete_question(&mut self, outcome: MarsResult<ChatResponse>) -> &ChatMessage {
        let content = match outcome {
            Ok(response) => response.answer,
            Err(e) => e.user_message(),
        };
        self.history.push(ChatMessage::bot(content));
        &self.history[self.history.len() - 1]
    }

    /// Ask whatever is in the input. Returns the bot reply, or `None` for blank input.
    pub async fn ask_question<B>(&mut self, backend: &B) -> Option<&ChatMessage>
    where
        B: MarsBackend + ?Sized,
    {
        let pending = self.submit_question()?;
        debug!("Asking backend: {}", pending.question);
        let outcome = backend.chat(&pending.question).await;
        Some(self.complete_question(outcome))
    }
}
