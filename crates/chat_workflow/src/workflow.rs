//! RequestWorkflow - owns the session state and drives submissions
//!
//! Every intent from the presentation surface lands here. The workflow keeps
//! the draft, the file selection, the busy flag and the last response, and
//! publishes a [`WorkflowSnapshot`] after each change so a surface can render
//! without holding its own copy of the state.

use log::{debug, error, info};
use tokio::sync::watch;

use crate::error::WorkflowFailure;
use crate::files::FileHandle;
use crate::request::Submission;
use crate::state::{WorkflowEvent, WorkflowPhase, WorkflowSnapshot};
use crate::transport::TransportClient;

/// Shown when there is neither a message nor a file to send.
pub const PROMPT_FOR_INPUT: &str = "Please provide a text message or upload files.";

/// How a settled submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The service answered and the reply is the response text.
    Answered,
    /// Nothing to send; the response text asks for input.
    Prompted,
    /// The transport failed; the response text is the failure message.
    Failed(WorkflowFailure),
}

pub struct RequestWorkflow<T> {
    transport: T,
    draft: String,
    files: Vec<FileHandle>,
    phase: WorkflowPhase,
    response: Option<String>,
    snapshots: watch::Sender<WorkflowSnapshot>,
}

impl<T: TransportClient> RequestWorkflow<T> {
    pub fn new(transport: T) -> Self {
        let (snapshots, _) = watch::channel(WorkflowSnapshot::default());
        Self {
            transport,
            draft: String::new(),
            files: Vec::new(),
            phase: WorkflowPhase::Idle,
            response: None,
            snapshots,
        }
    }

    /// Subscribe to state changes. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<WorkflowSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn files(&self) -> &[FileHandle] {
        &self.files
    }

    pub fn file_names(&self) -> String {
        self.files
            .iter()
            .map(FileHandle::name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot {
            draft: self.draft.clone(),
            file_names: self.files.iter().map(|f| f.name().to_string()).collect(),
            busy: self.is_busy(),
            response: self.response.clone(),
        }
    }

    pub fn update_draft_message(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        self.publish();
    }

    /// Replace the selection wholesale; the previous files are discarded.
    pub fn update_selected_files(&mut self, files: Vec<FileHandle>) {
        self.files = files;
        self.publish();
    }

    /// Clear draft, files and response. The phase is left alone.
    pub fn reset(&mut self) {
        self.draft.clear();
        self.files.clear();
        self.response = None;
        self.publish();
    }

    /// Submit the current draft and file selection.
    ///
    /// Never fails: transport errors are logged and turned into a fixed
    /// response text. The workflow is idle again when this returns, and the
    /// draft and files are kept so the user can retry.
    pub async fn submit_request(&mut self) -> SubmitOutcome {
        self.response = None;
        self.apply(WorkflowEvent::SubmitStarted);

        let submission = Submission::build(&self.draft, &self.files);
        if let Some(submission) = &submission {
            debug!("Built {:?} submission", submission.kind());
        }

        let outcome = match submission {
            None => {
                debug!("Nothing to submit, prompting for input");
                self.response = Some(PROMPT_FOR_INPUT.to_string());
                SubmitOutcome::Prompted
            }
            Some(Submission::Text(request)) => {
                info!("Submitting text message ({} bytes)", request.message.len());
                match self.transport.send_message(&request).await {
                    Ok(reply) => {
                        self.response = Some(reply.response);
                        SubmitOutcome::Answered
                    }
                    Err(e) => {
                        error!("There was an error sending the message: {}", e);
                        self.fail(WorkflowFailure::TextSend)
                    }
                }
            }
            Some(Submission::Upload(request)) => {
                info!("Submitting upload with {} file(s)", request.file_count());
                match self.transport.send_upload(&request).await {
                    Ok(reply) => {
                        self.response = Some(reply.render());
                        SubmitOutcome::Answered
                    }
                    Err(e) => {
                        error!("There was an error uploading the file(s): {}", e);
                        self.fail(WorkflowFailure::Upload)
                    }
                }
            }
        };

        self.apply(WorkflowEvent::SubmitSettled);
        outcome
    }

    fn fail(&mut self, failure: WorkflowFailure) -> SubmitOutcome {
        self.response = Some(failure.to_string());
        SubmitOutcome::Failed(failure)
    }

    fn apply(&mut self, event: WorkflowEvent) {
        let next = self.phase.next(event);
        debug!("Workflow {:?} -> {:?} on {:?}", self.phase, next, event);
        self.phase = next;
        self.publish();
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }
}
